//! Free-text answer grading.
//!
//! Grading never fails: anything that does not parse is simply wrong.

use crate::training_engine::{
    config::GradingConfig,
    models::{AtomSet, NumberValue, Question, SetAtom, SolvedValue},
    number::simplify,
};

/// Is `input` a correct answer to `question`?
pub fn is_correct(question: &Question, input: &str, config: &GradingConfig) -> bool {
    let input = input.trim();
    if input.is_empty() {
        return false;
    }
    match question {
        Question::Arithmetic { solution, .. } => check_arithmetic(solution.result, input, config),
        Question::Sets { solution, .. }       => check_set(&solution.result, input),
    }
}

fn check_arithmetic(expected: SolvedValue, input: &str, config: &GradingConfig) -> bool {
    match expected {
        SolvedValue::Value { value: NumberValue::Integer(n) } => {
            parse_loose_number(input).is_some_and(|x| x == n as f64)
        }
        SolvedValue::Value { value: NumberValue::Rational(q) } => {
            if input == q.to_string() {
                return true;
            }
            config.accept_equivalent_fractions
                && parse_fraction(input).is_some_and(|(n, d)| simplify(n, d) == q)
        }
        SolvedValue::QuotientRemainder { quotient, remainder } => {
            parse_quotient_remainder(input) == Some((quotient, remainder))
        }
        SolvedValue::Undefined => input.eq_ignore_ascii_case("indefinido"),
    }
}

/// Float parse tolerant of leading zeros and wrapping parentheses (`"08"`, `"(-3)"`).
fn parse_loose_number(input: &str) -> Option<f64> {
    let s = input
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(input)
        .trim();
    s.parse::<f64>().ok().filter(|x| x.is_finite())
}

/// `"n/d"` with a non-zero denominator, or a bare integer as `n/1`.
fn parse_fraction(input: &str) -> Option<(i64, i64)> {
    match input.split_once('/') {
        Some((n, d)) => {
            let n = n.trim().parse::<i64>().ok()?;
            let d = d.trim().parse::<i64>().ok()?;
            if d == 0 { None } else { Some((n, d)) }
        }
        None => input.parse::<i64>().ok().map(|n| (n, 1)),
    }
}

/// `"q R r"`, case-insensitive, whitespace-tolerant.
fn parse_quotient_remainder(input: &str) -> Option<(i64, i64)> {
    let upper = input.to_uppercase();
    let (q, r) = upper.split_once('R')?;
    Some((q.trim().parse().ok()?, r.trim().parse().ok()?))
}

/// Parse a comma-separated set answer. Braces are optional; `∅` and `{}` are the empty set.
pub fn parse_set_answer(input: &str) -> AtomSet {
    let inner = input
        .trim()
        .trim_start_matches('{')
        .trim_end_matches('}')
        .trim();
    if inner.is_empty() || inner == "∅" {
        return AtomSet::new();
    }
    inner
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| match t.parse::<i64>() {
            Ok(n)  => SetAtom::Number(n),
            Err(_) => SetAtom::Symbol(t.to_string()),
        })
        .collect()
}

fn check_set(expected: &AtomSet, input: &str) -> bool {
    let given = parse_set_answer(input);
    // Words compare case-insensitively; numbers structurally.
    let fold = |s: &AtomSet| -> AtomSet {
        s.iter()
            .map(|a| match a {
                SetAtom::Symbol(w) => SetAtom::Symbol(w.to_lowercase()),
                other => other.clone(),
            })
            .collect()
    };
    fold(&given) == fold(expected)
}
