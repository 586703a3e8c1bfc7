//! Canonical results and step-by-step derivations for arithmetic problems.
//!
//! Step lists are meant for literal display and their order is stable.
//! Integer division is Euclidean: the remainder always satisfies `0 <= r < |b|`.

use tracing::warn;

use crate::training_engine::{
    error::SessionError,
    helpers::{paren, sign_char},
    models::{Fraction, NumberKind, NumberValue, Operation, Problem, Solution, SolvedValue},
    number::{lcm, simplify},
};

/// Solve a problem. Total: rational division by zero and problems that fail
/// [`Problem::validate`] yield [`SolvedValue::Undefined`].
pub fn solve(problem: &Problem) -> Solution {
    if let Err(err) = problem.validate() {
        warn!(%err, "refusing to solve invalid problem");
        return Solution {
            result: SolvedValue::Undefined,
            steps: vec![format!("Problema inválido: {}", err)],
        };
    }
    match (problem.kind, problem.a, problem.b) {
        (NumberKind::Rational, NumberValue::Rational(a), NumberValue::Rational(b)) => {
            solve_fractions(a, b, problem.operation)
        }
        (kind, NumberValue::Integer(a), NumberValue::Integer(b)) => {
            solve_integers(a, b, kind, problem.operation)
        }
        // validate() rules out every other pairing.
        (kind, _, _) => Solution {
            result: SolvedValue::Undefined,
            steps: vec![format!("Problema inválido: {}", SessionError::KindMismatch { kind })],
        },
    }
}

// ---------------------------------------------------------------------------
// N and Z
// ---------------------------------------------------------------------------

fn solve_integers(a: i64, b: i64, kind: NumberKind, op: Operation) -> Solution {
    let signed = kind == NumberKind::Integer;
    let mut steps = Vec::new();

    let result = match op {
        Operation::Addition => {
            let r = a + b;
            steps.push(format!("{} + {} = {}", paren(a), paren(b), r));
            if signed {
                steps.push(addition_sign_rule(a, b, r));
            }
            SolvedValue::Value { value: NumberValue::Integer(r) }
        }
        Operation::Subtraction => {
            let r = a - b;
            steps.push(format!("{} - {} = {}", paren(a), paren(b), r));
            if signed {
                steps.push(format!(
                    "Restar es sumar el opuesto: {} + {} = {}",
                    paren(a), paren(-b), r
                ));
            }
            SolvedValue::Value { value: NumberValue::Integer(r) }
        }
        Operation::Multiplication => {
            let r = a * b;
            steps.push(format!("{} × {} = {}", paren(a), paren(b), r));
            if signed {
                steps.push(format!(
                    "Ley de signos: ({}) × ({}) = {}",
                    sign_char(a), sign_char(b), sign_char(r)
                ));
            }
            SolvedValue::Value { value: NumberValue::Integer(r) }
        }
        Operation::Division => divide_integers(a, b, signed, &mut steps),
    };

    Solution { result, steps }
}

fn addition_sign_rule(a: i64, b: i64, r: i64) -> String {
    let (ma, mb) = (a.abs(), b.abs());
    if (a >= 0) == (b >= 0) {
        format!(
            "Signos iguales: se suman los valores absolutos ({} + {} = {}) y se conserva el signo ({})",
            ma, mb, ma + mb, sign_char(a)
        )
    } else {
        let (hi, lo) = if ma >= mb { (ma, mb) } else { (mb, ma) };
        format!(
            "Signos diferentes: se restan los valores absolutos ({} - {} = {}) y se conserva el signo del de mayor valor absoluto ({})",
            hi, lo, hi - lo, sign_char(r)
        )
    }
}

fn divide_integers(a: i64, b: i64, signed: bool, steps: &mut Vec<String>) -> SolvedValue {
    if b == 0 {
        steps.push("División por cero".to_string());
        return SolvedValue::Undefined;
    }
    let quotient = a.div_euclid(b);
    let remainder = a.rem_euclid(b);

    let result = if remainder == 0 {
        steps.push(format!("{} ÷ {} = {}", paren(a), paren(b), quotient));
        SolvedValue::Value { value: NumberValue::Integer(quotient) }
    } else {
        steps.push(format!(
            "{} ÷ {} = {} con resto {}",
            paren(a), paren(b), quotient, remainder
        ));
        steps.push(format!(
            "Comprobación: {} × {} + {} = {}",
            paren(quotient), paren(b), remainder, quotient * b + remainder
        ));
        SolvedValue::QuotientRemainder { quotient, remainder }
    };

    if signed {
        steps.push("Ley de signos aplicada al cociente.".to_string());
    }
    result
}

// ---------------------------------------------------------------------------
// Q
// ---------------------------------------------------------------------------

fn solve_fractions(a: Fraction, b: Fraction, op: Operation) -> Solution {
    match op {
        Operation::Multiplication => multiply_fractions(a, b),
        Operation::Division       => divide_fractions(a, b),
        Operation::Addition       => combine_fractions(a, b, false),
        Operation::Subtraction    => combine_fractions(a, b, true),
    }
}

fn multiply_fractions(a: Fraction, b: Fraction) -> Solution {
    let num = a.num * b.num;
    let den = a.den * b.den;
    let mut steps = vec![
        format!("Multiplicar numeradores: {} × {} = {}", a.num, paren(b.num), num),
        format!("Multiplicar denominadores: {} × {} = {}", a.den, b.den, den),
        format!("Fracción resultante: {}/{}", num, den),
    ];
    let reduced = reduce_with_step(num, den, &mut steps);
    Solution { result: rational(reduced), steps }
}

fn divide_fractions(a: Fraction, b: Fraction) -> Solution {
    if b.is_zero() {
        return Solution {
            result: SolvedValue::Undefined,
            steps: vec!["División por cero".to_string()],
        };
    }
    let num = a.num * b.den;
    let den = a.den * b.num;
    let mut steps = vec![
        format!("Invertir divisor: {}/{} → {}/{}", b.num, b.den, b.den, b.num),
        "Multiplicar por el inverso del divisor:".to_string(),
        format!("Numerador: {} × {} = {}", a.num, b.den, num),
        format!("Denominador: {} × {} = {}", a.den, paren(b.num), den),
    ];
    let reduced = reduce_with_step(num, den, &mut steps);
    Solution { result: rational(reduced), steps }
}

/// Addition and subtraction over the least common denominator.
fn combine_fractions(a: Fraction, b: Fraction, subtract: bool) -> Solution {
    let common = lcm(a.den, b.den);
    let na = a.num * (common / a.den);
    let nb = b.num * (common / b.den);
    let combined = if subtract { na - nb } else { na + nb };

    let mut steps = vec![
        format!("Mínimo común denominador: mcm({}, {}) = {}", a.den, b.den, common),
        format!("Convertir: {}/{} = {}/{}", a.num, a.den, na, common),
        format!("Convertir: {}/{} = {}/{}", b.num, b.den, nb, common),
    ];
    if subtract {
        steps.push(format!("Restar numeradores: {} - {} = {}", na, paren(nb), combined));
    } else {
        steps.push(format!("Sumar numeradores: {} + {} = {}", na, paren(nb), combined));
    }
    steps.push(format!("Fracción resultante: {}/{}", combined, common));

    let reduced = reduce_with_step(combined, common, &mut steps);
    Solution { result: rational(reduced), steps }
}

/// Simplify and push a step only when the pair actually changed.
fn reduce_with_step(num: i64, den: i64, steps: &mut Vec<String>) -> Fraction {
    let reduced = simplify(num, den);
    if reduced != Fraction::new(num, den) {
        steps.push(format!("Simplificar: {}", reduced));
    }
    reduced
}

fn rational(q: Fraction) -> SolvedValue {
    SolvedValue::Value { value: NumberValue::Rational(q) }
}
