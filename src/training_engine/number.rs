use rand::Rng;
use crate::training_engine::models::{
    DifficultyLevel, Fraction, NumberKind, NumberValue, OperandRange, MAX_OPERAND,
};

/// Greatest common divisor of the magnitudes; `gcd(0, 0) == 0`.
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Least common multiple of two non-zero denominators, via `a*b / gcd(a, b)`.
pub fn lcm(a: i64, b: i64) -> i64 {
    let g = gcd(a, b);
    if g == 0 {
        return 0;
    }
    (a / g * b).abs()
}

/// Reduce `num/den` to lowest terms.
///
/// The denominator of the result is always positive and a zero numerator
/// reduces to `0/1`. A zero denominator is returned untouched; generators never
/// build one.
pub fn simplify(num: i64, den: i64) -> Fraction {
    if den == 0 {
        return Fraction::new(num, den);
    }
    let g = gcd(num, den);
    let (mut n, mut d) = (num / g, den / g);
    if d < 0 {
        n = -n;
        d = -d;
    }
    Fraction::new(n, d)
}

/// Operand range for a difficulty. Naturals are clamped to start at zero.
pub fn operand_range(kind: NumberKind, difficulty: DifficultyLevel) -> OperandRange {
    let bound = match difficulty {
        DifficultyLevel::Beginner     => 9,
        DifficultyLevel::Intermediate => 99,
        DifficultyLevel::Advanced     => MAX_OPERAND,
    };
    match kind {
        NumberKind::Natural => OperandRange { min: 0, max: bound },
        _                   => OperandRange { min: -bound, max: bound },
    }
}

/// Draw one value of `kind` from `range`.
///
/// Rationals get a denominator in `2..=10` and are returned unreduced so the
/// solver can show the simplification step.
pub fn generate_number<R: Rng>(rng: &mut R, kind: NumberKind, range: OperandRange) -> NumberValue {
    match kind {
        NumberKind::Natural => {
            let lo = range.min.max(0);
            let hi = range.max.max(1).max(lo);
            NumberValue::Integer(rng.gen_range(lo..=hi))
        }
        NumberKind::Integer => {
            let (lo, hi) = ordered(range);
            NumberValue::Integer(rng.gen_range(lo..=hi))
        }
        NumberKind::Rational => {
            let den = rng.gen_range(2..=10);
            let (lo, hi) = ordered(range);
            NumberValue::Rational(Fraction::new(rng.gen_range(lo..=hi), den))
        }
    }
}

fn ordered(range: OperandRange) -> (i64, i64) {
    if range.min <= range.max {
        (range.min, range.max)
    } else {
        (range.max, range.min)
    }
}

/// Operand text for problem statements: negative integers in parentheses, fractions as `n/d`.
pub fn format_operand(value: NumberValue) -> String {
    match value {
        NumberValue::Integer(n) if n < 0 => format!("({})", n),
        NumberValue::Integer(n)          => n.to_string(),
        NumberValue::Rational(q)         => q.to_string(),
    }
}

/// Display markup: fractions stack numerator over denominator.
pub fn format_markup(value: NumberValue) -> String {
    match value {
        NumberValue::Rational(q) => format!(
            "<span class=\"fraction\"><sup>{}</sup><sub>{}</sub></span>",
            q.num, q.den
        ),
        other => format_operand(other),
    }
}
