use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::warn;

use crate::training_engine::{
    helpers::{arithmetic_question, pick},
    models::{
        DifficultyLevel, Fraction, NumberKind, NumberValue, Operation, PracticeModule,
        Problem, Question, QuestionRequest,
    },
    number::{generate_number, operand_range},
    sets,
};

/// Divisor re-draws before falling back to the unit value.
pub const MAX_DIVISOR_RETRIES: usize = 100;

/// Draw an operand pair for `operation` in domain `kind`.
///
/// - Division never gets a zero-valued divisor.
/// - Natural subtraction swaps operands when `b > a` so the result stays in N.
pub fn generate_operation<R: Rng>(
    rng: &mut R, operation: Operation, kind: NumberKind, difficulty: DifficultyLevel,
) -> Problem {
    let range = operand_range(kind, difficulty);
    let mut a = generate_number(rng, kind, range);
    let mut b = generate_number(rng, kind, range);

    if operation == Operation::Division {
        let mut retries = 0;
        while b.is_zero() {
            if retries == MAX_DIVISOR_RETRIES {
                warn!(?kind, ?difficulty, "divisor retries exhausted, using unit divisor");
                b = unit_like(b);
                break;
            }
            b = generate_number(rng, kind, range);
            retries += 1;
        }
    }

    if operation == Operation::Subtraction && kind == NumberKind::Natural {
        if let (NumberValue::Integer(x), NumberValue::Integer(y)) = (a, b) {
            if y > x {
                std::mem::swap(&mut a, &mut b);
            }
        }
    }

    Problem { a, b, kind, operation }
}

/// Smallest non-zero value of the same representation (`1` or `1/den`).
fn unit_like(v: NumberValue) -> NumberValue {
    match v {
        NumberValue::Integer(_)  => NumberValue::Integer(1),
        NumberValue::Rational(q) => NumberValue::Rational(Fraction::new(1, q.den.max(1))),
    }
}

/// Single entry point for one solved question.
pub fn generate_question(request: QuestionRequest) -> Question {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };

    match request.module {
        PracticeModule::Arithmetic(operation) => {
            let kind = match request.kind {
                Some(kind) => kind,
                None       => pick(&mut rng, &NumberKind::ALL),
            };
            arithmetic_question(&mut rng, operation, kind, request.difficulty, true)
        }
        PracticeModule::Sets => sets::practice_question(&mut rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_subtraction_never_goes_negative() {
        let mut rng = StdRng::seed_from_u64(21);
        for diff in DifficultyLevel::ALL {
            for _ in 0..300 {
                let p = generate_operation(&mut rng, Operation::Subtraction, NumberKind::Natural, diff);
                match (p.a, p.b) {
                    (NumberValue::Integer(a), NumberValue::Integer(b)) => assert!(a >= b),
                    other => panic!("natural problem with non-integer operands {other:?}"),
                }
            }
        }
    }

    #[test]
    fn divisors_are_never_zero() {
        let mut rng = StdRng::seed_from_u64(5);
        for kind in NumberKind::ALL {
            for _ in 0..1000 {
                let p = generate_operation(&mut rng, Operation::Division, kind, DifficultyLevel::Beginner);
                assert!(!p.b.is_zero(), "zero divisor for {kind:?}: {:?}", p.b);
            }
        }
    }

    #[test]
    fn operands_match_problem_kind() {
        let mut rng = StdRng::seed_from_u64(8);
        for op in Operation::ALL {
            let q = generate_operation(&mut rng, op, NumberKind::Rational, DifficultyLevel::Intermediate);
            assert!(matches!((q.a, q.b), (NumberValue::Rational(_), NumberValue::Rational(_))));
            let z = generate_operation(&mut rng, op, NumberKind::Integer, DifficultyLevel::Intermediate);
            assert!(matches!((z.a, z.b), (NumberValue::Integer(_), NumberValue::Integer(_))));
        }
    }

    #[test]
    fn unit_fallback_keeps_representation() {
        assert_eq!(unit_like(NumberValue::Integer(0)), NumberValue::Integer(1));
        assert_eq!(
            unit_like(NumberValue::Rational(Fraction::new(0, 7))),
            NumberValue::Rational(Fraction::new(1, 7))
        );
    }

    #[test]
    fn seeded_requests_are_reproducible() {
        let make = || generate_question(QuestionRequest {
            module: Operation::Multiplication.into(),
            kind: None,
            difficulty: DifficultyLevel::Intermediate,
            rng_seed: Some(99),
        });
        assert_eq!(make(), make());
    }
}
