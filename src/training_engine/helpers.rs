//! Shared helpers used across generators, the solver and sessions.
//!
//! Step text, session drawing and worksheet items all need the same small
//! pieces: signed-number formatting, uniform picks from fixed pools, and the
//! generate → solve → decorate pipeline that turns a request into a
//! [`Question`].
//!
//! ## RNG ordering
//!
//! `arithmetic_question()` draws the problem first, then the scenario. Seeded
//! tests rely on that order; changing it changes every seeded question.

use rand::Rng;
use crate::training_engine::{
    generator::generate_operation,
    models::*,
    scenarios::build_scenario,
    solver::solve,
};

/// Wrap negative integers in parentheses (e.g. `"(-3)"`).
pub fn paren(n: i64) -> String {
    if n < 0 {
        format!("({})", n)
    } else {
        n.to_string()
    }
}

/// `"+"` for non-negative values, `"-"` otherwise.
pub fn sign_char(n: i64) -> &'static str {
    if n >= 0 { "+" } else { "-" }
}

/// Uniform pick from a non-empty fixed pool.
pub fn pick<R: Rng, T: Copy>(rng: &mut R, pool: &[T]) -> T {
    pool[rng.gen_range(0..pool.len())]
}

/// Generate, solve and optionally decorate one arithmetic question.
pub fn arithmetic_question<R: Rng>(
    rng: &mut R, operation: Operation, kind: NumberKind, difficulty: DifficultyLevel,
    with_scenario: bool,
) -> Question {
    let problem = generate_operation(rng, operation, kind, difficulty);
    let solution = solve(&problem);
    let scenario = if with_scenario {
        build_scenario(rng, &problem, &solution)
    } else {
        None
    };
    Question::Arithmetic { problem, solution, scenario }
}
