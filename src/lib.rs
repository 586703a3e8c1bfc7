//! # math_drill_gen
//!
//! An offline, deterministic arithmetic and set-theory drill engine.
//!
//! The library generates problems over the natural numbers (N), the integers
//! (Z) and the rationals (Q) for the four basic operations, plus two-set
//! exercises (union, intersection and both differences). Every problem comes
//! with its exact answer and a Spanish step-by-step explanation, and free-text
//! learner answers are graded against it.
//!
//! ## How it works
//!
//! 1. Build a [`QuestionRequest`] with a module, optional number domain,
//!    difficulty and optional RNG seed.
//! 2. Call [`generate_question`]: the engine draws operands inside the
//!    difficulty range (never a zero divisor, never a negative natural
//!    difference), solves the problem, and for practice attaches a word
//!    problem when a template fits.
//! 3. For timed tests and practice runs, drive a [`SessionController`]; it
//!    grades answers, computes 0–5 grades, caps exam attempts, and reports
//!    history and rewards through a [`ProgressSink`].
//!
//! ## Quick start
//!
//! ```rust
//! use math_drill_gen::{
//!     generate_question, is_correct, GradingConfig, NumberKind, Operation, QuestionRequest,
//! };
//!
//! let mut request = QuestionRequest::new(Operation::Division);
//! request.kind = Some(NumberKind::Integer);
//! request.rng_seed = Some(42);
//!
//! let question = generate_question(request);
//! for step in question.steps() {
//!     println!("  {step}");
//! }
//! let answer = question.correct_answer_display();
//! assert!(is_correct(&question, &answer, &GradingConfig::default()));
//! ```

pub mod training_engine;
pub mod view_adapter;

// Convenience re-exports so callers can use `math_drill_gen::generate_question`
// directly without reaching into `training_engine::`.
pub use training_engine::{
    generate_question, generate_worksheet, is_correct, solve, AtomSet, DifficultyLevel,
    EngineConfig, ExamReport, Fraction, GradingConfig, HistoryEntry, NumberKind, NumberValue,
    Operation, PracticeModule, Problem, ProfileProgress, ProgressSink, Question,
    QuestionRequest, SessionController, SessionError, SetOperation, Solution, SolvedValue,
    WorksheetRequest,
};

#[cfg(test)]
mod tests;
