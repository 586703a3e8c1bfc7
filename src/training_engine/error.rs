//! Session error types.
//!
//! Arithmetic, set solving and grading are total and never produce these.
//! They only cover misuse of the session state machine, hand-built problems
//! that break operand invariants, and bad configuration.

use thiserror::Error;

use crate::training_engine::models::NumberKind;

/// Errors returned by the session controller and configuration loading.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Every allowed exam attempt has been used.
    #[error("exam attempts exhausted ({used}/{max})")]
    AttemptsExhausted { used: u32, max: u32 },

    /// No practice session is running.
    #[error("no practice session in progress")]
    NoPracticeSession,

    /// No exam has been started.
    #[error("no exam session")]
    NoExamSession,

    /// The exam was already submitted and is read-only.
    #[error("exam already submitted")]
    ExamSubmitted,

    /// A question index outside the session.
    #[error("question {index} out of range (session has {len})")]
    QuestionOutOfRange { index: usize, len: usize },

    /// An operand does not match the representation of its number kind.
    #[error("operand does not fit number kind {kind:?}")]
    KindMismatch { kind: NumberKind },

    /// A rational operand with a zero denominator.
    #[error("fraction operand has a zero denominator")]
    ZeroDenominator,

    /// An operand part outside `-max..=max`.
    #[error("operand {value} outside -{max}..={max}")]
    OperandOutOfRange { value: i64, max: i64 },

    /// A configuration value is outside its valid domain.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration JSON could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
