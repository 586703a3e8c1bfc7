//! Core engine: problem generation, solving, grading and session state.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: numbers, problems, solutions, sets, questions |
//! | `number`     | gcd/lcm, fraction simplification, operand ranges and formatting |
//! | `solver`     | Exact results and Spanish step-by-step explanations |
//! | `generator`  | Operand drawing and the single-question entry `generate_question()` |
//! | `helpers`    | Shared builders used by generator, sessions and worksheets |
//! | `sets`       | Random sets, set operations and intersection overviews |
//! | `scenarios`  | Word-problem templates per operation |
//! | `grading`    | Free-text answer checking |
//! | `session`    | Practice and exam state machines behind `SessionController` |
//! | `progress`   | History entries, rewards and the `ProgressSink` seam |
//! | `worksheet`  | Printable worksheets with answer keys |
//! | `config`     | Serde-backed engine configuration |
//! | `error`      | `SessionError` |

pub mod config;
pub mod error;
pub mod generator;
pub mod grading;
pub mod helpers;
pub mod models;
pub mod number;
pub mod progress;
pub mod scenarios;
pub mod session;
pub mod sets;
pub mod solver;
pub mod worksheet;

// Re-export the public API surface so callers can use
// `training_engine::generate_question` without reaching into sub-modules.
pub use config::{DifficultySetting, EngineConfig, ExamConfig, GradingConfig, PracticeConfig};
pub use error::SessionError;
pub use generator::{generate_operation, generate_question};
pub use grading::is_correct;
pub use models::{
    AtomSet, Category, DifficultyLevel, Fraction, NumberKind, NumberValue, Operation,
    PracticeModule, Problem, Question, QuestionRequest, Scenario, SetAtom, SetKind,
    SetOperation, SetProblem, SetSolution, Solution, SolvedValue,
};
pub use progress::{HistoryEntry, HistoryKind, ProfileProgress, ProgressSink};
pub use session::{
    ExamReport, ExamSession, GradeBand, PracticeFeedback, PracticeSession, SessionController,
    SessionReport, SessionState,
};
pub use sets::{generate_random_set, generate_set, intersection_overview, solve_set_operation};
pub use solver::solve;
pub use worksheet::{generate_worksheet, Worksheet, WorksheetItem, WorksheetRequest};
