//! Practice and exam state machines.
//!
//! ```text
//! Idle ──start──▶ InProgress ──last answer / submit / timeout──▶ Reporting
//!   ▲                                                               │
//!   └───────────────────────────── restart ─────────────────────────┘
//! ```
//!
//! The controller owns both sessions, the random source, and the progress
//! collaborator. Exam attempts are counted on the controller so they outlive
//! individual sessions.

pub mod exam;
pub mod practice;

use std::fmt;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::training_engine::{
    config::{DifficultySetting, EngineConfig},
    error::SessionError,
    helpers::{arithmetic_question, pick},
    models::{DifficultyLevel, NumberKind, PracticeModule, Question},
    progress::{HistoryEntry, HistoryKind, ProgressSink},
    sets,
};

pub use exam::{ExamReport, ExamSession, ReviewItem};
pub use practice::{PracticeFeedback, PracticeResult, PracticeSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    InProgress,
    Reporting,
}

/// Presentation band for a 0–5 grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeBand {
    Fail,
    PassGood,
    PassExcellent,
}

impl GradeBand {
    pub fn from_grade(grade: f64) -> Self {
        if grade < 3.5 {
            GradeBand::Fail
        } else if grade < 4.5 {
            GradeBand::PassGood
        } else {
            GradeBand::PassExcellent
        }
    }
}

impl fmt::Display for GradeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeBand::Fail          => write!(f, "Reprobado"),
            GradeBand::PassGood      => write!(f, "Aprobado (Bueno)"),
            GradeBand::PassExcellent => write!(f, "Aprobado (Excelente)"),
        }
    }
}

/// `correct / total * 5`; an empty session grades 0.
pub fn compute_grade(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    correct as f64 / total as f64 * 5.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub correct_count: usize,
    pub total_questions: usize,
    pub grade: f64,
    pub band: GradeBand,
}

impl SessionReport {
    pub fn new(correct_count: usize, total_questions: usize) -> Self {
        let grade = compute_grade(correct_count, total_questions);
        SessionReport { correct_count, total_questions, grade, band: GradeBand::from_grade(grade) }
    }

    pub fn is_perfect(&self) -> bool {
        self.total_questions > 0 && self.correct_count == self.total_questions
    }
}

/// Owns practice and exam state for one learner context.
pub struct SessionController<P: ProgressSink, R: Rng = StdRng> {
    module: PracticeModule,
    config: EngineConfig,
    rng: R,
    progress: P,
    practice: Option<PracticeSession>,
    exam: Option<ExamSession>,
    exam_attempts: u32,
}

impl<P: ProgressSink> SessionController<P, StdRng> {
    /// Seeded when `rng_seed` is `Some`, entropy otherwise.
    pub fn new(
        module: impl Into<PracticeModule>, config: EngineConfig, progress: P, rng_seed: Option<u64>,
    ) -> Result<Self, SessionError> {
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        SessionController::with_rng(module, config, progress, rng)
    }
}

impl<P: ProgressSink, R: Rng> SessionController<P, R> {
    pub fn with_rng(
        module: impl Into<PracticeModule>, config: EngineConfig, progress: P, rng: R,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(SessionController {
            module: module.into(),
            config,
            rng,
            progress,
            practice: None,
            exam: None,
            exam_attempts: 0,
        })
    }

    pub fn module(&self) -> PracticeModule {
        self.module
    }

    /// Switch module. Running sessions are discarded; exam attempts are kept.
    pub fn set_module(&mut self, module: impl Into<PracticeModule>) {
        self.module = module.into();
        self.practice = None;
        if self.exam.as_ref().is_some_and(|e| !e.is_submitted()) {
            debug!("abandoning unsubmitted exam on module switch");
        }
        self.exam = None;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn progress(&self) -> &P {
        &self.progress
    }

    pub fn into_progress(self) -> P {
        self.progress
    }

    fn draw_arithmetic_kind(&mut self) -> NumberKind {
        pick(&mut self.rng, &NumberKind::ALL)
    }

    // -----------------------------------------------------------------------
    // Practice
    // -----------------------------------------------------------------------

    pub fn practice(&self) -> Option<&PracticeSession> {
        self.practice.as_ref()
    }

    pub fn practice_state(&self) -> SessionState {
        match &self.practice {
            None    => SessionState::Idle,
            Some(p) => p.state(),
        }
    }

    fn draw_practice_question(&mut self) -> Question {
        match self.module {
            PracticeModule::Arithmetic(operation) => {
                let kind = self.draw_arithmetic_kind();
                let top = self.config.practice.max_difficulty.level();
                let level = self.rng.gen_range(1..=top);
                let difficulty = DifficultyLevel::from_level(level).unwrap_or(DifficultyLevel::Beginner);
                arithmetic_question(&mut self.rng, operation, kind, difficulty, true)
            }
            PracticeModule::Sets => sets::practice_question(&mut self.rng),
        }
    }

    /// Start (or restart) a practice session and return its first question.
    pub fn start_practice(&mut self) -> &Question {
        let first = self.draw_practice_question();
        let total = self.config.practice.total_questions;
        info!(module = self.module.name(), total, "practice started");
        let session = self.practice.insert(PracticeSession::new(total, first));
        &session.questions()[0]
    }

    /// Drop the practice session and return to idle.
    pub fn reset_practice(&mut self) {
        self.practice = None;
    }

    /// Grade one answer, advance, and report when the session completes.
    pub fn answer_practice(&mut self, input: &str) -> Result<PracticeFeedback, SessionError> {
        let grading = self.config.grading.clone();
        let session = match self.practice.as_mut() {
            Some(s) if !s.is_finished() => s,
            _ => return Err(SessionError::NoPracticeSession),
        };
        let (is_correct, correct_answer) = match session.record(input, &grading) {
            Some(r) => (r.is_correct, r.correct_answer.clone()),
            None    => return Err(SessionError::NoPracticeSession),
        };
        let finished = session.is_finished();

        if is_correct {
            self.progress.add_progress(0, 1);
        }

        let report = if finished {
            Some(self.finish_practice())
        } else {
            let next = self.draw_practice_question();
            if let Some(session) = self.practice.as_mut() {
                session.push_question(next);
            }
            None
        };

        Ok(PracticeFeedback { is_correct, correct_answer, report })
    }

    fn finish_practice(&mut self) -> SessionReport {
        let report = match &self.practice {
            Some(p) => p.report(),
            None    => SessionReport::new(0, 0),
        };
        info!(
            module = self.module.name(),
            correct = report.correct_count,
            grade = report.grade,
            "practice finished"
        );

        if report.is_perfect() {
            self.progress.award_trophy();
        }

        let mut entry = HistoryEntry::new(HistoryKind::Practice, self.module.name());
        entry.score = report.correct_count as f64;
        entry.total_questions = Some(report.total_questions as f64);
        entry.grade = Some(report.grade);
        self.progress.record_history(entry);
        report
    }

    // -----------------------------------------------------------------------
    // Exam
    // -----------------------------------------------------------------------

    pub fn exam(&self) -> Option<&ExamSession> {
        self.exam.as_ref()
    }

    fn exam_mut(&mut self) -> Result<&mut ExamSession, SessionError> {
        self.exam.as_mut().ok_or(SessionError::NoExamSession)
    }

    pub fn exam_attempts_used(&self) -> u32 {
        self.exam_attempts
    }

    pub fn exam_attempts_remaining(&self) -> u32 {
        self.config.exam.max_attempts.saturating_sub(self.exam_attempts)
    }

    /// Restore a persisted attempt count, capped at the maximum.
    pub fn set_exam_attempts_used(&mut self, used: u32) {
        self.exam_attempts = used.min(self.config.exam.max_attempts);
    }

    pub fn exam_state(&self) -> SessionState {
        match &self.exam {
            None => SessionState::Idle,
            Some(e) if e.is_submitted() => SessionState::Reporting,
            Some(_) => SessionState::InProgress,
        }
    }

    fn draw_exam_question(&mut self) -> Question {
        match self.module {
            PracticeModule::Arithmetic(operation) => {
                let kind = self.draw_arithmetic_kind();
                let difficulty = match self.config.exam.difficulty {
                    DifficultySetting::Fixed(level) => level,
                    DifficultySetting::Mixed        => pick(&mut self.rng, &DifficultyLevel::ALL),
                };
                arithmetic_question(&mut self.rng, operation, kind, difficulty, false)
            }
            PracticeModule::Sets => sets::exam_question(&mut self.rng),
        }
    }

    /// Generate every question up front and start the clock.
    ///
    /// Refused once all attempts are used. An unsubmitted exam is discarded
    /// without consuming an attempt.
    pub fn start_exam(&mut self) -> Result<&ExamSession, SessionError> {
        let max = self.config.exam.max_attempts;
        if self.exam_attempts >= max {
            warn!(used = self.exam_attempts, max, "exam refused, attempts exhausted");
            return Err(SessionError::AttemptsExhausted { used: self.exam_attempts, max });
        }
        if self.exam.as_ref().is_some_and(|e| !e.is_submitted()) {
            debug!("discarding unsubmitted exam");
        }

        let count = self.config.exam.question_count;
        let questions: Vec<Question> = (0..count).map(|_| self.draw_exam_question()).collect();
        let limit = self.config.exam.time_limit_seconds();
        info!(module = self.module.name(), count, time_limit_seconds = limit, "exam started");
        Ok(&*self.exam.insert(ExamSession::new(questions, limit)))
    }

    /// Drop the exam without grading it.
    pub fn abandon_exam(&mut self) {
        if self.exam.take().is_some_and(|e| !e.is_submitted()) {
            debug!("exam abandoned before submission");
        }
    }

    pub fn save_exam_answer(&mut self, index: usize, value: &str) -> Result<(), SessionError> {
        self.exam_mut()?.save_answer(index, value)
    }

    pub fn next_question(&mut self) -> Result<bool, SessionError> {
        self.exam_mut()?.next()
    }

    pub fn previous_question(&mut self) -> Result<bool, SessionError> {
        self.exam_mut()?.previous()
    }

    pub fn jump_to_question(&mut self, index: usize) -> Result<(), SessionError> {
        self.exam_mut()?.jump_to(index)
    }

    /// Advance the exam clock. Returns the report when this tick ran the clock out.
    pub fn tick_exam(&mut self, elapsed_seconds: u32) -> Result<Option<ExamReport>, SessionError> {
        if !self.exam_mut()?.tick(elapsed_seconds) {
            return Ok(None);
        }
        info!("exam time is up, submitting");
        self.finish_exam(true).map(Some)
    }

    /// Submit and grade. Submitting twice returns the first report unchanged.
    pub fn submit_exam(&mut self) -> Result<ExamReport, SessionError> {
        self.finish_exam(false)
    }

    fn finish_exam(&mut self, auto_submitted: bool) -> Result<ExamReport, SessionError> {
        let grading = self.config.grading.clone();
        let session = self.exam_mut()?;
        if let Some(report) = session.report() {
            debug!("exam already submitted, returning stored report");
            return Ok(report.clone());
        }
        let report = session.finalize(&grading, auto_submitted);

        self.exam_attempts = (self.exam_attempts + 1).min(self.config.exam.max_attempts);
        info!(
            module = self.module.name(),
            correct = report.correct_count,
            grade = report.grade,
            auto_submitted,
            attempts = self.exam_attempts,
            "exam submitted"
        );

        self.progress.add_progress(0, report.correct_count as u32);
        if report.is_perfect() {
            self.progress.add_progress(1, 0);
        }

        let mut entry = HistoryEntry::new(HistoryKind::Exam, self.module.name());
        entry.score = report.correct_count as f64;
        entry.total_questions = Some(report.total_questions as f64);
        entry.grade = Some(report.grade);
        entry.meta.insert("timeLimit".to_string(), json!(self.config.exam.time_limit_minutes));
        entry.meta.insert("submittedAt".to_string(), json!(chrono::Utc::now().to_rfc3339()));
        entry.meta.insert("autoSubmitted".to_string(), json!(auto_submitted));
        self.progress.record_history(entry);

        Ok(report)
    }
}
