use serde::{Deserialize, Serialize};

use crate::training_engine::{
    config::GradingConfig,
    error::SessionError,
    grading::is_correct,
    models::Question,
    session::{GradeBand, SessionReport},
};

/// Review line for one exam question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub index: usize,
    pub user_answer: Option<String>,
    pub is_correct: bool,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamReport {
    pub correct_count: usize,
    pub total_questions: usize,
    pub grade: f64,
    pub band: GradeBand,
    pub auto_submitted: bool,
    pub items: Vec<ReviewItem>,
}

impl ExamReport {
    pub fn is_perfect(&self) -> bool {
        self.correct_count == self.total_questions
    }
}

/// A pre-generated exam with free navigation and batch grading on submit.
///
/// Once submitted the session is read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSession {
    questions: Vec<Question>,
    answers: Vec<Option<String>>,
    time_limit_seconds: u32,
    time_remaining: u32,
    current_index: usize,
    is_active: bool,
    is_submitted: bool,
    report: Option<ExamReport>,
}

impl ExamSession {
    pub(crate) fn new(questions: Vec<Question>, time_limit_seconds: u32) -> Self {
        let answers = vec![None; questions.len()];
        ExamSession {
            questions,
            answers,
            time_limit_seconds,
            time_remaining: time_limit_seconds,
            current_index: 0,
            is_active: true,
            is_submitted: false,
            report: None,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<String>] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// 0 when unlimited.
    pub fn time_limit_seconds(&self) -> u32 {
        self.time_limit_seconds
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_submitted(&self) -> bool {
        self.is_submitted
    }

    pub fn report(&self) -> Option<&ExamReport> {
        self.report.as_ref()
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.answers.get(index).is_some_and(Option::is_some)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    fn check_index(&self, index: usize) -> Result<(), SessionError> {
        if index >= self.questions.len() {
            return Err(SessionError::QuestionOutOfRange { index, len: self.questions.len() });
        }
        Ok(())
    }

    fn check_open(&self) -> Result<(), SessionError> {
        if self.is_submitted {
            return Err(SessionError::ExamSubmitted);
        }
        Ok(())
    }

    /// Store an answer; blank input clears it back to unanswered.
    pub(crate) fn save_answer(&mut self, index: usize, value: &str) -> Result<(), SessionError> {
        self.check_open()?;
        self.check_index(index)?;
        let trimmed = value.trim();
        self.answers[index] = if trimmed.is_empty() { None } else { Some(trimmed.to_string()) };
        Ok(())
    }

    /// Move forward; `false` when already on the last question.
    pub(crate) fn next(&mut self) -> Result<bool, SessionError> {
        self.check_open()?;
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Move back; `false` when already on the first question.
    pub(crate) fn previous(&mut self) -> Result<bool, SessionError> {
        self.check_open()?;
        if self.current_index > 0 {
            self.current_index -= 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn jump_to(&mut self, index: usize) -> Result<(), SessionError> {
        self.check_open()?;
        self.check_index(index)?;
        self.current_index = index;
        Ok(())
    }

    /// Count down; returns `true` exactly when the clock reaches zero on this tick.
    pub(crate) fn tick(&mut self, elapsed_seconds: u32) -> bool {
        if !self.is_active || self.time_limit_seconds == 0 || self.time_remaining == 0 {
            return false;
        }
        self.time_remaining = self.time_remaining.saturating_sub(elapsed_seconds);
        self.time_remaining == 0
    }

    /// Grade every stored answer and close the session. Callers guard against a second call.
    pub(crate) fn finalize(&mut self, grading: &GradingConfig, auto_submitted: bool) -> ExamReport {
        let items: Vec<ReviewItem> = self
            .questions
            .iter()
            .zip(&self.answers)
            .enumerate()
            .map(|(index, (question, answer))| ReviewItem {
                index,
                user_answer: answer.clone(),
                is_correct: answer.as_deref().is_some_and(|a| is_correct(question, a, grading)),
                correct_answer: question.correct_answer_display(),
            })
            .collect();

        let summary = SessionReport::new(
            items.iter().filter(|i| i.is_correct).count(),
            self.questions.len(),
        );
        let report = ExamReport {
            correct_count: summary.correct_count,
            total_questions: summary.total_questions,
            grade: summary.grade,
            band: summary.band,
            auto_submitted,
            items,
        };

        self.is_active = false;
        self.is_submitted = true;
        self.report = Some(report.clone());
        report
    }
}
