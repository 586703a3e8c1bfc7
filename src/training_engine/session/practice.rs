use serde::{Deserialize, Serialize};

use crate::training_engine::{
    config::GradingConfig,
    grading::is_correct,
    models::Question,
    session::{SessionReport, SessionState},
};

/// One graded practice answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeResult {
    pub index: usize,
    pub user_answer: String,
    pub is_correct: bool,
    pub correct_answer: String,
}

/// What the learner sees right after answering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeFeedback {
    pub is_correct: bool,
    pub correct_answer: String,
    /// Present once the last question has been answered.
    pub report: Option<SessionReport>,
}

/// A practice run: questions are drawn one at a time and answered exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeSession {
    total_questions: usize,
    current_index: usize,
    questions: Vec<Question>,
    results: Vec<PracticeResult>,
}

impl PracticeSession {
    pub(crate) fn new(total_questions: usize, first: Question) -> Self {
        PracticeSession {
            total_questions,
            current_index: 0,
            questions: vec![first],
            results: Vec::with_capacity(total_questions),
        }
    }

    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn results(&self) -> &[PracticeResult] {
        &self.results
    }

    pub fn is_finished(&self) -> bool {
        self.current_index >= self.total_questions
    }

    pub fn state(&self) -> SessionState {
        if self.is_finished() {
            SessionState::Reporting
        } else {
            SessionState::InProgress
        }
    }

    /// The question awaiting an answer, `None` once finished.
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_finished() {
            None
        } else {
            self.questions.get(self.current_index)
        }
    }

    /// Grade `input` against the current question and advance.
    pub(crate) fn record(&mut self, input: &str, grading: &GradingConfig) -> Option<&PracticeResult> {
        let question = self.current_question()?;
        let result = PracticeResult {
            index: self.current_index,
            user_answer: input.trim().to_string(),
            is_correct: is_correct(question, input, grading),
            correct_answer: question.correct_answer_display(),
        };
        self.results.push(result);
        self.current_index += 1;
        self.results.last()
    }

    pub(crate) fn push_question(&mut self, question: Question) {
        self.questions.push(question);
    }

    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_correct).count()
    }

    pub fn report(&self) -> SessionReport {
        SessionReport::new(self.correct_count(), self.total_questions)
    }
}
