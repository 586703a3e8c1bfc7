//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::training_engine::{error::SessionError, models::DifficultyLevel};

/// Top-level engine configuration. Every field has a default, so `{}` is valid JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub practice: PracticeConfig,
    #[serde(default)]
    pub exam: ExamConfig,
    #[serde(default)]
    pub grading: GradingConfig,
}

impl EngineConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self, SessionError> {
        let config: EngineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        self.practice.validate()?;
        self.exam.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeConfig {
    #[serde(default = "default_practice_questions")]
    pub total_questions: usize,
    /// Difficulty is drawn uniformly from Beginner up to this level.
    #[serde(default = "default_practice_difficulty")]
    pub max_difficulty: DifficultyLevel,
}

fn default_practice_questions() -> usize {
    5
}

fn default_practice_difficulty() -> DifficultyLevel {
    DifficultyLevel::Intermediate
}

impl Default for PracticeConfig {
    fn default() -> Self {
        PracticeConfig {
            total_questions: default_practice_questions(),
            max_difficulty: default_practice_difficulty(),
        }
    }
}

impl PracticeConfig {
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.total_questions == 0 {
            return Err(SessionError::InvalidConfig(
                "practice.total_questions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Exam difficulty: one fixed level for every question, or a fresh draw per question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultySetting {
    Fixed(DifficultyLevel),
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamConfig {
    #[serde(default = "default_exam_questions")]
    pub question_count: usize,
    /// Minutes; 0 means unlimited.
    #[serde(default)]
    pub time_limit_minutes: u32,
    #[serde(default = "default_exam_difficulty")]
    pub difficulty: DifficultySetting,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_exam_questions() -> usize {
    10
}

fn default_exam_difficulty() -> DifficultySetting {
    DifficultySetting::Mixed
}

fn default_max_attempts() -> u32 {
    2
}

impl Default for ExamConfig {
    fn default() -> Self {
        ExamConfig {
            question_count: default_exam_questions(),
            time_limit_minutes: 0,
            difficulty: default_exam_difficulty(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl ExamConfig {
    pub fn time_limit_seconds(&self) -> u32 {
        self.time_limit_minutes.saturating_mul(60)
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        if self.question_count == 0 {
            return Err(SessionError::InvalidConfig(
                "exam.question_count must be at least 1".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(SessionError::InvalidConfig(
                "exam.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Accept `"4/2"` or `"2"` for a canonical `"2/1"`. Off means exact reduced form only.
    #[serde(default)]
    pub accept_equivalent_fractions: bool,
}
