//! Progress collaborator: history entries, rewards and the learner profile.
//!
//! `HistoryEntry` is the persisted wire shape; its camelCase field names must
//! not change. Sessions report through the [`ProgressSink`] trait so storage
//! stays outside the engine; [`ProfileProgress`] is the in-memory profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Newest-first history is truncated to this many entries.
pub const HISTORY_LIMIT: usize = 50;
/// Stars needed per level.
pub const STARS_PER_LEVEL: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    Exam,
    Game,
    Practice,
    Custom,
}

fn default_module() -> String {
    "general".to_string()
}

/// One completed session, as stored in the learner's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Client-generated idempotency key.
    #[serde(default)]
    pub client_id: String,
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    #[serde(default = "default_module")]
    pub module: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_questions: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<f64>,
    #[serde(default)]
    pub meta: Map<String, Value>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// New entry with a fresh client id and the current time.
    pub fn new(kind: HistoryKind, module: impl Into<String>) -> Self {
        HistoryEntry {
            client_id: Uuid::new_v4().to_string(),
            kind,
            module: module.into(),
            score: 0.0,
            total_questions: None,
            grade: None,
            meta: Map::new(),
            created_at: Utc::now(),
        }
    }
}

/// Receives everything a finished session hands to the outside world.
pub trait ProgressSink {
    fn add_progress(&mut self, stars: u32, exercises: u32);
    fn award_trophy(&mut self);
    fn record_history(&mut self, entry: HistoryEntry);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Beginner,
    Genius,
    Master,
    Collector,
}

impl Badge {
    pub const ALL: [Badge; 4] = [Badge::Beginner, Badge::Genius, Badge::Master, Badge::Collector];

    pub fn name(self) -> &'static str {
        match self {
            Badge::Beginner  => "Principiante",
            Badge::Genius    => "Genio",
            Badge::Master    => "Maestro",
            Badge::Collector => "Coleccionista",
        }
    }

    fn earned(self, p: &ProfileProgress) -> bool {
        match self {
            Badge::Beginner  => p.exercises_completed >= 10,
            Badge::Genius    => p.stars >= 50,
            Badge::Master    => p.level >= 5,
            Badge::Collector => p.trophies >= 5,
        }
    }
}

/// In-memory learner profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileProgress {
    pub level: u32,
    pub stars: u32,
    pub trophies: u32,
    pub exercises_completed: u32,
    /// Newest first.
    pub history: Vec<HistoryEntry>,
}

impl Default for ProfileProgress {
    fn default() -> Self {
        ProfileProgress {
            level: 1,
            stars: 0,
            trophies: 0,
            exercises_completed: 0,
            history: Vec::new(),
        }
    }
}

impl ProfileProgress {
    pub fn badges(&self) -> Vec<Badge> {
        Badge::ALL.into_iter().filter(|b| b.earned(self)).collect()
    }
}

impl ProgressSink for ProfileProgress {
    fn add_progress(&mut self, stars: u32, exercises: u32) {
        self.stars += stars;
        self.exercises_completed += exercises;
        let level = self.stars / STARS_PER_LEVEL + 1;
        if level > self.level {
            tracing::info!(level, "level up");
            self.level = level;
        }
    }

    fn award_trophy(&mut self) {
        self.trophies += 1;
    }

    fn record_history(&mut self, entry: HistoryEntry) {
        self.history.insert(0, entry);
        self.history.truncate(HISTORY_LIMIT);
    }
}
