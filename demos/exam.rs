//! A timed exam driven end to end: answer some questions, let the clock run
//! out, then print the review and the history entry a backend would store.
//!
//! Run with: `cargo run --example exam`

use math_drill_gen::{
    training_engine::{DifficultySetting, HistoryEntry, ProgressSink},
    view_adapter::{exam_navigation_view, exam_review_view, question_view},
    DifficultyLevel, EngineConfig, Operation, SessionController,
};
use tracing_subscriber::EnvFilter;

/// Keeps the history only, the way a thin persistence client would.
#[derive(Default)]
struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl ProgressSink for HistoryLog {
    fn add_progress(&mut self, stars: u32, exercises: u32) {
        tracing::info!(stars, exercises, "progress");
    }

    fn award_trophy(&mut self) {
        tracing::info!("trophy");
    }

    fn record_history(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = EngineConfig::default();
    config.exam.question_count = 5;
    config.exam.time_limit_minutes = 1;
    config.exam.difficulty = DifficultySetting::Fixed(DifficultyLevel::Intermediate);

    let mut controller = SessionController::new(Operation::Division, config, HistoryLog::default(), Some(42))?;

    let exam = controller.start_exam()?;
    let total = exam.len();
    let answers: Vec<String> = exam.questions().iter().map(|q| q.correct_answer_display()).collect();
    for (i, q) in exam.questions().iter().enumerate() {
        println!("{}", serde_json::to_string(&question_view(q, i, total))?);
    }

    // First two right, the third wrong, the rest left blank.
    controller.save_exam_answer(0, &answers[0])?;
    controller.next_question()?;
    controller.save_exam_answer(1, &answers[1])?;
    controller.next_question()?;
    controller.save_exam_answer(2, "0")?;

    if let Some(exam) = controller.exam() {
        println!("{}", serde_json::to_string_pretty(&exam_navigation_view(exam))?);
    }

    let mut report = None;
    while report.is_none() {
        report = controller.tick_exam(15)?;
    }
    if let Some(report) = report {
        println!("{}", serde_json::to_string_pretty(&exam_review_view(&report))?);
    }

    println!("attempts left: {}", controller.exam_attempts_remaining());
    for entry in &controller.progress().entries {
        println!("{}", serde_json::to_string_pretty(entry)?);
    }
    Ok(())
}
