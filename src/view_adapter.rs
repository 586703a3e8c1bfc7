use serde_json::{json, Value};

use crate::training_engine::{
    models::{AtomSet, NumberKind, Question, Scenario},
    number::format_markup,
    session::{ExamReport, ExamSession},
};

/// Set elements as a JSON array of numbers and strings.
fn set_elements(set: &AtomSet) -> Value {
    serde_json::to_value(set).unwrap_or_else(|_| Value::Array(Vec::new()))
}

fn scenario_block(scenario: Option<&Scenario>) -> Value {
    match scenario {
        Some(s) => json!({
            "description": s.description,
            "question": s.question,
            "tip": s.tip
        }),
        None => Value::Null,
    }
}

/// Prompt line shown above a set question.
fn set_prompt(title: &str) -> String {
    format!("Calcula {}", title)
}

/// Render a question for the client without leaking its answer or steps.
///
/// `index` is zero-based; the view shows it one-based.
pub fn question_view(question: &Question, index: usize, total: usize) -> Value {
    let body = match question {
        Question::Arithmetic { problem, scenario, .. } => {
            let input_hint = if problem.kind == NumberKind::Rational { "n/d" } else { "" };
            json!({
                "type": "arithmetic",
                "numberKind": problem.kind.symbol(),
                "domain": problem.kind.to_string(),
                "operation": problem.operation,
                "symbol": problem.operation.symbol(),
                "a": format_markup(problem.a),
                "b": format_markup(problem.b),
                "inputHint": input_hint,
                "scenario": scenario_block(scenario.as_ref())
            })
        }
        Question::Sets { problem, .. } => json!({
            "type": "sets",
            "operation": problem.operation,
            "prompt": set_prompt(problem.operation.title()),
            "category": problem.category.map(|c| c.to_string()),
            "setA": set_elements(&problem.set_a),
            "setB": set_elements(&problem.set_b),
            "setAText": problem.set_a.to_string(),
            "setBText": problem.set_b.to_string()
        }),
    };

    json!({
        "position": index + 1,
        "total": total,
        "question": body
    })
}

/// Navigation state for the exam sidebar: one dot per question.
pub fn exam_navigation_view(exam: &ExamSession) -> Value {
    let dots: Vec<Value> = (0..exam.len())
        .map(|i| json!({
            "position": i + 1,
            "answered": exam.is_answered(i),
            "current": i == exam.current_index()
        }))
        .collect();

    json!({
        "current": exam.current_index() + 1,
        "total": exam.len(),
        "answered": exam.answered_count(),
        "timeRemaining": exam.time_remaining(),
        "timed": exam.time_limit_seconds() > 0,
        "questions": dots
    })
}

/// Post-submit review: grade, band, and every answer next to the correct one.
pub fn exam_review_view(report: &ExamReport) -> Value {
    let items: Vec<Value> = report
        .items
        .iter()
        .map(|item| json!({
            "position": item.index + 1,
            "userAnswer": item.user_answer.as_deref().unwrap_or("-"),
            "isCorrect": item.is_correct,
            "correctAnswer": item.correct_answer
        }))
        .collect();

    json!({
        "correct": report.correct_count,
        "total": report.total_questions,
        "grade": format!("{:.1}", report.grade),
        "band": report.band.to_string(),
        "autoSubmitted": report.auto_submitted,
        "items": items
    })
}
