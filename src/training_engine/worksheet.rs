//! Printable worksheets with an answer key.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::training_engine::{
    helpers::pick,
    models::{
        AtomSet, Category, DifficultyLevel, NumberKind, Operation, PracticeModule, Problem,
        SetKind, SetOperation, Solution,
    },
    generator::generate_operation,
    sets::{generate_random_set, solve_set_operation},
    solver::solve,
};

/// Arithmetic items per worksheet.
pub const ARITHMETIC_ITEMS: usize = 10;
/// Set items per worksheet.
pub const SET_ITEMS: usize = 5;
/// Elements per worksheet set.
pub const SET_SIZE: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorksheetRequest {
    pub module: PracticeModule,
    /// Arithmetic domain; `None` draws one per item.
    pub kind: Option<NumberKind>,
    pub difficulty: DifficultyLevel,
    /// Set element kind; `None` or `Mixed` draws numbers, letters or words per item.
    pub set_kind: Option<SetKind>,
    /// 2 or 3; anything else is clamped.
    pub set_count: usize,
}

impl WorksheetRequest {
    pub fn new(module: impl Into<PracticeModule>) -> Self {
        WorksheetRequest {
            module: module.into(),
            kind: None,
            difficulty: DifficultyLevel::Beginner,
            set_kind: None,
            set_count: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetWorksheetItem {
    /// Labelled sets, e.g. `('A', {1, 2})`.
    pub sets: Vec<(char, AtomSet)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Expression to evaluate, e.g. `"A ∪ C"` or `"(A ∩ B) ∪ C"`.
    pub expression: String,
    pub answer: AtomSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorksheetItem {
    Arithmetic { problem: Problem, solution: Solution },
    Sets(SetWorksheetItem),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
    pub module: PracticeModule,
    pub items: Vec<WorksheetItem>,
}

pub fn generate_worksheet<R: Rng>(rng: &mut R, request: &WorksheetRequest) -> Worksheet {
    let items = match request.module {
        PracticeModule::Arithmetic(operation) => (0..ARITHMETIC_ITEMS)
            .map(|_| arithmetic_item(rng, operation, request))
            .collect(),
        PracticeModule::Sets => (0..SET_ITEMS)
            .map(|_| WorksheetItem::Sets(set_item(rng, request)))
            .collect(),
    };
    Worksheet { module: request.module, items }
}

fn arithmetic_item<R: Rng>(rng: &mut R, operation: Operation, request: &WorksheetRequest) -> WorksheetItem {
    let kind = match request.kind {
        Some(kind) => kind,
        None       => pick(rng, &NumberKind::ALL),
    };
    let problem = generate_operation(rng, operation, kind, request.difficulty);
    let solution = solve(&problem);
    WorksheetItem::Arithmetic { problem, solution }
}

fn set_item<R: Rng>(rng: &mut R, request: &WorksheetRequest) -> SetWorksheetItem {
    let kind = match request.set_kind {
        Some(SetKind::Mixed) | None => pick(rng, &[SetKind::Numbers, SetKind::Letters, SetKind::Words]),
        Some(kind) => kind,
    };
    let category = if kind == SetKind::Words {
        Some(pick(rng, &Category::ALL))
    } else {
        None
    };

    let count = request.set_count.clamp(2, 3);
    let labels = ['A', 'B', 'C'];
    let sets: Vec<(char, AtomSet)> = labels[..count]
        .iter()
        .map(|&label| (label, generate_random_set(rng, kind, SET_SIZE, category)))
        .collect();
    let op = pick(rng, &SetOperation::ALL);

    let (expression, answer) = if count == 2 {
        (op.title().to_string(), solve_set_operation(&sets[0].1, &sets[1].1, op).result)
    } else {
        three_set_expression(rng, &sets, op)
    };

    SetWorksheetItem { sets, category, expression, answer }
}

/// `A op X` with `X` drawn from B/C, or 30% of the time `(A op B) op' C`
/// where `op'` is `∩` after a union and `∪` otherwise.
fn three_set_expression<R: Rng>(
    rng: &mut R, sets: &[(char, AtomSet)], op: SetOperation,
) -> (String, AtomSet) {
    // B - A reads as a difference anchored on A here.
    let op = if op == SetOperation::DifferenceBA { SetOperation::DifferenceAB } else { op };
    let a = &sets[0].1;

    if rng.gen_bool(0.3) {
        let inner = solve_set_operation(a, &sets[1].1, op).result;
        let outer = if op == SetOperation::Union { SetOperation::Intersection } else { SetOperation::Union };
        let answer = solve_set_operation(&inner, &sets[2].1, outer).result;
        (format!("(A {} B) {} C", op.symbol(), outer.symbol()), answer)
    } else {
        let (label, other) = if rng.gen_bool(0.5) {
            (sets[2].0, &sets[2].1)
        } else {
            (sets[1].0, &sets[1].1)
        };
        let answer = solve_set_operation(a, other, op).result;
        (format!("A {} {}", op.symbol(), label), answer)
    }
}
