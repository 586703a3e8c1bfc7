use std::fmt;
use serde::{Deserialize, Serialize};

use crate::training_engine::error::SessionError;

// ---------------------------------------------------------------------------
// Number primitives
// ---------------------------------------------------------------------------

/// The three numeric domains a problem can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberKind {
    #[serde(rename = "N")]
    Natural,
    #[serde(rename = "Z")]
    Integer,
    #[serde(rename = "Q")]
    Rational,
}

impl NumberKind {
    pub const ALL: [NumberKind; 3] = [NumberKind::Natural, NumberKind::Integer, NumberKind::Rational];

    pub fn symbol(self) -> &'static str {
        match self {
            NumberKind::Natural  => "N",
            NumberKind::Integer  => "Z",
            NumberKind::Rational => "Q",
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NumberKind::Natural  => "Naturales",
            NumberKind::Integer  => "Enteros",
            NumberKind::Rational => "Racionales",
        };
        write!(f, "{}", s)
    }
}

/// A fraction `num/den`. Not necessarily reduced; see [`crate::training_engine::number::simplify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fraction {
    pub num: i64,
    pub den: i64,
}

impl Fraction {
    pub fn new(num: i64, den: i64) -> Self {
        Fraction { num, den }
    }

    pub fn is_zero(self) -> bool {
        self.num == 0
    }

    /// Floating-point ratio, `None` for a zero denominator.
    pub fn ratio(self) -> Option<f64> {
        if self.den == 0 {
            None
        } else {
            Some(self.num as f64 / self.den as f64)
        }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// A value in N, Z or Q. Naturals and integers share the `Integer` representation;
/// the owning [`Problem`] carries the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberValue {
    Integer(i64),
    Rational(Fraction),
}

impl NumberValue {
    /// The zero value a divisor must never take.
    pub fn is_zero(self) -> bool {
        match self {
            NumberValue::Integer(n)  => n == 0,
            NumberValue::Rational(q) => q.is_zero(),
        }
    }

    /// Numeric value used for scenario filtering only.
    pub fn as_f64(self) -> Option<f64> {
        match self {
            NumberValue::Integer(n)  => Some(n as f64),
            NumberValue::Rational(q) => q.ratio(),
        }
    }
}

impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberValue::Integer(n)  => write!(f, "{}", n),
            NumberValue::Rational(q) => write!(f, "{}", q),
        }
    }
}

// ---------------------------------------------------------------------------
// Problem metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Addition       => "+",
            Operation::Subtraction    => "-",
            Operation::Multiplication => "×",
            Operation::Division       => "÷",
        }
    }

    /// Module name used in history entries.
    pub fn module_name(self) -> &'static str {
        match self {
            Operation::Addition       => "addition",
            Operation::Subtraction    => "subtraction",
            Operation::Multiplication => "multiplication",
            Operation::Division       => "division",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Addition       => "Suma",
            Operation::Subtraction    => "Resta",
            Operation::Multiplication => "Multiplicación",
            Operation::Division       => "División",
        };
        write!(f, "{}", s)
    }
}

/// Controls operand magnitude: 1 → one digit, 2 → two digits, 3 → three digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 3] = [
        DifficultyLevel::Beginner,
        DifficultyLevel::Intermediate,
        DifficultyLevel::Advanced,
    ];

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(DifficultyLevel::Beginner),
            2 => Some(DifficultyLevel::Intermediate),
            3 => Some(DifficultyLevel::Advanced),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            DifficultyLevel::Beginner     => 1,
            DifficultyLevel::Intermediate => 2,
            DifficultyLevel::Advanced     => 3,
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyLevel::Beginner     => write!(f, "Nivel 1"),
            DifficultyLevel::Intermediate => write!(f, "Nivel 2"),
            DifficultyLevel::Advanced     => write!(f, "Nivel 3"),
        }
    }
}

/// Inclusive operand range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperandRange {
    pub min: i64,
    pub max: i64,
}

/// What a learner is practicing: one arithmetic operation or set operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeModule {
    Arithmetic(Operation),
    Sets,
}

impl PracticeModule {
    pub fn name(self) -> &'static str {
        match self {
            PracticeModule::Arithmetic(op) => op.module_name(),
            PracticeModule::Sets           => "sets",
        }
    }
}

impl From<Operation> for PracticeModule {
    fn from(op: Operation) -> Self {
        PracticeModule::Arithmetic(op)
    }
}

// ---------------------------------------------------------------------------
// Arithmetic problems and solutions
// ---------------------------------------------------------------------------

/// Largest operand magnitude (numerator or denominator) a problem may carry.
/// Matches the widest difficulty range.
pub const MAX_OPERAND: i64 = 999;

/// An arithmetic problem. Deserialization goes through [`Problem::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProblemFields")]
pub struct Problem {
    pub a: NumberValue,
    pub b: NumberValue,
    #[serde(rename = "type")]
    pub kind: NumberKind,
    pub operation: Operation,
}

#[derive(Deserialize)]
struct ProblemFields {
    a: NumberValue,
    b: NumberValue,
    #[serde(rename = "type")]
    kind: NumberKind,
    operation: Operation,
}

impl TryFrom<ProblemFields> for Problem {
    type Error = SessionError;

    fn try_from(f: ProblemFields) -> Result<Self, Self::Error> {
        Problem::new(f.a, f.b, f.kind, f.operation)
    }
}

impl Problem {
    /// Build a problem, rejecting operands that do not fit `kind`, zero
    /// denominators and magnitudes past [`MAX_OPERAND`].
    pub fn new(
        a: NumberValue, b: NumberValue, kind: NumberKind, operation: Operation,
    ) -> Result<Self, SessionError> {
        let problem = Problem { a, b, kind, operation };
        problem.validate()?;
        Ok(problem)
    }

    pub fn integers(a: i64, b: i64, kind: NumberKind, operation: Operation) -> Result<Self, SessionError> {
        Problem::new(NumberValue::Integer(a), NumberValue::Integer(b), kind, operation)
    }

    pub fn fractions(a: Fraction, b: Fraction, operation: Operation) -> Result<Self, SessionError> {
        Problem::new(NumberValue::Rational(a), NumberValue::Rational(b), NumberKind::Rational, operation)
    }

    /// Check the invariants `new` enforces. Fields are public, so a literal can skip them.
    pub fn validate(&self) -> Result<(), SessionError> {
        for v in [self.a, self.b] {
            let fits = match (self.kind, v) {
                (NumberKind::Rational, NumberValue::Rational(_)) => true,
                (NumberKind::Natural, NumberValue::Integer(n))   => n >= 0,
                (NumberKind::Integer, NumberValue::Integer(_))   => true,
                _ => false,
            };
            if !fits {
                return Err(SessionError::KindMismatch { kind: self.kind });
            }
            let parts = match v {
                NumberValue::Integer(n)  => [n, 1],
                NumberValue::Rational(q) => {
                    if q.den == 0 {
                        return Err(SessionError::ZeroDenominator);
                    }
                    [q.num, q.den]
                }
            };
            if let Some(&value) = parts.iter().find(|x| !(-MAX_OPERAND..=MAX_OPERAND).contains(*x)) {
                return Err(SessionError::OperandOutOfRange { value, max: MAX_OPERAND });
            }
        }
        Ok(())
    }
}

/// Canonical result of a solved arithmetic problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolvedValue {
    Value { value: NumberValue },
    /// Inexact integer division, shown as `"<quotient> R <remainder>"`.
    QuotientRemainder { quotient: i64, remainder: i64 },
    /// Rational division by a zero-valued fraction.
    Undefined,
}

impl SolvedValue {
    pub fn value(self) -> Option<NumberValue> {
        match self {
            SolvedValue::Value { value } => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for SolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolvedValue::Value { value } => write!(f, "{}", value),
            SolvedValue::QuotientRemainder { quotient, remainder } => {
                write!(f, "{} R {}", quotient, remainder)
            }
            SolvedValue::Undefined => write!(f, "Indefinido"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub result: SolvedValue,
    pub steps: Vec<String>,
}

/// Word-problem narrative attached to an arithmetic problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub description: String,
    pub question: String,
    pub tip: String,
}

// ---------------------------------------------------------------------------
// Sets
// ---------------------------------------------------------------------------

/// One set element. Numbers sort before symbols; numbers numerically, symbols lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SetAtom {
    Number(i64),
    Symbol(String),
}

impl fmt::Display for SetAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetAtom::Number(n) => write!(f, "{}", n),
            SetAtom::Symbol(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for SetAtom {
    fn from(n: i64) -> Self {
        SetAtom::Number(n)
    }
}

impl From<&str> for SetAtom {
    fn from(s: &str) -> Self {
        SetAtom::Symbol(s.to_string())
    }
}

/// A sorted, duplicate-free sequence of atoms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<SetAtom>")]
pub struct AtomSet(Vec<SetAtom>);

impl AtomSet {
    pub fn new() -> Self {
        AtomSet(Vec::new())
    }

    pub fn as_slice(&self) -> &[SetAtom] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, atom: &SetAtom) -> bool {
        self.0.binary_search(atom).is_ok()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SetAtom> {
        self.0.iter()
    }

    /// Insert keeping order; returns false when already present.
    pub fn insert(&mut self, atom: SetAtom) -> bool {
        match self.0.binary_search(&atom) {
            Ok(_) => false,
            Err(pos) => {
                self.0.insert(pos, atom);
                true
            }
        }
    }
}

impl From<Vec<SetAtom>> for AtomSet {
    fn from(mut atoms: Vec<SetAtom>) -> Self {
        atoms.sort();
        atoms.dedup();
        AtomSet(atoms)
    }
}

impl FromIterator<SetAtom> for AtomSet {
    fn from_iter<I: IntoIterator<Item = SetAtom>>(iter: I) -> Self {
        AtomSet::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl FromIterator<i64> for AtomSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        iter.into_iter().map(SetAtom::Number).collect()
    }
}

impl<'a> FromIterator<&'a str> for AtomSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(SetAtom::from).collect()
    }
}

impl<'a> IntoIterator for &'a AtomSet {
    type Item = &'a SetAtom;
    type IntoIter = std::slice::Iter<'a, SetAtom>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Renders `{1, 2, 3}`, or `∅` when empty.
impl fmt::Display for AtomSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "∅");
        }
        let items = self.0.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(", ");
        write!(f, "{{{}}}", items)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOperation {
    Union,
    Intersection,
    #[serde(rename = "difference_a_b")]
    DifferenceAB,
    #[serde(rename = "difference_b_a")]
    DifferenceBA,
}

impl SetOperation {
    pub const ALL: [SetOperation; 4] = [
        SetOperation::Union,
        SetOperation::Intersection,
        SetOperation::DifferenceAB,
        SetOperation::DifferenceBA,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            SetOperation::Union        => "∪",
            SetOperation::Intersection => "∩",
            SetOperation::DifferenceAB | SetOperation::DifferenceBA => "-",
        }
    }

    /// Display title, e.g. `"A ∪ B"` or `"B - A"`.
    pub fn title(self) -> &'static str {
        match self {
            SetOperation::Union        => "A ∪ B",
            SetOperation::Intersection => "A ∩ B",
            SetOperation::DifferenceAB => "A - B",
            SetOperation::DifferenceBA => "B - A",
        }
    }
}

/// How the elements of a random set are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetKind {
    Numbers,
    Letters,
    Words,
    Mixed,
}

/// Word dictionaries for categorical sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Animals,
    Fruits,
    Colors,
    Countries,
    Planets,
    Instruments,
    Sports,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Animals,
        Category::Fruits,
        Category::Colors,
        Category::Countries,
        Category::Planets,
        Category::Instruments,
        Category::Sports,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Animals     => "Animales",
            Category::Fruits      => "Frutas",
            Category::Colors      => "Colores",
            Category::Countries   => "Países",
            Category::Planets     => "Planetas",
            Category::Instruments => "Instrumentos",
            Category::Sports      => "Deportes",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetProblem {
    pub set_a: AtomSet,
    pub set_b: AtomSet,
    pub operation: SetOperation,
    /// Theme shown above word sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSolution {
    pub result: AtomSet,
    pub steps: Vec<String>,
}

// ---------------------------------------------------------------------------
// Questions handed to sessions and renderers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Question {
    Arithmetic {
        problem: Problem,
        solution: Solution,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scenario: Option<Scenario>,
    },
    Sets {
        problem: SetProblem,
        solution: SetSolution,
    },
}

impl Question {
    /// The canonical answer in the form a learner is expected to type.
    pub fn correct_answer_display(&self) -> String {
        match self {
            Question::Arithmetic { solution, .. } => solution.result.to_string(),
            Question::Sets { solution, .. }       => solution.result.to_string(),
        }
    }

    pub fn steps(&self) -> &[String] {
        match self {
            Question::Arithmetic { solution, .. } => &solution.steps,
            Question::Sets { solution, .. }       => &solution.steps,
        }
    }
}

/// Request for a single solved question, the way the generator tab asks for one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub module: PracticeModule,
    /// Number domain; drawn uniformly when `None`. Ignored for sets.
    pub kind: Option<NumberKind>,
    pub difficulty: DifficultyLevel,
    pub rng_seed: Option<u64>,
}

impl QuestionRequest {
    /// Defaults: random domain, Beginner, entropy-seeded.
    pub fn new(module: impl Into<PracticeModule>) -> Self {
        QuestionRequest {
            module: module.into(),
            kind: None,
            difficulty: DifficultyLevel::Beginner,
            rng_seed: None,
        }
    }
}
