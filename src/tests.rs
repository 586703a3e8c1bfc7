//! Crate-level tests for `math_drill_gen`.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Number model | gcd, simplify idempotence, range containment |
//! | Generation | No zero divisors, natural subtraction closure, seeded determinism |
//! | Solver | Canonical arithmetic and set results |
//! | Practice | Perfect run grades 5.0 and rewards once; wrong answers; history |
//! | Exam | Grading determinism, attempt cap, timeout auto-submit, navigation errors, abandon, set exams |
//! | Config | JSON defaults reach the controller |

use rand::{rngs::StdRng, SeedableRng};

use crate::training_engine::{
    config::{DifficultySetting, EngineConfig},
    error::SessionError,
    generator::{generate_operation, generate_question},
    models::{
        AtomSet, DifficultyLevel, Fraction, NumberKind, NumberValue, OperandRange, Operation,
        PracticeModule, Problem, Question, QuestionRequest, SetOperation, SolvedValue,
    },
    number::{gcd, generate_number, simplify},
    progress::{HistoryEntry, HistoryKind, ProfileProgress, ProgressSink},
    session::{SessionController, SessionState},
    sets::solve_set_operation,
    solver::solve,
};

// ── helpers ──────────────────────────────────────────────────────────────────

/// Sink that counts every side effect a session emits.
#[derive(Debug, Default)]
struct CountingSink {
    stars: u32,
    exercises: u32,
    trophies: u32,
    history: Vec<HistoryEntry>,
}

impl ProgressSink for CountingSink {
    fn add_progress(&mut self, stars: u32, exercises: u32) {
        self.stars += stars;
        self.exercises += exercises;
    }

    fn award_trophy(&mut self) {
        self.trophies += 1;
    }

    fn record_history(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
    }
}

fn controller(
    module: impl Into<PracticeModule>, config: EngineConfig, seed: u64,
) -> SessionController<CountingSink> {
    SessionController::new(module, config, CountingSink::default(), Some(seed))
        .expect("valid config")
}

fn short_exam_config(minutes: u32) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.exam.question_count = 4;
    config.exam.time_limit_minutes = minutes;
    config
}

fn canonical_answers(questions: &[Question]) -> Vec<String> {
    questions.iter().map(Question::correct_answer_display).collect()
}

fn nums(v: &[i64]) -> AtomSet {
    v.iter().copied().collect()
}

const SEEDS: [u64; 5] = [1, 42, 999, 0xDEAD_BEEF, 7];

// ── number model ─────────────────────────────────────────────────────────────

#[test]
fn gcd_examples() {
    assert_eq!(gcd(12, 15), 3);
    assert_eq!(gcd(10, 5), 5);
    assert_eq!(gcd(7, 3), 1);
}

#[test]
fn simplify_reduces_and_is_idempotent() {
    assert_eq!(simplify(2, 4), Fraction::new(1, 2));
    assert_eq!(simplify(10, 15), Fraction::new(2, 3));
    for n in -30..=30 {
        for d in (-12..=12).filter(|d| *d != 0) {
            let once = simplify(n, d);
            assert_eq!(simplify(once.num, once.den), once, "simplify({n}, {d}) not idempotent");
        }
    }
}

#[test]
fn natural_draws_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(3);
    let range = OperandRange { min: 0, max: 10 };
    for _ in 0..1000 {
        match generate_number(&mut rng, NumberKind::Natural, range) {
            NumberValue::Integer(n) => assert!((0..=10).contains(&n), "{n} outside [0, 10]"),
            other => panic!("natural draw produced {other:?}"),
        }
    }
}

// ── generation ───────────────────────────────────────────────────────────────

#[test]
fn division_never_draws_a_zero_divisor() {
    let mut rng = StdRng::seed_from_u64(11);
    for kind in NumberKind::ALL {
        for _ in 0..1000 {
            let p = generate_operation(&mut rng, Operation::Division, kind, DifficultyLevel::Beginner);
            assert!(!p.b.is_zero(), "zero divisor for {kind:?}: {p:?}");
        }
    }
}

#[test]
fn natural_subtraction_results_stay_natural() {
    let mut rng = StdRng::seed_from_u64(13);
    for difficulty in DifficultyLevel::ALL {
        for _ in 0..500 {
            let p = generate_operation(&mut rng, Operation::Subtraction, NumberKind::Natural, difficulty);
            match solve(&p).result {
                SolvedValue::Value { value: NumberValue::Integer(r) } => assert!(r >= 0, "{p:?} gave {r}"),
                other => panic!("natural subtraction solved to {other:?}"),
            }
        }
    }
}

#[test]
fn same_seed_produces_identical_question() {
    for module in [
        PracticeModule::Arithmetic(Operation::Addition),
        PracticeModule::Arithmetic(Operation::Division),
        PracticeModule::Sets,
    ] {
        for seed in SEEDS {
            let mut req = QuestionRequest::new(module);
            req.difficulty = DifficultyLevel::Intermediate;
            req.rng_seed = Some(seed);
            let a = generate_question(req.clone());
            let b = generate_question(req);
            assert_eq!(a, b, "seed {seed} diverged for {module:?}");
        }
    }
}

#[test]
fn requested_kind_is_respected() {
    for kind in NumberKind::ALL {
        let mut req = QuestionRequest::new(Operation::Multiplication);
        req.kind = Some(kind);
        req.rng_seed = Some(17);
        match generate_question(req) {
            Question::Arithmetic { problem, .. } => assert_eq!(problem.kind, kind),
            other => panic!("arithmetic request produced {other:?}"),
        }
    }
}

#[test]
fn entropy_request_smoke() {
    let q = generate_question(QuestionRequest::new(Operation::Subtraction));
    assert!(!q.steps().is_empty());
    assert!(!q.correct_answer_display().is_empty());
}

// ── solver ───────────────────────────────────────────────────────────────────

#[test]
fn canonical_integer_results() {
    let add = Problem::integers(5, 3, NumberKind::Integer, Operation::Addition).expect("valid");
    assert_eq!(solve(&add).result, SolvedValue::Value { value: NumberValue::Integer(8) });

    let sub = Problem::integers(5, 8, NumberKind::Integer, Operation::Subtraction).expect("valid");
    assert_eq!(solve(&sub).result, SolvedValue::Value { value: NumberValue::Integer(-3) });
}

#[test]
fn canonical_rational_results() {
    let mul = Problem::fractions(Fraction::new(1, 2), Fraction::new(1, 3), Operation::Multiplication)
        .expect("valid");
    assert_eq!(solve(&mul).result, SolvedValue::Value { value: NumberValue::Rational(Fraction::new(1, 6)) });

    let div = Problem::fractions(Fraction::new(1, 2), Fraction::new(1, 4), Operation::Division)
        .expect("valid");
    let solution = solve(&div);
    assert_eq!(solution.result, SolvedValue::Value { value: NumberValue::Rational(Fraction::new(2, 1)) });
    assert_eq!(solution.result.to_string(), "2/1");
}

#[test]
fn rational_division_by_zero_is_undefined() {
    let div = Problem::fractions(Fraction::new(3, 4), Fraction::new(0, 5), Operation::Division)
        .expect("valid");
    let solution = solve(&div);
    assert_eq!(solution.result, SolvedValue::Undefined);
    assert_eq!(solution.result.to_string(), "Indefinido");
}

#[test]
fn canonical_set_results() {
    assert_eq!(solve_set_operation(&nums(&[1, 2]), &nums(&[2, 3]), SetOperation::Union).result, nums(&[1, 2, 3]));
    let (a, b) = (nums(&[1, 2, 3]), nums(&[2, 3, 4]));
    assert_eq!(solve_set_operation(&a, &b, SetOperation::Intersection).result, nums(&[2, 3]));
    assert_eq!(solve_set_operation(&a, &b, SetOperation::DifferenceAB).result, nums(&[1]));
    assert_eq!(solve_set_operation(&a, &b, SetOperation::DifferenceBA).result, nums(&[4]));
}

// ── practice ─────────────────────────────────────────────────────────────────

#[test]
fn perfect_practice_grades_five_and_rewards_once() {
    for module in [
        PracticeModule::Arithmetic(Operation::Addition),
        PracticeModule::Arithmetic(Operation::Division),
        PracticeModule::Sets,
    ] {
        let mut c = controller(module, EngineConfig::default(), 21);
        let mut answer = c.start_practice().correct_answer_display();
        let mut answered = 0;

        let report = loop {
            let feedback = c.answer_practice(&answer).expect("session running");
            assert!(feedback.is_correct, "{module:?}: canonical answer {answer:?} rejected");
            answered += 1;
            if let Some(report) = feedback.report {
                break report;
            }
            answer = c
                .practice()
                .and_then(|p| p.current_question())
                .expect("next question")
                .correct_answer_display();
        };

        assert_eq!(answered, 5);
        assert_eq!(report.grade, 5.0);
        assert!(report.is_perfect());
        assert_eq!(c.practice_state(), SessionState::Reporting);

        let sink = c.into_progress();
        assert_eq!(sink.trophies, 1, "{module:?}: perfect signal must fire exactly once");
        assert_eq!(sink.exercises, 5);
        assert_eq!(sink.history.len(), 1);
        assert_eq!(sink.history[0].kind, HistoryKind::Practice);
        assert_eq!(sink.history[0].module, module.name());
    }
}

#[test]
fn wrong_practice_answers_fail_without_reward() {
    let mut c = controller(Operation::Multiplication, EngineConfig::default(), 5);
    c.start_practice();
    let mut last = None;
    for _ in 0..5 {
        let feedback = c.answer_practice("no sé").expect("session running");
        assert!(!feedback.is_correct);
        last = feedback.report;
    }
    let report = last.expect("report after the last answer");
    assert_eq!(report.grade, 0.0);
    assert!(matches!(c.answer_practice("1"), Err(SessionError::NoPracticeSession)));
    assert_eq!(c.progress().trophies, 0);
}

#[test]
fn practice_requires_a_started_session() {
    let mut c = controller(Operation::Addition, EngineConfig::default(), 1);
    assert_eq!(c.practice_state(), SessionState::Idle);
    assert!(matches!(c.answer_practice("3"), Err(SessionError::NoPracticeSession)));
}

// ── exam ─────────────────────────────────────────────────────────────────────

#[test]
fn exam_grading_is_deterministic() {
    let answers_for = |seed: u64| {
        let mut c = controller(Operation::Subtraction, short_exam_config(0), seed);
        let questions = c.start_exam().expect("attempt available").questions().to_vec();
        let canonical = canonical_answers(&questions);
        // Right, wrong, blank, right.
        c.save_exam_answer(0, &canonical[0]).expect("save");
        c.save_exam_answer(1, "abc").expect("save");
        c.save_exam_answer(3, &canonical[3]).expect("save");
        c.submit_exam().expect("submit")
    };
    let first = answers_for(77);
    let second = answers_for(77);
    assert_eq!(first.correct_count, 2);
    assert_eq!(first.grade, 2.5);
    assert_eq!(first.correct_count, second.correct_count);
    assert_eq!(first.grade, second.grade);
    assert_eq!(first.items[2].user_answer, None);
}

#[test]
fn exam_refused_after_max_attempts() {
    let mut c = controller(Operation::Addition, short_exam_config(0), 9);
    for attempt in 1..=2 {
        c.start_exam().expect("attempt available");
        c.submit_exam().expect("submit");
        assert_eq!(c.exam_attempts_used(), attempt);
    }
    assert_eq!(c.exam_attempts_remaining(), 0);
    assert!(matches!(
        c.start_exam(),
        Err(SessionError::AttemptsExhausted { used: 2, max: 2 })
    ));
}

#[test]
fn timeout_auto_submits_once() {
    let mut c = controller(Operation::Multiplication, short_exam_config(1), 4);
    c.start_exam().expect("attempt available");
    assert_eq!(c.exam().map(|e| e.time_remaining()), Some(60));

    assert!(c.tick_exam(30).expect("exam running").is_none());
    let auto = c.tick_exam(45).expect("exam running").expect("clock ran out");
    assert!(auto.auto_submitted);
    assert_eq!(c.exam_state(), SessionState::Reporting);

    // A manual submit racing the timer gets the same report and no second attempt.
    let manual = c.submit_exam().expect("stored report");
    assert_eq!(manual, auto);
    assert!(c.tick_exam(10).expect("exam present").is_none());
    assert_eq!(c.exam_attempts_used(), 1);

    let sink = c.into_progress();
    assert_eq!(sink.history.len(), 1);
    let meta = &sink.history[0].meta;
    assert_eq!(meta["autoSubmitted"], true);
    assert_eq!(meta["timeLimit"], 1);
    assert!(meta["submittedAt"].as_str().is_some());
}

#[test]
fn untimed_exam_never_expires() {
    let mut c = controller(Operation::Addition, short_exam_config(0), 4);
    c.start_exam().expect("attempt available");
    assert!(c.tick_exam(10_000).expect("exam running").is_none());
    assert_eq!(c.exam_state(), SessionState::InProgress);
}

#[test]
fn exam_navigation_errors() {
    let mut c = controller(Operation::Division, short_exam_config(0), 6);
    assert!(matches!(c.next_question(), Err(SessionError::NoExamSession)));

    c.start_exam().expect("attempt available");
    assert_eq!(c.previous_question().expect("open"), false);
    assert!(c.next_question().expect("open"));
    c.jump_to_question(3).expect("in range");
    assert_eq!(c.next_question().expect("open"), false);
    assert!(matches!(
        c.jump_to_question(4),
        Err(SessionError::QuestionOutOfRange { index: 4, len: 4 })
    ));
    assert!(matches!(
        c.save_exam_answer(9, "1"),
        Err(SessionError::QuestionOutOfRange { .. })
    ));

    c.save_exam_answer(2, "  ").expect("blank clears");
    assert!(c.exam().is_some_and(|e| !e.is_answered(2)));
    c.save_exam_answer(2, "5").expect("save");
    assert_eq!(c.exam().map(|e| e.answered_count()), Some(1));

    c.submit_exam().expect("submit");
    assert!(matches!(c.save_exam_answer(0, "1"), Err(SessionError::ExamSubmitted)));
    assert!(matches!(c.next_question(), Err(SessionError::ExamSubmitted)));
}

#[test]
fn abandoned_exam_keeps_the_attempt() {
    let mut c = controller(Operation::Addition, short_exam_config(0), 8);
    for _ in 0..3 {
        c.start_exam().expect("attempt available");
        c.abandon_exam();
    }
    assert_eq!(c.exam_attempts_used(), 0);
    assert_eq!(c.exam_state(), SessionState::Idle);
    assert!(c.progress().history.is_empty());
}

#[test]
fn perfect_exam_adds_a_star_and_exercises() {
    let mut config = short_exam_config(0);
    config.exam.difficulty = DifficultySetting::Fixed(DifficultyLevel::Advanced);
    let mut c = SessionController::new(Operation::Subtraction, config, ProfileProgress::default(), Some(12))
        .expect("valid config");
    let questions = c.start_exam().expect("attempt available").questions().to_vec();
    for (i, answer) in canonical_answers(&questions).iter().enumerate() {
        c.save_exam_answer(i, answer).expect("save");
    }
    let report = c.submit_exam().expect("submit");
    assert!(report.is_perfect());
    assert_eq!(report.grade, 5.0);

    let profile = c.progress();
    assert_eq!(profile.stars, 1);
    assert_eq!(profile.exercises_completed, 4);
    assert_eq!(profile.history[0].kind, HistoryKind::Exam);
    assert_eq!(profile.history[0].module, "subtraction");
    assert_eq!(profile.history[0].grade, Some(5.0));
    assert_eq!(profile.history[0].total_questions, Some(4.0));
}

#[test]
fn set_exam_grades_canonical_answers_as_perfect() {
    let mut config = EngineConfig::default();
    config.exam.question_count = 12;
    let mut c = controller(PracticeModule::Sets, config, 31);
    let questions = c.start_exam().expect("attempt available").questions().to_vec();

    let mut saw_empty = false;
    for (i, q) in questions.iter().enumerate() {
        let Question::Sets { problem, solution } = q else { panic!("set exam holds {q:?}") };
        assert!(problem.category.is_none());
        let answer = q.correct_answer_display();
        if solution.result.is_empty() {
            assert_eq!(answer, "∅");
            saw_empty = true;
        }
        c.save_exam_answer(i, &answer).expect("save");
    }
    let report = c.submit_exam().expect("submit");
    assert_eq!(report.correct_count, 12);
    assert_eq!(report.grade, 5.0);
    assert!(report.items.iter().all(|item| item.is_correct));

    // Whether or not the draw produced one, an explicit ∅ grades against an empty result.
    if !saw_empty {
        let empty = solve_set_operation(&nums(&[1, 2]), &nums(&[3, 4]), SetOperation::Intersection);
        assert!(empty.result.is_empty());
        assert_eq!(empty.result.to_string(), "∅");
    }
}

#[test]
fn set_exam_reordered_answers_still_count() {
    let mut config = EngineConfig::default();
    config.exam.question_count = 3;
    let mut c = controller(PracticeModule::Sets, config, 32);
    let questions = c.start_exam().expect("attempt available").questions().to_vec();
    for (i, q) in questions.iter().enumerate() {
        let Question::Sets { solution, .. } = q else { panic!("set exam holds {q:?}") };
        let reversed: Vec<String> = solution.result.iter().rev().map(|x| x.to_string()).collect();
        let answer = if reversed.is_empty() { "{}".to_string() } else { reversed.join(", ") };
        c.save_exam_answer(i, &answer).expect("save");
    }
    assert_eq!(c.submit_exam().expect("submit").grade, 5.0);
}

#[test]
fn exam_questions_have_no_scenarios() {
    let mut c = controller(Operation::Addition, EngineConfig::default(), 2);
    let exam = c.start_exam().expect("attempt available");
    assert_eq!(exam.len(), 10);
    for q in exam.questions() {
        assert!(matches!(q, Question::Arithmetic { scenario: None, .. }));
    }
}

// ── config ───────────────────────────────────────────────────────────────────

#[test]
fn json_config_reaches_the_controller() {
    let config = EngineConfig::from_json(
        r#"{ "practice": { "total_questions": 3 }, "exam": { "question_count": 6, "max_attempts": 1 } }"#,
    )
    .expect("valid config");
    let mut c = controller(PracticeModule::Sets, config, 3);
    c.start_practice();
    assert_eq!(c.practice().map(|p| p.total_questions()), Some(3));
    assert_eq!(c.start_exam().expect("attempt available").len(), 6);
    c.submit_exam().expect("submit");
    assert!(matches!(c.start_exam(), Err(SessionError::AttemptsExhausted { .. })));
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = EngineConfig::default();
    config.practice.total_questions = 0;
    let result = SessionController::new(Operation::Addition, config, CountingSink::default(), None);
    assert!(matches!(result, Err(SessionError::InvalidConfig(_))));
}
