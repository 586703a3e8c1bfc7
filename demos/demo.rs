//! Tour of the generator, solver, worksheets and a practice run.
//!
//! Run with: `cargo run --example demo`
//! (`RUST_LOG=math_drill_gen=debug` shows the engine's own logs.)
//!
//! 1. **One question per operation and domain**, fixed seeds, with the
//!    Spanish explanation steps and the word problem when one fits.
//! 2. **Set questions** drawn from the practice pool.
//! 3. **A worksheet** with its answer key.
//! 4. **A practice session** answered perfectly, then the resulting profile.

use math_drill_gen::{
    generate_question, generate_worksheet, DifficultyLevel, EngineConfig, NumberKind, Operation,
    PracticeModule, ProfileProgress, Question, QuestionRequest, SessionController,
    WorksheetRequest,
};
use math_drill_gen::training_engine::{
    number::format_operand, worksheet::WorksheetItem, SetKind,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

fn print_question(q: &Question) {
    match q {
        Question::Arithmetic { problem, scenario, .. } => {
            println!(
                "  [{} | {}]  {} {} {}",
                problem.operation,
                problem.kind,
                format_operand(problem.a),
                problem.operation.symbol(),
                format_operand(problem.b)
            );
            if let Some(s) = scenario {
                println!("  Historia: {}", s.description);
                println!("  Pregunta: {}", s.question);
                println!("  Pista:    {}", s.tip);
            }
        }
        Question::Sets { problem, .. } => {
            if let Some(c) = problem.category {
                println!("  [Conjuntos | {}]", c);
            } else {
                println!("  [Conjuntos]");
            }
            println!("  A = {}", problem.set_a);
            println!("  B = {}", problem.set_b);
            println!("  Calcula {}", problem.operation.title());
        }
    }
    for step in q.steps() {
        println!("     · {}", step);
    }
    println!("  Respuesta: {}", q.correct_answer_display());
    println!();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // ── Generator and solver ───────────────────────────────────────────────
    println!("══ Una pregunta por operación y dominio ══");
    println!();
    for (i, op) in Operation::ALL.into_iter().enumerate() {
        for (j, kind) in NumberKind::ALL.into_iter().enumerate() {
            let mut req = QuestionRequest::new(op);
            req.kind = Some(kind);
            req.difficulty = DifficultyLevel::Beginner;
            req.rng_seed = Some(100 + (i * 3 + j) as u64);
            print_question(&generate_question(req));
        }
    }

    // ── Sets ───────────────────────────────────────────────────────────────
    println!("══ Conjuntos ══");
    println!();
    for seed in [1, 2, 3] {
        let mut req = QuestionRequest::new(PracticeModule::Sets);
        req.rng_seed = Some(seed);
        print_question(&generate_question(req));
    }

    // ── Worksheet ──────────────────────────────────────────────────────────
    println!("══ Taller de conjuntos (3 conjuntos) ══");
    println!();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut sheet_req = WorksheetRequest::new(PracticeModule::Sets);
    sheet_req.set_kind = Some(SetKind::Words);
    sheet_req.set_count = 3;
    let sheet = generate_worksheet(&mut rng, &sheet_req);
    for (n, item) in sheet.items.iter().enumerate() {
        if let WorksheetItem::Sets(item) = item {
            println!("  {}. {}", n + 1, item.expression);
            for (label, set) in &item.sets {
                println!("     {} = {}", label, set);
            }
            println!("     Clave: {}", item.answer);
        }
    }
    println!();

    // ── Practice session ───────────────────────────────────────────────────
    println!("══ Práctica perfecta (multiplicación) ══");
    println!();
    let mut controller = match SessionController::new(
        Operation::Multiplication,
        EngineConfig::default(),
        ProfileProgress::default(),
        Some(7),
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {e}");
            return;
        }
    };

    let mut answer = controller.start_practice().correct_answer_display();
    loop {
        let feedback = match controller.answer_practice(&answer) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("practice error: {e}");
                return;
            }
        };
        println!("  {} → {}", answer, if feedback.is_correct { "correcto" } else { "incorrecto" });
        if let Some(report) = feedback.report {
            println!("  Nota: {:.1} ({})", report.grade, report.band);
            break;
        }
        match controller.practice().and_then(|p| p.current_question()) {
            Some(q) => answer = q.correct_answer_display(),
            None => break,
        }
    }

    let profile = controller.into_progress();
    println!(
        "  Perfil: nivel {}  estrellas {}  trofeos {}  ejercicios {}",
        profile.level, profile.stars, profile.trophies, profile.exercises_completed
    );
    let badges: Vec<&str> = profile.badges().into_iter().map(|b| b.name()).collect();
    println!("  Insignias: {}", if badges.is_empty() { "-".to_string() } else { badges.join(", ") });
}
