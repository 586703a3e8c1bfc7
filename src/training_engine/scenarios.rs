//! Word-problem templates bound to generated arithmetic problems.
//!
//! Each operation has a small static bank. A template is eligible when the
//! problem's domain is in `supports`, both operands are positive if
//! `require_positive` is set, and its `condition` holds. Operands are turned
//! into floats for filtering only; narratives show the original operands.

use rand::Rng;

use crate::training_engine::{
    models::{NumberKind, NumberValue, Operation, Problem, Scenario, Solution},
    number::format_operand,
};

/// Filtering predicate over `(a, b, result)`. `result` is `None` unless the
/// solution is a plain number.
pub type Condition = fn(f64, f64, Option<f64>) -> bool;

pub struct ScenarioTemplate {
    pub supports: &'static [NumberKind],
    pub require_positive: bool,
    pub condition: Option<Condition>,
    /// Renders from the displayed `(a, b, result)`.
    pub render: fn(&str, &str, &str) -> Scenario,
}

const WHOLE: &[NumberKind] = &[NumberKind::Natural, NumberKind::Integer];
const FRACTIONS: &[NumberKind] = &[NumberKind::Rational];

fn minuend_covers(a: f64, b: f64, _: Option<f64>) -> bool {
    a >= b
}

fn nonzero_divisor(_: f64, b: f64, _: Option<f64>) -> bool {
    b != 0.0
}

fn scenario(description: String, question: &str, tip: &str) -> Scenario {
    Scenario {
        description,
        question: question.to_string(),
        tip: tip.to_string(),
    }
}

static MULTIPLICATION: &[ScenarioTemplate] = &[
    ScenarioTemplate {
        supports: WHOLE, require_positive: true, condition: None,
        render: |a, b, _| scenario(
            format!("Compras {a} cajas y cada una trae {b} galletas frescas."),
            "¿Cuántas galletas tendrás al llegar a casa?",
            "Multiplica el número de cajas por el contenido de cada una.",
        ),
    },
    ScenarioTemplate {
        supports: WHOLE, require_positive: true, condition: None,
        render: |a, b, _| scenario(
            format!("Una maestra organiza {a} filas con {b} estudiantes en cada fila para el acto cultural."),
            "¿Cuántos estudiantes participan en total?",
            "Piensa en filas repetidas: filas × estudiantes por fila.",
        ),
    },
    ScenarioTemplate {
        supports: WHOLE, require_positive: true, condition: None,
        render: |a, b, _| scenario(
            format!("Cada estante puede guardar {b} libros y en la biblioteca se llenan {a} estantes completos."),
            "¿Cuántos libros están ordenados?",
            "Multiplica estantes por libros por estante.",
        ),
    },
    ScenarioTemplate {
        supports: FRACTIONS, require_positive: true, condition: None,
        render: |a, b, _| scenario(
            format!("Una receta pide {a} de taza de azúcar y solo preparas {b} de la receta."),
            "¿Cuánta azúcar necesitas?",
            "Tomar una parte de una cantidad es multiplicar las fracciones.",
        ),
    },
];

static ADDITION: &[ScenarioTemplate] = &[
    ScenarioTemplate {
        supports: WHOLE, require_positive: true, condition: None,
        render: |a, b, _| scenario(
            format!("Camila recorrió {a} km en la mañana y {b} km en la tarde."),
            "¿Qué distancia total caminó en el día?",
            "Suma los kilómetros de ambos momentos.",
        ),
    },
    ScenarioTemplate {
        supports: WHOLE, require_positive: true, condition: None,
        render: |a, b, _| scenario(
            format!("Ahorras {a} monedas esta semana y tu familia te regala {b} monedas más."),
            "¿Con cuántas monedas cuentas ahora?",
            "Une ambos montos para obtener el total.",
        ),
    },
    ScenarioTemplate {
        supports: WHOLE, require_positive: true, condition: None,
        render: |a, b, _| scenario(
            format!("Una receta usa {a} gramos de harina y agregas {b} gramos adicionales para duplicar la mezcla."),
            "¿Cuánta harina empleaste en total?",
            "Suma la medida base más el refuerzo.",
        ),
    },
    ScenarioTemplate {
        supports: FRACTIONS, require_positive: true, condition: None,
        render: |a, b, _| scenario(
            format!("Bebes {a} de litro de jugo en la mañana y {b} de litro en la tarde."),
            "¿Cuánto jugo bebiste en el día?",
            "Busca un denominador común antes de sumar.",
        ),
    },
];

static SUBTRACTION: &[ScenarioTemplate] = &[
    ScenarioTemplate {
        supports: WHOLE, require_positive: true, condition: Some(minuend_covers),
        render: |a, b, _| scenario(
            format!("Había {a} entradas disponibles para un concierto y ya se vendieron {b}."),
            "¿Cuántas entradas quedan por vender?",
            "Resta las vendidas del total inicial.",
        ),
    },
    ScenarioTemplate {
        supports: WHOLE, require_positive: true, condition: Some(minuend_covers),
        render: |a, b, _| scenario(
            format!("Un tanque almacenaba {a} litros de agua y se utilizaron {b} litros para regar el huerto."),
            "¿Cuánta agua permanece en el tanque?",
            "Compara lo que había con lo que salió.",
        ),
    },
    ScenarioTemplate {
        supports: WHOLE, require_positive: true, condition: Some(minuend_covers),
        render: |a, b, _| scenario(
            format!("Preparaste {a} galletas y regalaste {b} a tus vecinos."),
            "¿Cuántas galletas te quedaron?",
            "Resta las que entregaste de las preparadas.",
        ),
    },
    ScenarioTemplate {
        supports: FRACTIONS, require_positive: true, condition: Some(minuend_covers),
        render: |a, b, _| scenario(
            format!("Tenías {a} de una pizza y te comiste {b} de la pizza."),
            "¿Qué parte de la pizza queda?",
            "Expresa ambas partes con el mismo denominador y resta.",
        ),
    },
];

static DIVISION: &[ScenarioTemplate] = &[
    ScenarioTemplate {
        supports: WHOLE, require_positive: true, condition: Some(nonzero_divisor),
        render: |a, b, _| scenario(
            format!("Tienes {a} caramelos y deseas repartirlos en partes iguales entre {b} amigos."),
            "¿Cuántos caramelos recibe cada persona?",
            "Divide la cantidad total entre el número de personas.",
        ),
    },
    ScenarioTemplate {
        supports: WHOLE, require_positive: true, condition: Some(nonzero_divisor),
        render: |a, b, _| scenario(
            format!("Un viaje de {a} km se completa en {b} horas."),
            "¿Cuál fue la velocidad promedio en km por hora?",
            "Divide la distancia entre el tiempo.",
        ),
    },
    ScenarioTemplate {
        supports: WHOLE, require_positive: true, condition: Some(nonzero_divisor),
        render: |a, b, _| scenario(
            format!("Dispones de {a} adhesivos y deseas guardarlos en paquetes de {b} unidades."),
            "¿Cuántos paquetes completos puedes formar?",
            "Divide la cantidad total entre la capacidad de cada paquete.",
        ),
    },
    ScenarioTemplate {
        supports: FRACTIONS, require_positive: true, condition: Some(nonzero_divisor),
        render: |a, b, _| scenario(
            format!("Tienes {a} de litro de agua y llenas vasos de {b} de litro."),
            "¿Cuántos vasos puedes llenar?",
            "Dividir entre una fracción es multiplicar por su inverso.",
        ),
    },
];

/// The template bank for one operation.
pub fn bank(operation: Operation) -> &'static [ScenarioTemplate] {
    match operation {
        Operation::Addition       => ADDITION,
        Operation::Subtraction    => SUBTRACTION,
        Operation::Multiplication => MULTIPLICATION,
        Operation::Division       => DIVISION,
    }
}

fn eligible(t: &ScenarioTemplate, kind: NumberKind, a: f64, b: f64, result: Option<f64>) -> bool {
    if !t.supports.contains(&kind) {
        return false;
    }
    if t.require_positive && (a <= 0.0 || b <= 0.0) {
        return false;
    }
    match t.condition {
        Some(cond) => cond(a, b, result),
        None       => true,
    }
}

/// Pick a narrative for the problem uniformly among eligible templates, or `None`.
pub fn build_scenario<R: Rng>(rng: &mut R, problem: &Problem, solution: &Solution) -> Option<Scenario> {
    let a = problem.a.as_f64()?;
    let b = problem.b.as_f64()?;
    let result = match solution.result.value() {
        Some(NumberValue::Integer(n)) => Some(n as f64),
        _ => None,
    };

    let candidates: Vec<&ScenarioTemplate> = bank(problem.operation)
        .iter()
        .filter(|t| eligible(t, problem.kind, a, b, result))
        .collect();
    if candidates.is_empty() {
        return None;
    }
    let chosen = candidates[rng.gen_range(0..candidates.len())];
    Some((chosen.render)(
        &format_operand(problem.a),
        &format_operand(problem.b),
        &solution.result.to_string(),
    ))
}
