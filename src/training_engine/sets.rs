//! Random set generation and the four set operations.
//!
//! Every sampling loop is bounded. When uniqueness cannot be met the set comes
//! back undersized and a warning is logged; callers that need an exact size
//! must pick ranges with enough distinct values.

use rand::Rng;
use tracing::warn;

use crate::training_engine::{
    helpers::pick,
    models::{AtomSet, Category, Question, SetAtom, SetKind, SetOperation, SetProblem, SetSolution},
};

/// Draw attempts allowed per requested element.
const DRAWS_PER_ELEMENT: usize = 100;
/// Draw attempts allowed for a whole mixed set.
const MIXED_SET_DRAWS: usize = 100;
/// Value range for `SetKind::Numbers`.
const RANDOM_NUMBER_RANGE: (i64, i64) = (1, 20);

const LETTERS: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
    'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Words in a category dictionary.
pub fn category_words(category: Category) -> &'static [&'static str] {
    match category {
        Category::Animals => &[
            "Perro", "Gato", "León", "Tigre", "Elefante", "Jirafa", "Caballo", "Vaca",
            "Oveja", "Conejo", "Delfín", "Ballena", "Águila", "Búho", "Zorro", "Lobo",
            "Oso", "Mono",
        ],
        Category::Fruits => &[
            "Manzana", "Pera", "Banano", "Fresa", "Uva", "Mango", "Piña", "Sandía",
            "Melón", "Naranja", "Limón", "Cereza", "Kiwi", "Papaya", "Durazno", "Guayaba",
            "Mora",
        ],
        Category::Colors => &[
            "Rojo", "Azul", "Verde", "Amarillo", "Naranja", "Morado", "Rosado", "Negro",
            "Blanco", "Gris", "Café", "Violeta", "Turquesa", "Dorado", "Plateado",
        ],
        Category::Countries => &[
            "Colombia", "México", "Argentina", "Chile", "Perú", "Brasil", "España",
            "Francia", "Italia", "Alemania", "Japón", "China", "Canadá", "Ecuador",
            "Uruguay", "Portugal", "Egipto", "India",
        ],
        Category::Planets => &[
            "Mercurio", "Venus", "Tierra", "Marte", "Júpiter", "Saturno", "Urano",
            "Neptuno", "Plutón", "Ceres", "Eris", "Haumea", "Makemake", "Luna", "Sol",
        ],
        Category::Instruments => &[
            "Guitarra", "Piano", "Violín", "Flauta", "Tambor", "Trompeta", "Saxofón",
            "Arpa", "Clarinete", "Bajo", "Acordeón", "Maracas", "Xilófono", "Chelo",
            "Ukelele", "Batería",
        ],
        Category::Sports => &[
            "Fútbol", "Baloncesto", "Tenis", "Natación", "Ciclismo", "Voleibol",
            "Atletismo", "Béisbol", "Rugby", "Golf", "Boxeo", "Patinaje", "Karate",
            "Gimnasia", "Esgrima", "Surf",
        ],
    }
}

/// `size` distinct integers from `min..=max`, sorted.
pub fn generate_set<R: Rng>(rng: &mut R, size: usize, min: i64, max: i64) -> AtomSet {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let mut set = AtomSet::new();
    let mut draws = 0;
    while set.len() < size && draws < size * DRAWS_PER_ELEMENT {
        set.insert(SetAtom::Number(rng.gen_range(lo..=hi)));
        draws += 1;
    }
    if set.len() < size {
        warn!(size, min, max, got = set.len(), "numeric set came back undersized");
    }
    set
}

/// Random set of `kind`. Word sets use one category for the whole set,
/// chosen uniformly when `category` is `None`.
pub fn generate_random_set<R: Rng>(
    rng: &mut R, kind: SetKind, size: usize, category: Option<Category>,
) -> AtomSet {
    match kind {
        SetKind::Numbers => {
            let (lo, hi) = RANDOM_NUMBER_RANGE;
            generate_set(rng, size, lo, hi)
        }
        SetKind::Letters => fill(rng, size, size * DRAWS_PER_ELEMENT, |rng| {
            SetAtom::Symbol(pick(rng, LETTERS).to_string())
        }),
        SetKind::Words => {
            let category = match category {
                Some(c) => c,
                None    => pick(rng, &Category::ALL),
            };
            fill(rng, size, size * DRAWS_PER_ELEMENT, |rng| random_word(rng, category))
        }
        SetKind::Mixed => fill(rng, size, MIXED_SET_DRAWS, |rng| {
            let roll: f64 = rng.gen();
            if roll < 0.33 {
                let (lo, hi) = RANDOM_NUMBER_RANGE;
                SetAtom::Number(rng.gen_range(lo..=hi))
            } else if roll < 0.66 {
                SetAtom::Symbol(pick(rng, LETTERS).to_string())
            } else {
                let category = pick(rng, &Category::ALL);
                random_word(rng, category)
            }
        }),
    }
}

fn random_word<R: Rng>(rng: &mut R, category: Category) -> SetAtom {
    SetAtom::Symbol(pick(rng, category_words(category)).to_string())
}

fn fill<R: Rng>(
    rng: &mut R, size: usize, max_draws: usize, mut draw: impl FnMut(&mut R) -> SetAtom,
) -> AtomSet {
    let mut set = AtomSet::new();
    let mut draws = 0;
    while set.len() < size && draws < max_draws {
        set.insert(draw(rng));
        draws += 1;
    }
    if set.len() < size {
        warn!(size, got = set.len(), "random set came back undersized");
    }
    set
}

/// Apply a set operation. Steps echo the inputs and explain the rule.
pub fn solve_set_operation(a: &AtomSet, b: &AtomSet, op: SetOperation) -> SetSolution {
    let result: AtomSet = match op {
        SetOperation::Union => a.iter().chain(b.iter()).cloned().collect(),
        SetOperation::Intersection => a.iter().filter(|x| b.contains(x)).cloned().collect(),
        SetOperation::DifferenceAB => a.iter().filter(|x| !b.contains(x)).cloned().collect(),
        SetOperation::DifferenceBA => b.iter().filter(|x| !a.contains(x)).cloned().collect(),
    };

    let rule = match op {
        SetOperation::Union =>
            "A ∪ B reúne todos los elementos que están en A o en B, sin repetirlos.",
        SetOperation::Intersection =>
            "A ∩ B contiene solo los elementos que están en A y también en B.",
        SetOperation::DifferenceAB =>
            "A - B contiene los elementos de A que no están en B.",
        SetOperation::DifferenceBA =>
            "B - A contiene los elementos de B que no están en A.",
    };

    SetSolution {
        result,
        steps: vec![
            format!("A = {}", a),
            format!("B = {}", b),
            rule.to_string(),
        ],
    }
}

/// Pairwise and triple intersections of two or three sets, labelled `A ∩ B` etc.
///
/// Fewer than two sets yields nothing; sets past the third are ignored.
pub fn intersection_overview(sets: &[AtomSet]) -> Vec<(String, AtomSet)> {
    if sets.len() < 2 {
        return Vec::new();
    }
    let meet = |x: &AtomSet, y: &AtomSet| solve_set_operation(x, y, SetOperation::Intersection).result;

    let ab = meet(&sets[0], &sets[1]);
    let mut out = vec![("A ∩ B".to_string(), ab.clone())];
    if let Some(c) = sets.get(2) {
        out.push(("A ∩ C".to_string(), meet(&sets[0], c)));
        out.push(("B ∩ C".to_string(), meet(&sets[1], c)));
        out.push(("A ∩ B ∩ C".to_string(), meet(&ab, c)));
    }
    out
}

/// Practice draw: half the time a themed word pair, otherwise overlapping numeric sets.
pub fn practice_question<R: Rng>(rng: &mut R) -> Question {
    let (set_a, set_b, category) = if rng.gen_bool(0.5) {
        let category = pick(rng, &Category::ALL);
        (
            generate_random_set(rng, SetKind::Words, 4, Some(category)),
            generate_random_set(rng, SetKind::Words, 4, Some(category)),
            Some(category),
        )
    } else {
        (generate_set(rng, 4, 1, 10), generate_set(rng, 4, 5, 15), None)
    };
    set_question(rng, set_a, set_b, category)
}

/// Exam draw: always numeric, overlapping on `5..=10`.
pub fn exam_question<R: Rng>(rng: &mut R) -> Question {
    let set_a = generate_set(rng, 4, 1, 10);
    let set_b = generate_set(rng, 4, 5, 15);
    set_question(rng, set_a, set_b, None)
}

fn set_question<R: Rng>(
    rng: &mut R, set_a: AtomSet, set_b: AtomSet, category: Option<Category>,
) -> Question {
    let operation = pick(rng, &SetOperation::ALL);
    let solution = solve_set_operation(&set_a, &set_b, operation);
    Question::Sets {
        problem: SetProblem { set_a, set_b, operation, category },
        solution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn nums(v: &[i64]) -> AtomSet {
        v.iter().copied().collect()
    }

    #[test]
    fn union_and_intersection() {
        assert_eq!(solve_set_operation(&nums(&[1, 2]), &nums(&[2, 3]), SetOperation::Union).result, nums(&[1, 2, 3]));
        assert_eq!(
            solve_set_operation(&nums(&[1, 2, 3]), &nums(&[2, 3, 4]), SetOperation::Intersection).result,
            nums(&[2, 3])
        );
    }

    #[test]
    fn differences_in_both_directions() {
        let a = nums(&[1, 2, 3]);
        let b = nums(&[2, 3, 4]);
        assert_eq!(solve_set_operation(&a, &b, SetOperation::DifferenceAB).result, nums(&[1]));
        assert_eq!(solve_set_operation(&a, &b, SetOperation::DifferenceBA).result, nums(&[4]));
    }

    #[test]
    fn steps_echo_inputs() {
        let s = solve_set_operation(&nums(&[1, 2]), &nums(&[]), SetOperation::Union);
        assert_eq!(s.steps[0], "A = {1, 2}");
        assert_eq!(s.steps[1], "B = ∅");
        assert_eq!(s.steps.len(), 3);
    }

    #[test]
    fn word_sets_sort_lexicographically() {
        let a: AtomSet = ["Pera", "Manzana", "Uva"].into_iter().collect();
        let b: AtomSet = ["Uva", "Kiwi"].into_iter().collect();
        let u = solve_set_operation(&a, &b, SetOperation::Union).result;
        let words: Vec<String> = u.iter().map(|x| x.to_string()).collect();
        assert_eq!(words, ["Kiwi", "Manzana", "Pera", "Uva"]);
    }

    #[test]
    fn generated_numeric_sets_are_unique_and_sized() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..200 {
            let s = generate_set(&mut rng, 4, 1, 10);
            assert_eq!(s.len(), 4);
            assert!(s.iter().all(|x| matches!(x, SetAtom::Number(n) if (1..=10).contains(n))));
            assert!(s.as_slice().windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn exam_pool_is_two_numeric_sets_of_four() {
        let in_range = |set: &AtomSet, lo: i64, hi: i64| {
            set.len() == 4
                && set.iter().all(|x| matches!(x, SetAtom::Number(n) if (lo..=hi).contains(n)))
        };
        let mut rng = StdRng::seed_from_u64(29);
        for _ in 0..200 {
            match exam_question(&mut rng) {
                Question::Sets { problem, solution } => {
                    assert!(in_range(&problem.set_a, 1, 10), "A = {}", problem.set_a);
                    assert!(in_range(&problem.set_b, 5, 15), "B = {}", problem.set_b);
                    assert_eq!(problem.category, None);
                    assert_eq!(
                        solution.result,
                        solve_set_operation(&problem.set_a, &problem.set_b, problem.operation).result
                    );
                }
                other => panic!("set exam produced {other:?}"),
            }
        }
    }

    #[test]
    fn infeasible_size_returns_undersized_set() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = generate_set(&mut rng, 10, 1, 3);
        assert_eq!(s, nums(&[1, 2, 3]));
    }

    #[test]
    fn word_sets_stay_inside_one_category() {
        let mut rng = StdRng::seed_from_u64(4);
        let s = generate_random_set(&mut rng, SetKind::Words, 5, Some(Category::Planets));
        assert_eq!(s.len(), 5);
        let words = category_words(Category::Planets);
        for atom in &s {
            match atom {
                SetAtom::Symbol(w) => assert!(words.contains(&w.as_str()), "{w} is not a planet"),
                other => panic!("word set holds {other:?}"),
            }
        }
    }

    #[test]
    fn letter_sets_hold_single_letters() {
        let mut rng = StdRng::seed_from_u64(17);
        let s = generate_random_set(&mut rng, SetKind::Letters, 6, None);
        assert_eq!(s.len(), 6);
        assert!(s.iter().all(|x| matches!(x, SetAtom::Symbol(l) if l.chars().count() == 1)));
    }

    #[test]
    fn mixed_sets_terminate_and_numbers_sort_first() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..50 {
            let s = generate_random_set(&mut rng, SetKind::Mixed, 8, None);
            assert!(s.len() <= 8);
            let first_symbol = s.iter().position(|x| matches!(x, SetAtom::Symbol(_)));
            if let Some(i) = first_symbol {
                assert!(s.as_slice()[i..].iter().all(|x| matches!(x, SetAtom::Symbol(_))));
            }
        }
    }

    #[test]
    fn every_category_has_enough_words() {
        for c in Category::ALL {
            let words = category_words(c);
            assert!(words.len() >= 15, "{c:?} has only {} words", words.len());
            let unique: AtomSet = words.iter().copied().collect();
            assert_eq!(unique.len(), words.len(), "{c:?} repeats a word");
        }
    }

    #[test]
    fn overview_for_three_sets() {
        let sets = [nums(&[1, 2, 3, 4]), nums(&[3, 4, 5]), nums(&[4, 5, 6])];
        let overview = intersection_overview(&sets);
        let labels: Vec<&str> = overview.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["A ∩ B", "A ∩ C", "B ∩ C", "A ∩ B ∩ C"]);
        assert_eq!(overview[0].1, nums(&[3, 4]));
        assert_eq!(overview[1].1, nums(&[4]));
        assert_eq!(overview[2].1, nums(&[4, 5]));
        assert_eq!(overview[3].1, nums(&[4]));
        assert_eq!(intersection_overview(&sets[..2]).len(), 1);
        assert!(intersection_overview(&sets[..1]).is_empty());
    }
}
