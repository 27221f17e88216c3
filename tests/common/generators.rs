//! Seeded random inputs for property checks

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

pub const FOUNDATION_LABELS: [&str; 12] = [
    "care.virtue",
    "care.vice",
    "fairness.virtue",
    "fairness.vice",
    "loyalty.virtue",
    "loyalty.vice",
    "authority.virtue",
    "authority.vice",
    "sanctity.virtue",
    "sanctity.vice",
    "liberty.virtue",
    "liberty.vice",
];

/// `n` labels drawn uniformly from [`FOUNDATION_LABELS`].
pub fn random_labels(rng: &mut StdRng, n: usize) -> Vec<Option<String>> {
    (0..n)
        .map(|_| FOUNDATION_LABELS.choose(rng).map(|l| l.to_string()))
        .collect()
}

/// Blank out each label with probability `p`.
pub fn with_gaps(rng: &mut StdRng, labels: Vec<Option<String>>, p: f64) -> Vec<Option<String>> {
    labels
        .into_iter()
        .map(|l| if rng.gen_bool(p) { None } else { l })
        .collect()
}

/// `n` scores in `[0, 1)`.
pub fn random_scores(rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.gen::<f64>()).collect()
}
