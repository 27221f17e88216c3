//! Spearman rank correlation

use super::special::student_t_two_sided;
use super::types::ScoreVector;
use crate::agreement::Statistic;
use crate::error::{AgreementError, AgreementResult};
use serde::Serialize;
use std::cmp::Ordering;

/// Rank direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    /// Smallest value gets rank 1
    Ascending,
    /// Largest value gets rank 1
    Descending,
}

/// 1-based ranks; tied values share the mean of the ranks they span.
pub fn average_ranks(values: &[f64], order: RankOrder) -> Vec<f64> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&a, &b| {
        let cmp = values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal);
        match order {
            RankOrder::Ascending => cmp,
            RankOrder::Descending => cmp.reverse(),
        }
    });

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < indices.len() {
        let mut end = start + 1;
        while end < indices.len() && values[indices[end]] == values[indices[start]] {
            end += 1;
        }
        // Positions start..end hold ranks start+1..=end
        let rank = (start + 1 + end) as f64 / 2.0;
        for &i in &indices[start..end] {
            ranks[i] = rank;
        }
        start = end;
    }
    ranks
}

fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

/// Spearman coefficient and its two-sided significance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpearmanResult {
    pub n: usize,
    pub rho: Statistic,
    pub p_value: Statistic,
}

/// Rank correlation between two equally long samples.
///
/// The p-value uses Student's t with `n − 2` degrees of freedom.
pub fn spearman_values(x: &[f64], y: &[f64]) -> AgreementResult<SpearmanResult> {
    if x.len() != y.len() {
        return Err(AgreementError::length_mismatch("spearman samples", x.len(), y.len()));
    }
    let n = x.len();
    if n < 2 {
        return Ok(SpearmanResult {
            n,
            rho: Statistic::undefined("fewer than two observations"),
            p_value: Statistic::undefined("fewer than two observations"),
        });
    }

    let rx = average_ranks(x, RankOrder::Ascending);
    let ry = average_ranks(y, RankOrder::Ascending);
    let Some(rho) = pearson(&rx, &ry) else {
        return Ok(SpearmanResult {
            n,
            rho: Statistic::undefined("constant input"),
            p_value: Statistic::undefined("constant input"),
        });
    };

    let p_value = if n < 3 {
        Statistic::undefined("fewer than three observations")
    } else if rho.abs() >= 1.0 {
        Statistic::defined(0.0)
    } else {
        let df = (n - 2) as f64;
        let t = rho * (df / ((1.0 - rho) * (1.0 + rho))).sqrt();
        Statistic::defined(student_t_two_sided(t, df))
    };

    Ok(SpearmanResult {
        n,
        rho: Statistic::defined(rho),
        p_value,
    })
}

/// Rank correlation between two category-aligned score vectors.
pub fn spearman(a: &ScoreVector, b: &ScoreVector) -> AgreementResult<SpearmanResult> {
    a.ensure_aligned(b)?;
    spearman_values(a.scores(), b.scores())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn ranks_average_ties() {
        let ranks = average_ranks(&[10.0, 20.0, 20.0, 5.0], RankOrder::Ascending);
        assert_eq!(ranks, vec![2.0, 3.5, 3.5, 1.0]);

        let ranks = average_ranks(&[10.0, 20.0, 20.0, 5.0], RankOrder::Descending);
        assert_eq!(ranks, vec![3.0, 1.5, 1.5, 4.0]);
    }

    #[test]
    fn reference_example() {
        let result = spearman_values(&[1.0, 2.0, 3.0, 4.0, 5.0], &[5.0, 6.0, 7.0, 8.0, 7.0]).unwrap();
        assert!(approx_eq(result.rho.value().unwrap(), 0.820_782_681_668_123_3, 1e-9));
        assert!(approx_eq(result.p_value.value().unwrap(), 0.088_587_005_313_543_8, 1e-6));
    }

    #[test]
    fn perfect_monotone_relation() {
        let result = spearman_values(&[0.1, 0.4, 0.2, 0.9], &[1.0, 8.0, 3.0, 100.0]).unwrap();
        assert_eq!(result.rho.value(), Some(1.0));
        assert_eq!(result.p_value.value(), Some(0.0));

        let result = spearman_values(&[0.1, 0.4, 0.2, 0.9], &[9.0, 2.0, 5.0, 1.0]).unwrap();
        assert_eq!(result.rho.value(), Some(-1.0));
    }

    #[test]
    fn constant_input_is_undefined() {
        let result = spearman_values(&[0.3, 0.3, 0.3], &[0.1, 0.2, 0.3]).unwrap();
        assert!(result.rho.is_undefined());
        assert!(result.p_value.is_undefined());
    }

    #[test]
    fn two_observations_have_no_p_value() {
        let result = spearman_values(&[0.1, 0.2], &[0.3, 0.4]).unwrap();
        assert_eq!(result.rho.value(), Some(1.0));
        assert!(result.p_value.is_undefined());
    }

    #[test]
    fn misaligned_vectors_fail() {
        let a = ScoreVector::new("a", [("care", 0.1), ("fairness", 0.2), ("loyalty", 0.3)]).unwrap();
        let b = ScoreVector::new("b", [("care", 0.1), ("loyalty", 0.2), ("fairness", 0.3)]).unwrap();
        assert!(matches!(spearman(&a, &b), Err(AgreementError::MisalignedInputs(_))));
    }
}
