//! Cross-validation model comparison.
//!
//! Each candidate fit is scored by a cross-validation criterion: the sum
//! of pointwise expected log predictive densities (elpd). Ranking
//! reports, per model, the elpd difference to the best model and the
//! standard error of that difference computed from the pointwise elpd
//! differences — the usual way paired predictive scores are compared.

use crate::error::{InferirError, Result};
use serde::{Deserialize, Serialize};

/// A cross-validation criterion for one fitted model.
///
/// # Examples
///
/// ```
/// use inferir::model::CvCriterion;
///
/// let criterion = CvCriterion::from_pointwise(vec![-0.6, -0.7, -0.5]);
/// assert!((criterion.elpd + 1.8).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvCriterion {
    /// Total expected log predictive density (higher is better).
    pub elpd: f64,
    /// Per-observation elpd contributions.
    pub pointwise: Vec<f64>,
}

impl CvCriterion {
    /// Builds a criterion from pointwise contributions.
    #[must_use]
    pub fn from_pointwise(pointwise: Vec<f64>) -> Self {
        let elpd = pointwise.iter().sum();
        Self { elpd, pointwise }
    }

    /// Standard error of the total elpd.
    #[must_use]
    pub fn se(&self) -> f64 {
        se_of_sum(&self.pointwise)
    }
}

/// One row of a ranked model comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRank {
    /// Model name as supplied by the caller.
    pub name: String,
    /// Total elpd of this model.
    pub elpd: f64,
    /// Difference to the best model's elpd (0 for the best, negative
    /// otherwise).
    pub elpd_diff: f64,
    /// Standard error of `elpd_diff` (0 for the best model).
    pub se_diff: f64,
}

/// Ranks two or more models by their cross-validation criterion.
///
/// The best model comes first with `elpd_diff = 0`; every other row
/// carries its deficit and the paired standard error of that deficit.
///
/// # Errors
///
/// * `InvalidConfig` — fewer than two models.
/// * `Shape` — pointwise vectors of unequal length (criteria must come
///   from the same observations).
///
/// # Examples
///
/// ```
/// use inferir::model::{compare, CvCriterion};
///
/// let ranked = compare(&[
///     ("null", CvCriterion::from_pointwise(vec![-0.7, -0.7, -0.7])),
///     ("class", CvCriterion::from_pointwise(vec![-0.5, -0.6, -0.5])),
/// ])
/// .unwrap();
/// assert_eq!(ranked[0].name, "class");
/// assert_eq!(ranked[0].elpd_diff, 0.0);
/// assert!(ranked[1].elpd_diff < 0.0);
/// ```
pub fn compare(models: &[(&str, CvCriterion)]) -> Result<Vec<ModelRank>> {
    if models.len() < 2 {
        return Err(InferirError::InvalidConfig {
            param: "models".to_string(),
            value: models.len().to_string(),
            constraint: "at least two models to compare".to_string(),
        });
    }

    let n = models[0].1.pointwise.len();
    for (name, criterion) in models {
        if criterion.pointwise.len() != n {
            return Err(InferirError::shape(
                format!("{n} pointwise contributions"),
                format!("{} in model {name}", criterion.pointwise.len()),
            ));
        }
    }

    let best = models
        .iter()
        .max_by(|a, b| {
            a.1.elpd
                .partial_cmp(&b.1.elpd)
                .expect("elpd values should be comparable (not NaN)")
        })
        .expect("at least two models");

    let mut ranked: Vec<ModelRank> = models
        .iter()
        .map(|(name, criterion)| {
            let diffs: Vec<f64> = criterion
                .pointwise
                .iter()
                .zip(&best.1.pointwise)
                .map(|(own, top)| own - top)
                .collect();
            ModelRank {
                name: (*name).to_string(),
                elpd: criterion.elpd,
                elpd_diff: criterion.elpd - best.1.elpd,
                se_diff: se_of_sum(&diffs),
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.elpd
            .partial_cmp(&a.elpd)
            .expect("elpd values should be comparable (not NaN)")
    });
    Ok(ranked)
}

/// Standard error of the sum of pointwise values: sqrt(n * var).
fn se_of_sum(pointwise: &[f64]) -> f64 {
    let n = pointwise.len();
    if n < 2 {
        return 0.0;
    }
    let mean = pointwise.iter().sum::<f64>() / n as f64;
    let var = pointwise.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    (n as f64 * var).sqrt()
}
