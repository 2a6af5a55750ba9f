//! Seeded synthetic accuracy data.
//!
//! Generates plausible per-participant result files and fake posterior
//! draws so the whole pipeline can run without real scanner data. Region
//! and class effects act on the logit scale, mirroring the hierarchical
//! structure the models assume.

use crate::error::Result;
use crate::observations::{Cell, ObservationTable, ParticipantRecord, RegionRecord};
use crate::primitives::Matrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Settings for synthetic dataset generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticConfig {
    /// Number of participants (one record each).
    pub participants: usize,
    /// Trials per (participant, region); constant within a record.
    pub trials: usize,
    /// Population-level accuracy before region/class effects.
    pub base_accuracy: f64,
    /// Standard deviation of per-region effects on the logit scale.
    pub region_sd: f64,
    /// Fixed logit shift of the object class relative to the features.
    pub object_shift: f64,
    /// RNG seed; identical configs generate identical data.
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            participants: 2,
            trials: 10,
            base_accuracy: 0.75,
            region_sd: 0.5,
            object_shift: 0.4,
            seed: 0,
        }
    }
}

impl SyntheticConfig {
    /// Sets the participant count.
    #[must_use]
    pub fn with_participants(mut self, participants: usize) -> Self {
        self.participants = participants;
        self
    }

    /// Sets the per-region trial count.
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Sets the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

/// Standard normal draw via Box-Muller; rand alone is enough here.
fn standard_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Generates one raw record per participant.
///
/// Each of the 26 regions draws its own logit-scale effect, shared by
/// all participants; outcomes are Bernoulli at
/// sigmoid(base + region effect + class shift).
///
/// # Examples
///
/// ```
/// use inferir::synthetic::{accuracy_records, SyntheticConfig};
///
/// let records = accuracy_records(&SyntheticConfig::default());
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].regions.len(), 26);
/// ```
#[must_use]
pub fn accuracy_records(config: &SyntheticConfig) -> Vec<ParticipantRecord> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let base = logit(config.base_accuracy.clamp(0.01, 0.99));

    let region_effects: Vec<f64> = (0..26)
        .map(|_| standard_normal(&mut rng) * config.region_sd)
        .collect();

    (0..config.participants)
        .map(|_| ParticipantRecord {
            regions: region_effects
                .iter()
                .map(|&effect| {
                    let p_feature = sigmoid(base + effect);
                    let p_object = sigmoid(base + effect + config.object_shift);
                    let mut column = |p: f64| -> Vec<Cell> {
                        (0..config.trials).map(|_| Cell::Bool(rng.gen_bool(p))).collect()
                    };
                    RegionRecord {
                        feature1: column(p_feature),
                        feature2: column(p_feature),
                        object: column(p_object),
                    }
                })
                .collect(),
        })
        .collect()
}

/// Generates a fake posterior probability-draw matrix for a table.
///
/// Each observation gets a stable center from its outcome (shrunk away
/// from 0/1) and each draw jitters around it, clamped to \[0, 1\]. Shaped
/// `[n_draws × n_rows]` to satisfy the summarizer's positional contract.
///
/// # Errors
///
/// Returns an error if the table is empty or `n_draws` is zero.
pub fn posterior_draws(
    table: &ObservationTable,
    n_draws: usize,
    seed: u64,
) -> Result<Matrix<f32>> {
    if table.is_empty() {
        return Err(crate::error::InferirError::empty_input("observation table"));
    }
    if n_draws == 0 {
        return Err(crate::error::InferirError::empty_input("posterior draws"));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let centers: Vec<f64> = table
        .iter()
        .map(|obs| if obs.value { 0.85 } else { 0.15 })
        .collect();

    let mut data = Vec::with_capacity(n_draws * centers.len());
    for _ in 0..n_draws {
        for &center in &centers {
            let value = (center + standard_normal(&mut rng) * 0.05).clamp(0.0, 1.0);
            data.push(value as f32);
        }
    }
    Matrix::from_vec(n_draws, centers.len(), data)
}
