//! The sampling seam: configuration handed to the external fitting
//! collaborator and the opaque handle it returns.
//!
//! The fit is one blocking call from this crate's perspective; chain
//! parallelism, warmup adaptation and compilation are the backend's
//! business.

use super::diagnostics::FitDiagnostics;
use super::ModelSpec;
use crate::error::{InferirError, Result};
use crate::observations::ObservationTable;
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};

/// Sampler settings forwarded to the fitting backend.
///
/// # Examples
///
/// ```
/// use inferir::model::SamplerConfig;
///
/// let config = SamplerConfig::default()
///     .with_chains(4)
///     .with_iterations(4000)
///     .with_seed(20240101);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Number of independent chains.
    pub chains: usize,
    /// Total iterations per chain, including warmup.
    pub iterations: usize,
    /// Warmup iterations per chain, discarded from the posterior.
    pub warmup: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
    /// Target acceptance probability of the sampler, in (0, 1).
    pub adapt_delta: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            chains: 4,
            iterations: 2000,
            warmup: 1000,
            seed: 0,
            adapt_delta: 0.8,
        }
    }
}

impl SamplerConfig {
    /// Sets the number of chains.
    #[must_use]
    pub fn with_chains(mut self, chains: usize) -> Self {
        self.chains = chains;
        self
    }

    /// Sets the per-chain iteration count.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the per-chain warmup count.
    #[must_use]
    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    /// Sets the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the target acceptance probability.
    #[must_use]
    pub fn with_adapt_delta(mut self, adapt_delta: f64) -> Self {
        self.adapt_delta = adapt_delta;
        self
    }

    /// Number of retained posterior draws across all chains.
    #[must_use]
    pub fn retained_draws(&self) -> usize {
        self.chains * self.iterations.saturating_sub(self.warmup)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if chains is zero, warmup does not leave
    /// room for retained draws, or `adapt_delta` is outside (0, 1).
    pub fn validate(&self) -> Result<()> {
        if self.chains == 0 {
            return Err(InferirError::InvalidConfig {
                param: "chains".to_string(),
                value: "0".to_string(),
                constraint: ">= 1".to_string(),
            });
        }
        if self.warmup >= self.iterations {
            return Err(InferirError::InvalidConfig {
                param: "warmup".to_string(),
                value: self.warmup.to_string(),
                constraint: format!("< iterations ({})", self.iterations),
            });
        }
        if !(0.0 < self.adapt_delta && self.adapt_delta < 1.0) {
            return Err(InferirError::InvalidConfig {
                param: "adapt_delta".to_string(),
                value: self.adapt_delta.to_string(),
                constraint: "in (0, 1)".to_string(),
            });
        }
        Ok(())
    }
}

/// Which per-observation draws to request from a fitted model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PosteriorQuery {
    /// Predicted-probability draws (posterior expectation).
    Expectation,
    /// Simulated-outcome draws (posterior predictive).
    Predictive,
}

/// The opaque handle returned by the fitting collaborator.
///
/// Both draw queries return `[n_draws × n_observations]` matrices whose
/// columns follow the row order of the table the model was fitted on —
/// the positional-correspondence contract of
/// [`crate::summary::summarize`].
pub trait FittedModel {
    /// Per-parameter convergence diagnostics of the fit.
    fn diagnostics(&self) -> &FitDiagnostics;

    /// Per-observation predicted-probability draws.
    ///
    /// # Errors
    ///
    /// Backend-specific; typically unavailable draws.
    fn expectation_draws(&self) -> Result<Matrix<f32>>;

    /// Per-observation simulated-outcome draws (0/1 as f32).
    ///
    /// # Errors
    ///
    /// Backend-specific; typically unavailable draws.
    fn predictive_draws(&self) -> Result<Matrix<f32>>;

    /// Dispatches on a [`PosteriorQuery`].
    ///
    /// # Errors
    ///
    /// Propagates the underlying query's error.
    fn draws(&self, query: PosteriorQuery) -> Result<Matrix<f32>> {
        match query {
            PosteriorQuery::Expectation => self.expectation_draws(),
            PosteriorQuery::Predictive => self.predictive_draws(),
        }
    }
}

/// The external fitting collaborator.
///
/// Implementations wrap a probabilistic-programming backend; this crate
/// only validates the spec and consumes the returned handle.
pub trait Sampler {
    /// Fits `spec` to `table`, blocking until sampling finishes.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for a spec that fails validation; backend errors
    /// otherwise.
    fn fit(&self, table: &ObservationTable, spec: &ModelSpec) -> Result<Box<dyn FittedModel>>;
}
