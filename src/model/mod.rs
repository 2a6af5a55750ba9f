//! Declarative interface to the external fitting collaborator.
//!
//! The MCMC machinery itself (model compilation, sampling, chain
//! management) lives behind the [`Sampler`] trait; this module only
//! defines what gets handed across that seam and what comes back:
//!
//! - [`ModelFormula`] — outcome, fixed effects, random-effect structure
//! - [`Prior`]/[`PriorSpec`] — per-parameter-group prior distributions
//! - [`SamplerConfig`] — chains, iterations, warmup, seed, adapt_delta
//! - [`FittedModel`] — the opaque handle: diagnostics plus posterior
//!   draw matrices ([`PosteriorQuery::Expectation`] for predicted
//!   probabilities, [`PosteriorQuery::Predictive`] for simulated
//!   outcomes)
//! - [`CvCriterion`]/[`compare`] — cross-validation model ranking

mod compare;
mod diagnostics;
mod fit;
mod formula;
mod prior;

pub use compare::{compare, CvCriterion, ModelRank};
pub use diagnostics::{
    ConvergenceWarning, FitDiagnostics, ParameterDiagnostics, ESS_WARN, RHAT_WARN,
};
pub use fit::{FittedModel, PosteriorQuery, Sampler, SamplerConfig};
pub use formula::{ModelFormula, RandomTerm};
pub use prior::{ParameterClass, Prior, PriorSpec};

use crate::error::Result;

/// Everything the external fitting collaborator needs for one model fit.
///
/// # Examples
///
/// ```
/// use inferir::model::{ModelFormula, ModelSpec, ParameterClass, Prior, PriorSpec, RandomTerm, SamplerConfig};
/// use inferir::summary::GroupField;
///
/// let spec = ModelSpec::new(
///     ModelFormula::new()
///         .with_class_effect()
///         .with_random(RandomTerm::intercept(GroupField::Region).with_class_slope()),
/// )
/// .with_prior(PriorSpec::new(
///     ParameterClass::Intercept,
///     Prior::StudentT { nu: 3.0, mu: 0.0, sigma: 2.5 },
/// ))
/// .with_sampler(SamplerConfig::default().with_seed(1234));
///
/// assert!(spec.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    /// The model structure.
    pub formula: ModelFormula,
    /// Per-parameter-group priors; groups without an entry use the
    /// collaborator's defaults.
    pub priors: Vec<PriorSpec>,
    /// Sampler settings.
    pub sampler: SamplerConfig,
}

impl ModelSpec {
    /// Creates a spec around a formula with no explicit priors and
    /// default sampler settings.
    #[must_use]
    pub fn new(formula: ModelFormula) -> Self {
        Self {
            formula,
            priors: Vec::new(),
            sampler: SamplerConfig::default(),
        }
    }

    /// Adds a prior specification.
    #[must_use]
    pub fn with_prior(mut self, prior: PriorSpec) -> Self {
        self.priors.push(prior);
        self
    }

    /// Replaces the sampler settings.
    #[must_use]
    pub fn with_sampler(mut self, sampler: SamplerConfig) -> Self {
        self.sampler = sampler;
        self
    }

    /// Validates the formula, every prior, and the sampler settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on the first inconsistency found.
    pub fn validate(&self) -> Result<()> {
        self.formula.validate()?;
        prior::validate_priors(&self.priors)?;
        self.sampler.validate()
    }
}
