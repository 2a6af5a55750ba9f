//! Convergence diagnostics surfaced by the fitting backend.
//!
//! Following Gelman et al. (2013), ch. 11: effective sample size and the
//! split R-hat statistic per parameter, plus the divergent-transition
//! count of the sampler. Problems are warnings, not errors — an
//! imperfect fit can still be explored, but any divergence means the
//! model needs revision before the results are trusted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// R-hat above this is flagged as a convergence warning.
pub const RHAT_WARN: f64 = 1.01;

/// Effective sample size below this is flagged as a convergence warning.
pub const ESS_WARN: f64 = 400.0;

/// Diagnostics for a single model parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDiagnostics {
    /// Parameter name as reported by the backend.
    pub name: String,
    /// Effective sample size.
    pub ess: f64,
    /// Split R-hat convergence statistic.
    pub rhat: f64,
}

impl ParameterDiagnostics {
    /// Creates diagnostics for one parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ess: f64, rhat: f64) -> Self {
        Self {
            name: name.into(),
            ess,
            rhat,
        }
    }
}

/// Whole-fit diagnostics returned with a fitted-model handle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitDiagnostics {
    /// Per-parameter statistics.
    pub parameters: Vec<ParameterDiagnostics>,
    /// Number of divergent transitions across all chains.
    pub divergent: usize,
}

impl FitDiagnostics {
    /// Creates empty diagnostics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one parameter's statistics.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterDiagnostics) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Sets the divergent-transition count.
    #[must_use]
    pub fn with_divergent(mut self, divergent: usize) -> Self {
        self.divergent = divergent;
        self
    }

    /// Collects all convergence warnings for this fit.
    #[must_use]
    pub fn warnings(&self) -> Vec<ConvergenceWarning> {
        let mut warnings = Vec::new();
        for p in &self.parameters {
            if p.rhat > RHAT_WARN {
                warnings.push(ConvergenceWarning::HighRhat {
                    parameter: p.name.clone(),
                    rhat: p.rhat,
                });
            }
            if p.ess < ESS_WARN {
                warnings.push(ConvergenceWarning::LowEss {
                    parameter: p.name.clone(),
                    ess: p.ess,
                });
            }
        }
        if self.divergent > 0 {
            warnings.push(ConvergenceWarning::DivergentTransitions {
                count: self.divergent,
            });
        }
        warnings
    }

    /// True when no warning fires.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings().is_empty()
    }
}

/// A non-fatal convergence problem reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConvergenceWarning {
    /// Split R-hat above [`RHAT_WARN`].
    HighRhat {
        /// Affected parameter.
        parameter: String,
        /// Observed value.
        rhat: f64,
    },
    /// Effective sample size below [`ESS_WARN`].
    LowEss {
        /// Affected parameter.
        parameter: String,
        /// Observed value.
        ess: f64,
    },
    /// Divergent transitions occurred during sampling.
    DivergentTransitions {
        /// How many, across all chains.
        count: usize,
    },
}

impl fmt::Display for ConvergenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvergenceWarning::HighRhat { parameter, rhat } => {
                write!(f, "{parameter}: rhat = {rhat:.3} exceeds {RHAT_WARN}")
            }
            ConvergenceWarning::LowEss { parameter, ess } => {
                write!(f, "{parameter}: effective sample size {ess:.0} below {ESS_WARN}")
            }
            ConvergenceWarning::DivergentTransitions { count } => {
                write!(f, "{count} divergent transitions; results are not trustworthy")
            }
        }
    }
}
