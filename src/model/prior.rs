//! Prior distributions per parameter group.
//!
//! Priors are handed to the external fitting collaborator as data; this
//! module only validates that the shapes make sense (positive scales,
//! LKJ only on correlation matrices) before anything expensive runs.

use crate::error::{InferirError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A prior distribution with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Prior {
    /// Normal(mu, sigma).
    Normal {
        /// Location.
        mu: f64,
        /// Scale, must be positive.
        sigma: f64,
    },
    /// Student-t(nu, mu, sigma).
    StudentT {
        /// Degrees of freedom, must be positive.
        nu: f64,
        /// Location.
        mu: f64,
        /// Scale, must be positive.
        sigma: f64,
    },
    /// Cauchy(x0, gamma).
    Cauchy {
        /// Location.
        x0: f64,
        /// Scale, must be positive.
        gamma: f64,
    },
    /// Exponential(rate).
    Exponential {
        /// Rate, must be positive.
        rate: f64,
    },
    /// LKJ(eta) over a correlation matrix.
    Lkj {
        /// Shape, must be positive; eta > 1 shrinks toward identity.
        eta: f64,
    },
}

impl Prior {
    fn validate(&self) -> Result<()> {
        let (param, value, ok) = match *self {
            Prior::Normal { sigma, .. } => ("sigma", sigma, sigma > 0.0),
            Prior::StudentT { nu, sigma, .. } => {
                if nu <= 0.0 {
                    ("nu", nu, false)
                } else {
                    ("sigma", sigma, sigma > 0.0)
                }
            }
            Prior::Cauchy { gamma, .. } => ("gamma", gamma, gamma > 0.0),
            Prior::Exponential { rate } => ("rate", rate, rate > 0.0),
            Prior::Lkj { eta } => ("eta", eta, eta > 0.0),
        };
        if ok {
            Ok(())
        } else {
            Err(InferirError::InvalidConfig {
                param: param.to_string(),
                value: value.to_string(),
                constraint: "> 0".to_string(),
            })
        }
    }
}

impl fmt::Display for Prior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prior::Normal { mu, sigma } => write!(f, "normal({mu}, {sigma})"),
            Prior::StudentT { nu, mu, sigma } => write!(f, "student_t({nu}, {mu}, {sigma})"),
            Prior::Cauchy { x0, gamma } => write!(f, "cauchy({x0}, {gamma})"),
            Prior::Exponential { rate } => write!(f, "exponential({rate})"),
            Prior::Lkj { eta } => write!(f, "lkj({eta})"),
        }
    }
}

/// The parameter group a prior applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterClass {
    /// The population-level intercept.
    Intercept,
    /// Population-level (fixed-effect) coefficients.
    Fixed,
    /// Standard deviations of group-varying effects.
    GroupSd,
    /// Correlation matrices of group-varying effects.
    GroupCor,
}

impl ParameterClass {
    /// Conventional name of the group in the collaborator's interface.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ParameterClass::Intercept => "Intercept",
            ParameterClass::Fixed => "b",
            ParameterClass::GroupSd => "sd",
            ParameterClass::GroupCor => "cor",
        }
    }
}

impl fmt::Display for ParameterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One prior assignment: a parameter group and its distribution.
///
/// # Examples
///
/// ```
/// use inferir::model::{ParameterClass, Prior, PriorSpec};
///
/// let spec = PriorSpec::new(
///     ParameterClass::GroupSd,
///     Prior::Exponential { rate: 1.0 },
/// );
/// assert_eq!(spec.to_string(), "sd ~ exponential(1)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorSpec {
    /// The parameter group.
    pub class: ParameterClass,
    /// Its prior.
    pub prior: Prior,
}

impl PriorSpec {
    /// Creates a prior assignment.
    #[must_use]
    pub fn new(class: ParameterClass, prior: Prior) -> Self {
        Self { class, prior }
    }
}

impl fmt::Display for PriorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.class, self.prior)
    }
}

/// Validates a set of prior assignments.
///
/// # Errors
///
/// Returns `InvalidConfig` if a distribution has a non-positive scale,
/// a parameter group appears twice, LKJ is assigned to a non-correlation
/// group, or a correlation group gets anything but LKJ.
pub(super) fn validate_priors(specs: &[PriorSpec]) -> Result<()> {
    for (i, spec) in specs.iter().enumerate() {
        spec.prior.validate()?;

        let is_lkj = matches!(spec.prior, Prior::Lkj { .. });
        let is_cor = spec.class == ParameterClass::GroupCor;
        if is_lkj != is_cor {
            return Err(InferirError::InvalidConfig {
                param: spec.class.name().to_string(),
                value: spec.prior.to_string(),
                constraint: "lkj priors exactly on correlation groups".to_string(),
            });
        }

        if specs[..i].iter().any(|s| s.class == spec.class) {
            return Err(InferirError::InvalidConfig {
                param: spec.class.name().to_string(),
                value: spec.prior.to_string(),
                constraint: "one prior per parameter group".to_string(),
            });
        }
    }
    Ok(())
}
