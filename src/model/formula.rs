//! Model formula: fixed effects and random-effect grouping structure.
//!
//! The outcome is always the boolean accuracy column modeled as
//! Bernoulli with a logit link; what varies between the models of a
//! workflow is whether class enters as a fixed effect and which grouping
//! fields get varying intercepts and slopes. `Display` renders the
//! conventional extended formula notation understood by the external
//! fitting collaborator, e.g.
//! `value ~ 1 + class + (1 + class | region)`.

use crate::error::{InferirError, Result};
use crate::summary::GroupField;
use serde::{Deserialize, Serialize};
use std::fmt;

impl GroupField {
    /// Formula-notation name of the field.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            GroupField::Region => "region",
            GroupField::Class => "class",
            GroupField::Participant => "participant",
            GroupField::Trial => "trial",
        }
    }
}

/// One random-effect term: group-varying intercept and/or class slopes,
/// with or without modeled correlation between the varying effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomTerm {
    /// The grouping field whose levels get their own effects.
    pub group: GroupField,
    /// Whether the group levels get varying intercepts.
    pub intercept: bool,
    /// Whether the group levels get varying class slopes.
    pub class_slope: bool,
    /// Whether correlations between the varying effects are modeled.
    /// Only meaningful when more than one effect varies.
    pub correlated: bool,
}

impl RandomTerm {
    /// A varying intercept over `group`, correlations modeled.
    #[must_use]
    pub fn intercept(group: GroupField) -> Self {
        Self {
            group,
            intercept: true,
            class_slope: false,
            correlated: true,
        }
    }

    /// Adds varying class slopes.
    #[must_use]
    pub fn with_class_slope(mut self) -> Self {
        self.class_slope = true;
        self
    }

    /// Drops the modeled correlation between varying effects.
    #[must_use]
    pub fn uncorrelated(mut self) -> Self {
        self.correlated = false;
        self
    }
}

impl fmt::Display for RandomTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lhs = match (self.intercept, self.class_slope) {
            (true, true) => "1 + class",
            (true, false) => "1",
            (false, true) => "0 + class",
            (false, false) => "0",
        };
        let bar = if self.correlated { "|" } else { "||" };
        write!(f, "({lhs} {bar} {})", self.group.name())
    }
}

/// Declarative model structure for the accuracy outcome.
///
/// # Examples
///
/// ```
/// use inferir::model::{ModelFormula, RandomTerm};
/// use inferir::summary::GroupField;
///
/// let formula = ModelFormula::new()
///     .with_class_effect()
///     .with_random(RandomTerm::intercept(GroupField::Region).with_class_slope())
///     .with_random(RandomTerm::intercept(GroupField::Participant));
///
/// assert_eq!(
///     formula.to_string(),
///     "value ~ 1 + class + (1 + class | region) + (1 | participant)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFormula {
    /// Whether a population-level intercept is included.
    pub intercept: bool,
    /// Whether class indicator variables enter as fixed effects.
    pub class_effect: bool,
    /// Random-effect terms, at most one per grouping field.
    pub random: Vec<RandomTerm>,
}

impl ModelFormula {
    /// The intercept-only null model.
    #[must_use]
    pub fn new() -> Self {
        Self {
            intercept: true,
            class_effect: false,
            random: Vec::new(),
        }
    }

    /// Adds class indicators as fixed effects.
    #[must_use]
    pub fn with_class_effect(mut self) -> Self {
        self.class_effect = true;
        self
    }

    /// Drops the population-level intercept.
    #[must_use]
    pub fn without_intercept(mut self) -> Self {
        self.intercept = false;
        self
    }

    /// Adds a random-effect term.
    #[must_use]
    pub fn with_random(mut self, term: RandomTerm) -> Self {
        self.random.push(term);
        self
    }

    /// The outcome column name.
    #[must_use]
    pub fn outcome(&self) -> &'static str {
        "value"
    }

    /// Validates the structure.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the model has no terms at all, if a
    /// grouping field appears in more than one random term, or if a
    /// random term varies nothing.
    pub fn validate(&self) -> Result<()> {
        if !self.intercept && !self.class_effect && self.random.is_empty() {
            return Err(InferirError::InvalidConfig {
                param: "formula".to_string(),
                value: self.to_string(),
                constraint: "at least one model term".to_string(),
            });
        }
        for (i, term) in self.random.iter().enumerate() {
            if !term.intercept && !term.class_slope {
                return Err(InferirError::InvalidConfig {
                    param: "random".to_string(),
                    value: term.to_string(),
                    constraint: "a varying intercept or slope".to_string(),
                });
            }
            if self.random[..i].iter().any(|t| t.group == term.group) {
                return Err(InferirError::InvalidConfig {
                    param: "random".to_string(),
                    value: term.group.name().to_string(),
                    constraint: "at most one random term per grouping field".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for ModelFormula {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ModelFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~", self.outcome())?;
        let mut first = true;
        if self.intercept {
            write!(f, " 1")?;
            first = false;
        }
        if self.class_effect {
            if first {
                write!(f, " 0 + class")?;
            } else {
                write!(f, " + class")?;
            }
            first = false;
        }
        for term in &self.random {
            if first {
                write!(f, " {term}")?;
            } else {
                write!(f, " + {term}")?;
            }
            first = false;
        }
        if first {
            // An empty formula never validates, but Display stays total.
            write!(f, " 0")?;
        }
        Ok(())
    }
}
