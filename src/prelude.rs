//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use inferir::prelude::*;
//! ```

pub use crate::atlas::Region;
pub use crate::error::{InferirError, Result};
pub use crate::model::{
    compare, ConvergenceWarning, CvCriterion, FitDiagnostics, FittedModel, ModelFormula,
    ModelSpec, ParameterClass, PosteriorQuery, Prior, PriorSpec, RandomTerm, Sampler,
    SamplerConfig,
};
pub use crate::observations::{
    load_participants, Class, Observation, ObservationTable, ParticipantId, TrialId,
};
pub use crate::primitives::{Matrix, Vector};
pub use crate::summary::{low_resolution, summarize, GroupField, GroupSummary, Grouping};
