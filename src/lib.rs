//! Inferir: Bayesian hierarchical analysis of ROI classification accuracy.
//!
//! Inferir loads per-participant neuroimaging classification results,
//! reshapes them into a long-format table of boolean outcomes keyed by
//! (participant, region, class, trial), describes hierarchical logistic
//! models over that table declaratively, and summarizes the posterior
//! draws an external sampler returns into per-group credible intervals.
//!
//! The sampler itself is an external collaborator behind the
//! [`model::Sampler`] trait; this crate owns everything around it —
//! data munging, model/prior specification, draw summarization, and
//! cross-validation model ranking.
//!
//! # Quick Start
//!
//! ```
//! use inferir::prelude::*;
//! use inferir::synthetic::{accuracy_records, posterior_draws, SyntheticConfig};
//!
//! // Two synthetic participants, 10 trials per region.
//! let records = accuracy_records(&SyntheticConfig::default());
//! let table = ObservationTable::from_records(&records).unwrap();
//! assert_eq!(table.n_rows(), 2 * 26 * 10 * 3);
//!
//! // Describe the model an external sampler would fit.
//! let spec = ModelSpec::new(
//!     ModelFormula::new()
//!         .with_class_effect()
//!         .with_random(RandomTerm::intercept(GroupField::Region).with_class_slope()),
//! );
//! assert!(spec.validate().is_ok());
//!
//! // Summarize (here: fake) per-observation posterior draws by region.
//! let draws = posterior_draws(&table, 100, 0).unwrap();
//! let intervals = summarize(&draws, &table, Grouping::none().by_region()).unwrap();
//! assert_eq!(intervals.len(), 26);
//! ```
//!
//! # Modules
//!
//! - [`atlas`]: The fixed 26-region vocabulary
//! - [`observations`]: Long-format observation table and the file loader
//! - [`primitives`]: Core Vector and Matrix types
//! - [`stats`]: Descriptive statistics (R-7 quantiles)
//! - [`summary`]: Posterior-draw summarization into credible intervals
//! - [`model`]: Formula/prior/sampler interface to the fitting backend
//! - [`synthetic`]: Seeded synthetic datasets and fake posterior draws
//! - [`error`]: Error types
//! - [`prelude`]: Convenience re-exports

pub mod atlas;
pub mod error;
pub mod model;
pub mod observations;
pub mod prelude;
pub mod primitives;
pub mod stats;
pub mod summary;
pub mod synthetic;
