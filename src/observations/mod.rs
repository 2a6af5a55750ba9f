//! Long-format classification-accuracy observations.
//!
//! The unit of analysis is one trial's classification outcome for one
//! region and one stimulus class within one participant. Source files
//! store these as wide per-region tables (one column per class); this
//! module holds the un-pivoted long form that the modeling and
//! summarization layers consume, plus the loader that produces it.
//!
//! # Examples
//!
//! ```
//! use inferir::observations::{Class, Observation, ObservationTable, ParticipantId, TrialId};
//! use inferir::atlas::Region;
//!
//! let table = ObservationTable::from_rows(vec![Observation {
//!     participant: ParticipantId(1),
//!     region: Region::V1v,
//!     class: Class::Object,
//!     trial: TrialId(1),
//!     value: true,
//! }])
//! .unwrap();
//! assert_eq!(table.n_rows(), 1);
//! ```

mod loader;

pub use loader::{load_participants, Cell, ParticipantRecord, RegionRecord};

use crate::atlas::Region;
use crate::error::{InferirError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// The classification target: one of the two stimulus features or the
/// object identity. Declaration order matches the source column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Class {
    Feature1,
    Feature2,
    Object,
}

impl Class {
    /// All classes in source column order.
    pub const ALL: [Class; 3] = [Class::Feature1, Class::Feature2, Class::Object];

    /// Returns the source column name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Class::Feature1 => "feature1",
            Class::Feature2 => "feature2",
            Class::Object => "object",
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 1-based participant identifier, assigned by input-file position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based trial identifier, unique within a (participant, region) group.
/// The same trial index recurs across all 26 regions of one participant
/// (repeated-measures structure).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TrialId(pub u32);

impl fmt::Display for TrialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One trial's classification outcome for one region and class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Participant the trial belongs to.
    pub participant: ParticipantId,
    /// Region the classifier was trained on.
    pub region: Region,
    /// Stimulus class the classifier targeted.
    pub class: Class,
    /// Trial index within the (participant, region) group.
    pub trial: TrialId,
    /// Whether the classifier labeled this trial correctly.
    pub value: bool,
}

impl Observation {
    fn key(&self) -> (ParticipantId, Region, Class, TrialId) {
        (self.participant, self.region, self.class, self.trial)
    }
}

/// Long-format observation table.
///
/// Created once at load time and never mutated. Row order is the
/// positional-correspondence contract with posterior-draw matrices:
/// participants in input order, regions in atlas order, trials ascending,
/// classes in source column order. Column i of a draw matrix always
/// refers to row i of the table it was fitted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationTable {
    rows: Vec<Observation>,
}

impl ObservationTable {
    /// Builds a table from explicit rows, enforcing key uniqueness.
    ///
    /// # Errors
    ///
    /// Returns a `Schema` error if two rows share the same
    /// (participant, region, class, trial) key.
    pub fn from_rows(rows: Vec<Observation>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in &rows {
            if !seen.insert(row.key()) {
                return Err(InferirError::schema(format!(
                    "duplicate observation for participant {}, region {}, class {}, trial {}",
                    row.participant, row.region, row.class, row.trial
                )));
            }
        }
        Ok(Self { rows })
    }

    /// Reshapes in-memory participant records into one long table.
    ///
    /// Participants are numbered by slice position (1-based). Each region
    /// table is un-pivoted: the three class columns become one
    /// (class, value) pair per row, tripling the row count.
    ///
    /// # Errors
    ///
    /// Returns a `Schema` error if a record does not have exactly 26
    /// regions, a region table is ragged, or trial counts differ across
    /// regions within one participant.
    pub fn from_records(records: &[ParticipantRecord]) -> Result<Self> {
        let mut rows = Vec::new();
        for (file_pos, record) in records.iter().enumerate() {
            let participant = ParticipantId(file_pos as u32 + 1);
            loader::reshape_record(participant, record, &mut rows)?;
        }
        // Uniqueness holds by construction, but loading is one-shot and
        // cheap relative to the fit, so keep the check on.
        Self::from_rows(rows)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the row at `idx`, if present.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&Observation> {
        self.rows.get(idx)
    }

    /// Returns an iterator over the rows in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.rows.iter()
    }

    /// Returns the distinct participants in first-appearance order.
    #[must_use]
    pub fn participants(&self) -> Vec<ParticipantId> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for row in &self.rows {
            if seen.insert(row.participant) {
                out.push(row.participant);
            }
        }
        out
    }

    /// Re-pivots one (participant, region) group back to the wide
    /// per-region layout with one row per trial.
    ///
    /// This inverts the un-pivot step of loading and backs the
    /// round-trip sanity check: reshaping never moves a value into a
    /// different class's column.
    ///
    /// # Errors
    ///
    /// Returns a `Schema` error if the group is absent or a trial is
    /// missing one of the three class values.
    pub fn to_wide(&self, participant: ParticipantId, region: Region) -> Result<WideRegionTable> {
        let mut trials: Vec<TrialId> = self
            .rows
            .iter()
            .filter(|r| r.participant == participant && r.region == region)
            .map(|r| r.trial)
            .collect();
        trials.sort_unstable();
        trials.dedup();

        if trials.is_empty() {
            return Err(InferirError::schema(format!(
                "no observations for participant {participant}, region {region}"
            )));
        }

        let mut wide = WideRegionTable {
            trials: trials.clone(),
            feature1: Vec::with_capacity(trials.len()),
            feature2: Vec::with_capacity(trials.len()),
            object: Vec::with_capacity(trials.len()),
        };

        for &trial in &trials {
            for class in Class::ALL {
                let value = self
                    .rows
                    .iter()
                    .find(|r| {
                        r.participant == participant
                            && r.region == region
                            && r.trial == trial
                            && r.class == class
                    })
                    .map(|r| r.value)
                    .ok_or_else(|| {
                        InferirError::schema(format!(
                            "missing {class} value for participant {participant}, \
                             region {region}, trial {trial}"
                        ))
                    })?;
                match class {
                    Class::Feature1 => wide.feature1.push(value),
                    Class::Feature2 => wide.feature2.push(value),
                    Class::Object => wide.object.push(value),
                }
            }
        }

        Ok(wide)
    }
}

/// Wide per-region layout: one row per trial, one column per class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideRegionTable {
    /// Trial identifiers, ascending.
    pub trials: Vec<TrialId>,
    /// Outcomes for the feature1 classifier.
    pub feature1: Vec<bool>,
    /// Outcomes for the feature2 classifier.
    pub feature2: Vec<bool>,
    /// Outcomes for the object classifier.
    pub object: Vec<bool>,
}
