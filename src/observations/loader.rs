//! Loader for per-participant result files ("munge").
//!
//! One JSON file per participant, holding exactly 26 wide per-region
//! tables in atlas order:
//!
//! ```json
//! { "regions": [ { "feature1": [1, 0, 1],
//!                  "feature2": [0, 0, 1],
//!                  "object":   [1, 1, 1] },
//!                ... ] }
//! ```
//!
//! Cells are booleans or 0/1 integers. Array length is the trial count,
//! which must be identical across the 26 regions of one file (it may
//! differ between participants).

use super::{Class, Observation, ObservationTable, ParticipantId, TrialId};
use crate::atlas::Region;
use crate::error::{InferirError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One participant's raw result file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParticipantRecord {
    /// Exactly 26 per-region tables, position i holding region index i+1.
    pub regions: Vec<RegionRecord>,
}

/// One region's wide table: three class columns, one entry per trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionRecord {
    /// Outcomes for the feature1 classifier.
    pub feature1: Vec<Cell>,
    /// Outcomes for the feature2 classifier.
    pub feature2: Vec<Cell>,
    /// Outcomes for the object classifier.
    pub object: Vec<Cell>,
}

/// A raw outcome cell: source files mix booleans and 0/1 integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Boolean outcome.
    Bool(bool),
    /// Numeric outcome, must be 0 or 1.
    Int(u8),
}

impl Cell {
    fn into_bool(self) -> Result<bool> {
        match self {
            Cell::Bool(b) => Ok(b),
            Cell::Int(0) => Ok(false),
            Cell::Int(1) => Ok(true),
            Cell::Int(n) => Err(InferirError::schema(format!(
                "outcome value {n} is neither boolean nor 0/1"
            ))),
        }
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

/// Reads one result file per participant and reshapes them into a single
/// long-format observation table.
///
/// Participants are numbered by file position (1-based). See the module
/// docs for the on-disk format and [`ObservationTable`] for the row
/// ordering contract.
///
/// # Errors
///
/// * `Io` — a file is unreadable or missing.
/// * `Schema` — a file is not valid JSON for the expected layout, a
///   class column is missing, the region count is not 26, a region
///   table is ragged, or trial counts differ across regions.
///
/// # Examples
///
/// ```no_run
/// use inferir::observations::load_participants;
///
/// let table = load_participants(&["sub01.json", "sub02.json"]).unwrap();
/// assert_eq!(table.n_rows() % (26 * 3), 0);
/// ```
pub fn load_participants<P: AsRef<Path>>(paths: &[P]) -> Result<ObservationTable> {
    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        let raw = fs::read_to_string(path.as_ref())?;
        let record: ParticipantRecord = serde_json::from_str(&raw).map_err(|e| {
            InferirError::schema(format!(
                "{}: {e}",
                path.as_ref().display()
            ))
        })?;
        records.push(record);
    }
    ObservationTable::from_records(&records)
}

/// Un-pivots one participant record into long-format rows.
///
/// Emits rows region-major, then trial, then class, matching the table
/// ordering contract.
pub(super) fn reshape_record(
    participant: ParticipantId,
    record: &ParticipantRecord,
    rows: &mut Vec<Observation>,
) -> Result<()> {
    if record.regions.len() != Region::ALL.len() {
        return Err(InferirError::schema(format!(
            "participant {participant}: expected 26 regions, found {} \
             (region index outside 1..=26)",
            record.regions.len()
        )));
    }

    let n_trials = record.regions[0].feature1.len();

    for (pos, region_record) in record.regions.iter().enumerate() {
        let region = Region::from_index(pos + 1)?;

        let columns = [
            (Class::Feature1, &region_record.feature1),
            (Class::Feature2, &region_record.feature2),
            (Class::Object, &region_record.object),
        ];

        for (class, column) in &columns {
            if column.len() != n_trials {
                return Err(InferirError::schema(format!(
                    "participant {participant}, region {region}: \
                     inconsistent trial count across regions \
                     ({} entries in {class}, expected {n_trials})",
                    column.len()
                )));
            }
        }

        for trial_idx in 0..n_trials {
            for (class, column) in &columns {
                rows.push(Observation {
                    participant,
                    region,
                    class: *class,
                    trial: TrialId(trial_idx as u32 + 1),
                    value: column[trial_idx].into_bool()?,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region_record(n_trials: usize) -> RegionRecord {
        RegionRecord {
            feature1: vec![Cell::Int(1); n_trials],
            feature2: vec![Cell::Int(0); n_trials],
            object: vec![Cell::Bool(true); n_trials],
        }
    }

    fn participant_record(n_trials: usize) -> ParticipantRecord {
        ParticipantRecord {
            regions: (0..26).map(|_| region_record(n_trials)).collect(),
        }
    }

    #[test]
    fn test_row_count() {
        // 26 regions x trials x 3 classes per participant.
        let table =
            ObservationTable::from_records(&[participant_record(4), participant_record(7)])
                .expect("valid records");
        assert_eq!(table.n_rows(), 26 * 4 * 3 + 26 * 7 * 3);
    }

    #[test]
    fn test_row_ordering_contract() {
        let table = ObservationTable::from_records(&[participant_record(2)])
            .expect("valid record");

        // Region-major, then trial, then class.
        let first = table.get(0).expect("row 0");
        assert_eq!(first.region, Region::V1v);
        assert_eq!(first.trial, TrialId(1));
        assert_eq!(first.class, Class::Feature1);

        let second = table.get(1).expect("row 1");
        assert_eq!(second.class, Class::Feature2);

        let fourth = table.get(3).expect("row 3");
        assert_eq!(fourth.trial, TrialId(2));
        assert_eq!(fourth.class, Class::Feature1);

        let next_region = table.get(6).expect("row 6");
        assert_eq!(next_region.region, Region::V1d);
        assert_eq!(next_region.trial, TrialId(1));
    }

    #[test]
    fn test_values_keep_their_class() {
        // feature1 is all-correct, feature2 all-wrong in the fixture; a
        // value must never end up under a different class's label.
        let table = ObservationTable::from_records(&[participant_record(3)])
            .expect("valid record");
        for row in table.iter() {
            match row.class {
                Class::Feature1 | Class::Object => assert!(row.value),
                Class::Feature2 => assert!(!row.value),
            }
        }
    }

    #[test]
    fn test_wrong_region_count() {
        let record = ParticipantRecord {
            regions: (0..25).map(|_| region_record(2)).collect(),
        };
        let err =
            ObservationTable::from_records(&[record]).expect_err("25 regions is malformed");
        assert!(err.to_string().contains("expected 26 regions"));
    }

    #[test]
    fn test_inconsistent_trial_count() {
        let mut record = participant_record(4);
        record.regions[13] = region_record(5);
        let err = ObservationTable::from_records(&[record])
            .expect_err("ragged trial counts across regions");
        assert!(err.to_string().contains("inconsistent trial count"));
    }

    #[test]
    fn test_ragged_region_table() {
        let mut record = participant_record(4);
        record.regions[0].object.pop();
        let err = ObservationTable::from_records(&[record]).expect_err("ragged columns");
        assert!(err.to_string().contains("inconsistent trial count"));
    }

    #[test]
    fn test_non_binary_cell() {
        let mut record = participant_record(2);
        record.regions[0].feature1[0] = Cell::Int(3);
        let err = ObservationTable::from_records(&[record]).expect_err("3 is not an outcome");
        assert!(err.to_string().contains("neither boolean nor 0/1"));
    }

    #[test]
    fn test_missing_class_column_is_schema_error() {
        let json = r#"{ "regions": [ { "feature1": [1], "feature2": [0] } ] }"#;
        let parsed: std::result::Result<ParticipantRecord, _> = serde_json::from_str(json);
        assert!(parsed.is_err(), "object column is required");
    }

    #[test]
    fn test_round_trip_wide() {
        let mut record = participant_record(3);
        record.regions[6] = RegionRecord {
            feature1: vec![Cell::Int(1), Cell::Int(0), Cell::Int(1)],
            feature2: vec![Cell::Int(0), Cell::Int(0), Cell::Int(1)],
            object: vec![Cell::Int(1), Cell::Int(1), Cell::Int(0)],
        };
        let table =
            ObservationTable::from_records(&[record]).expect("valid record");

        let wide = table
            .to_wide(ParticipantId(1), Region::HV4)
            .expect("group exists");
        assert_eq!(wide.feature1, vec![true, false, true]);
        assert_eq!(wide.feature2, vec![false, false, true]);
        assert_eq!(wide.object, vec![true, true, false]);
        assert_eq!(wide.trials, vec![TrialId(1), TrialId(2), TrialId(3)]);
    }
}
