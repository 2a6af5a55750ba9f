//! Posterior summarization ("get predictions").
//!
//! Joins per-observation posterior draws back to their originating
//! (participant, region, class, trial) metadata by position, pools the
//! drawn values within caller-chosen groups, and reports the empirical
//! 2.5/97.5 percentile interval per group.
//!
//! Omitted grouping fields are marginalized by pooling: all matching
//! (draw, observation) values are flattened into one set before the
//! quantiles are taken. Quantiles of pooled draws, never averages of
//! per-level quantiles.

use crate::atlas::Region;
use crate::error::{InferirError, Result};
use crate::observations::{Class, ObservationTable, ParticipantId, TrialId};
use crate::primitives::{Matrix, Vector};
use crate::stats::DescriptiveStats;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lower quantile of the reported credible interval.
pub const INTERVAL_LOWER: f64 = 0.025;
/// Upper quantile of the reported credible interval.
pub const INTERVAL_UPPER: f64 = 0.975;

/// Minimum pooled draws per group for the 2.5/97.5 percentile estimates
/// to have usable resolution; smaller groups are flagged by
/// [`low_resolution`].
pub const MIN_POOLED_DRAWS: usize = 40;

/// A field of the observation table that summaries can group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupField {
    /// Group by anatomical region.
    Region,
    /// Group by stimulus class.
    Class,
    /// Group by participant.
    Participant,
    /// Group by trial index.
    Trial,
}

/// The set of fields a summary groups by.
///
/// An explicit enumerated set rather than free-form column names: an
/// omitted field is marginalized over (its draws are pooled), a present
/// field splits groups.
///
/// # Examples
///
/// ```
/// use inferir::summary::Grouping;
///
/// let by_region_class = Grouping::none().by_region().by_class();
/// assert!(!by_region_class.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grouping {
    region: bool,
    class: bool,
    participant: bool,
    trial: bool,
}

impl Grouping {
    /// The empty grouping: everything pooled into one group.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Adds region to the grouping.
    #[must_use]
    pub fn by_region(mut self) -> Self {
        self.region = true;
        self
    }

    /// Adds class to the grouping.
    #[must_use]
    pub fn by_class(mut self) -> Self {
        self.class = true;
        self
    }

    /// Adds participant to the grouping.
    #[must_use]
    pub fn by_participant(mut self) -> Self {
        self.participant = true;
        self
    }

    /// Adds trial to the grouping.
    #[must_use]
    pub fn by_trial(mut self) -> Self {
        self.trial = true;
        self
    }

    /// Builds a grouping from an explicit field list.
    #[must_use]
    pub fn from_fields(fields: &[GroupField]) -> Self {
        let mut grouping = Self::none();
        for field in fields {
            grouping = match field {
                GroupField::Region => grouping.by_region(),
                GroupField::Class => grouping.by_class(),
                GroupField::Participant => grouping.by_participant(),
                GroupField::Trial => grouping.by_trial(),
            };
        }
        grouping
    }

    /// Returns true if no field is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.region || self.class || self.participant || self.trial)
    }
}

/// The group key carried by each summary row. Fields omitted from the
/// grouping are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    /// Region, when grouped by region.
    pub region: Option<Region>,
    /// Class, when grouped by class.
    pub class: Option<Class>,
    /// Participant, when grouped by participant.
    pub participant: Option<ParticipantId>,
    /// Trial, when grouped by trial.
    pub trial: Option<TrialId>,
}

/// One summary row: a group key with its pooled 2.5/97.5 percentile
/// interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Grouping fields for this row.
    pub key: GroupKey,
    /// 2.5th percentile of the pooled draws.
    pub ymin: f32,
    /// 97.5th percentile of the pooled draws.
    pub ymax: f32,
    /// Number of pooled (draw, observation) values behind the interval.
    pub n_pooled: usize,
}

impl GroupSummary {
    /// True when the group pooled fewer than [`MIN_POOLED_DRAWS`] values.
    #[must_use]
    pub fn is_low_resolution(&self) -> bool {
        self.n_pooled < MIN_POOLED_DRAWS
    }
}

/// Summarizes per-observation posterior draws into per-group credible
/// intervals.
///
/// `draws` has shape `[n_draws × n_observations]`; column i corresponds
/// to row i of `table` (the positional-correspondence contract — both
/// must share the ordering the loader produced). The original boolean
/// outcome is dropped; the drawn value supersedes it here.
///
/// Output rows are sorted by key: atlas order for regions, column order
/// for classes, then participant and trial.
///
/// # Errors
///
/// * `Shape` — `draws.n_cols() != table.n_rows()`.
/// * `Other` — the table or the draw matrix is empty.
///
/// # Examples
///
/// ```
/// use inferir::observations::{Class, Observation, ObservationTable, ParticipantId, TrialId};
/// use inferir::atlas::Region;
/// use inferir::primitives::Matrix;
/// use inferir::summary::{summarize, Grouping};
///
/// let table = ObservationTable::from_rows(vec![Observation {
///     participant: ParticipantId(1),
///     region: Region::V1v,
///     class: Class::Object,
///     trial: TrialId(1),
///     value: true,
/// }])
/// .unwrap();
/// let draws = Matrix::from_vec(3, 1, vec![0.2, 0.5, 0.8]).unwrap();
///
/// let rows = summarize(&draws, &table, Grouping::none().by_region()).unwrap();
/// assert_eq!(rows.len(), 1);
/// assert!(rows[0].ymin <= rows[0].ymax);
/// ```
pub fn summarize(
    draws: &Matrix<f32>,
    table: &ObservationTable,
    grouping: Grouping,
) -> Result<Vec<GroupSummary>> {
    if draws.n_cols() != table.n_rows() {
        return Err(InferirError::shape(
            format!("{} draw columns (one per observation)", table.n_rows()),
            format!("{}", draws.n_cols()),
        ));
    }
    if table.is_empty() {
        return Err(InferirError::empty_input("observation table"));
    }
    if draws.n_rows() == 0 {
        return Err(InferirError::empty_input("posterior draws"));
    }

    // Key each observation once; draw columns inherit the key by position.
    let keys: Vec<GroupKey> = table
        .iter()
        .map(|obs| GroupKey {
            region: grouping.region.then_some(obs.region),
            class: grouping.class.then_some(obs.class),
            participant: grouping.participant.then_some(obs.participant),
            trial: grouping.trial.then_some(obs.trial),
        })
        .collect();

    let mut pools: HashMap<GroupKey, Vec<f32>> = HashMap::new();
    for draw_idx in 0..draws.n_rows() {
        for (obs_idx, key) in keys.iter().enumerate() {
            pools
                .entry(*key)
                .or_default()
                .push(draws.get(draw_idx, obs_idx));
        }
    }

    let mut rows = Vec::with_capacity(pools.len());
    for (key, pool) in pools {
        let n_pooled = pool.len();
        let pooled = Vector::from_vec(pool);
        let bounds =
            DescriptiveStats::new(&pooled).quantiles(&[INTERVAL_LOWER, INTERVAL_UPPER])?;
        rows.push(GroupSummary {
            key,
            ymin: bounds[0],
            ymax: bounds[1],
            n_pooled,
        });
    }

    rows.sort_by_key(|row| row.key);
    Ok(rows)
}

/// Returns the summary rows whose pooled draw count is below
/// [`MIN_POOLED_DRAWS`].
///
/// Not a hard error: narrow pools still produce intervals, they just
/// lack resolution at the 2.5/97.5 percentiles.
#[must_use]
pub fn low_resolution(rows: &[GroupSummary]) -> Vec<&GroupSummary> {
    rows.iter().filter(|r| r.is_low_resolution()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observations::Observation;

    fn obs(p: u32, region: Region, class: Class, t: u32) -> Observation {
        Observation {
            participant: ParticipantId(p),
            region,
            class,
            trial: TrialId(t),
            value: true,
        }
    }

    /// Two participants, two regions, one trial each; draws pooled by
    /// region must flatten across participants and draws.
    fn worked_example() -> (Matrix<f32>, ObservationTable) {
        let table = ObservationTable::from_rows(vec![
            obs(1, Region::V1v, Class::Object, 1),
            obs(2, Region::V1v, Class::Object, 1),
            obs(1, Region::V1d, Class::Object, 1),
            obs(2, Region::V1d, Class::Object, 1),
        ])
        .expect("distinct keys");
        let draws = Matrix::from_rows(&[vec![1.0, 0.0, 1.0, 1.0], vec![0.0, 0.0, 1.0, 1.0]])
            .expect("rectangular");
        (draws, table)
    }

    #[test]
    fn test_group_by_region_pools_participants_and_draws() {
        let (draws, table) = worked_example();
        let rows =
            summarize(&draws, &table, Grouping::none().by_region()).expect("shapes match");
        assert_eq!(rows.len(), 2);

        // V1v pools {1, 0, 0, 0}: interval spans the pooled spread.
        let v1v = &rows[0];
        assert_eq!(v1v.key.region, Some(Region::V1v));
        assert_eq!(v1v.n_pooled, 4);
        assert_eq!(v1v.ymin, 0.0);
        assert!((v1v.ymax - 0.925).abs() < 1e-6);

        // V1d is all ones in both draws: degenerate interval at 1.
        let v1d = &rows[1];
        assert_eq!(v1d.key.region, Some(Region::V1d));
        assert_eq!(v1d.ymin, 1.0);
        assert_eq!(v1d.ymax, 1.0);
    }

    #[test]
    fn test_pooling_is_not_average_of_per_level_quantiles() {
        let (draws, table) = worked_example();

        // Per-participant V1v pools are {1,0} and {0,0}; averaging their
        // upper quantiles cannot reproduce the pooled interval.
        let pooled =
            summarize(&draws, &table, Grouping::none().by_region()).expect("shapes match");
        let split = summarize(
            &draws,
            &table,
            Grouping::none().by_region().by_participant(),
        )
        .expect("shapes match");

        let v1v_pooled = &pooled[0];
        let per_level_avg_max: f32 = split
            .iter()
            .filter(|r| r.key.region == Some(Region::V1v))
            .map(|r| r.ymax)
            .sum::<f32>()
            / 2.0;
        assert!((v1v_pooled.ymax - per_level_avg_max).abs() > 0.1);
    }

    #[test]
    fn test_bounds_ordered_and_within_draw_range() {
        let (draws, table) = worked_example();
        for grouping in [
            Grouping::none(),
            Grouping::none().by_region(),
            Grouping::none().by_class().by_participant(),
            Grouping::none().by_region().by_class().by_participant().by_trial(),
        ] {
            let rows = summarize(&draws, &table, grouping).expect("shapes match");
            for row in rows {
                assert!(row.ymin <= row.ymax);
                assert!((0.0..=1.0).contains(&row.ymin));
                assert!((0.0..=1.0).contains(&row.ymax));
            }
        }
    }

    #[test]
    fn test_empty_grouping_pools_everything() {
        let (draws, table) = worked_example();
        let rows = summarize(&draws, &table, Grouping::none()).expect("shapes match");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].n_pooled, 8);
        assert_eq!(rows[0].key.region, None);
        assert_eq!(rows[0].key.class, None);
    }

    #[test]
    fn test_shape_mismatch() {
        let (_, table) = worked_example();
        let draws = Matrix::from_rows(&[vec![1.0, 0.0, 1.0, 1.0, 0.0]]).expect("rectangular");
        let err = summarize(&draws, &table, Grouping::none().by_region())
            .expect_err("5 columns against 4 rows");
        assert!(matches!(err, InferirError::Shape { .. }));
        assert!(err.to_string().contains("Shape mismatch"));
    }

    #[test]
    fn test_empty_draws() {
        let (_, table) = worked_example();
        let draws = Matrix::from_vec(0, 4, vec![]).expect("0x4 is consistent");
        assert!(summarize(&draws, &table, Grouping::none()).is_err());
    }

    #[test]
    fn test_low_resolution_flagging() {
        let (draws, table) = worked_example();
        // 2 draws x 2 observations per region = 4 pooled values, far
        // below the 40-draw resolution floor.
        let rows =
            summarize(&draws, &table, Grouping::none().by_region()).expect("shapes match");
        let flagged = low_resolution(&rows);
        assert_eq!(flagged.len(), 2);

        // 40 draws over 2 pooled observations clears the floor.
        let many = Matrix::from_vec(40, 4, vec![0.5; 160]).expect("consistent");
        let rows = summarize(&many, &table, Grouping::none().by_region()).expect("shapes");
        assert!(low_resolution(&rows).is_empty());
    }

    #[test]
    fn test_output_sorted_by_key() {
        let (draws, table) = worked_example();
        let rows = summarize(
            &draws,
            &table,
            Grouping::none().by_region().by_participant(),
        )
        .expect("shapes match");
        let keys: Vec<_> = rows.iter().map(|r| r.key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(rows[0].key.region, Some(Region::V1v));
    }

    #[test]
    fn test_from_fields_matches_builders() {
        let built = Grouping::none().by_region().by_trial();
        let listed = Grouping::from_fields(&[GroupField::Region, GroupField::Trial]);
        assert_eq!(built, listed);
        assert!(Grouping::from_fields(&[]).is_empty());
    }
}
