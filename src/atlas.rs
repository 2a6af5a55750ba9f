//! Fixed vocabulary of anatomical regions of interest.
//!
//! Classification accuracy is measured in 26 predefined visual and
//! medial-temporal regions. The source files encode a region only as a
//! 1-based position in this list, so both the ordering and the labels
//! are load-bearing: position 7 is always hV4, position 26 is always HC.

use crate::error::{InferirError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the 26 anatomical regions, in fixed atlas order.
///
/// The declaration order matches the source encoding (1-based index) and
/// the conventional display order; `Ord` follows it, so sorting summaries
/// by region reproduces the atlas layout.
///
/// # Examples
///
/// ```
/// use inferir::atlas::Region;
///
/// assert_eq!(Region::from_index(1).unwrap(), Region::V1v);
/// assert_eq!(Region::from_index(26).unwrap(), Region::HC);
/// assert_eq!(Region::HV4.label(), "hV4");
/// assert!(Region::from_index(27).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    V1v,
    V1d,
    V2v,
    V2d,
    V3v,
    V3d,
    #[serde(rename = "hV4")]
    HV4,
    VO1,
    VO2,
    PHC12,
    TO2,
    TO1,
    LO2,
    LO1,
    V3AB,
    IPS0,
    IPS1,
    IPS2,
    IPS3,
    IPS4,
    IPS5,
    SPL1,
    FEF,
    PHC,
    PRC,
    HC,
}

impl Region {
    /// All 26 regions in atlas order.
    pub const ALL: [Region; 26] = [
        Region::V1v,
        Region::V1d,
        Region::V2v,
        Region::V2d,
        Region::V3v,
        Region::V3d,
        Region::HV4,
        Region::VO1,
        Region::VO2,
        Region::PHC12,
        Region::TO2,
        Region::TO1,
        Region::LO2,
        Region::LO1,
        Region::V3AB,
        Region::IPS0,
        Region::IPS1,
        Region::IPS2,
        Region::IPS3,
        Region::IPS4,
        Region::IPS5,
        Region::SPL1,
        Region::FEF,
        Region::PHC,
        Region::PRC,
        Region::HC,
    ];

    /// Maps a 1-based source index to its region.
    ///
    /// # Errors
    ///
    /// Returns a `Schema` error for indices outside 1..=26.
    pub fn from_index(index: usize) -> Result<Self> {
        if index == 0 || index > Self::ALL.len() {
            return Err(InferirError::schema(format!(
                "region index {index} outside 1..=26"
            )));
        }
        Ok(Self::ALL[index - 1])
    }

    /// Returns the 1-based source index of this region.
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|&r| r == self)
            .map(|p| p + 1)
            .unwrap_or(0)
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Region::V1v => "V1v",
            Region::V1d => "V1d",
            Region::V2v => "V2v",
            Region::V2d => "V2d",
            Region::V3v => "V3v",
            Region::V3d => "V3d",
            Region::HV4 => "hV4",
            Region::VO1 => "VO1",
            Region::VO2 => "VO2",
            Region::PHC12 => "PHC12",
            Region::TO2 => "TO2",
            Region::TO1 => "TO1",
            Region::LO2 => "LO2",
            Region::LO1 => "LO1",
            Region::V3AB => "V3AB",
            Region::IPS0 => "IPS0",
            Region::IPS1 => "IPS1",
            Region::IPS2 => "IPS2",
            Region::IPS3 => "IPS3",
            Region::IPS4 => "IPS4",
            Region::IPS5 => "IPS5",
            Region::SPL1 => "SPL1",
            Region::FEF => "FEF",
            Region::PHC => "PHC",
            Region::PRC => "PRC",
            Region::HC => "HC",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_index_round_trip() {
        for i in 1..=26 {
            let region = Region::from_index(i).expect("index in range");
            assert_eq!(region.index(), i);
        }
    }

    #[test]
    fn test_from_index_injective() {
        let labels: HashSet<&str> = (1..=26)
            .map(|i| Region::from_index(i).expect("index in range").label())
            .collect();
        assert_eq!(labels.len(), 26, "distinct indices must not collapse");
    }

    #[test]
    fn test_from_index_out_of_range() {
        assert!(Region::from_index(0).is_err());
        assert!(Region::from_index(27).is_err());

        let err = Region::from_index(27).expect_err("out of range");
        assert!(err.to_string().contains("region index 27"));
    }

    #[test]
    fn test_atlas_order() {
        assert_eq!(Region::ALL[0], Region::V1v);
        assert_eq!(Region::ALL[6], Region::HV4);
        assert_eq!(Region::ALL[25], Region::HC);
        assert!(Region::V1v < Region::HC);
    }

    #[test]
    fn test_display_label() {
        assert_eq!(Region::HV4.to_string(), "hV4");
        assert_eq!(Region::PHC12.to_string(), "PHC12");
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&Region::HV4).expect("serializes");
        assert_eq!(json, "\"hV4\"");
        let back: Region = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, Region::HV4);
    }
}
