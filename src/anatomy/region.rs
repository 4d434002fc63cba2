//! Fixed table of anatomical regions and their identities
//!
//! Each region carries a stable integer id, a long display name, a short name used to
//! resolve mask files and a display color. The set is closed: every lookup either finds
//! exactly one region or fails with [`AnalysisError::UnknownRegion`].

use crate::io::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Anatomical zone a region mask covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Central abdomen including bowel resection
    CentralAndBowel,
    /// Left upper quadrant
    LeftUpperQuadrant,
    /// Upper right quadrant
    UpperRightQuadrant,
    /// Left flank including bowel resection
    LeftFlankAndBowel,
    /// Right flank including bowel resection
    RightFlankAndBowel,
    /// Small bowel
    SmallBowel,
    /// Pelvic region
    PelvicRegion,
}

impl Region {
    /// All regions in id order
    pub const ALL: [Self; 7] = [
        Self::CentralAndBowel,
        Self::LeftUpperQuadrant,
        Self::UpperRightQuadrant,
        Self::LeftFlankAndBowel,
        Self::RightFlankAndBowel,
        Self::SmallBowel,
        Self::PelvicRegion,
    ];

    /// Stable integer identifier
    pub const fn id(self) -> u8 {
        match self {
            Self::CentralAndBowel => 0,
            Self::LeftUpperQuadrant => 1,
            Self::UpperRightQuadrant => 2,
            Self::LeftFlankAndBowel => 3,
            Self::RightFlankAndBowel => 4,
            Self::SmallBowel => 5,
            Self::PelvicRegion => 6,
        }
    }

    /// Human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::CentralAndBowel => "Central and Bowel Resection (BR)",
            Self::LeftUpperQuadrant => "Left Upper Quadrant (LUQ)",
            Self::UpperRightQuadrant => "Upper Right Quadrant (URQ)",
            Self::LeftFlankAndBowel => "Left Flank and Bowel Resection (BR)",
            Self::RightFlankAndBowel => "Right Flank and Bowel Resection",
            Self::SmallBowel => "Small bowel",
            Self::PelvicRegion => "Pelvic Region",
        }
    }

    /// Name matched against mask file names
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::CentralAndBowel => "central_quadrant",
            Self::LeftUpperQuadrant => "left_upper_quadrant",
            Self::UpperRightQuadrant => "upper_right_quadrant",
            Self::LeftFlankAndBowel => "left_flank_quadrant",
            Self::RightFlankAndBowel => "right_flank_quadrant",
            Self::SmallBowel => "small_bowel_quadrant",
            Self::PelvicRegion => "pelvic_region_quadrant",
        }
    }

    /// Display color as RGB
    pub const fn color(self) -> [u8; 3] {
        match self {
            Self::CentralAndBowel => [0x66, 0xc2, 0xa5],
            Self::LeftUpperQuadrant => [0xfc, 0x8d, 0x62],
            Self::UpperRightQuadrant => [0x8d, 0xa0, 0xcb],
            Self::LeftFlankAndBowel => [0xe7, 0x8a, 0xc3],
            Self::RightFlankAndBowel => [0xa6, 0xd8, 0x54],
            Self::SmallBowel => [0xff, 0xd9, 0x2f],
            Self::PelvicRegion => [0xe5, 0xc4, 0x94],
        }
    }

    /// Display color as a `#rrggbb` string
    pub fn color_hex(self) -> String {
        let [r, g, b] = self.color();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Resolve a region from its integer identifier
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::UnknownRegion`] if no region has this id
    pub fn from_id(id: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|region| region.id() == id)
            .ok_or_else(|| AnalysisError::UnknownRegion {
                identifier: id.to_string(),
            })
    }

    /// Resolve a region from its short name
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::UnknownRegion`] if no region has this short name
    pub fn from_short_name(short_name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|region| region.short_name() == short_name)
            .ok_or_else(|| AnalysisError::UnknownRegion {
                identifier: short_name.to_string(),
            })
    }

    /// Resolve the region a mask file belongs to
    ///
    /// The base name before the first `.` is matched, so compound extensions such as
    /// `pelvic_region_quadrant.seg.nrrd` resolve the same way as `pelvic_region_quadrant.npy`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::UnknownRegion`] carrying the file path if the base name
    /// matches no region or the path has no valid UTF-8 file name
    pub fn from_file_name(path: &Path) -> Result<Self> {
        let unknown = || AnalysisError::UnknownRegion {
            identifier: path.display().to_string(),
        };

        let file_name = path.file_name().and_then(|n| n.to_str()).ok_or_else(unknown)?;
        let base_name = file_name.split('.').next().unwrap_or(file_name);

        Self::from_short_name(base_name).map_err(|_unmatched| unknown())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = AnalysisError;

    /// Accepts either a short name or a numeric id
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.parse::<u8>() {
            Ok(id) => Self::from_id(id),
            Err(_not_numeric) => Self::from_short_name(trimmed),
        }
    }
}
