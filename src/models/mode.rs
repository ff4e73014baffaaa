//! Pairing modes and their PubMed field options.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default proximity distance (maximum number of words between the two terms)
pub const DEFAULT_PROXIMITY_DISTANCE: u32 = 2;

/// Field a proximity phrase is restricted to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProximityField {
    /// Title only
    #[serde(rename = "ti")]
    Title,
    /// Title and abstract
    #[default]
    #[serde(rename = "tiab")]
    TitleAbstract,
    /// Author affiliation
    #[serde(rename = "ad")]
    Affiliation,
}

impl ProximityField {
    /// All proximity fields, in display order
    pub const ALL: [ProximityField; 3] = [
        ProximityField::Title,
        ProximityField::TitleAbstract,
        ProximityField::Affiliation,
    ];

    /// PubMed field tag
    pub fn tag(&self) -> &'static str {
        match self {
            ProximityField::Title => "ti",
            ProximityField::TitleAbstract => "tiab",
            ProximityField::Affiliation => "ad",
        }
    }
}

impl fmt::Display for ProximityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Field each side of an intersection clause is restricted to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntersectionField {
    /// Title only
    #[serde(rename = "ti")]
    Title,
    /// Title and abstract
    #[default]
    #[serde(rename = "tiab")]
    TitleAbstract,
    /// Text words
    #[serde(rename = "tw")]
    TextWord,
    /// All fields
    #[serde(rename = "all")]
    All,
}

impl IntersectionField {
    /// All intersection fields, in display order
    pub const ALL: [IntersectionField; 4] = [
        IntersectionField::Title,
        IntersectionField::TitleAbstract,
        IntersectionField::TextWord,
        IntersectionField::All,
    ];

    /// PubMed field tag
    pub fn tag(&self) -> &'static str {
        match self {
            IntersectionField::Title => "ti",
            IntersectionField::TitleAbstract => "tiab",
            IntersectionField::TextWord => "tw",
            IntersectionField::All => "all",
        }
    }
}

impl fmt::Display for IntersectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// How a pair of terms is combined into one clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PairMode {
    /// `heading/subheading[mh]` pairs of MeSH main headings and subheadings
    MeshSubheading {
        /// Restrict to major topics (`majr`) instead of any mention (`mh`)
        #[serde(default)]
        use_major_topic: bool,
        /// Suppress hierarchy explosion (`:noexp`)
        #[serde(default)]
        no_explode: bool,
    },
    /// `"t1 t2"[field:~distance]` proximity phrases
    Proximity {
        #[serde(default)]
        field: ProximityField,
        #[serde(default = "default_distance")]
        distance: u32,
    },
    /// `(t1[field] AND t2[field])` boolean intersections
    Intersection {
        #[serde(default)]
        field: IntersectionField,
    },
}

fn default_distance() -> u32 {
    DEFAULT_PROXIMITY_DISTANCE
}

impl PairMode {
    /// Human-readable name of the mode
    pub fn name(&self) -> &'static str {
        match self {
            PairMode::MeshSubheading { .. } => "MeSH Main/Subheading",
            PairMode::Proximity { .. } => "Proximity",
            PairMode::Intersection { .. } => "Intersection",
        }
    }

    /// Short identifier of the mode
    pub fn id(&self) -> &'static str {
        match self {
            PairMode::MeshSubheading { .. } => "mesh",
            PairMode::Proximity { .. } => "proximity",
            PairMode::Intersection { .. } => "intersection",
        }
    }
}

impl fmt::Display for PairMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// MeSH field tag for the given options: `mh`, `majr`, `mh:noexp` or `majr:noexp`
pub fn mesh_field_tag(use_major_topic: bool, no_explode: bool) -> String {
    let base = if use_major_topic { "majr" } else { "mh" };
    if no_explode {
        format!("{}:noexp", base)
    } else {
        base.to_string()
    }
}
