//! Multi-mode generation requests.
//!
//! A [`GenerationRequest`] bundles any subset of the three pairing modes, the
//! way a single submission of the search builder does. Generating it composes
//! every requested section whose lists are both non-empty and, when a MeSH
//! string was produced, adds the MeSH + Proximity and MeSH + Intersection
//! unions.
//!
//! # Request File Format
//!
//! Requests are read from TOML (or JSON when the file ends in `.json`). Term
//! lists may be arrays or multi-line strings; blank lines are dropped.
//!
//! ```toml
//! [mesh]
//! headings = """
//! asthenia
//! fatigue
//! """
//! subheadings = ["diagnosis", "epidemiology"]
//! major_topic = false
//! no_explode = false
//!
//! [proximity]
//! topic1 = ["frailty", "sarcopenia"]
//! topic2 = ["scale", "score"]
//! field = "tiab"
//! distance = 4
//!
//! [intersection]
//! topic1 = ["frail*"]
//! topic2 = ["assess*", "measure*"]
//! field = "tw"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{union_results, QueryComposer};
use crate::models::{
    IntersectionField, PairMode, ProximityField, QueryResult, TermList,
    DEFAULT_PROXIMITY_DISTANCE,
};

/// Option values applied when a request section leaves them out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeDefaults {
    #[serde(default)]
    pub major_topic: bool,

    #[serde(default)]
    pub no_explode: bool,

    #[serde(default)]
    pub proximity_field: ProximityField,

    #[serde(default = "default_distance")]
    pub proximity_distance: u32,

    #[serde(default)]
    pub intersection_field: IntersectionField,
}

impl Default for ModeDefaults {
    fn default() -> Self {
        Self {
            major_topic: false,
            no_explode: false,
            proximity_field: ProximityField::default(),
            proximity_distance: DEFAULT_PROXIMITY_DISTANCE,
            intersection_field: IntersectionField::default(),
        }
    }
}

fn default_distance() -> u32 {
    DEFAULT_PROXIMITY_DISTANCE
}

/// MeSH main heading/subheading section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshSection {
    #[serde(default)]
    pub headings: TermList,

    #[serde(default)]
    pub subheadings: TermList,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_topic: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_explode: Option<bool>,
}

impl MeshSection {
    /// Resolve the pairing mode, falling back to `defaults`
    pub fn mode(&self, defaults: &ModeDefaults) -> PairMode {
        PairMode::MeshSubheading {
            use_major_topic: self.major_topic.unwrap_or(defaults.major_topic),
            no_explode: self.no_explode.unwrap_or(defaults.no_explode),
        }
    }
}

/// Proximity section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProximitySection {
    #[serde(default)]
    pub topic1: TermList,

    #[serde(default)]
    pub topic2: TermList,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<ProximityField>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
}

impl ProximitySection {
    /// Resolve the pairing mode, falling back to `defaults`
    pub fn mode(&self, defaults: &ModeDefaults) -> PairMode {
        PairMode::Proximity {
            field: self.field.unwrap_or(defaults.proximity_field),
            distance: self.distance.unwrap_or(defaults.proximity_distance),
        }
    }
}

/// Intersection section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionSection {
    #[serde(default)]
    pub topic1: TermList,

    #[serde(default)]
    pub topic2: TermList,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<IntersectionField>,
}

impl IntersectionSection {
    /// Resolve the pairing mode, falling back to `defaults`
    pub fn mode(&self, defaults: &ModeDefaults) -> PairMode {
        PairMode::Intersection {
            field: self.field.unwrap_or(defaults.intersection_field),
        }
    }
}

/// A set of search strings to generate in one go
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<MeshSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proximity: Option<ProximitySection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intersection: Option<IntersectionSection>,
}

/// Everything produced by one [`GenerationRequest`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesh: Option<QueryResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximity: Option<QueryResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub intersection: Option<QueryResult>,

    /// Union of the MeSH and proximity strings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesh_proximity: Option<QueryResult>,

    /// Union of the MeSH and intersection strings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesh_intersection: Option<QueryResult>,

    /// Requested sections that were skipped because a term list was empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

impl GenerationRequest {
    /// Load a request from a TOML or JSON file (chosen by extension)
    pub fn load(path: &Path) -> Result<Self, RequestError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RequestError::Io(format!("{}: {}", path.display(), e)))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Parse a TOML request
    pub fn from_toml_str(content: &str) -> Result<Self, RequestError> {
        toml::from_str(content).map_err(|e| RequestError::Parse(e.to_string()))
    }

    /// Parse a JSON request
    pub fn from_json_str(content: &str) -> Result<Self, RequestError> {
        serde_json::from_str(content).map_err(|e| RequestError::Parse(e.to_string()))
    }

    /// Whether no section was requested at all
    pub fn is_blank(&self) -> bool {
        self.mesh.is_none() && self.proximity.is_none() && self.intersection.is_none()
    }

    /// Compose every requested section and the MeSH unions
    pub fn generate(&self, composer: &QueryComposer, defaults: &ModeDefaults) -> GenerationReport {
        let mut report = GenerationReport::default();

        if let Some(section) = &self.mesh {
            report.mesh = compose_section(
                composer,
                "mesh",
                &section.headings,
                &section.subheadings,
                section.mode(defaults),
                &mut report.skipped,
            );
        }
        if let Some(section) = &self.proximity {
            report.proximity = compose_section(
                composer,
                "proximity",
                &section.topic1,
                &section.topic2,
                section.mode(defaults),
                &mut report.skipped,
            );
        }
        if let Some(section) = &self.intersection {
            report.intersection = compose_section(
                composer,
                "intersection",
                &section.topic1,
                &section.topic2,
                section.mode(defaults),
                &mut report.skipped,
            );
        }

        if let Some(mesh) = &report.mesh {
            report.mesh_proximity = report
                .proximity
                .as_ref()
                .map(|proximity| union_results(&[mesh, proximity]));
            report.mesh_intersection = report
                .intersection
                .as_ref()
                .map(|intersection| union_results(&[mesh, intersection]));
        }

        tracing::info!(
            generated = report.sections().len(),
            skipped = report.skipped.len(),
            "Generated search strings"
        );

        report
    }
}

fn compose_section(
    composer: &QueryComposer,
    name: &str,
    first: &TermList,
    second: &TermList,
    mode: PairMode,
    skipped: &mut Vec<String>,
) -> Option<QueryResult> {
    if first.is_empty() || second.is_empty() {
        tracing::debug!(section = name, "Skipping section with an empty term list");
        skipped.push(name.to_string());
        return None;
    }
    Some(composer.compose(first, second, &mode))
}

/// One generated string of a report, ready for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSection<'a> {
    /// Section title
    pub title: &'static str,
    /// Labels for the two input lists
    pub labels: (&'static str, &'static str),
    /// The generated string and its metrics
    pub result: &'a QueryResult,
}

const MESH_LABELS: (&str, &str) = ("MeSH main headings", "Subheadings");
const TOPIC_LABELS: (&str, &str) = ("Topic 1 terms", "Topic 2 terms");

impl GenerationReport {
    /// Whether no string was generated
    pub fn is_empty(&self) -> bool {
        self.sections().is_empty()
    }

    /// Generated strings in display order, each union right after its
    /// keyword section
    pub fn sections(&self) -> Vec<ReportSection<'_>> {
        [
            ("Pairwise MeSH Main/Subheading", MESH_LABELS, &self.mesh),
            ("Pairwise Proximity", TOPIC_LABELS, &self.proximity),
            ("MeSH + Proximity", TOPIC_LABELS, &self.mesh_proximity),
            ("Pairwise Intersection", TOPIC_LABELS, &self.intersection),
            ("MeSH + Intersection", TOPIC_LABELS, &self.mesh_intersection),
        ]
        .into_iter()
        .filter_map(|(title, labels, result)| {
            result.as_ref().map(|result| ReportSection {
                title,
                labels,
                result,
            })
        })
        .collect()
    }
}

/// Request file errors
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
