//! Built-in example term lists for a search on *frailty measures*.
//!
//! These are the placeholder lists shown to new users; `example` in the CLI
//! generates strings from them.

use crate::compose::{GenerationRequest, IntersectionSection, MeshSection, ProximitySection};
use crate::models::{IntersectionField, ProximityField, TermList};

/// MeSH main headings
pub const MESH_HEADINGS: &str = "\
asthenia
fatigue
frailty
muscle weakness
muscle atrophy";

/// MeSH subheadings
pub const MESH_SUBHEADINGS: &str = "\
diagnosis
epidemiology";

/// Proximity topic 1: the condition
pub const PROXIMITY_TOPIC1: &str = "\
asthenia
debility
fatigue
frailty
muscle weakness
muscular weakness
muscle atrophy
muscular atrophy
sarcopenia";

/// Proximity topic 2: measurement words, without truncation
pub const PROXIMITY_TOPIC2: &str = "\
assess
assessment
diagnosis
diagnoses
diagnostic
evaluate
evaluation
instrument
instruments
index
indices
measure
measures
scale
scales
score
scores
scoring
screen
screens
screening
screenings
test
tests
testing
tool
tools";

/// Intersection topic 1: the condition, truncated
pub const INTERSECTION_TOPIC1: &str = "\
asthenia
debilit*
fatigue
frail*
musc* atroph*
musc* wast*
musc* weak*
sarcopenia*";

/// Intersection topic 2: measurement stems, truncated
pub const INTERSECTION_TOPIC2: &str = "\
assess*
diagnos*
evaluat*
index
indic*
instrument*
measure*
scale*
score*
screen*
test*
tool*";

/// Proximity distance used with the example lists
pub const EXAMPLE_PROXIMITY_DISTANCE: u32 = 4;

/// Example MeSH section
pub fn mesh_example() -> MeshSection {
    MeshSection {
        headings: TermList::parse(MESH_HEADINGS),
        subheadings: TermList::parse(MESH_SUBHEADINGS),
        major_topic: Some(false),
        no_explode: Some(false),
    }
}

/// Example proximity section
pub fn proximity_example() -> ProximitySection {
    ProximitySection {
        topic1: TermList::parse(PROXIMITY_TOPIC1),
        topic2: TermList::parse(PROXIMITY_TOPIC2),
        field: Some(ProximityField::TitleAbstract),
        distance: Some(EXAMPLE_PROXIMITY_DISTANCE),
    }
}

/// Example intersection section
pub fn intersection_example() -> IntersectionSection {
    IntersectionSection {
        topic1: TermList::parse(INTERSECTION_TOPIC1),
        topic2: TermList::parse(INTERSECTION_TOPIC2),
        field: Some(IntersectionField::TextWord),
    }
}

/// A request covering all three modes with the example lists
pub fn full_example() -> GenerationRequest {
    GenerationRequest {
        mesh: Some(mesh_example()),
        proximity: Some(proximity_example()),
        intersection: Some(intersection_example()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{ModeDefaults, QueryComposer};

    #[test]
    fn test_example_list_sizes() {
        assert_eq!(mesh_example().headings.len(), 5);
        assert_eq!(mesh_example().subheadings.len(), 2);
        assert_eq!(proximity_example().topic1.len(), 9);
        assert_eq!(proximity_example().topic2.len(), 27);
        assert_eq!(intersection_example().topic1.len(), 8);
        assert_eq!(intersection_example().topic2.len(), 12);
    }

    #[test]
    fn test_proximity_example_has_no_wildcards() {
        let section = proximity_example();
        assert!(section.topic1.wildcard_terms().is_empty());
        assert!(section.topic2.wildcard_terms().is_empty());
    }

    #[test]
    fn test_full_example_generates_everything() {
        let report = full_example().generate(&QueryComposer::default(), &ModeDefaults::default());
        assert_eq!(report.sections().len(), 5);
        assert_eq!(report.mesh.as_ref().unwrap().pair_count, 10);
        assert_eq!(report.proximity.as_ref().unwrap().pair_count, 243);

        let intersection = report.intersection.as_ref().unwrap();
        assert_eq!(intersection.pair_count, 96);
        // Stays within PubMed's wildcard limit
        assert!(intersection.wildcard_count.unwrap() <= 256);
        assert!(!intersection.exceeds_wildcard_limit());
    }
}
