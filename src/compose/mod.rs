//! Pairwise query composition.
//!
//! Every composer takes two ordered [`TermList`]s and emits one clause per
//! `(first, second)` pair, iterating the first list in the outer loop and the
//! second list in the inner loop, then joins the clauses with [`OR_SEPARATOR`].
//!
//! | Mode | Clause |
//! |------|--------|
//! | MeSH main/subheading | `heading/subheading[mh]` |
//! | Proximity | `"t1 t2"[tiab:~2]` |
//! | Intersection | `(t1[tw] AND t2[tw])` |
//!
//! Composition is pure and never fails. Conditions worth surfacing (an empty
//! list, wildcards inside proximity phrases, too many wildcards for PubMed)
//! are attached to the result as [`Advisory`] values.
//!
//! ```rust
//! use pairwise_pubmed::compose::compose_mesh_subheading;
//! use pairwise_pubmed::models::TermList;
//!
//! let headings = TermList::new(["asthenia", "fatigue"]);
//! let subheadings = TermList::new(["diagnosis"]);
//! let result = compose_mesh_subheading(&headings, &subheadings, false, false);
//!
//! assert_eq!(result.query, "asthenia/diagnosis[mh] OR fatigue/diagnosis[mh]");
//! assert_eq!(result.pair_count, 2);
//! ```

pub mod request;

use crate::models::{
    mesh_field_tag, Advisory, IntersectionField, ListSide, Metrics, PairMode, ProximityField,
    QueryResult, TermCounts, TermList,
};

pub use request::{
    GenerationReport, GenerationRequest, IntersectionSection, MeshSection, ModeDefaults,
    ProximitySection, ReportSection, RequestError,
};

/// Separator placed between clauses and between unioned results
pub const OR_SEPARATOR: &str = " OR ";

/// Maximum number of `*` characters PubMed accepts in one search string
pub const PUBMED_WILDCARD_LIMIT: usize = 256;

/// Builds pairwise search strings.
///
/// The composer itself holds no per-request state; the only setting is the
/// wildcard ceiling used to flag oversized intersection strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryComposer {
    wildcard_limit: usize,
}

impl Default for QueryComposer {
    fn default() -> Self {
        Self {
            wildcard_limit: PUBMED_WILDCARD_LIMIT,
        }
    }
}

impl QueryComposer {
    /// Create a composer with PubMed's wildcard ceiling
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a composer that flags intersection strings above `limit` wildcards
    pub fn with_wildcard_limit(limit: usize) -> Self {
        Self {
            wildcard_limit: limit,
        }
    }

    /// The wildcard ceiling in use
    pub fn wildcard_limit(&self) -> usize {
        self.wildcard_limit
    }

    /// Compose two lists under the given mode
    pub fn compose(&self, first: &TermList, second: &TermList, mode: &PairMode) -> QueryResult {
        match *mode {
            PairMode::MeshSubheading {
                use_major_topic,
                no_explode,
            } => self.mesh_subheading(first, second, use_major_topic, no_explode),
            PairMode::Proximity { field, distance } => {
                self.proximity(first, second, field, distance)
            }
            PairMode::Intersection { field } => self.intersection(first, second, field),
        }
    }

    /// Pair MeSH main headings with subheadings: `heading/subheading[tag]`.
    ///
    /// The tag is `majr` for major topics, `mh` otherwise, with `:noexp`
    /// appended when explosion is suppressed.
    pub fn mesh_subheading(
        &self,
        headings: &TermList,
        subheadings: &TermList,
        use_major_topic: bool,
        no_explode: bool,
    ) -> QueryResult {
        let tag = mesh_field_tag(use_major_topic, no_explode);
        let query = pairwise(headings, subheadings, |heading, subheading| {
            format!("{}/{}[{}]", heading, subheading, tag)
        });

        finish("mesh", headings, subheadings, query, Vec::new(), None)
    }

    /// Pair terms into proximity phrases: `"t1 t2"[field:~distance]`.
    ///
    /// PubMed does not expand truncation inside quoted phrases, so any term
    /// containing `*` raises [`Advisory::WildcardInProximityInput`]. The string
    /// is generated regardless.
    pub fn proximity(
        &self,
        topic1: &TermList,
        topic2: &TermList,
        field: ProximityField,
        distance: u32,
    ) -> QueryResult {
        let mut advisories = Vec::new();
        for (side, list) in [(ListSide::First, topic1), (ListSide::Second, topic2)] {
            let terms = list.wildcard_terms();
            if !terms.is_empty() {
                advisories.push(Advisory::WildcardInProximityInput {
                    list: side,
                    terms: terms.into_iter().map(str::to_string).collect(),
                });
            }
        }

        let query = pairwise(topic1, topic2, |t1, t2| {
            format!("\"{} {}\"[{}:~{}]", t1, t2, field.tag(), distance)
        });

        finish("proximity", topic1, topic2, query, advisories, None)
    }

    /// Pair terms into boolean intersections: `(t1[field] AND t2[field])`.
    ///
    /// The `*` characters of the joined string are counted; above the
    /// wildcard ceiling [`Advisory::WildcardLimitExceeded`] is raised and the
    /// string is still returned unmodified.
    pub fn intersection(
        &self,
        topic1: &TermList,
        topic2: &TermList,
        field: IntersectionField,
    ) -> QueryResult {
        let tag = field.tag();
        let query = pairwise(topic1, topic2, |t1, t2| {
            format!("({}[{}] AND {}[{}])", t1, tag, t2, tag)
        });

        let wildcards = count_wildcards(&query);
        let mut advisories = Vec::new();
        if wildcards > self.wildcard_limit {
            advisories.push(Advisory::WildcardLimitExceeded {
                count: wildcards,
                limit: self.wildcard_limit,
            });
        }

        finish(
            "intersection",
            topic1,
            topic2,
            query,
            advisories,
            Some(wildcards),
        )
    }
}

/// Compose a MeSH main heading/subheading string with the default composer
pub fn compose_mesh_subheading(
    headings: &TermList,
    subheadings: &TermList,
    use_major_topic: bool,
    no_explode: bool,
) -> QueryResult {
    QueryComposer::default().mesh_subheading(headings, subheadings, use_major_topic, no_explode)
}

/// Compose a proximity string with the default composer
pub fn compose_proximity(
    topic1: &TermList,
    topic2: &TermList,
    field: ProximityField,
    distance: u32,
) -> QueryResult {
    QueryComposer::default().proximity(topic1, topic2, field, distance)
}

/// Compose an intersection string with the default composer
pub fn compose_intersection(
    topic1: &TermList,
    topic2: &TermList,
    field: IntersectionField,
) -> QueryResult {
    QueryComposer::default().intersection(topic1, topic2, field)
}

/// Join already generated strings with ` OR `.
///
/// Empty strings are skipped so the union never carries a dangling separator.
pub fn compose_union<S: AsRef<str>>(parts: &[S]) -> String {
    let parts: Vec<&str> = parts
        .iter()
        .map(|part| part.as_ref())
        .filter(|part| !part.is_empty())
        .collect();
    parts.join(OR_SEPARATOR)
}

/// Union of several results, with their metrics summed.
///
/// Pair and typed-character counts are the sums of the parts; generated
/// characters are measured against the joined string, so the extra
/// separators count as generated. Wildcard counts are summed over the parts
/// that carry one. Empty parts are skipped.
pub fn union_results(parts: &[&QueryResult]) -> QueryResult {
    let parts: Vec<&QueryResult> = parts.iter().copied().filter(|r| !r.is_empty()).collect();

    let queries: Vec<&str> = parts.iter().map(|r| r.query.as_str()).collect();
    let query = compose_union(&queries[..]);
    let wildcard_count = parts
        .iter()
        .filter_map(|r| r.wildcard_count)
        .reduce(|a, b| a + b);

    QueryResult {
        length: query.chars().count(),
        query,
        term_counts: None,
        pair_count: parts.iter().map(|r| r.pair_count).sum(),
        typed_char_count: parts.iter().map(|r| r.typed_char_count).sum(),
        wildcard_count,
        advisories: parts
            .iter()
            .flat_map(|r| r.advisories.iter().cloned())
            .collect(),
    }
}

/// Pair and character accounting for a string generated from two lists
pub fn metrics(first: &TermList, second: &TermList, query: &str) -> Metrics {
    let typed = first.char_count() + second.char_count();
    Metrics {
        pair_count: first.len() * second.len(),
        typed_char_count: typed,
        generated_char_count: query.chars().count().saturating_sub(typed),
    }
}

/// Number of `*` truncation markers in a string
pub fn count_wildcards(query: &str) -> usize {
    query.matches('*').count()
}

/// One clause per pair, outer loop over `first`, joined with ` OR `
fn pairwise<F>(first: &TermList, second: &TermList, clause: F) -> String
where
    F: Fn(&str, &str) -> String,
{
    let clause = &clause;
    first
        .iter()
        .flat_map(move |a| second.iter().map(move |b| clause(a, b)))
        .collect::<Vec<_>>()
        .join(OR_SEPARATOR)
}

fn finish(
    mode: &str,
    first: &TermList,
    second: &TermList,
    query: String,
    mut advisories: Vec<Advisory>,
    wildcard_count: Option<usize>,
) -> QueryResult {
    if first.is_empty() || second.is_empty() {
        advisories.insert(0, Advisory::EmptyInput);
    }

    let Metrics {
        pair_count,
        typed_char_count,
        ..
    } = metrics(first, second, &query);

    tracing::debug!(
        mode,
        first = first.len(),
        second = second.len(),
        pairs = pair_count,
        length = query.len(),
        "Composed search string"
    );
    for advisory in &advisories {
        tracing::warn!(mode, "{}", advisory);
    }

    QueryResult {
        length: query.chars().count(),
        query,
        term_counts: Some(TermCounts {
            first: first.len(),
            second: second.len(),
        }),
        pair_count,
        typed_char_count,
        wildcard_count,
        advisories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(terms: &[&str]) -> TermList {
        TermList::new(terms.iter().copied())
    }

    #[test]
    fn test_mesh_subheading_literal() {
        let result = compose_mesh_subheading(
            &list(&["asthenia", "fatigue"]),
            &list(&["diagnosis"]),
            false,
            false,
        );
        assert_eq!(
            result.query,
            "asthenia/diagnosis[mh] OR fatigue/diagnosis[mh]"
        );
        assert_eq!(result.pair_count, 2);
        assert_eq!(result.typed_char_count, 8 + 7 + 9);
        assert_eq!(result.wildcard_count, None);
        assert!(!result.has_advisories());
    }

    #[test]
    fn test_mesh_subheading_major_topic_no_explode() {
        let result =
            compose_mesh_subheading(&list(&["frailty"]), &list(&["epidemiology"]), true, true);
        assert_eq!(result.query, "frailty/epidemiology[majr:noexp]");

        let result =
            compose_mesh_subheading(&list(&["frailty"]), &list(&["epidemiology"]), false, true);
        assert_eq!(result.query, "frailty/epidemiology[mh:noexp]");
    }

    #[test]
    fn test_cartesian_order() {
        let result = compose_mesh_subheading(&list(&["a", "b"]), &list(&["x", "y"]), false, false);
        assert_eq!(result.query, "a/x[mh] OR a/y[mh] OR b/x[mh] OR b/y[mh]");
        assert_eq!(
            result.term_counts,
            Some(TermCounts {
                first: 2,
                second: 2
            })
        );
    }

    #[test]
    fn test_empty_list_gives_empty_result() {
        let empty = TermList::default();
        let terms = list(&["fatigue"]);

        for (a, b) in [(&empty, &terms), (&terms, &empty), (&empty, &empty)] {
            let result = compose_mesh_subheading(a, b, false, false);
            assert!(result.is_empty());
            assert_eq!(result.pair_count, 0);
            assert_eq!(result.advisories, vec![Advisory::EmptyInput]);
        }
    }

    #[test]
    fn test_proximity_literal() {
        let result = compose_proximity(
            &list(&["failure"]),
            &list(&["test"]),
            ProximityField::TitleAbstract,
            2,
        );
        assert_eq!(result.query, "\"failure test\"[tiab:~2]");
        assert!(result.advisories.is_empty());
        assert_eq!(result.wildcard_count, None);
    }

    #[test]
    fn test_proximity_flags_wildcards() {
        let result = compose_proximity(
            &list(&["fail*ure"]),
            &list(&["test", "scor*"]),
            ProximityField::Title,
            0,
        );
        // Still generated
        assert_eq!(
            result.query,
            "\"fail*ure test\"[ti:~0] OR \"fail*ure scor*\"[ti:~0]"
        );
        assert_eq!(
            result.advisories,
            vec![
                Advisory::WildcardInProximityInput {
                    list: ListSide::First,
                    terms: vec!["fail*ure".to_string()],
                },
                Advisory::WildcardInProximityInput {
                    list: ListSide::Second,
                    terms: vec!["scor*".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_proximity_large_distance() {
        let result = compose_proximity(
            &list(&["muscle"]),
            &list(&["weakness"]),
            ProximityField::Affiliation,
            1_000_000,
        );
        assert_eq!(result.query, "\"muscle weakness\"[ad:~1000000]");
    }

    #[test]
    fn test_intersection_literal() {
        let result = compose_intersection(
            &list(&["frailty"]),
            &list(&["assess*", "diagnos*"]),
            IntersectionField::TextWord,
        );
        assert_eq!(
            result.query,
            "(frailty[tw] AND assess*[tw]) OR (frailty[tw] AND diagnos*[tw])"
        );
        assert_eq!(result.wildcard_count, Some(2));
        assert!(!result.exceeds_wildcard_limit());
    }

    #[test]
    fn test_intersection_wildcard_limit() {
        // 257 single-wildcard terms against one plain term
        let many: Vec<String> = (0..257).map(|i| format!("t{}*", i)).collect();
        let result = compose_intersection(
            &TermList::new(many),
            &list(&["frailty"]),
            IntersectionField::All,
        );
        assert_eq!(result.wildcard_count, Some(257));
        assert_eq!(
            result.advisories,
            vec![Advisory::WildcardLimitExceeded {
                count: 257,
                limit: 256
            }]
        );
        assert_eq!(result.pair_count, 257);
        assert!(result.query.starts_with("(t0*[all] AND frailty[all]) OR "));
        assert!(result.query.ends_with("(t256*[all] AND frailty[all])"));
    }

    #[test]
    fn test_intersection_at_limit_is_fine() {
        let many: Vec<String> = (0..256).map(|i| format!("t{}*", i)).collect();
        let result =
            compose_intersection(&TermList::new(many), &list(&["x"]), IntersectionField::Title);
        assert_eq!(result.wildcard_count, Some(256));
        assert!(result.advisories.is_empty());
    }

    #[test]
    fn test_custom_wildcard_limit() {
        let composer = QueryComposer::with_wildcard_limit(1);
        let result = composer.intersection(
            &list(&["frail*"]),
            &list(&["assess*"]),
            IntersectionField::TitleAbstract,
        );
        assert!(result.exceeds_wildcard_limit());
    }

    #[test]
    fn test_compose_dispatch_matches_direct_calls() {
        let a = list(&["asthenia", "fatigue"]);
        let b = list(&["scale", "score"]);
        let composer = QueryComposer::new();

        let mode = PairMode::Proximity {
            field: ProximityField::TitleAbstract,
            distance: 4,
        };
        assert_eq!(
            composer.compose(&a, &b, &mode),
            compose_proximity(&a, &b, ProximityField::TitleAbstract, 4)
        );

        let mode = PairMode::Intersection {
            field: IntersectionField::TextWord,
        };
        assert_eq!(
            composer.compose(&a, &b, &mode),
            compose_intersection(&a, &b, IntersectionField::TextWord)
        );
    }

    #[test]
    fn test_separator_count() {
        let a = list(&["a", "b", "c"]);
        let b = list(&["x", "y"]);
        let result = compose_intersection(&a, &b, IntersectionField::Title);
        assert_eq!(result.query.matches(OR_SEPARATOR).count(), 3 * 2 - 1);
    }

    #[test]
    fn test_order_changes_clauses_not_counts() {
        let forward = compose_proximity(
            &list(&["asthenia", "fatigue"]),
            &list(&["scale"]),
            ProximityField::TitleAbstract,
            2,
        );
        let reversed = compose_proximity(
            &list(&["fatigue", "asthenia"]),
            &list(&["scale"]),
            ProximityField::TitleAbstract,
            2,
        );
        assert_ne!(forward.query, reversed.query);
        assert_eq!(forward.pair_count, reversed.pair_count);
        assert_eq!(forward.metrics(), reversed.metrics());
    }

    #[test]
    fn test_duplicates_produce_duplicate_clauses() {
        let result = compose_mesh_subheading(
            &list(&["fatigue", "fatigue"]),
            &list(&["diagnosis"]),
            false,
            false,
        );
        assert_eq!(result.query, "fatigue/diagnosis[mh] OR fatigue/diagnosis[mh]");
    }

    #[test]
    fn test_compose_union_skips_empty() {
        assert_eq!(compose_union(&["a[mh]", "", "b[ti]"]), "a[mh] OR b[ti]");
        assert_eq!(compose_union(&["", ""]), "");
        assert_eq!(compose_union::<&str>(&[]), "");
    }

    #[test]
    fn test_union_results_metrics() {
        let mesh = compose_mesh_subheading(
            &list(&["asthenia", "fatigue"]),
            &list(&["diagnosis"]),
            false,
            false,
        );
        let inter = compose_intersection(
            &list(&["frailty"]),
            &list(&["assess*", "diagnos*"]),
            IntersectionField::TextWord,
        );
        let union = union_results(&[&mesh, &inter]);

        assert_eq!(union.query, format!("{} OR {}", mesh.query, inter.query));
        assert_eq!(union.pair_count, 4);
        assert_eq!(
            union.typed_char_count,
            mesh.typed_char_count + inter.typed_char_count
        );
        assert_eq!(
            union.generated_char_count(),
            union.length - union.typed_char_count
        );
        assert_eq!(union.wildcard_count, Some(2));
        assert_eq!(union.term_counts, None);
    }

    #[test]
    fn test_metrics() {
        let a = list(&["asthenia", "fatigue"]);
        let b = list(&["diagnosis"]);
        let query = "asthenia/diagnosis[mh] OR fatigue/diagnosis[mh]";
        let m = metrics(&a, &b, query);
        assert_eq!(m.pair_count, 2);
        assert_eq!(m.typed_char_count, 24);
        assert_eq!(m.generated_char_count, query.len() - 24);
    }

    #[test]
    fn test_idempotent() {
        let a = list(&["frail*", "musc* weak*"]);
        let b = list(&["scale*", "test*"]);
        let first = compose_intersection(&a, &b, IntersectionField::TextWord);
        let second = compose_intersection(&a, &b, IntersectionField::TextWord);
        assert_eq!(first, second);
    }
}
