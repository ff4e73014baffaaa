//! Generated query strings, their metrics and advisory flags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two input lists a term came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListSide {
    First,
    Second,
}

impl fmt::Display for ListSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListSide::First => f.write_str("topic 1"),
            ListSide::Second => f.write_str("topic 2"),
        }
    }
}

/// Non-fatal conditions raised while composing.
///
/// Composition never fails: each advisory is reported next to a result that
/// was produced anyway. Callers decide whether to act on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    #[error("A term list is empty, no search string was generated")]
    EmptyInput,

    #[error(
        "Wildcards are not allowed in proximity searches ({list} terms: {})",
        .terms.join(", ")
    )]
    WildcardInProximityInput { list: ListSide, terms: Vec<String> },

    #[error(
        "The search string contains {count} wildcard (*) characters, which exceeds PubMed's limit of {limit}"
    )]
    WildcardLimitExceeded { count: usize, limit: usize },
}

/// Row counts of the two input lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCounts {
    pub first: usize,
    pub second: usize,
}

/// Character and pair accounting for a generated string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Number of term pairs (clauses) in the string
    pub pair_count: usize,
    /// Characters the user typed: the sum of all input term lengths
    pub typed_char_count: usize,
    /// Characters added by composition (brackets, quotes, tags, operators)
    pub generated_char_count: usize,
}

/// A generated search string together with its accounting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// The generated search string
    pub query: String,

    /// Length of `query` in characters
    pub length: usize,

    /// Sizes of the two input lists (`None` for unions of several results)
    pub term_counts: Option<TermCounts>,

    /// Number of term pairs that produced the string
    pub pair_count: usize,

    /// Sum of input term character lengths
    pub typed_char_count: usize,

    /// Number of `*` characters in the string (intersection results only)
    pub wildcard_count: Option<usize>,

    /// Advisory flags raised during composition
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<Advisory>,
}

impl QueryResult {
    /// Whether no string was generated
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Characters added on top of what was typed
    pub fn generated_char_count(&self) -> usize {
        self.length.saturating_sub(self.typed_char_count)
    }

    /// Pair and character accounting as one value
    pub fn metrics(&self) -> Metrics {
        Metrics {
            pair_count: self.pair_count,
            typed_char_count: self.typed_char_count,
            generated_char_count: self.generated_char_count(),
        }
    }

    /// Whether any advisory was raised
    pub fn has_advisories(&self) -> bool {
        !self.advisories.is_empty()
    }

    /// Whether the wildcard ceiling was exceeded
    pub fn exceeds_wildcard_limit(&self) -> bool {
        self.advisories
            .iter()
            .any(|a| matches!(a, Advisory::WildcardLimitExceeded { .. }))
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(query: &str, typed: usize) -> QueryResult {
        QueryResult {
            query: query.to_string(),
            length: query.chars().count(),
            term_counts: Some(TermCounts {
                first: 1,
                second: 1,
            }),
            pair_count: 1,
            typed_char_count: typed,
            wildcard_count: None,
            advisories: Vec::new(),
        }
    }

    #[test]
    fn test_generated_char_count() {
        let r = result("asthenia/diagnosis[mh]", 17);
        assert_eq!(r.generated_char_count(), 5);
        assert_eq!(
            r.metrics(),
            Metrics {
                pair_count: 1,
                typed_char_count: 17,
                generated_char_count: 5
            }
        );
    }

    #[test]
    fn test_generated_char_count_saturates() {
        let r = result("", 10);
        assert_eq!(r.generated_char_count(), 0);
        assert!(r.is_empty());
    }

    #[test]
    fn test_advisory_messages() {
        let advisory = Advisory::WildcardInProximityInput {
            list: ListSide::First,
            terms: vec!["frail*".to_string(), "musc*".to_string()],
        };
        assert_eq!(
            advisory.to_string(),
            "Wildcards are not allowed in proximity searches (topic 1 terms: frail*, musc*)"
        );

        let advisory = Advisory::WildcardLimitExceeded {
            count: 257,
            limit: 256,
        };
        assert!(advisory.to_string().contains("257 wildcard"));
    }

    #[test]
    fn test_exceeds_wildcard_limit() {
        let mut r = result("a*", 2);
        assert!(!r.exceeds_wildcard_limit());
        r.advisories.push(Advisory::WildcardLimitExceeded {
            count: 300,
            limit: 256,
        });
        assert!(r.exceeds_wildcard_limit());
        assert!(r.has_advisories());
    }

    #[test]
    fn test_advisory_serde_tag() {
        let json = serde_json::to_string(&Advisory::EmptyInput).unwrap();
        assert_eq!(json, r#"{"kind":"empty_input"}"#);
    }
}
