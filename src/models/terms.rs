//! Term list model: the ordered, line-oriented input to every composer.

use serde::{Deserialize, Serialize};

/// An ordered list of search terms, one per input line.
///
/// Blank lines (empty or whitespace-only) are dropped on construction so they
/// can never produce degenerate clauses such as `"/diagnosis[mh]"`. Every other
/// line is kept verbatim: no trimming, no deduplication, no escaping. Order is
/// significant because it drives the clause order of the generated string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawTermList", into = "Vec<String>")]
pub struct TermList {
    terms: Vec<String>,
}

/// Wire forms accepted for a term list in request files: either a multi-line
/// text block (as pasted into a form) or an explicit array of terms.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTermList {
    Text(String),
    Lines(Vec<String>),
}

impl From<RawTermList> for TermList {
    fn from(raw: RawTermList) -> Self {
        match raw {
            RawTermList::Text(text) => TermList::parse(&text),
            RawTermList::Lines(lines) => TermList::new(lines),
        }
    }
}

impl From<TermList> for Vec<String> {
    fn from(list: TermList) -> Self {
        list.terms
    }
}

impl TermList {
    /// Build a term list from individual terms, dropping blank entries.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(Into::into)
                .filter(|term| !is_blank(term))
                .collect(),
        }
    }

    /// Split a raw multi-line text block into terms.
    ///
    /// Both `\n` and `\r\n` line endings are accepted.
    pub fn parse(text: &str) -> Self {
        Self::new(text.lines())
    }

    /// Number of terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the list has no terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over the terms in input order
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.iter().map(String::as_str)
    }

    /// The terms as a slice
    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }

    /// Sum of the character lengths of all terms.
    ///
    /// Counts Unicode scalar values, not bytes, so accented terms are not
    /// over-counted.
    pub fn char_count(&self) -> usize {
        self.terms.iter().map(|term| term.chars().count()).sum()
    }

    /// Terms containing a `*` truncation marker, in input order
    pub fn wildcard_terms(&self) -> Vec<&str> {
        self.iter().filter(|term| term.contains('*')).collect()
    }
}

impl<'a> IntoIterator for &'a TermList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for TermList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

fn is_blank(term: &str) -> bool {
    term.trim().is_empty()
}
