//! Search URL construction.

/// PubMed search endpoint; the query string is appended directly
pub const PUBMED_SEARCH_URL: &str = "https://pubmed.ncbi.nlm.nih.gov/?term=";

/// Build a search URL by appending `query` to `base_url`.
///
/// Only literal spaces are replaced with `+`. Quotes, brackets, `*`, `/` and
/// `:` are passed through as-is; PubMed's query parser accepts them
/// unencoded, and the generated strings must round-trip unchanged.
///
/// # Examples
///
/// ```
/// use pairwise_pubmed::utils::search_url;
///
/// let url = search_url("https://pubmed.ncbi.nlm.nih.gov/?term=", "a b OR c d");
/// assert_eq!(url, "https://pubmed.ncbi.nlm.nih.gov/?term=a+b+OR+c+d");
/// ```
pub fn search_url(base_url: &str, query: &str) -> String {
    let mut url = String::with_capacity(base_url.len() + query.len());
    url.push_str(base_url);
    url.push_str(&query.replace(' ', "+"));
    url
}

/// Build a PubMed search URL for `query`
pub fn pubmed_search_url(query: &str) -> String {
    search_url(PUBMED_SEARCH_URL, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_become_plus() {
        assert_eq!(
            pubmed_search_url("a b OR c d"),
            "https://pubmed.ncbi.nlm.nih.gov/?term=a+b+OR+c+d"
        );
    }

    #[test]
    fn test_no_other_encoding() {
        let query = "\"muscle weakness test\"[tiab:~2] OR asthenia/diagnosis[majr:noexp]";
        assert_eq!(
            pubmed_search_url(query),
            "https://pubmed.ncbi.nlm.nih.gov/?term=\"muscle+weakness+test\"[tiab:~2]+OR+asthenia/diagnosis[majr:noexp]"
        );
    }

    #[test]
    fn test_wildcards_and_parens_kept() {
        assert_eq!(
            search_url("https://example.org/?q=", "(frail*[tw] AND test*[tw])"),
            "https://example.org/?q=(frail*[tw]+AND+test*[tw])"
        );
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(pubmed_search_url(""), PUBMED_SEARCH_URL);
    }
}
