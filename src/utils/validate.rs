//! Validation for configured search endpoints.
//!
//! Generated search strings are never validated: terms are opaque and passed
//! through untouched. Only the base URL a string is appended to is checked.

use thiserror::Error;

/// Validation error types
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported URL scheme: {0} (expected http or https)")]
    UnsupportedScheme(String),
}

/// Validate a search base URL.
///
/// The URL must parse and use `http` or `https` (which implies a host). Surrounding
/// whitespace is trimmed; the URL is otherwise returned exactly as given,
/// since queries are appended to it verbatim (`url::Url` would normalize it).
pub fn validate_base_url(url: &str) -> Result<String, ValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ValidationError::InvalidUrl("empty URL".to_string()));
    }

    let parsed = url::Url::parse(url).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(ValidationError::UnsupportedScheme(other.to_string())),
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url_valid() {
        assert_eq!(
            validate_base_url("https://pubmed.ncbi.nlm.nih.gov/?term=").unwrap(),
            "https://pubmed.ncbi.nlm.nih.gov/?term="
        );
        assert!(validate_base_url("http://localhost:8080/search?q=").is_ok());
    }

    #[test]
    fn test_validate_base_url_trims() {
        assert_eq!(
            validate_base_url("  https://example.org/?term=\n").unwrap(),
            "https://example.org/?term="
        );
    }

    #[test]
    fn test_validate_base_url_invalid() {
        assert!(matches!(
            validate_base_url(""),
            Err(ValidationError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_base_url("not a url"),
            Err(ValidationError::InvalidUrl(_))
        ));
        assert_eq!(
            validate_base_url("ftp://example.org/?term="),
            Err(ValidationError::UnsupportedScheme("ftp".to_string()))
        );
        assert!(validate_base_url("javascript:alert(1)").is_err());
        assert!(validate_base_url("https://").is_err());
    }
}
