//! Utility modules supporting query generation.
//!
//! - [`search_url`]: Append a generated string to a search endpoint
//! - [`validate_base_url`]: Check a configured search endpoint
//! - [`collapse_query`]: Shorten long strings for terminal display
//! - [`truncate_with_ellipsis`]: Unicode-aware truncation
//!
//! # Search URLs
//!
//! ```rust
//! use pairwise_pubmed::utils::{pubmed_search_url, PUBMED_SEARCH_URL};
//!
//! let url = pubmed_search_url("\"fatigue scale\"[tiab:~2]");
//! assert_eq!(url, format!("{}\"fatigue+scale\"[tiab:~2]", PUBMED_SEARCH_URL));
//! ```

mod display;
mod link;
mod validate;

pub use display::{
    collapse_query, format_number, is_terminal, terminal_info, terminal_width,
    truncate_with_ellipsis, Terminal, DEFAULT_WIDTH,
};
pub use link::{pubmed_search_url, search_url, PUBMED_SEARCH_URL};
pub use validate::{validate_base_url, ValidationError};
