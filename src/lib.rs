//! # Pairwise PubMed
//!
//! Generate PubMed search strings from two lists of terms by combining every
//! term of the first list with every term of the second.
//!
//! ## Architecture
//!
//! - [`models`]: Term lists, pairing modes, generated results and advisories
//! - [`compose`]: The pairwise composers and multi-mode generation requests
//! - [`presets`]: Built-in example term lists
//! - [`config`]: Configuration management
//! - [`ui`]: Terminal presentation for the CLI
//! - [`utils`]: Search URLs, validation and display helpers
//!
//! ## Example
//!
//! ```rust
//! use pairwise_pubmed::compose::QueryComposer;
//! use pairwise_pubmed::models::{IntersectionField, PairMode, TermList};
//! use pairwise_pubmed::utils::pubmed_search_url;
//!
//! let topic1 = TermList::parse("frailty\n");
//! let topic2 = TermList::parse("assess*\ndiagnos*\n");
//! let mode = PairMode::Intersection { field: IntersectionField::TextWord };
//!
//! let result = QueryComposer::new().compose(&topic1, &topic2, &mode);
//! assert_eq!(
//!     result.query,
//!     "(frailty[tw] AND assess*[tw]) OR (frailty[tw] AND diagnos*[tw])"
//! );
//! assert_eq!(result.wildcard_count, Some(2));
//!
//! let url = pubmed_search_url(&result.query);
//! assert!(url.starts_with("https://pubmed.ncbi.nlm.nih.gov/?term=(frailty[tw]+AND+"));
//! ```

pub mod compose;
pub mod config;
pub mod models;
pub mod presets;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use compose::QueryComposer;
pub use models::{PairMode, QueryResult, TermList};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
