//! Core data models for term lists, pairing modes and generated queries.

mod mode;
mod query;
mod terms;

pub use mode::{
    mesh_field_tag, IntersectionField, PairMode, ProximityField, DEFAULT_PROXIMITY_DISTANCE,
};
pub use query::{Advisory, ListSide, Metrics, QueryResult, TermCounts};
pub use terms::TermList;
