//! Search request and place record types
//!
//! A `SearchRequest` describes one nearby search: a center point, either a
//! radius or rank-by-distance mode, and optional type and keyword filters.
//! Place types are passed through as opaque strings; nothing here validates
//! them against the service's list of supported types.
//!
//! `PlaceRecord` wraps a single result object exactly as the service returned
//! it, with a few read-only accessors for display.

mod types;

pub use types::{Location, PlaceRecord, SearchArea, SearchRequest};
