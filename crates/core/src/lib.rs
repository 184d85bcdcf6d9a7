//! Domain layer for the SEO draft workbench.
//!
//! Holds the draft/revision lifecycle, rich-text normalization, score
//! aggregation, and the two ports (persistence and analysis) the outer
//! crates implement. This crate has no internal dependencies so it can be
//! shared by the API server, the database layer, and the analysis client.

pub mod analysis;
pub mod dashboard;
pub mod draft;
pub mod error;
pub mod revision;
pub mod rich_text;
pub mod score;
pub mod search;
pub mod store;
pub mod types;
