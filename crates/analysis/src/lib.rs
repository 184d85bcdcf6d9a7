//! OpenRouter-backed implementation of the SEO analysis gateway.
//!
//! [`OpenRouterGateway`] sends the draft's title and plain text to a chat
//! completion model with a fixed SEO-analysis prompt and normalizes the
//! reply via [`seodraft_core::analysis::parse_analysis_reply`].

pub mod client;
pub mod prompt;
pub mod types;

pub use client::{AnalysisSettings, OpenRouterGateway};
