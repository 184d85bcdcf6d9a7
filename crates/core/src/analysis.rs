//! Contract with the external SEO analysis provider.
//!
//! The provider is reached only through [`AnalysisGateway`]. Its raw reply is
//! normalized here by [`parse_analysis_reply`]: the JSON object is pulled out
//! of the model's text, the required fields are checked, and the score is
//! rounded and clamped to `0..=100` rather than rejected.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::score::clamp_score;

/// Title sent to the provider when the draft title is blank.
pub const DEFAULT_ANALYSIS_TITLE: &str = "Untitled";

/// Outermost `{ ... }` span in a model reply, across newlines.
static JSON_OBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

/// A normalized analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub score: i32,
    pub keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Failures surfaced by an analysis call. The draft is never modified when
/// one of these is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// The request never produced a response (network, DNS, timeout).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The provider answered with a non-2xx status.
    #[error("provider returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The provider answered without any message text.
    #[error("provider returned an empty reply")]
    EmptyReply,

    /// The reply could not be read as the expected JSON object.
    #[error("malformed reply: {0}")]
    Malformed(String),

    /// The JSON object lacks a required field.
    #[error("reply is missing required field `{0}`")]
    MissingField(&'static str),
}

/// The external scorer: `(title, plain text) -> Analysis`.
#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    async fn analyze(&self, title: &str, content: &str) -> Result<Analysis, AnalysisError>;
}

/// Title as sent to the provider (blank titles become `"Untitled"`).
pub fn analysis_title(title: &str) -> &str {
    if title.trim().is_empty() {
        DEFAULT_ANALYSIS_TITLE
    } else {
        title
    }
}

/// Field layout the provider is instructed to produce.
#[derive(Debug, Deserialize)]
struct RawAnalysis {
    #[serde(rename = "seoScore", alias = "score")]
    seo_score: Option<f64>,
    keywords: Option<Vec<String>>,
    suggestions: Option<Vec<String>>,
}

/// Parse the provider's message text into an [`Analysis`].
///
/// Text around the JSON object (prose, code fences) is ignored.
pub fn parse_analysis_reply(reply: &str) -> Result<Analysis, AnalysisError> {
    if reply.trim().is_empty() {
        return Err(AnalysisError::EmptyReply);
    }

    let object = JSON_OBJECT_RE
        .find(reply)
        .ok_or_else(|| AnalysisError::Malformed("no JSON object in reply".into()))?;

    let raw: RawAnalysis = serde_json::from_str(object.as_str())
        .map_err(|e| AnalysisError::Malformed(e.to_string()))?;

    let score = raw.seo_score.ok_or(AnalysisError::MissingField("seoScore"))?;
    let keywords = raw.keywords.ok_or(AnalysisError::MissingField("keywords"))?;
    let suggestions = raw
        .suggestions
        .ok_or(AnalysisError::MissingField("suggestions"))?;

    Ok(Analysis {
        score: clamp_score(score),
        keywords,
        suggestions,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_bare_json_reply() {
        let reply = r#"{"seoScore": 72, "keywords": ["rust"], "suggestions": ["Add a summary"]}"#;
        let analysis = parse_analysis_reply(reply).unwrap();
        assert_eq!(analysis.score, 72);
        assert_eq!(analysis.keywords, vec!["rust".to_string()]);
        assert_eq!(analysis.suggestions, vec!["Add a summary".to_string()]);
    }

    #[test]
    fn extracts_json_surrounded_by_prose() {
        let reply = "Here is the analysis:\n```json\n{\n  \"seoScore\": 55,\n  \"keywords\": [],\n  \"suggestions\": [\"x\"]\n}\n```\nHope it helps.";
        assert_eq!(parse_analysis_reply(reply).unwrap().score, 55);
    }

    #[test]
    fn clamps_and_rounds_score() {
        let high = r#"{"seoScore": 180.2, "keywords": [], "suggestions": []}"#;
        let low = r#"{"seoScore": -4, "keywords": [], "suggestions": []}"#;
        let frac = r#"{"seoScore": 66.5, "keywords": [], "suggestions": []}"#;
        assert_eq!(parse_analysis_reply(high).unwrap().score, 100);
        assert_eq!(parse_analysis_reply(low).unwrap().score, 0);
        assert_eq!(parse_analysis_reply(frac).unwrap().score, 67);
    }

    #[test]
    fn zero_score_is_a_valid_result() {
        let reply = r#"{"seoScore": 0, "keywords": [], "suggestions": []}"#;
        assert_eq!(parse_analysis_reply(reply).unwrap().score, 0);
    }

    #[test]
    fn accepts_plain_score_field_name() {
        let reply = r#"{"score": 12, "keywords": [], "suggestions": []}"#;
        assert_eq!(parse_analysis_reply(reply).unwrap().score, 12);
    }

    #[test]
    fn empty_reply_rejected() {
        assert_matches!(parse_analysis_reply("  "), Err(AnalysisError::EmptyReply));
    }

    #[test]
    fn reply_without_object_rejected() {
        assert_matches!(
            parse_analysis_reply("I cannot help with that."),
            Err(AnalysisError::Malformed(_))
        );
    }

    #[test]
    fn invalid_json_rejected() {
        assert_matches!(
            parse_analysis_reply("{seoScore: 10,}"),
            Err(AnalysisError::Malformed(_))
        );
    }

    #[test]
    fn missing_fields_rejected() {
        assert_matches!(
            parse_analysis_reply(r#"{"keywords": [], "suggestions": []}"#),
            Err(AnalysisError::MissingField("seoScore"))
        );
        assert_matches!(
            parse_analysis_reply(r#"{"seoScore": 3, "suggestions": []}"#),
            Err(AnalysisError::MissingField("keywords"))
        );
        assert_matches!(
            parse_analysis_reply(r#"{"seoScore": 3, "keywords": []}"#),
            Err(AnalysisError::MissingField("suggestions"))
        );
    }

    #[test]
    fn blank_title_defaults_to_untitled() {
        assert_eq!(analysis_title(""), "Untitled");
        assert_eq!(analysis_title("  "), "Untitled");
        assert_eq!(analysis_title("Launch post"), "Launch post");
    }
}
