//! Draft entity, update requests, and the snapshot-then-apply update rule.
//!
//! A draft is the mutable working document. Every update goes through
//! [`Draft::apply`], which captures the optional revision from the state
//! *before* any field changes and only then applies the patch.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::revision::{Revision, RevisionLog};
use crate::rich_text::extract_plain_text;
use crate::score::{is_valid_score, MAX_SCORE, MIN_SCORE};
use crate::types::{DbId, Timestamp};

/// Entity name used in `NotFound` errors.
pub const ENTITY_DRAFT: &str = "Draft";

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum serialized content length in characters.
pub const MAX_CONTENT_LEN: usize = 200_000;

/// A user-owned document under iterative improvement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    /// Opaque serialized editor document (may be empty).
    pub content: String,
    pub current_score: i32,
    pub keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub revisions: RevisionLog,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating a draft.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDraft {
    pub title: String,
    pub content: Option<String>,
}

/// Partial update of a draft.
///
/// `None` means "not supplied" and leaves the field as it is; `Some("")`
/// is a real value and overwrites it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub current_score: Option<i32>,
    pub keywords: Option<Vec<String>>,
    pub suggestions: Option<Vec<String>>,
    /// Archive the pre-update state as a revision before applying.
    #[serde(default, alias = "save_revision")]
    pub snapshot: bool,
}

/// Values handed to the persistence layer on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDraft {
    pub owner_id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a draft title (non-empty after trim, at most 200 characters).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title is required".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate serialized content length.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.chars().count() > MAX_CONTENT_LEN {
        return Err(CoreError::Validation(format!(
            "Content must be at most {MAX_CONTENT_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a client-supplied score.
pub fn validate_score(score: i32) -> Result<(), CoreError> {
    if !is_valid_score(score) {
        return Err(CoreError::Validation(format!(
            "Score must be between {MIN_SCORE} and {MAX_SCORE}"
        )));
    }
    Ok(())
}

impl CreateDraft {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title(&self.title)?;
        if let Some(ref content) = self.content {
            validate_content(content)?;
        }
        Ok(())
    }
}

impl DraftPatch {
    /// Check every supplied field before anything is applied.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(ref title) = self.title {
            validate_title(title)?;
        }
        if let Some(ref content) = self.content {
            validate_content(content)?;
        }
        if let Some(score) = self.current_score {
            validate_score(score)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Draft behaviour
// ---------------------------------------------------------------------------

impl Draft {
    /// Snapshot of the current content and analysis state.
    pub fn snapshot(&self, timestamp: Timestamp) -> Revision {
        Revision {
            content: self.content.clone(),
            score: self.current_score,
            keywords: self.keywords.clone(),
            suggestions: self.suggestions.clone(),
            timestamp,
        }
    }

    /// Apply a validated patch.
    ///
    /// When `patch.snapshot` is set, the revision is taken from the state
    /// before any field changes and appended to the log. Returns the appended
    /// revision, if any. `updated_at` is always set to `now`.
    pub fn apply(&mut self, patch: DraftPatch, now: Timestamp) -> Result<Option<Revision>, CoreError> {
        patch.validate()?;

        let appended = if patch.snapshot {
            let revision = self.snapshot(now);
            self.revisions.append(revision.clone());
            Some(revision)
        } else {
            None
        };

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(score) = patch.current_score {
            self.current_score = score;
        }
        if let Some(keywords) = patch.keywords {
            self.keywords = keywords;
        }
        if let Some(suggestions) = patch.suggestions {
            self.suggestions = suggestions;
        }
        self.updated_at = now;

        Ok(appended)
    }

    /// Plain text of the content, as sent to analysis and matched by search.
    pub fn plain_text(&self) -> String {
        extract_plain_text(&self.content)
    }

    /// Whether any analysis result has been recorded.
    pub fn has_analysis(&self) -> bool {
        self.current_score > 0 || !self.keywords.is_empty() || !self.suggestions.is_empty()
    }
}
