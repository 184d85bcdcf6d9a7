//! Prompt text for SEO analysis requests.

use crate::types::ChatMessage;

/// System instruction sent with every analysis request.
pub const SYSTEM_PROMPT: &str =
    "You are an SEO analysis expert. Always respond with valid JSON only, no additional text.";

/// Build the user message for a title/content pair.
///
/// `title` is expected to be non-blank already (see
/// [`seodraft_core::analysis::analysis_title`]).
pub fn user_prompt(title: &str, content: &str) -> String {
    format!(
        r#"You are an SEO expert. Analyze the following article for SEO optimization.

TITLE: "{title}"
CONTENT: "{content}"

Your task:
1. Extract 5-10 relevant SEO keywords ONLY from the content body.
   - Do NOT use words from the title unless they also appear naturally in the content.
   - Prefer multi-word phrases where appropriate.
2. Compute an SEO score between 0 and 100 based on:
   - Alignment between the content and the given title/heading
   - Keyword relevance and natural density
   - Content length, structure (paragraphs, headings, flow)
   - Readability and clarity for a general audience
3. Generate 3-5 clear, specific, and actionable improvement suggestions.
   - Suggestions must be directly applicable to the provided content.
   - Avoid generic or vague advice.

Output rules:
- Respond with ONLY valid JSON.
- Do NOT include explanations, markdown, or extra text.
- Follow the exact schema and field names below.

Required output format:
{{
  "seoScore": <integer between 0 and 100>,
  "keywords": ["keyword1", "keyword2", "keyword3"],
  "suggestions": [
    "Specific suggestion 1",
    "Specific suggestion 2",
    "Specific suggestion 3"
  ]
}}"#
    )
}

/// The full message list for one analysis request.
pub fn messages(title: &str, content: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(user_prompt(title, content)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_title_and_content() {
        let prompt = user_prompt("Launch post", "We shipped it.");
        assert!(prompt.contains(r#"TITLE: "Launch post""#));
        assert!(prompt.contains(r#"CONTENT: "We shipped it.""#));
        assert!(prompt.contains(r#""seoScore": <integer between 0 and 100>"#));
    }

    #[test]
    fn messages_are_system_then_user() {
        let msgs = messages("t", "c");
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].role, "system");
        assert_eq!(msgs[0].content, SYSTEM_PROMPT);
        assert_eq!(msgs[1].role, "user");
    }
}
