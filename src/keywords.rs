//! SEO keyword research for the chosen topic.

use anyhow::Result;

use crate::constants::KEYWORD_PROMPT_TEMPLATE;
use crate::llm::{LlmContext, send_prompt};

/// Asks the model for trending, high-interest keywords for `topic`. The raw
/// list text is carried into the blog prompt as-is.
///
/// # Errors
///
/// Returns an error if the model call fails or produces an empty response.
pub async fn research_keywords(ctx: &LlmContext<'_>, topic: &str) -> Result<String> {
    let prompt = KEYWORD_PROMPT_TEMPLATE.replace("{topic}", topic);
    send_prompt(ctx, prompt).await
}
