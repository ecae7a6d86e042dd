//! Step one of the wizard: learn the company's voice and offering, either
//! from its website or from a manual description.

use anyhow::Result;

use crate::constants::{COMPANY_PROMPT_TEMPLATE, MANUAL_COMPANY_TEMPLATE};
use crate::llm::{LlmContext, send_prompt};

/// Asks the model to review the company website and summarize its voice,
/// values and offering. The response becomes the company profile carried
/// into every later prompt.
///
/// # Errors
///
/// Returns an error if the model call fails or produces an empty response.
pub async fn analyze_company(ctx: &LlmContext<'_>, website: &str) -> Result<String> {
    let prompt = COMPANY_PROMPT_TEMPLATE.replace("{website}", website);
    send_prompt(ctx, prompt).await
}

/// Wraps a user-supplied company description into the profile format used
/// when website analysis is skipped or fails.
pub fn manual_company_profile(description: &str) -> String {
    MANUAL_COMPANY_TEMPLATE.replace("{description}", description)
}
