//! Repurposes a finished blog post into two short-form formats: a Google
//! Business Profile post and a social media post.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::REPURPOSE_PROMPT_TEMPLATE;
use crate::llm::{LlmContext, send_prompt};

static PROFILE_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)1\..*?(?=2\.)").expect("Failed to compile PROFILE_SECTION regex"));
static SOCIAL_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)2\..*").expect("Failed to compile SOCIAL_SECTION regex"));

/// Two platform-specific rewrites of one blog post. A section the model did
/// not produce is an empty string.
#[derive(Debug, PartialEq, Eq)]
pub struct RepurposedContent {
    pub business_profile: String,
    pub social: String,
}

/// Rewrites `blog` into the two short-form formats.
///
/// # Errors
///
/// Returns an error if the model call fails or produces an empty response.
pub async fn repurpose_blog(ctx: &LlmContext<'_>, blog: &str) -> Result<RepurposedContent> {
    let prompt = REPURPOSE_PROMPT_TEMPLATE.replace("{blog}", blog);
    let raw = send_prompt(ctx, prompt).await?;
    Ok(split_formats(&raw))
}

/// Splits the model output on its numbered sections.
pub fn split_formats(raw: &str) -> RepurposedContent {
    RepurposedContent {
        business_profile: PROFILE_SECTION
            .find(raw)
            .map(|section| section.as_str().trim().to_string())
            .unwrap_or_default(),
        social: SOCIAL_SECTION
            .find(raw)
            .map(|section| section.as_str().trim().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::split_formats;

    #[test]
    fn splits_both_numbered_sections() {
        let raw = "1. GBP post body here. [412]\n\n2. Social post body here. [655]";
        let content = split_formats(raw);

        assert_eq!(content.business_profile, "1. GBP post body here. [412]");
        assert_eq!(content.social, "2. Social post body here. [655]");
    }

    #[test]
    fn missing_sections_yield_empty_strings() {
        let content = split_formats("no numbered sections at all");
        assert_eq!(content.business_profile, "");
        assert_eq!(content.social, "");

        let only_social = split_formats("2. Just the social half");
        assert_eq!(only_social.business_profile, "");
        assert_eq!(only_social.social, "2. Just the social half");
    }
}
