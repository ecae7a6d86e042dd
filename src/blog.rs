//! Blog generation: assembles the generation prompt from everything the
//! wizard has gathered, and splits the model output into the post body and
//! its internal link plan.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::constants::{BLOG_MARKER, BLOG_PROMPT_TEMPLATE, LINK_CANDIDATE_PROMPT_CAP, LINKS_MARKER};
use crate::llm::{LlmContext, send_prompt};
use crate::page::PageRecord;
use crate::{AnchorStyle, WordRange};

static JSON_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[\s*\{.*\}\s*\]").expect("Failed to compile JSON_ARRAY regex"));

/// One internal link suggestion from the model. Missing fields default to
/// empty strings rather than failing the parse.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InternalLink {
    #[serde(default)]
    pub anchor_text: String,
    #[serde(default)]
    pub target_url: String,
    #[serde(default)]
    pub placement_note: String,
    #[serde(default)]
    pub why: String,
}

/// A generated post: markdown body plus the suggested internal links.
#[derive(Debug, PartialEq, Eq)]
pub struct BlogPost {
    pub body: String,
    pub internal_links: Vec<InternalLink>,
}

/// Everything the generation prompt needs.
pub struct BlogRequest<'a> {
    pub company_info: &'a str,
    pub topic: &'a str,
    pub keywords: &'a str,
    pub word_range: WordRange,
    pub anchor_style: AnchorStyle,
    pub link_count: usize,
    pub inventory: &'a [PageRecord],
}

/// Generates the blog post and its internal link plan.
///
/// # Errors
///
/// Returns an error if the model call fails or produces an empty response.
/// A response with a missing or malformed link section still succeeds, with
/// an empty link list.
pub async fn generate_blog(ctx: &LlmContext<'_>, request: &BlogRequest<'_>) -> Result<BlogPost> {
    let prompt = BLOG_PROMPT_TEMPLATE
        .replace("{company}", request.company_info)
        .replace("{topic}", request.topic)
        .replace("{length}", request.word_range.as_spec())
        .replace("{keywords}", request.keywords)
        .replace("{candidates}", &render_link_candidates(request.inventory))
        .replace("{link_count}", &request.link_count.to_string())
        .replace("{anchor_style}", request.anchor_style.as_prompt());

    let raw = send_prompt(ctx, prompt).await?;
    Ok(split_blog_output(&raw))
}

/// Renders the inventory as the closed candidate block the prompt allows
/// links to be drawn from.
pub fn render_link_candidates(inventory: &[PageRecord]) -> String {
    if inventory.is_empty() {
        return "(none found)".to_string();
    }

    inventory
        .iter()
        .take(LINK_CANDIDATE_PROMPT_CAP)
        .map(|page| {
            format!(
                "- URL: {}\n  Title: {}\n  H1: {}\n  Description: {}",
                page.url, page.title, page.h1, page.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits a raw model response into body and link plan. The body has the
/// blog marker removed and is trimmed; everything after the links marker is
/// parsed as JSON.
pub fn split_blog_output(raw: &str) -> BlogPost {
    let (body, internal_links) = match raw.split_once(LINKS_MARKER) {
        Some((body, links_tail)) => (body, extract_links_json(links_tail.trim())),
        None => (raw, Vec::new()),
    };

    BlogPost {
        body: body.replace(BLOG_MARKER, "").trim().to_string(),
        internal_links,
    }
}

/// Parses the link suggestions, tolerating prose or code fences around the
/// JSON array. Unrecoverable JSON degrades to an empty list.
fn extract_links_json(raw: &str) -> Vec<InternalLink> {
    if let Ok(links) = serde_json::from_str(raw) {
        return links;
    }

    if let Some(found) = JSON_ARRAY.find(raw)
        && let Ok(links) = serde_json::from_str(found.as_str())
    {
        return links;
    }

    Vec::new()
}

/// Renders the post and its link plan as one markdown document.
pub fn render_markdown(post: &BlogPost) -> String {
    let mut output = post.body.clone();

    if !post.internal_links.is_empty() {
        output.push_str("\n\n## Internal Link Suggestions\n");
        for link in &post.internal_links {
            output.push_str(&format!(
                "\n- **{}** -> {}\n  {} ({})\n",
                link.anchor_text, link.target_url, link.placement_note, link.why
            ));
        }
    }

    output
}
