//! Trend discovery: turns company context and user-supplied signals into a
//! list of topic suggestions, and resolves the user's topic choice.

use anyhow::{Result, anyhow, bail};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::TOPIC_PROMPT_TEMPLATE;
use crate::llm::{LlmContext, send_prompt};

const MAX_TOPICS: usize = 12;

static LIST_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[\).\s-]*").expect("Failed to compile LIST_NUMBER regex"));

/// Research signals for topic discovery. All fields are optional, but at
/// least one must be non-empty before topics can be generated.
#[derive(Debug, Clone, Default)]
pub struct TrendSignals {
    pub industry: Option<String>,
    pub audience: Option<String>,
    pub region: Option<String>,
    pub seasonal: Option<String>,
    pub seed_topic: Option<String>,
}

impl TrendSignals {
    fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Industry", &self.industry),
            ("Audience", &self.audience),
            ("Region", &self.region),
            ("Seasonal", &self.seasonal),
            ("Seed", &self.seed_topic),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(|text| (label, text))
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn render(&self) -> String {
        self.entries()
            .iter()
            .map(|(label, value)| format!("- {label}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Asks the model for trending blog topics grounded in the given signals
/// and returns them as a cleaned list, at most twelve entries.
///
/// # Errors
///
/// Returns an error when no signal is provided or the model call fails.
pub async fn discover_topics(
    ctx: &LlmContext<'_>,
    company_info: &str,
    signals: &TrendSignals,
) -> Result<Vec<String>> {
    if signals.is_empty() {
        bail!("At least one trend signal is required: industry, audience, region, seasonal or seed topic");
    }

    let entries = signals.entries();
    info!(
        "Signals used: {}",
        entries
            .iter()
            .map(|(label, _)| *label)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let prompt = TOPIC_PROMPT_TEMPLATE
        .replace("{today}", &today)
        .replace("{company}", company_info)
        .replace("{signals}", &signals.render());

    let raw = send_prompt(ctx, prompt).await?;
    Ok(parse_topic_list(&raw))
}

/// Strips list numbering and bullet characters from each line of a model
/// response and returns the remaining topics, capped at twelve.
pub fn parse_topic_list(raw: &str) -> Vec<String> {
    raw.lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            let topic = LIST_NUMBER.replace(line, "");
            let topic = topic
                .trim_matches(|c: char| c == '-' || c == '\u{2022}' || c.is_whitespace())
                .to_string();
            (!topic.is_empty()).then_some(topic)
        })
        .take(MAX_TOPICS)
        .collect()
}

/// Resolves the user's topic choice against the suggestion list: a 1-based
/// index picks from the list, free text is used verbatim, and no choice
/// defaults to the first suggestion.
///
/// # Errors
///
/// Returns an error for an out-of-range index, or when no choice was given
/// and the suggestion list is empty.
pub fn resolve_topic(topics: &[String], choice: Option<String>) -> Result<String> {
    match choice {
        Some(choice) => {
            if let Ok(index) = choice.parse::<usize>() {
                index
                    .checked_sub(1)
                    .and_then(|position| topics.get(position))
                    .cloned()
                    .ok_or_else(|| {
                        anyhow!(
                            "Topic index {index} is out of range ({} suggestions)",
                            topics.len()
                        )
                    })
            } else {
                Ok(choice)
            }
        }
        None => topics
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("No topics were suggested; try adding one more signal")),
    }
}
