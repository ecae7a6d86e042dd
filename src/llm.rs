//! Shared plumbing for talking to the configured language model: request
//! pacing, response cleanup and the context passed to every wizard step.

use std::time::Duration;

use anyhow::Result;
use llm::chat::{ChatMessage, ChatProvider};
use once_cell::sync::Lazy;
use rate_guard::{RateLimit, StdTokenBucket, TokenBucketBuilder};
use regex::Regex;

use crate::constants::THINK_STRIPPER;

static THINK_STRIPPER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(THINK_STRIPPER).expect("Failed to compile THINK_STRIPPER regex"));

/// Configuration containing shared data for model calls.
pub struct LlmContext<'a> {
    /// Model used for every wizard step.
    pub model: &'a dyn ChatProvider,
    /// Rate limiter for controlling request frequency.
    pub rate_limiter: Option<&'a StdTokenBucket>,
}

/// Builds a token bucket that spaces requests to `rpm` per minute. Returns
/// `None` when no limit was requested or the bucket cannot be built.
pub fn rpm_limiter(rpm: Option<u32>) -> Option<StdTokenBucket> {
    rpm.and_then(|rpm| {
        let capacity = u64::from(rpm.max(1));
        let refill_interval = Duration::from_secs_f64(60.0 / capacity as f64);

        TokenBucketBuilder::builder()
            .capacity(capacity)
            .refill_amount(1_u64)
            .refill_every(refill_interval)
            .with_time(rate_guard::StdTimeSource::new())
            .with_precision::<rate_guard::Nanos>()
            .build()
            .ok()
    })
}

/// Sends one prompt to the model and returns the cleaned response text:
/// `<think>` blocks are stripped and the result is trimmed.
///
/// # Errors
///
/// Returns an error if the chat call fails or the model returns an empty
/// response.
pub async fn send_prompt(ctx: &LlmContext<'_>, prompt: String) -> Result<String> {
    if let Some(limiter) = ctx.rate_limiter {
        loop {
            match limiter.try_acquire(1) {
                Ok(()) => break,
                Err(_) => {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
            }
        }
    }

    let messages = vec![ChatMessage::user().content(prompt).build()];

    let response = ctx
        .model
        .chat(&messages)
        .await
        .map_err(|err| anyhow::anyhow!("LLM error: {err}."))?
        .to_string();

    let text = THINK_STRIPPER_REGEX
        .replace_all(&response, "")
        .trim()
        .to_owned();

    if text.is_empty() {
        anyhow::bail!("Model returned an empty response");
    }

    Ok(text)
}
