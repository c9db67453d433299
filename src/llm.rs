//! LLM HTTP adapter for route proposals.
//!
//! Talks to a Gemini-style `generateContent` endpoint. Every upstream
//! failure maps to an [`AdvisorOutcome`] variant; nothing from this
//! module escapes as an error type.

use std::env;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::advisor::{AdvisorOutcome, AdvisorRequest, FallbackReason, RouteAdvisor};

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    /// Missing key means the advisor bows out before any network call.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: None,
            timeout_secs: 8,
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("LLM_BASE_URL").unwrap_or(defaults.base_url),
            model: env::var("LLM_MODEL").unwrap_or(defaults.model),
            api_key: env::var("LLM_API_KEY").ok().filter(|key| !key.is_empty()),
            timeout_secs: env::var("LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmAdvisor {
    config: LlmConfig,
    client: reqwest::Client,
}

impl LlmAdvisor {
    pub fn new(config: LlmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl RouteAdvisor for LlmAdvisor {
    async fn propose(&self, request: &AdvisorRequest<'_>) -> AdvisorOutcome {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return AdvisorOutcome::Fallback(FallbackReason::MissingCredentials);
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let body = json!({
            "contents": [
                { "parts": [{ "text": build_prompt(request) }] }
            ]
        });

        let response = match self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                debug!(%error, "LLM request failed");
                return AdvisorOutcome::Fallback(FallbackReason::Upstream);
            }
        };

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return AdvisorOutcome::RateLimited,
            StatusCode::PAYMENT_REQUIRED => return AdvisorOutcome::QuotaExhausted,
            status if !status.is_success() => {
                debug!(%status, "LLM responded with an error status");
                return AdvisorOutcome::Fallback(FallbackReason::Upstream);
            }
            _ => {}
        }

        let payload: GenerateContentResponse = match response.json().await {
            Ok(payload) => payload,
            Err(error) => {
                debug!(%error, "LLM response body was not valid JSON");
                return AdvisorOutcome::Fallback(FallbackReason::MalformedResponse);
            }
        };

        match payload.first_text().and_then(parse_proposal) {
            Some((order, reasoning)) => AdvisorOutcome::Proposed { order, reasoning },
            None => AdvisorOutcome::Fallback(FallbackReason::MalformedResponse),
        }
    }
}

/// Behavioral contract for the model: consider geography, traffic,
/// meal times, and daylight; answer with strict JSON.
fn build_prompt(request: &AdvisorRequest<'_>) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "You are a trip planning assistant. Reorder the stops below into the most \
         sensible visiting order for one day. Consider geographic clustering, typical \
         local traffic patterns, meal times for dining stops, and whether outdoor \
         activities suit the time of day.\n\n",
    );
    prompt.push_str(&format!("Day: {}\n", day_label(request.day_date)));
    if let Some(start) = request.start_location {
        prompt.push_str(&format!("Starting from: {:.5},{:.5}\n", start.lat, start.lng));
    }
    if !request.prioritize_by_type.is_empty() {
        prompt.push_str(&format!(
            "Prefer scheduling these categories early: {}\n",
            request.prioritize_by_type.join(", ")
        ));
    }
    prompt.push_str("\nStops:\n");
    for (index, stop) in request.stops.iter().enumerate() {
        let coords = stop
            .location()
            .map(|l| format!("{:.5},{:.5}", l.lat, l.lng))
            .unwrap_or_else(|| "unknown".to_string());
        prompt.push_str(&format!(
            "{}. {} [{}] at {}\n",
            index + 1,
            stop.title,
            stop.item_type.as_str(),
            coords
        ));
    }
    prompt.push_str(
        "\nRespond with ONLY a JSON object of the shape \
         {\"order\": [1-indexed positions], \"reasoning\": \"one short sentence\"}. \
         Every position must reference the numbered list above.",
    );
    prompt
}

/// Adds the weekday when the date parses as ISO; otherwise the raw
/// string is passed through untouched.
fn day_label(day_date: &str) -> String {
    match NaiveDate::parse_from_str(day_date, "%Y-%m-%d") {
        Ok(date) => format!("{} ({})", day_date, date.format("%A")),
        Err(_) => day_date.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .find_map(|part| part.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct RawProposal {
    order: Vec<i64>,
    #[serde(default)]
    reasoning: Option<String>,
}

/// Pulls the proposal out of raw model text, which may wrap the JSON
/// in prose or markdown fencing.
fn parse_proposal(raw: &str) -> Option<(Vec<i64>, String)> {
    let object = extract_json_object(raw)?;
    let proposal: RawProposal = serde_json::from_str(object).ok()?;
    Some((proposal.order, proposal.reasoning.unwrap_or_default()))
}

/// Returns the first balanced JSON object substring that parses.
///
/// Scans brace depth while skipping string literals, so `}` inside a
/// reasoning string does not terminate the object early.
fn extract_json_object(raw: &str) -> Option<&str> {
    let mut search_from = 0;
    while let Some(relative) = raw[search_from..].find('{') {
        let open = search_from + relative;
        if let Some(end) = balanced_object_end(&raw[open..]) {
            let candidate = &raw[open..open + end];
            if serde_json::from_str::<serde_json::Value>(candidate).is_ok() {
                return Some(candidate);
            }
        }
        search_from = open + 1;
    }
    None
}

/// Byte length of the balanced object starting at `{`, if any.
fn balanced_object_end(raw: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in raw.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(offset + ch.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}
