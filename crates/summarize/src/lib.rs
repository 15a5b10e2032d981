//! Chat-completions summarizer for extracted document text.
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint. Failures are
//! logged and replaced by the core fallback summary.

use mailer_core::{truncate_chars, Error, Result, Summarizer, FALLBACK_SUMMARY};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const SYSTEM_PROMPT: &str = "You write clear and professional business reports.";

const INSTRUCTIONS: &str = "\
Based on the information provided below (from Excel, Word, or PDF), write a formal, readable summary structured into sections such as (but not limited to):

- Leadership or Personnel Updates
- Strategic Initiatives
- Key Operational Highlights
- Financial or Performance Metrics (if available)
- Business Development and Marketing Activities
- External Collaborations or Visits
- Next Steps or Plans

Your output should:
- Be written in full sentences and paragraph form (no bullet points)
- Be suitable for inclusion in a report shared with stakeholders
- Maintain a professional and concise tone
- Avoid generic phrases like \"please refer to the document\" or \"as seen in Sheet1\"
- Not mention the data was extracted or parsed";

/// Summarizer backed by a chat-completions API.
pub struct ChatSummarizer {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_chars: usize,
    temperature: f32,
}

impl ChatSummarizer {
    /// Create a summarizer for the default endpoint and model.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_chars: 0,
            temperature: 0.3,
        }
    }

    /// Set the API base URL; a trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the chat model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Cap the input text at `max_chars` characters (0 = no cap).
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Build the user prompt for `text`, applying the character cap.
    pub fn build_prompt(&self, text: &str) -> String {
        format!(
            "{}\n\nHere is the input data:\n\n{}",
            INSTRUCTIONS,
            truncate_chars(text, self.max_chars)
        )
    }

    /// Request a summary, surfacing transport and API errors.
    pub fn try_summarize(&self, text: &str) -> Result<String> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: self.build_prompt(text),
                },
            ],
            temperature: self.temperature,
        };

        log::debug!("Requesting summary from {} ({})", self.base_url, self.model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| Error::Summarize(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().unwrap_or_default();
            return Err(Error::Summarize(format!(
                "API returned {}: {}",
                status, error_body
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .map_err(|e| Error::Summarize(format!("Failed to parse response: {}", e)))?;

        extract_content(chat_response)
    }
}

impl Summarizer for ChatSummarizer {
    fn summarize(&self, text: &str) -> String {
        match self.try_summarize(text) {
            Ok(summary) => {
                log::info!("Summary generated successfully");
                summary
            }
            Err(e) => {
                log::error!("Error generating summary: {}", e);
                FALLBACK_SUMMARY.to_string()
            }
        }
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Trimmed content of the first choice; an empty answer is an error.
fn extract_content(response: ChatResponse) -> Result<String> {
    let content = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content.trim().to_string())
        .unwrap_or_default();

    if content.is_empty() {
        return Err(Error::Summarize("Empty response from API".to_string()));
    }

    Ok(content)
}
