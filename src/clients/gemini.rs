//! Client for the Gemini generative-language API.
//!
//! Both workflow operations go through the same `generateContent` endpoint:
//! classification sends a constrained labeling prompt, summarization sends
//! the caller's prompt followed by the transcript.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ClientError, Summarizer};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Client for the Gemini REST API.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    /// Create a client pointed at the production API.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        Self::with_base_url(api_key, model, timeout, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
        base_url: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn generate(&self, prompt: String) -> Result<String, ClientError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: GenerateResponse = response.json().await?;
        let text: String = body
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ClientError::Api("model returned no candidates".to_string()));
        }

        Ok(text)
    }
}

fn classification_prompt(title: &str, description: &str, categories: &[String]) -> String {
    let category_list = categories.join(", ");
    format!(
        "Given the following video title and description, classify the video \
         into one of these categories: {category_list}.\n\
         If none of the categories apply, respond with \"Other\".\n\
         Respond with only the category name.\n\n\
         Title: {title}\n\
         Description: {description}"
    )
}

#[async_trait]
impl Summarizer for GeminiClient {
    async fn classify(
        &self,
        title: &str,
        description: &str,
        categories: &[String],
    ) -> Result<String, ClientError> {
        debug!("requesting video classification");
        let text = self
            .generate(classification_prompt(title, description, categories))
            .await?;
        Ok(text.trim().to_string())
    }

    async fn summarize(&self, text: &str, prompt: &str) -> Result<String, ClientError> {
        debug!("requesting summary");
        self.generate(format!("{prompt}\n\nTranscript:\n{text}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_prompt_lists_categories() {
        let categories = vec!["Finance".to_string(), "Sports".to_string()];
        let prompt = classification_prompt("Fed Decision", "Rates explained", &categories);

        assert!(prompt.contains("Finance, Sports"));
        assert!(prompt.contains("Title: Fed Decision"));
        assert!(prompt.contains("Description: Rates explained"));
        assert!(prompt.contains("only the category name"));
    }
}
