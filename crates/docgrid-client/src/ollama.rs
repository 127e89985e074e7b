//! Ollama client implementation
//!
//! Talks to a local Ollama instance's generate API. One extraction call is
//! one non-streaming generate request whose prompt comes from
//! [`PromptBuilder`](crate::prompt::PromptBuilder) and whose output goes
//! through [`parse_answer`](crate::parser::parse_answer).

use crate::parser::parse_answer;
use crate::prompt::PromptBuilder;
use async_trait::async_trait;
use docgrid_domain::traits::ExtractionClient;
use docgrid_domain::{Column, Document, ExtractionCell, ExtractionFailure};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for one extraction request (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Ollama API client for local model inference
pub struct OllamaClient {
    endpoint: String,
    client: reqwest::Client,
    timeout: Duration,
}

/// Request body for the Ollama generate API
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    format: &'a str,
}

/// Response from the Ollama generate API
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaClient {
    /// Create a client against an explicit endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a client against `http://localhost:11434`
    pub fn local() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }

    /// Override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::local()
    }
}

#[async_trait]
impl ExtractionClient for OllamaClient {
    async fn extract(
        &self,
        document: &Document,
        column: &Column,
        model: &str,
    ) -> Result<ExtractionCell, ExtractionFailure> {
        let prompt = PromptBuilder::new(document, column).build();
        debug!(
            document = %document.name,
            column = %column.name,
            prompt_len = prompt.len(),
            "sending extraction request"
        );

        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
            format: "json",
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.endpoint))
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractionFailure::Network(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ExtractionFailure::RateLimited);
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ExtractionFailure::Network(format!(
                "status {}: {}",
                status, detail
            )));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ExtractionFailure::MalformedResponse(e.to_string()))?;

        parse_answer(&generated.response).map_err(ExtractionFailure::MalformedResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = OllamaClient::local();
        assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(client.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_with_timeout() {
        let client = OllamaClient::local().with_timeout(Duration::from_secs(5));
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_generate_request_shape() {
        let body = GenerateRequest {
            model: "llama3",
            prompt: "p".to_string(),
            stream: false,
            format: "json",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama3");
        assert_eq!(json["stream"], false);
        assert_eq!(json["format"], "json");
    }
}
