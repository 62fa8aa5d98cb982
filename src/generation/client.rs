//! HTTP client for the plan/quiz generation service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::GenerationService;
use super::error::GenerationError;
use super::models::{
    GeneratedPlan, PlanEnvelope, PlanRequest, QuizEnvelope, QuizQuestion, QuizRequest,
};

/// Generation service client speaking JSON over HTTP
#[derive(Debug, Clone)]
pub struct HttpGenerationClient {
    /// HTTP client
    client: Client,
    /// Service base URL without trailing slash
    base_url: String,
}

impl HttpGenerationClient {
    /// Plan generation endpoint
    const PLAN_PATH: &'static str = "/generate-plan";
    /// Quiz generation endpoint
    const QUIZ_PATH: &'static str = "/generate-quiz";

    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// The base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a JSON body and decode the JSON response envelope
    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, GenerationError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        let body = Self::success_body(response).await?;

        Ok(serde_json::from_str(&body)?)
    }

    /// Read the body of a successful response, or turn the status into an error
    async fn success_body(response: Response) -> Result<String, GenerationError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "request failed".to_string());
            tracing::warn!("Generation service returned {}: {}", status, message);
            return Err(GenerationError::Status { status: status.as_u16(), message });
        }

        Ok(response.text().await?)
    }
}

/// Longest plain-text error body shown to the user, in characters
const MAX_PLAIN_MESSAGE: usize = 200;

/// Pull a readable message out of an error body (`{"error": ...}` or short plain text)
///
/// Markup pages (proxy error pages and the like) yield `None` so the caller
/// falls back to the reason phrase.
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("error")
            .or_else(|| value.get("detail"))
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string),
        Err(_) if body.starts_with('<') => None,
        Err(_) => {
            let line = body.lines().next().unwrap_or_default().trim();
            let mut message: String = line.chars().take(MAX_PLAIN_MESSAGE).collect();
            if line.chars().count() > MAX_PLAIN_MESSAGE || body.lines().nth(1).is_some() {
                message.push_str("...");
            }
            Some(message)
        }
    }
}

#[async_trait]
impl GenerationService for HttpGenerationClient {
    async fn generate_plan(&self, request: &PlanRequest) -> Result<GeneratedPlan, GenerationError> {
        let envelope: PlanEnvelope = self.post(Self::PLAN_PATH, request).await?;
        envelope.into_result()
    }

    async fn generate_quiz(
        &self,
        request: &QuizRequest,
    ) -> Result<Vec<QuizQuestion>, GenerationError> {
        let envelope: QuizEnvelope = self.post(Self::QUIZ_PATH, request).await?;
        envelope.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let client =
            HttpGenerationClient::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.endpoint("/generate-plan"), "http://localhost:8000/generate-plan");
    }

    #[test]
    fn error_message_prefers_error_field() {
        assert_eq!(error_message(r#"{"error":"bad topic"}"#), Some("bad topic".into()));
        assert_eq!(error_message(r#"{"detail":"not found"}"#), Some("not found".into()));
        assert_eq!(error_message("Internal Server Error"), Some("Internal Server Error".into()));
        assert_eq!(error_message("   "), None);
        assert_eq!(error_message(r#"{"code":7}"#), None);
        assert_eq!(error_message(r#"{"error":"  "}"#), None);
    }

    #[test]
    fn markup_error_pages_are_not_shown() {
        let page = "<html><body><h1>502 Bad Gateway</h1></body></html>";
        assert_eq!(error_message(page), None);
        assert_eq!(error_message("<!DOCTYPE html><html></html>"), None);
    }

    #[test]
    fn long_plain_text_is_truncated() {
        let body = "x".repeat(500);
        let message = error_message(&body).unwrap();
        assert_eq!(message.chars().count(), MAX_PLAIN_MESSAGE + 3);
        assert!(message.ends_with("..."));

        assert_eq!(error_message("upstream timed out\nretry later"), Some("upstream timed out...".into()));
    }
}
