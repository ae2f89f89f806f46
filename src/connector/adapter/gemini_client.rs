use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{Completion, DomainError};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
const GENERATE_PATH: &str = "/v1beta/models";
const JSON_MIME_TYPE: &str = "application/json";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Finish reasons that mean the candidate was withheld for policy reasons.
const BLOCKING_FINISH_REASONS: [&str; 4] = ["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    contents: Vec<ApiContent<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct ApiContent<'a> {
    role: &'a str,
    parts: Vec<ApiPart<'a>>,
}

#[derive(Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
}

/// Minimal subset of the `generateContent` response we care about.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl ApiResponse {
    fn into_completion(self) -> Result<Completion, DomainError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Ok(Completion::blocked(reason));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::backend("GeminiClient: response has no candidates"))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        match candidate.finish_reason.as_deref() {
            Some(reason) if text.is_empty() && BLOCKING_FINISH_REASONS.contains(&reason) => {
                Ok(Completion::blocked(reason))
            }
            _ if text.is_empty() => Err(DomainError::backend(format!(
                "GeminiClient: candidate has no text (finish reason {:?})",
                candidate.finish_reason
            ))),
            _ => Ok(Completion::Text(text)),
        }
    }
}

/// HTTP client for the Gemini `generateContent` API.
///
/// Implements [`ChatClient`] so the response engine stays decoupled from
/// transport and serialization details. Every request asks for
/// `application/json` output.
///
/// The client itself sets only a connect timeout; the overall 60-second budget
/// is enforced by the caller, which drops the request future when it expires.
///
/// ```text
/// GEMINI_API_KEY=...                     (required)
/// GEMINI_MODEL=gemini-2.5-flash
/// GEMINI_BASE_URL=https://generativelanguage.googleapis.com
/// ```
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + path + model + method).
    url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let model: String = model.into();
        let url = format!(
            "{}{GENERATE_PATH}/{model}:generateContent",
            base.trim_end_matches('/')
        );
        Self {
            client: reqwest::Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model,
            url,
        }
    }

    /// Backend settings read from the environment:
    ///
    /// | Variable          | Default                                     |
    /// |-------------------|---------------------------------------------|
    /// | `GEMINI_API_KEY`  | required; `None` when absent or blank       |
    /// | `GEMINI_MODEL`    | `gemini-2.5-flash`                          |
    /// | `GEMINI_BASE_URL` | `https://generativelanguage.googleapis.com` |
    pub fn configured_api_key() -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }

    pub fn configured_model() -> String {
        std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string())
    }

    pub fn configured_base_url() -> String {
        std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn map_status(status: StatusCode, body: &str) -> DomainError {
        let key_rejected = status == StatusCode::BAD_REQUEST && body.contains("API_KEY_INVALID");
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN || key_rejected {
            DomainError::unauthorized(format!("GeminiClient: API returned {status}"))
        } else {
            DomainError::backend(format!("GeminiClient: API returned {status}"))
        }
    }

    fn map_transport(err: reqwest::Error) -> DomainError {
        if err.is_timeout() {
            DomainError::Timeout(CONNECT_TIMEOUT.as_secs())
        } else {
            DomainError::backend(format!("GeminiClient: request failed: {err}"))
        }
    }
}

#[async_trait]
impl ChatClient for GeminiClient {
    async fn complete_json(&self, prompt: &str) -> Result<Completion, DomainError> {
        let request = ApiRequest {
            contents: vec![ApiContent {
                role: "user",
                parts: vec![ApiPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
            },
        };

        debug!("GeminiClient: POST {}", self.url);
        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(Self::map_transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("GeminiClient: API returned {status}: {body}");
            return Err(Self::map_status(status, &body));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::backend(format!("GeminiClient: failed to parse response: {e}"))
        })?;

        api_response.into_completion()
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion(body: &str) -> Result<Completion, DomainError> {
        serde_json::from_str::<ApiResponse>(body)
            .unwrap()
            .into_completion()
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        std::env::set_var(API_KEY_ENV, "   ");
        assert_eq!(GeminiClient::configured_api_key(), None);

        std::env::set_var(API_KEY_ENV, "secret");
        assert_eq!(GeminiClient::configured_api_key().as_deref(), Some("secret"));

        std::env::remove_var(API_KEY_ENV);
        assert_eq!(GeminiClient::configured_api_key(), None);
    }

    #[test]
    fn test_url_includes_model_and_method() {
        let client = GeminiClient::new("k", "gemini-2.5-flash", "http://localhost:8080/");
        assert_eq!(
            client.url(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_asks_for_json_output() {
        let request = ApiRequest {
            contents: vec![ApiContent {
                role: "user",
                parts: vec![ApiPart { text: "hi" }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
            },
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn test_text_parts_are_concatenated() {
        let result = completion(
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}, "finishReason": "STOP"}]}"#,
        );
        assert_eq!(result.unwrap(), Completion::text(r#"{"a":1}"#));
    }

    #[test]
    fn test_prompt_feedback_block() {
        let result = completion(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#);
        assert_eq!(result.unwrap(), Completion::blocked("SAFETY"));
    }

    #[test]
    fn test_candidate_safety_finish_is_a_block() {
        let result = completion(r#"{"candidates": [{"finishReason": "PROHIBITED_CONTENT"}]}"#);
        assert_eq!(result.unwrap(), Completion::blocked("PROHIBITED_CONTENT"));
    }

    #[test]
    fn test_empty_response_is_a_backend_error() {
        let result = completion(r#"{"candidates": []}"#);
        assert!(matches!(result, Err(DomainError::Backend(_))));
    }

    #[test]
    fn test_status_mapping() {
        assert!(GeminiClient::map_status(StatusCode::FORBIDDEN, "").is_unauthorized());
        assert!(GeminiClient::map_status(StatusCode::UNAUTHORIZED, "").is_unauthorized());
        assert!(GeminiClient::map_status(
            StatusCode::BAD_REQUEST,
            r#"{"error": {"details": [{"reason": "API_KEY_INVALID"}]}}"#
        )
        .is_unauthorized());
        assert!(!GeminiClient::map_status(StatusCode::BAD_REQUEST, "bad field").is_unauthorized());
        assert!(!GeminiClient::map_status(StatusCode::INTERNAL_SERVER_ERROR, "").is_unauthorized());
    }
}
