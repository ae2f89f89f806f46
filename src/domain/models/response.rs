use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

pub const TIMEOUT_MESSAGE: &str =
    "The request timed out. The agent is taking too long to respond. Please try again.";
pub const AUTH_FAILURE_MESSAGE: &str =
    "Authentication failed: Your API key is invalid or has insufficient permissions.";
pub const MALFORMED_RESPONSE_MESSAGE: &str =
    "The agent returned a malformed response. Please try rephrasing your prompt.";
pub const UNEXPECTED_ERROR_MESSAGE: &str =
    "An unexpected critical error occurred. I am unable to respond at this moment.";
const SAFETY_BLOCK_PREFIX: &str = "Your request was blocked by the safety policy: ";

/// Shape the backend is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Data,
    Code,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Data => "data",
            ResponseType::Code => "code",
        }
    }
}

impl std::fmt::Display for ResponseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A well-formed answer: `{"response_type": ..., "payload": ...}`.
///
/// The `data` payload keeps whatever JSON tree the model chose; only `code`
/// payloads have a fixed record shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "response_type", content = "payload", rename_all = "lowercase")]
pub enum ResponseObject {
    Data(Value),
    Code(CodePayload),
}

impl ResponseObject {
    pub fn response_type(&self) -> ResponseType {
        match self {
            ResponseObject::Data(_) => ResponseType::Data,
            ResponseObject::Code(_) => ResponseType::Code,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Explanation>,
}

impl CodePayload {
    pub fn new(language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            code: Some(code.into()),
            explanation: None,
        }
    }

    pub fn with_explanation(mut self, explanation: Explanation) -> Self {
        self.explanation = Some(explanation);
        self
    }

    /// Lower-cased language tag, `plaintext` when the model left it out.
    pub fn language(&self) -> String {
        match self.language.as_deref().map(str::trim) {
            Some(lang) if !lang.is_empty() => lang.to_lowercase(),
            _ => "plaintext".to_string(),
        }
    }

    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Explanation {
    Text(String),
    Points(Vec<ConceptNote>),
    Other(Value),
}

impl Explanation {
    pub fn is_empty(&self) -> bool {
        match self {
            Explanation::Text(text) => text.trim().is_empty(),
            Explanation::Points(points) => points.is_empty(),
            Explanation::Other(value) => value.is_null(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptNote {
    #[serde(default)]
    pub concept: String,
    #[serde(default)]
    pub description: String,
}

impl ConceptNote {
    pub fn new(concept: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            concept: concept.into(),
            description: description.into(),
        }
    }
}

/// `{"error": "..."}`, told apart from a [`ResponseObject`] by the missing
/// `response_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.error
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Timeout(_) => Self::new(TIMEOUT_MESSAGE),
            DomainError::Unauthorized(_) => Self::new(AUTH_FAILURE_MESSAGE),
            DomainError::SafetyBlock(reason) => Self::new(format!("{SAFETY_BLOCK_PREFIX}{reason}")),
            DomainError::MalformedResponse(_) => Self::new(MALFORMED_RESPONSE_MESSAGE),
            DomainError::Backend(_)
            | DomainError::InvalidInput(_)
            | DomainError::IoError(_)
            | DomainError::Internal(_) => Self::new(UNEXPECTED_ERROR_MESSAGE),
        }
    }
}

/// Everything the response engine can hand back for one turn.
///
/// Serializes to its canonical JSON form, which is what the model sees as
/// history. `data` payloads and unrecognised objects keep every key; `code`
/// payloads keep only `language`, `code` and `explanation`, and a concept
/// without a `description` gets an empty one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AgentReply {
    Response(ResponseObject),
    Error(ErrorResponse),
    /// Valid JSON without a recognised `response_type`; shown as literal text.
    Unrecognized(Value),
}

impl AgentReply {
    /// Strictly parse backend text as JSON and classify it.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| DomainError::malformed(e.to_string()))?;
        Ok(Self::from_value(value))
    }

    pub fn from_value(value: Value) -> Self {
        let map = match value {
            Value::Object(map) => map,
            other => return AgentReply::Unrecognized(other),
        };

        let kind = map
            .get("response_type")
            .map(|v| v.as_str().map(str::to_owned));

        match kind.as_ref().map(|k| k.as_deref()) {
            Some(Some("data")) => {
                let payload = map.get("payload").cloned().unwrap_or(Value::Null);
                AgentReply::Response(ResponseObject::Data(payload))
            }
            Some(Some("code")) => match map
                .get("payload")
                .cloned()
                .map(serde_json::from_value::<CodePayload>)
            {
                Some(Ok(payload)) => AgentReply::Response(ResponseObject::Code(payload)),
                _ => AgentReply::Unrecognized(Value::Object(map)),
            },
            Some(_) => AgentReply::Unrecognized(Value::Object(map)),
            None => match map.get("error").and_then(Value::as_str).map(str::to_owned) {
                Some(message) => AgentReply::Error(ErrorResponse::new(message)),
                None => AgentReply::Unrecognized(Value::Object(map)),
            },
        }
    }

    pub fn response_type(&self) -> Option<ResponseType> {
        match self {
            AgentReply::Response(response) => Some(response.response_type()),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AgentReply::Error(_))
    }

    pub fn as_error(&self) -> Option<&ErrorResponse> {
        match self {
            AgentReply::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Compact JSON, used when the reply is fed back as context.
    pub fn to_canonical_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| UNEXPECTED_ERROR_MESSAGE.to_string())
    }
}

impl From<ErrorResponse> for AgentReply {
    fn from(err: ErrorResponse) -> Self {
        AgentReply::Error(err)
    }
}

impl From<ResponseObject> for AgentReply {
    fn from(response: ResponseObject) -> Self {
        AgentReply::Response(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_data_response() {
        let reply = AgentReply::parse(
            r#"{"response_type": "data", "payload": {"topic": "Photosynthesis"}}"#,
        )
        .unwrap();
        assert_eq!(
            reply,
            AgentReply::Response(ResponseObject::Data(json!({"topic": "Photosynthesis"})))
        );
        assert_eq!(reply.response_type(), Some(ResponseType::Data));
    }

    #[test]
    fn test_parse_code_response_with_concepts() {
        let reply = AgentReply::parse(
            r#"{"response_type": "code", "payload": {
                "language": "Python",
                "code": "print('Hello')",
                "explanation": [{"concept": "print", "description": "writes to stdout"}]
            }}"#,
        )
        .unwrap();

        let AgentReply::Response(ResponseObject::Code(payload)) = reply else {
            panic!("expected code response");
        };
        assert_eq!(payload.language(), "python");
        assert_eq!(payload.code(), "print('Hello')");
        assert_eq!(
            payload.explanation,
            Some(Explanation::Points(vec![ConceptNote::new(
                "print",
                "writes to stdout"
            )]))
        );
    }

    #[test]
    fn test_code_payload_defaults() {
        let payload = CodePayload::default();
        assert_eq!(payload.language(), "plaintext");
        assert_eq!(payload.code(), "");
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = AgentReply::parse("Sure! Here is your answer.").unwrap_err();
        assert!(matches!(err, DomainError::MalformedResponse(_)));
    }

    #[test]
    fn test_missing_or_unknown_response_type_is_unrecognized() {
        let missing = AgentReply::from_value(json!({"payload": {"a": 1}}));
        assert!(matches!(missing, AgentReply::Unrecognized(_)));

        let unknown = AgentReply::from_value(json!({"response_type": "table", "payload": []}));
        assert!(matches!(unknown, AgentReply::Unrecognized(_)));

        let not_object = AgentReply::from_value(json!([1, 2, 3]));
        assert!(matches!(not_object, AgentReply::Unrecognized(_)));
    }

    #[test]
    fn test_error_shape_is_detected() {
        let reply = AgentReply::from_value(json!({"error": "nope"}));
        assert_eq!(reply.as_error().map(ErrorResponse::message), Some("nope"));
    }

    #[test]
    fn test_canonical_string_round_trips_wire_shape() {
        let wire = json!({"response_type": "data", "payload": {"b": 1, "a": [true, null]}});
        let reply = AgentReply::from_value(wire.clone());
        let reparsed: Value = serde_json::from_str(&reply.to_canonical_string()).unwrap();
        assert_eq!(reparsed, wire);
    }

    #[test]
    fn test_canonical_code_form_normalizes_payload() {
        let reply = AgentReply::parse(
            r#"{"response_type": "code", "payload": {
                "language": "Python",
                "code": "pass",
                "runtime": "3.12",
                "explanation": [{"concept": "pass"}]
            }}"#,
        )
        .unwrap();

        assert_eq!(
            reply.to_canonical_string(),
            r#"{"response_type":"code","payload":{"language":"Python","code":"pass","explanation":[{"concept":"pass","description":""}]}}"#
        );
    }

    #[test]
    fn test_error_response_messages() {
        assert_eq!(
            ErrorResponse::from(DomainError::Timeout(60)).message(),
            TIMEOUT_MESSAGE
        );
        assert_eq!(
            ErrorResponse::from(DomainError::safety_block("SAFETY")).message(),
            "Your request was blocked by the safety policy: SAFETY"
        );
        let unexpected = ErrorResponse::from(DomainError::internal("socket exploded at 0xdead"));
        assert_eq!(unexpected.message(), UNEXPECTED_ERROR_MESSAGE);
        assert!(!unexpected.message().contains("0xdead"));
    }
}
