use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::application::ChatClient;
use crate::domain::{Completion, DomainError};

const NEW_PROMPT_MARKER: &str = "--- NEW USER PROMPT ---";
const CODE_KEYWORDS: [&str; 5] = ["code", "function", "script", "snippet", "implement"];

enum Step {
    Reply(Completion),
    Fail(DomainError),
    Hang(Duration),
}

/// Offline [`ChatClient`].
///
/// Scripted steps are consumed one per call. Once the script is exhausted the
/// client answers with a canned `code` reply when the prompt asks for code and a
/// canned `data` reply otherwise.
pub struct MockChatClient {
    script: Mutex<VecDeque<Step>>,
    prompts: Mutex<Vec<String>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push(Step::Reply(Completion::text(text)))
    }

    pub fn with_blocked(self, reason: impl Into<String>) -> Self {
        self.push(Step::Reply(Completion::blocked(reason)))
    }

    pub fn with_error(self, err: DomainError) -> Self {
        self.push(Step::Fail(err))
    }

    /// Sleep for `delay` before answering, to simulate a hung backend.
    pub fn with_delay(self, delay: Duration) -> Self {
        self.push(Step::Hang(delay))
    }

    /// Every prompt received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn push(self, step: Step) -> Self {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(step);
        self
    }

    fn next_step(&self) -> Option<Step> {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
    }

    fn canned_reply(prompt: &str) -> Completion {
        let request = prompt
            .rfind(NEW_PROMPT_MARKER)
            .map(|i| prompt[i + NEW_PROMPT_MARKER.len()..].trim())
            .unwrap_or(prompt);
        let lowered = request.to_lowercase();

        let reply = if CODE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            json!({
                "response_type": "code",
                "payload": {
                    "language": "python",
                    "code": "def is_palindrome(text: str) -> bool:\n    cleaned = ''.join(c.lower() for c in text if c.isalnum())\n    return cleaned == cleaned[::-1]\n",
                    "explanation": [
                        {"concept": "Normalisation", "description": "Drop punctuation and case before comparing."},
                        {"concept": "Slicing", "description": "`[::-1]` walks the string backwards."}
                    ]
                }
            })
        } else {
            json!({
                "response_type": "data",
                "payload": {
                    "request": request,
                    "summary": "This is an offline reply from the mock backend.",
                    "details": {
                        "backend": "mock",
                        "hints": ["Set GEMINI_API_KEY", "Drop --mock-backend"]
                    }
                }
            })
        };

        Completion::text(reply.to_string())
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete_json(&self, prompt: &str) -> Result<Completion, DomainError> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());

        match self.next_step() {
            Some(Step::Reply(completion)) => Ok(completion),
            Some(Step::Fail(err)) => Err(err),
            Some(Step::Hang(delay)) => {
                tokio::time::sleep(delay).await;
                Ok(Self::canned_reply(prompt))
            }
            None => Ok(Self::canned_reply(prompt)),
        }
    }

    fn model_name(&self) -> &str {
        "mock-chat"
    }
}
