use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::application::{ChatClient, RespondUseCase};
use crate::domain::{Conversation, ConversationEntry, DomainError, ExamplePrompt};

/// Session-scoped state: the running conversation and the engine that answers it.
///
/// All mutation goes through `&mut self`, so at most one backend call is in
/// flight per session.
pub struct ChatSession {
    id: String,
    conversation: Conversation,
    respond: RespondUseCase,
}

impl ChatSession {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            conversation: Conversation::new(),
            respond: RespondUseCase::new(client),
        }
    }

    /// Append the user's turn, wait for the reply and append it as the agent's
    /// turn. Returns the agent entry.
    ///
    /// Backend failures still produce an agent entry carrying the error
    /// message; only a blank prompt is rejected, before anything is appended.
    pub async fn submit(&mut self, prompt: &str) -> Result<&ConversationEntry, DomainError> {
        if prompt.trim().is_empty() {
            return Err(DomainError::invalid_input("prompt must not be empty"));
        }

        let turn = self.conversation.len() / 2 + 1;
        let entry = self.conversation.push(ConversationEntry::user(prompt));
        debug!("Session {}: turn {} (entry {})", self.id, turn, entry.id());

        // The window ends with the user turn just appended.
        let reply = self
            .respond
            .execute(prompt, self.conversation.entries())
            .await;

        let entry = self.conversation.push(ConversationEntry::agent(reply));
        debug!("Session {}: agent entry {}", self.id, entry.id());
        Ok(entry)
    }

    /// Submit one of the canned prompts by its 1-based number.
    pub async fn submit_example(&mut self, number: usize) -> Result<&ConversationEntry, DomainError> {
        let example = ExamplePrompt::by_number(number).ok_or_else(|| {
            DomainError::invalid_input(format!(
                "no example prompt #{number}; choose 1-{}",
                ExamplePrompt::all().len()
            ))
        })?;
        self.submit(example.prompt).await
    }

    pub fn clear(&mut self) {
        info!(
            "Session {}: clearing {} entries",
            self.id,
            self.conversation.len()
        );
        self.conversation.clear();
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        self.conversation.entries()
    }

    pub fn is_empty(&self) -> bool {
        self.conversation.is_empty()
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::MockChatClient;
    use crate::domain::{AgentReply, EntryContent, Role};

    #[tokio::test]
    async fn test_submit_appends_user_and_agent_entries() {
        let mut session = ChatSession::new(Arc::new(MockChatClient::new().with_text(
            r#"{"response_type": "data", "payload": {"answer": 42}}"#,
        )));

        let reply = session.submit("What is the answer?").await.unwrap();
        assert_eq!(reply.role(), Role::Agent);

        let entries = session.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role(), Role::User);
        assert_eq!(
            entries[0].content(),
            &EntryContent::Text("What is the answer?".to_string())
        );
        assert!(matches!(
            entries[1].content(),
            EntryContent::Reply(AgentReply::Response(_))
        ));
    }

    #[tokio::test]
    async fn test_blank_prompt_is_rejected_without_side_effects() {
        let client = Arc::new(MockChatClient::new());
        let mut session = ChatSession::new(client.clone());

        let err = session.submit("   ").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(session.is_empty());
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_history_window_ends_with_current_prompt() {
        let client = Arc::new(MockChatClient::new());
        let mut session = ChatSession::new(client.clone());

        session.submit("first question").await.unwrap();
        session.submit("second question").await.unwrap();

        let prompts = client.prompts();
        assert!(prompts[0].contains("--- CHAT HISTORY ---\nUser: first question\n--- NEW USER PROMPT ---"));

        let second = &prompts[1];
        let history = &second[second.find("--- CHAT HISTORY ---").unwrap()
            ..second.find("--- NEW USER PROMPT ---").unwrap()];
        let lines: Vec<&str> = history.lines().skip(1).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "User: first question");
        assert!(lines[1].starts_with("Agent: {"));
        assert_eq!(lines[2], "User: second question");
    }

    #[tokio::test]
    async fn test_submit_example_uses_canned_prompt() {
        let client = Arc::new(MockChatClient::new());
        let mut session = ChatSession::new(client.clone());

        session.submit_example(2).await.unwrap();
        assert_eq!(
            session.entries()[0].content(),
            &EntryContent::Text(
                "Generate a simple Python script for a countdown timer".to_string()
            )
        );

        assert!(session.submit_example(9).await.is_err());
        assert_eq!(session.entries().len(), 2);
    }
}
