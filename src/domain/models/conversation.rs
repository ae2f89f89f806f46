use serde::Serialize;
use uuid::Uuid;

use super::AgentReply;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

impl Role {
    /// Label used when the turn is replayed to the model as context.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Agent => "Agent",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntryContent {
    Text(String),
    Reply(AgentReply),
}

impl EntryContent {
    /// String form embedded in the prompt; structured replies become compact JSON.
    pub fn to_context_string(&self) -> String {
        match self {
            EntryContent::Text(text) => text.clone(),
            EntryContent::Reply(reply) => reply.to_canonical_string(),
        }
    }

    pub fn as_reply(&self) -> Option<&AgentReply> {
        match self {
            EntryContent::Reply(reply) => Some(reply),
            EntryContent::Text(_) => None,
        }
    }
}

/// One turn of the conversation. Fields are private so an entry cannot be
/// edited once it is in the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationEntry {
    id: String,
    role: Role,
    content: EntryContent,
}

impl ConversationEntry {
    pub fn user(prompt: impl Into<String>) -> Self {
        Self::new(Role::User, EntryContent::Text(prompt.into()))
    }

    pub fn agent(reply: AgentReply) -> Self {
        Self::new(Role::Agent, EntryContent::Reply(reply))
    }

    pub fn new(role: Role, content: EntryContent) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &EntryContent {
        &self.content
    }

    /// `"<Role>: <content>"`, one line of prompt context.
    pub fn to_context_line(&self) -> String {
        format!("{}: {}", self.role.label(), self.content.to_context_string())
    }
}

/// Append-only list of turns for one session.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    entries: Vec<ConversationEntry>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ConversationEntry) -> &ConversationEntry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
