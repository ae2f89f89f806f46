use crate::domain::ConversationEntry;

/// How many prior turns are replayed to the model. Fixed; older turns are dropped.
pub const HISTORY_WINDOW: usize = 4;

/// Instructions telling the model to pick one of the two response shapes.
const INSTRUCTIONS: &str = r#"You are an intelligent assistant. Using the chat history and the new prompt,
work out what the user is asking for and give the most appropriate answer.

Reply with exactly one JSON object. It must have a "response_type" key whose value is "data" or "code".

1. If the user wants information, data or an explanation, set "response_type" to "data".
   Put the structured answer under a "payload" key.
   Example: { "response_type": "data", "payload": { "topic": "Photosynthesis", "summary": "..." } }

2. If the user wants a code snippet, set "response_type" to "code".
   Put an object with "language", "code" and "explanation" keys under "payload".
   "explanation" may be a string or a list of { "concept": "...", "description": "..." } objects.
   Example: { "response_type": "code", "payload": { "language": "python", "code": "print('Hello')", "explanation": "..." } }"#;

/// Render the last [`HISTORY_WINDOW`] entries as `"<Role>: <content>"` lines.
pub fn render_history(history: &[ConversationEntry]) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    history[start..]
        .iter()
        .map(|entry| format!("{}\n", entry.to_context_line()))
        .collect()
}

/// Build the single prompt sent to the backend for one turn.
pub fn compose_prompt(user_prompt: &str, history: &[ConversationEntry]) -> String {
    format!(
        "{INSTRUCTIONS}\n\n--- CHAT HISTORY ---\n{}--- NEW USER PROMPT ---\n{user_prompt}\n",
        render_history(history)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AgentReply, CodePayload, ConversationEntry, ResponseObject};
    use serde_json::json;

    fn history_section(prompt: &str) -> &str {
        let start = prompt.find("--- CHAT HISTORY ---\n").unwrap() + "--- CHAT HISTORY ---\n".len();
        let end = prompt.find("--- NEW USER PROMPT ---").unwrap();
        &prompt[start..end]
    }

    #[test]
    fn test_only_last_four_entries_are_included_in_order() {
        let history: Vec<ConversationEntry> = (1..=7)
            .map(|i| ConversationEntry::user(format!("question {i}")))
            .collect();

        let prompt = compose_prompt("next", &history);
        let lines: Vec<&str> = history_section(&prompt).lines().collect();

        assert_eq!(
            lines,
            vec![
                "User: question 4",
                "User: question 5",
                "User: question 6",
                "User: question 7"
            ]
        );
        assert!(!prompt.contains("question 3"));
    }

    #[test]
    fn test_short_history_is_included_whole() {
        let history = vec![ConversationEntry::user("hi")];
        assert_eq!(render_history(&history), "User: hi\n");
        assert_eq!(render_history(&[]), "");
    }

    #[test]
    fn test_structured_entries_are_embedded_as_json_strings() {
        let history = vec![
            ConversationEntry::user("show me code"),
            ConversationEntry::agent(AgentReply::Response(ResponseObject::Code(
                CodePayload::new("rust", "fn main() {}"),
            ))),
            ConversationEntry::agent(AgentReply::Response(ResponseObject::Data(json!({
                "facts": ["a", "b"]
            })))),
        ];

        let rendered = render_history(&history);
        assert!(rendered.contains(
            r#"Agent: {"response_type":"code","payload":{"language":"rust","code":"fn main() {}"}}"#
        ));
        assert!(rendered.contains(r#"Agent: {"response_type":"data","payload":{"facts":["a","b"]}}"#));
        assert!(!rendered.contains("Response("));
        assert!(!rendered.contains("Data("));
    }

    #[test]
    fn test_prompt_embeds_new_prompt_and_both_examples() {
        let prompt = compose_prompt("Explain closures", &[]);
        assert!(prompt.contains("--- NEW USER PROMPT ---\nExplain closures\n"));
        assert!(prompt.contains(r#""response_type": "data""#));
        assert!(prompt.contains(r#""response_type": "code""#));
        assert_eq!(history_section(&prompt), "");
    }
}
