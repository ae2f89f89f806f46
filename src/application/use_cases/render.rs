use serde_json::Value;

use crate::application::DisplaySurface;
use crate::domain::{
    AgentReply, CodePayload, ConversationEntry, EntryContent, Explanation, ResponseObject,
};

/// Chooses how a reply is drawn based on its declared `response_type`.
///
/// `data` payloads get recursive key/value disclosure, `code` payloads get a
/// highlighted block plus explanation, everything else is literal text.
#[derive(Debug, Default, Clone, Copy)]
pub struct RenderUseCase;

impl RenderUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn render_conversation<'a>(
        &self,
        entries: impl IntoIterator<Item = &'a ConversationEntry>,
        surface: &mut dyn DisplaySurface,
    ) {
        for entry in entries {
            self.render_entry(entry, surface);
        }
    }

    pub fn render_entry(&self, entry: &ConversationEntry, surface: &mut dyn DisplaySurface) {
        surface.begin_entry(entry.role());
        match entry.content() {
            EntryContent::Text(text) => surface.text(text),
            EntryContent::Reply(reply) => self.render_reply(reply, surface),
        }
        surface.end_entry();
    }

    pub fn render_reply(&self, reply: &AgentReply, surface: &mut dyn DisplaySurface) {
        match reply {
            AgentReply::Response(ResponseObject::Data(payload)) => {
                self.render_data(payload, surface)
            }
            AgentReply::Response(ResponseObject::Code(payload)) => {
                self.render_code(payload, surface)
            }
            AgentReply::Error(err) => surface.text(err.message()),
            AgentReply::Unrecognized(value) => surface.text(&value.to_string()),
        }
    }

    /// Structured-data disclosure.
    pub fn render_data(&self, value: &Value, surface: &mut dyn DisplaySurface) {
        match value {
            Value::Object(map) => {
                for (key, value) in map {
                    let label = humanize_key(key);
                    if opens_group(value) {
                        surface.begin_group(&label, true);
                        self.render_data(value, surface);
                        surface.end_group();
                    } else {
                        surface.field(&label, &primitive_text(value));
                    }
                }
            }
            Value::Array(items) => self.render_sequence(items, surface),
            primitive => surface.text(&primitive_text(primitive)),
        }
    }

    fn render_sequence(&self, items: &[Value], surface: &mut dyn DisplaySurface) {
        if items.is_empty() {
            return;
        }

        if items.iter().all(is_primitive) {
            let bullets: Vec<String> = items.iter().map(primitive_text).collect();
            surface.bullets(&bullets);
            return;
        }

        // Successive nested elements are split by a separator, even across primitives.
        let mut previous_was_nested = false;
        for item in items {
            if is_primitive(item) {
                surface.bullets(&[primitive_text(item)]);
            } else {
                if previous_was_nested {
                    surface.separator();
                }
                self.render_data(item, surface);
                previous_was_nested = true;
            }
        }
    }

    /// Code-block disclosure.
    pub fn render_code(&self, payload: &CodePayload, surface: &mut dyn DisplaySurface) {
        surface.code_block(&payload.language(), payload.code());

        match &payload.explanation {
            Some(explanation) if !explanation.is_empty() => match explanation {
                Explanation::Points(points) => {
                    for point in points {
                        surface.concept(&point.concept, &point.description);
                    }
                }
                Explanation::Text(text) => surface.text(text),
                Explanation::Other(value) => self.render_data(value, surface),
            },
            _ => {}
        }
    }
}

fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn opens_group(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

/// Strings are shown without quotes; everything else in its JSON form.
fn primitive_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `user_id` / `user-id` → `User Id`.
///
/// Each run of letters starts upper-case and continues lower-case, so digits
/// and punctuation also start a new word (`top3items` → `Top3Items`).
pub fn humanize_key(key: &str) -> String {
    let mut label = String::with_capacity(key.len());
    let mut in_word = false;

    for c in key.chars() {
        let c = if c == '_' || c == '-' { ' ' } else { c };
        if c.is_alphabetic() {
            if in_word {
                label.extend(c.to_lowercase());
            } else {
                label.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            label.push(c);
            in_word = false;
        }
    }

    label
}
