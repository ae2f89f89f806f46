/// Raw outcome of one backend call, before the engine interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Text the backend produced; expected to be a JSON document.
    Text(String),
    /// The backend refused to answer for policy reasons.
    Blocked { reason: String },
}

impl Completion {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn blocked(reason: impl Into<String>) -> Self {
        Self::Blocked {
            reason: reason.into(),
        }
    }
}
