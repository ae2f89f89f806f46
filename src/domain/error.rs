use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Backend did not respond within {0} seconds")]
    Timeout(u64),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Blocked by safety policy: {0}")]
    SafetyBlock(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn safety_block(reason: impl Into<String>) -> Self {
        Self::SafetyBlock(reason.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Failures whose detail is for the log only; the user sees a generic message.
    pub fn is_unexpected(&self) -> bool {
        matches!(
            self,
            Self::Backend(_) | Self::IoError(_) | Self::Internal(_) | Self::InvalidInput(_)
        )
    }
}
