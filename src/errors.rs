use thiserror::Error;

/// Failures surfaced while resolving names through a selective binding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindingError {
    /// The name is not registered and no fallback is installed.
    #[error("undefined local variable or method `{0}'")]
    NameNotFound(String),

    /// The target has no member with this name.
    #[error("no member `{0}' on target")]
    NoSuchMember(String),

    /// Raised by a user callback or a target member.
    #[error("callback error: {0}")]
    Callback(String),

    /// Expression or template syntax error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl BindingError {
    pub fn callback(msg: impl Into<String>) -> Self {
        BindingError::Callback(msg.into())
    }

    pub fn is_name_not_found(&self) -> bool {
        matches!(self, BindingError::NameNotFound(_))
    }
}

// Type alias for results that use `BindingError` as the error type
pub type Result<T> = std::result::Result<T, BindingError>;
