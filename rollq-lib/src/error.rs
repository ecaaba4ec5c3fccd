/// Crate Error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A numeric precondition was violated
    #[error("{reason}. Received {value}")]
    InvalidArgument { value: String, reason: String },
    /// A result container would have been built empty
    #[error("{0}")]
    InvalidState(String),
    /// Text that is not dice notation
    #[error("not a valid roll query `{0}`")]
    InvalidNotation(String),
    /// Text that is not an explode rule
    #[error("not a valid explode rule `{0}`")]
    InvalidExplode(String),
}

impl Error {
    pub(crate) fn invalid_argument(value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// True for failures caused by a bad numeric argument
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// True for failures caused by an empty result container
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }
}

/// Crate Result type
pub type Result<T> = std::result::Result<T, Error>;
