use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures produced by the HTTP gateway share the crate-wide error type.
pub type GatewayError = Error;

const NETWORK_FAILURE_MESSAGE: &str = "Request failed";
const FALLBACK_MESSAGE: &str = "Something went wrong.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error ({status}): {message}")]
    Auth { status: u16, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not signed in; log in first")]
    Unauthenticated,

    #[error("A prediction request is already in flight")]
    SubmitInProgress,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True for a 401/403-class rejection of an authenticated call.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// The message shown to the user for this failure.
    ///
    /// Server and auth rejections surface the server's own wording; transport
    /// problems collapse into a generic message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => NETWORK_FAILURE_MESSAGE.to_string(),
            Self::Auth { message, .. } | Self::Server { message, .. } => message.clone(),
            Self::Validation(msg) | Self::Config(msg) | Self::Storage(msg) => msg.clone(),
            Self::Unauthenticated | Self::SubmitInProgress => self.to_string(),
            Self::Serialization(_) | Self::Io(_) | Self::Internal(_) => {
                FALLBACK_MESSAGE.to_string()
            }
        }
    }
}
