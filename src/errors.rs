use crate::api::Endpoint;
use std::fmt;

/// Failure of a remote call. The two channels are reported differently to the user.
#[derive(Debug)]
pub enum RemoteError {
    /// The backend answered but refused the action (`{"success": false}`).
    Application { endpoint: Endpoint },
    /// No usable answer: connection failure, error status or unreadable body.
    Transport { endpoint: Endpoint, reason: String },
}

impl RemoteError {
    pub fn transport(endpoint: Endpoint, err: impl fmt::Display) -> Self {
        Self::Transport {
            endpoint,
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Application { endpoint } => write!(f, "{} was rejected", endpoint.path()),
            Self::Transport { endpoint, reason } => {
                write!(f, "{} failed: {reason}", endpoint.path())
            }
        }
    }
}

impl std::error::Error for RemoteError {}

#[derive(Debug)]
pub struct AppError {
    pub message: String,
}

impl AppError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}
