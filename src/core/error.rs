use std::fmt;

/// Errors surfaced to the interactive session.
///
/// Every variant ends up as a pushed error screen; none of them terminate
/// the session on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Client misconfigured (missing API key, bad host).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success response.
    Api { status: u16, message: String },
    /// Failed to decode the API's response.
    Parse(String),
    /// Caller supplied a value the API would reject.
    InvalidInput(String),
    /// Writing to the system clipboard failed.
    Clipboard(String),
    /// The operation is not available for this resource.
    Unsupported(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "config error: {msg}"),
            AppError::Network(msg) => write!(f, "network error: {msg}"),
            AppError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            AppError::Parse(msg) => write!(f, "parse error: {msg}"),
            AppError::InvalidInput(msg) => write!(f, "{msg}"),
            AppError::Clipboard(msg) => write!(f, "{msg}"),
            AppError::Unsupported(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Parse(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}
