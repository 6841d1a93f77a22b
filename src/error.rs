use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParleyError {
    #[error("timeout after {0}ms")]
    Timeout(u64),

    #[error("provider returned http {status}")]
    Http {
        status: u16,
        /// Human-readable message extracted from the vendor's error envelope,
        /// absent when the envelope carried none.
        message: Option<String>,
    },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

impl ParleyError {
    /// Produce an error message safe for user-facing display.
    /// Vendor messages are untrusted input — callers must render the returned
    /// string as plain text, never as markup.
    pub fn user_message(&self) -> String {
        match self {
            Self::Timeout(ms) => format!("request timed out after {ms}ms"),
            Self::Http { status, message } => match message {
                Some(msg) => format!("provider error ({status}): {msg}"),
                None => format!("provider error ({status})"),
            },
            Self::Network(_) => "request to provider failed".to_string(),
            Self::MalformedResponse(_) => "failed to parse provider response".to_string(),
        }
    }

    /// HTTP status code for `Http` errors, None otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
