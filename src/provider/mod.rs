pub mod anthropic;
pub mod gemini;
pub mod openai;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dispatch::AiRequest;
use crate::error::ParleyError;

/// Provider used when the configuration names none (or an unrecognized one).
/// Single-sourced — everything that needs a fallback reads this constant.
pub const DEFAULT_PROVIDER: Provider = Provider::Anthropic;

/// Provider selector (keep ids stable for config/storage round trips).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Anthropic,
    OpenAi,
    Gemini,
}

impl Provider {
    /// Parse a stored provider id. Unrecognized values return None so the
    /// caller can fall back to `DEFAULT_PROVIDER` explicitly.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "anthropic" => Some(Self::Anthropic),
            "openai" => Some(Self::OpenAi),
            "gemini" => Some(Self::Gemini),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
        }
    }

    /// Model id used when the configuration carries none.
    pub fn default_model(self) -> &'static str {
        match self {
            Self::Anthropic => "claude-sonnet-4-20250514",
            Self::OpenAi => "gpt-4o",
            Self::Gemini => "gemini-2.0-flash-exp",
        }
    }

    /// Production endpoint origin. Adapters append their own path and query.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Anthropic => "https://api.anthropic.com",
            Self::OpenAi => "https://api.openai.com",
            Self::Gemini => "https://generativelanguage.googleapis.com",
        }
    }

    /// Expected API-key prefix, for advisory sanity checks only.
    pub fn key_prefix(self) -> &'static str {
        match self {
            Self::Anthropic => "sk-ant-",
            Self::OpenAi => "sk-",
            Self::Gemini => "AIza",
        }
    }

    pub fn adapter(self) -> &'static dyn ProviderAdapter {
        match self {
            Self::Anthropic => &anthropic::AnthropicAdapter,
            Self::OpenAi => &openai::OpenAiAdapter,
            Self::Gemini => &gemini::GeminiAdapter,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully shaped outbound call, ready for the transport. Building one has no
/// side effects: the same `AiRequest` always yields the same wire request.
pub struct WireRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: serde_json::Value,
}

/// Translates the normalized request to and from one vendor's wire format.
pub trait ProviderAdapter: Send + Sync {
    /// Shape the vendor's request: endpoint URL, auth headers, JSON body.
    fn build_request(&self, req: &AiRequest, base_url: &str) -> WireRequest;

    /// Extract the completion text from a raw response, or fold the failure
    /// into the error taxonomy. Never panics on unexpected bodies.
    fn parse_response(&self, status: u16, body: &[u8]) -> Result<String, ParleyError>;
}

/// Strip a `data:image/<subtype>;base64,` prefix, returning the bare payload.
/// Anything that doesn't match the data-URL shape passes through untouched.
pub(crate) fn strip_data_url_prefix(data: &str) -> &str {
    let Some(rest) = data.strip_prefix("data:image/") else {
        return data;
    };
    match rest.split_once(";base64,") {
        Some((subtype, payload))
            if !subtype.is_empty()
                && subtype
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'_') =>
        {
            payload
        }
        _ => data,
    }
}

/// Fold a non-2xx response into the taxonomy. All three vendors wrap failures
/// in `{"error": {"message": ...}}`; a body that isn't JSON at all is treated
/// as malformed rather than surfacing a parse fault.
pub(crate) fn parse_error_envelope(status: u16, body: &[u8]) -> ParleyError {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) => {
            let message = value
                .pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string);
            ParleyError::Http { status, message }
        }
        Err(e) => {
            ParleyError::MalformedResponse(format!("http {status} body is not valid JSON: {e}"))
        }
    }
}
