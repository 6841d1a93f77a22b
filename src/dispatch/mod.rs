pub mod http;

use std::fmt;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::config::ProviderConfig;
use crate::error::ParleyError;
use crate::provider::{DEFAULT_PROVIDER, Provider};
use crate::timeout::with_timeout;

/// Token cap applied to every request.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;

/// Wall-clock bound for a single provider round trip.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Normalized request — every adapter builds its wire format from this.
/// Constructed fresh per call and never mutated afterwards; concurrent
/// dispatches share nothing.
pub struct AiRequest {
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
    pub prompt: String,
    /// Optional base64 image payload, usually a full `data:image/png;base64,`
    /// URL as captured by the caller. At most one image per request.
    pub image: Option<String>,
    pub max_output_tokens: u32,
    pub timeout: Duration,
}

impl AiRequest {
    /// Resolve a configuration into a concrete request: the single-sourced
    /// default provider when none is configured, the provider's default model
    /// when none is named, and the fixed token/deadline defaults.
    pub fn from_config(
        config: &ProviderConfig,
        prompt: impl Into<String>,
        image: Option<String>,
    ) -> Self {
        let provider = config.provider.unwrap_or(DEFAULT_PROVIDER);
        let model = config
            .model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| provider.default_model().to_string());

        Self {
            provider,
            api_key: config.api_key.clone(),
            model,
            prompt: prompt.into(),
            image,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl fmt::Debug for AiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiRequest")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .field("prompt_len", &self.prompt.len())
            .field("has_image", &self.image.is_some())
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Successful dispatch outcome.
#[derive(Debug)]
pub struct Completion {
    pub text: String,
    pub model: String,
    pub provider: Provider,
    pub latency_ms: u64,
}

/// Selects the adapter for the configured provider and runs exactly one
/// vendor round trip through the deadline wrapper. Holds no per-call state
/// and performs no retries.
pub struct Dispatcher {
    transport: http::HttpTransport,
    /// Test/proxy seam: overrides every provider's endpoint origin.
    base_url: Option<String>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            transport: http::HttpTransport::new(),
            base_url: None,
        }
    }

    /// Point all providers at `base_url` instead of their production origin.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            transport: http::HttpTransport::new(),
            base_url: Some(base_url.into()),
        }
    }

    pub async fn send(
        &self,
        config: &ProviderConfig,
        prompt: &str,
        image: Option<&str>,
    ) -> Result<Completion, ParleyError> {
        let req = AiRequest::from_config(config, prompt, image.map(str::to_string));
        self.dispatch(&req).await
    }

    pub async fn dispatch(&self, req: &AiRequest) -> Result<Completion, ParleyError> {
        let start = Instant::now();

        let adapter = req.provider.adapter();
        let base_url = self
            .base_url
            .as_deref()
            .unwrap_or_else(|| req.provider.base_url());
        let wire = adapter.build_request(req, base_url);

        tracing::debug!(
            provider = %req.provider,
            model = %req.model,
            has_image = req.image.is_some(),
            "dispatching request"
        );

        let abort = CancellationToken::new();
        let outcome = with_timeout(
            req.timeout,
            abort.clone(),
            self.transport.execute(&wire, &abort),
        )
        .await;

        let (status, body) = match outcome {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(provider = %req.provider, error = %e, "dispatch failed");
                return Err(e);
            }
        };

        match adapter.parse_response(status, &body) {
            Ok(text) => Ok(Completion {
                text,
                model: req.model.clone(),
                provider: req.provider,
                latency_ms: start.elapsed().as_millis() as u64,
            }),
            Err(e) => {
                tracing::warn!(provider = %req.provider, status, error = %e, "dispatch failed");
                Err(e)
            }
        }
    }
}
