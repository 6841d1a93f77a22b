use std::env;
use std::fmt;

use crate::provider::Provider;

/// Settings record supplied by the caller — the extension's settings store in
/// the original product. Read-only input to each dispatch; the library never
/// looks anything up ambiently.
#[derive(Clone, Default)]
pub struct ProviderConfig {
    /// None falls back to `provider::DEFAULT_PROVIDER` at dispatch time.
    pub provider: Option<Provider>,
    pub api_key: String,
    /// None falls back to the provider's default model id.
    pub model: Option<String>,
    /// Target language code for translation prompts (e.g. "zh-TW").
    pub target_language: Option<String>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("target_language", &self.target_language)
            .finish()
    }
}

impl ProviderConfig {
    /// Build a configuration from PARLEY_* environment variables. Used by the
    /// demo binary; library callers construct the struct directly.
    pub fn from_env() -> Self {
        let provider = env::var("PARLEY_PROVIDER").ok().and_then(|raw| {
            let parsed = Provider::parse(&raw);
            if parsed.is_none() {
                tracing::warn!(provider = %raw, "unrecognized provider — using default");
            }
            parsed
        });

        let api_key = env::var("PARLEY_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("PARLEY_API_KEY not set — the provider will reject requests");
            String::new()
        });

        let config = Self {
            provider,
            api_key,
            model: env::var("PARLEY_MODEL").ok().filter(|m| !m.trim().is_empty()),
            target_language: env::var("PARLEY_TARGET_LANG").ok(),
        };

        if let Some(provider) = config.provider
            && let Err(reason) = validate_api_key(provider, &config.api_key)
        {
            tracing::warn!(%provider, %reason, "API key failed sanity check");
        }

        config
    }
}

/// Prefix-style sanity check. Advisory: a mismatch is worth a warning, not a
/// rejection. The returned message never contains the key itself.
pub fn validate_api_key(provider: Provider, key: &str) -> Result<(), String> {
    if key.trim().is_empty() {
        return Err("API key must not be empty".to_string());
    }
    let prefix = provider.key_prefix();
    if !key.starts_with(prefix) {
        return Err(format!("{provider} API keys start with {prefix}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_prefixes_per_provider() {
        assert!(validate_api_key(Provider::Anthropic, "sk-ant-abc123").is_ok());
        assert!(validate_api_key(Provider::OpenAi, "sk-abc123").is_ok());
        assert!(validate_api_key(Provider::Gemini, "AIzaSyTest").is_ok());

        assert!(validate_api_key(Provider::Anthropic, "sk-abc123").is_err());
        assert!(validate_api_key(Provider::OpenAi, "AIzaSyTest").is_err());
        assert!(validate_api_key(Provider::Gemini, "").is_err());
    }

    #[test]
    fn rejection_message_never_echoes_the_key() {
        let err = validate_api_key(Provider::Anthropic, "super-secret-value").unwrap_err();
        assert!(!err.contains("super-secret-value"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ProviderConfig {
            provider: Some(Provider::OpenAi),
            api_key: "sk-do-not-print".to_string(),
            model: None,
            target_language: None,
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-do-not-print"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
