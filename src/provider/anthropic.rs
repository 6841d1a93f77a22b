use serde::Deserialize;
use serde_json::json;

use crate::dispatch::AiRequest;
use crate::error::ParleyError;
use crate::provider::{ProviderAdapter, WireRequest, parse_error_envelope, strip_data_url_prefix};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API. Calling it from a browser context requires an
/// explicit opt-in header on top of the usual key/version pair.
pub struct AnthropicAdapter;

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

impl ProviderAdapter for AnthropicAdapter {
    fn build_request(&self, req: &AiRequest, base_url: &str) -> WireRequest {
        let mut content = Vec::new();

        // Image block precedes the text block, with the data-URL header removed.
        if let Some(image) = &req.image {
            content.push(json!({
                "type": "image",
                "source": {
                    "type": "base64",
                    "media_type": "image/png",
                    "data": strip_data_url_prefix(image),
                }
            }));
        }

        content.push(json!({ "type": "text", "text": req.prompt }));

        WireRequest {
            url: format!("{base_url}/v1/messages"),
            headers: vec![
                ("content-type", "application/json".to_string()),
                ("x-api-key", req.api_key.clone()),
                ("anthropic-version", ANTHROPIC_VERSION.to_string()),
                ("anthropic-dangerous-direct-browser-access", "true".to_string()),
            ],
            body: json!({
                "model": req.model,
                "max_tokens": req.max_output_tokens,
                "messages": [{ "role": "user", "content": content }],
            }),
        }
    }

    fn parse_response(&self, status: u16, body: &[u8]) -> Result<String, ParleyError> {
        if !(200..300).contains(&status) {
            return Err(parse_error_envelope(status, body));
        }

        let response: MessagesResponse = serde_json::from_slice(body)
            .map_err(|e| ParleyError::MalformedResponse(format!("anthropic response: {e}")))?;

        response
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| {
                ParleyError::MalformedResponse("anthropic response has no text block".to_string())
            })
    }
}
