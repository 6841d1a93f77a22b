use serde::Deserialize;
use serde_json::json;

use crate::dispatch::AiRequest;
use crate::error::ParleyError;
use crate::provider::{ProviderAdapter, WireRequest, parse_error_envelope};

/// OpenAI chat completions API.
pub struct OpenAiAdapter;

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

impl ProviderAdapter for OpenAiAdapter {
    fn build_request(&self, req: &AiRequest, base_url: &str) -> WireRequest {
        let mut content = vec![json!({ "type": "text", "text": req.prompt })];

        // Image item follows the text item and keeps the full data URL.
        if let Some(image) = &req.image {
            content.push(json!({
                "type": "image_url",
                "image_url": { "url": image }
            }));
        }

        WireRequest {
            url: format!("{base_url}/v1/chat/completions"),
            headers: vec![
                ("content-type", "application/json".to_string()),
                ("authorization", format!("Bearer {}", req.api_key)),
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

        let completion: ChatCompletion = serde_json::from_slice(body)
            .map_err(|e| ParleyError::MalformedResponse(format!("openai response: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ParleyError::MalformedResponse(
                    "openai response has empty choices or null content".to_string(),
                )
            })
    }
}
