use serde::Deserialize;
use serde_json::json;

use crate::dispatch::AiRequest;
use crate::error::ParleyError;
use crate::provider::{ProviderAdapter, WireRequest, parse_error_envelope, strip_data_url_prefix};

/// Gemini generateContent API. Auth rides in the URL query string, so the
/// built URL must never be logged.
pub struct GeminiAdapter;

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl ProviderAdapter for GeminiAdapter {
    fn build_request(&self, req: &AiRequest, base_url: &str) -> WireRequest {
        let mut parts = Vec::new();

        // Image part precedes the text part, with the data-URL header removed.
        if let Some(image) = &req.image {
            parts.push(json!({
                "inline_data": {
                    "mime_type": "image/png",
                    "data": strip_data_url_prefix(image),
                }
            }));
        }

        parts.push(json!({ "text": req.prompt }));

        WireRequest {
            url: format!(
                "{base_url}/v1beta/models/{}:generateContent?key={}",
                req.model, req.api_key
            ),
            headers: vec![("content-type", "application/json".to_string())],
            body: json!({
                "contents": [{ "parts": parts }],
                "generationConfig": { "maxOutputTokens": req.max_output_tokens },
            }),
        }
    }

    fn parse_response(&self, status: u16, body: &[u8]) -> Result<String, ParleyError> {
        if !(200..300).contains(&status) {
            return Err(parse_error_envelope(status, body));
        }

        let response: GenerateContentResponse = serde_json::from_slice(body)
            .map_err(|e| ParleyError::MalformedResponse(format!("gemini response: {e}")))?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| {
                ParleyError::MalformedResponse("gemini response has no text part".to_string())
            })
    }
}
