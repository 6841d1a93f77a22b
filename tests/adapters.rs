//! Wire-shaping and response-parsing tests for the three provider adapters.

use std::time::Duration;

use parley::dispatch::{AiRequest, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TIMEOUT_MS};
use parley::error::ParleyError;
use parley::provider::{Provider, ProviderAdapter, WireRequest};

const DATA_URL: &str = "data:image/png;base64,AAAA";

fn make_req(provider: Provider, image: Option<&str>) -> AiRequest {
    AiRequest {
        provider,
        api_key: "test-key".to_string(),
        model: provider.default_model().to_string(),
        prompt: "Hello".to_string(),
        image: image.map(str::to_string),
        max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
    }
}

fn build(provider: Provider, image: Option<&str>) -> WireRequest {
    let req = make_req(provider, image);
    provider.adapter().build_request(&req, provider.base_url())
}

fn header<'a>(wire: &'a WireRequest, name: &str) -> Option<&'a str> {
    wire.headers
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| v.as_str())
}

// ---------------------------------------------------------------------------
// Request shaping: Anthropic
// ---------------------------------------------------------------------------

#[test]
fn anthropic_request_shape() {
    let wire = build(Provider::Anthropic, None);

    assert_eq!(wire.url, "https://api.anthropic.com/v1/messages");
    assert_eq!(header(&wire, "x-api-key"), Some("test-key"));
    assert_eq!(header(&wire, "anthropic-version"), Some("2023-06-01"));
    assert_eq!(
        header(&wire, "anthropic-dangerous-direct-browser-access"),
        Some("true")
    );

    assert_eq!(wire.body["model"], "claude-sonnet-4-20250514");
    assert_eq!(wire.body["max_tokens"], 4096);

    let content = wire.body["messages"][0]["content"].as_array().unwrap();
    assert_eq!(content.len(), 1);
    assert_eq!(content[0]["type"], "text");
    assert_eq!(content[0]["text"], "Hello");
}

#[test]
fn anthropic_image_precedes_text_and_strips_prefix() {
    let wire = build(Provider::Anthropic, Some(DATA_URL));

    let content = wire.body["messages"][0]["content"].as_array().unwrap();
    assert_eq!(content.len(), 2);
    assert_eq!(content[0]["type"], "image");
    assert_eq!(content[0]["source"]["type"], "base64");
    assert_eq!(content[0]["source"]["media_type"], "image/png");
    assert_eq!(content[0]["source"]["data"], "AAAA");
    assert_eq!(content[1]["type"], "text");
}

// ---------------------------------------------------------------------------
// Request shaping: OpenAI
// ---------------------------------------------------------------------------

#[test]
fn openai_request_shape() {
    let wire = build(Provider::OpenAi, None);

    assert_eq!(wire.url, "https://api.openai.com/v1/chat/completions");
    assert_eq!(header(&wire, "authorization"), Some("Bearer test-key"));

    assert_eq!(wire.body["model"], "gpt-4o");
    assert_eq!(wire.body["max_tokens"], 4096);

    let content = wire.body["messages"][0]["content"].as_array().unwrap();
    assert_eq!(content.len(), 1);
    assert_eq!(content[0]["type"], "text");
}

#[test]
fn openai_image_follows_text_and_keeps_full_data_url() {
    let wire = build(Provider::OpenAi, Some(DATA_URL));

    let content = wire.body["messages"][0]["content"].as_array().unwrap();
    assert_eq!(content.len(), 2);
    assert_eq!(content[0]["type"], "text");
    assert_eq!(content[1]["type"], "image_url");
    assert_eq!(content[1]["image_url"]["url"], DATA_URL);
}

// ---------------------------------------------------------------------------
// Request shaping: Gemini
// ---------------------------------------------------------------------------

#[test]
fn gemini_url_embeds_model_and_key() {
    let wire = build(Provider::Gemini, None);

    assert_eq!(
        wire.url,
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-exp:generateContent?key=test-key"
    );
    // Auth is in the query string, never a header.
    assert_eq!(header(&wire, "authorization"), None);
    assert_eq!(header(&wire, "x-api-key"), None);

    assert_eq!(wire.body["generationConfig"]["maxOutputTokens"], 4096);
    let parts = wire.body["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0]["text"], "Hello");
}

#[test]
fn gemini_image_precedes_text_and_strips_prefix() {
    let wire = build(Provider::Gemini, Some(DATA_URL));

    let parts = wire.body["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["inline_data"]["mime_type"], "image/png");
    assert_eq!(parts[0]["inline_data"]["data"], "AAAA");
    assert_eq!(parts[1]["text"], "Hello");
}

// ---------------------------------------------------------------------------
// Request construction is idempotent
// ---------------------------------------------------------------------------

#[test]
fn build_request_is_idempotent() {
    for provider in [Provider::Anthropic, Provider::OpenAi, Provider::Gemini] {
        let first = build(provider, Some(DATA_URL));
        let second = build(provider, Some(DATA_URL));

        assert_eq!(first.url, second.url, "{provider}: url differs");
        assert_eq!(first.headers, second.headers, "{provider}: headers differ");
        assert_eq!(first.body, second.body, "{provider}: body differs");
    }
}

// ---------------------------------------------------------------------------
// Success parsing: documented field path, text verbatim
// ---------------------------------------------------------------------------

#[test]
fn anthropic_success_text_is_verbatim() {
    let body = br#"{"content":[{"type":"text","text":"**bold** & <i>verbatim</i>"}]}"#;
    let text = Provider::Anthropic
        .adapter()
        .parse_response(200, body)
        .unwrap();
    assert_eq!(text, "**bold** & <i>verbatim</i>");
}

#[test]
fn openai_success_text_is_verbatim() {
    let body = br#"{"choices":[{"message":{"content":"Hi there"}}]}"#;
    let text = Provider::OpenAi.adapter().parse_response(200, body).unwrap();
    assert_eq!(text, "Hi there");
}

#[test]
fn gemini_success_text_is_verbatim() {
    let body = br#"{"candidates":[{"content":{"parts":[{"text":"four"}]}}]}"#;
    let text = Provider::Gemini.adapter().parse_response(200, body).unwrap();
    assert_eq!(text, "four");
}

// ---------------------------------------------------------------------------
// Error parsing: vendor envelope, envelope-less JSON, garbage bodies
// ---------------------------------------------------------------------------

#[test]
fn vendor_error_message_is_extracted() {
    let body = br#"{"error":{"message":"rate limited"}}"#;
    for provider in [Provider::Anthropic, Provider::OpenAi, Provider::Gemini] {
        let err = provider.adapter().parse_response(429, body).unwrap_err();
        match err {
            ParleyError::Http { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message.as_deref(), Some("rate limited"));
            }
            other => panic!("{provider}: expected Http, got {other:?}"),
        }
    }
}

#[test]
fn json_error_without_message_has_no_vendor_message() {
    let body = br#"{"detail":"something else entirely"}"#;
    for provider in [Provider::Anthropic, Provider::OpenAi, Provider::Gemini] {
        let err = provider.adapter().parse_response(500, body).unwrap_err();
        assert!(
            matches!(err, ParleyError::Http { status: 500, message: None }),
            "{provider}: got {err:?}"
        );
    }
}

#[test]
fn non_json_error_body_is_malformed_not_a_fault() {
    let body = b"<html>502 Bad Gateway</html>";
    for provider in [Provider::Anthropic, Provider::OpenAi, Provider::Gemini] {
        let err = provider.adapter().parse_response(502, body).unwrap_err();
        assert!(
            matches!(err, ParleyError::MalformedResponse(_)),
            "{provider}: got {err:?}"
        );
    }
}

#[test]
fn success_status_with_missing_fields_is_malformed() {
    let cases = [
        (Provider::Anthropic, br#"{"content":[]}"# as &[u8]),
        (Provider::OpenAi, br#"{"choices":[]}"#),
        (Provider::Gemini, br#"{"candidates":[]}"#),
    ];
    for (provider, body) in cases {
        let err = provider.adapter().parse_response(200, body).unwrap_err();
        assert!(
            matches!(err, ParleyError::MalformedResponse(_)),
            "{provider}: got {err:?}"
        );
    }
}

#[test]
fn success_status_with_garbage_body_is_malformed() {
    for provider in [Provider::Anthropic, Provider::OpenAi, Provider::Gemini] {
        let err = provider
            .adapter()
            .parse_response(200, b"not json at all")
            .unwrap_err();
        assert!(
            matches!(err, ParleyError::MalformedResponse(_)),
            "{provider}: got {err:?}"
        );
    }
}
