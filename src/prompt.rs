//! Prompt construction for the user actions served by the dispatcher.
//! Pure functions: same inputs, same prompt, no clock or counter anywhere.

/// Page body text is capped before being embedded in a prompt.
pub const PAGE_TEXT_CAP: usize = 10_000;

/// Video transcripts are capped before being embedded in a prompt.
pub const TRANSCRIPT_CAP: usize = 15_000;

/// Language used when the configuration names none.
pub const DEFAULT_TARGET_LANGUAGE: &str = "zh-TW";

/// Extracted page content, as supplied by the page-extraction collaborator.
#[derive(Clone, Debug)]
pub struct PageContent {
    pub title: String,
    pub text: String,
}

/// Extracted video metadata, as supplied by the page-extraction collaborator.
/// Empty fields are omitted from the prompt.
#[derive(Clone, Debug, Default)]
pub struct VideoInfo {
    pub title: String,
    pub channel: String,
    pub description: String,
    pub transcript: String,
}

pub fn translate(text: &str, target_language: Option<&str>) -> String {
    let language = language_name(target_language.unwrap_or(DEFAULT_TARGET_LANGUAGE));
    format!("Translate the following content into {language}:\n\n{text}")
}

pub fn explain(text: &str) -> String {
    format!("Explain the following content in clear, simple terms:\n\n{text}")
}

pub fn summarize_page(page: &PageContent) -> String {
    format!(
        "Summarize the key points of the following web page:\n\nTitle: {}\nContent: {}",
        page.title,
        truncate_chars(&page.text, PAGE_TEXT_CAP)
    )
}

pub fn summarize_video(video: &VideoInfo) -> String {
    let mut prompt = format!(
        "Summarize the following YouTube video:\n\nTitle: {}\nChannel: {}\n",
        video.title, video.channel
    );

    if !video.description.is_empty() {
        prompt.push_str("\nDescription: ");
        prompt.push_str(&video.description);
    }

    if !video.transcript.is_empty() {
        prompt.push_str("\n\nTranscript:\n");
        prompt.push_str(truncate_chars(&video.transcript, TRANSCRIPT_CAP));
    }

    prompt.push_str(
        "\n\nProvide:\n\
         1. A summary of the main content\n\
         2. The key points, as a list\n\
         3. The main conclusions or takeaways",
    );

    prompt
}

pub fn analyze_image() -> String {
    "Analyze this image and describe what you see, including any important details.".to_string()
}

/// Custom prompt if the user typed one, otherwise the default scan prompt.
pub fn scan_screenshot(custom: Option<&str>) -> String {
    match custom.map(str::trim).filter(|c| !c.is_empty()) {
        Some(custom) => custom.to_string(),
        None => "Analyze this screenshot and describe the important information it shows."
            .to_string(),
    }
}

/// Display name for a target-language code; unknown codes pass through.
pub fn language_name(code: &str) -> &str {
    match code {
        "zh-TW" => "Traditional Chinese",
        "zh-CN" => "Simplified Chinese",
        "en" => "English",
        "ja" => "Japanese",
        "ko" => "Korean",
        other => other,
    }
}

/// First `cap` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, cap: usize) -> &str {
    match text.char_indices().nth(cap) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
