use crate::config::ProviderConfig;
use crate::dispatch::{Completion, Dispatcher};
use crate::error::ParleyError;
use crate::prompt::{self, PageContent, VideoInfo};

/// Task facade: one method per user action, each a prompt template plus a
/// single dispatch. Holds the configuration and dispatcher, nothing per-call.
pub struct Assistant {
    dispatcher: Dispatcher,
    config: ProviderConfig,
}

impl Assistant {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            dispatcher: Dispatcher::new(),
            config,
        }
    }

    /// For callers that need a non-default dispatcher (tests, proxies).
    pub fn with_dispatcher(dispatcher: Dispatcher, config: ProviderConfig) -> Self {
        Self { dispatcher, config }
    }

    pub async fn translate(&self, text: &str) -> Result<Completion, ParleyError> {
        let prompt = prompt::translate(text, self.config.target_language.as_deref());
        self.dispatcher.send(&self.config, &prompt, None).await
    }

    pub async fn explain(&self, text: &str) -> Result<Completion, ParleyError> {
        self.dispatcher
            .send(&self.config, &prompt::explain(text), None)
            .await
    }

    pub async fn summarize_page(&self, page: &PageContent) -> Result<Completion, ParleyError> {
        self.dispatcher
            .send(&self.config, &prompt::summarize_page(page), None)
            .await
    }

    pub async fn summarize_video(&self, video: &VideoInfo) -> Result<Completion, ParleyError> {
        self.dispatcher
            .send(&self.config, &prompt::summarize_video(video), None)
            .await
    }

    /// `image` is a base64 payload, usually a full `data:image/png;base64,` URL.
    pub async fn analyze_image(&self, image: &str) -> Result<Completion, ParleyError> {
        self.dispatcher
            .send(&self.config, &prompt::analyze_image(), Some(image))
            .await
    }

    pub async fn scan_screenshot(
        &self,
        custom_prompt: Option<&str>,
        screenshot: &str,
    ) -> Result<Completion, ParleyError> {
        let prompt = prompt::scan_screenshot(custom_prompt);
        self.dispatcher
            .send(&self.config, &prompt, Some(screenshot))
            .await
    }

    /// Open-ended prompt, optionally with an image.
    pub async fn ask(&self, prompt: &str, image: Option<&str>) -> Result<Completion, ParleyError> {
        self.dispatcher.send(&self.config, prompt, image).await
    }
}
