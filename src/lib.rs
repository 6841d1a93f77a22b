//! Multi-provider AI request dispatcher: one normalized request shape fanned
//! out to Anthropic, OpenAI, or Gemini, bounded by a per-call deadline, with
//! every failure folded into a small typed taxonomy.

pub mod assistant;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod prompt;
pub mod provider;
pub mod timeout;

pub use assistant::Assistant;
pub use config::ProviderConfig;
pub use dispatch::{Completion, Dispatcher};
pub use error::ParleyError;
pub use provider::Provider;
