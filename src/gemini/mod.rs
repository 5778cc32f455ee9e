pub mod client;
pub mod models;

use async_trait::async_trait;

use crate::error::ProviderError;

pub use client::GeminiClient;
pub use models::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};

/// A text-generation provider answering one non-streaming request at a time.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError>;
}
