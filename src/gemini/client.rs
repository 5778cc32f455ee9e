use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{GenerateContentRequest, GenerateContentResponse, TextGenerator};
use crate::error::ProviderError;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: Url,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: parse_base_url(base_url)?,
        })
    }

    /// The key travels in a header so it never shows up in URLs or in
    /// reqwest error messages.
    fn build_url(&self, endpoint: &str) -> Result<Url, ProviderError> {
        let model = self.model.trim_start_matches("models/");
        Ok(self
            .base_url
            .join(&format!("models/{}:{}", model, endpoint))?)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = self.build_url("generateContent")?;

        tracing::debug!("POST {} ({} turns)", url, request.contents.len());

        let response = self
            .http_client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(ProviderError::Api {
                provider: "Gemini",
                status: status.as_u16(),
                message: api_error_message(&error_text),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url, ProviderError> {
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{}/", raw))?)
    }
}

/// Google wraps failures as `{"error": {"code", "message", "status"}}`.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.trim().to_string(),
    }
}
