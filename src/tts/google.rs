use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use url::Url;

use super::chunk::{self, MAX_CHUNK_CHARS};
use super::SpeechSynthesizer;
use crate::error::ProviderError;
use crate::gemini::client::parse_base_url;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko)";

/// Google Translate's public speech endpoint, returning MP3 per chunk.
pub struct GoogleTranslateTts {
    http_client: Client,
    base_url: Url,
}

impl GoogleTranslateTts {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http_client,
            base_url: parse_base_url(base_url)?,
        })
    }

    fn chunk_url(
        &self,
        chunk: &str,
        language: &str,
        slow: bool,
        index: usize,
        total: usize,
    ) -> Result<Url, ProviderError> {
        let mut url = self.base_url.join("translate_tts")?;
        url.query_pairs_mut()
            .append_pair("ie", "UTF-8")
            .append_pair("q", chunk)
            .append_pair("tl", language)
            .append_pair("client", "tw-ob")
            .append_pair("ttsspeed", if slow { "0.3" } else { "1" })
            .append_pair("total", &total.to_string())
            .append_pair("idx", &index.to_string())
            .append_pair("textlen", &chunk.chars().count().to_string());
        Ok(url)
    }

    async fn fetch_chunk(&self, url: Url) -> Result<Vec<u8>, ProviderError> {
        let response = self
            .http_client
            .get(url)
            .header(header::ACCEPT, "audio/mpeg")
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: "Google TTS",
                status: status.as_u16(),
                message: error_text.trim().chars().take(200).collect(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Http(e.without_url()))?;
        if bytes.is_empty() {
            return Err(ProviderError::Decode("empty audio response".into()));
        }

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateTts {
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        slow: bool,
    ) -> Result<Vec<u8>, ProviderError> {
        let chunks = chunk::split(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(ProviderError::EmptyInput("No text to speak".into()));
        }

        let total = chunks.len();
        let mut audio = Vec::new();

        for (index, chunk) in chunks.iter().enumerate() {
            tracing::debug!("Fetching speech chunk {}/{}", index + 1, total);
            let url = self.chunk_url(chunk, language, slow, index, total)?;
            audio.extend(self.fetch_chunk(url).await?);
        }

        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, extract::State, http::StatusCode, routing::get, Router};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type Calls = Arc<Mutex<Vec<HashMap<String, String>>>>;

    async fn fake_tts(
        State(calls): State<Calls>,
        Query(params): Query<HashMap<String, String>>,
    ) -> (StatusCode, Vec<u8>) {
        let reply = format!("mp3[{}]", params.get("idx").cloned().unwrap_or_default());
        let query = params.get("q").cloned().unwrap_or_default();
        calls.lock().unwrap().push(params);
        if query.contains("fail") {
            (StatusCode::TOO_MANY_REQUESTS, b"slow down".to_vec())
        } else if query.contains("silence") {
            (StatusCode::OK, Vec::new())
        } else if query.contains("stall") {
            tokio::time::sleep(Duration::from_secs(5)).await;
            (StatusCode::OK, reply.into_bytes())
        } else {
            (StatusCode::OK, reply.into_bytes())
        }
    }

    async fn spawn_upstream() -> (String, Calls) {
        let calls: Calls = Arc::default();
        let app = Router::new()
            .route("/translate_tts", get(fake_tts))
            .with_state(calls.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), calls)
    }

    #[test]
    fn builds_chunk_url() {
        let tts = GoogleTranslateTts::new("https://translate.example", Duration::from_secs(1))
            .unwrap();
        let url = tts.chunk_url("สวัสดี ครับ", "th", false, 0, 1).unwrap();
        let pairs: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(url.path(), "/translate_tts");
        assert_eq!(pairs["q"], "สวัสดี ครับ");
        assert_eq!(pairs["tl"], "th");
        assert_eq!(pairs["ttsspeed"], "1");
        assert_eq!(pairs["textlen"], "11");
    }

    #[tokio::test]
    async fn concatenates_chunks_in_order() {
        let (base_url, calls) = spawn_upstream().await;
        let tts = GoogleTranslateTts::new(&base_url, Duration::from_secs(5)).unwrap();

        let audio = tts
            .synthesize("First sentence. Second one!", "th", false)
            .await
            .unwrap();
        assert_eq!(audio, b"mp3[0]mp3[1]".to_vec());

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0]["q"], "First sentence.");
        assert_eq!(calls[1]["q"], "Second one!");
        assert!(calls.iter().all(|c| c["tl"] == "th" && c["total"] == "2"));
    }

    #[tokio::test]
    async fn reports_upstream_failure() {
        let (base_url, _calls) = spawn_upstream().await;
        let tts = GoogleTranslateTts::new(&base_url, Duration::from_secs(5)).unwrap();

        let err = tts.synthesize("please fail", "th", false).await.unwrap_err();
        assert_eq!(err.to_string(), "Google TTS API error: 429 - slow down");
    }

    #[tokio::test]
    async fn rejects_unspeakable_text() {
        let tts = GoogleTranslateTts::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let err = tts.synthesize("... !!", "th", false).await.unwrap_err();
        assert_eq!(err.to_string(), "No text to speak");
    }

    #[tokio::test]
    async fn rejects_empty_audio_body() {
        let (base_url, _calls) = spawn_upstream().await;
        let tts = GoogleTranslateTts::new(&base_url, Duration::from_secs(5)).unwrap();

        let err = tts.synthesize("silence please", "th", false).await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
        assert_eq!(
            err.to_string(),
            "Unexpected provider response: empty audio response"
        );
    }

    #[tokio::test]
    async fn stalled_upstream_times_out() {
        let (base_url, _calls) = spawn_upstream().await;
        let tts = GoogleTranslateTts::new(&base_url, Duration::from_secs(1)).unwrap();

        let started = std::time::Instant::now();
        let err = tts.synthesize("stall here", "th", false).await.unwrap_err();
        assert!(started.elapsed() < Duration::from_secs(4));
        assert!(matches!(err, ProviderError::Http(ref e) if e.is_timeout()));

        let message = crate::error::AppError::from(err).to_string();
        assert_eq!(message, "HTTP error: upstream request timed out");
    }
}
