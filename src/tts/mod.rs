pub mod chunk;
pub mod google;

use async_trait::async_trait;

use crate::error::{AppError, ProviderError};

pub use google::GoogleTranslateTts;

/// Voice language for every synthesized clip.
pub const VOICE_LANGUAGE: &str = "th";

/// A speech provider turning text into a complete MP3 buffer.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        slow: bool,
    ) -> Result<Vec<u8>, ProviderError>;
}

/// Validates the text before any provider call, then synthesizes it in Thai
/// at normal speed.
pub async fn speak(
    synthesizer: &dyn SpeechSynthesizer,
    text: Option<&str>,
) -> Result<Vec<u8>, AppError> {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return Err(AppError::Validation("No text".into())),
    };

    tracing::info!("Synthesizing {} chars of speech", text.chars().count());

    let audio = synthesizer.synthesize(text, VOICE_LANGUAGE, false).await?;

    if audio.is_empty() {
        return Err(ProviderError::Decode("empty audio response".into()).into());
    }

    Ok(audio)
}
