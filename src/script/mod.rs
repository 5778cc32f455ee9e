use crate::api::{RawGenerationConfig, ScriptEnvelope, ScriptRequest, SystemInstruction};
use crate::error::{AppError, ProviderError};
use crate::gemini::{Content, GenerateContentRequest, GenerationConfig, TextGenerator};

pub const FALLBACK_SYSTEM_INSTRUCTION: &str = "You are a creative director.";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// First part's text when the caller sent any parts, the fallback otherwise.
pub fn system_instruction_text(instruction: Option<&SystemInstruction>) -> String {
    match instruction.and_then(|i| i.parts.first()) {
        Some(part) => part.text.clone().unwrap_or_default(),
        None => FALLBACK_SYSTEM_INSTRUCTION.to_string(),
    }
}

/// JSON response mode is always forced.
pub fn generation_config(raw: Option<&RawGenerationConfig>) -> GenerationConfig {
    GenerationConfig {
        temperature: raw
            .and_then(|r| r.temperature)
            .unwrap_or(DEFAULT_TEMPERATURE),
        max_output_tokens: raw
            .and_then(|r| r.max_output_tokens)
            .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
        response_mime_type: RESPONSE_MIME_TYPE.to_string(),
    }
}

pub fn build_request(request: ScriptRequest) -> GenerateContentRequest {
    let instruction = system_instruction_text(request.system_instruction.as_ref());

    GenerateContentRequest {
        system_instruction: (!instruction.is_empty()).then(|| Content::text(instruction)),
        generation_config: generation_config(request.generation_config.as_ref()),
        contents: request.contents,
    }
}

/// Runs one generation and wraps the first candidate's text in the caller
/// envelope. An empty candidate list is reported as is; every other failure
/// carries the "Server Error" prefix.
pub async fn generate(
    generator: &dyn TextGenerator,
    request: ScriptRequest,
) -> Result<ScriptEnvelope, AppError> {
    let request = build_request(request);

    tracing::info!(
        "Generating script: {} turns, temperature {}, max tokens {}",
        request.contents.len(),
        request.generation_config.temperature,
        request.generation_config.max_output_tokens
    );

    let response = generator
        .generate_content(&request)
        .await
        .map_err(AppError::server)?;

    if response.candidates.is_empty() {
        return Err(AppError::NoContent);
    }

    let text = response.text().ok_or_else(|| {
        AppError::server(ProviderError::Decode(format!(
            "candidate has no text (finish reason: {})",
            response.finish_reason().unwrap_or("unknown")
        )))
    })?;

    Ok(ScriptEnvelope::from_text(text))
}
