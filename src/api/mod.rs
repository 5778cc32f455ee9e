pub mod handlers;
pub mod routes;


use serde::{Deserialize, Serialize};

use crate::gemini::{Content, Part};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRequest {
    #[serde(default)]
    pub contents: Vec<Content>,
    #[serde(default)]
    pub system_instruction: Option<SystemInstruction>,
    #[serde(default)]
    pub generation_config: Option<RawGenerationConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SystemInstruction {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Caller-supplied generation settings. Anything beyond these two fields
/// (schemas, mime types) is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGenerationConfig {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
}

/// The fixed shape returned to callers, mirroring a single provider candidate.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ScriptEnvelope {
    pub candidates: Vec<EnvelopeCandidate>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EnvelopeCandidate {
    pub content: EnvelopeContent,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EnvelopeContent {
    pub parts: Vec<EnvelopePart>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EnvelopePart {
    pub text: String,
}

impl ScriptEnvelope {
    pub fn from_text(text: String) -> Self {
        Self {
            candidates: vec![EnvelopeCandidate {
                content: EnvelopeContent {
                    parts: vec![EnvelopePart { text }],
                },
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct VoiceRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
