use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::{HealthResponse, ScriptEnvelope, ScriptRequest, VoiceRequest};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::{script, tts};

pub async fn generate_script(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScriptRequest>, JsonRejection>,
) -> Result<Json<ScriptEnvelope>, AppError> {
    let Json(request) =
        payload.map_err(|e| AppError::server(AppError::Internal(e.body_text())))?;

    let envelope = script::generate(state.generator.as_ref(), request).await?;

    Ok(Json(envelope))
}

pub async fn generate_voice(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<VoiceRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Internal(e.body_text()))?;

    let audio = tts::speak(state.synthesizer.as_ref(), request.text.as_deref()).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "audio/mpeg"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"voice.mp3\""),
        ],
        audio,
    )
        .into_response())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
