// HTTP API

use crate::chat::{ChatRequest, ChatResponse, ChatService};
use crate::error::ApiError;
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use talktalk_spk::{SpeechSynthesizer, SynthesisRequest};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

pub const DEFAULT_TTS_VOICE: &str = "en-US-Neural2-D";
pub const DEFAULT_TTS_SPEED: f64 = 0.9;
pub const DEFAULT_TTS_PITCH: f64 = -2.0;

#[derive(Clone)]
pub struct ApiState {
    pub synthesizer: SpeechSynthesizer,
    pub chat: Arc<ChatService>,
}

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/tts", post(tts_handler))
        .route("/chat", post(chat_handler))
        .route("/voices", get(voices_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn default_voice() -> String {
    DEFAULT_TTS_VOICE.to_string()
}

fn default_speed() -> f64 {
    DEFAULT_TTS_SPEED
}

fn default_pitch() -> f64 {
    DEFAULT_TTS_PITCH
}

#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    /// Missing text is treated like empty text
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_pitch")]
    pub pitch: f64,
}

async fn tts_handler(
    State(state): State<ApiState>,
    Json(body): Json<TtsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let request = SynthesisRequest {
        text: body.text,
        voice_id: body.voice,
        speaking_rate: body.speed,
        pitch_semitones: body.pitch,
    };

    let result = state.synthesizer.synthesize(&request).await.map_err(|e| {
        warn!("TTS request failed: {}", e);
        ApiError::from_synthesis(e)
    })?;

    info!(voice = %request.voice_id, bytes = result.audio.len(), "TTS response");
    Ok(([(header::CONTENT_TYPE, result.mime_type)], result.audio))
}

async fn chat_handler(
    State(state): State<ApiState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let response = state.chat.respond(body).await.map_err(|e| {
        warn!("Chat request failed: {}", e);
        ApiError::from(e)
    })?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct VoicesQuery {
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<String>,
}

async fn voices_handler(
    State(state): State<ApiState>,
    Query(query): Query<VoicesQuery>,
) -> Result<Json<VoicesResponse>, ApiError> {
    let voices = state
        .synthesizer
        .list_voices(query.language.as_deref())
        .await
        .map_err(|e| {
            warn!("Voice listing failed: {}", e);
            ApiError::from_synthesis(e)
        })?;
    Ok(Json(VoicesResponse { voices }))
}
