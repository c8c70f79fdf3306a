// HTTP API tests
// Drive the router directly with a closure-backed synthesis provider

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use bytes::Bytes;
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use talktalk_server::chat::ChatService;
use talktalk_server::chat::EchoReply;
use talktalk_server::config::{VoiceSettings, VoiceStrategy};
use talktalk_server::{create_router, ApiState};
use talktalk_spk::engines::custom::CustomProvider;
use talktalk_spk::selector::voices;
use talktalk_spk::{SpeechError, SpeechSynthesizer, SynthesisRequest};
use tower::ServiceExt;

fn app_with(synthesizer: SpeechSynthesizer, chat: ChatService) -> Router {
    create_router(ApiState {
        synthesizer,
        chat: Arc::new(chat),
    })
}

fn echo_synth() -> SpeechSynthesizer {
    SpeechSynthesizer::new(Arc::new(CustomProvider::new(
        "echo",
        |req: &SynthesisRequest| {
            Ok(Bytes::from(format!(
                "{}|{}|{}|{}",
                req.voice_id, req.speaking_rate, req.pitch_semitones, req.text
            )))
        },
        |lang: Option<&str>| {
            let all = ["en-US-Neural2-D", "en-GB-Neural2-B"];
            Ok(all
                .iter()
                .filter(|v| lang.map_or(true, |l| v.starts_with(l)))
                .map(|v| v.to_string())
                .collect())
        },
    )))
}

fn failing_synth() -> SpeechSynthesizer {
    SpeechSynthesizer::new(Arc::new(CustomProvider::new(
        "failing",
        |_req: &SynthesisRequest| Err(SpeechError::SynthesisFailed("quota exceeded".to_string())),
        |_lang| Err(SpeechError::SynthesisFailed("voices unavailable".to_string())),
    )))
}

fn default_app() -> Router {
    app_with(echo_synth(), ChatService::new(Arc::new(EchoReply), &VoiceSettings::default()))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = default_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_tts_returns_mp3_with_defaults() {
    let response = default_app()
        .oneshot(post_json("/tts", json!({"text": "Hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    let audio = body_bytes(response).await;
    assert_eq!(String::from_utf8(audio).unwrap(), "en-US-Neural2-D|0.9|-2|Hello");
}

#[tokio::test]
async fn test_tts_passes_parameters_through() {
    let response = default_app()
        .oneshot(post_json(
            "/tts",
            json!({"text": "Hi", "voice": "en-GB-Neural2-B", "speed": 4.0, "pitch": -9.0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let audio = body_bytes(response).await;
    assert_eq!(String::from_utf8(audio).unwrap(), "en-GB-Neural2-B|4|-9|Hi");
}

#[tokio::test]
async fn test_tts_keeps_full_precision() {
    let response = default_app()
        .oneshot(post_json(
            "/tts",
            json!({"text": "Hi", "speed": 1.23456789, "pitch": -2.345678901}),
        ))
        .await
        .unwrap();
    let audio = body_bytes(response).await;
    assert_eq!(
        String::from_utf8(audio).unwrap(),
        "en-US-Neural2-D|1.23456789|-2.345678901|Hi"
    );
}

#[tokio::test]
async fn test_tts_empty_text_is_400_without_provider_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let synth = SpeechSynthesizer::new(Arc::new(CustomProvider::new(
        "counting",
        move |_req: &SynthesisRequest| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Bytes::from_static(b"mp3"))
        },
        |_lang| Ok(vec![]),
    )));
    let app = app_with(synth, ChatService::new(Arc::new(EchoReply), &VoiceSettings::default()));

    for body in [json!({"text": ""}), json!({"text": "   "}), json!({})] {
        let response = app.clone().oneshot(post_json("/tts", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "INVALID_INPUT");
        assert_eq!(body["error"], "Text is required");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_tts_provider_failure_is_500() {
    let app = app_with(
        failing_synth(),
        ChatService::new(Arc::new(EchoReply), &VoiceSettings::default()),
    );
    let response = app
        .oneshot(post_json("/tts", json!({"text": "Hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["code"], "SYNTHESIS_FAILED");
    assert_eq!(body["error"], "Text-to-speech failed: quota exceeded");
}

#[tokio::test]
async fn test_chat_echo_with_keyword_voice() {
    let response = default_app()
        .oneshot(post_json(
            "/chat",
            json!({
                "message": "this is urgent",
                "conversationId": "conv-42",
                "history": [{"role": "user", "content": "earlier"}, {"role": "assistant", "content": "ok"}],
                "images": [{"data": "abc"}]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["content"], "You said: this is urgent");
    assert_eq!(body["role"], "assistant");
    assert_eq!(body["conversationId"], "conv-42");
    assert_eq!(
        body["voiceSettings"],
        json!({"voice": "en-US-Neural2-D", "speed": 1.2, "pitch": -5.0})
    );
}

#[tokio::test]
async fn test_chat_default_voice_and_no_conversation_id() {
    let response = default_app()
        .oneshot(post_json("/chat", json!({"message": "hello there"})))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(body.get("conversationId").is_none());
    assert_eq!(
        body["voiceSettings"],
        json!({"voice": "en-GB-Neural2-B", "speed": 4.0, "pitch": -9.0})
    );
}

#[tokio::test]
async fn test_chat_voice_settings_can_be_disabled() {
    let settings = VoiceSettings {
        attach_to_chat: false,
        ..VoiceSettings::default()
    };
    let app = app_with(echo_synth(), ChatService::new(Arc::new(EchoReply), &settings));
    let response = app
        .oneshot(post_json("/chat", json!({"message": "urgent"})))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["content"], "You said: urgent");
    assert!(body.get("voiceSettings").is_none());
}

#[tokio::test]
async fn test_chat_time_strategy_uses_hour_source() {
    let settings = VoiceSettings {
        strategy: VoiceStrategy::Time,
        ..VoiceSettings::default()
    };
    let chat = ChatService::new(Arc::new(EchoReply), &settings).with_hour_source(|| 9);
    let app = app_with(echo_synth(), chat);
    let response = app
        .oneshot(post_json("/chat", json!({"message": "urgent"})))
        .await
        .unwrap();
    let body = body_json(response).await;
    let morning = voices::morning();
    assert_eq!(body["voiceSettings"]["voice"], morning.voice_id);
    assert_eq!(body["voiceSettings"]["speed"], 1.0);
    assert_eq!(body["voiceSettings"]["pitch"], 2.0);
}

#[tokio::test]
async fn test_chat_priority_prefers_keyword_over_clock() {
    let settings = VoiceSettings {
        strategy: VoiceStrategy::Priority,
        ..VoiceSettings::default()
    };
    let chat = ChatService::new(Arc::new(EchoReply), &settings).with_hour_source(|| 21);
    let app = app_with(echo_synth(), chat);

    let response = app
        .clone()
        .oneshot(post_json("/chat", json!({"message": "quick business question"})))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["voiceSettings"]["voice"], "en-GB-Neural2-B");
    assert_eq!(body["voiceSettings"]["speed"], 0.9);

    let response = app
        .oneshot(post_json("/chat", json!({"message": "hello"})))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["voiceSettings"]["voice"], voices::evening().voice_id);
}

#[tokio::test]
async fn test_chat_rejects_unknown_role() {
    let response = default_app()
        .oneshot(post_json(
            "/chat",
            json!({"message": "hi", "history": [{"role": "system", "content": "x"}]}),
        ))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_voices_filtered_by_language() {
    let response = default_app()
        .oneshot(
            Request::builder()
                .uri("/voices?language=en-GB")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["voices"], json!(["en-GB-Neural2-B"]));
}

#[tokio::test]
async fn test_voices_provider_failure_is_500() {
    let app = app_with(
        failing_synth(),
        ChatService::new(Arc::new(EchoReply), &VoiceSettings::default()),
    );
    let response = app
        .oneshot(Request::builder().uri("/voices").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["code"], "SYNTHESIS_FAILED");
    assert!(body["error"].as_str().unwrap().contains("voices unavailable"));
}

#[tokio::test]
async fn test_cors_headers_present() {
    let response = default_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("origin", "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
