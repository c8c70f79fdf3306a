//! Local stand-in for the Google Cloud TTS REST API

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use parking_lot::Mutex;
use std::sync::Arc;

/// One request the stub received
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }

    pub fn form(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

type Responder = dyn Fn(&Recorded) -> (StatusCode, String) + Send + Sync;

pub struct Stub {
    calls: Mutex<Vec<Recorded>>,
    responder: Box<Responder>,
}

impl Stub {
    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<Recorded> {
        self.calls().into_iter().filter(|c| c.path == path).collect()
    }
}

async fn record(
    State(stub): State<Arc<Stub>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let recorded = Recorded {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.to_vec(),
    };
    let response = (stub.responder)(&recorded);
    stub.calls.lock().push(recorded);
    response
}

/// Start a stub server on an ephemeral port; returns its base URL
pub async fn spawn_stub<F>(responder: F) -> (String, Arc<Stub>)
where
    F: Fn(&Recorded) -> (StatusCode, String) + Send + Sync + 'static,
{
    let stub = Arc::new(Stub {
        calls: Mutex::new(Vec::new()),
        responder: Box::new(responder),
    });
    let app = Router::new().fallback(record).with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), stub)
}

/// `{"audioContent": base64(audio)}`
pub fn audio_response(audio: &[u8]) -> String {
    use base64::{engine::general_purpose, Engine as _};
    serde_json::json!({ "audioContent": general_purpose::STANDARD.encode(audio) }).to_string()
}
