//! Recording collaborators and an in-process prediction backend for tests.

use std::{sync::Arc, time::Duration};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use shared::{domain::CellCoord, protocol::PredictionLabel};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{controller::GridDisplay, prediction::PredictionError};

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    Activate(CellCoord, u8),
    DeactivateAll,
    Prediction(String),
    Placeholder,
    Unresolved(String),
}

#[derive(Default)]
pub struct RecordingDisplay {
    calls: std::sync::Mutex<Vec<DisplayCall>>,
}

impl RecordingDisplay {
    pub fn calls(&self) -> Vec<DisplayCall> {
        self.calls.lock().expect("display lock").clone()
    }

    pub fn count(&self, predicate: impl Fn(&DisplayCall) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }

    fn push(&self, call: DisplayCall) {
        self.calls.lock().expect("display lock").push(call);
    }
}

impl GridDisplay for RecordingDisplay {
    fn activate_cell(&self, cell: CellCoord, tier: u8) {
        self.push(DisplayCall::Activate(cell, tier));
    }

    fn deactivate_all(&self) {
        self.push(DisplayCall::DeactivateAll);
    }

    fn show_prediction(&self, label: &PredictionLabel) {
        self.push(DisplayCall::Prediction(label.to_string()));
    }

    fn show_placeholder(&self) {
        self.push(DisplayCall::Placeholder);
    }

    fn show_unresolved(&self, error: &PredictionError) {
        self.push(DisplayCall::Unresolved(error.to_string()));
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub content_type: Option<String>,
    pub body: Bytes,
}

#[derive(Debug, Clone)]
pub enum Reply {
    Json(serde_json::Value),
    Status(StatusCode),
    Raw(&'static str),
    Delayed(Duration, serde_json::Value),
}

#[derive(Clone)]
struct BackendState {
    reply: Reply,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

async fn handle_predict(
    State(state): State<BackendState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state
        .requests
        .lock()
        .await
        .push(CapturedRequest { content_type, body });

    match state.reply {
        Reply::Json(value) => axum::Json(value).into_response(),
        Reply::Status(status) => (status, "backend failure").into_response(),
        Reply::Raw(text) => text.into_response(),
        Reply::Delayed(delay, value) => {
            tokio::time::sleep(delay).await;
            axum::Json(value).into_response()
        }
    }
}

pub async fn spawn_backend(
    reply: Reply,
) -> std::io::Result<(String, Arc<Mutex<Vec<CapturedRequest>>>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = BackendState {
        reply,
        requests: Arc::clone(&requests),
    };
    let app = Router::new()
        .route("/predict", post(handle_predict))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), requests))
}
