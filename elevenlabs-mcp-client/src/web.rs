//! HTTP adapter exposing the client facade.
//!
//! Routes:
//! - `POST /api/tts`: run a simple or script generation
//! - `GET /health`: liveness check
//!
//! The facade is built once at startup and shared through the router state.

use crate::channel::Connector;
use crate::client::TtsClient;
use crate::request::{ScriptInput, ScriptInterface};
use crate::response::AudioGenerationResponse;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use elevenlabs_mcp_common::Error as CommonError;
use serde::Deserialize;
use serde_json::{Value, json};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Request type used when the body does not name one.
pub const DEFAULT_TTS_TYPE: &str = "simple";

/// Prefix of every adapter failure message.
pub const SERVER_ERROR_PREFIX: &str = "Server error: ";

/// Shared state of the HTTP adapter.
pub struct AppState<C: Connector> {
    pub client: Arc<TtsClient<C>>,
}

impl<C: Connector> AppState<C> {
    pub fn new(client: Arc<TtsClient<C>>) -> Self {
        Self { client }
    }
}

// Manual impl: a derive would require `C: Clone`.
impl<C: Connector> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

/// Body of `POST /api/tts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TtsRequest {
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub voice_id: Option<String>,

    /// `"simple"` or `"script"`
    #[serde(rename = "type", default = "default_tts_type")]
    pub kind: String,

    /// Either a pre-serialized script string or a script object.
    #[serde(default)]
    pub script: Option<Value>,
}

fn default_tts_type() -> String {
    DEFAULT_TTS_TYPE.to_string()
}

/// Interpret the `script` field of a request body.
///
/// Strings are forwarded verbatim. Objects in the script shape are sent as a
/// structured script; any other JSON is forwarded as its serialized text.
pub fn script_input(value: Value) -> Option<ScriptInput> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(ScriptInput::Raw(text)),
        other => match serde_json::from_value::<ScriptInterface>(other.clone()) {
            Ok(script) => Some(ScriptInput::Structured(script)),
            Err(_) => Some(ScriptInput::Raw(other.to_string())),
        },
    }
}

/// Adapter failure, rendered as a failed generation response.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "message": format!("{}{}", SERVER_ERROR_PREFIX, self.message),
            "debugInfo": [],
        }));
        (self.status, body).into_response()
    }
}

impl From<CommonError> for ApiError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::Validation(message) => ApiError::internal(message),
            other => ApiError::internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

/// Build the adapter router around a shared client.
pub fn router<C: Connector>(client: Arc<TtsClient<C>>) -> Router {
    Router::new()
        .route("/api/tts", post(generate::<C>))
        .route("/health", get(health))
        .with_state(AppState::new(client))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn generate<C: Connector>(
    State(state): State<AppState<C>>,
    payload: Result<Json<TtsRequest>, JsonRejection>,
) -> Result<Json<AudioGenerationResponse>, ApiError> {
    let Json(request) = payload.inspect_err(|e| warn!(error = %e, "Rejected TTS request"))?;
    info!(kind = %request.kind, "TTS request");

    let response = match request.kind.as_str() {
        "simple" => {
            let text = request.text.unwrap_or_default();
            state.client.generate_simple_audio(text, request.voice_id).await
        }
        "script" => {
            let script = request
                .script
                .and_then(script_input)
                .ok_or_else(|| CommonError::validation("Script is required for type 'script'"))?;
            state.client.generate_script_audio(script).await
        }
        other => return Err(CommonError::validation(format!("Invalid TTS type: {}", other)).into()),
    };

    Ok(Json(response))
}

/// Errors that can occur when running the HTTP adapter.
#[derive(Debug, Error)]
pub enum WebError {
    /// Failed to bind to the specified port
    #[error("Failed to bind to port {port}: {message}")]
    BindFailed { port: u16, message: String },

    /// The server stopped with an error
    #[error("HTTP server error: {0}")]
    Serve(String),
}

/// Bind `0.0.0.0:<port>` and serve until `shutdown` resolves.
pub async fn serve<C, F>(client: Arc<TtsClient<C>>, port: u16, shutdown: F) -> Result<(), WebError>
where
    C: Connector,
    F: Future<Output = ()> + Send + 'static,
{
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| WebError::BindFailed {
            port,
            message: e.to_string(),
        })?;

    serve_listener(listener, client, shutdown).await
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve_listener<C, F>(
    listener: TcpListener,
    client: Arc<TtsClient<C>>,
    shutdown: F,
) -> Result<(), WebError>
where
    C: Connector,
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "HTTP adapter listening");
    }

    axum::serve(listener, router(client))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| WebError::Serve(e.to_string()))?;

    info!("HTTP adapter stopped");
    Ok(())
}

/// Wait for SIGTERM or Ctrl+C.
///
/// If a handler cannot be installed the error is logged and that signal is
/// never reported.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
