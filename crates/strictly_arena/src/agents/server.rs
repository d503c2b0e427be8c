//! Serves a local agent over the HTTP protocol [`RemoteAgent`] speaks.
//!
//! [`RemoteAgent`]: super::RemoteAgent

use super::{Agent, AgentError, InitializeRequest, PlayRequest, PlayResponse};
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

type SharedAgent = Arc<Mutex<Box<dyn Agent>>>;

/// Builds the router exposing `agent` at `/initialize` and `/play`.
pub fn agent_router(agent: Box<dyn Agent>) -> Router {
    let state: SharedAgent = Arc::new(Mutex::new(agent));
    Router::new()
        .route("/health", get(health))
        .route("/initialize", post(initialize))
        .route("/play", post(play))
        .with_state(state)
}

/// Serves `agent` on `bind:port` until the process stops.
#[instrument(skip(agent), fields(agent = %agent.name()))]
pub async fn serve_agent(agent: Box<dyn Agent>, bind: &str, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind((bind, port)).await?;
    info!(address = %listener.local_addr()?, "Agent server listening");
    axum::serve(listener, agent_router(agent)).await
}

async fn health() -> &'static str {
    "ok"
}

fn seconds(time_left: Option<f64>) -> Option<Duration> {
    time_left.and_then(|secs| Duration::try_from_secs_f64(secs).ok())
}

fn failure(err: AgentError) -> (StatusCode, String) {
    warn!(error = %err, "Local agent failed");
    let status = match err {
        AgentError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

/// POST /initialize
async fn initialize(
    State(agent): State<SharedAgent>,
    Json(request): Json<InitializeRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut agent = agent.lock().await;
    agent
        .initialize(&request.board, &request.players, seconds(request.time_left))
        .await
        .map_err(failure)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /play
async fn play(
    State(agent): State<SharedAgent>,
    Json(request): Json<PlayRequest>,
) -> Result<Json<PlayResponse>, (StatusCode, String)> {
    let mut agent = agent.lock().await;
    let action = agent
        .play(
            &request.board,
            request.player,
            request.step,
            seconds(request.time_left),
        )
        .await
        .map_err(failure)?;
    Ok(Json(PlayResponse { action }))
}
