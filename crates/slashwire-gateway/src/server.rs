//! Interactions webhook server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};

use slashwire_commands::{DispatchError, InteractionDispatcher};
use slashwire_verify::{RequestAuthenticator, SIGNATURE_HEADER, TIMESTAMP_HEADER};

/// Fixed body for every 401. One string for every failure class, so the
/// response never reveals which check rejected the request.
const UNAUTHORIZED_BODY: &str = "invalid request signature";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    authenticator: Arc<RequestAuthenticator>,
    dispatcher: Arc<InteractionDispatcher>,
}

impl GatewayState {
    pub fn new(authenticator: RequestAuthenticator, dispatcher: InteractionDispatcher) -> Self {
        Self {
            authenticator: Arc::new(authenticator),
            dispatcher: Arc::new(dispatcher),
        }
    }
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

/// Builds the router: the interactions webhook mounted at `path` plus a
/// plain liveness route.
pub fn interactions_router(path: &str, state: GatewayState) -> Router {
    Router::new()
        .route(path, post(handle_interaction))
        .route("/healthz", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_interaction(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // 1. Authenticate before treating a single body byte as JSON. The
    //    authenticator logs the concrete cause; the reply stays generic.
    let signature = header_str(&headers, SIGNATURE_HEADER);
    let timestamp = header_str(&headers, TIMESTAMP_HEADER);
    if state
        .authenticator
        .authenticate(signature, timestamp, &body)
        .is_err()
    {
        return (StatusCode::UNAUTHORIZED, UNAUTHORIZED_BODY).into_response();
    }

    // 2. Dispatch the exact bytes that were just verified.
    match state.dispatcher.handle(&body).await {
        Ok(response) => Json(response).into_response(),
        Err(err @ DispatchError::Decode(_)) => {
            error!("[Gateway] Undecodable interaction payload: {}", err);
            (StatusCode::BAD_REQUEST, "bad_json").into_response()
        }
        Err(DispatchError::MissingCommandName) => {
            error!("[Gateway] Command interaction without a command name");
            (StatusCode::BAD_REQUEST, "missing_command_name").into_response()
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

// ---------------------------------------------------------------------------
// Serve loop
// ---------------------------------------------------------------------------

/// Binds `addr` and serves the interactions router until the process exits.
#[instrument(skip(state))]
pub async fn serve(addr: SocketAddr, path: &str, state: GatewayState) -> Result<()> {
    let app = interactions_router(path, state);

    info!("[Gateway] Listening on {} (interactions at {})", addr, path);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
