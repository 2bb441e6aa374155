//! HTTP route handlers.
//!
//! Handlers delegate to `ServiceState` domain methods and map domain
//! errors to the fixed wire bodies through the shared `error_response`
//! helper.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use keyfob_common::http::error_response;

use crate::protocol::{
    DecryptSeedRequest, GenerateCodeResponse, VerifyCodeRequest, VerifyCodeResponse,
};
use crate::{ServiceError, ServiceState};

/// Build the service router. The binary crate mounts this at `/`.
pub(crate) fn routes(state: Arc<ServiceState>) -> Router {
    Router::new()
        .route("/decrypt-seed", post(decrypt_seed_handler))
        .route("/generate-2fa", get(generate_handler))
        .route("/verify-2fa", post(verify_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// POST /decrypt-seed — decrypt an encrypted seed and persist it.
async fn decrypt_seed_handler(
    State(state): State<Arc<ServiceState>>,
    Json(request): Json<DecryptSeedRequest>,
) -> impl IntoResponse {
    match state.decrypt_and_store(&request.encrypted_seed).await {
        Ok(()) => Json(serde_json::json!({ "status": "ok" })).into_response(),
        Err(e) => map_error(e),
    }
}

/// GET /generate-2fa — current code plus its remaining validity.
async fn generate_handler(State(state): State<Arc<ServiceState>>) -> impl IntoResponse {
    match state.generate().await {
        Ok((code, valid_for)) => Json(GenerateCodeResponse { code, valid_for }).into_response(),
        Err(e) => map_error(e),
    }
}

/// POST /verify-2fa — verify a submitted code with ±1 period tolerance.
async fn verify_handler(
    State(state): State<Arc<ServiceState>>,
    Json(request): Json<VerifyCodeRequest>,
) -> impl IntoResponse {
    match state.verify(request.code.as_deref()).await {
        Ok(valid) => Json(VerifyCodeResponse { valid }).into_response(),
        Err(e) => map_error(e),
    }
}

/// GET /health — container readiness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

fn map_error(error: ServiceError) -> axum::response::Response {
    error_response((&error).into(), error.to_string())
}
