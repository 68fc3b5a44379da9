//! `ValidForIssuance` over HTTP/JSON.
//!
//! `POST /v1/valid-for-issuance` with `{"name": "www.example.com"}` answers
//! `{"valid": true}` or `{"valid": false}`. When no decision can be made the
//! response is an error status with `{"error": "..."}`, never a boolean.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use caa_core::{CaaChecker, CaaError};

/// Request body of `ValidForIssuance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,
}

/// Response body of `ValidForIssuance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valid {
    pub valid: bool,
}

/// Failed decision, rendered as an error response.
#[derive(Debug)]
pub struct RpcError(CaaError);

impl RpcError {
    fn status(&self) -> StatusCode {
        match self.0 {
            CaaError::Lookup { .. } => StatusCode::BAD_GATEWAY,
            CaaError::DeadlineExceeded(_) => StatusCode::GATEWAY_TIMEOUT,
            CaaError::InvalidName(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<CaaError> for RpcError {
    fn from(err: CaaError) -> Self {
        Self(err)
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.0.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

/// Build the RPC router around a shared checker.
pub fn router(checker: CaaChecker) -> Router {
    Router::new()
        .route("/v1/valid-for-issuance", post(valid_for_issuance))
        .route("/health", get(health_check))
        .with_state(checker)
}

async fn valid_for_issuance(
    State(checker): State<CaaChecker>,
    Json(domain): Json<Domain>,
) -> Result<Json<Valid>, RpcError> {
    let valid = checker.check_caa(&domain.name).await.map_err(|e| {
        warn!(name = %domain.name, error = %e, "ValidForIssuance failed");
        RpcError::from(e)
    })?;
    Ok(Json(Valid { valid }))
}

async fn health_check() -> &'static str {
    "ok"
}
