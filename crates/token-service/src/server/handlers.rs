//! Axum request handlers for all service endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use common::{
    protocol::{ErrorResponse, HealthResponse, TokenEnvelope, WhoAmIResponse},
    CallerInfo, ServiceError,
};

use super::{error::ApiError, state::AppState};

/// `POST /tokens/user` — issue a token bound to the caller's user id.
pub async fn issue_user_token(
    State(state): State<AppState>,
    Json(caller): Json<CallerInfo>,
) -> Result<Json<TokenEnvelope>, ApiError> {
    let token = state.helper.generate_string_user_token(&caller)?;
    Ok(Json(TokenEnvelope { token }))
}

/// `POST /tokens/device` — issue a device token (`uid` written as 0).
pub async fn issue_device_token(
    State(state): State<AppState>,
    Json(caller): Json<CallerInfo>,
) -> Result<Json<TokenEnvelope>, ApiError> {
    let token = state.helper.generate_string_device_token(&caller)?;
    Ok(Json(TokenEnvelope { token }))
}

/// `POST /tokens/parse` — decode a token back into its [`CallerInfo`].
///
/// Every kind of invalid token yields the same `401`.
pub async fn parse_token(
    State(state): State<AppState>,
    Json(req): Json<TokenEnvelope>,
) -> Result<Json<CallerInfo>, ApiError> {
    state
        .helper
        .parse_token(req.token.trim())
        .map(Json)
        .ok_or_else(|| ServiceError::Unauthenticated("invalid caller token".into()).into())
}

/// `GET /whoami` — echo the authenticated caller, without key material.
pub async fn whoami(Extension(caller): Extension<CallerInfo>) -> Json<WhoAmIResponse> {
    Json(WhoAmIResponse::from(&caller))
}

/// `GET /health` — liveness check.
///
/// The cipher is built before the server starts, so a running service is ready.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}
