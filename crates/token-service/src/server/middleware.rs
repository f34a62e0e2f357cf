//! Axum middleware layers applied to the router.
//!
//! Includes request timeout enforcement and caller-token validation for
//! protected routes.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use common::ServiceError;
use tracing::debug;

use super::{error::ApiError, state::AppState};

/// Default per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Require a valid, unexpired caller token in the configured header.
///
/// On success the decoded [`CallerInfo`](common::CallerInfo) is inserted into
/// the request extensions. A missing, unreadable, invalid, or expired token is
/// answered with `401` before the inner handler runs.
pub async fn require_caller(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(value) = req.headers().get(&*state.token_header) else {
        return unauthenticated("missing caller token");
    };
    let Ok(text) = value.to_str() else {
        return unauthenticated("invalid caller token");
    };
    let Some(caller) = state.helper.parse_token(text.trim()) else {
        return unauthenticated("invalid caller token");
    };
    if caller.is_expired(now_millis()) {
        debug!(appid = caller.appid, "caller token expired");
        return unauthenticated("caller token expired");
    }
    req.extensions_mut().insert(caller);
    next.run(req).await
}

fn unauthenticated(reason: &str) -> Response {
    ApiError(ServiceError::Unauthenticated(reason.into())).into_response()
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}
