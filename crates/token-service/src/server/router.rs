//! Axum router construction.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState) -> Router {
    let protected = Router::new()
        .route("/whoami", get(handlers::whoami))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_caller));

    Router::new()
        .route("/tokens/user", post(handlers::issue_user_token))
        .route("/tokens/device", post(handlers::issue_device_token))
        .route("/tokens/parse", post(handlers::parse_token))
        .route("/health", get(handlers::health))
        .merge(protected)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(middleware::REQUEST_TIMEOUT))
        .layer(CompressionLayer::new())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use common::CallerInfo;
    use tower::ServiceExt;

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = build(AppState::default());
        let req = Request::builder()
            .uri("/unknown")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn whoami_requires_token() {
        let app = build(AppState::default());
        let req = Request::builder()
            .uri("/whoami")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 401);
    }

    #[tokio::test]
    async fn whoami_echoes_device_caller() {
        let state = AppState::default();
        let caller = CallerInfo {
            expire: i64::MAX,
            appid: 3,
            device_id: 5,
            uid: 8,
            ..CallerInfo::default()
        }
        .with_key(vec![1u8; 16]);
        let token = state.helper.generate_string_device_token(&caller).unwrap();

        let req = Request::builder()
            .uri("/whoami")
            .header("x-caller-token", token)
            .body(Body::empty())
            .unwrap();
        let resp = build(state).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 200);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["uid"], 0);
        assert_eq!(body["deviceToken"], true);
        assert_eq!(body["hasKey"], true);
        assert!(body.get("key").is_none());
    }
}
