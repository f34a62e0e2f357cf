//! Mapping of [`ServiceError`] onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::{protocol::ErrorResponse, GenerateError, ServiceError};

/// Handler error: a [`ServiceError`] rendered as an [`ErrorResponse`] body.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

impl From<GenerateError> for ApiError {
    fn from(e: GenerateError) -> Self {
        Self(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse::new(self.0.code(), self.0.to_string());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_renders_401() {
        let resp = ApiError(ServiceError::Unauthenticated("no token".into())).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn oversized_field_renders_400() {
        let resp = ApiError::from(GenerateError::FieldTooLong { field: "oauthid", len: 40_000 })
            .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
