use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use payload_tracker_core::AppError;
use serde::Serialize;
use tracing::{error, info};

/// API error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    message: String,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_client_error() {
            info!(error = %self.0, "request rejected");
        } else {
            error!(error = %self.0, "request failed");
        }

        let (status, message) = match self.0 {
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Issue".to_owned(),
            ),
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use payload_tracker_core::AppError;

    use super::ApiError;

    #[test]
    fn errors_map_to_status_codes() {
        let cases = [
            (AppError::Validation("bad".to_owned()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("missing".to_owned()), StatusCode::NOT_FOUND),
            (
                AppError::Internal("db down".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiError(error).into_response().status(), expected);
        }
    }

    async fn body_text(error: AppError) -> String {
        let response = ApiError(error).into_response();
        match axum::body::to_bytes(response.into_body(), usize::MAX).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(error) => panic!("response body must be readable: {error}"),
        }
    }

    #[tokio::test]
    async fn internal_details_are_masked() {
        let body =
            body_text(AppError::Internal("password authentication failed".to_owned())).await;

        assert_eq!(body, r#"{"message":"Internal Server Issue"}"#);
    }

    #[tokio::test]
    async fn client_errors_keep_their_message() {
        let body =
            body_text(AppError::Validation("sort_dir must be one of asc, desc".to_owned())).await;

        assert_eq!(body, r#"{"message":"sort_dir must be one of asc, desc"}"#);
    }
}
