//! JSON error responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use justsplit_core::expense::ExpenseValidationError;
use justsplit_shared::AppError;
use justsplit_shared::types::InvalidCurrencyCode;
use serde_json::json;
use tracing::debug;

/// Error returned by handlers, rendered as `{"error": code, "message": text}`.
#[derive(Debug)]
pub struct ApiError(AppError);

impl ApiError {
    /// Wraps a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<InvalidCurrencyCode> for ApiError {
    fn from(err: InvalidCurrencyCode) -> Self {
        Self(err.into())
    }
}

impl From<ExpenseValidationError> for ApiError {
    fn from(err: ExpenseValidationError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
        debug!(code = self.0.error_code(), error = %self.0, "Request rejected");

        let message = match &self.0 {
            AppError::NotFound(msg) | AppError::Validation(msg) | AppError::BusinessRule(msg) => {
                msg.clone()
            }
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rust_decimal::Decimal;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_body() {
        let (status, json) = body_of(ApiError::from(InvalidCurrencyCode("XX".into()))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "Unknown currency: XX");
    }

    #[tokio::test]
    async fn test_amount_too_large_is_validation_error() {
        let err = ExpenseValidationError::AmountTooLarge {
            amount: Decimal::MAX,
            max: Decimal::ONE,
        };

        let (status, json) = body_of(err.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_business_rule_is_422() {
        let (status, json) = body_of(AppError::BusinessRule("no".into()).into()).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "BUSINESS_RULE_VIOLATION");
    }
}
