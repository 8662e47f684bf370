use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

/// Error body returned by every failing route
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "error": "Bad Request",
    "message": "Invalid input: amnt_sort must be one of ASC, DESC",
    "request_id": "2f1c8c1e-5d43-4a38-9d0e-0a8f4f9a7c11",
    "timestamp": "2024-12-09T10:30:00.000Z"
}))]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Bad Request", "Internal Server Error")
    #[schema(example = "Bad Request")]
    pub error: String,
    /// Human-readable error description
    pub message: String,
    /// Unique request identifier for support and debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// RFC 3339 timestamp when the error occurred
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(DbErr),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServiceError {
    /// Classifies a driver error. Pool exhaustion and closed pools mean the
    /// store could not be reached at all, everything else is a statement failure.
    pub fn from_db(err: DbErr) -> Self {
        match err {
            DbErr::ConnectionAcquire(reason) => ServiceError::ServiceUnavailable(reason.to_string()),
            DbErr::Conn(reason) => ServiceError::ServiceUnavailable(reason.to_string()),
            other => ServiceError::DatabaseError(other),
        }
    }

    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DatabaseError(_) | Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Backend errors return generic messages to avoid leaking driver details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::ServiceUnavailable(_) => "Database unavailable".to_string(),
            Self::InternalError(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        ServiceError::from_db(err)
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => ServiceError::ValidationError(err.body_text()),
            JsonRejection::JsonSyntaxError(err) => ServiceError::InvalidInput(err.body_text()),
            JsonRejection::MissingJsonContentType(err) => {
                ServiceError::UnsupportedMediaType(err.body_text())
            }
            other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                ServiceError::PayloadTooLarge
            }
            other => ServiceError::InvalidInput(other.body_text()),
        }
    }
}

impl From<FormRejection> for ServiceError {
    fn from(rejection: FormRejection) -> Self {
        match rejection {
            FormRejection::FailedToDeserializeForm(err) => {
                ServiceError::ValidationError(err.body_text())
            }
            FormRejection::FailedToDeserializeFormBody(err) => {
                ServiceError::ValidationError(err.body_text())
            }
            FormRejection::InvalidFormContentType(err) => {
                ServiceError::UnsupportedMediaType(err.body_text())
            }
            other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                ServiceError::PayloadTooLarge
            }
            other => ServiceError::InvalidInput(other.body_text()),
        }
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        ServiceError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => {
                ServiceError::InvalidInput(err.body_text())
            }
            other => ServiceError::InternalError(other.body_text()),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }

        let err = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.response_message(),
            request_id: current_request_id(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(err)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use rstest::rstest;
    use sea_orm::ConnAcquireErr;

    #[tokio::test]
    async fn error_response_includes_request_id() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("req-123"), async {
                ServiceError::InvalidInput("bad sort".into()).into_response()
            })
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.request_id.as_deref(), Some("req-123"));
        assert_eq!(payload.error, "Bad Request");
    }

    #[rstest]
    #[case(ServiceError::DatabaseError(DbErr::Custom("x".into())), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(ServiceError::ServiceUnavailable("x".into()), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND)]
    #[case(ServiceError::MethodNotAllowed("x".into()), StatusCode::METHOD_NOT_ALLOWED)]
    #[case(ServiceError::Conflict("x".into()), StatusCode::CONFLICT)]
    #[case(ServiceError::InvalidInput("x".into()), StatusCode::BAD_REQUEST)]
    #[case(ServiceError::ValidationError("x".into()), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(ServiceError::UnsupportedMediaType("x".into()), StatusCode::UNSUPPORTED_MEDIA_TYPE)]
    #[case(ServiceError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE)]
    #[case(ServiceError::InternalError("x".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_mapping(#[case] err: ServiceError, #[case] expected: StatusCode) {
        assert_eq!(err.status_code(), expected);
    }

    #[test]
    fn acquisition_failures_are_unavailable() {
        let err = ServiceError::from_db(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let err: ServiceError = DbErr::Custom("syntax".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn response_message_hides_driver_details() {
        assert_eq!(
            ServiceError::DatabaseError(DbErr::Custom("password=hunter2".into()))
                .response_message(),
            "Database error"
        );
        assert_eq!(
            ServiceError::InternalError("sea-query".into()).response_message(),
            "Internal server error"
        );
        assert_eq!(
            ServiceError::InvalidInput("amnt_sort".into()).response_message(),
            "Invalid input: amnt_sort"
        );
    }
}
