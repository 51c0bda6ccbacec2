// HTTP API Error Types
use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::auth::AuthError;
use crate::database::DatabaseError;
use crate::notion::NotionError;
use crate::services::storage::StorageError;
use crate::services::ServiceError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError {
        message: String,
        field_errors: Option<HashMap<String, String>>,
    },
    InvalidJson(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 413 Payload Too Large
    PayloadTooLarge(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // Error status relayed from the document API
    Upstream { status: u16, message: String },

    // 502 Bad Gateway (external service issues)
    BadGateway(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::ValidationError { .. } => 400,
            ApiError::InvalidJson(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::PayloadTooLarge(_) => 413,
            ApiError::InternalServerError(_) => 500,
            ApiError::Upstream { status, .. } => *status,
            ApiError::BadGateway(_) => 502,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            ApiError::InvalidJson(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Conflict(msg) => msg,
            ApiError::PayloadTooLarge(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::Upstream { message, .. } => message,
            ApiError::BadGateway(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::ValidationError { message, field_errors } => {
                let mut response = json!({
                    "error": true,
                    "message": message,
                    "code": "VALIDATION_ERROR"
                });

                if let Some(field_errors) = field_errors {
                    response["field_errors"] = json!(field_errors);
                }

                response
            }
            _ => {
                json!({
                    "error": true,
                    "message": self.message(),
                    "code": self.error_code()
                })
            }
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::Upstream { .. } => "UPSTREAM_ERROR",
            ApiError::BadGateway(_) => "BAD_GATEWAY",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(
        message: impl Into<String>,
        field_errors: Option<HashMap<String, String>>,
    ) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors,
        }
    }

    /// Single-field validation failure
    pub fn invalid_field(field: &str, problem: impl Into<String>) -> Self {
        let mut field_errors = HashMap::new();
        field_errors.insert(field.to_string(), problem.into());
        ApiError::validation_error("Invalid field value", Some(field_errors))
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        ApiError::BadGateway(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            DatabaseError::Conflict(constraint) => {
                tracing::warn!("Unique constraint violated: {}", constraint);
                ApiError::conflict("A record with this identifier already exists")
            }
            DatabaseError::Unavailable(msg) => {
                tracing::error!("Database unavailable: {}", msg);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            DatabaseError::InvalidConfig(msg) => {
                tracing::error!("Database configuration error: {}", msg);
                ApiError::internal_server_error("Database is not configured")
            }
            DatabaseError::QueryError(msg) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("Database query error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
            DatabaseError::Migration(e) => {
                tracing::error!("Migration error: {}", e);
                ApiError::service_unavailable("Service is being updated, please try again later")
            }
        }
    }
}

impl From<NotionError> for ApiError {
    fn from(err: NotionError) -> Self {
        match err {
            NotionError::NotConfigured => ApiError::internal_server_error("Notion token not configured"),
            NotionError::Upstream { status, message } => {
                if StatusCode::from_u16(status).is_ok() {
                    ApiError::Upstream { status, message }
                } else {
                    ApiError::bad_gateway(message)
                }
            }
            NotionError::InvalidBaseUrl(url) => {
                tracing::error!("Invalid Notion base URL: {}", url);
                ApiError::internal_server_error("Notion API base URL is invalid")
            }
            NotionError::Transport(e) => {
                tracing::error!("Notion request failed: {}", e);
                ApiError::bad_gateway("Failed to reach Notion API")
            }
            NotionError::Decode(msg) => {
                tracing::error!("Unexpected Notion response: {}", msg);
                ApiError::bad_gateway("Unexpected response from Notion API")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::unauthorized("Incorrect username or password"),
            AuthError::Inactive => ApiError::forbidden("Admin account is disabled"),
            AuthError::InvalidToken(msg) => ApiError::unauthorized(msg),
            AuthError::SecretNotConfigured => {
                tracing::error!("JWT secret is not configured");
                ApiError::internal_server_error("Authentication is not configured")
            }
            AuthError::TokenGeneration(msg) => {
                tracing::error!("JWT generation error: {}", msg);
                ApiError::internal_server_error("Failed to issue access token")
            }
            AuthError::Hashing(msg) => {
                tracing::error!("Password hashing error: {}", msg);
                ApiError::internal_server_error("Failed to process password")
            }
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => ApiError::not_found(format!("File '{}' not found", key)),
            StorageError::InvalidKey(key) => ApiError::bad_request(format!("Invalid filename '{}'", key)),
            other => {
                tracing::error!("Storage error: {}", other);
                ApiError::internal_server_error("Failed to store file")
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Database(e) => e.into(),
            ServiceError::Auth(e) => e.into(),
            ServiceError::Validation { field, message } => ApiError::invalid_field(field, message),
            ServiceError::Duplicate(msg) => ApiError::bad_request(msg),
            ServiceError::AlreadyExists(msg) => ApiError::conflict(msg),
            ServiceError::RegistrationClosed => ApiError::forbidden("Admin registration is disabled"),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => ApiError::validation_error(e.body_text(), None),
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::bad_request("Expected request with `Content-Type: application/json`")
            }
            other => ApiError::invalid_json(other.body_text()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge("Uploaded file is too large".to_string())
        } else {
            ApiError::bad_request(err.body_text())
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(self.to_json());

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_is_relayed() {
        let err = ApiError::from(NotionError::Upstream {
            status: 404,
            message: "Could not find page".into(),
        });
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "Could not find page");
    }

    #[test]
    fn missing_token_is_server_error() {
        let err = ApiError::from(NotionError::NotConfigured);
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.message(), "Notion token not configured");
    }

    #[test]
    fn database_errors_hide_details() {
        let err = ApiError::from(DatabaseError::QueryError("syntax error at or near".into()));
        assert_eq!(err.status_code(), 500);
        assert!(!err.message().contains("syntax"));

        let err = ApiError::from(DatabaseError::Unavailable("connection refused".into()));
        assert_eq!(err.status_code(), 503);
    }

    #[test]
    fn validation_error_includes_field_errors() {
        let body = ApiError::invalid_field("email", "Invalid email address").to_json();
        assert_eq!(body["error"], true);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["field_errors"]["email"], "Invalid email address");
    }

    #[test]
    fn unauthorized_sets_bearer_challenge() {
        let response = ApiError::unauthorized("Missing Authorization header").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }
}
