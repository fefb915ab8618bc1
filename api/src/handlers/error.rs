//! Error-to-HTTP mapping
//!
//! | domain error          | status | code                  |
//! |-----------------------|--------|-----------------------|
//! | `Validation`          | 400    | `VALIDATION_ERROR`    |
//! | `InvalidOrExpired`    | 400    | `INVALID_OR_EXPIRED`  |
//! | `StorageUnavailable`  | 503    | `STORAGE_UNAVAILABLE` |
//! | `Internal`            | 500    | `INTERNAL_ERROR`      |

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use std::collections::HashMap;
use uuid::Uuid;
use validator::ValidationErrors;

use ea_core::errors::DomainError;
use ea_shared::{error_codes, DetailedResponse, ErrorDetail, ErrorResponse, ResponseMeta};

const UNAVAILABLE_MESSAGE: &str =
    "The service is temporarily unavailable. Please try again later.";
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Request id from `X-Request-ID`, or a fresh one
pub fn request_id(req: &HttpRequest) -> String {
    req.headers()
        .get("X-Request-ID")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Convert a domain error into the standard error envelope
pub fn domain_error_response(error: &DomainError, request_id: &str) -> HttpResponse {
    let (status, detail) = match error {
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            ErrorDetail::new(error_codes::VALIDATION_ERROR, message.clone()),
        ),
        DomainError::Verification(e) => (
            StatusCode::BAD_REQUEST,
            ErrorDetail::new(error_codes::INVALID_OR_EXPIRED, e.user_message()),
        ),
        DomainError::StorageUnavailable { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorDetail::new(error_codes::STORAGE_UNAVAILABLE, UNAVAILABLE_MESSAGE),
        ),
        DomainError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorDetail::new(error_codes::INTERNAL_ERROR, INTERNAL_MESSAGE),
        ),
    };

    if status.is_server_error() {
        tracing::error!(
            request_id = %request_id,
            error = %error,
            status = status.as_u16(),
            "Request failed"
        );
    } else {
        tracing::debug!(
            request_id = %request_id,
            error = %error,
            status = status.as_u16(),
            "Request rejected"
        );
    }

    HttpResponse::build(status).json(DetailedResponse::<()>::failure(
        detail,
        ResponseMeta::with_request_id(request_id),
    ))
}

/// Convert validator failures into a 400 with per-field messages
pub fn validation_error_response(errors: &ValidationErrors, request_id: &str) -> HttpResponse {
    let mut fields = HashMap::new();

    for (field, errors) in errors.field_errors() {
        let messages: Vec<String> = errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        fields.insert(field.to_string(), messages);
    }

    tracing::warn!(request_id = %request_id, fields = ?fields, "Request validation failed");

    let detail = ErrorDetail::new(
        error_codes::VALIDATION_ERROR,
        "Invalid request data. Please check the submitted fields.",
    )
    .with_fields(fields);

    HttpResponse::BadRequest().json(DetailedResponse::<()>::failure(
        detail,
        ResponseMeta::with_request_id(request_id),
    ))
}

/// Turn unreadable JSON bodies into a 400 instead of actix's plain-text default
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let reason = err.to_string();
    let response = HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::BAD_REQUEST, "Malformed request body")
            .add_detail("reason", &reason),
    );
    InternalError::from_response(err, response).into()
}
