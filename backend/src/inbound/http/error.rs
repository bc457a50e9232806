//! HTTP adapter mapping for domain errors.
//!
//! Every failure is rendered as `{"detail": ...}`: the field error list for
//! validation failures, a message string otherwise. Messages of internal and
//! unavailable errors are replaced before they reach the client.

use actix_web::error::PathError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Detail sent for unmatched routes and unparsable path segments.
pub const NOT_FOUND_DETAIL: &str = "Not Found";

/// Detail sent when a known path does not support the request method.
pub const METHOD_NOT_ALLOWED_DETAIL: &str = "Method Not Allowed";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn detail_for(error: &Error) -> Value {
    match error.code() {
        ErrorCode::InternalError => json!("Internal server error"),
        ErrorCode::ServiceUnavailable => json!("Service temporarily unavailable"),
        ErrorCode::InvalidRequest => error
            .details()
            .cloned()
            .unwrap_or_else(|| json!(error.message())),
        ErrorCode::NotFound => json!(error.message()),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(json!({ "detail": detail_for(self) }))
    }
}

/// Default service answering every unmatched route.
pub async fn not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    debug!(method = %req.method(), path = %req.path(), "no route matched");
    Err(Error::not_found(NOT_FOUND_DETAIL))
}

/// Resource default service for methods a known path does not serve.
pub async fn method_not_allowed(req: HttpRequest) -> HttpResponse {
    debug!(method = %req.method(), path = %req.path(), "method not allowed");
    HttpResponse::MethodNotAllowed().json(json!({ "detail": METHOD_NOT_ALLOWED_DETAIL }))
}

/// `PathConfig` error handler: ids that do not parse never match a route.
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = %req.path(), error = %err, "path segment rejected");
    Error::not_found(NOT_FOUND_DETAIL).into()
}
