//! Response-side contract checks.

use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, ResponseError};
use serde::Serialize;
use tracing::error;

use crate::domain::Error;

use super::ValidationErrors;

/// A shape outgoing payloads are projected into and checked against.
pub trait ResponseSchema: Serialize + Sized {
    /// Payload produced by the handler.
    type Source;

    /// Project `source` into the output shape, reporting every violation.
    fn project(source: Self::Source) -> Result<Self, ValidationErrors>;
}

impl<S: ResponseSchema> ResponseSchema for Vec<S> {
    type Source = Vec<S::Source>;

    fn project(source: Self::Source) -> Result<Self, ValidationErrors> {
        let mut items = Vec::with_capacity(source.len());
        let mut errors = ValidationErrors::default();
        for (index, item) in source.into_iter().enumerate() {
            match S::project(item) {
                Ok(output) => items.push(output),
                Err(item_errors) => errors.extend(item_errors.at_index(index)),
            }
        }
        if errors.is_empty() {
            Ok(items)
        } else {
            Err(errors)
        }
    }
}

/// Handler payload that is checked against `S` before it is sent.
///
/// A payload that breaks the output contract is logged and answered with
/// `400` and the list of violated fields.
pub struct ValidatedResponse<S: ResponseSchema> {
    status: StatusCode,
    source: S::Source,
}

impl<S: ResponseSchema> ValidatedResponse<S> {
    /// Respond with `200 OK`.
    pub fn ok(source: S::Source) -> Self {
        Self::with_status(StatusCode::OK, source)
    }

    /// Respond with `201 Created`.
    pub fn created(source: S::Source) -> Self {
        Self::with_status(StatusCode::CREATED, source)
    }

    /// Respond with an explicit success status.
    pub fn with_status(status: StatusCode, source: S::Source) -> Self {
        Self { status, source }
    }

    /// Status sent when the payload passes validation.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<S: ResponseSchema> Responder for ValidatedResponse<S> {
    type Body = BoxBody;

    fn respond_to(self, req: &HttpRequest) -> HttpResponse<Self::Body> {
        match S::project(self.source) {
            Ok(body) => HttpResponse::build(self.status).json(body),
            Err(errors) => {
                error!(
                    method = %req.method(),
                    path = %req.path(),
                    errors = ?errors.errors(),
                    "response failed output validation"
                );
                Error::from(errors).error_response()
            }
        }
    }
}
