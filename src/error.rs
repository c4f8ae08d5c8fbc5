use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use std::fmt;
use tracing::error;

/// Failure taxonomy for every employee operation.
///
/// `Internal` carries no detail on purpose: the cause is logged server-side
/// by [`internal`] and the caller only ever sees the fixed message.
#[derive(Debug, Display, PartialEq)]
pub enum ApiError {
    #[display(fmt = "Employee not found")]
    NotFound,

    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(fmt = "Something went wrong, contact the system admin")]
    Internal,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}

/// Failure boundary wrapped around every store and hashing call:
/// log the cause with request context, hand back a generic `Internal`.
pub fn internal<E: fmt::Display>(context: &'static str) -> impl FnOnce(E) -> ApiError {
    move |e| {
        error!(error = %e, "{context}");
        ApiError::Internal
    }
}
