//! Error types for the catalog server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] estate_catalog::Error),

    #[error("Property not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
}

/// Body of every non-validation error response.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Property not found")]
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Field-attributed validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ValidationProblem {
    #[schema(example = "One or more validation errors occurred.")]
    pub title: String,
    #[schema(example = 400)]
    pub status: u16,
    /// Wire field name to its failure messages.
    pub errors: BTreeMap<String, Vec<String>>,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Catalog(estate_catalog::Error::Validation(errors)) => {
                (StatusCode::BAD_REQUEST, Json(validation_problem(&errors))).into_response()
            }
            Error::Catalog(estate_catalog::Error::Cancelled) => {
                tracing::warn!("Request cancelled before storage completed");
                error_response(StatusCode::SERVICE_UNAVAILABLE, "Request cancelled")
            }
            Error::NotFound => error_response(StatusCode::NOT_FOUND, "Property not found"),
            Error::BadRequest(message) => error_response(StatusCode::BAD_REQUEST, message),
            Error::UnsupportedMediaType(message) => {
                error_response(StatusCode::UNSUPPORTED_MEDIA_TYPE, message)
            }
            Error::PayloadTooLarge(message) => {
                error_response(StatusCode::PAYLOAD_TOO_LARGE, message)
            }
            Error::Catalog(estate_catalog::Error::Storage(_)) => {
                tracing::error!(error = %self, "Internal error");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl Error {
    /// Classify an extractor rejection by the status axum assigned it.
    pub fn rejected(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::PAYLOAD_TOO_LARGE => Error::PayloadTooLarge(message),
            StatusCode::UNSUPPORTED_MEDIA_TYPE => Error::UnsupportedMediaType(message),
            _ => Error::BadRequest(message),
        }
    }
}

/// Wire name of a validated `NewProperty` field.
fn wire_field_name(field: &str) -> &str {
    match field {
        "owner_id" => "IdOwner",
        "name" => "Name",
        "address" => "AddressProperty",
        "price" => "PriceProperty",
        "image" => "Image",
        other => other,
    }
}

/// Problem body listing every failed field with its messages.
pub fn validation_problem(errors: &ValidationErrors) -> ValidationProblem {
    let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (field, failures) in errors.field_errors() {
        let messages = fields
            .entry(wire_field_name(field.as_ref()).to_string())
            .or_default();
        for failure in failures.iter() {
            messages.push(
                failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| failure.code.to_string()),
            );
        }
    }

    ValidationProblem {
        title: "One or more validation errors occurred.".to_string(),
        status: StatusCode::BAD_REQUEST.as_u16(),
        errors: fields,
    }
}
