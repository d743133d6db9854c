use crate::{
    consts::{INTERNAL_SERVER_ERROR, INVALID_REQUEST},
    models::{ErrorResponse, ValidationErrors},
};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use std::any::Any;

/// Generic 500 body. Never carries upstream or internal detail.
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ResponseJson(ErrorResponse::new(INTERNAL_SERVER_ERROR)),
    )
        .into_response()
}

pub fn validation_error_response(errors: ValidationErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        ResponseJson(ErrorResponse::with_details(INVALID_REQUEST, errors)),
    )
        .into_response()
}

/// Map a body that is not usable JSON to a client error
pub fn json_rejection_response(rejection: JsonRejection) -> Response {
    let status = rejection.status();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return (
            status,
            ResponseJson(ErrorResponse::new("Payload Too Large")),
        )
            .into_response();
    }

    validation_error_response(ValidationErrors::form(rejection.body_text()))
}

/// Last-resort handler for panics raised while serving a request
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "Unhandled error while serving request");
    internal_error_response()
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, ResponseJson(ErrorResponse::new("Not Found"))).into_response()
}
