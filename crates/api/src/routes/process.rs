use crate::{
    models::{validate_process_request, ErrorResponse, ProcessApiRequest},
    routes::common::{internal_error_response, json_rejection_response, validation_error_response},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde_json::Value;
use services::ProcessResponse;
use tracing::{debug, error};

/// Summarize text or explain code
///
/// Classifies the input when `mode` is `auto`, builds the matching prompt and
/// returns the model's markdown answer.
#[utoipa::path(
    post,
    path = "/api/process",
    tag = "Process",
    request_body = ProcessApiRequest,
    responses(
        (status = 200, description = "Successful completion", body = ProcessResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn process(
    State(app_state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "Rejected unreadable request body");
            return json_rejection_response(rejection);
        }
    };

    // Validate the request
    let request = match validate_process_request(&body) {
        Ok(request) => request,
        Err(errors) => {
            debug!(?errors, "Rejected invalid process request");
            return validation_error_response(errors);
        }
    };

    debug!(
        mode = ?request.mode,
        detail = ?request.detail,
        language = ?request.language,
        "Process request"
    );

    match app_state.process_service.process(request).await {
        Ok(response) => (StatusCode::OK, ResponseJson(response)).into_response(),
        Err(e) => {
            error!(error = %e, "Process request failed");
            internal_error_response()
        }
    }
}
