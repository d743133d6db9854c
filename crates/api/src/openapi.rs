use crate::models::*;
use crate::routes::health::HealthResponse;
use services::{DetailLevel, InputMode, Language, ProcessResponse, ResolvedKind};
use utoipa::OpenApi;

/// OpenAPI documentation configuration
#[derive(OpenApi)]
#[openapi(
    info(
        title = "LexiMind API",
        description = "Summarizes prose and explains source code by relaying a templated prompt to an OpenAI-compatible chat completion endpoint.\n\nWith `mode: auto` the service decides heuristically whether the input is code or text.",
        version = "1.0.0",
        license(
            name = "MIT",
        )
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::process::process,
    ),
    components(
        schemas(
            ProcessApiRequest, ProcessResponse, ErrorResponse, ValidationErrors,
            HealthResponse, InputMode, DetailLevel, Language, ResolvedKind,
        )
    ),
    tags(
        (name = "Process", description = "Text summarization and code explanation"),
        (name = "Health", description = "Liveness"),
    )
)]
pub struct ApiDoc;
