pub mod consts;
pub mod models;
pub mod openapi;
pub mod routes;

use crate::{
    consts::MAX_BODY_BYTES,
    openapi::ApiDoc,
    routes::{common::handle_panic, common::not_found, health_check, process},
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use config::{ApiConfig, OpenRouterConfig};
use inference_providers::{InferenceProvider, OpenAiCompatibleProvider};
use services::{ProcessService, ProcessServiceImpl, ProviderCompletionClient};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub process_service: Arc<dyn ProcessService>,
}

/// Wire the real OpenAI-compatible provider from configuration
pub fn init_app_state(config: &ApiConfig) -> anyhow::Result<AppState> {
    let provider = OpenAiCompatibleProvider::new(config.openrouter.clone())?;
    tracing::info!(
        base_url = %config.openrouter.base_url,
        model = %config.openrouter.model,
        "Inference provider configured"
    );
    Ok(app_state_with_provider(Arc::new(provider), &config.openrouter))
}

/// Build the service graph on top of any provider (tests pass a mock)
pub fn app_state_with_provider(
    provider: Arc<dyn InferenceProvider>,
    config: &OpenRouterConfig,
) -> AppState {
    let completion_client = Arc::new(ProviderCompletionClient::new(provider, config));
    AppState {
        process_service: Arc::new(ProcessServiceImpl::new(completion_client)),
    }
}

/// Build the complete application router
pub fn build_app(app_state: AppState) -> Router {
    let api_routes = Router::new().route("/process", post(process));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .merge(build_openapi_routes())
        .fallback(not_found)
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Build OpenAPI documentation routes
pub fn build_openapi_routes() -> Router<AppState> {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}
