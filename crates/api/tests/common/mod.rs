#![allow(dead_code)]

use api::{app_state_with_provider, build_app, AppState};
use config::OpenRouterConfig;
use inference_providers::MockProvider;
use std::sync::Arc;

pub const TEST_MODEL: &str = "test/model";

/// Helper function to create a test provider configuration
pub fn test_openrouter_config() -> OpenRouterConfig {
    let mut config = OpenRouterConfig::new("sk-test", "http://localhost:0");
    config.model = TEST_MODEL.to_string();
    config
}

fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::level_filters::LevelFilter::DEBUG)
        .try_init();
}

/// Start an in-process server backed by the given mock provider
pub fn setup_test_server_with_provider(provider: MockProvider) -> axum_test::TestServer {
    init_test_tracing();
    let state = app_state_with_provider(Arc::new(provider), &test_openrouter_config());
    axum_test::TestServer::new(build_app(state)).unwrap()
}

/// Start an in-process server around an arbitrary application state
pub fn setup_test_server_with_state(state: AppState) -> axum_test::TestServer {
    init_test_tracing();
    axum_test::TestServer::new(build_app(state)).unwrap()
}

/// Start a server with a default mock provider, returning a handle to inspect its calls
pub fn setup_test_server() -> (axum_test::TestServer, MockProvider) {
    let provider = MockProvider::new();
    let server = setup_test_server_with_provider(provider.clone());
    (server, provider)
}
