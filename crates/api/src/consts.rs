/// Maximum accepted request body size (JSON)
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Name reported by the health endpoint
pub const SERVICE_NAME: &str = "LexiMind Backend";

/// Error string for any failure that is not the caller's fault
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Error string for requests that fail validation
pub const INVALID_REQUEST: &str = "Invalid request";
