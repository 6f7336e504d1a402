/// API path prefix for versioned routes.
pub const API_PREFIX: &str = "/api/v0";

/// Slack added on top of the configured upload ceiling to cover multipart
/// framing, so the body limit rejects payloads the handler would reject
/// anyway rather than truncating ones it would accept.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;
