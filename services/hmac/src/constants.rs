// Headers
//
// HTTP header names are case-insensitive; `http::HeaderName` keeps them
// lowercase, so `X-API-Key` goes on the wire as `x-api-key`.

/// The `X-API-Key` header, sent as `x-api-key`.
pub const X_API_KEY: &str = "x-api-key";
/// The `X-Timestamp` header, sent as `x-timestamp`.
pub const X_TIMESTAMP: &str = "x-timestamp";
/// The `X-Signature` header, sent as `x-signature`.
pub const X_SIGNATURE: &str = "x-signature";

pub const APPLICATION_JSON: &str = "application/json";

// Env values
pub const CERBERUS_API_KEY: &str = "CERBERUS_API_KEY";
pub const CERBERUS_API_SECRET: &str = "CERBERUS_API_SECRET";
