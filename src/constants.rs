/// Fixed endpoint all compression uploads are POSTed to.
pub const API_ENDPOINT: &str = "https://api.tinify.com/shrink";

/// Username sentinel for the HTTP Basic credential (`api:<key>`).
pub const AUTH_USER: &str = "api";

/// The only output type that supports creation and location metadata.
pub const JPEG_MIME_TYPE: &str = "image/jpeg";

/// Placeholder for error code/message fields the service did not provide.
pub const UNKNOWN_FIELD: &str = "unknown";
