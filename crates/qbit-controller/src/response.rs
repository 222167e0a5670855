//! Response body decoding and session cookie extraction.

use qbit_types::{ApiResponse, QbitError};

/// Body the daemon sends for a successful command.
pub(crate) const SUCCESS_SENTINEL: &str = "Ok.";

/// Body the daemon sends for rejected credentials.
pub(crate) const LOGIN_FAILURE_SENTINEL: &str = "Fails.";

/// Decode a raw response body.
///
/// `Ok.` is the success sentinel and an empty body is [`ApiResponse::Empty`]. Anything
/// else must be JSON.
pub(crate) fn decode(raw: &str) -> Result<ApiResponse, QbitError> {
    if raw == SUCCESS_SENTINEL {
        return Ok(ApiResponse::Success);
    }
    if raw.is_empty() {
        return Ok(ApiResponse::Empty);
    }
    Ok(ApiResponse::Json(serde_json::from_str(raw)?))
}

/// Find the session identifier in `Set-Cookie` header values.
pub(crate) fn extract_sid<S: AsRef<str>>(set_cookie: &[S]) -> Option<String> {
    set_cookie.iter().find_map(|header| {
        let header = header.as_ref();
        let start = header.find("SID=")? + "SID=".len();
        let value = header[start..].split(';').next()?.trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}
