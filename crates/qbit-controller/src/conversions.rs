//! Conversions from decoded responses to the qbit_types models.
//!
//! Calls that must return data treat an empty answer as a failure rather than as
//! empty data; the daemon has no legitimate reason to send nothing back for them.

use qbit_types::{ApiResponse, QbitError};
use serde::de::DeserializeOwned;

/// Deserialize a decoded response into a model.
pub(crate) fn into_model<T: DeserializeOwned>(response: ApiResponse) -> Result<T, QbitError> {
    Ok(serde_json::from_value(response.into_value())?)
}

/// Like [`into_model`], but an empty body or `null` is a [`QbitError::Response`].
pub(crate) fn require_model<T: DeserializeOwned>(
    response: ApiResponse,
    what: &str,
) -> Result<T, QbitError> {
    if response.is_empty() {
        return Err(QbitError::Response(format!("no {what} returned")));
    }
    into_model(response)
}

/// Commands succeed with the `Ok.` sentinel or an empty body.
pub(crate) fn expect_success(response: ApiResponse, what: &str) -> Result<(), QbitError> {
    match response {
        ApiResponse::Success | ApiResponse::Empty => Ok(()),
        ApiResponse::Json(value) => Err(QbitError::Response(format!(
            "unexpected {what} response: {value}"
        ))),
    }
}
