//! Shared response-to-error mapping for the API clients.

use serde::Deserialize;
use taskdeck_core::TaskdeckError;

/// FastAPI-style error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

/// Fallback shown when the backend sent no usable message.
pub(crate) const GENERIC_OPERATION_MESSAGE: &str = "The request could not be completed";

/// Maps a non-2xx, non-auth response into an `Operation` error, preferring
/// the backend-provided `detail` message.
pub(crate) async fn operation_error(response: reqwest::Response) -> TaskdeckError {
    let status = response.status().as_u16();
    let message = match response.json::<ErrorBody>().await {
        Ok(ErrorBody {
            detail: Some(detail),
        }) => detail,
        _ => GENERIC_OPERATION_MESSAGE.to_string(),
    };
    TaskdeckError::operation(status, message)
}

/// Maps a transport failure into a `Network` error.
pub(crate) fn network_error(context: &str, err: reqwest::Error) -> TaskdeckError {
    TaskdeckError::network(format!("{}: {}", context, err))
}
