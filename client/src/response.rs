use proto::{DfsError, error::Result, types::ErrorResponse};
use reqwest::Response;
use serde::de::DeserializeOwned;

pub(crate) fn transport_failure(peer: &str, e: reqwest::Error) -> DfsError {
    DfsError::TransportFailure(format!("Error while contacting {peer} : {e}"))
}

/// Turns a non success response into the error the peer reported, keeping its kind.
pub(crate) async fn error_from_response(peer: &str, response: Response) -> DfsError {
    let status = response.status();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => format!("{peer} answered {status}"),
    };
    DfsError::from_status(status.as_u16(), message)
}

pub(crate) async fn decode_json<T: DeserializeOwned>(peer: &str, response: Response) -> Result<T> {
    if !response.status().is_success() {
        return Err(error_from_response(peer, response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| transport_failure(peer, e))
}
