//! HTTP helpers for Lambda functions.

use lambda_http::{Body, Response};
use serde::Serialize;

use crate::Error;

/// The `{code, msg}` envelope used by every error response and by the
/// create reply (where `msg` holds a JSON-encoded schedule as a string).
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub code: u16,
    pub msg: String,
}

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(
    status: u16,
    data: &T,
) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(data)?))?)
}

/// Convert a handler error into its `{code, msg}` response.
pub fn error_response(err: &Error) -> Result<Response<Body>, lambda_http::Error> {
    let status = err.status_code();
    json_response(
        status,
        &ApiMessage {
            code: status,
            msg: err.to_string(),
        },
    )
}
