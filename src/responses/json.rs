// responses/json.rs
use crate::errors::{ResultResp, ServerError};
use astra::{Body, Request, ResponseBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Read;

/// Request bodies larger than this are rejected.
const MAX_BODY_BYTES: u64 = 1024 * 1024;

pub fn json_response<T: Serialize + ?Sized>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_vec(value).map_err(|e| {
        tracing::error!(error = %e, "response serialization failed");
        ServerError::InternalError
    })?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

/// Read and decode a JSON request body.
pub fn read_json<T: DeserializeOwned>(req: &mut Request) -> Result<T, ServerError> {
    let mut raw = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut raw)
        .map_err(|e| ServerError::BadRequest(format!("could not read body: {e}")))?;

    if raw.len() as u64 > MAX_BODY_BYTES {
        return Err(ServerError::BadRequest("request body too large".into()));
    }

    serde_json::from_slice(&raw).map_err(|e| ServerError::BadRequest(format!("invalid JSON: {e}")))
}
