// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use droplet_playback::FetchError;
use thiserror::Error;

/// Failures while calling the simulator.
#[derive(Debug, Error)]
pub enum RpcError {
    /// HTTP transport failed (connect, timeout, body read).
    #[error("http transport failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Server answered with a non-success HTTP status.
    #[error("server answered HTTP {0}")]
    Status(u16),
    /// Body was not a JSON-RPC response carrying droplet info.
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
    /// Server returned a JSON-RPC `error` member.
    #[error("server rejected call ({code}): {message}")]
    Rejected {
        /// JSON-RPC error code.
        code: i64,
        /// JSON-RPC error message.
        message: String,
    },
    /// Response carried neither `result` nor `error`.
    #[error("response carried neither result nor error")]
    MissingResult,
    /// Response answered a different request.
    #[error("response id {got} does not match request {expected}")]
    IdMismatch {
        /// Id sent with the request.
        expected: u64,
        /// Id found in the response.
        got: u64,
    },
}

impl From<RpcError> for FetchError {
    fn from(err: RpcError) -> Self {
        match err {
            RpcError::Http(_) | RpcError::Status(_) => Self::Transport(err.to_string()),
            RpcError::Rejected { code, message } => Self::Rejected { code, message },
            RpcError::Json(_) | RpcError::MissingResult | RpcError::IdMismatch { .. } => {
                Self::Malformed(err.to_string())
            }
        }
    }
}
