// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON-RPC 2.0 envelopes used by the simulator.
//!
//! Request: `{"jsonrpc":"2.0","id":n,"method":"visualizer_droplet_info","params":[]}`.
//! Result: an array of droplet info objects, decoded straight into
//! [`EntitySnapshot`]s.

use droplet_model::{EntitySnapshot, Frame};
use serde::{Deserialize, Serialize};

use crate::error::RpcError;

/// Outgoing request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    /// Always `"2.0"`.
    pub jsonrpc: &'static str,
    /// Caller-assigned request id.
    pub id: u64,
    /// Method name.
    pub method: &'a str,
    /// Positional params (none for frame calls).
    pub params: &'a [serde_json::Value],
}

impl<'a> RpcRequest<'a> {
    /// Parameterless call to `method`.
    pub const fn new(id: u64, method: &'a str) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params: &[],
        }
    }
}

/// Incoming response envelope.
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    /// Echoed request id (servers may omit it on parse errors).
    pub id: Option<u64>,
    /// Successful payload.
    pub result: Option<T>,
    /// Error payload.
    pub error: Option<RpcFault>,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RpcFault {
    /// Error code.
    pub code: i64,
    /// Human-readable message.
    pub message: String,
}

/// Decode a response to request `id` as frame `index`.
///
/// An `error` member wins over `result`. An empty result array is a valid
/// frame with no droplets.
pub fn decode_frame(id: u64, index: usize, body: &[u8]) -> Result<Frame, RpcError> {
    let response: RpcResponse<Vec<EntitySnapshot>> = serde_json::from_slice(body)?;
    if let Some(fault) = response.error {
        return Err(RpcError::Rejected {
            code: fault.code,
            message: fault.message,
        });
    }
    if let Some(got) = response.id {
        if got != id {
            return Err(RpcError::IdMismatch { expected: id, got });
        }
    }
    let entities = response.result.ok_or(RpcError::MissingResult)?;
    Ok(Frame::new(index, entities))
}
