// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON-RPC client for the droplet simulator, plus a tool-facing adapter that
//! turns it into a [`FrameFetcher`](droplet_playback::FrameFetcher).
//!
//! Every call to the configured method returns the *next* frame of droplet
//! info; the frame index is assigned client side from the engine's request.

mod client;
mod error;
mod fetcher;
pub mod wire;

pub use client::RpcClient;
pub use error::RpcError;
pub use fetcher::{spawn_fetch_worker, ChannelFetcher, Delivery, FrameSource};
