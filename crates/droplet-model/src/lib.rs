// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Plain data types for droplet playback.
//!
//! A [`Frame`] is one immutable snapshot of every droplet the upstream service
//! reported at a single step. Frames carry no behavior; reconciliation and
//! playback live in `droplet-playback`.

mod frame;
mod types;

pub use frame::Frame;
pub use types::{DropletId, EntitySnapshot, Extent, Location};
