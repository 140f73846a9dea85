// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Timeline playback engine for droplet snapshots.
//!
//! The engine reconciles an append-only, lazily fetched sequence of frames
//! with a user-driven playback cursor that can move in both directions.
//!
//! # Key Concepts
//!
//! - **[`FrameStore`]**: append-only cache of fetched frames, indexed by arrival order.
//! - **[`EntityTracker`]**: live set of visual droplets with soft-delete and revival.
//! - **[`PlaybackCursor`]**: `display_frame` (shown) versus `selected_frame` (wanted).
//! - **[`PlaybackEngine`]**: the coordinator. Each cycle either fetches the next
//!   frame or replays one cached frame, one step at a time, and never both.
//!
//! Rendering and transport stay outside: the engine talks to them through the
//! [`AnimationDriver`] and [`FrameFetcher`] ports and is resumed by the host
//! through [`PlaybackEngine::on_frame_fetched`] and [`PlaybackEngine::on_complete`].
//!
//! # Invariants
//!
//! - Frames are never mutated after insertion and the store only grows.
//! - `0 <= selected_frame <= max_frame` after every navigation call.
//! - At most one fetch or one animation batch is in flight at any time.
//! - Every frame between the start and end of a jump is replayed in order.
//! - Once closed, `max_frame` is frozen and no further fetch is issued.

mod cursor;
mod engine;
mod error;
mod port;
mod store;
mod tracker;

pub use cursor::{PlaybackCursor, SliderPosition};
pub use engine::{Activity, PlaybackConfig, PlaybackEngine, PlaybackState};
pub use error::{PlaybackError, StoreError};
pub use port::{AnimationBatch, AnimationDriver, FetchError, FrameFetcher};
pub use store::FrameStore;
pub use tracker::{EntityTracker, Reconciliation, Transition, TransitionKind, VisualEntity};
