// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error types for the frame store and the playback coordinator.

use thiserror::Error;

/// Errors raised by [`FrameStore`](crate::FrameStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A frame was appended whose index is not the current store length.
    ///
    /// Indicates a fetcher that delivered frames out of order.
    #[error("out-of-order frame: expected index {expected}, got {got}")]
    OutOfOrder {
        /// Index the store was waiting for.
        expected: usize,
        /// Index carried by the rejected frame.
        got: usize,
    },

    /// The requested index has not been fetched yet.
    #[error("frame {index} not found (store holds {length} frames)")]
    NotFound {
        /// Requested frame index.
        index: usize,
        /// Number of frames held when the lookup failed.
        length: usize,
    },
}

/// Errors surfaced by [`PlaybackEngine`](crate::PlaybackEngine) callbacks.
///
/// Source exhaustion is not an error: a failed fetch closes the timeline and
/// playback continues inside the frames already held.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The fetcher broke its ordering contract. Fatal for the session.
    #[error("fetcher contract violation: {0}")]
    OutOfOrderFrame(#[from] StoreError),

    /// A fetch result arrived while no fetch was outstanding.
    #[error("fetch result delivered with no fetch in flight")]
    NoFetchInFlight,

    /// A batch completion arrived while no batch was animating.
    #[error("animation completion delivered with no batch in flight")]
    NoBatchInFlight,
}
