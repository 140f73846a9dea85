// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ports consumed by the playback engine.
//!
//! The engine owns no timers and no sockets. Renderers implement
//! [`AnimationDriver`]; transports implement [`FrameFetcher`]. Both report
//! back asynchronously through the host, which calls
//! [`PlaybackEngine::on_complete`](crate::PlaybackEngine::on_complete) and
//! [`PlaybackEngine::on_frame_fetched`](crate::PlaybackEngine::on_frame_fetched).

use core::time::Duration;

use droplet_model::DropletId;
use thiserror::Error;

use crate::tracker::Transition;

/// One indivisible unit of animation work: a single frame-to-frame step.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationBatch {
    /// Monotonic batch counter for this engine.
    pub epoch: u64,
    /// Frame shown before the step.
    pub from_frame: usize,
    /// Frame shown once the batch completes.
    pub to_frame: usize,
    /// Droplets to move, create or revive.
    pub transitions: Vec<Transition>,
    /// Droplets that disappear at this step.
    pub hidden: Vec<DropletId>,
    /// Suggested wall-clock length of the batch.
    ///
    /// Shrinks as more steps are queued so fast scrubbing compresses time
    /// instead of queuing long real-time playback.
    pub duration_hint: Duration,
}

/// Renderer contract. Drawing, easing and timing are the implementor's concern.
///
/// The engine issues at most one [`animate`](Self::animate) call at a time and
/// waits for `on_complete` before issuing the next.
pub trait AnimationDriver {
    /// Show droplets at their targets immediately (initial frame).
    fn place(&mut self, transitions: &[Transition]);

    /// Start animating a batch. The host must call `on_complete` exactly once
    /// after every transition in the batch has finished.
    fn animate(&mut self, batch: AnimationBatch);

    /// Hide droplets whose deferred removal completed.
    ///
    /// Removals are deferred only while a droplet is still referenced by an
    /// unfinished batch. The engine settles each batch before it reconciles
    /// the next, so with one batch in flight every removal lands in
    /// [`AnimationBatch::hidden`] and the engine never reaches this call.
    fn hide(&mut self, ids: &[DropletId]) {
        let _ = ids;
    }
}

/// Transport contract for retrieving frames.
///
/// The engine requests index `n` only once the store holds exactly `n` frames,
/// and never has more than one request outstanding.
pub trait FrameFetcher {
    /// Start fetching frame `index`. The result is delivered through
    /// `on_frame_fetched`.
    fn request_frame(&mut self, index: usize);
}

/// Reasons a frame could not be fetched. Any of them closes the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The connection to the source failed.
    #[error("transport error: {0}")]
    Transport(String),
    /// The source answered with an error.
    #[error("source rejected request ({code}): {message}")]
    Rejected {
        /// Error code reported by the source.
        code: i64,
        /// Error message reported by the source.
        message: String,
    },
    /// The response could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// The source has nothing more to deliver.
    #[error("source closed")]
    Closed,
}
