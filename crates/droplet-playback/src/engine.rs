// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Playback coordinator.
//!
//! # State machine
//!
//! The engine is `Idle`, `Fetching` or `Animating`. Navigation only moves the
//! selection and then calls `update_frame`, which does nothing unless the
//! engine is idle. From idle it takes exactly one step toward the selection:
//!
//! - if the next frame is cached, reconcile it and hand the batch to the
//!   [`AnimationDriver`] (`Animating`);
//! - otherwise ask the [`FrameFetcher`] for the next uncached index
//!   (`Fetching`), unless the timeline is closed.
//!
//! Completion callbacks return the engine to idle and call `update_frame`
//! again, re-reading the selection. Requests made while busy are coalesced
//! into the selection; every intermediate frame is still replayed.

use core::time::Duration;

use droplet_model::{DropletId, Frame};
use tracing::{debug, error, info, trace, warn};

use crate::cursor::{PlaybackCursor, SliderPosition};
use crate::error::PlaybackError;
use crate::port::{AnimationBatch, AnimationDriver, FetchError, FrameFetcher};
use crate::store::FrameStore;
use crate::tracker::EntityTracker;

/// Engine-side configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Length of a single step when no further steps are queued.
    pub base_duration: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_duration: Duration::from_millis(200),
        }
    }
}

/// What the engine is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activity {
    /// Nothing in flight.
    Idle,
    /// Waiting for frame `index` from the fetcher.
    Fetching {
        /// Requested frame index.
        index: usize,
    },
    /// Waiting for batch `epoch` to finish animating.
    Animating {
        /// Batch counter.
        epoch: u64,
        /// Step direction of the batch.
        delta: isize,
    },
}

/// Read-only view of the playback state for hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackState {
    /// Frame currently shown.
    pub display_frame: usize,
    /// Frame the user wants shown.
    pub selected_frame: usize,
    /// Frozen upper bound once closed; `None` while unbounded.
    pub max_frame: Option<usize>,
    /// Whether the source is exhausted. Terminal.
    pub closed: bool,
    /// Whether a fetch or batch is in flight.
    pub running: bool,
    /// Frames fetched so far.
    pub cached_frames: usize,
}

#[derive(Debug)]
enum Phase {
    Idle,
    Fetching {
        index: usize,
    },
    Animating {
        epoch: u64,
        delta: isize,
        in_flight: Vec<DropletId>,
    },
}

/// One playback session: frame cache, tracked droplets, cursor and ports.
///
/// All mutation happens on the caller's thread. Hosts feed asynchronous
/// results back in through [`on_frame_fetched`](Self::on_frame_fetched) and
/// [`on_complete`](Self::on_complete).
#[derive(Debug)]
pub struct PlaybackEngine<D, F> {
    config: PlaybackConfig,
    store: FrameStore,
    tracker: EntityTracker,
    cursor: PlaybackCursor,
    phase: Phase,
    epoch: u64,
    driver: D,
    fetcher: F,
}

impl<D, F> PlaybackEngine<D, F>
where
    D: AnimationDriver,
    F: FrameFetcher,
{
    /// Creates an idle engine with an empty store.
    pub fn new(config: PlaybackConfig, driver: D, fetcher: F) -> Self {
        Self {
            config,
            store: FrameStore::new(),
            tracker: EntityTracker::new(),
            cursor: PlaybackCursor::new(),
            phase: Phase::Idle,
            epoch: 0,
            driver,
            fetcher,
        }
    }

    /// Requests the initial frame if nothing has been fetched yet.
    pub fn start(&mut self) {
        if self.store.is_empty() && matches!(self.phase, Phase::Idle) && !self.is_closed() {
            self.request_fetch();
        }
    }

    /// Selects the next frame. No-op at a frozen `max_frame`.
    pub fn forward(&mut self) {
        if self.cursor.forward() {
            self.update_frame();
        }
    }

    /// Selects the previous frame. No-op at frame 0.
    pub fn backward(&mut self) {
        if self.cursor.backward() {
            self.update_frame();
        }
    }

    /// Selects `target`, clamped into the valid range.
    pub fn seek(&mut self, target: usize) {
        if self.cursor.seek(target) {
            self.update_frame();
        }
    }

    /// Delivers the outcome of the outstanding fetch.
    ///
    /// A failure closes the timeline: `max_frame` freezes at the shown frame
    /// and no further fetch is attempted.
    ///
    /// # Errors
    ///
    /// - [`PlaybackError::NoFetchInFlight`] if no fetch was requested.
    /// - [`PlaybackError::OutOfOrderFrame`] if the frame index is not the one
    ///   requested. The frame is discarded; the session cannot continue fetching
    ///   reliably.
    pub fn on_frame_fetched(
        &mut self,
        result: Result<Frame, FetchError>,
    ) -> Result<(), PlaybackError> {
        let Phase::Fetching { index } = self.phase else {
            warn!("fetch result delivered while not fetching");
            return Err(PlaybackError::NoFetchInFlight);
        };
        self.phase = Phase::Idle;

        match result {
            Ok(frame) => {
                if let Err(err) = self.store.append(frame) {
                    error!(%err, "fetcher delivered an out-of-order frame");
                    return Err(err.into());
                }
                debug!(index, cached = self.store.len(), "frame cached");
                if index == 0 {
                    self.place_initial();
                }
                self.update_frame();
            }
            Err(err) => {
                self.cursor.close();
                info!(
                    %err,
                    max_frame = self.cursor.display_frame(),
                    "frame source closed"
                );
                self.update_frame();
            }
        }
        Ok(())
    }

    /// Signals that the in-flight batch has finished animating.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::NoBatchInFlight`] if no batch was running.
    pub fn on_complete(&mut self) -> Result<(), PlaybackError> {
        let (epoch, delta, in_flight) = match core::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Animating {
                epoch,
                delta,
                in_flight,
            } => (epoch, delta, in_flight),
            other => {
                self.phase = other;
                warn!("batch completion delivered while not animating");
                return Err(PlaybackError::NoBatchInFlight);
            }
        };

        self.cursor.advance(delta);
        let finished = self.tracker.settle(&in_flight);
        if !finished.is_empty() {
            debug!(count = finished.len(), "deferred removals finished");
            self.driver.hide(&finished);
        }
        debug!(epoch, display = self.cursor.display_frame(), "batch complete");

        if self.cursor.delta() == 0 {
            trace!("converged");
        } else {
            self.update_frame();
        }
        Ok(())
    }

    fn update_frame(&mut self) {
        let Some(target) = self.cursor.next_target() else {
            return;
        };
        if !matches!(self.phase, Phase::Idle) {
            trace!(target, "busy; selection coalesced");
            return;
        }
        if target < self.store.len() {
            self.dispatch(target);
        } else if !self.cursor.is_closed() {
            self.request_fetch();
        }
    }

    fn request_fetch(&mut self) {
        let index = self.store.len();
        self.phase = Phase::Fetching { index };
        debug!(index, "requesting frame");
        self.fetcher.request_frame(index);
    }

    fn dispatch(&mut self, target: usize) {
        let delta = self.cursor.delta();
        let Ok(frame) = self.store.get(target) else {
            return;
        };

        let steps = u32::try_from(self.cursor.outstanding_steps().max(1)).unwrap_or(u32::MAX);
        let duration_hint = self.config.base_duration / steps;

        let out = self.tracker.reconcile(frame);
        let in_flight: Vec<DropletId> = out.transitions.iter().map(|t| t.id).collect();
        self.tracker.begin(&in_flight);

        self.epoch += 1;
        let batch = AnimationBatch {
            epoch: self.epoch,
            from_frame: self.cursor.display_frame(),
            to_frame: target,
            transitions: out.transitions,
            hidden: out.hidden,
            duration_hint,
        };
        debug!(
            epoch = batch.epoch,
            from = batch.from_frame,
            to = batch.to_frame,
            moves = batch.transitions.len(),
            hidden = batch.hidden.len(),
            deferred = out.deferred.len(),
            ?duration_hint,
            "replaying frame"
        );
        self.phase = Phase::Animating {
            epoch: self.epoch,
            delta,
            in_flight,
        };
        self.driver.animate(batch);
    }

    fn place_initial(&mut self) {
        let Ok(frame) = self.store.get(0) else {
            return;
        };
        let out = self.tracker.reconcile(frame);
        debug!(droplets = out.transitions.len(), "placing initial frame");
        self.driver.place(&out.transitions);
    }

    /// Snapshot of cursor, bounds and activity.
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            display_frame: self.cursor.display_frame(),
            selected_frame: self.cursor.selected_frame(),
            max_frame: self.cursor.max_frame(),
            closed: self.cursor.is_closed(),
            running: !matches!(self.phase, Phase::Idle),
            cached_frames: self.store.len(),
        }
    }

    /// What the engine is currently waiting for.
    pub fn activity(&self) -> Activity {
        match &self.phase {
            Phase::Idle => Activity::Idle,
            Phase::Fetching { index } => Activity::Fetching { index: *index },
            Phase::Animating { epoch, delta, .. } => Activity::Animating {
                epoch: *epoch,
                delta: *delta,
            },
        }
    }

    /// Slider readout: `display_frame + delta()` and the current upper bound.
    pub fn slider(&self) -> SliderPosition {
        self.cursor.slider(self.store.len())
    }

    /// Whether the source is exhausted.
    pub fn is_closed(&self) -> bool {
        self.cursor.is_closed()
    }

    /// The cursor.
    pub fn cursor(&self) -> &PlaybackCursor {
        &self.cursor
    }

    /// Cached frames.
    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    /// Tracked droplets.
    pub fn tracker(&self) -> &EntityTracker {
        &self.tracker
    }

    /// The animation driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The animation driver, mutably (hosts tick their tweens through this).
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// The fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The fetcher, mutably.
    pub fn fetcher_mut(&mut self) -> &mut F {
        &mut self.fetcher
    }
}
