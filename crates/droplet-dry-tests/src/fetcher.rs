// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fetcher double serving a fixed list of frames.

use droplet_model::Frame;
use droplet_playback::{FetchError, FrameFetcher};

/// Serves `frames[i]` for request `i`; anything past the end fails with
/// [`FetchError::Closed`], like a source that has run out of steps.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    frames: Vec<Frame>,
    /// Every index requested, in order.
    pub requests: Vec<usize>,
    /// Index requested and not yet answered.
    pub outstanding: Option<usize>,
    /// Times `request_frame` was called while a request was outstanding.
    pub overlaps: usize,
    /// Deliver this many frames, then fail, even if more are scripted.
    pub fail_after: Option<usize>,
}

impl ScriptedFetcher {
    /// Fetcher over `frames`. Frame indices are taken as given.
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            ..Self::default()
        }
    }

    /// Fetcher that fails after delivering `count` frames.
    pub fn failing_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    /// Answers the outstanding request, if any.
    pub fn respond(&mut self) -> Option<Result<Frame, FetchError>> {
        let index = self.outstanding.take()?;
        if self.fail_after.is_some_and(|n| index >= n) {
            return Some(Err(FetchError::Closed));
        }
        Some(self.frames.get(index).cloned().ok_or(FetchError::Closed))
    }
}

impl FrameFetcher for ScriptedFetcher {
    fn request_frame(&mut self, index: usize) {
        if self.outstanding.is_some() {
            self.overlaps += 1;
        }
        self.outstanding = Some(index);
        self.requests.push(index);
    }
}
