// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved viewer preferences: playback pacing, simulator endpoint, board layout.
//!
//! Every section is `#[serde(default)]`, so a prefs file written by an older
//! viewer (or edited by hand down to a single field) still loads.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Key under which [`ViewerPrefs`] are stored.
pub const VIEWER_PREFS_KEY: &str = "viewer";

/// Saved preferences for the droplet viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ViewerPrefs {
    /// Animation and autoplay pacing.
    pub playback: PlaybackPrefs,
    /// Simulator endpoint.
    pub server: ServerPrefs,
    /// Board geometry used by the terminal renderer.
    pub board: BoardPrefs,
}

impl ViewerPrefs {
    /// Replace zero durations and empty board dimensions with defaults.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let playback = PlaybackPrefs::default();
        if self.playback.tween_ms == 0 {
            self.playback.tween_ms = playback.tween_ms;
        }
        if self.playback.autoplay_interval_ms == 0 {
            self.playback.autoplay_interval_ms = playback.autoplay_interval_ms;
        }
        let board = BoardPrefs::default();
        if self.board.width == 0 || self.board.height == 0 {
            self.board.width = board.width;
            self.board.height = board.height;
        }
        if self.board.cell_size == 0 {
            self.board.cell_size = board.cell_size;
        }
        self
    }
}

/// Animation pacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackPrefs {
    /// Base tween length for a single frame step, in milliseconds.
    pub tween_ms: u64,
    /// Delay between autoplay steps, in milliseconds.
    pub autoplay_interval_ms: u64,
}

impl PlaybackPrefs {
    /// Base tween length as a [`Duration`].
    pub const fn tween(&self) -> Duration {
        Duration::from_millis(self.tween_ms)
    }

    /// Autoplay period as a [`Duration`].
    pub const fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }
}

impl Default for PlaybackPrefs {
    fn default() -> Self {
        Self {
            tween_ms: 200,
            autoplay_interval_ms: 500,
        }
    }
}

/// JSON-RPC endpoint of the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerPrefs {
    /// Endpoint URL.
    pub url: String,
    /// Method that returns one frame of droplet info per call.
    pub method: String,
}

impl Default for ServerPrefs {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:3000/rpc".into(),
            method: "visualizer_droplet_info".into(),
        }
    }
}

/// Board geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardPrefs {
    /// Columns.
    pub width: u32,
    /// Rows.
    pub height: u32,
    /// Terminal cells per board cell, horizontally.
    pub cell_size: u32,
}

impl Default for BoardPrefs {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            cell_size: 2,
        }
    }
}
