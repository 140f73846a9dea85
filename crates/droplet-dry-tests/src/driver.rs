// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Animation driver double that records calls instead of drawing.

use std::collections::BTreeMap;

use droplet_model::{DropletId, EntitySnapshot};
use droplet_playback::{AnimationBatch, AnimationDriver, Transition};

/// Records every `place`/`animate`/`hide` call and mirrors the resulting
/// visible scene in a map, the way a renderer would.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    /// Transitions passed to `place`.
    pub placed: Vec<Transition>,
    /// Every batch passed to `animate`, in order.
    pub batches: Vec<AnimationBatch>,
    /// Ids passed to `hide`.
    pub hidden: Vec<DropletId>,
    /// Visible droplets at their latest target.
    pub scene: BTreeMap<DropletId, EntitySnapshot>,
    /// Epoch of the batch currently animating.
    pub active: Option<u64>,
    /// Times `animate` was called while a batch was still active.
    pub overlaps: usize,
}

impl RecordingDriver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the active batch finished. Returns whether one was active.
    pub fn finish(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// `to_frame` of every batch, in dispatch order.
    pub fn replayed_frames(&self) -> Vec<usize> {
        self.batches.iter().map(|b| b.to_frame).collect()
    }

    /// The most recent batch, if any.
    pub fn last_batch(&self) -> Option<&AnimationBatch> {
        self.batches.last()
    }
}

impl AnimationDriver for RecordingDriver {
    fn place(&mut self, transitions: &[Transition]) {
        for t in transitions {
            self.scene.insert(t.id, t.to.clone());
        }
        self.placed.extend_from_slice(transitions);
    }

    fn animate(&mut self, batch: AnimationBatch) {
        if self.active.is_some() {
            self.overlaps += 1;
        }
        self.active = Some(batch.epoch);
        for id in &batch.hidden {
            self.scene.remove(id);
        }
        for t in &batch.transitions {
            self.scene.insert(t.id, t.to.clone());
        }
        self.batches.push(batch);
    }

    fn hide(&mut self, ids: &[DropletId]) {
        for id in ids {
            self.scene.remove(id);
        }
        self.hidden.extend_from_slice(ids);
    }
}
