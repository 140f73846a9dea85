// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Wall-clock tween driver.
//!
//! Holds the drawn scene and at most one running tween. The host calls
//! [`TweenDriver::advance`] on every render tick; when it returns `true` the
//! batch has finished and the host must report completion to the engine.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use droplet_model::{DropletId, EntitySnapshot};
use droplet_playback::{AnimationBatch, AnimationDriver, Transition};
use tracing::trace;

/// Quadratic ease-in-out on `t` in `[0, 1]`.
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// A droplet as drawn right now, possibly mid-move.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub snapshot: EntitySnapshot,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug)]
struct Tween {
    started: Instant,
    duration: Duration,
    batch: AnimationBatch,
}

impl Tween {
    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

#[derive(Debug, Default)]
pub struct TweenDriver {
    scene: BTreeMap<DropletId, EntitySnapshot>,
    active: Option<Tween>,
}

impl TweenDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Finish the running tween if its time is up. Returns `true` once per batch.
    pub fn advance(&mut self, now: Instant) -> bool {
        let done = self
            .active
            .as_ref()
            .is_some_and(|tween| tween.progress(now) >= 1.0);
        if !done {
            return false;
        }
        if let Some(tween) = self.active.take() {
            self.commit(&tween.batch);
            trace!(epoch = tween.batch.epoch, "tween finished");
        }
        true
    }

    /// Scene at `now`, interpolated while a tween runs.
    pub fn sprites(&self, now: Instant) -> Vec<Sprite> {
        let Some(tween) = &self.active else {
            return self.scene.values().map(at_rest).collect();
        };
        let eased = ease_in_out_quad(tween.progress(now));
        let mut sprites: BTreeMap<DropletId, Sprite> = self
            .scene
            .iter()
            .map(|(id, snap)| (*id, at_rest(snap)))
            .collect();
        for transition in &tween.batch.transitions {
            let from = transition.from.as_ref().unwrap_or(&transition.to);
            let lerp = |a: i32, b: i32| f64::from(a) + (f64::from(b) - f64::from(a)) * eased;
            sprites.insert(
                transition.id,
                Sprite {
                    snapshot: transition.to.clone(),
                    x: lerp(from.location.x, transition.to.location.x),
                    y: lerp(from.location.y, transition.to.location.y),
                },
            );
        }
        sprites.into_values().collect()
    }

    fn commit(&mut self, batch: &AnimationBatch) {
        for transition in &batch.transitions {
            self.scene.insert(transition.id, transition.to.clone());
        }
        for id in &batch.hidden {
            self.scene.remove(id);
        }
    }
}

fn at_rest(snapshot: &EntitySnapshot) -> Sprite {
    Sprite {
        snapshot: snapshot.clone(),
        x: f64::from(snapshot.location.x),
        y: f64::from(snapshot.location.y),
    }
}

impl AnimationDriver for TweenDriver {
    fn place(&mut self, transitions: &[Transition]) {
        for transition in transitions {
            self.scene.insert(transition.id, transition.to.clone());
        }
    }

    fn animate(&mut self, batch: AnimationBatch) {
        trace!(epoch = batch.epoch, to = batch.to_frame, "tween started");
        self.active = Some(Tween {
            started: Instant::now(),
            duration: batch.duration_hint,
            batch,
        });
    }

    fn hide(&mut self, ids: &[DropletId]) {
        for id in ids {
            self.scene.remove(id);
        }
    }
}
