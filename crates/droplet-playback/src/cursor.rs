// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Playback cursor: what is shown versus what the user asked for.
//!
//! The cursor only moves `selected_frame` in response to navigation. The
//! coordinator moves `display_frame` one step at a time as batches complete,
//! so a large jump is always replayed frame by frame.

/// Position of the host's slider/readout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliderPosition {
    /// `display_frame + delta()`: where playback is heading next.
    pub value: usize,
    /// Upper bound the slider should offer.
    pub max: usize,
}

/// Cursor pair plus the (possibly unbounded) upper limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackCursor {
    display_frame: usize,
    selected_frame: usize,
    /// `None` while the source is open (unbounded).
    max_frame: Option<usize>,
}

impl PlaybackCursor {
    /// Cursor at frame 0 with an unbounded upper limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame currently shown.
    pub fn display_frame(&self) -> usize {
        self.display_frame
    }

    /// Frame the user wants shown.
    pub fn selected_frame(&self) -> usize {
        self.selected_frame
    }

    /// Frozen upper bound, or `None` while unbounded.
    pub fn max_frame(&self) -> Option<usize> {
        self.max_frame
    }

    /// Whether the upper bound has been frozen.
    pub fn is_closed(&self) -> bool {
        self.max_frame.is_some()
    }

    /// Moves the selection one frame forward. No-op at `max_frame` and at
    /// the largest representable index.
    ///
    /// Returns whether the selection changed.
    pub fn forward(&mut self) -> bool {
        if self.max_frame.is_some_and(|max| self.selected_frame >= max) {
            return false;
        }
        let Some(next) = self.selected_frame.checked_add(1) else {
            return false;
        };
        self.selected_frame = next;
        true
    }

    /// Moves the selection one frame back. No-op at 0.
    ///
    /// Returns whether the selection changed.
    pub fn backward(&mut self) -> bool {
        if self.selected_frame == 0 {
            return false;
        }
        self.selected_frame -= 1;
        true
    }

    /// Selects `target`, clamped into `[0, max_frame]`.
    ///
    /// Returns whether the selection changed.
    pub fn seek(&mut self, target: usize) -> bool {
        let target = self.max_frame.map_or(target, |max| target.min(max));
        let changed = target != self.selected_frame;
        self.selected_frame = target;
        changed
    }

    /// Direction of the next step: `+1`, `-1` or `0`.
    pub fn delta(&self) -> isize {
        match self.selected_frame.cmp(&self.display_frame) {
            core::cmp::Ordering::Greater => 1,
            core::cmp::Ordering::Less => -1,
            core::cmp::Ordering::Equal => 0,
        }
    }

    /// Steps still needed to reach the selection.
    pub fn outstanding_steps(&self) -> usize {
        self.selected_frame.abs_diff(self.display_frame)
    }

    /// Frame the next step would show, if any.
    pub fn next_target(&self) -> Option<usize> {
        match self.delta() {
            0 => None,
            d => self.display_frame.checked_add_signed(d),
        }
    }

    /// Moves `display_frame` by one completed step.
    pub(crate) fn advance(&mut self, delta: isize) {
        if let Some(next) = self.display_frame.checked_add_signed(delta) {
            self.display_frame = next;
        }
    }

    /// Freezes the upper bound at the shown frame and pulls the selection
    /// back inside it.
    pub(crate) fn close(&mut self) {
        self.max_frame = Some(self.display_frame);
        self.selected_frame = self.selected_frame.min(self.display_frame);
    }

    /// Slider readout given how many frames are cached.
    pub fn slider(&self, cached_frames: usize) -> SliderPosition {
        let value = self.next_target().unwrap_or(self.display_frame);
        let max = self
            .max_frame
            .unwrap_or_else(|| cached_frames.saturating_sub(1).max(value));
        SliderPosition { value, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backward_at_zero_is_noop() {
        let mut cursor = PlaybackCursor::new();
        assert!(!cursor.backward());
        assert_eq!(cursor.selected_frame(), 0);
    }

    #[test]
    fn forward_is_unbounded_while_open() {
        let mut cursor = PlaybackCursor::new();
        for _ in 0..5 {
            assert!(cursor.forward());
        }
        assert_eq!(cursor.selected_frame(), 5);
        assert_eq!(cursor.delta(), 1);
        assert_eq!(cursor.outstanding_steps(), 5);
    }

    #[test]
    fn forward_at_index_limit_is_noop_while_open() {
        let mut cursor = PlaybackCursor::new();
        assert!(cursor.seek(usize::MAX));
        assert!(!cursor.forward());
        assert_eq!(cursor.selected_frame(), usize::MAX);
        assert_eq!(cursor.outstanding_steps(), usize::MAX);
    }

    #[test]
    fn forward_at_max_is_noop_after_close() {
        let mut cursor = PlaybackCursor::new();
        cursor.forward();
        cursor.advance(1);
        cursor.close();
        assert_eq!(cursor.max_frame(), Some(1));
        assert!(!cursor.forward());
        assert_eq!(cursor.selected_frame(), 1);
    }

    #[test]
    fn seek_clamps_into_closed_range() {
        let mut cursor = PlaybackCursor::new();
        cursor.seek(3);
        for _ in 0..3 {
            cursor.advance(1);
        }
        cursor.close();
        assert!(!cursor.seek(10));
        assert_eq!(cursor.selected_frame(), 3);
        assert!(cursor.seek(1));
        assert_eq!(cursor.delta(), -1);
    }

    #[test]
    fn close_keeps_a_backward_selection() {
        let mut cursor = PlaybackCursor::new();
        cursor.seek(2);
        cursor.advance(1);
        cursor.advance(1);
        cursor.seek(0);
        cursor.close();
        assert_eq!(cursor.max_frame(), Some(2));
        assert_eq!(cursor.selected_frame(), 0);
    }

    #[test]
    fn slider_tracks_next_step() {
        let mut cursor = PlaybackCursor::new();
        cursor.seek(4);
        assert_eq!(cursor.slider(1), SliderPosition { value: 1, max: 1 });
        cursor.advance(1);
        assert_eq!(cursor.slider(5), SliderPosition { value: 2, max: 4 });
    }
}
