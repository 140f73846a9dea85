// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Frame builders for tests.

use droplet_model::{DropletId, EntitySnapshot, Extent, Frame, Location};

/// Builder for [`Frame`] instances.
///
/// # Example
///
/// ```
/// use droplet_dry_tests::FrameBuilder;
///
/// let frame = FrameBuilder::new(2).droplet(1, 0, 0).droplet(2, 3, 1).build();
/// assert_eq!(frame.index, 2);
/// assert_eq!(frame.len(), 2);
/// ```
#[derive(Default)]
pub struct FrameBuilder {
    index: usize,
    entities: Vec<EntitySnapshot>,
}

impl FrameBuilder {
    /// Start a frame with the given index.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            entities: Vec::new(),
        }
    }

    /// Add a unit droplet at `(x, y)`.
    pub fn droplet(mut self, id: u64, x: i32, y: i32) -> Self {
        self.entities
            .push(EntitySnapshot::new(DropletId::new(id), Location::xy(x, y)));
        self
    }

    /// Add a droplet with explicit volume and footprint.
    pub fn sized(mut self, id: u64, x: i32, y: i32, volume: f64, w: i32, h: i32) -> Self {
        self.entities.push(
            EntitySnapshot::new(DropletId::new(id), Location::xy(x, y)).with_extent(Extent {
                volume,
                dimensions: Location::xy(w, h),
            }),
        );
        self
    }

    /// Build the frame.
    pub fn build(self) -> Frame {
        Frame::new(self.index, self.entities)
    }
}

/// Three frames where droplet 2 appears and then merges into droplet 1.
///
/// - frame 0: `1@(0,0)`
/// - frame 1: `1@(1,0)`, `2@(2,0)`
/// - frame 2: `1@(1,1)`
pub fn merge_scenario() -> Vec<Frame> {
    vec![
        FrameBuilder::new(0).droplet(1, 0, 0).build(),
        FrameBuilder::new(1).droplet(1, 1, 0).droplet(2, 2, 0).build(),
        FrameBuilder::new(2).droplet(1, 1, 1).build(),
    ]
}

/// `count` frames where droplet 1 walks along row 0 (`x = index`) and
/// droplet 2 sits at `(0, 5)` on even frames only.
pub fn walking_frames(count: usize) -> Vec<Frame> {
    (0..count)
        .map(|index| {
            let x = i32::try_from(index).unwrap_or(i32::MAX);
            let builder = FrameBuilder::new(index).droplet(1, x, 0);
            if index % 2 == 0 {
                builder.droplet(2, 0, 5).build()
            } else {
                builder.build()
            }
        })
        .collect()
}
