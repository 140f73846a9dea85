// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Droplet identity, placement and shape.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a droplet within one source session.
///
/// Ids are stable for the lifetime of a droplet but are only unique within a
/// single run of the upstream service. The process id is kept alongside the
/// droplet id so droplets owned by different processes never collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DropletId {
    /// Process that owns the droplet.
    #[serde(default)]
    pub process_id: u64,
    /// Droplet number assigned by the owning process.
    pub id: u64,
}

impl DropletId {
    /// Id in the default process (0).
    pub const fn new(id: u64) -> Self {
        Self { id, process_id: 0 }
    }

    /// Id owned by a specific process.
    pub const fn in_process(process_id: u64, id: u64) -> Self {
        Self { id, process_id }
    }
}

impl fmt::Display for DropletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.process_id, self.id)
    }
}

/// Grid coordinate (row `y`, column `x`).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Location {
    /// Row.
    pub y: i32,
    /// Column.
    pub x: i32,
}

impl Location {
    /// Builds a location from `(x, y)` order.
    pub const fn xy(x: i32, y: i32) -> Self {
        Self { y, x }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Size and footprint of a droplet.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    /// Droplet volume in arbitrary units.
    pub volume: f64,
    /// Footprint in grid cells (`x` columns by `y` rows).
    pub dimensions: Location,
}

impl Default for Extent {
    fn default() -> Self {
        Self {
            volume: 1.0,
            dimensions: Location { y: 1, x: 1 },
        }
    }
}

/// One droplet as it appears in a single frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// Stable droplet id.
    pub id: DropletId,
    /// Top-left cell of the droplet footprint.
    pub location: Location,
    /// Volume and footprint.
    #[serde(flatten)]
    pub extent: Extent,
    /// Opaque display string.
    #[serde(default, rename = "info")]
    pub label: String,
}

impl EntitySnapshot {
    /// Snapshot with a unit extent and an empty label.
    pub fn new(id: DropletId, location: Location) -> Self {
        Self {
            id,
            location,
            extent: Extent::default(),
            label: String::new(),
        }
    }

    /// Replaces the extent.
    pub fn with_extent(mut self, extent: Extent) -> Self {
        self.extent = extent;
        self
    }

    /// Replaces the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn decodes_service_droplet_info() {
        let json = r#"{
            "id": {"id": 3, "process_id": 1},
            "location": {"y": 2, "x": 5},
            "volume": 2.0,
            "dimensions": {"y": 1, "x": 2}
        }"#;
        let snap: EntitySnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.id, DropletId::in_process(1, 3));
        assert_eq!(snap.location, Location::xy(5, 2));
        assert_eq!(snap.extent.dimensions, Location::xy(2, 1));
        assert!((snap.extent.volume - 2.0).abs() < f64::EPSILON);
        assert!(snap.label.is_empty());
    }

    #[test]
    fn label_is_read_from_info() {
        let json = r#"{
            "id": {"id": 0},
            "location": {"y": 0, "x": 0},
            "volume": 1.0,
            "dimensions": {"y": 1, "x": 1},
            "info": "sample"
        }"#;
        let snap: EntitySnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.label, "sample");
        assert_eq!(snap.id, DropletId::new(0));
    }

    #[test]
    fn ids_order_by_process_then_id() {
        let a = DropletId::in_process(0, 9);
        let b = DropletId::in_process(1, 0);
        assert!(a < b);
        assert_eq!(a.to_string(), "0:9");
    }
}
