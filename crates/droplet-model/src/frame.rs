// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Indexed frame snapshots.

use serde::{Deserialize, Serialize};

use crate::types::{DropletId, EntitySnapshot};

/// One immutable, indexed snapshot of every droplet at a simulation step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Position of this frame in arrival order (0-based).
    pub index: usize,
    /// Droplets present at this step.
    pub entities: Vec<EntitySnapshot>,
}

impl Frame {
    /// Creates a frame.
    pub fn new(index: usize, entities: Vec<EntitySnapshot>) -> Self {
        Self { index, entities }
    }

    /// Looks up a droplet by id.
    pub fn entity(&self, id: DropletId) -> Option<&EntitySnapshot> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Ids present in this frame, in frame order.
    pub fn ids(&self) -> impl Iterator<Item = DropletId> + '_ {
        self.entities.iter().map(|e| e.id)
    }

    /// Number of droplets in the frame.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the frame holds no droplets.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::Location;

    #[test]
    fn entity_lookup_by_id() {
        let frame = Frame::new(
            4,
            vec![
                EntitySnapshot::new(DropletId::new(1), Location::xy(0, 0)),
                EntitySnapshot::new(DropletId::new(2), Location::xy(2, 0)),
            ],
        );
        assert_eq!(frame.len(), 2);
        assert_eq!(
            frame.entity(DropletId::new(2)).map(|e| e.location),
            Some(Location::xy(2, 0))
        );
        assert!(frame.entity(DropletId::new(7)).is_none());
        assert_eq!(
            frame.ids().collect::<Vec<_>>(),
            vec![DropletId::new(1), DropletId::new(2)]
        );
    }
}
