// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Entity lifecycle reconciliation between consecutive frames.
//!
//! Droplets are never freed once seen. A droplet missing from the replayed
//! frame is soft-deleted (`alive = false`) and keeps its last snapshot so a
//! backward step can revive it. Removal is deferred while earlier transitions
//! that target the droplet are still in flight (`merge_depth > 1`).

use std::collections::{BTreeMap, BTreeSet};

use droplet_model::{DropletId, EntitySnapshot, Frame};

/// A droplet as tracked by the playback engine.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualEntity {
    /// Droplet id.
    pub id: DropletId,
    /// Last snapshot applied to this droplet.
    pub current: EntitySnapshot,
    /// Whether the droplet is part of the shown frame.
    pub alive: bool,
    /// Absent from the shown frame but still referenced by an in-flight transition.
    pub pending_delete: bool,
    /// `1` when settled; one more per transition still in flight.
    pub merge_depth: u32,
}

impl VisualEntity {
    fn spawn(snapshot: EntitySnapshot) -> Self {
        Self {
            id: snapshot.id,
            current: snapshot,
            alive: true,
            pending_delete: false,
            merge_depth: 1,
        }
    }
}

/// Why a droplet takes part in a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// First appearance of the id.
    Created,
    /// Id was alive and recurs.
    Updated,
    /// Id was soft-deleted and reappears.
    Revived,
}

/// One droplet's move from its previous snapshot to its target.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Droplet id.
    pub id: DropletId,
    /// Reason for the transition.
    pub kind: TransitionKind,
    /// Snapshot before this step; `None` for newly created droplets.
    pub from: Option<EntitySnapshot>,
    /// Snapshot to reach by the end of the step.
    pub to: EntitySnapshot,
}

/// Outcome of reconciling one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reconciliation {
    /// Created, updated and revived droplets with their targets.
    pub transitions: Vec<Transition>,
    /// Droplets soft-deleted by this step.
    pub hidden: Vec<DropletId>,
    /// Droplets absent from the frame whose removal waits for in-flight work.
    pub deferred: Vec<DropletId>,
}

/// Live set of visual droplets keyed by id.
#[derive(Clone, Debug, Default)]
pub struct EntityTracker {
    entities: BTreeMap<DropletId, VisualEntity>,
}

impl EntityTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the tracked set in line with `frame`.
    ///
    /// - Unknown ids are created alive with `merge_depth = 1`.
    /// - Known ids take the new snapshot; soft-deleted ones are revived.
    /// - Alive ids missing from `frame` are soft-deleted at once when settled,
    ///   otherwise flagged `pending_delete` until [`settle`](Self::settle)
    ///   brings their depth back to 1.
    pub fn reconcile(&mut self, frame: &Frame) -> Reconciliation {
        let mut out = Reconciliation::default();
        let present: BTreeSet<DropletId> = frame.ids().collect();

        for (id, entity) in &mut self.entities {
            if !entity.alive || present.contains(id) {
                continue;
            }
            if entity.merge_depth <= 1 {
                entity.alive = false;
                entity.pending_delete = false;
                out.hidden.push(*id);
            } else {
                entity.pending_delete = true;
                out.deferred.push(*id);
            }
        }

        for snapshot in &frame.entities {
            let transition = match self.entities.get_mut(&snapshot.id) {
                None => {
                    self.entities
                        .insert(snapshot.id, VisualEntity::spawn(snapshot.clone()));
                    Transition {
                        id: snapshot.id,
                        kind: TransitionKind::Created,
                        from: None,
                        to: snapshot.clone(),
                    }
                }
                Some(entity) => {
                    let kind = if entity.alive {
                        TransitionKind::Updated
                    } else {
                        TransitionKind::Revived
                    };
                    entity.alive = true;
                    entity.pending_delete = false;
                    let from = core::mem::replace(&mut entity.current, snapshot.clone());
                    Transition {
                        id: snapshot.id,
                        kind,
                        from: Some(from),
                        to: snapshot.clone(),
                    }
                }
            };
            out.transitions.push(transition);
        }

        out
    }

    /// Marks one more in-flight transition for each id.
    pub fn begin(&mut self, ids: &[DropletId]) {
        for id in ids {
            if let Some(entity) = self.entities.get_mut(id) {
                entity.merge_depth += 1;
            }
        }
    }

    /// Retires one in-flight transition for each id.
    ///
    /// Returns the droplets whose deferred removal completed, now soft-deleted.
    pub fn settle(&mut self, ids: &[DropletId]) -> Vec<DropletId> {
        let mut removed = Vec::new();
        for id in ids {
            let Some(entity) = self.entities.get_mut(id) else {
                continue;
            };
            entity.merge_depth = entity.merge_depth.saturating_sub(1).max(1);
            if entity.merge_depth == 1 && entity.pending_delete {
                entity.pending_delete = false;
                entity.alive = false;
                removed.push(*id);
            }
        }
        removed
    }

    /// Looks up a tracked droplet, alive or not.
    pub fn get(&self, id: DropletId) -> Option<&VisualEntity> {
        self.entities.get(&id)
    }

    /// Droplets currently alive, in id order.
    pub fn live(&self) -> impl Iterator<Item = &VisualEntity> {
        self.entities.values().filter(|e| e.alive)
    }

    /// Every tracked droplet, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &VisualEntity> {
        self.entities.values()
    }

    /// Number of tracked droplets, alive or not.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether nothing has been tracked yet.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use droplet_model::Location;

    fn snap(id: u64, x: i32, y: i32) -> EntitySnapshot {
        EntitySnapshot::new(DropletId::new(id), Location::xy(x, y))
    }

    fn frame(index: usize, snaps: Vec<EntitySnapshot>) -> Frame {
        Frame::new(index, snaps)
    }

    #[test]
    fn first_appearance_creates_alive_entity() {
        let mut tracker = EntityTracker::new();
        let out = tracker.reconcile(&frame(0, vec![snap(1, 0, 0)]));
        assert_eq!(out.transitions.len(), 1);
        assert_eq!(out.transitions[0].kind, TransitionKind::Created);
        assert!(out.transitions[0].from.is_none());
        let entity = tracker.get(DropletId::new(1)).unwrap();
        assert!(entity.alive);
        assert_eq!(entity.merge_depth, 1);
    }

    #[test]
    fn recurring_id_updates_snapshot() {
        let mut tracker = EntityTracker::new();
        tracker.reconcile(&frame(0, vec![snap(1, 0, 0)]));
        let out = tracker.reconcile(&frame(1, vec![snap(1, 1, 0)]));
        let t = &out.transitions[0];
        assert_eq!(t.kind, TransitionKind::Updated);
        assert_eq!(t.from.as_ref().map(|s| s.location), Some(Location::xy(0, 0)));
        assert_eq!(t.to.location, Location::xy(1, 0));
    }

    #[test]
    fn settled_absent_entity_is_soft_deleted_immediately() {
        let mut tracker = EntityTracker::new();
        tracker.reconcile(&frame(0, vec![snap(1, 0, 0), snap(2, 2, 0)]));
        let out = tracker.reconcile(&frame(1, vec![snap(1, 1, 1)]));
        assert_eq!(out.hidden, vec![DropletId::new(2)]);
        let gone = tracker.get(DropletId::new(2)).unwrap();
        assert!(!gone.alive);
        assert_eq!(gone.current.location, Location::xy(2, 0));
        assert_eq!(tracker.live().count(), 1);
    }

    #[test]
    fn removal_waits_for_in_flight_transitions() {
        let mut tracker = EntityTracker::new();
        let out = tracker.reconcile(&frame(0, vec![snap(1, 0, 0), snap(2, 2, 0)]));
        let ids: Vec<_> = out.transitions.iter().map(|t| t.id).collect();
        tracker.begin(&ids);

        let out = tracker.reconcile(&frame(1, vec![snap(1, 1, 0)]));
        assert!(out.hidden.is_empty());
        assert_eq!(out.deferred, vec![DropletId::new(2)]);
        let pending = tracker.get(DropletId::new(2)).unwrap();
        assert!(pending.alive);
        assert!(pending.pending_delete);

        let removed = tracker.settle(&ids);
        assert_eq!(removed, vec![DropletId::new(2)]);
        let gone = tracker.get(DropletId::new(2)).unwrap();
        assert!(!gone.alive);
        assert!(!gone.pending_delete);
        assert_eq!(gone.merge_depth, 1);
    }

    #[test]
    fn reappearing_entity_is_revived() {
        let mut tracker = EntityTracker::new();
        tracker.reconcile(&frame(0, vec![snap(1, 0, 0), snap(2, 2, 0)]));
        tracker.reconcile(&frame(1, vec![snap(1, 1, 0)]));
        let out = tracker.reconcile(&frame(0, vec![snap(1, 0, 0), snap(2, 2, 0)]));
        let revived = out
            .transitions
            .iter()
            .find(|t| t.id == DropletId::new(2))
            .unwrap();
        assert_eq!(revived.kind, TransitionKind::Revived);
        assert!(tracker.get(DropletId::new(2)).unwrap().alive);
    }

    #[test]
    fn reappearance_cancels_pending_delete() {
        let mut tracker = EntityTracker::new();
        let out = tracker.reconcile(&frame(0, vec![snap(1, 0, 0)]));
        let ids: Vec<_> = out.transitions.iter().map(|t| t.id).collect();
        tracker.begin(&ids);
        tracker.reconcile(&frame(1, vec![]));
        assert!(tracker.get(DropletId::new(1)).unwrap().pending_delete);
        tracker.reconcile(&frame(2, vec![snap(1, 3, 3)]));
        assert!(!tracker.get(DropletId::new(1)).unwrap().pending_delete);
        assert!(tracker.settle(&ids).is_empty());
        assert!(tracker.get(DropletId::new(1)).unwrap().alive);
    }

    #[test]
    fn settle_never_drops_depth_below_one() {
        let mut tracker = EntityTracker::new();
        tracker.reconcile(&frame(0, vec![snap(1, 0, 0)]));
        tracker.settle(&[DropletId::new(1), DropletId::new(1)]);
        assert_eq!(tracker.get(DropletId::new(1)).unwrap().merge_depth, 1);
    }
}
