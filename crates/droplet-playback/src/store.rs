// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Append-only frame cache.

use droplet_model::Frame;

use crate::error::StoreError;

/// Append-only cache of fetched frames, indexed by arrival order.
///
/// There is no eviction: a session holds every frame it has fetched, which is
/// bounded by how long the user keeps stepping.
#[derive(Debug, Clone, Default)]
pub struct FrameStore {
    frames: Vec<Frame>,
}

impl FrameStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `frame`, which must carry index `self.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OutOfOrder`] when the index does not match the
    /// current length. The store is left unchanged.
    pub fn append(&mut self, frame: Frame) -> Result<(), StoreError> {
        let expected = self.frames.len();
        if frame.index != expected {
            return Err(StoreError::OutOfOrder {
                expected,
                got: frame.index,
            });
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Returns the frame at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when `index >= self.len()`.
    pub fn get(&self, index: usize) -> Result<&Frame, StoreError> {
        self.frames.get(index).ok_or(StoreError::NotFound {
            index,
            length: self.frames.len(),
        })
    }

    /// Number of frames fetched so far.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether nothing has been fetched yet.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The most recently fetched frame.
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn append_in_order_grows_length() {
        let mut store = FrameStore::new();
        assert!(store.is_empty());
        store.append(Frame::new(0, vec![])).unwrap();
        store.append(Frame::new(1, vec![])).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().index, 1);
        assert_eq!(store.last().map(|f| f.index), Some(1));
    }

    #[test]
    fn out_of_order_append_is_rejected_without_mutation() {
        let mut store = FrameStore::new();
        store.append(Frame::new(0, vec![])).unwrap();
        let err = store.append(Frame::new(2, vec![])).unwrap_err();
        assert_eq!(
            err,
            StoreError::OutOfOrder {
                expected: 1,
                got: 2
            }
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_past_end_is_not_found() {
        let store = FrameStore::new();
        assert_eq!(
            store.get(0).unwrap_err(),
            StoreError::NotFound {
                index: 0,
                length: 0
            }
        );
    }
}
