//! Caller id to arena slot mapping.
//!
//! Tasks are stored in a `Vec` and addressed by slot; callers address them by
//! their own `TaskId`. All edge lists hold slots, never ids.

use rustc_hash::FxHashMap;

/// Caller-assigned task identity.
pub type TaskId = u32;

/// Bidirectional `TaskId` <-> slot map.
#[derive(Debug, Clone, Default)]
pub struct TaskIndex {
    to_slot: FxHashMap<TaskId, usize>,
    ids: Vec<TaskId>,
}

impl TaskIndex {
    /// Register a new id and return its slot, or `None` if already present.
    pub fn insert(&mut self, id: TaskId) -> Option<usize> {
        if self.to_slot.contains_key(&id) {
            return None;
        }
        let slot = self.ids.len();
        self.ids.push(id);
        self.to_slot.insert(id, slot);
        Some(slot)
    }

    #[inline]
    pub fn slot(&self, id: TaskId) -> Option<usize> {
        self.to_slot.get(&id).copied()
    }

    /// Id stored at `slot`. Slots come from this index, so they are in range.
    #[inline]
    pub fn id(&self, slot: usize) -> TaskId {
        self.ids[slot]
    }

    pub fn ids(&self) -> &[TaskId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
