//! Collision event record.
//!
//! The sweep appends one [`CollisionEvent`] per notified pair. Events are kept
//! for the last simulated frame only and are meant for logging, debugging and
//! host-side bookkeeping; game reactions belong in `on_overlap` hooks.

use serde::Serialize;

use crate::entity::EntityId;

/// Two entities that overlapped during a sweep.
///
/// `a` is the pair initiator (notified first), `b` the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CollisionEvent {
    pub a: EntityId,
    pub b: EntityId,
    pub frame: u64,
}

impl CollisionEvent {
    /// True when `id` is either participant.
    pub fn involves(&self, id: EntityId) -> bool {
        self.a == id || self.b == id
    }

    /// The participant that is not `id`, if `id` takes part.
    pub fn other(&self, id: EntityId) -> Option<EntityId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_participant() {
        let ev = CollisionEvent {
            a: EntityId(1),
            b: EntityId(2),
            frame: 3,
        };
        assert!(ev.involves(EntityId(2)));
        assert_eq!(ev.other(EntityId(1)), Some(EntityId(2)));
        assert_eq!(ev.other(EntityId(2)), Some(EntityId(1)));
        assert_eq!(ev.other(EntityId(9)), None);
    }
}
