//! Entity handles and allocation.
//!
//! An [`Entity`] is a lightweight `u64` handle with no data of its own. It is
//! also what components hold when they need to refer back to their owner:
//! copying the handle never extends the owner's lifetime.

use serde::{Deserialize, Serialize};

/// A unique entity handle.
///
/// Handles are issued by the [`World`](crate::World) and are never reused
/// within one world, so a stale handle cannot alias a newer entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity(pub u64);

impl Entity {
    /// The null / invalid entity sentinel.
    pub const INVALID: Entity = Entity(0);

    /// Create an entity from a raw `u64` identifier.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns `true` if this is a valid (non-zero) entity.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Hands out monotonically increasing entity handles.
#[derive(Debug)]
pub struct EntityAllocator {
    next_id: u64,
}

impl EntityAllocator {
    /// Creates a new allocator. IDs start at 1 (0 is reserved for [`Entity::INVALID`]).
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    pub fn allocate(&mut self) -> Entity {
        let id = self.next_id;
        self.next_id += 1;
        Entity(id)
    }

    /// Returns the number of handles issued so far, live or not.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.next_id - 1
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sentinel() {
        assert!(!Entity::INVALID.is_valid());
        assert!(Entity::from_raw(7).is_valid());
        assert_eq!(Entity::from_raw(7).to_string(), "Entity(7)");
    }

    #[test]
    fn test_allocator_never_issues_invalid() {
        let mut alloc = EntityAllocator::new();
        let first = alloc.allocate();
        let second = alloc.allocate();
        assert!(first.is_valid());
        assert!(first < second);
        assert_eq!(alloc.issued(), 2);
    }

    #[test]
    fn test_entity_serializes_as_bare_id() {
        let json = serde_json::to_string(&Entity::from_raw(999)).unwrap();
        assert_eq!(json, "999");
    }
}
