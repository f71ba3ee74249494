//! Cached world-space state and its dirty flags
use bitflags::bitflags;
use glam::{DMat4, DQuat, DVec3};

bitflags! {
    /// Which parts of an entity's cached world-space state are stale.
    pub struct DirtyFlags: u8 {
        /// The cached world position must be recomputed.
        const POSITION = 1 << 0;
        /// The cached world rotation must be recomputed.
        const ROTATION = 1 << 1;
        /// The cached lossy scale must be recomputed.
        const SCALE = 1 << 2;
        /// The cached local-to-world matrix must be recomputed.
        const MATRIX = 1 << 3;
    }
}

/// Lazily rebuilt world-space state of an entity.
///
/// Every entity with a [`LocalTransform`](super::LocalTransform) carries one
/// of these. The fields are caches: they hold stale values until the next
/// read through [`crate::world_transform`] recomputes whichever of them its
/// dirty flag marks as out of date. Mutating a local transform anywhere in
/// the ancestor chain marks the whole subtree dirty and bumps each
/// descendant's version counter, so a changed `version` is a reliable
/// "world state changed" signal for downstream consumers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalTransform {
    pub(crate) position: DVec3,
    pub(crate) rotation: DQuat,
    pub(crate) lossy_scale: DVec3,
    pub(crate) local_to_world: DMat4,
    pub(crate) dirty: DirtyFlags,
    pub(crate) version: u32,
}

impl Default for GlobalTransform {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            lossy_scale: DVec3::ONE,
            local_to_world: DMat4::IDENTITY,
            dirty: DirtyFlags::all(),
            version: 1,
        }
    }
}

impl GlobalTransform {
    /// Monotonically increasing counter, bumped every time this entity or
    /// one of its ancestors is mutated or reparented.
    #[inline]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// True if any cached value is stale.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_fully_dirty_at_version_one() {
        let global_transform = GlobalTransform::default();
        assert!(global_transform.is_dirty());
        assert_eq!(global_transform.dirty, DirtyFlags::all());
        assert_eq!(global_transform.version(), 1);
    }
}
