//! Cache invalidation and version counting
//!
//! Whenever an entity's local transform changes, the cached world-space
//! state of that entity and of every descendant must be recomputed. The
//! walk is deliberately unconditional: it never short-circuits on a subtree
//! that is already dirty, because each visit also bumps the version
//! counter, and consumers rely on every descendant's version strictly
//! increasing whenever an ancestor changes. Invalidating a node therefore
//! costs O(subtree size) every time. Reads are where the laziness lives,
//! not here.
use hecs::{Entity, World};

use crate::{
    components::{Children, DirtyFlags, GlobalTransform},
    GantryResult,
};

/// Mark the cached world-space state of `entity` and all of its
/// descendants stale, bumping each version counter.
///
/// The setters in [`crate::world_transform`], the motion operations and
/// reparenting all call this automatically; call it yourself only after
/// editing `Parent` or `Children` links by hand.
///
/// Entities that are missing a [`GlobalTransform`] are skipped but their
/// children are still visited. Despawned entities are ignored.
pub fn invalidate(world: &World, entity: Entity) {
    if let Ok(mut global_transform) = world.get::<&mut GlobalTransform>(entity) {
        global_transform.dirty = DirtyFlags::all();
        global_transform.version += 1;
    }

    let children = match world.get::<&Children>(entity) {
        Ok(children) => children.0.clone(),
        Err(_) => return,
    };
    for child in children {
        invalidate(world, child);
    }
}

/// The entity's current version counter.
///
/// The counter starts at 1 and strictly increases every time the entity is
/// mutated, reparented, or any of its ancestors is. Reads never change it,
/// so it can be polled cheaply for change detection.
pub fn version(world: &World, entity: Entity) -> GantryResult<u32> {
    Ok(world.get::<&GlobalTransform>(entity)?.version)
}
