//! Lazily cached world-space state
//!
//! Reads recompute only what their dirty flag says is stale, then cache.
//! The three cached quantities are deliberately not derived from one
//! source of truth:
//!
//! - `position` comes from the parent's cached local-to-world matrix,
//! - `rotation` is a quaternion product walked up the ancestor chain,
//! - `lossy_scale` is a componentwise product walked up the chain.
//!
//! Under a rotated, non-uniformly scaled parent the matrix accumulates
//! shear that the two chain walks never see. That divergence is observable
//! and kept: unifying the three onto the matrix would change rotation and
//! scale reads for exactly those hierarchies.
//!
//! NaN components are zeroed on every read and write of positions,
//! rotations and scales. The cached matrix is exempt: a degenerate scale
//! can park NaN inside it, and those NaNs stay until a field read passes
//! through the sanitizer.
use glam::{DMat4, DQuat, DVec3};
use hecs::{Entity, World};

use crate::{
    components::{DirtyFlags, GlobalTransform, LocalTransform},
    hierarchy, invalidation, util, GantryResult,
};

/// The matrix taking points in the entity's local space to world space.
///
/// Recomputed from the local TRS and the parent's matrix when stale,
/// cached otherwise.
pub fn local_to_world(world: &World, entity: Entity) -> GantryResult<DMat4> {
    {
        let global_transform = world.get::<&GlobalTransform>(entity)?;
        if !global_transform.dirty.contains(DirtyFlags::MATRIX) {
            return Ok(global_transform.local_to_world);
        }
    }

    let local_matrix = world.get::<&LocalTransform>(entity)?.to_matrix();
    let matrix = match hierarchy::parent_of(world, entity) {
        Some(parent) => local_to_world(world, parent)? * local_matrix,
        None => local_matrix,
    };

    let mut global_transform = world.get::<&mut GlobalTransform>(entity)?;
    global_transform.local_to_world = matrix;
    global_transform.dirty.remove(DirtyFlags::MATRIX);
    Ok(matrix)
}

/// The matrix taking points in world space to the entity's local space.
///
/// Always recomputed by inverting [`local_to_world`]; never cached. A
/// degenerate (zero-scale) transform yields a non-finite matrix rather
/// than an error.
pub fn world_to_local(world: &World, entity: Entity) -> GantryResult<DMat4> {
    Ok(local_to_world(world, entity)?.inverse())
}

/// The entity's position in world space.
pub fn position(world: &World, entity: Entity) -> GantryResult<DVec3> {
    {
        let global_transform = world.get::<&GlobalTransform>(entity)?;
        if !global_transform.dirty.contains(DirtyFlags::POSITION) {
            return Ok(util::sanitize_vec3(global_transform.position));
        }
    }

    let local_translation = world.get::<&LocalTransform>(entity)?.translation;
    let position = match hierarchy::parent_of(world, entity) {
        Some(parent) => local_to_world(world, parent)?.transform_point3(local_translation),
        None => local_translation,
    };

    let mut global_transform = world.get::<&mut GlobalTransform>(entity)?;
    global_transform.position = position;
    global_transform.dirty.remove(DirtyFlags::POSITION);
    Ok(util::sanitize_vec3(position))
}

/// Move the entity to a position given in world space.
///
/// The value is re-expressed relative to the parent and stored in the
/// local transform; nothing happens if it lands on the current local
/// translation. Otherwise the entity and its subtree are invalidated.
pub fn set_position(world: &mut World, entity: Entity, position: DVec3) -> GantryResult<()> {
    let position = util::sanitize_vec3(position);
    let new_translation = match hierarchy::parent_of(world, entity) {
        Some(parent) => {
            util::sanitize_vec3(world_to_local(world, parent)?.transform_point3(position))
        }
        None => position,
    };
    set_local_translation(world, entity, new_translation)
}

/// The entity's rotation in world space.
///
/// Computed as the product of local rotations along the ancestor chain,
/// not from the matrix, so parent shear never leaks into it.
pub fn rotation(world: &World, entity: Entity) -> GantryResult<DQuat> {
    {
        let global_transform = world.get::<&GlobalTransform>(entity)?;
        if !global_transform.dirty.contains(DirtyFlags::ROTATION) {
            return Ok(util::sanitize_quat(global_transform.rotation));
        }
    }

    let mut world_rotation = world.get::<&LocalTransform>(entity)?.rotation;
    let mut current = hierarchy::parent_of(world, entity);
    while let Some(ancestor) = current {
        let ancestor_rotation = world.get::<&LocalTransform>(ancestor)?.rotation;
        world_rotation = ancestor_rotation * world_rotation;
        current = hierarchy::parent_of(world, ancestor);
    }

    let mut global_transform = world.get::<&mut GlobalTransform>(entity)?;
    global_transform.rotation = world_rotation;
    global_transform.dirty.remove(DirtyFlags::ROTATION);
    Ok(util::sanitize_quat(world_rotation))
}

/// Rotate the entity to an orientation given in world space.
///
/// The stored local rotation becomes `inverse(parent rotation) * rotation`,
/// normalized. Invalidates the subtree if the stored value changes.
pub fn set_rotation(world: &mut World, entity: Entity, rotation: DQuat) -> GantryResult<()> {
    let rotation = util::sanitize_quat(rotation);
    let new_rotation = match hierarchy::parent_of(world, entity) {
        Some(parent) => {
            let parent_rotation = self::rotation(world, parent)?;
            (parent_rotation.inverse() * rotation).normalize()
        }
        None => rotation.normalize(),
    };
    set_local_rotation(world, entity, util::sanitize_quat(new_rotation))
}

/// The entity's accumulated scale in world space.
///
/// A componentwise product of local scales along the ancestor chain. Shear
/// introduced by rotated non-uniform ancestors is ignored, hence "lossy".
/// There is no world-space scale setter; write [`set_local_scale`] instead.
pub fn lossy_scale(world: &World, entity: Entity) -> GantryResult<DVec3> {
    {
        let global_transform = world.get::<&GlobalTransform>(entity)?;
        if !global_transform.dirty.contains(DirtyFlags::SCALE) {
            return Ok(util::sanitize_vec3(global_transform.lossy_scale));
        }
    }

    let mut scale = world.get::<&LocalTransform>(entity)?.scale;
    let mut current = hierarchy::parent_of(world, entity);
    while let Some(ancestor) = current {
        scale *= world.get::<&LocalTransform>(ancestor)?.scale;
        current = hierarchy::parent_of(world, ancestor);
    }

    let mut global_transform = world.get::<&mut GlobalTransform>(entity)?;
    global_transform.lossy_scale = scale;
    global_transform.dirty.remove(DirtyFlags::SCALE);
    Ok(util::sanitize_vec3(scale))
}

/// The entity's world-space rotation as Euler angles in degrees, in the
/// same y-x-z convention as [`crate::util::euler_degrees_from_quat`].
pub fn euler_angles(world: &World, entity: Entity) -> GantryResult<DVec3> {
    Ok(util::euler_degrees_from_quat(rotation(world, entity)?))
}

/// Set the entity's world-space rotation from Euler angles in degrees.
pub fn set_euler_angles(
    world: &mut World,
    entity: Entity,
    euler_degrees: DVec3,
) -> GantryResult<()> {
    set_rotation(world, entity, util::quat_from_euler_degrees(euler_degrees))
}

/// The entity's local rotation as Euler angles in degrees.
pub fn local_euler_angles(world: &World, entity: Entity) -> GantryResult<DVec3> {
    Ok(util::euler_degrees_from_quat(local_rotation(
        world, entity,
    )?))
}

/// Set the entity's local rotation from Euler angles in degrees.
pub fn set_local_euler_angles(
    world: &mut World,
    entity: Entity,
    euler_degrees: DVec3,
) -> GantryResult<()> {
    set_local_rotation(world, entity, util::quat_from_euler_degrees(euler_degrees))
}

/// The entity's translation relative to its parent.
pub fn local_translation(world: &World, entity: Entity) -> GantryResult<DVec3> {
    Ok(world.get::<&LocalTransform>(entity)?.translation())
}

/// Set the entity's translation relative to its parent, invalidating the
/// subtree if the value changes.
pub fn set_local_translation(
    world: &mut World,
    entity: Entity,
    translation: DVec3,
) -> GantryResult<()> {
    let translation = util::sanitize_vec3(translation);
    let changed = {
        let mut local_transform = world.get::<&mut LocalTransform>(entity)?;
        if local_transform.translation == translation {
            false
        } else {
            local_transform.translation = translation;
            true
        }
    };
    if changed {
        invalidation::invalidate(world, entity);
    }
    Ok(())
}

/// The entity's rotation relative to its parent.
pub fn local_rotation(world: &World, entity: Entity) -> GantryResult<DQuat> {
    Ok(world.get::<&LocalTransform>(entity)?.rotation())
}

/// Set the entity's rotation relative to its parent, invalidating the
/// subtree if the value changes.
///
/// The value is stored as given: it is sanitized but not normalized. Any
/// rotation-mutating operation in [`crate::motion`] will leave a
/// normalized rotation behind.
pub fn set_local_rotation(world: &mut World, entity: Entity, rotation: DQuat) -> GantryResult<()> {
    let rotation = util::sanitize_quat(rotation);
    let changed = {
        let mut local_transform = world.get::<&mut LocalTransform>(entity)?;
        if local_transform.rotation == rotation {
            false
        } else {
            local_transform.rotation = rotation;
            true
        }
    };
    if changed {
        invalidation::invalidate(world, entity);
    }
    Ok(())
}

/// The entity's scale relative to its parent.
pub fn local_scale(world: &World, entity: Entity) -> GantryResult<DVec3> {
    Ok(world.get::<&LocalTransform>(entity)?.scale())
}

/// Set the entity's scale relative to its parent, invalidating the subtree
/// if the value changes.
pub fn set_local_scale(world: &mut World, entity: Entity, scale: DVec3) -> GantryResult<()> {
    let scale = util::sanitize_vec3(scale);
    let changed = {
        let mut local_transform = world.get::<&mut LocalTransform>(entity)?;
        if local_transform.scale == scale {
            false
        } else {
            local_transform.scale = scale;
            true
        }
    };
    if changed {
        invalidation::invalidate(world, entity);
    }
    Ok(())
}
