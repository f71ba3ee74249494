//! Converting points, vectors, directions and rotations between spaces
//!
//! Three different notions of "into world space" live here and they are
//! not interchangeable:
//!
//! - points go through the full matrix, translation included,
//! - directions go through the accumulated rotation only,
//! - vectors go through scale and rotation but no translation, walked
//!   level by level rather than read from the matrix.
//!
//! Outputs are NaN-sanitized like every other public vector read.
use glam::{DQuat, DVec3};
use hecs::{Entity, World};

use crate::{components::LocalTransform, hierarchy, util, world_transform, GantryResult};

/// Transform a point from the entity's local space to world space, using
/// the full local-to-world matrix.
pub fn transform_point(world: &World, entity: Entity, point: DVec3) -> GantryResult<DVec3> {
    let matrix = world_transform::local_to_world(world, entity)?;
    Ok(util::sanitize_vec3(matrix.transform_point3(point)))
}

/// Transform a point from world space to the entity's local space.
pub fn inverse_transform_point(world: &World, entity: Entity, point: DVec3) -> GantryResult<DVec3> {
    let matrix = world_transform::world_to_local(world, entity)?;
    Ok(util::sanitize_vec3(matrix.transform_point3(point)))
}

/// Transform a direction from the entity's local space to world space.
///
/// Only the accumulated world rotation is applied: length is preserved and
/// ancestor scale is ignored.
pub fn transform_direction(
    world: &World,
    entity: Entity,
    direction: DVec3,
) -> GantryResult<DVec3> {
    let rotation = world_transform::rotation(world, entity)?;
    Ok(util::sanitize_vec3(rotation * direction))
}

/// Transform a direction from world space to the entity's local space.
pub fn inverse_transform_direction(
    world: &World,
    entity: Entity,
    direction: DVec3,
) -> GantryResult<DVec3> {
    let rotation = world_transform::rotation(world, entity)?;
    Ok(util::sanitize_vec3(rotation.inverse() * direction))
}

/// Transform a vector from the entity's local space to world space.
///
/// Walks the ancestor chain from the entity to the root, applying each
/// level's componentwise scale and then its rotation. Translation never
/// applies to a vector.
pub fn transform_vector(world: &World, entity: Entity, vector: DVec3) -> GantryResult<DVec3> {
    let mut vector = vector;
    let mut current = Some(entity);
    while let Some(node) = current {
        let (local_rotation, local_scale) = local_rotation_and_scale(world, node)?;
        vector = local_rotation * (local_scale * vector);
        current = hierarchy::parent_of(world, node);
    }
    Ok(util::sanitize_vec3(vector))
}

/// Transform a vector from world space to the entity's local space.
///
/// Undoes [`transform_vector`] by recursing to the root first and peeling
/// ancestors off top-down. Scale components at or below
/// [`util::DEGENERATE_SCALE_EPSILON`] invert to zero, so the result
/// collapses along degenerate axes instead of blowing up.
pub fn inverse_transform_vector(
    world: &World,
    entity: Entity,
    vector: DVec3,
) -> GantryResult<DVec3> {
    Ok(util::sanitize_vec3(undo_vector_chain(world, entity, vector)?))
}

/// Compose a caller-supplied rotation with every local rotation on the way
/// to the root, exactly like the world rotation read but seeded with
/// `rotation` instead of identity.
pub fn transform_rotation(
    world: &World,
    entity: Entity,
    rotation: DQuat,
) -> GantryResult<DQuat> {
    let mut result = rotation;
    let mut current = Some(entity);
    while let Some(node) = current {
        let local_rotation = world.get::<&LocalTransform>(node)?.rotation;
        result = local_rotation * result;
        current = hierarchy::parent_of(world, node);
    }
    Ok(util::sanitize_quat(result))
}

fn undo_vector_chain(world: &World, entity: Entity, vector: DVec3) -> GantryResult<DVec3> {
    let vector = match hierarchy::parent_of(world, entity) {
        Some(parent) => undo_vector_chain(world, parent, vector)?,
        None => vector,
    };
    let (local_rotation, local_scale) = local_rotation_and_scale(world, entity)?;
    Ok(util::safe_scale_inverse(local_scale) * (local_rotation.inverse() * vector))
}

fn local_rotation_and_scale(world: &World, entity: Entity) -> GantryResult<(DQuat, DVec3)> {
    let local_transform = world.get::<&LocalTransform>(entity)?;
    Ok((local_transform.rotation, local_transform.scale))
}
