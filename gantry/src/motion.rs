//! Incremental motion: translating, rotating, orbiting and aiming
use glam::{DMat4, DQuat, DVec3};
use hecs::{Entity, World};

use crate::{convert, util, world_transform, GantryResult};

/// Coordinate space a motion delta is expressed in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Space {
    /// Relative to the entity's own axes.
    Local,
    /// Relative to the world axes.
    World,
}

/// Move the entity by `delta`.
///
/// With `relative_to` set, the delta is first rotated into world space by
/// that entity's accumulated rotation (its scale plays no part); otherwise
/// the delta is taken as world-space and added to the position directly.
pub fn translate(
    world: &mut World,
    entity: Entity,
    delta: DVec3,
    relative_to: Option<Entity>,
) -> GantryResult<()> {
    let delta = util::sanitize_vec3(delta);
    let world_delta = match relative_to {
        Some(reference) => convert::transform_direction(world, reference, delta)?,
        None => delta,
    };
    let position = world_transform::position(world, entity)? + world_delta;
    world_transform::set_position(world, entity, position)
}

/// Rotate the entity by Euler angles in degrees, in the y-x-z convention.
///
/// In [`Space::Local`] the delta right-multiplies the local rotation; in
/// [`Space::World`] it is applied on top of the accumulated world
/// rotation. Either way the rotation left behind is normalized.
pub fn rotate(
    world: &mut World,
    entity: Entity,
    euler_degrees: DVec3,
    space: Space,
) -> GantryResult<()> {
    let delta = util::quat_from_euler_degrees(util::sanitize_vec3(euler_degrees));
    match space {
        Space::Local => {
            let local_rotation = world_transform::local_rotation(world, entity)?;
            world_transform::set_local_rotation(world, entity, (local_rotation * delta).normalize())
        }
        Space::World => {
            let rotation = world_transform::rotation(world, entity)?;
            world_transform::set_rotation(world, entity, delta * rotation)
        }
    }
}

/// Rotate the entity by `angle_degrees` around `axis`.
///
/// A world-space axis is first re-expressed in the entity's local space,
/// so the delta is always applied to the local rotation. If the resolved
/// local axis has near-zero magnitude the call does nothing at all, not
/// even invalidate.
pub fn rotate_axis_angle(
    world: &mut World,
    entity: Entity,
    axis: DVec3,
    angle_degrees: f64,
    space: Space,
) -> GantryResult<()> {
    let axis = util::sanitize_vec3(axis);
    let local_axis = match space {
        Space::Local => axis,
        Space::World => convert::inverse_transform_direction(world, entity, axis)?,
    };
    if local_axis.length_squared()
        <= util::DEGENERATE_SCALE_EPSILON * util::DEGENERATE_SCALE_EPSILON
    {
        return Ok(());
    }

    let delta = DQuat::from_axis_angle(local_axis.normalize(), angle_degrees.to_radians());
    let local_rotation = world_transform::local_rotation(world, entity)?;
    world_transform::set_local_rotation(world, entity, (local_rotation * delta).normalize())
}

/// Orbit the entity around a world-space `point`.
///
/// Two steps, always in this order: the world position is swung around
/// `axis` through `point` by the angle, then the entity itself is rotated
/// around the same world axis so it keeps facing the point the same way.
/// The distance to `point` is preserved.
pub fn rotate_around(
    world: &mut World,
    entity: Entity,
    point: DVec3,
    axis: DVec3,
    angle_degrees: f64,
) -> GantryResult<()> {
    let point = util::sanitize_vec3(point);
    let axis = util::sanitize_vec3(axis);
    let orbit = if axis.length_squared()
        <= util::DEGENERATE_SCALE_EPSILON * util::DEGENERATE_SCALE_EPSILON
    {
        DQuat::IDENTITY
    } else {
        DQuat::from_axis_angle(axis.normalize(), angle_degrees.to_radians())
    };

    let position = world_transform::position(world, entity)?;
    let new_position = point + orbit * (position - point);
    world_transform::set_position(world, entity, new_position)?;
    rotate_axis_angle(world, entity, axis, angle_degrees, Space::World)
}

/// Aim the entity so its forward axis (-z) points at a world-space target.
///
/// The rotation is extracted from a right-handed look-at matrix built from
/// the current world position, `target` and `up`, normalized, and written
/// to the *local* rotation as-is. For a root entity that is exactly the
/// world orientation; under a rotated parent the parent's rotation still
/// stacks on top, so the final world orientation deviates by it. If the
/// target coincides with the position or the up axis is degenerate, the
/// rotation is left unchanged and a warning is logged.
pub fn look_at(
    world: &mut World,
    entity: Entity,
    target: DVec3,
    up: DVec3,
) -> GantryResult<()> {
    let target = util::sanitize_vec3(target);
    let up = util::sanitize_vec3(up);
    let eye = world_transform::position(world, entity)?;

    let view = DMat4::look_at_rh(eye, target, up);
    let rotation = DQuat::from_mat4(&view).inverse().normalize();
    if !rotation.is_finite() {
        log::warn!(
            "look_at: {:?} cannot look at {:?} with up {:?}, leaving rotation unchanged",
            entity,
            target,
            up
        );
        return Ok(());
    }
    world_transform::set_local_rotation(world, entity, rotation)
}
