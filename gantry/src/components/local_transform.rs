//! The authoritative parent-relative transform
use glam::{DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::util;

/// The entity's position, rotation and scale relative to its parent, or to
/// the world origin if it has no parent.
///
/// This is the authoritative half of an entity's spatial state; everything
/// in [`GlobalTransform`](super::GlobalTransform) is derived from it and
/// the ancestor chain. Reads go through the accessors below; writes go
/// through the setters in [`crate::world_transform`], which invalidate the
/// cached world-space state of the entity and all of its descendants.
#[derive(Clone, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub struct LocalTransform {
    pub(crate) translation: DVec3,
    pub(crate) rotation: DQuat,
    pub(crate) scale: DVec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            translation: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            scale: DVec3::ONE,
        }
    }
}

impl LocalTransform {
    /// Create a transform from translation, rotation and non-uniform scale.
    ///
    /// NaN components are replaced with zero.
    pub fn new(translation: DVec3, rotation: DQuat, scale: DVec3) -> Self {
        Self {
            translation: util::sanitize_vec3(translation),
            rotation: util::sanitize_quat(rotation),
            scale: util::sanitize_vec3(scale),
        }
    }

    /// Create a transform with the given translation, identity rotation and
    /// unit scale.
    pub fn from_translation(translation: DVec3) -> Self {
        Self::new(translation, DQuat::IDENTITY, DVec3::ONE)
    }

    /// Create a transform with the given rotation and translation and unit
    /// scale.
    pub fn from_rotation_translation(rotation: DQuat, translation: DVec3) -> Self {
        Self::new(translation, rotation, DVec3::ONE)
    }

    /// Create a transform with the given rotation, zero translation and
    /// unit scale.
    pub fn from_rotation(rotation: DQuat) -> Self {
        Self::new(DVec3::ZERO, rotation, DVec3::ONE)
    }

    /// Create a transform with the given scale, zero translation and
    /// identity rotation.
    pub fn from_scale(scale: DVec3) -> Self {
        Self::new(DVec3::ZERO, DQuat::IDENTITY, scale)
    }

    /// The translation relative to the parent, with NaN components zeroed.
    #[inline]
    pub fn translation(&self) -> DVec3 {
        util::sanitize_vec3(self.translation)
    }

    /// The rotation relative to the parent, with NaN components zeroed.
    #[inline]
    pub fn rotation(&self) -> DQuat {
        util::sanitize_quat(self.rotation)
    }

    /// The non-uniform scale relative to the parent, with NaN components
    /// zeroed.
    #[inline]
    pub fn scale(&self) -> DVec3 {
        util::sanitize_vec3(self.scale)
    }

    /// The TRS matrix taking points in this entity's space into its
    /// parent's space.
    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}
