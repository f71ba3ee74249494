//! Kitchen sink utility functions
use glam::{DQuat, DVec3, EulerRot};

/// Scale components at or below this magnitude are treated as zero when
/// inverted, rather than producing a huge or infinite reciprocal.
pub const DEGENERATE_SCALE_EPSILON: f64 = 1e-8;

/// Replace any NaN component of `value` with zero.
#[inline]
pub fn sanitize_vec3(value: DVec3) -> DVec3 {
    DVec3::new(
        sanitize_f64(value.x),
        sanitize_f64(value.y),
        sanitize_f64(value.z),
    )
}

/// Replace any NaN component of `value` with zero.
#[inline]
pub fn sanitize_quat(value: DQuat) -> DQuat {
    DQuat::from_xyzw(
        sanitize_f64(value.x),
        sanitize_f64(value.y),
        sanitize_f64(value.z),
        sanitize_f64(value.w),
    )
}

#[inline]
fn sanitize_f64(value: f64) -> f64 {
    if value.is_nan() {
        0.
    } else {
        value
    }
}

/// Componentwise reciprocal of a scale vector, mapping degenerate
/// components to zero instead of infinity.
#[inline]
pub fn safe_scale_inverse(scale: DVec3) -> DVec3 {
    DVec3::new(
        safe_invert(scale.x),
        safe_invert(scale.y),
        safe_invert(scale.z),
    )
}

#[inline]
fn safe_invert(component: f64) -> f64 {
    if component.abs() <= DEGENERATE_SCALE_EPSILON {
        0.
    } else {
        1. / component
    }
}

/// Build a rotation from Euler angles in degrees, applied in the
/// intrinsic y-x-z (yaw, pitch, roll) order.
#[inline]
pub fn quat_from_euler_degrees(euler_degrees: DVec3) -> DQuat {
    DQuat::from_euler(
        EulerRot::YXZ,
        euler_degrees.y.to_radians(),
        euler_degrees.x.to_radians(),
        euler_degrees.z.to_radians(),
    )
}

/// Decompose a rotation into Euler angles in degrees, using the same
/// intrinsic y-x-z order as [`quat_from_euler_degrees`].
#[inline]
pub fn euler_degrees_from_quat(rotation: DQuat) -> DVec3 {
    let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
    DVec3::new(pitch.to_degrees(), yaw.to_degrees(), roll.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn euler_round_trips_for_axis_aligned_angles() {
        for euler in [
            DVec3::new(30., 0., 0.),
            DVec3::new(0., 45., 0.),
            DVec3::new(0., 0., 60.),
            DVec3::new(10., 20., 30.),
        ] {
            let round_tripped = euler_degrees_from_quat(quat_from_euler_degrees(euler));
            assert_relative_eq!(round_tripped, euler, epsilon = 1e-9);
        }
    }

    #[test]
    fn sanitize_replaces_only_nan() {
        let sanitized = sanitize_vec3(DVec3::new(f64::NAN, 2., f64::INFINITY));
        assert_eq!(sanitized.x, 0.);
        assert_eq!(sanitized.y, 2.);
        assert_eq!(sanitized.z, f64::INFINITY);

        let quat = sanitize_quat(DQuat::from_xyzw(f64::NAN, 0., 0., f64::NAN));
        assert_eq!(quat.x, 0.);
        assert_eq!(quat.w, 0.);
    }

    #[test]
    fn degenerate_scale_components_invert_to_zero() {
        let inverse = safe_scale_inverse(DVec3::new(2., 0., 1e-12));
        assert_eq!(inverse, DVec3::new(0.5, 0., 0.));
    }
}
