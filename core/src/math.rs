//! Math type re-exports and helper functions.
//!
//! All overlay geometry uses `glam` f32 types with +Y up, +X right and
//! +Z forward. Unit shapes, line primitives and text layout depend on this
//! convention, so helpers here spell it out instead of relying on
//! `glam`'s camera-oriented defaults.

pub use glam;
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

/// World up axis.
pub const UP: Vec3 = Vec3::Y;

/// World right axis.
pub const RIGHT: Vec3 = Vec3::X;

/// World forward axis.
pub const FORWARD: Vec3 = Vec3::Z;

/// Build a 4x4 TRS matrix from translation, rotation and scale.
#[inline]
pub fn trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(scale, rotation, translation)
}

/// Rotation of `angle_degrees` around `axis`.
///
/// `axis` does not need to be normalized.
#[inline]
pub fn angle_axis(angle_degrees: f32, axis: Vec3) -> Quat {
    Quat::from_axis_angle(axis.normalize(), angle_degrees.to_radians())
}

/// Rotation that maps the direction `from` onto the direction `to`.
#[inline]
pub fn from_to_rotation(from: Vec3, to: Vec3) -> Quat {
    Quat::from_rotation_arc(from.normalize(), to.normalize())
}

/// Rotation whose local +Z axis points along `forward` and whose local +Y
/// axis lies in the plane spanned by `forward` and `up`.
///
/// When `forward` is parallel to `up` the up hint carries no information, so
/// an arbitrary axis orthogonal to `forward` is used instead.
///
/// Returns `None` when `forward` has zero or non-finite length.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let z = forward.try_normalize()?;

    let x = match up.cross(z).try_normalize() {
        Some(x) => x,
        None => z.any_orthonormal_vector(),
    };
    let y = z.cross(x);

    Some(Quat::from_mat3(&Mat3::from_cols(x, y, z)))
}

/// Largest absolute component of `v`.
#[inline]
pub fn largest_abs_component(v: Vec3) -> f32 {
    v.abs().max_element()
}
