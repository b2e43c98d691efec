//! Line segment encoding.
//!
//! Every line the overlay draws, including wire edges and glyph strokes, is a
//! unit cube stretched into a thin box. [`LinePrimitive::encode`] computes
//! that box's transform from two endpoints and a thickness.

use glam::{Mat4, Quat, Vec3};
use xr_overlay_core::math::{look_rotation, UP};

/// One line segment as a posed, non-uniformly scaled unit cube.
///
/// The local +Z axis runs from the first endpoint to the second; the
/// cross-section is `thickness` by `thickness`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl LinePrimitive {
    /// Encode the segment `from -> to`.
    ///
    /// Returns `None` for coincident endpoints (or non-finite input). Callers
    /// skip such segments; a zero-length line is expected input, not an error.
    pub fn encode(from: Vec3, to: Vec3, thickness: f32) -> Option<Self> {
        let segment = to - from;
        let length = segment.length();

        if !(length > 0.0 && length.is_finite()) {
            return None;
        }

        let direction = segment / length;
        let rotation = look_rotation(direction, UP)?;

        Some(Self {
            position: from + direction * (length * 0.5),
            rotation,
            scale: Vec3::new(thickness, thickness, length),
        })
    }

    /// Length of the encoded segment.
    #[inline]
    pub fn length(&self) -> f32 {
        self.scale.z
    }

    /// Unit direction from the first endpoint to the second.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// The two endpoints this primitive was encoded from.
    pub fn endpoints(&self) -> (Vec3, Vec3) {
        let half = self.direction() * (self.length() * 0.5);
        (self.position - half, self.position + half)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    #[inline]
    pub fn to_instance(&self) -> InstanceTransform {
        InstanceTransform::from(self.matrix())
    }
}

/// Column-major model matrix laid out for direct upload to an instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceTransform {
    pub model: [[f32; 4]; 4],
}

impl InstanceTransform {
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }

    /// Endpoints of the line this transform stands in for, i.e. the centers
    /// of the unit cube's -Z and +Z faces.
    pub fn line_endpoints(&self) -> (Vec3, Vec3) {
        let m = self.matrix();
        (
            m.transform_point3(Vec3::new(0.0, 0.0, -0.5)),
            m.transform_point3(Vec3::new(0.0, 0.0, 0.5)),
        )
    }
}

impl From<Mat4> for InstanceTransform {
    fn from(m: Mat4) -> Self {
        Self {
            model: m.to_cols_array_2d(),
        }
    }
}
