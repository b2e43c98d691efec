//! Wireframe outlines for physics colliders.
//!
//! These are thin adapters: each collider shape is mapped into world space
//! through its pose and forwarded to the matching wire primitive.

use glam::{Quat, Vec3};
use xr_overlay_core::math::{from_to_rotation, largest_abs_component, FORWARD, RIGHT, UP};
use xr_overlay_core::Transform;

use crate::backend::RenderBackend;
use crate::context::{DrawContext, LineStyle};

/// World-space axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Local axis a capsule runs along.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CapsuleDirection {
    X,
    #[default]
    Y,
    Z,
}

impl CapsuleDirection {
    fn axis(self) -> Vec3 {
        match self {
            Self::X => RIGHT,
            Self::Y => UP,
            Self::Z => FORWARD,
        }
    }

    /// Component of `scale` along this axis, and the larger of the other two.
    fn split_scale(self, scale: Vec3) -> (f32, f32) {
        let s = scale.abs();
        match self {
            Self::X => (s.x, s.y.max(s.z)),
            Self::Y => (s.y, s.x.max(s.z)),
            Self::Z => (s.z, s.x.max(s.y)),
        }
    }
}

/// Collider geometry in the collider's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Box {
        center: Vec3,
        size: Vec3,
    },
    Sphere {
        center: Vec3,
        radius: f32,
    },
    Capsule {
        center: Vec3,
        radius: f32,
        height: f32,
        direction: CapsuleDirection,
    },
    /// Any other shape, outlined by its world bounds.
    Bounds(Aabb),
}

/// A collider as seen by the overlay: its shape, the world pose of the
/// object it is attached to, and whether it is enabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub shape: ColliderShape,
    pub pose: Transform,
    pub enabled: bool,
}

impl Collider {
    pub fn new(shape: ColliderShape, pose: Transform) -> Self {
        Self {
            shape,
            pose,
            enabled: true,
        }
    }
}

impl<B: RenderBackend> DrawContext<B> {
    /// Outline `collider` in world space.
    ///
    /// Boxes, spheres and capsules follow the pose. Other shapes draw their
    /// world bounds, and only while the collider is enabled.
    pub fn draw_collider(&mut self, collider: &Collider, style: impl Into<LineStyle>) {
        let pose = &collider.pose;

        match collider.shape {
            ColliderShape::Box { center, size } => {
                self.draw_wire_cube(
                    pose.transform_point(center),
                    pose.rotation,
                    size * pose.scale,
                    style,
                );
            }
            ColliderShape::Sphere { center, radius } => {
                self.draw_wire_sphere_rotated(
                    pose.transform_point(center),
                    pose.rotation,
                    radius * largest_abs_component(pose.scale),
                    style,
                );
            }
            ColliderShape::Capsule {
                center,
                radius,
                height,
                direction,
            } => {
                let (along, across) = direction.split_scale(pose.scale);
                let alignment = match direction {
                    CapsuleDirection::Y => Quat::IDENTITY,
                    _ => from_to_rotation(UP, direction.axis()),
                };
                self.draw_wire_capsule(
                    pose.transform_point(center),
                    pose.rotation * alignment,
                    radius * across,
                    height.max(0.0) * along,
                    style,
                );
            }
            ColliderShape::Bounds(bounds) => {
                if collider.enabled {
                    self.draw_collider_bounds(&bounds, style);
                }
            }
        }
    }

    /// Outline a world-space bounding box.
    pub fn draw_collider_bounds(&mut self, bounds: &Aabb, style: impl Into<LineStyle>) {
        self.draw_wire_cube(bounds.center(), Quat::IDENTITY, bounds.size(), style);
    }
}
