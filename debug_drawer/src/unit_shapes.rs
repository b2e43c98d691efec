//! Canonical unit-space point sets.
//!
//! Everything here is computed once when a [`DrawContext`](crate::DrawContext)
//! is created and never mutated afterwards. Point order matters: the edge
//! rules in [`edges`](crate::edges) index directly into these arrays.

use glam::{Quat, Vec3};
use xr_overlay_core::math::{angle_axis, FORWARD, RIGHT, UP};

/// Segments in one full circle. Must be even so half-arcs land on points.
pub const CIRCLE_SEGMENTS: usize = 24;

/// Points in the three-great-circle sphere.
pub const SPHERE_POINTS: usize = CIRCLE_SEGMENTS * 3;

/// Points in a hemisphere: one full ring plus two half arcs sharing nothing.
pub const HEMISPHERE_POINTS: usize = CIRCLE_SEGMENTS * 2 + 2;

/// Points in one half arc of the hemisphere.
pub const HALF_ARC_POINTS: usize = CIRCLE_SEGMENTS / 2 + 1;

const _: () = assert!(CIRCLE_SEGMENTS % 2 == 0);

/// Unit cube corners. Indices 0..4 are the +Z loop, 4..8 the -Z loop;
/// corner `i` and `i + 4` share x and y.
pub const UNIT_CUBE_POINTS: [Vec3; 8] = [
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
];

/// Unit square in the XZ plane.
pub const UNIT_RECTANGLE_POINTS: [Vec3; 4] = [
    Vec3::new(-0.5, 0.0, -0.5),
    Vec3::new(-0.5, 0.0, 0.5),
    Vec3::new(0.5, 0.0, 0.5),
    Vec3::new(0.5, 0.0, -0.5),
];

/// Flat arrow head pointing along +Z, drawn as a closed quad.
pub const UNIT_ARROW_POINTS: [Vec3; 4] = [
    Vec3::new(0.0, 0.0, 0.5),
    Vec3::new(0.25, 0.0, -0.25),
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(-0.25, 0.0, -0.25),
];

/// Four disjoint barbs fanning back from the origin; consecutive pairs are
/// independent segments.
pub const UNIT_POINTER_POINTS: [Vec3; 8] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(0.25, 0.0, -0.5),
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(-0.25, 0.0, -0.5),
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(0.0, 0.25, -0.5),
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(0.0, -0.25, -0.5),
];

/// Precomputed circle, sphere and hemisphere topologies.
#[derive(Debug, Clone)]
pub struct UnitShapes {
    circle: [Vec3; CIRCLE_SEGMENTS],
    sphere: [Vec3; SPHERE_POINTS],
    hemisphere: [Vec3; HEMISPHERE_POINTS],
}

/// (rotation axis, seed) for each of the three great circles.
const GREAT_CIRCLES: [(Vec3, Vec3); 3] = [
    (UP, FORWARD),
    (Vec3::NEG_X, FORWARD),
    (FORWARD, RIGHT),
];

impl UnitShapes {
    pub fn build() -> Self {
        let step = 360.0 / CIRCLE_SEGMENTS as f32;

        let mut circle = [Vec3::ZERO; CIRCLE_SEGMENTS];
        sweep(&mut circle, FORWARD, angle_axis(step, UP));

        let mut sphere = [Vec3::ZERO; SPHERE_POINTS];
        for (block, (axis, seed)) in sphere.chunks_exact_mut(CIRCLE_SEGMENTS).zip(GREAT_CIRCLES) {
            sweep(block, seed, angle_axis(step, axis));
        }

        // Equator first, then the two meridian half arcs. Both arcs start on
        // the equator and rise through +Y.
        let mut hemisphere = [Vec3::ZERO; HEMISPHERE_POINTS];
        let (equator, arcs) = hemisphere.split_at_mut(CIRCLE_SEGMENTS);
        let (arc_a, arc_b) = arcs.split_at_mut(HALF_ARC_POINTS);
        for (dst, (axis, seed)) in [equator, arc_a, arc_b].into_iter().zip(GREAT_CIRCLES) {
            sweep(dst, seed, angle_axis(step, axis));
        }

        log::debug!(
            "built unit shapes: circle {}, sphere {}, hemisphere {} points",
            circle.len(),
            sphere.len(),
            hemisphere.len()
        );

        Self {
            circle,
            sphere,
            hemisphere,
        }
    }

    /// Ring of [`CIRCLE_SEGMENTS`] points in the XZ plane starting at +Z.
    #[inline]
    pub fn circle(&self) -> &[Vec3; CIRCLE_SEGMENTS] {
        &self.circle
    }

    /// Three consecutive rings: XZ (from +Z), YZ (from +Z), XY (from +X).
    #[inline]
    pub fn sphere(&self) -> &[Vec3; SPHERE_POINTS] {
        &self.sphere
    }

    /// XZ ring, then the YZ and XY upper half arcs.
    #[inline]
    pub fn hemisphere(&self) -> &[Vec3; HEMISPHERE_POINTS] {
        &self.hemisphere
    }
}

/// Fill `dst` by repeatedly rotating `seed`, starting with `seed` itself.
fn sweep(dst: &mut [Vec3], seed: Vec3, step: Quat) {
    let mut v = seed;
    for p in dst {
        *p = v;
        v = step * v;
    }
}
