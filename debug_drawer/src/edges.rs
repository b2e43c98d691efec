//! Edge lists over the unit point sets.
//!
//! Each function yields `(a, b)` index pairs into the matching point array
//! from [`unit_shapes`](crate::unit_shapes) (or the composed capsule array).
//! The seam indices below are where consecutive points are *not* joined.

use crate::unit_shapes::{CIRCLE_SEGMENTS, HEMISPHERE_POINTS};

/// Last point of the first meridian arc in a hemisphere. The next point
/// starts the second arc on the far side.
pub const HEMISPHERE_SEAM: usize = CIRCLE_SEGMENTS * 3 / 2;

/// Hemisphere points (two caps) plus four top/bottom side marker pairs.
pub const CAPSULE_POINTS: usize = HEMISPHERE_POINTS * 2 + 8;

/// Walk breaks for a capsule: the arc seam in the top cap, the end of the
/// top cap, and the arc seam in the bottom cap.
pub const CAPSULE_SEAMS: [usize; 3] = [
    HEMISPHERE_SEAM,
    HEMISPHERE_POINTS - 1,
    HEMISPHERE_POINTS + HEMISPHERE_SEAM,
];

pub const CUBE_EDGES: usize = 12;
pub const HEMISPHERE_EDGES: usize = HEMISPHERE_POINTS - 2;
pub const SPHERE_EDGES: usize = CIRCLE_SEGMENTS * 3;
pub const CAPSULE_EDGES: usize = HEMISPHERE_POINTS * 2 - 1 - CAPSULE_SEAMS.len() + 4;

/// `i -> (i + 1) mod n` for every point of an `n`-point ring.
pub fn closed_loop(n: usize) -> impl Iterator<Item = (usize, usize)> + Clone {
    (0..n).map(move |i| (i, (i + 1) % n))
}

/// `(0, 1), (2, 3), ...` over `n` points.
pub fn pairs(n: usize) -> impl Iterator<Item = (usize, usize)> + Clone {
    (0..n / 2).map(|i| (i * 2, i * 2 + 1))
}

/// Three independent rings, each closed onto its own first point.
pub fn sphere() -> impl Iterator<Item = (usize, usize)> + Clone {
    (0..3).flat_map(|ring| {
        let base = ring * CIRCLE_SEGMENTS;
        closed_loop(CIRCLE_SEGMENTS).map(move |(a, b)| (base + a, base + b))
    })
}

/// Equator ring (closed through the start of the first arc) and both arcs.
pub fn hemisphere() -> impl Iterator<Item = (usize, usize)> + Clone {
    (0..HEMISPHERE_POINTS - 1)
        .filter(|&i| i != HEMISPHERE_SEAM)
        .map(|i| (i, i + 1))
}

/// Both caps followed by the four straight sides.
pub fn capsule() -> impl Iterator<Item = (usize, usize)> + Clone {
    let caps = (0..HEMISPHERE_POINTS * 2 - 1)
        .filter(|i| !CAPSULE_SEAMS.contains(i))
        .map(|i| (i, i + 1));
    let sides = pairs(8).map(|(a, b)| (a + HEMISPHERE_POINTS * 2, b + HEMISPHERE_POINTS * 2));
    caps.chain(sides)
}

/// Top loop, bottom loop and the four verticals of
/// [`UNIT_CUBE_POINTS`](crate::unit_shapes::UNIT_CUBE_POINTS).
pub fn cube() -> impl Iterator<Item = (usize, usize)> + Clone {
    (0..4).flat_map(|i| {
        let j = (i + 1) % 4;
        [(i, j), (i + 4, j + 4), (i, i + 4)]
    })
}
