//! Render backend that projects overlay submissions into an SVG document.
//!
//! The projection is orthographic onto the world XY plane, looking down -Z.
//! Line instances become `<line>` elements, solid spheres `<circle>`, and
//! solid cubes and quads `<polygon>` outlines of their projected corners.

use std::path::Path;

use glam::{Mat4, Vec2, Vec3};
use svg::node::element::{Circle, Line, Polygon, Rectangle};
use svg::Document;
use xr_overlay_core::Color;
use xr_overlay_debug_drawer::{InstanceTransform, MeshKind, RenderBackend};

/// A shape captured for output, in world XY units.
#[derive(Debug, Clone, PartialEq)]
pub enum SvgShape {
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Disc {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Polygon {
        points: Vec<Vec2>,
        color: Color,
    },
}

impl SvgShape {
    fn extend_bounds(&self, min: &mut Vec2, max: &mut Vec2) {
        let mut include = |p: Vec2, pad: f32| {
            *min = min.min(p - pad);
            *max = max.max(p + pad);
        };
        match self {
            Self::Line { from, to, .. } => {
                include(*from, 0.0);
                include(*to, 0.0);
            }
            Self::Disc { center, radius, .. } => include(*center, *radius),
            Self::Polygon { points, .. } => points.iter().for_each(|&p| include(p, 0.0)),
        }
    }
}

/// SVG backend.
#[derive(Debug)]
pub struct SvgBackend {
    pixels_per_unit: f32,
    color: Color,
    shapes: Vec<SvgShape>,
    flushes: usize,
}

impl SvgBackend {
    /// Pixels per world unit in the written document.
    pub fn new(pixels_per_unit: f32) -> Self {
        Self {
            pixels_per_unit,
            color: Color::WHITE,
            shapes: Vec::new(),
            flushes: 0,
        }
    }

    pub fn shapes(&self) -> &[SvgShape] {
        &self.shapes
    }

    /// Instanced submissions received since the last [`clear`](Self::clear).
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Drop everything captured so far. Call between frames.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.flushes = 0;
    }

    /// Build a document framing everything captured so far.
    pub fn document(&self) -> Document {
        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        for shape in &self.shapes {
            shape.extend_bounds(&mut min, &mut max);
        }
        if self.shapes.is_empty() {
            min = Vec2::splat(-1.0);
            max = Vec2::splat(1.0);
        }

        let ppu = self.pixels_per_unit;
        let margin = 0.1 * (max - min).max_element().max(1.0);
        let origin = Vec2::new(min.x - margin, max.y + margin);
        let size = (max - min + Vec2::splat(margin * 2.0)) * ppu;

        // world (x, y) -> svg (x, -y), relative to the top-left corner
        let to_px = |p: Vec2| Vec2::new(p.x - origin.x, origin.y - p.y) * ppu;

        let background = Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", size.x)
            .set("height", size.y)
            .set("fill", "#202020");

        let document = Document::new()
            .set("viewBox", (0, 0, size.x, size.y))
            .set("width", format!("{}px", size.x.ceil()))
            .set("height", format!("{}px", size.y.ceil()))
            .add(background);

        self.shapes.iter().fold(document, |document, shape| match shape {
            SvgShape::Line {
                from,
                to,
                width,
                color,
            } => {
                let (a, b) = (to_px(*from), to_px(*to));
                document.add(
                    Line::new()
                        .set("x1", a.x)
                        .set("y1", a.y)
                        .set("x2", b.x)
                        .set("y2", b.y)
                        .set("stroke", hex(*color))
                        .set("stroke-opacity", color.a)
                        .set("stroke-width", (width * ppu).max(1.0))
                        .set("stroke-linecap", "round"),
                )
            }
            SvgShape::Disc {
                center,
                radius,
                color,
            } => {
                let c = to_px(*center);
                document.add(
                    Circle::new()
                        .set("cx", c.x)
                        .set("cy", c.y)
                        .set("r", radius * ppu)
                        .set("fill", hex(*color))
                        .set("fill-opacity", color.a),
                )
            }
            SvgShape::Polygon { points, color } => {
                let points = points
                    .iter()
                    .map(|&p| {
                        let p = to_px(p);
                        format!("{},{}", p.x, p.y)
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                document.add(
                    Polygon::new()
                        .set("points", points)
                        .set("fill", hex(*color))
                        .set("fill-opacity", color.a),
                )
            }
        })
    }

    /// Write [`document`](Self::document) to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        svg::save(path, &self.document())
    }
}

impl RenderBackend for SvgBackend {
    type Mesh = MeshKind;
    type Material = ();

    fn set_color(&mut self, _material: &(), color: Color) {
        self.color = color;
    }

    fn submit_one(&mut self, _material: &(), mesh: &MeshKind, _sub_mesh: u32, transform: &Mat4) {
        let color = self.color;
        let shape = match mesh {
            MeshKind::Sphere => SvgShape::Disc {
                center: transform.w_axis.truncate().truncate(),
                radius: 0.5 * transform.x_axis.truncate().length(),
                color,
            },
            MeshKind::Quad => SvgShape::Polygon {
                points: project(transform, &QUAD_CORNERS),
                color,
            },
            MeshKind::Cube => SvgShape::Polygon {
                points: hull(project(transform, &CUBE_CORNERS)),
                color,
            },
        };
        self.shapes.push(shape);
    }

    fn submit_instanced(
        &mut self,
        _material: &(),
        mesh: &MeshKind,
        _sub_mesh: u32,
        transforms: &[InstanceTransform],
    ) {
        log::trace!("svg: {} {:?} instances", transforms.len(), mesh);
        self.flushes += 1;

        let color = self.color;
        self.shapes.extend(transforms.iter().map(|t| {
            let (from, to) = t.line_endpoints();
            SvgShape::Line {
                from: from.truncate(),
                to: to.truncate(),
                width: t.matrix().x_axis.truncate().length(),
                color,
            }
        }));
    }

    fn release_instance_buffer(&mut self) {
        log::debug!("svg backend released after {} shapes", self.shapes.len());
    }
}

const QUAD_CORNERS: [Vec3; 4] = [
    Vec3::new(-0.5, -0.5, 0.0),
    Vec3::new(0.5, -0.5, 0.0),
    Vec3::new(0.5, 0.5, 0.0),
    Vec3::new(-0.5, 0.5, 0.0),
];

const CUBE_CORNERS: [Vec3; 8] = [
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
];

fn project(transform: &Mat4, corners: &[Vec3]) -> Vec<Vec2> {
    corners
        .iter()
        .map(|&p| transform.transform_point3(p).truncate())
        .collect()
}

/// Convex hull, counter-clockwise (monotone chain).
fn hull(mut points: Vec<Vec2>) -> Vec<Vec2> {
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    points.dedup();
    if points.len() < 3 {
        return points;
    }

    let cross = |o: Vec2, a: Vec2, b: Vec2| (a - o).perp_dot(b - o);
    let reversed: Vec<Vec2> = points.iter().rev().copied().collect();
    let mut hull: Vec<Vec2> = Vec::with_capacity(points.len() * 2);

    // lower chain, then upper chain
    for pass in [&points, &reversed] {
        let start = hull.len();
        for &p in pass.iter() {
            while hull.len() >= start + 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
                hull.pop();
            }
            hull.push(p);
        }
        hull.pop();
    }
    hull
}

fn hex(color: Color) -> String {
    let [r, g, b, _] = color.to_rgba8();
    format!("#{r:02x}{g:02x}{b:02x}")
}
