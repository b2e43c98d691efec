use glam::{Quat, Vec2, Vec3};
use xr_overlay_core::math::{look_rotation, trs, FORWARD, RIGHT, UP};
use xr_overlay_core::{Color, Transform};

use crate::backend::{MeshKind, RenderBackend};
use crate::batch::BatchWriter;
use crate::context::{DrawContext, LineStyle};
use crate::edges;
use crate::unit_shapes::{UNIT_ARROW_POINTS, UNIT_CUBE_POINTS, UNIT_POINTER_POINTS, UNIT_RECTANGLE_POINTS};
use crate::DEFAULT_AXIS_LENGTH;

impl<B: RenderBackend> DrawContext<B> {
    /// Draw a single line segment.
    pub fn draw_line(&mut self, from: Vec3, to: Vec3, style: impl Into<LineStyle>) {
        let Some((mut lines, _)) = self.lines(style.into()) else {
            return;
        };
        lines.line(from, to);
    }

    /// Draw a segment from `from` along `direction` for `length`.
    ///
    /// `direction` is normalized first; a zero direction draws nothing.
    pub fn draw_ray(&mut self, from: Vec3, direction: Vec3, length: f32, style: impl Into<LineStyle>) {
        let Some(direction) = direction.try_normalize() else {
            return;
        };
        self.draw_line(from, from + direction * length, style);
    }

    /// Draw a 3D plus of `size` centered on `center`.
    pub fn draw_point(&mut self, center: Vec3, size: f32, style: impl Into<LineStyle>) {
        let Some((mut lines, _)) = self.lines(style.into()) else {
            return;
        };
        point_marker(&mut lines, center, size * 0.5);
    }

    /// [`draw_point`](Self::draw_point) with the configured point size.
    pub fn draw_point_default(&mut self, center: Vec3, style: impl Into<LineStyle>) {
        let size = self.config().point_size;
        self.draw_point(center, size, style);
    }

    /// Draw a solid sphere.
    pub fn draw_sphere(&mut self, center: Vec3, radius: f32, color: Color) {
        // the sphere mesh has unit diameter
        self.solid(
            MeshKind::Sphere,
            color,
            trs(center, Quat::IDENTITY, Vec3::splat(radius * 2.0)),
        );
    }

    /// Draw a solid box of `size`.
    pub fn draw_cube(&mut self, center: Vec3, rotation: Quat, size: Vec3, color: Color) {
        self.solid(MeshKind::Cube, color, trs(center, rotation, size));
    }

    /// Draw a solid quad of `size` in the local XY plane.
    pub fn draw_quad(&mut self, center: Vec3, rotation: Quat, size: Vec2, color: Color) {
        self.solid(MeshKind::Quad, color, trs(center, rotation, size.extend(1.0)));
    }

    /// Draw a circle in the local XZ plane.
    pub fn draw_circle(&mut self, center: Vec3, rotation: Quat, radius: f32, style: impl Into<LineStyle>) {
        let Some((mut lines, mut geometry)) = self.lines(style.into()) else {
            return;
        };
        let shapes = geometry.shapes;
        let circle = shapes.circle();
        let points = geometry.transformed(trs(center, rotation, Vec3::splat(radius)), circle);
        lines.edges(points, edges::closed_loop(points.len()));
    }

    /// Draw a rectangle of `size.x` by `size.y` in the local XZ plane.
    pub fn draw_rectangle(&mut self, center: Vec3, rotation: Quat, size: Vec2, style: impl Into<LineStyle>) {
        let Some((mut lines, mut geometry)) = self.lines(style.into()) else {
            return;
        };
        let transform = trs(center, rotation, Vec3::new(size.x, 1.0, size.y));
        let points = geometry.transformed(transform, &UNIT_RECTANGLE_POINTS);
        lines.edges(points, edges::closed_loop(points.len()));
    }

    /// Draw three axis-aligned great circles.
    pub fn draw_wire_sphere(&mut self, center: Vec3, radius: f32, style: impl Into<LineStyle>) {
        self.draw_wire_sphere_rotated(center, Quat::IDENTITY, radius, style);
    }

    /// Draw three great circles in the frame given by `rotation`.
    pub fn draw_wire_sphere_rotated(
        &mut self,
        center: Vec3,
        rotation: Quat,
        radius: f32,
        style: impl Into<LineStyle>,
    ) {
        let Some((mut lines, mut geometry)) = self.lines(style.into()) else {
            return;
        };
        let shapes = geometry.shapes;
        let sphere = shapes.sphere();
        let points = geometry.transformed(trs(center, rotation, Vec3::splat(radius)), sphere);
        lines.edges(points, edges::sphere());
    }

    /// Draw the upper half of a wire sphere: the equator and two meridian
    /// arcs through local +Y.
    pub fn draw_wire_hemisphere(
        &mut self,
        center: Vec3,
        rotation: Quat,
        radius: f32,
        style: impl Into<LineStyle>,
    ) {
        let Some((mut lines, mut geometry)) = self.lines(style.into()) else {
            return;
        };
        let shapes = geometry.shapes;
        let hemisphere = shapes.hemisphere();
        let points = geometry.transformed(trs(center, rotation, Vec3::splat(radius)), hemisphere);
        lines.edges(points, edges::hemisphere());
    }

    /// Draw a capsule whose long axis is local +Y.
    ///
    /// `height` is the full end-to-end length. A height below `2 * radius`
    /// collapses the straight section to nothing.
    pub fn draw_wire_capsule(
        &mut self,
        center: Vec3,
        rotation: Quat,
        radius: f32,
        height: f32,
        style: impl Into<LineStyle>,
    ) {
        let Some((mut lines, mut geometry)) = self.lines(style.into()) else {
            return;
        };

        let shapes = geometry.shapes;
        let hemisphere = shapes.hemisphere();
        let offset = Vec3::new(0.0, (height * 0.5 - radius).max(0.0), 0.0);
        let top = trs(offset, Quat::IDENTITY, Vec3::splat(radius));
        let bottom = trs(-offset, Quat::from_rotation_x(180f32.to_radians()), Vec3::splat(radius));
        let pose = trs(center, rotation, Vec3::ONE);

        let points = geometry.scratch();
        points.extend(hemisphere.iter().map(|&p| top.transform_point3(p)));
        points.extend(hemisphere.iter().map(|&p| bottom.transform_point3(p)));

        let quarter = Quat::from_rotation_y(90f32.to_radians());
        let mut side_top = Vec3::new(radius, offset.y, 0.0);
        let mut side_bottom = Vec3::new(radius, -offset.y, 0.0);
        for _ in 0..4 {
            side_top = quarter * side_top;
            side_bottom = quarter * side_bottom;
            points.extend([side_top, side_bottom]);
        }

        for p in points.iter_mut() {
            *p = pose.transform_point3(*p);
        }
        debug_assert_eq!(points.len(), edges::CAPSULE_POINTS);

        lines.edges(points, edges::capsule());
    }

    /// Draw the twelve edges of a box of `size`.
    pub fn draw_wire_cube(&mut self, center: Vec3, rotation: Quat, size: Vec3, style: impl Into<LineStyle>) {
        let Some((mut lines, mut geometry)) = self.lines(style.into()) else {
            return;
        };
        let points = geometry.transformed(trs(center, rotation, size), &UNIT_CUBE_POINTS);
        lines.edges(points, edges::cube());
    }

    /// Draw a flat arrow head pointing along local +Z.
    pub fn draw_arrow(&mut self, center: Vec3, rotation: Quat, scale: f32, style: impl Into<LineStyle>) {
        let Some((mut lines, mut geometry)) = self.lines(style.into()) else {
            return;
        };
        let points = geometry.transformed(trs(center, rotation, Vec3::splat(scale)), &UNIT_ARROW_POINTS);
        lines.edges(points, edges::closed_loop(points.len()));
    }

    /// Draw a segment of length `scale` from `from` along `direction`,
    /// capped with a four-barb tip. A zero direction draws nothing.
    pub fn draw_pointer(&mut self, from: Vec3, direction: Vec3, scale: f32, style: impl Into<LineStyle>) {
        let Some(rotation) = look_rotation(direction, UP) else {
            return;
        };
        let Some((mut lines, mut geometry)) = self.lines(style.into()) else {
            return;
        };

        let end = from + direction.normalize() * scale;
        lines.line(from, end);

        let tip = trs(end, rotation, Vec3::splat(scale * 0.25));
        let points = geometry.transformed(tip, &UNIT_POINTER_POINTS);
        lines.edges(points, edges::pairs(points.len()));
    }

    /// Draw `transform`'s up, right and forward axes as green, red and blue
    /// rays of `length`.
    pub fn draw_axis(&mut self, transform: &Transform, length: f32, thickness: Option<f32>) {
        let style = |color| LineStyle { color, thickness };
        let origin = transform.position;
        self.draw_ray(origin, transform.up(), length, style(Color::GREEN));
        self.draw_ray(origin, transform.right(), length, style(Color::RED));
        self.draw_ray(origin, transform.forward(), length, style(Color::BLUE));
    }

    /// [`draw_axis`](Self::draw_axis) with the default length.
    pub fn draw_axis_default(&mut self, transform: &Transform) {
        self.draw_axis(transform, DEFAULT_AXIS_LENGTH, None);
    }

    /// Draw a polyline through `points`.
    ///
    /// Only the first `line_count` points are used when given (clamped to
    /// `points.len()`). With `close_loop` the last used point is joined back
    /// to the first. Fewer than two points draw nothing.
    pub fn draw_line_list(
        &mut self,
        points: &[Vec3],
        close_loop: bool,
        line_count: Option<usize>,
        style: impl Into<LineStyle>,
    ) {
        if points.len() < 2 {
            return;
        }
        let Some((mut lines, _)) = self.lines(style.into()) else {
            return;
        };

        let count = limit(points.len(), line_count);
        for pair in points[..count].windows(2) {
            lines.line(pair[0], pair[1]);
        }
        if close_loop {
            lines.line(points[count - 1], points[0]);
        }
    }

    /// Draw a point marker of `size` at each of the first `count` points.
    pub fn draw_point_set(&mut self, points: &[Vec3], size: f32, count: Option<usize>, style: impl Into<LineStyle>) {
        if points.is_empty() {
            return;
        }
        let Some((mut lines, _)) = self.lines(style.into()) else {
            return;
        };

        let half = size * 0.5;
        for &center in &points[..limit(points.len(), count)] {
            lines.reserve(3);
            point_marker(&mut lines, center, half);
        }
    }

    /// Draw a wire box of the same `rotation` and `size` centered on each of
    /// the first `count` points.
    pub fn draw_wire_cubes(
        &mut self,
        centers: &[Vec3],
        rotation: Quat,
        size: Vec3,
        count: Option<usize>,
        style: impl Into<LineStyle>,
    ) {
        if centers.is_empty() {
            return;
        }
        let Some((mut lines, mut geometry)) = self.lines(style.into()) else {
            return;
        };

        for &center in &centers[..limit(centers.len(), count)] {
            let points = geometry.transformed(trs(center, rotation, size), &UNIT_CUBE_POINTS);
            lines.reserve(edges::CUBE_EDGES);
            lines.edges(points, edges::cube());
        }
    }
}

fn point_marker<B: RenderBackend>(lines: &mut BatchWriter<'_, B>, center: Vec3, half: f32) {
    for axis in [RIGHT, UP, FORWARD] {
        let offset = axis * half;
        lines.line(center - offset, center + offset);
    }
}

/// Entries to use out of `len`, honoring an optional caller limit.
fn limit(len: usize, requested: Option<usize>) -> usize {
    match requested {
        Some(n) if n > 0 => n.min(len),
        _ => len,
    }
}
