//! Showcase scene exercising every overlay primitive.

use glam::{Quat, Vec2, Vec3};
use xr_overlay_core::{Color, Transform};
use xr_overlay_debug_drawer::{
    Aabb, CapsuleDirection, Collider, ColliderShape, DrawContext, LineStyle, RenderBackend,
};

/// Points on the helix drawn as a line list. Enough to need more than one
/// instanced submission.
pub const HELIX_POINTS: usize = 1500;

/// Draw one frame of the showcase at `time` seconds.
///
/// Everything is laid out in the XY plane so an orthographic view down -Z
/// shows it all.
pub fn draw_showcase<B: RenderBackend>(overlay: &mut DrawContext<B>, time: f32) {
    let spin = Quat::from_rotation_y(time);

    // Top row: text and axis gizmo
    overlay.draw_text(
        "XR OVERLAY DEMO",
        Vec3::new(-2.0, 2.2, 0.0),
        Quat::IDENTITY,
        Color::WHITE,
    );
    overlay.draw_string(
        "frame time: 16ms\nlines: instanced",
        Vec3::new(-2.0, 1.9, 0.0),
        Quat::IDENTITY,
        Vec2::splat(0.06),
        Color::GRAY,
    );
    overlay.draw_axis_default(&Transform::from_position_rotation(
        Vec3::new(2.0, 2.0, 0.0),
        spin,
    ));

    // Middle row: wire primitives
    let thick = |color| LineStyle::new(color).with_thickness(0.01);
    overlay.draw_wire_sphere_rotated(Vec3::new(-2.0, 1.0, 0.0), spin, 0.4, thick(Color::GREEN));
    overlay.draw_wire_hemisphere(Vec3::new(-1.0, 0.8, 0.0), Quat::IDENTITY, 0.4, Color::CYAN);
    overlay.draw_wire_capsule(Vec3::new(0.0, 1.0, 0.0), spin, 0.2, 0.9, Color::YELLOW);
    overlay.draw_wire_cube(Vec3::new(1.0, 1.0, 0.0), spin, Vec3::splat(0.5), Color::MAGENTA);
    overlay.draw_circle(
        Vec3::new(2.0, 1.0, 0.0),
        Quat::from_rotation_x(90f32.to_radians()),
        0.35,
        Color::RED,
    );

    // Lower row: markers, arrows and solids
    overlay.draw_rectangle(
        Vec3::new(-2.0, 0.0, 0.0),
        Quat::from_rotation_x(90f32.to_radians()),
        Vec2::new(0.6, 0.4),
        Color::WHITE,
    );
    overlay.draw_arrow(
        Vec3::new(-1.0, 0.0, 0.0),
        Quat::from_rotation_x(-90f32.to_radians()),
        0.5,
        Color::GREEN,
    );
    overlay.draw_pointer(
        Vec3::new(-0.3, -0.2, 0.0),
        Vec3::new(time.cos(), time.sin(), 0.0),
        0.5,
        Color::YELLOW,
    );
    overlay.draw_point_default(Vec3::new(0.6, 0.0, 0.0), Color::RED);
    overlay.draw_sphere(Vec3::new(1.2, 0.0, 0.0), 0.15, Color::BLUE.with_alpha(0.6));
    overlay.draw_cube(Vec3::new(1.7, 0.0, 0.0), spin, Vec3::splat(0.25), Color::GRAY);
    overlay.draw_quad(Vec3::new(2.2, 0.0, 0.0), Quat::IDENTITY, Vec2::splat(0.3), Color::CYAN.with_alpha(0.5));

    // Bottom: a long helix, point cloud and cube grid
    let helix: Vec<Vec3> = (0..HELIX_POINTS)
        .map(|i| {
            let t = i as f32 / HELIX_POINTS as f32;
            let angle = t * 40.0 + time;
            Vec3::new(-2.0 + t * 4.0, -1.0 + 0.25 * angle.sin(), 0.25 * angle.cos())
        })
        .collect();
    overlay.draw_line_list(&helix, false, None, Color::CYAN);

    let cloud: Vec<Vec3> = (0..40)
        .map(|i| Vec3::new(-2.0 + i as f32 * 0.1, -1.6, 0.0))
        .collect();
    overlay.draw_point_set(&cloud, 0.05, None, Color::WHITE);

    let grid: Vec<Vec3> = (0..8)
        .map(|i| Vec3::new(0.5 + (i % 4) as f32 * 0.4, -1.7 + (i / 4) as f32 * 0.4, 0.0))
        .collect();
    overlay.draw_wire_cubes(&grid, spin, Vec3::splat(0.2), None, Color::GREEN);

    // Colliders attached to a scaled, rotated body
    let body = Transform::new(Vec3::new(0.0, -2.5, 0.0), spin, Vec3::new(1.0, 0.5, 1.0));
    let colliders = [
        Collider::new(
            ColliderShape::Box {
                center: Vec3::new(-1.5, 0.0, 0.0),
                size: Vec3::splat(0.5),
            },
            body,
        ),
        Collider::new(
            ColliderShape::Sphere {
                center: Vec3::new(-0.5, 0.0, 0.0),
                radius: 0.3,
            },
            body,
        ),
        Collider::new(
            ColliderShape::Capsule {
                center: Vec3::new(0.5, 0.0, 0.0),
                radius: 0.2,
                height: 1.0,
                direction: CapsuleDirection::X,
            },
            body,
        ),
        Collider::new(
            ColliderShape::Bounds(Aabb::from_center_size(
                Vec3::new(1.7, -2.5, 0.0),
                Vec3::new(0.4, 0.6, 0.4),
            )),
            body,
        ),
    ];
    for collider in &colliders {
        overlay.draw_collider(collider, Color::rgb(0.5, 1.0, 0.5));
    }
}
