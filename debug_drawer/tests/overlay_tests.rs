//! End-to-end overlay tests against the recording backend.
//!
//! Every test drives a [`DrawContext`] through its public entry points and
//! inspects what reached the backend.
//!
//! # Running These Tests
//!
//! ```bash
//! cargo test -p xr-overlay-debug-drawer --test overlay_tests
//! ```

use std::cell::Cell;
use std::rc::Rc;

use glam::{Mat4, Quat, Vec2, Vec3};
use rstest::rstest;

use xr_overlay_debug_drawer::{
    edges, CapsuleDirection, Collider, ColliderShape, Color, DrawContext, InstanceTransform,
    LineStyle, MeshKind, OverlayConfig, OverlayResources, RecordingBackend, RenderBackend,
    Submission, Transform, MAX_INSTANCES,
};

const EPS: f32 = 1e-4;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn overlay() -> DrawContext<RecordingBackend> {
    overlay_with(OverlayConfig::default())
}

fn overlay_with(config: OverlayConfig) -> DrawContext<RecordingBackend> {
    init_logging();
    DrawContext::new(RecordingBackend::new(), OverlayResources::tagged(()), config)
        .expect("recording backend supports instancing")
}

/// Polyline with `n` unit-length segments.
fn zigzag(n: usize) -> Vec<Vec3> {
    (0..=n)
        .map(|i| Vec3::new(i as f32, (i % 2) as f32, 0.0))
        .collect()
}

/// A primitive exercised by the shared invariant tests below.
#[derive(Debug, Clone, Copy)]
enum Primitive {
    Line,
    Point,
    Circle,
    Rectangle,
    WireSphere,
    WireHemisphere,
    WireCapsule,
    WireCube,
    Arrow,
    Pointer,
    Text,
}

impl Primitive {
    fn draw(self, ctx: &mut DrawContext<RecordingBackend>, style: LineStyle) {
        let rotation = Quat::from_rotation_y(0.3);
        match self {
            Self::Line => ctx.draw_line(Vec3::ZERO, Vec3::ONE, style),
            Self::Point => ctx.draw_point(Vec3::ONE, 0.2, style),
            Self::Circle => ctx.draw_circle(Vec3::ONE, rotation, 0.5, style),
            Self::Rectangle => ctx.draw_rectangle(Vec3::ONE, rotation, Vec2::new(1.0, 2.0), style),
            Self::WireSphere => ctx.draw_wire_sphere(Vec3::ONE, 0.5, style),
            Self::WireHemisphere => ctx.draw_wire_hemisphere(Vec3::ONE, rotation, 0.5, style),
            Self::WireCapsule => ctx.draw_wire_capsule(Vec3::ONE, rotation, 0.25, 2.0, style),
            Self::WireCube => ctx.draw_wire_cube(Vec3::ONE, rotation, Vec3::ONE, style),
            Self::Arrow => ctx.draw_arrow(Vec3::ONE, rotation, 1.0, style),
            Self::Pointer => ctx.draw_pointer(Vec3::ZERO, Vec3::X, 1.0, style),
            Self::Text => ctx.draw_string("XR 42", Vec3::ZERO, rotation, Vec2::splat(0.1), style),
        }
    }

    fn segments(self) -> usize {
        match self {
            Self::Line => 1,
            Self::Point => 3,
            Self::Circle => 24,
            Self::Rectangle | Self::Arrow => 4,
            Self::WireSphere => edges::SPHERE_EDGES,
            Self::WireHemisphere => edges::HEMISPHERE_EDGES,
            Self::WireCapsule => edges::CAPSULE_EDGES,
            Self::WireCube => edges::CUBE_EDGES,
            Self::Pointer => 5,
            // X: 2, R: 5, 4: 3, 2: 5
            Self::Text => 15,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-primitive invariants
// ---------------------------------------------------------------------------

#[rstest]
#[case::line(Primitive::Line)]
#[case::point(Primitive::Point)]
#[case::circle(Primitive::Circle)]
#[case::rectangle(Primitive::Rectangle)]
#[case::wire_sphere(Primitive::WireSphere)]
#[case::wire_hemisphere(Primitive::WireHemisphere)]
#[case::wire_capsule(Primitive::WireCapsule)]
#[case::wire_cube(Primitive::WireCube)]
#[case::arrow(Primitive::Arrow)]
#[case::pointer(Primitive::Pointer)]
#[case::text(Primitive::Text)]
fn test_primitive_is_one_instanced_submission(#[case] primitive: Primitive) {
    let mut ctx = overlay();
    primitive.draw(&mut ctx, Color::CYAN.into());

    let backend = ctx.backend();
    assert_eq!(backend.color_writes(), 1);
    assert_eq!(backend.batch_sizes(), vec![primitive.segments()]);

    let submission = &backend.submissions()[0];
    assert_eq!(submission.color(), Color::CYAN);
    assert_eq!(submission.mesh(), MeshKind::Cube);

    let stats = ctx.frame_stats();
    assert_eq!(stats.draw_calls, 1);
    assert_eq!(stats.instances, primitive.segments());
    assert_eq!(stats.degenerate_segments, 0);
}

#[rstest]
#[case::line(Primitive::Line)]
#[case::wire_sphere(Primitive::WireSphere)]
#[case::wire_capsule(Primitive::WireCapsule)]
#[case::text(Primitive::Text)]
fn test_primitive_disabled_is_noop(#[case] primitive: Primitive) {
    let mut ctx = overlay();
    ctx.set_enabled(false);
    primitive.draw(&mut ctx, Color::CYAN.into());

    assert!(ctx.backend().submissions().is_empty());
    assert_eq!(ctx.backend().color_writes(), 0);
}

#[rstest]
#[case::line(Primitive::Line)]
#[case::wire_cube(Primitive::WireCube)]
#[case::text(Primitive::Text)]
fn test_primitive_after_shutdown_is_noop(#[case] primitive: Primitive) {
    let mut ctx = overlay();
    ctx.shutdown();
    primitive.draw(&mut ctx, Color::CYAN.into());

    assert!(ctx.backend().submissions().is_empty());
    assert_eq!(ctx.backend().releases(), 1);
}

#[rstest]
#[case::default_thickness(None, 0.003)]
#[case::explicit_thickness(Some(0.02), 0.02)]
fn test_line_thickness(#[case] thickness: Option<f32>, #[case] expected: f32) {
    let mut ctx = overlay();
    let style = LineStyle {
        color: Color::WHITE,
        thickness,
    };
    ctx.draw_wire_cube(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE, style);

    let Submission::Instanced { transforms, .. } = &ctx.backend().submissions()[0] else {
        panic!("expected an instanced submission");
    };
    for t in transforms {
        let (scale, _, _) = t.matrix().to_scale_rotation_translation();
        assert!((scale.x - expected).abs() < 1e-6);
        assert!((scale.y - expected).abs() < 1e-6);
        assert!((scale.z - 1.0).abs() < EPS);
    }
}

#[test]
fn test_configured_thickness() {
    let config = OverlayConfig::from_ron("(line_thickness: 0.01)").unwrap();
    let mut ctx = overlay_with(config);
    ctx.draw_line(Vec3::ZERO, Vec3::X, Color::WHITE);

    let Submission::Instanced { transforms, .. } = &ctx.backend().submissions()[0] else {
        panic!("expected an instanced submission");
    };
    let (scale, _, _) = transforms[0].matrix().to_scale_rotation_translation();
    assert!((scale.x - 0.01).abs() < 1e-6);
}

// ---------------------------------------------------------------------------
// Batching
// ---------------------------------------------------------------------------

#[rstest]
#[case::under_capacity(10, vec![10])]
#[case::exact_capacity(MAX_INSTANCES, vec![MAX_INSTANCES])]
#[case::one_over(MAX_INSTANCES + 1, vec![MAX_INSTANCES, 1])]
#[case::overflow(1500, vec![1023, 477])]
#[case::several_batches(3000, vec![1023, 1023, 954])]
fn test_line_list_batches(#[case] segments: usize, #[case] expected: Vec<usize>) {
    let mut ctx = overlay();
    let points = zigzag(segments);
    ctx.draw_line_list(&points, false, None, Color::RED);

    assert_eq!(ctx.backend().batch_sizes(), expected);
    assert_eq!(ctx.backend().total_instances(), segments);
    assert_eq!(ctx.backend().color_writes(), 1);
    assert!(ctx.backend().submissions().iter().all(|s| s.color() == Color::RED));

    // segments stay in order across submissions
    let lines = ctx.backend().lines();
    for (i, (a, b)) in lines.iter().enumerate() {
        assert!(a.abs_diff_eq(points[i], EPS));
        assert!(b.abs_diff_eq(points[i + 1], EPS));
    }
}

#[test]
fn test_closed_loop_after_flush() {
    let mut ctx = overlay();
    let points = zigzag(MAX_INSTANCES);
    ctx.draw_line_list(&points, true, None, Color::RED);

    assert_eq!(ctx.backend().batch_sizes(), vec![MAX_INSTANCES, 1]);
    let lines = ctx.backend().lines();
    let (a, b) = lines[lines.len() - 1];
    assert!(a.abs_diff_eq(points[points.len() - 1], EPS));
    assert!(b.abs_diff_eq(points[0], EPS));
}

#[test]
fn test_batch_is_empty_between_calls() {
    let mut ctx = overlay();
    ctx.draw_line_list(&zigzag(1100), false, None, Color::RED);
    ctx.draw_line(Vec3::ZERO, Vec3::Y, Color::BLUE);

    let submissions = ctx.backend().submissions();
    assert_eq!(ctx.backend().batch_sizes(), vec![1023, 77, 1]);
    assert_eq!(submissions[2].color(), Color::BLUE);
}

// ---------------------------------------------------------------------------
// Frame lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_frame_stats_reset() {
    let mut ctx = overlay();

    ctx.begin_frame();
    ctx.draw_wire_sphere(Vec3::ZERO, 1.0, Color::WHITE);
    ctx.draw_sphere(Vec3::ZERO, 1.0, Color::WHITE);
    ctx.draw_line(Vec3::ONE, Vec3::ONE, Color::WHITE);

    let stats = ctx.frame_stats();
    assert_eq!(stats.draw_calls, 2);
    assert_eq!(stats.instances, edges::SPHERE_EDGES + 1);
    assert_eq!(stats.degenerate_segments, 1);

    ctx.begin_frame();
    assert_eq!(ctx.frame_stats(), Default::default());
}

/// Backend that only counts buffer releases, shared with the test body.
struct ReleaseCounter(Rc<Cell<usize>>);

impl RenderBackend for ReleaseCounter {
    type Mesh = MeshKind;
    type Material = ();

    fn set_color(&mut self, _material: &(), _color: Color) {}

    fn submit_one(&mut self, _material: &(), _mesh: &MeshKind, _sub_mesh: u32, _transform: &Mat4) {}

    fn submit_instanced(
        &mut self,
        _material: &(),
        _mesh: &MeshKind,
        _sub_mesh: u32,
        _transforms: &[InstanceTransform],
    ) {
    }

    fn release_instance_buffer(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[rstest]
#[case::dropped_live(false)]
#[case::shut_down_then_dropped(true)]
fn test_instance_buffer_released_once(#[case] shutdown: bool) {
    init_logging();
    let releases = Rc::new(Cell::new(0));
    let mut ctx = DrawContext::new(
        ReleaseCounter(releases.clone()),
        OverlayResources::tagged(()),
        OverlayConfig::default(),
    )
    .unwrap();

    ctx.draw_line(Vec3::ZERO, Vec3::X, Color::WHITE);
    if shutdown {
        ctx.shutdown();
        assert_eq!(releases.get(), 1);
    }
    drop(ctx);
    assert_eq!(releases.get(), 1);
}

#[test]
fn test_disabled_by_config() {
    let config = OverlayConfig {
        enabled: false,
        ..Default::default()
    };
    let mut ctx = overlay_with(config);
    ctx.draw_line(Vec3::ZERO, Vec3::X, Color::WHITE);
    assert!(ctx.backend().submissions().is_empty());

    ctx.set_enabled(true);
    ctx.draw_line(Vec3::ZERO, Vec3::X, Color::WHITE);
    assert_eq!(ctx.backend().submissions().len(), 1);
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

#[rstest]
#[case::identity(Quat::IDENTITY)]
#[case::turned(Quat::from_rotation_y(1.0))]
#[case::tilted(Quat::from_euler(glam::EulerRot::XYZ, 0.3, -0.7, 0.2))]
fn test_string_equals_chars_plus_advance(#[case] rotation: Quat) {
    let origin = Vec3::new(0.5, 1.0, -2.0);
    let scale = Vec2::new(0.1, 0.2);

    let mut text = overlay();
    text.draw_string("A B", origin, rotation, scale, Color::WHITE);

    let mut chars = overlay();
    chars.draw_char('A', origin, rotation, scale, Color::WHITE);
    let advance = rotation * Vec3::X * (scale.x * 1.15);
    chars.draw_char('B', origin + advance * 2.0, rotation, scale, Color::WHITE);

    let expected = chars.backend().lines();
    let actual = text.backend().lines();
    assert_eq!(actual.len(), expected.len());
    for ((a0, a1), (e0, e1)) in actual.iter().zip(&expected) {
        assert!(a0.abs_diff_eq(*e0, EPS));
        assert!(a1.abs_diff_eq(*e1, EPS));
    }
    assert_eq!(text.backend().batch_sizes().len(), 1);
}

#[test]
fn test_long_text_flushes_on_glyph_boundaries() {
    let mut ctx = overlay();
    let text = "THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG 0123456789\n".repeat(10);
    ctx.draw_text(&text, Vec3::ZERO, Quat::IDENTITY, Color::WHITE);

    let font = ctx.font();
    let total: usize = text
        .chars()
        .filter_map(|c| font.glyph(c))
        .map(|g| g.segment_count())
        .sum();

    let sizes = ctx.backend().batch_sizes();
    assert!(sizes.len() > 1);
    assert_eq!(sizes.iter().sum::<usize>(), total);
    assert!(sizes.iter().all(|&n| n <= MAX_INSTANCES));
}

// ---------------------------------------------------------------------------
// Colliders
// ---------------------------------------------------------------------------

#[rstest]
#[case::cube(ColliderShape::Box { center: Vec3::ZERO, size: Vec3::ONE }, edges::CUBE_EDGES)]
#[case::sphere(ColliderShape::Sphere { center: Vec3::ZERO, radius: 0.5 }, edges::SPHERE_EDGES)]
#[case::capsule(
    ColliderShape::Capsule {
        center: Vec3::ZERO,
        radius: 0.25,
        height: 2.0,
        direction: CapsuleDirection::Z,
    },
    edges::CAPSULE_EDGES
)]
fn test_collider_outline(#[case] shape: ColliderShape, #[case] segments: usize) {
    let pose = Transform::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_z(0.5), Vec3::splat(2.0));
    let mut ctx = overlay();
    ctx.draw_collider(&Collider::new(shape, pose), Color::GREEN);

    assert_eq!(ctx.backend().batch_sizes(), vec![segments]);
}
