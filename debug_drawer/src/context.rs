use glam::{Mat4, Vec3};
use xr_overlay_core::Color;

use crate::backend::{MeshKind, OverlayResources, RenderBackend};
use crate::batch::{BatchWriter, InstanceBatch};
use crate::config::OverlayConfig;
use crate::error::OverlayError;
use crate::font::Font;
use crate::stats::FrameStats;
use crate::unit_shapes::UnitShapes;
use crate::MAX_INSTANCES;

/// Color and optional thickness for line-based primitives.
///
/// A `None` thickness resolves to [`OverlayConfig::line_thickness`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub thickness: Option<f32>,
}

impl LineStyle {
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            thickness: None,
        }
    }

    pub const fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = Some(thickness);
        self
    }
}

impl From<Color> for LineStyle {
    fn from(color: Color) -> Self {
        Self::new(color)
    }
}

/// Immediate-mode overlay drawer.
///
/// Owns everything a draw call needs: the precomputed unit shapes, the
/// parsed font, the single instance batch and the backend it submits to.
/// Every draw entry point takes `&mut self`; there is exactly one writer.
///
/// Draw calls do nothing while the context is disabled, after
/// [`shutdown`](Self::shutdown), or when the crate is built without the
/// `overlay` feature.
pub struct DrawContext<B: RenderBackend> {
    config: OverlayConfig,
    shapes: UnitShapes,
    font: Font,
    scratch: Vec<Vec3>,
    batch: InstanceBatch,
    backend: B,
    resources: OverlayResources<B>,
    stats: FrameStats,
    enabled: bool,
    live: bool,
    warned_after_shutdown: bool,
}

/// Read-only shape data plus the scratch point buffer, borrowed next to a
/// [`BatchWriter`] for the duration of one draw call.
pub(crate) struct Geometry<'a> {
    pub shapes: &'a UnitShapes,
    pub font: &'a Font,
    pub config: &'a OverlayConfig,
    scratch: &'a mut Vec<Vec3>,
}

impl Geometry<'_> {
    /// Map `points` through `transform` into the scratch buffer.
    pub fn transformed(&mut self, transform: Mat4, points: &[Vec3]) -> &[Vec3] {
        self.scratch.clear();
        self.scratch
            .extend(points.iter().map(|&p| transform.transform_point3(p)));
        self.scratch
    }

    /// Scratch buffer for callers that build points by hand.
    pub fn scratch(&mut self) -> &mut Vec<Vec3> {
        self.scratch.clear();
        self.scratch
    }
}

impl<B: RenderBackend> DrawContext<B> {
    /// Validate `config`, build the unit shapes and font and allocate the
    /// instance buffer.
    pub fn new(
        backend: B,
        resources: OverlayResources<B>,
        config: OverlayConfig,
    ) -> Result<Self, OverlayError> {
        config.validate()?;

        if !backend.supports_instancing(&resources.material) {
            return Err(OverlayError::InstancingUnsupported);
        }

        let shapes = UnitShapes::build();
        let font = Font::arcade()?;

        log::debug!(
            "overlay ready: {} instances per batch, enabled = {}",
            MAX_INSTANCES,
            config.enabled
        );

        Ok(Self {
            enabled: config.enabled,
            config,
            shapes,
            font,
            scratch: Vec::with_capacity(MAX_INSTANCES),
            batch: InstanceBatch::new(),
            backend,
            resources,
            stats: FrameStats::default(),
            live: true,
            warned_after_shutdown: false,
        })
    }

    /// Reset the per-frame counters.
    pub fn begin_frame(&mut self) {
        self.stats = FrameStats::default();
    }

    /// Counters accumulated since the last [`begin_frame`](Self::begin_frame).
    pub fn frame_stats(&self) -> FrameStats {
        self.stats
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Release the instance buffer. Later draw calls are no-ops.
    pub fn shutdown(&mut self) {
        if !self.live {
            return;
        }
        self.live = false;
        self.backend.release_instance_buffer();
        log::debug!("overlay shut down");
    }

    /// Whether draw calls currently reach the backend.
    fn active(&mut self) -> bool {
        if !cfg!(feature = "overlay") || !self.enabled {
            return false;
        }
        if !self.live {
            if !self.warned_after_shutdown {
                log::warn!("overlay draw call after shutdown ignored");
                self.warned_after_shutdown = true;
            }
            return false;
        }
        true
    }

    /// Start a line-based draw call with `style`.
    ///
    /// Returns `None` when the context is inactive.
    pub(crate) fn lines(&mut self, style: LineStyle) -> Option<(BatchWriter<'_, B>, Geometry<'_>)> {
        if !self.active() {
            return None;
        }

        let thickness = style.thickness.unwrap_or(self.config.line_thickness);
        let writer = BatchWriter::new(
            &mut self.batch,
            &mut self.backend,
            &self.resources.material,
            &self.resources.cube,
            &mut self.stats,
            style.color,
            thickness,
        );
        let geometry = Geometry {
            shapes: &self.shapes,
            font: &self.font,
            config: &self.config,
            scratch: &mut self.scratch,
        };
        Some((writer, geometry))
    }

    /// Draw one copy of `mesh` with `transform`, outside any batch.
    pub(crate) fn solid(&mut self, mesh: MeshKind, color: Color, transform: Mat4) {
        if !self.active() {
            return;
        }

        let material = &self.resources.material;
        self.backend.set_color(material, color);
        self.backend
            .submit_one(material, self.resources.mesh(mesh), 0, &transform);
        self.stats.record_single();
    }
}

impl<B: RenderBackend> Drop for DrawContext<B> {
    fn drop(&mut self) {
        if self.live {
            log::warn!("overlay dropped without shutdown, releasing instance buffer");
            self.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingBackend;

    fn context() -> DrawContext<RecordingBackend> {
        DrawContext::new(
            RecordingBackend::new(),
            OverlayResources::tagged(()),
            OverlayConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_backend_without_instancing() {
        let result = DrawContext::new(
            RecordingBackend::without_instancing(),
            OverlayResources::tagged(()),
            OverlayConfig::default(),
        );
        assert!(matches!(result, Err(OverlayError::InstancingUnsupported)));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = OverlayConfig {
            line_thickness: -1.0,
            ..Default::default()
        };
        let result = DrawContext::new(RecordingBackend::new(), OverlayResources::tagged(()), config);
        assert!(matches!(result, Err(OverlayError::InvalidConfig(_))));
    }

    #[test]
    fn test_initial_enabled_comes_from_config() {
        let config = OverlayConfig {
            enabled: false,
            ..Default::default()
        };
        let ctx = DrawContext::new(RecordingBackend::new(), OverlayResources::tagged(()), config)
            .unwrap();
        assert!(!ctx.is_enabled());
    }

    #[test]
    fn test_shutdown_releases_once() {
        let mut ctx = context();
        ctx.shutdown();
        ctx.shutdown();
        assert_eq!(ctx.backend().releases(), 1);

        assert!(ctx.lines(Color::RED.into()).is_none());
    }

    #[test]
    fn test_line_style_thickness() {
        let style = LineStyle::from(Color::BLUE);
        assert_eq!(style.thickness, None);
        assert_eq!(style.with_thickness(0.01).thickness, Some(0.01));
    }

    #[test]
    fn test_geometry_transformed_reuses_scratch() {
        let mut ctx = context();
        let (_lines, mut geometry) = ctx.lines(Color::WHITE.into()).unwrap();

        let moved = geometry.transformed(
            Mat4::from_translation(Vec3::X),
            &[Vec3::ZERO, Vec3::Y],
        );
        assert_eq!(moved, &[Vec3::X, Vec3::new(1.0, 1.0, 0.0)]);

        let moved = geometry.transformed(Mat4::IDENTITY, &[Vec3::Z]);
        assert_eq!(moved, &[Vec3::Z]);
    }
}
