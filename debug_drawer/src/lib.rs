//! Immediate-mode debug drawing for runtime and XR builds.
//!
//! Draws wireframe shapes, polylines, point markers and vector text every
//! frame. Every line segment is a thin stretched cube, and segments are
//! submitted in instanced batches so thousands of lines cost a handful of
//! draw calls.
//!
//! # Architecture
//!
//! - [`DrawContext`] - Owns shapes, font, batch and backend; every draw entry point lives here
//! - [`RenderBackend`] - Receives finished transforms and issues the actual draw calls
//! - [`UnitShapes`] / [`edges`] - Canonical point sets and the edges that connect them
//! - [`LinePrimitive`] - Endpoints to stretched-cube transform
//! - [`Font`] - Built-in stroke font used by [`DrawContext::draw_string`]
//!
//! # Usage
//!
//! ```ignore
//! // Setup (once)
//! let resources = OverlayResources { cube, sphere, quad, material };
//! let mut overlay = DrawContext::new(backend, resources, OverlayConfig::default())?;
//!
//! // Each frame:
//! overlay.begin_frame();
//! overlay.draw_line(Vec3::ZERO, Vec3::Y, Color::RED);
//! overlay.draw_wire_sphere(target, 0.5, LineStyle::new(Color::GREEN).with_thickness(0.01));
//! overlay.draw_text("HELLO", Vec3::new(0.0, 1.5, 1.0), Quat::IDENTITY, Color::WHITE);
//!
//! // On exit:
//! overlay.shutdown();
//! ```

pub mod backend;
mod batch;
mod collider;
mod config;
mod context;
mod draw_api;
pub mod edges;
mod error;
mod font;
mod segment;
mod stats;
mod text;
pub mod unit_shapes;

pub use backend::{MeshKind, OverlayResources, RecordingBackend, RenderBackend, Submission};
pub use batch::InstanceBatch;
pub use collider::{Aabb, CapsuleDirection, Collider, ColliderShape};
pub use config::OverlayConfig;
pub use context::{DrawContext, LineStyle};
pub use error::{GlyphError, OverlayError};
pub use font::{Font, Glyph};
pub use segment::{InstanceTransform, LinePrimitive};
pub use stats::FrameStats;
pub use unit_shapes::UnitShapes;

pub use xr_overlay_core::{Color, Transform};

use glam::Vec2;

/// Most transforms a single instanced submission may carry.
pub const MAX_INSTANCES: usize = 1023;

/// Line thickness in world units when none is configured.
pub const DEFAULT_LINE_THICKNESS: f32 = 0.003;

/// Cursor advance per character and per line, in glyph cells.
pub const DEFAULT_CURSOR_SHIFT: Vec2 = Vec2::new(1.15, 1.15);

pub const DEFAULT_POINT_SIZE: f32 = 0.1;

pub const DEFAULT_TEXT_SCALE: Vec2 = Vec2::new(0.1, 0.1);

pub const DEFAULT_AXIS_LENGTH: f32 = 0.25;
