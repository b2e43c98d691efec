//! # XR Overlay Demos
//!
//! Demo scenes for the debug-drawing overlay.
//!
//! ## Available Demos
//!
//! - `overlay_demo` - Draws every overlay primitive into an SVG file

pub mod scene;
pub mod svg_backend;

pub use scene::draw_showcase;
pub use svg_backend::{SvgBackend, SvgShape};

/// Demos library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
