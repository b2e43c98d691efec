//! # XR Overlay Core
//!
//! Math and color primitives shared by the overlay crates.

pub mod color;
pub mod math;
pub mod transform;

pub use color::Color;
pub use transform::Transform;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
