//! Overlay configuration.
//!
//! Every field has a default, so a config file only needs to list what it
//! changes:
//!
//! ```ron
//! (
//!     line_thickness: 0.005,
//!     text_scale: (0.2, 0.2),
//! )
//! ```

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::OverlayError;
use crate::{DEFAULT_CURSOR_SHIFT, DEFAULT_LINE_THICKNESS, DEFAULT_POINT_SIZE, DEFAULT_TEXT_SCALE};

/// Settings applied when a [`DrawContext`](crate::DrawContext) is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Initial value of the runtime enable flag.
    pub enabled: bool,
    /// Thickness used when a [`LineStyle`](crate::LineStyle) leaves it unset.
    pub line_thickness: f32,
    /// Cursor advance between characters and lines, in glyph units.
    pub cursor_shift: Vec2,
    /// Marker size used by [`draw_point_default`](crate::DrawContext::draw_point_default).
    pub point_size: f32,
    /// Glyph scale used by [`draw_text`](crate::DrawContext::draw_text).
    pub text_scale: Vec2,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            line_thickness: DEFAULT_LINE_THICKNESS,
            cursor_shift: DEFAULT_CURSOR_SHIFT,
            point_size: DEFAULT_POINT_SIZE,
            text_scale: DEFAULT_TEXT_SCALE,
        }
    }
}

impl OverlayConfig {
    /// Parse and validate RON text.
    pub fn from_ron(text: &str) -> Result<Self, OverlayError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OverlayError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| OverlayError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron(&text)?;
        log::debug!("loaded overlay config from {}", path.display());
        Ok(config)
    }

    /// Reject sizes that would produce invisible or non-finite geometry.
    pub fn validate(&self) -> Result<(), OverlayError> {
        positive("line_thickness", self.line_thickness)?;
        positive("point_size", self.point_size)?;
        positive("cursor_shift.x", self.cursor_shift.x)?;
        positive("cursor_shift.y", self.cursor_shift.y)?;
        positive("text_scale.x", self.text_scale.x)?;
        positive("text_scale.y", self.text_scale.y)?;
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> Result<(), OverlayError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(OverlayError::InvalidConfig(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}
