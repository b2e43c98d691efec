//! Vector text on top of the built-in [`Font`](crate::Font).
//!
//! Glyphs sit in the local XY plane with their bottom-left corner at the
//! cursor; `scale` sizes one glyph cell.

use glam::{Quat, Vec2, Vec3};
use xr_overlay_core::math::trs;

use crate::backend::RenderBackend;
use crate::batch::BatchWriter;
use crate::context::{DrawContext, Geometry, LineStyle};
use crate::font::Glyph;

impl<B: RenderBackend> DrawContext<B> {
    /// Draw one character. Characters without a glyph draw nothing.
    pub fn draw_char(
        &mut self,
        c: char,
        bottom_left: Vec3,
        rotation: Quat,
        scale: Vec2,
        style: impl Into<LineStyle>,
    ) {
        if self.font().glyph(c).is_none() {
            return;
        }
        let Some((mut lines, mut geometry)) = self.lines(style.into()) else {
            return;
        };
        let font = geometry.font;
        if let Some(glyph) = font.glyph(c) {
            draw_glyph(&mut lines, &mut geometry, glyph, bottom_left, rotation, scale);
        }
    }

    /// Draw a string starting at `bottom_left`.
    ///
    /// A space advances the cursor by one cell. A newline returns the cursor
    /// to the start of the line and moves that start one line down. Other
    /// characters without a glyph are skipped without advancing.
    pub fn draw_string(
        &mut self,
        s: &str,
        bottom_left: Vec3,
        rotation: Quat,
        scale: Vec2,
        style: impl Into<LineStyle>,
    ) {
        if s.trim().is_empty() {
            return;
        }
        let Some((mut lines, mut geometry)) = self.lines(style.into()) else {
            return;
        };

        let shift = scale * geometry.config.cursor_shift;
        let advance = rotation * Vec3::X * shift.x;
        let line_feed = rotation * Vec3::Y * shift.y;
        let font = geometry.font;
        let reserve = font.max_segments();

        let mut line_start = bottom_left;
        let mut cursor = bottom_left;

        for c in s.chars() {
            match c {
                ' ' => {
                    cursor += advance;
                    continue;
                }
                '\n' => {
                    line_start -= line_feed;
                    cursor = line_start;
                    continue;
                }
                _ => {}
            }

            let Some(glyph) = font.glyph(c) else {
                continue;
            };

            lines.reserve(reserve);
            draw_glyph(&mut lines, &mut geometry, glyph, cursor, rotation, scale);
            cursor += advance;
        }
    }

    /// [`draw_string`](Self::draw_string) with the configured text scale.
    pub fn draw_text(&mut self, s: &str, bottom_left: Vec3, rotation: Quat, style: impl Into<LineStyle>) {
        let scale = self.config().text_scale;
        self.draw_string(s, bottom_left, rotation, scale, style);
    }
}

fn draw_glyph<B: RenderBackend>(
    lines: &mut BatchWriter<'_, B>,
    geometry: &mut Geometry<'_>,
    glyph: &Glyph,
    bottom_left: Vec3,
    rotation: Quat,
    scale: Vec2,
) {
    let transform = trs(bottom_left, rotation, scale.extend(1.0));
    let points = geometry.transformed(transform, glyph.segment_points());
    for pair in points.chunks_exact(2) {
        lines.line(pair[0], pair[1]);
    }
}
