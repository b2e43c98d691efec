//! Built-in stroke font.
//!
//! Each glyph is described on a 9x9 grid. A point is two digits `xy` with
//! both coordinates in `0..=8`, so `"48"` is the point (0.5, 1.0) once
//! normalized. Points are separated by whitespace; `:` lifts the pen and
//! starts a new stroke.
//!
//! Glyph shapes follow the arcade font from
//! <https://github.com/coolbutuseless/arcadefont>.

use std::collections::HashMap;

use glam::{Vec2, Vec3};

use crate::error::{GlyphError, OverlayError};

/// Grid steps per unit.
const GRID: f32 = 8.0;

#[rustfmt::skip]
const ARCADE_GLYPHS: &[(char, &str)] = &[
    ('A', "00 06 48 86 80:03 83"),
    ('B', "00 08 58 76 54 04:64 82 60 00"),
    ('C', "88 08 00 80"),
    ('D', "00 08 58 85 83 50 00"),
    ('E', "88 08 00 80:04 64"),
    ('F', "88 08 00:04 64"),
    ('G', "88 08 00 80 83 43"),
    ('H', "00 08:80 88:04 84"),
    ('I', "00 80:08 88:40 48"),
    ('J', "88 80 40 03"),
    ('K', "00 08:88 04 80"),
    ('L', "08 00 80"),
    ('M', "00 08 45 88 80"),
    ('N', "00 08 80 88"),
    ('O', "00 80 88 08 00"),
    ('P', "00 08 88 84 04"),
    ('Q', "00 08 88 83 40 00:43 80"),
    ('R', "00 08 88 84 04 80"),
    ('S', "00 80 84 04 08 88"),
    ('T', "08 88:40 48"),
    ('U', "08 00 80 88"),
    ('V', "08 40 88"),
    ('W', "08 00 43 80 88"),
    ('X', "00 88:08 80"),
    ('Y', "08 45 88:45 40"),
    ('Z', "08 88 00 80"),
    ('0', "00 06 28 88 82 60 00"),
    ('1', "00 80:40 48 26"),
    ('2', "08 88 84 04 00 80"),
    ('3', "08 88 80 00:04 84"),
    ('4', "08 04 84:88 80"),
    ('5', "00 80 84 04 08 88"),
    ('6', "08 00 80 84 04"),
    ('7', "08 88 86 54 50"),
    ('8', "00 08 88 80 00:04 84"),
    ('9', "80 88 08 04 84"),
    ('.', "00 01 11 10 00"),
    (',', "01 02 12 11 01:11 00"),
    ('-', "14 74"),
    ('=', "13 73:15 75"),
    ('!', "00 01 11 10 00:03 08 18 13 03"),
    ('?', "06 08 88 84 44 40"),
    (':', "02 03 13 12 02:05 06 16 15 05"),
    (';', "02 03 13 12 02:05 06 16 15 05:12 00"),
    ('#', "03 83:05 85:30 38:50 58"),
    ('\'', "07 08 18 17 07:17 05"),
    ('"', "07 08 18 17 07:17 05:27 28 38 37 27:37 25"),
    ('[', "28 08 00 20"),
    (']', "08 28 20 00"),
    ('(', "28 04 20"),
    (')', "08 24 00"),
    ('{', "28 04 20"),
    ('}', "08 24 00"),
    ('$', "01 81 84 04 07 87:40 48"),
    ('+', "41 47:14 74"),
    ('\\', "08 80"),
    ('/', "00 88"),
    ('*', "41 47:14 74:22 66:26 62"),
    ('%', "00 88:18 28 27 17 18:70 71 61 60 70"),
    ('^', "26 48 66"),
    ('|', "40 48"),
    ('_', "00 80"),
    ('<', "87 04 81"),
    ('>', "07 84 01"),
    ('&', "80 47 58 67 21 30 60 82"),
    ('@', "71 60 20 02 06 28 68 86 84 62 22 24 36 66 62"),
];

/// Stroke geometry of one character in the unit square.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    strokes: Vec<Vec<Vec2>>,
    /// Segment endpoints, two entries per segment, in the z = 0 plane.
    segments: Vec<Vec3>,
}

impl Glyph {
    /// Parse a stroke description.
    pub fn parse(description: &str) -> Result<Self, GlyphError> {
        let mut strokes = Vec::new();

        for (index, stroke) in description.split(':').enumerate() {
            let points = stroke
                .split_whitespace()
                .map(parse_point)
                .collect::<Result<Vec<_>, _>>()?;

            if points.is_empty() {
                return Err(GlyphError::EmptyStroke { stroke: index });
            }
            strokes.push(points);
        }

        let segments = strokes
            .iter()
            .flat_map(|stroke| stroke.windows(2))
            .flat_map(|pair| [pair[0].extend(0.0), pair[1].extend(0.0)])
            .collect();

        Ok(Self { strokes, segments })
    }

    /// Pen-down polylines, in drawing order.
    pub fn strokes(&self) -> &[Vec<Vec2>] {
        &self.strokes
    }

    /// Flattened segment endpoints: entries `2i` and `2i + 1` form segment `i`.
    pub fn segment_points(&self) -> &[Vec3] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len() / 2
    }
}

fn parse_point(token: &str) -> Result<Vec2, GlyphError> {
    let mut chars = token.chars();
    let (Some(x), Some(y), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(GlyphError::MalformedToken {
            token: token.to_owned(),
        });
    };
    Ok(Vec2::new(parse_digit(x, token)?, parse_digit(y, token)?) / GRID)
}

fn parse_digit(digit: char, token: &str) -> Result<f32, GlyphError> {
    match digit.to_digit(10) {
        Some(d) if d <= GRID as u32 => Ok(d as f32),
        Some(_) => Err(GlyphError::DigitOutOfRange { digit }),
        None => Err(GlyphError::MalformedToken {
            token: token.to_owned(),
        }),
    }
}

/// Character to glyph map.
///
/// Lowercase ASCII letters resolve to the uppercase glyph.
#[derive(Debug, Clone)]
pub struct Font {
    glyphs: Vec<Glyph>,
    lookup: HashMap<char, usize>,
    max_segments: usize,
}

impl Font {
    /// The built-in arcade font: A-Z, 0-9 and common punctuation.
    pub fn arcade() -> Result<Self, OverlayError> {
        Self::from_table(ARCADE_GLYPHS)
    }

    fn from_table(table: &[(char, &str)]) -> Result<Self, OverlayError> {
        let mut glyphs = Vec::with_capacity(table.len());
        let mut lookup = HashMap::with_capacity(table.len() + 26);

        for &(c, description) in table {
            let glyph = Glyph::parse(description)
                .map_err(|source| OverlayError::Glyph { glyph: c, source })?;
            if lookup.insert(c, glyphs.len()).is_some() {
                return Err(OverlayError::DuplicateGlyph(c));
            }
            glyphs.push(glyph);
        }

        let aliases: Vec<_> = lookup
            .iter()
            .filter(|(c, _)| c.is_ascii_uppercase())
            .map(|(c, &index)| (c.to_ascii_lowercase(), index))
            .collect();
        for (lower, index) in aliases {
            lookup.entry(lower).or_insert(index);
        }

        let max_segments = glyphs.iter().map(Glyph::segment_count).max().unwrap_or(0);

        log::debug!(
            "parsed {} glyphs ({} keys), longest glyph has {} segments",
            glyphs.len(),
            lookup.len(),
            max_segments
        );

        Ok(Self {
            glyphs,
            lookup,
            max_segments,
        })
    }

    #[inline]
    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        self.lookup.get(&c).map(|&index| &self.glyphs[index])
    }

    /// Segment count of the longest glyph.
    #[inline]
    pub fn max_segments(&self) -> usize {
        self.max_segments
    }

    /// Number of characters with a glyph, counting lowercase aliases.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_a() {
        let glyph = Glyph::parse("00 06 48 86 80:03 83").unwrap();

        assert_eq!(glyph.strokes().len(), 2);
        assert_eq!(
            glyph.strokes()[0],
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(0.0, 0.75),
                Vec2::new(0.5, 1.0),
                Vec2::new(1.0, 0.75),
                Vec2::new(1.0, 0.0),
            ]
        );
        assert_eq!(
            glyph.strokes()[1],
            vec![Vec2::new(0.0, 0.375), Vec2::new(1.0, 0.375)]
        );

        assert_eq!(glyph.segment_count(), 5);
        let points = glyph.segment_points();
        assert_eq!(points.len(), 10);
        assert_eq!(points[0], Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(points[1], Vec3::new(0.0, 0.75, 0.0));
        assert_eq!(points[2], Vec3::new(0.0, 0.75, 0.0));
        // no segment joins the end of stroke 1 to the start of stroke 2
        assert_eq!(points[7], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(points[8], Vec3::new(0.0, 0.375, 0.0));
        assert_eq!(points[9], Vec3::new(1.0, 0.375, 0.0));
    }

    #[test]
    fn test_single_point_stroke_has_no_segments() {
        let glyph = Glyph::parse("44").unwrap();
        assert_eq!(glyph.strokes().len(), 1);
        assert_eq!(glyph.segment_count(), 0);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Glyph::parse("00 09"),
            Err(GlyphError::DigitOutOfRange { digit: '9' })
        );
        assert_eq!(
            Glyph::parse("00 0x"),
            Err(GlyphError::MalformedToken {
                token: "0x".to_owned()
            })
        );
        assert_eq!(
            Glyph::parse("00 123"),
            Err(GlyphError::MalformedToken {
                token: "123".to_owned()
            })
        );
        assert_eq!(
            Glyph::parse("00 11::22"),
            Err(GlyphError::EmptyStroke { stroke: 1 })
        );
    }

    #[test]
    fn test_arcade_font() {
        let font = Font::arcade().unwrap();

        assert_eq!(font.len(), ARCADE_GLYPHS.len() + 26);
        assert!(font.glyph('A').is_some());
        assert!(font.glyph('~').is_none());
        assert!(font.glyph(' ').is_none());

        // lowercase resolves to the very same glyph
        for c in 'a'..='z' {
            let lower = font.glyph(c).unwrap();
            let upper = font.glyph(c.to_ascii_uppercase()).unwrap();
            assert!(std::ptr::eq(lower, upper));
        }
    }

    #[test]
    fn test_max_segments() {
        let font = Font::arcade().unwrap();
        // '@' is a single 15-point stroke
        assert_eq!(font.glyph('@').unwrap().segment_count(), 14);
        assert_eq!(font.max_segments(), 14);
    }

    #[test]
    fn test_duplicate_glyph_rejected() {
        let err = Font::from_table(&[('A', "00 88"), ('A', "00 80")]).unwrap_err();
        assert!(matches!(err, OverlayError::DuplicateGlyph('A')));
    }
}
