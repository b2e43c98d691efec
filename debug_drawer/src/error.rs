//! Overlay error types.
//!
//! Only setup can fail. Drawing never returns an error: degenerate input is
//! skipped instead.

use std::path::PathBuf;

/// Errors raised while creating a [`DrawContext`](crate::DrawContext) or
/// loading its configuration.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("failed to read overlay config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse overlay config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    #[error("invalid overlay config: {0}")]
    InvalidConfig(String),

    #[error("glyph {glyph:?}: {source}")]
    Glyph {
        glyph: char,
        #[source]
        source: GlyphError,
    },

    #[error("glyph {0:?} is defined more than once")]
    DuplicateGlyph(char),

    #[error("overlay material does not support instanced rendering")]
    InstancingUnsupported,
}

/// Problems in a glyph stroke description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GlyphError {
    #[error("token {token:?} is not a pair of digits")]
    MalformedToken { token: String },

    #[error("coordinate digit '{digit}' is outside 0..=8")]
    DigitOutOfRange { digit: char },

    #[error("stroke {stroke} has no points")]
    EmptyStroke { stroke: usize },
}
