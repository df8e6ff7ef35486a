use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while building a shape string.
#[derive(Error, Debug)]
pub enum GlyphError {
    /// The requested glyph size is not a finite, positive number.
    #[error("invalid text size {size}: size must be a finite number greater than zero")]
    InvalidSize { size: f64 },

    /// The font's em square is not a finite, positive number.
    #[error("invalid units per em {units_per_em}: must be a finite number greater than zero")]
    InvalidUnitsPerEm { units_per_em: f64 },

    #[error("text is empty")]
    EmptyText,

    /// The font file could not be read from disk.
    #[error("failed to read font file {path}: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The font data could not be parsed.
    #[error("invalid font data in {path}: {reason}")]
    FontParse { path: PathBuf, reason: String },

    /// The text produced no usable geometry at all.
    #[error("string {text:?} has no wires")]
    NoWires { text: String },
}

/// Recoverable geometric validation failure raised by a face-building strategy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FaceBuildError {
    #[error("no usable closed wires to build faces from")]
    NoClosedWires,

    #[error("wire is not closed")]
    OpenWire,

    #[error("wire has fewer than three distinct points")]
    TooFewPoints,

    #[error("face has zero area")]
    ZeroArea,

    #[error("wire intersects itself")]
    SelfIntersecting,

    #[error("wires {first} and {second} intersect")]
    IntersectingWires { first: usize, second: usize },

    #[error("hole lies outside its outer boundary")]
    HoleOutsideOuter,

    #[error("wire {index} has no enclosing outer wire")]
    UnresolvedNesting { index: usize },

    #[error("boolean construction produced no faces")]
    EmptyResult,
}

pub type Result<T> = std::result::Result<T, GlyphError>;
