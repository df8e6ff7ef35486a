use crate::geometry::Compound;
use crate::justification::{Justification, JustificationReference};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum total face area of the reference glyph at unit size.
///
/// Tuned against the CamBam stick fonts; other fonts may need a different value.
pub const STICKY_FONT_MIN_AREA: f64 = 0.03;
/// Maximum relative difference between the wire and face bounding diagonals.
pub const STICKY_FONT_RELATIVE_TOLERANCE: f64 = 1e-7;
/// Largest accepted oblique angle, in degrees, either direction.
pub const MAX_OBLIQUE_ANGLE: f64 = 80.0;
/// Glyph measured to obtain the cap height.
pub const CAP_HEIGHT_REFERENCE: char = 'M';
/// Glyph rendered to detect sticky fonts.
pub const STICKY_FONT_REFERENCE: char = 'L';
/// Default flattening tolerance as a fraction of the text size.
pub const DEFAULT_FLATTEN_TOLERANCE: f64 = 1e-3;

/// Thresholds deciding whether a font produces usable faces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StickyFontHeuristic {
    pub min_area: f64,
    pub relative_tolerance: f64,
}

impl Default for StickyFontHeuristic {
    fn default() -> Self {
        Self {
            min_area: STICKY_FONT_MIN_AREA,
            relative_tolerance: STICKY_FONT_RELATIVE_TOLERANCE,
        }
    }
}

/// Every input of a shape string build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStringParams {
    pub text: String,
    /// Nominal text height.
    pub size: f64,
    /// Extra distance added after every character.
    pub tracking: f64,
    pub justification: Justification,
    pub justification_reference: JustificationReference,
    /// Keep leading white space and the left side bearing when left aligned.
    pub keep_left_margin: bool,
    /// Scale so the cap height equals `size`.
    pub scale_to_size: bool,
    /// Slant angle in degrees, zero for none.
    pub oblique_angle: f64,
    /// Fill letters with faces.
    pub make_face: bool,
    /// Fuse overlapping faces; slow, rarely needed.
    pub fuse: bool,
    #[serde(default)]
    pub sticky_font: StickyFontHeuristic,
    /// Flattening tolerance relative to `size`.
    #[serde(default = "default_flatten_tolerance")]
    pub flatten_tolerance: f64,
}

fn default_flatten_tolerance() -> f64 {
    DEFAULT_FLATTEN_TOLERANCE
}

impl ShapeStringParams {
    pub fn new(text: impl Into<String>, size: f64) -> Self {
        Self {
            text: text.into(),
            size,
            ..Self::default()
        }
    }

    /// Absolute flattening tolerance for geometry at `size`.
    pub fn tolerance_at(&self, size: f64) -> f64 {
        self.flatten_tolerance * size
    }
}

impl Default for ShapeStringParams {
    fn default() -> Self {
        Self {
            text: String::new(),
            size: 10.0,
            tracking: 0.0,
            justification: Justification::default(),
            justification_reference: JustificationReference::default(),
            keep_left_margin: false,
            scale_to_size: true,
            oblique_angle: 0.0,
            make_face: true,
            fuse: false,
            sticky_font: StickyFontHeuristic::default(),
            flatten_tolerance: DEFAULT_FLATTEN_TOLERANCE,
        }
    }
}

/// A recoverable condition met during a build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// No strategy could build faces for a character; it was left out.
    FaceCreationFailed { character: char, reason: String },
    /// The font does not yield closed areas; wires were emitted instead of faces.
    StickyFontFallback,
    /// The oblique angle was outside the accepted range and was ignored.
    ObliqueAngleOutOfRange { angle: f64 },
    /// The font has no usable cap height reference glyph.
    MissingCapHeightReference { character: char },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::FaceCreationFailed { character, reason } => {
                write!(f, "face creation failed for character {character:?}: {reason}")
            }
            Diagnostic::StickyFontFallback => {
                write!(f, "font does not produce closed areas, faces disabled")
            }
            Diagnostic::ObliqueAngleOutOfRange { angle } => write!(
                f,
                "oblique angle {angle} must be in the -{MAX_OBLIQUE_ANGLE} to +{MAX_OBLIQUE_ANGLE} degree range"
            ),
            Diagnostic::MissingCapHeightReference { character } => write!(
                f,
                "no outline for cap height reference {character:?}, using the string height"
            ),
        }
    }
}

/// Which face strategy handled a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyUse {
    pub character: char,
    pub strategy: String,
}

/// Diagnostics collected during one build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    pub diagnostics: Vec<Diagnostic>,
    pub strategies: Vec<StrategyUse>,
}

impl BuildReport {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has(&self, predicate: impl Fn(&Diagnostic) -> bool) -> bool {
        self.diagnostics.iter().any(predicate)
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// The finished, positioned geometry of a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringLayout {
    shape: Compound,
    cap_height: f64,
    width: f64,
    height: f64,
    offset: Vec2,
    filled: bool,
    report: BuildReport,
}

impl StringLayout {
    pub(crate) fn new(
        shape: Compound,
        cap_height: f64,
        offset: Vec2,
        filled: bool,
        report: BuildReport,
    ) -> Self {
        let (width, height) = shape
            .bounding_box()
            .map(|bbox| (bbox.width(), bbox.height()))
            .unwrap_or((0.0, 0.0));
        Self {
            shape,
            cap_height,
            width,
            height,
            offset,
            filled,
            report,
        }
    }

    pub fn shape(&self) -> &Compound {
        &self.shape
    }

    /// Cap height used for justification (the nominal size after scale-to-size).
    pub fn cap_height(&self) -> f64 {
        self.cap_height
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Translation applied by justification.
    pub fn justification_offset(&self) -> Vec2 {
        self.offset
    }

    /// True when the layout consists of faces rather than wires.
    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn into_shape(self) -> Compound {
        self.shape
    }
}
