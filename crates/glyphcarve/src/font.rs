//! Font resources: per-character glyph outlines laid out along a baseline.

use crate::error::{GlyphError, Result};
use crate::geometry::GlyphWire;
use kurbo::{Affine, BezPath, Point};
use log::debug;
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use ttf_parser::{GlyphId, OutlineBuilder};

/// Outline of one glyph in font units, Y up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphOutline {
    /// Horizontal advance in font units.
    pub advance: f64,
    /// One path per contour.
    pub contours: Vec<BezPath>,
}

/// Positioned wires of one character of a string.
#[derive(Debug, Clone, PartialEq)]
pub struct CharWires {
    pub character: char,
    pub wires: Vec<GlyphWire>,
}

/// Source of glyph outlines.
///
/// Implementors provide raw outlines in font units; [`FontResource::char_wires`]
/// scales them to `size / units_per_em` and advances the pen along the baseline.
pub trait FontResource {
    fn units_per_em(&self) -> f64;

    fn glyph(&self, character: char) -> Option<GlyphOutline>;

    /// Pair kerning in font units.
    fn kerning(&self, _left: char, _right: char) -> f64 {
        0.0
    }

    /// Wires for every character of `text`. `tracking` is added to the pen
    /// position after each character, in output units.
    fn char_wires(&self, text: &str, size: f64, tracking: f64) -> Result<Vec<CharWires>> {
        if !size.is_finite() || size <= 0.0 {
            return Err(GlyphError::InvalidSize { size });
        }
        let units_per_em = self.units_per_em();
        if !units_per_em.is_finite() || units_per_em <= 0.0 {
            return Err(GlyphError::InvalidUnitsPerEm { units_per_em });
        }
        let scale = size / units_per_em;
        let chars: Vec<char> = text.chars().collect();

        let mut pen_x = 0.0;
        let mut result = Vec::with_capacity(chars.len());
        for (index, &character) in chars.iter().enumerate() {
            let Some(outline) = self.glyph(character) else {
                debug!("no glyph for {character:?}");
                result.push(CharWires {
                    character,
                    wires: Vec::new(),
                });
                continue;
            };

            let placement = Affine::translate((pen_x, 0.0)) * Affine::scale(scale);
            let wires = outline
                .contours
                .into_iter()
                .map(|contour| {
                    let mut wire = GlyphWire::new(contour);
                    wire.transform(placement);
                    wire
                })
                .collect();
            result.push(CharWires { character, wires });

            let kern = chars
                .get(index + 1)
                .map(|&next| self.kerning(character, next))
                .unwrap_or(0.0);
            pen_x += (outline.advance + kern) * scale + tracking;
        }
        Ok(result)
    }
}

/// A TrueType/OpenType font file.
pub struct TtfFont {
    path: PathBuf,
    face: OwnedFace,
}

impl TtfFont {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| GlyphError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path.to_path_buf(), data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::parse(PathBuf::from("<memory>"), data)
    }

    fn parse(path: PathBuf, data: Vec<u8>) -> Result<Self> {
        let face = OwnedFace::from_vec(data, 0).map_err(|err| GlyphError::FontParse {
            path: path.clone(),
            reason: err.to_string(),
        })?;
        if face.as_face_ref().units_per_em() == 0 {
            return Err(GlyphError::FontParse {
                path,
                reason: "units per em is zero".to_string(),
            });
        }
        Ok(Self { path, face })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn glyph_id(&self, character: char) -> Option<GlyphId> {
        self.face.as_face_ref().glyph_index(character)
    }
}

impl FontResource for TtfFont {
    fn units_per_em(&self) -> f64 {
        self.face.as_face_ref().units_per_em() as f64
    }

    fn glyph(&self, character: char) -> Option<GlyphOutline> {
        let face = self.face.as_face_ref();
        let glyph_id = self.glyph_id(character)?;
        let advance = face.glyph_hor_advance(glyph_id).unwrap_or(0) as f64;

        let mut recorder = ContourRecorder::default();
        // glyphs without outlines (space) still advance the pen
        let contours = match face.outline_glyph(glyph_id, &mut recorder) {
            Some(_) => recorder.finish(),
            None => {
                debug!("no outline for {character:?}");
                Vec::new()
            }
        };
        Some(GlyphOutline { advance, contours })
    }

    fn kerning(&self, left: char, right: char) -> f64 {
        let (Some(left), Some(right)) = (self.glyph_id(left), self.glyph_id(right)) else {
            return 0.0;
        };
        let Some(kern) = self.face.as_face_ref().tables().kern else {
            return 0.0;
        };
        kern.subtables
            .into_iter()
            .filter(|subtable| subtable.horizontal && !subtable.variable)
            .find_map(|subtable| subtable.glyphs_kerning(left, right))
            .map(f64::from)
            .unwrap_or(0.0)
    }
}

/// Splits a glyph outline into one path per contour.
#[derive(Default)]
struct ContourRecorder {
    contours: Vec<BezPath>,
    current: BezPath,
}

impl ContourRecorder {
    fn flush(&mut self) {
        if !self.current.elements().is_empty() {
            self.contours.push(std::mem::take(&mut self.current));
        }
    }

    fn finish(mut self) -> Vec<BezPath> {
        self.flush();
        self.contours
    }
}

impl OutlineBuilder for ContourRecorder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.flush();
        self.current.move_to(point(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.current.line_to(point(x, y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.current.quad_to(point(x1, y1), point(x, y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.current
            .curve_to(point(x1, y1), point(x2, y2), point(x, y));
    }

    fn close(&mut self) {
        self.current.close_path();
        self.flush();
    }
}

fn point(x: f32, y: f32) -> Point {
    Point::new(x as f64, y as f64)
}

/// An in-memory font whose glyphs are given directly as paths.
#[derive(Debug, Clone)]
pub struct OutlineFont {
    units_per_em: f64,
    glyphs: HashMap<char, GlyphOutline>,
    kerning: HashMap<(char, char), f64>,
}

impl OutlineFont {
    pub fn new(units_per_em: f64) -> Self {
        Self {
            units_per_em,
            glyphs: HashMap::new(),
            kerning: HashMap::new(),
        }
    }

    pub fn insert_glyph(&mut self, character: char, advance: f64, contours: Vec<BezPath>) {
        self.glyphs
            .insert(character, GlyphOutline { advance, contours });
    }

    pub fn with_glyph(mut self, character: char, advance: f64, contours: Vec<BezPath>) -> Self {
        self.insert_glyph(character, advance, contours);
        self
    }

    pub fn with_kerning(mut self, left: char, right: char, value: f64) -> Self {
        self.kerning.insert((left, right), value);
        self
    }
}

impl FontResource for OutlineFont {
    fn units_per_em(&self) -> f64 {
        self.units_per_em
    }

    fn glyph(&self, character: char) -> Option<GlyphOutline> {
        self.glyphs.get(&character).cloned()
    }

    fn kerning(&self, left: char, right: char) -> f64 {
        self.kerning.get(&(left, right)).copied().unwrap_or(0.0)
    }
}

/// Closed polygonal contour helper for building [`OutlineFont`] glyphs.
pub fn polygon_contour(points: &[(f64, f64)]) -> BezPath {
    GlyphWire::from_points(points).into_path()
}
