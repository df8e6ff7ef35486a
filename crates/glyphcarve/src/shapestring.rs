//! Text to positioned outline or face geometry.

use crate::error::{GlyphError, Result};
use crate::facemaker::{build_faces, default_face_makers, FaceMaker};
use crate::font::{CharWires, FontResource};
use crate::geometry::{diagonal_length, fuse_faces, Compound, GlyphFace, GlyphShape, GlyphWire};
use crate::justification::justification_vector;
use crate::types::{
    BuildReport, Diagnostic, ShapeStringParams, StickyFontHeuristic, StrategyUse, StringLayout,
    CAP_HEIGHT_REFERENCE, MAX_OBLIQUE_ANGLE, STICKY_FONT_REFERENCE,
};
use kurbo::{Affine, Rect};
use log::{debug, warn};

/// Builds shape strings with an ordered list of face strategies.
pub struct GlyphOutlineAssembler {
    face_makers: Vec<Box<dyn FaceMaker + Send + Sync>>,
}

impl Default for GlyphOutlineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphOutlineAssembler {
    pub fn new() -> Self {
        Self {
            face_makers: default_face_makers(),
        }
    }

    /// Use a custom strategy list, tried in order.
    pub fn with_face_makers(face_makers: Vec<Box<dyn FaceMaker + Send + Sync>>) -> Self {
        Self { face_makers }
    }

    /// Build the layout for `params.text`.
    ///
    /// Characters whose faces cannot be built are dropped and reported; the
    /// build only fails when the size is invalid, the font cannot be read, or
    /// nothing usable is left.
    pub fn build<F: FontResource + ?Sized>(
        &self,
        font: &F,
        params: &ShapeStringParams,
    ) -> Result<StringLayout> {
        if !params.size.is_finite() || params.size <= 0.0 {
            return Err(GlyphError::InvalidSize { size: params.size });
        }
        if params.text.is_empty() {
            return Err(GlyphError::EmptyText);
        }
        let tolerance = params.tolerance_at(params.size);
        let mut report = BuildReport::default();

        let fill = params.make_face && self.font_makes_faces(font, params)?;
        if params.make_face && !fill {
            warn!("{}", Diagnostic::StickyFontFallback);
            report.push(Diagnostic::StickyFontFallback);
        }

        let chars = font.char_wires(&params.text, params.size, params.tracking)?;
        let mut shapes: Vec<GlyphShape> = Vec::new();
        for char_wires in chars {
            if char_wires.wires.is_empty() {
                continue;
            }
            if fill {
                let faces = self.char_faces(&char_wires, tolerance, &mut report);
                shapes.extend(faces.into_iter().map(GlyphShape::Face));
            } else {
                shapes.extend(char_wires.wires.into_iter().map(GlyphShape::Wire));
            }
        }
        if shapes.is_empty() {
            return Err(GlyphError::NoWires {
                text: params.text.clone(),
            });
        }

        let mut shape = if fill && params.fuse {
            let faces: Vec<GlyphFace> = shapes
                .into_iter()
                .filter_map(|s| match s {
                    GlyphShape::Face(face) => Some(face),
                    GlyphShape::Wire(_) => None,
                })
                .collect();
            Compound::new(
                fuse_faces(&faces, tolerance)
                    .into_iter()
                    .map(GlyphShape::Face)
                    .collect(),
            )
        } else {
            Compound::new(shapes)
        };

        let mut cap_height = match measure_cap_height(font, params)? {
            Some(height) => height,
            None => {
                let diagnostic = Diagnostic::MissingCapHeightReference {
                    character: CAP_HEIGHT_REFERENCE,
                };
                warn!("{diagnostic}");
                report.push(diagnostic);
                shape.bounding_box().map(|b| b.max_y()).unwrap_or(params.size)
            }
        };

        if params.scale_to_size && cap_height > 0.0 {
            shape.transform(Affine::scale(params.size / cap_height));
            cap_height = params.size;
        }

        if params.oblique_angle != 0.0 {
            match oblique_shear(params.oblique_angle) {
                Some(shear) => shape.transform(shear),
                None => {
                    let diagnostic = Diagnostic::ObliqueAngleOutOfRange {
                        angle: params.oblique_angle,
                    };
                    warn!("{diagnostic}");
                    report.push(diagnostic);
                }
            }
        }

        let bbox = shape.bounding_box().unwrap_or(Rect::ZERO);
        let offset = justification_vector(
            bbox,
            cap_height,
            params.justification,
            params.justification_reference,
            params.keep_left_margin,
        );
        shape.translate(offset);

        Ok(StringLayout::new(shape, cap_height, offset, fill, report))
    }

    /// Render the reference glyph at unit size and decide whether the font
    /// yields real faces.
    fn font_makes_faces<F: FontResource + ?Sized>(
        &self,
        font: &F,
        params: &ShapeStringParams,
    ) -> Result<bool> {
        let reference = STICKY_FONT_REFERENCE.to_string();
        let wires: Vec<GlyphWire> = font
            .char_wires(&reference, 1.0, 0.0)?
            .into_iter()
            .next()
            .map(|c| c.wires)
            .unwrap_or_default();
        let faces = match build_faces(&self.face_makers, &wires, params.tolerance_at(1.0)) {
            Ok(build) => oriented(build.faces),
            Err(err) => {
                debug!("reference glyph {STICKY_FONT_REFERENCE:?} has no faces: {err}");
                Vec::new()
            }
        };
        Ok(faces_are_solid(&wires, &faces, &params.sticky_font))
    }

    fn char_faces(
        &self,
        char_wires: &CharWires,
        tolerance: f64,
        report: &mut BuildReport,
    ) -> Vec<GlyphFace> {
        match build_faces(&self.face_makers, &char_wires.wires, tolerance) {
            Ok(build) => {
                debug!(
                    "built {} face(s) for {:?} with {}",
                    build.faces.len(),
                    char_wires.character,
                    build.strategy
                );
                report.strategies.push(StrategyUse {
                    character: char_wires.character,
                    strategy: build.strategy.to_string(),
                });
                oriented(build.faces)
            }
            Err(err) => {
                let diagnostic = Diagnostic::FaceCreationFailed {
                    character: char_wires.character,
                    reason: err.to_string(),
                };
                warn!("{diagnostic}");
                report.push(diagnostic);
                Vec::new()
            }
        }
    }
}

/// Build a shape string with the default strategies.
pub fn build_shape_string<F: FontResource + ?Sized>(
    font: &F,
    params: &ShapeStringParams,
) -> Result<StringLayout> {
    GlyphOutlineAssembler::new().build(font, params)
}

fn oriented(mut faces: Vec<GlyphFace>) -> Vec<GlyphFace> {
    for face in &mut faces {
        if face.orient() {
            debug!("flipped inverted face");
        }
    }
    faces
}

/// Sticky font test on the reference glyph: enough area, and faces that
/// cover the same extent as the wires they came from.
fn faces_are_solid(
    wires: &[GlyphWire],
    faces: &[GlyphFace],
    heuristic: &StickyFontHeuristic,
) -> bool {
    if faces.is_empty() {
        return false;
    }
    let area: f64 = faces.iter().map(GlyphFace::area).sum();
    if area <= heuristic.min_area {
        return false;
    }
    let Some(wire_box) = wires.iter().map(GlyphWire::bounding_box).reduce(|a, b| a.union(b))
    else {
        return false;
    };
    let Some(face_box) = faces.iter().map(GlyphFace::bounding_box).reduce(|a, b| a.union(b))
    else {
        return false;
    };
    is_close(
        diagonal_length(wire_box),
        diagonal_length(face_box),
        heuristic.relative_tolerance,
    )
}

/// Height of the reference capital at the build's size and tracking.
fn measure_cap_height<F: FontResource + ?Sized>(
    font: &F,
    params: &ShapeStringParams,
) -> Result<Option<f64>> {
    let reference = CAP_HEIGHT_REFERENCE.to_string();
    let chars = font.char_wires(&reference, params.size, params.tracking)?;
    let height = chars
        .into_iter()
        .flat_map(|c| c.wires)
        .map(|w| w.bounding_box().max_y())
        .reduce(f64::max);
    Ok(height.filter(|h| *h > 0.0))
}

/// Horizontal shear for a slant angle in degrees, `None` when out of range.
pub fn oblique_shear(angle_degrees: f64) -> Option<Affine> {
    if !(-MAX_OBLIQUE_ANGLE..=MAX_OBLIQUE_ANGLE).contains(&angle_degrees) {
        return None;
    }
    let shear = angle_degrees.to_radians().tan();
    Some(Affine::new([1.0, 0.0, shear, 1.0, 0.0, 0.0]))
}

fn is_close(a: f64, b: f64, relative_tolerance: f64) -> bool {
    (a - b).abs() <= relative_tolerance * a.abs().max(b.abs())
}
