use crate::geometry::face::GlyphFace;
use crate::geometry::wire::GlyphWire;
use kurbo::{Affine, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A single sub-shape of a shape string: an outline or a filled face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GlyphShape {
    Wire(GlyphWire),
    Face(GlyphFace),
}

impl GlyphShape {
    pub fn bounding_box(&self) -> Rect {
        match self {
            GlyphShape::Wire(wire) => wire.bounding_box(),
            GlyphShape::Face(face) => face.bounding_box(),
        }
    }

    pub fn transform(&mut self, affine: Affine) {
        match self {
            GlyphShape::Wire(wire) => wire.transform(affine),
            GlyphShape::Face(face) => face.transform(affine),
        }
    }

    pub fn as_face(&self) -> Option<&GlyphFace> {
        match self {
            GlyphShape::Face(face) => Some(face),
            GlyphShape::Wire(_) => None,
        }
    }

    pub fn as_wire(&self) -> Option<&GlyphWire> {
        match self {
            GlyphShape::Wire(wire) => Some(wire),
            GlyphShape::Face(_) => None,
        }
    }
}

impl From<GlyphWire> for GlyphShape {
    fn from(wire: GlyphWire) -> Self {
        GlyphShape::Wire(wire)
    }
}

impl From<GlyphFace> for GlyphShape {
    fn from(face: GlyphFace) -> Self {
        GlyphShape::Face(face)
    }
}

/// An ordered collection of sub-shapes transformed as one unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Compound {
    shapes: Vec<GlyphShape>,
}

impl Compound {
    pub fn new(shapes: Vec<GlyphShape>) -> Self {
        Self { shapes }
    }

    pub fn push(&mut self, shape: impl Into<GlyphShape>) {
        self.shapes.push(shape.into());
    }

    pub fn sub_shapes(&self) -> &[GlyphShape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn faces(&self) -> impl Iterator<Item = &GlyphFace> {
        self.shapes.iter().filter_map(GlyphShape::as_face)
    }

    pub fn wires(&self) -> impl Iterator<Item = &GlyphWire> {
        self.shapes.iter().filter_map(GlyphShape::as_wire)
    }

    pub fn total_area(&self) -> f64 {
        self.faces().map(GlyphFace::area).sum()
    }

    /// Tight bounding box of every sub-shape, `None` for an empty compound.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.shapes
            .iter()
            .map(GlyphShape::bounding_box)
            .reduce(|acc, bbox| acc.union(bbox))
    }

    pub fn transform(&mut self, affine: Affine) {
        for shape in &mut self.shapes {
            shape.transform(affine);
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.transform(Affine::translate(offset));
    }

    pub fn into_sub_shapes(self) -> Vec<GlyphShape> {
        self.shapes
    }
}
