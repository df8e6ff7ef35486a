pub mod face;
pub mod fuse;
pub mod polyline;
pub mod shape;
pub mod wire;

// Re-export public types
pub use face::GlyphFace;
pub use fuse::fuse_faces;
pub use shape::{Compound, GlyphShape};
pub use wire::GlyphWire;

use kurbo::Rect;

/// Length of the diagonal of a bounding box.
pub fn diagonal_length(bbox: Rect) -> f64 {
    bbox.width().hypot(bbox.height())
}
