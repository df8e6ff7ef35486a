mod error;
mod export;
mod facemaker;
mod font;
mod geometry;
mod justification;
mod settings;
mod shapestring;
mod types;

pub use error::{FaceBuildError, GlyphError, Result as GlyphResult};
pub use export::*;
pub use facemaker::*;
pub use font::*;
pub use geometry::*;
pub use justification::*;
pub use settings::*;
pub use shapestring::*;
pub use types::*;
