use crate::geometry::GlyphShape;
use crate::types::StringLayout;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Render a layout as a standalone SVG document.
///
/// Geometry is Y up, so it is wrapped in a group that flips the Y axis. Faces
/// are filled with the even-odd rule, wires are stroked.
pub fn layout_to_svg(layout: &StringLayout) -> String {
    let bbox = layout.shape().bounding_box().unwrap_or_default();
    let margin = (bbox.width().max(bbox.height()) * 0.02).max(1e-3);
    let stroke = margin / 2.0;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
        bbox.min_x() - margin,
        -bbox.max_y() - margin,
        bbox.width() + 2.0 * margin,
        bbox.height() + 2.0 * margin,
        bbox.width() + 2.0 * margin,
        bbox.height() + 2.0 * margin,
    );
    svg.push_str("  <g transform=\"scale(1,-1)\">\n");

    for shape in layout.shape().sub_shapes() {
        match shape {
            GlyphShape::Face(face) => {
                let mut d = face.outer.path().to_svg();
                for hole in &face.holes {
                    d.push(' ');
                    d.push_str(&hole.path().to_svg());
                }
                let _ = writeln!(
                    svg,
                    r#"    <path d="{d}" fill="black" fill-rule="evenodd" stroke="none"/>"#
                );
            }
            GlyphShape::Wire(wire) => {
                let _ = writeln!(
                    svg,
                    r#"    <path d="{}" fill="none" stroke="black" stroke-width="{stroke}"/>"#,
                    wire.path().to_svg()
                );
            }
        }
    }

    svg.push_str("  </g>\n</svg>\n");
    svg
}

pub fn layout_to_json(layout: &StringLayout) -> Result<String> {
    serde_json::to_string_pretty(layout).context("serialize layout to JSON")
}

/// Write a layout to disk, choosing SVG or JSON from the file extension.
pub fn save_layout<P: AsRef<Path>>(layout: &StringLayout, path: P) -> Result<()> {
    let path = path.as_ref();
    let data = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => layout_to_json(layout)?,
        _ => layout_to_svg(layout),
    };
    fs::write(path, data).with_context(|| format!("write layout {}", path.display()))
}
