//! Face construction from closed glyph wires.
//!
//! Three strategies with increasing permissiveness:
//!
//! - [`BullseyeFaceMaker`]: resolves arbitrarily deep nesting (holes inside
//!   outers inside holes) but requires that no two wires touch or cross.
//! - [`CheeseFaceMaker`]: boolean construction under the nonzero winding
//!   rule, tolerant of overlapping contours and double-nested wires; output
//!   is polygonal.
//! - [`SimpleFaceMaker`]: one face per wire, overlaps are not resolved.

use crate::error::FaceBuildError;
use crate::geometry::polyline::{is_point_inside, ring_area, ring_self_intersects, rings_cross};
use crate::geometry::{GlyphFace, GlyphWire};
use geo::{BooleanOps, MultiPolygon};
use log::debug;

/// A face-building strategy.
pub trait FaceMaker {
    fn name(&self) -> &'static str;

    /// Build faces from closed wires, or report why the wires are unusable.
    fn make_faces(
        &self,
        wires: &[GlyphWire],
        tolerance: f64,
    ) -> Result<Vec<GlyphFace>, FaceBuildError>;
}

/// Faces produced by the first strategy that succeeded.
#[derive(Debug, Clone)]
pub struct FaceBuild {
    pub faces: Vec<GlyphFace>,
    pub strategy: &'static str,
}

/// The default strategy list, strict first.
pub fn default_face_makers() -> Vec<Box<dyn FaceMaker + Send + Sync>> {
    vec![
        Box::new(BullseyeFaceMaker),
        Box::new(CheeseFaceMaker),
        Box::new(SimpleFaceMaker),
    ]
}

/// Try each strategy in order and return the first set of faces that validates.
/// When every strategy fails the last error is returned.
pub fn build_faces(
    makers: &[Box<dyn FaceMaker + Send + Sync>],
    wires: &[GlyphWire],
    tolerance: f64,
) -> Result<FaceBuild, FaceBuildError> {
    let closed: Vec<GlyphWire> = wires
        .iter()
        .filter(|w| w.is_closed())
        .filter(|w| {
            let usable = !is_degenerate(w, tolerance);
            if !usable {
                debug!("dropping degenerate contour {}", w.path().to_svg());
            }
            usable
        })
        .cloned()
        .collect();
    if closed.is_empty() {
        return Err(FaceBuildError::NoClosedWires);
    }

    let mut last_error = FaceBuildError::EmptyResult;
    for maker in makers {
        match maker.make_faces(&closed, tolerance) {
            Ok(faces) if !faces.is_empty() => {
                return Ok(FaceBuild {
                    faces,
                    strategy: maker.name(),
                })
            }
            Ok(_) => last_error = FaceBuildError::EmptyResult,
            Err(err) => {
                debug!("{} face maker failed: {}", maker.name(), err);
                last_error = err;
            }
        }
    }
    Err(last_error)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BullseyeFaceMaker;

impl FaceMaker for BullseyeFaceMaker {
    fn name(&self) -> &'static str {
        "bullseye"
    }

    fn make_faces(
        &self,
        wires: &[GlyphWire],
        tolerance: f64,
    ) -> Result<Vec<GlyphFace>, FaceBuildError> {
        let rings = flatten_all(wires, tolerance);
        for (i, a) in rings.iter().enumerate() {
            for (j, b) in rings.iter().enumerate().skip(i + 1) {
                if rings_cross(a, b) {
                    return Err(FaceBuildError::IntersectingWires {
                        first: i,
                        second: j,
                    });
                }
            }
        }

        let nesting = Nesting::of(&rings);
        let mut faces: Vec<(usize, GlyphFace)> = Vec::new();
        for (i, wire) in wires.iter().enumerate() {
            if nesting.depth[i] % 2 == 0 {
                faces.push((i, GlyphFace::new(wire.clone())));
            }
        }
        for (i, wire) in wires.iter().enumerate() {
            if nesting.depth[i] % 2 == 1 {
                let parent = nesting.parent[i].ok_or(FaceBuildError::UnresolvedNesting { index: i })?;
                let (_, face) = faces
                    .iter_mut()
                    .find(|(outer, _)| *outer == parent)
                    .ok_or(FaceBuildError::UnresolvedNesting { index: i })?;
                face.add_hole(wire.clone());
            }
        }

        let faces: Vec<GlyphFace> = faces.into_iter().map(|(_, face)| face).collect();
        for face in &faces {
            face.validate(tolerance)?;
        }
        Ok(faces)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CheeseFaceMaker;

impl FaceMaker for CheeseFaceMaker {
    fn name(&self) -> &'static str {
        "cheese"
    }

    fn make_faces(
        &self,
        wires: &[GlyphWire],
        tolerance: f64,
    ) -> Result<Vec<GlyphFace>, FaceBuildError> {
        let rings = flatten_all(wires, tolerance);
        if rings.iter().any(|ring| ring.len() < 3) {
            return Err(FaceBuildError::TooFewPoints);
        }
        // boolean ops are not defined for self-intersecting rings
        if rings.iter().any(|ring| ring_self_intersects(ring)) {
            return Err(FaceBuildError::SelfIntersecting);
        }

        // nonzero fill: rings wound like the largest one add material,
        // the others cut it, applied from the outside in
        let areas: Vec<f64> = rings.iter().map(|ring| ring_area(ring)).collect();
        let fill_ccw = areas
            .iter()
            .copied()
            .max_by(|a, b| a.abs().total_cmp(&b.abs()))
            .map_or(true, |area| area > 0.0);
        let nesting = Nesting::of(&rings);
        let mut order: Vec<usize> = (0..rings.len()).collect();
        order.sort_by(|&a, &b| {
            nesting.depth[a]
                .cmp(&nesting.depth[b])
                .then(areas[b].abs().total_cmp(&areas[a].abs()))
        });

        let mut region: Option<MultiPolygon<f64>> = None;
        for i in order {
            let ring = MultiPolygon::new(vec![geo::Polygon::new(
                geo::LineString::from(rings[i].clone()),
                Vec::new(),
            )]);
            let additive = (areas[i] > 0.0) == fill_ccw;
            region = match (region, additive) {
                (None, true) => Some(ring),
                (None, false) => None,
                (Some(current), true) => Some(current.union(&ring)),
                (Some(current), false) => Some(current.difference(&ring)),
            };
        }

        let region = region.ok_or(FaceBuildError::EmptyResult)?;
        let faces: Vec<GlyphFace> = region.0.iter().map(GlyphFace::from_geo_polygon).collect();
        if faces.is_empty() {
            return Err(FaceBuildError::EmptyResult);
        }
        for face in &faces {
            face.validate(tolerance)?;
        }
        Ok(faces)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleFaceMaker;

impl FaceMaker for SimpleFaceMaker {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn make_faces(
        &self,
        wires: &[GlyphWire],
        tolerance: f64,
    ) -> Result<Vec<GlyphFace>, FaceBuildError> {
        wires
            .iter()
            .map(|wire| {
                let face = GlyphFace::new(wire.clone());
                face.validate(tolerance)?;
                Ok(face)
            })
            .collect()
    }
}

/// Closed contours that enclose nothing, such as the zero-length loops some
/// fonts emit next to a glyph body.
fn is_degenerate(wire: &GlyphWire, tolerance: f64) -> bool {
    let ring = wire.flatten(tolerance);
    ring.len() < 3 || ring_area(&ring).abs() < tolerance * tolerance
}

fn flatten_all(wires: &[GlyphWire], tolerance: f64) -> Vec<Vec<(f64, f64)>> {
    wires.iter().map(|w| w.flatten(tolerance)).collect()
}

/// Containment tree of a set of rings.
struct Nesting {
    /// Number of rings enclosing each ring.
    depth: Vec<usize>,
    /// Smallest enclosing ring one level up.
    parent: Vec<Option<usize>>,
}

impl Nesting {
    fn of(rings: &[Vec<(f64, f64)>]) -> Self {
        let areas: Vec<f64> = rings.iter().map(|r| ring_area(r).abs()).collect();
        let containers: Vec<Vec<usize>> = rings
            .iter()
            .enumerate()
            .map(|(i, ring)| {
                let Some(probe) = ring.first() else {
                    return Vec::new();
                };
                rings
                    .iter()
                    .enumerate()
                    .filter(|(j, other)| *j != i && areas[*j] > areas[i] && is_point_inside(probe, other))
                    .map(|(j, _)| j)
                    .collect()
            })
            .collect();

        let depth: Vec<usize> = containers.iter().map(Vec::len).collect();
        let parent = containers
            .iter()
            .enumerate()
            .map(|(i, outer)| {
                outer
                    .iter()
                    .copied()
                    .filter(|&j| depth[j] + 1 == depth[i])
                    .min_by(|&a, &b| areas[a].total_cmp(&areas[b]))
            })
            .collect();

        Self { depth, parent }
    }
}
