use crate::error::FaceBuildError;
use crate::geometry::polyline::{is_point_inside, ring_self_intersects, rings_cross};
use crate::geometry::wire::GlyphWire;
use kurbo::{Affine, Rect};
use serde::{Deserialize, Serialize};

/// A planar region with an outer boundary and optional holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphFace {
    /// The outer boundary (must be closed).
    pub outer: GlyphWire,
    /// Inner wires excluded from the region.
    pub holes: Vec<GlyphWire>,
}

impl GlyphFace {
    /// Create a new face with just an outer boundary.
    pub fn new(outer: GlyphWire) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Create a new face with an outer boundary and holes.
    pub fn with_holes(outer: GlyphWire, holes: Vec<GlyphWire>) -> Self {
        Self { outer, holes }
    }

    pub fn add_hole(&mut self, hole: GlyphWire) {
        self.holes.push(hole);
    }

    /// Enclosed area, outer minus holes.
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| h.signed_area().abs()).sum();
        (self.outer.signed_area().abs() - holes).max(0.0)
    }

    /// Z component of the face normal: +1 when the outer wire runs counter-clockwise.
    pub fn normal_z(&self) -> f64 {
        if self.outer.is_counter_clockwise() {
            1.0
        } else {
            -1.0
        }
    }

    /// Flip the face, reversing every wire.
    pub fn reverse(&mut self) {
        self.outer = self.outer.reversed();
        for hole in &mut self.holes {
            *hole = hole.reversed();
        }
    }

    /// Make the normal point at +Z (outer CCW, holes CW).
    /// Returns true when the face had to be flipped.
    pub fn orient(&mut self) -> bool {
        let flipped = self.normal_z() < 0.0;
        if flipped {
            self.outer = self.outer.reversed();
        }
        for hole in &mut self.holes {
            if hole.is_counter_clockwise() {
                *hole = hole.reversed();
            }
        }
        flipped
    }

    pub fn bounding_box(&self) -> Rect {
        self.outer.bounding_box()
    }

    pub fn transform(&mut self, affine: Affine) {
        self.outer.transform(affine);
        for hole in &mut self.holes {
            hole.transform(affine);
        }
    }

    /// Check the face is a well formed planar region.
    pub fn validate(&self, tolerance: f64) -> Result<(), FaceBuildError> {
        let outer = validated_ring(&self.outer, tolerance)?;

        let mut holes = Vec::with_capacity(self.holes.len());
        for hole in &self.holes {
            let ring = validated_ring(hole, tolerance)?;
            if rings_cross(&outer, &ring) || !is_point_inside(&ring[0], &outer) {
                return Err(FaceBuildError::HoleOutsideOuter);
            }
            holes.push(ring);
        }
        for (i, a) in holes.iter().enumerate() {
            for (j, b) in holes.iter().enumerate().skip(i + 1) {
                if rings_cross(a, b) {
                    return Err(FaceBuildError::IntersectingWires {
                        first: i + 1,
                        second: j + 1,
                    });
                }
            }
        }

        if self.area() < tolerance * tolerance {
            return Err(FaceBuildError::ZeroArea);
        }
        Ok(())
    }

    /// Polygonal approximation for boolean operations.
    pub fn to_geo_polygon(&self, tolerance: f64) -> geo::Polygon<f64> {
        let exterior = geo::LineString::from(self.outer.flatten(tolerance));
        let interiors = self
            .holes
            .iter()
            .map(|hole| geo::LineString::from(hole.flatten(tolerance)))
            .collect();
        geo::Polygon::new(exterior, interiors)
    }

    pub fn from_geo_polygon(polygon: &geo::Polygon<f64>) -> Self {
        let outer = wire_from_line_string(polygon.exterior());
        let holes = polygon
            .interiors()
            .iter()
            .map(wire_from_line_string)
            .collect();
        Self { outer, holes }
    }
}

fn validated_ring(wire: &GlyphWire, tolerance: f64) -> Result<Vec<(f64, f64)>, FaceBuildError> {
    if !wire.is_closed() {
        return Err(FaceBuildError::OpenWire);
    }
    let ring = wire.flatten(tolerance);
    if ring.len() < 3 {
        return Err(FaceBuildError::TooFewPoints);
    }
    if ring_self_intersects(&ring) {
        return Err(FaceBuildError::SelfIntersecting);
    }
    Ok(ring)
}

fn wire_from_line_string(line: &geo::LineString<f64>) -> GlyphWire {
    let mut points: Vec<(f64, f64)> = line.coords().map(|c| (c.x, c.y)).collect();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    GlyphWire::from_points(&points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, side: f64) -> GlyphWire {
        GlyphWire::from_points(&[(x, y), (x + side, y), (x + side, y + side), (x, y + side)])
    }

    #[test]
    fn test_face_area_with_hole() {
        let face = GlyphFace::with_holes(square(0.0, 0.0, 10.0), vec![square(2.0, 2.0, 2.0)]);
        assert!((face.area() - 96.0).abs() < 1e-9);
        assert!(face.validate(0.01).is_ok());
    }

    #[test]
    fn test_orient_flips_clockwise_face() {
        let mut face = GlyphFace::new(square(0.0, 0.0, 1.0).reversed());
        assert_eq!(face.normal_z(), -1.0);
        assert!(face.orient());
        assert_eq!(face.normal_z(), 1.0);
        assert!(!face.orient());
    }

    #[test]
    fn test_orient_makes_holes_clockwise() {
        let mut face = GlyphFace::with_holes(square(0.0, 0.0, 10.0), vec![square(2.0, 2.0, 2.0)]);
        face.orient();
        assert!(!face.holes[0].is_counter_clockwise());
        assert!((face.area() - 96.0).abs() < 1e-9);
    }

    #[test]
    fn test_hole_outside_is_rejected() {
        let face = GlyphFace::with_holes(square(0.0, 0.0, 1.0), vec![square(5.0, 5.0, 1.0)]);
        assert_eq!(face.validate(0.01), Err(FaceBuildError::HoleOutsideOuter));
    }

    #[test]
    fn test_zero_area_is_rejected() {
        let sliver = GlyphWire::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert!(GlyphFace::new(sliver).validate(0.01).is_err());
    }

    #[test]
    fn test_geo_round_trip_keeps_area() {
        let face = GlyphFace::with_holes(square(0.0, 0.0, 4.0), vec![square(1.0, 1.0, 1.0)]);
        let back = GlyphFace::from_geo_polygon(&face.to_geo_polygon(0.01));
        assert!((back.area() - face.area()).abs() < 1e-9);
        assert_eq!(back.holes.len(), 1);
    }
}
