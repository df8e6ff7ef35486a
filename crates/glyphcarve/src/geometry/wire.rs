use crate::geometry::polyline::dedup_points;
use kurbo::{Affine, BezPath, ParamCurve, PathEl, PathSeg, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

const CLOSURE_EPSILON: f64 = 1e-9;

/// One outline component of a glyph: a single connected chain of edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphWire {
    path: BezPath,
}

impl GlyphWire {
    /// Wrap a single-subpath Bézier path.
    pub fn new(path: BezPath) -> Self {
        Self { path }
    }

    /// Build a closed polygonal wire from a list of points.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let mut path = BezPath::new();
        let mut iter = points.iter();
        if let Some(&(x, y)) = iter.next() {
            path.move_to(Point::new(x, y));
            for &(x, y) in iter {
                path.line_to(Point::new(x, y));
            }
            path.close_path();
        }
        Self { path }
    }

    pub fn path(&self) -> &BezPath {
        &self.path
    }

    pub fn into_path(self) -> BezPath {
        self.path
    }

    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    /// Tight bounding box, using curve extrema rather than control points.
    pub fn bounding_box(&self) -> Rect {
        self.path.bounding_box()
    }

    pub fn start_point(&self) -> Option<Point> {
        match self.path.elements().first() {
            Some(PathEl::MoveTo(p)) => Some(*p),
            _ => None,
        }
    }

    pub fn end_point(&self) -> Option<Point> {
        self.path.elements().iter().rev().find_map(|el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
            PathEl::QuadTo(_, p) => Some(*p),
            PathEl::CurveTo(_, _, p) => Some(*p),
            PathEl::ClosePath => None,
        })
    }

    /// A wire is closed when it ends in `ClosePath` or returns to its start point.
    pub fn is_closed(&self) -> bool {
        if matches!(self.path.elements().last(), Some(PathEl::ClosePath)) {
            return true;
        }
        match (self.start_point(), self.end_point()) {
            (Some(start), Some(end)) => {
                self.path.elements().len() > 2 && start.distance(end) < CLOSURE_EPSILON
            }
            _ => false,
        }
    }

    /// Signed enclosed area; positive for counter-clockwise wires (Y up).
    pub fn signed_area(&self) -> f64 {
        self.path.area()
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() >= 0.0
    }

    /// Flatten the wire into line segments at the given tolerance.
    /// Closed wires are returned as rings without a repeated closing point.
    pub fn flatten(&self, tolerance: f64) -> Vec<(f64, f64)> {
        let mut points = Vec::new();
        kurbo::flatten(self.path.iter(), tolerance, |el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => points.push((p.x, p.y)),
            _ => {}
        });

        let mut points = dedup_points(&points);
        if self.is_closed() && points.len() > 1 {
            let first = points[0];
            let last = points[points.len() - 1];
            if (first.0 - last.0).abs() < CLOSURE_EPSILON
                && (first.1 - last.1).abs() < CLOSURE_EPSILON
            {
                points.pop();
            }
        }
        points
    }

    /// The same wire traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        let closed = self.is_closed();
        let segments: Vec<PathSeg> = self.path.segments().collect();

        let mut path = BezPath::new();
        let Some(last) = segments.last() else {
            return self.clone();
        };
        path.move_to(last.reverse().start());

        for seg in segments.iter().rev() {
            match seg.reverse() {
                PathSeg::Line(line) => path.line_to(line.p1),
                PathSeg::Quad(quad) => path.quad_to(quad.p1, quad.p2),
                PathSeg::Cubic(cubic) => path.curve_to(cubic.p1, cubic.p2, cubic.p3),
            }
        }
        if closed {
            path.close_path();
        }
        Self { path }
    }

    pub fn transform(&mut self, affine: Affine) {
        self.path.apply_affine(affine);
    }
}

impl From<BezPath> for GlyphWire {
    fn from(path: BezPath) -> Self {
        Self::new(path)
    }
}
