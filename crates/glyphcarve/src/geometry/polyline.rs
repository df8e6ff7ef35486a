use cavalier_contours::polyline::{PlineSource, PlineSourceMut, PlineVertex, Polyline};
use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, Line};

const POINT_EPSILON: f64 = 1e-9;

/// Build a cavalier polyline from a flattened ring.
pub fn create_polyline(points: &[(f64, f64)], closed: bool) -> Polyline {
    let mut pline = Polyline::new();

    if points.is_empty() {
        return pline;
    }

    let mut effective_points = points.to_vec();

    // If closed, and last point == first point, remove the last one
    if closed && effective_points.len() > 1 {
        let first = effective_points[0];
        let last = effective_points[effective_points.len() - 1];
        if same_point(first, last) {
            effective_points.pop();
        }
    }

    for (x, y) in dedup_points(&effective_points) {
        pline.add_vertex(PlineVertex::new(x, y, 0.0));
    }

    if closed {
        pline.set_is_closed(true);
    }
    pline
}

/// Drop consecutive duplicate points (zero length segments).
pub fn dedup_points(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut clean_points: Vec<(f64, f64)> = Vec::with_capacity(points.len());
    for &point in points {
        match clean_points.last() {
            Some(&prev) if same_point(prev, point) => {}
            _ => clean_points.push(point),
        }
    }
    clean_points
}

/// Signed area of a closed ring; positive for counter-clockwise rings.
pub fn ring_area(points: &[(f64, f64)]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    create_polyline(points, true).area()
}

pub fn is_point_inside(point: &(f64, f64), polygon: &[(f64, f64)]) -> bool {
    if polygon.is_empty() {
        return false;
    }
    let x = point.0;
    let y = point.1;
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (xi, yi) = polygon[i];
        let (xj, yj) = polygon[j];

        let intersect = ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi);
        if intersect {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// True when two non-adjacent edges of the ring cross or overlap.
pub fn ring_self_intersects(ring: &[(f64, f64)]) -> bool {
    let edges = ring_edges(ring);
    let n = edges.len();
    if n < 4 {
        return false;
    }
    for i in 0..n {
        for j in (i + 2)..n {
            // first and last edge share the ring's start point
            if i == 0 && j == n - 1 {
                continue;
            }
            if edges_cross(edges[i], edges[j]) {
                return true;
            }
        }
    }
    false
}

/// True when any edge of `a` crosses or overlaps any edge of `b`.
pub fn rings_cross(a: &[(f64, f64)], b: &[(f64, f64)]) -> bool {
    let edges_a = ring_edges(a);
    let edges_b = ring_edges(b);
    edges_a
        .iter()
        .any(|ea| edges_b.iter().any(|eb| edges_cross(*ea, *eb)))
}

fn ring_edges(ring: &[(f64, f64)]) -> Vec<Line<f64>> {
    let n = ring.len();
    if n < 2 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let (x0, y0) = ring[i];
            let (x1, y1) = ring[(i + 1) % n];
            Line::new(Coord { x: x0, y: y0 }, Coord { x: x1, y: y1 })
        })
        .collect()
}

fn edges_cross(a: Line<f64>, b: Line<f64>) -> bool {
    match line_intersection(a, b) {
        Some(LineIntersection::SinglePoint { is_proper, .. }) => is_proper,
        Some(LineIntersection::Collinear { intersection }) => {
            intersection.start != intersection.end
        }
        None => false,
    }
}

fn same_point(a: (f64, f64), b: (f64, f64)) -> bool {
    (a.0 - b.0).abs() < POINT_EPSILON && (a.1 - b.1).abs() < POINT_EPSILON
}
