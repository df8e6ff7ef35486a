use crate::geometry::face::GlyphFace;
use geo::{BooleanOps, Intersects, MultiPolygon};
use kurbo::Rect;
use log::debug;

/// Merge overlapping faces into a minimal covering set.
///
/// Faces are grouped into clusters of mutually overlapping faces. A face that
/// touches nothing is passed through untouched, so curved outlines survive;
/// each larger cluster is replaced by the polygonal union of its members.
/// Output order follows the first face of each cluster.
pub fn fuse_faces(faces: &[GlyphFace], tolerance: f64) -> Vec<GlyphFace> {
    let polygons: Vec<geo::Polygon<f64>> =
        faces.iter().map(|f| f.to_geo_polygon(tolerance)).collect();

    let mut cluster: Vec<usize> = (0..faces.len()).collect();
    for i in 0..faces.len() {
        for j in (i + 1)..faces.len() {
            if !boxes_touch(faces[i].bounding_box(), faces[j].bounding_box()) {
                continue;
            }
            if polygons[i].intersects(&polygons[j]) {
                let (a, b) = (find(&mut cluster, i), find(&mut cluster, j));
                if a != b {
                    cluster[a.max(b)] = a.min(b);
                }
            }
        }
    }

    let mut fused = Vec::new();
    for root in 0..faces.len() {
        if find(&mut cluster, root) != root {
            continue;
        }
        let members: Vec<usize> = (0..faces.len())
            .filter(|&k| find(&mut cluster, k) == root)
            .collect();

        if members.len() == 1 {
            fused.push(faces[root].clone());
            continue;
        }

        debug!("fusing {} overlapping faces", members.len());
        let first = MultiPolygon::new(vec![polygons[members[0]].clone()]);
        let union = members[1..].iter().fold(first, |acc, &k| {
            acc.union(&MultiPolygon::new(vec![polygons[k].clone()]))
        });
        for polygon in &union.0 {
            let mut face = GlyphFace::from_geo_polygon(polygon);
            face.orient();
            fused.push(face);
        }
    }
    fused
}

fn boxes_touch(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

fn find(cluster: &mut [usize], mut i: usize) -> usize {
    while cluster[i] != i {
        cluster[i] = cluster[cluster[i]];
        i = cluster[i];
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::wire::GlyphWire;

    fn square(x: f64, y: f64, side: f64) -> GlyphFace {
        GlyphFace::new(GlyphWire::from_points(&[
            (x, y),
            (x + side, y),
            (x + side, y + side),
            (x, y + side),
        ]))
    }

    #[test]
    fn test_disjoint_faces_are_unchanged() {
        let faces = vec![square(0.0, 0.0, 1.0), square(3.0, 0.0, 1.0), square(6.0, 0.0, 1.0)];
        let fused = fuse_faces(&faces, 0.01);
        assert_eq!(fused, faces);
    }

    #[test]
    fn test_overlapping_faces_merge() {
        let faces = vec![square(0.0, 0.0, 2.0), square(1.0, 1.0, 2.0), square(10.0, 0.0, 1.0)];
        let fused = fuse_faces(&faces, 0.01);
        assert_eq!(fused.len(), 2);
        assert!((fused[0].area() - 7.0).abs() < 1e-9);
        assert_eq!(fused[1], faces[2]);
        assert!(fused.iter().all(|f| f.normal_z() > 0.0));
    }

    #[test]
    fn test_fusion_is_idempotent() {
        let faces = vec![square(0.0, 0.0, 2.0), square(1.0, 1.0, 2.0)];
        let once = fuse_faces(&faces, 0.01);
        let twice = fuse_faces(&once, 0.01);
        assert_eq!(once, twice);
    }
}
