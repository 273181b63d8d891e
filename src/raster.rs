//! Raster bucketing (spec §4.7): partitions overlapping raster-op
//! children into spatially coherent clusters so a single `op raster`
//! never scans vast empty regions.

use crate::float_types::Real;
use crate::geom::Point;

pub type Bbox = (Point, Point);

fn expand(bbox: Bbox, margin: Real) -> Bbox {
    (
        Point::new(bbox.0.x - margin, bbox.0.y - margin),
        Point::new(bbox.1.x + margin, bbox.1.y + margin),
    )
}

fn overlaps(a: Bbox, b: Bbox) -> bool {
    a.0.x <= b.1.x && b.0.x <= a.1.x && a.0.y <= b.1.y && b.0.y <= a.1.y
}

fn union(a: Bbox, b: Bbox) -> Bbox {
    (
        Point::new(a.0.x.min(b.0.x), a.0.y.min(b.0.y)),
        Point::new(a.1.x.max(b.1.x), a.1.y.max(b.1.y)),
    )
}

/// A cluster of child indices sharing one merged bbox.
#[derive(Debug, Clone)]
pub struct RasterCluster {
    pub members: Vec<usize>,
    pub bbox: Bbox,
}

/// Cluster `children_bboxes` (each child's *paint* bounds) by iterative
/// bbox-overlap merging, expanded by `margin`. A confirmation pass
/// re-checks true (unexpanded) bboxes so union-bbox bloat from one merge
/// doesn't falsely pull in an unrelated, merely-nearby child.
pub fn bucket_rasters(children_bboxes: &[Bbox], margin: Real) -> Vec<RasterCluster> {
    let mut clusters: Vec<RasterCluster> = children_bboxes
        .iter()
        .enumerate()
        .map(|(i, &bbox)| RasterCluster { members: vec![i], bbox })
        .collect();

    loop {
        let mut merged_any = false;
        'outer: for i in 0..clusters.len() {
            for j in (i + 1)..clusters.len() {
                if overlaps(expand(clusters[i].bbox, margin), expand(clusters[j].bbox, margin)) {
                    let confirmed = clusters[i]
                        .members
                        .iter()
                        .any(|&a| clusters[j].members.iter().any(|&b| {
                            overlaps(expand(children_bboxes[a], margin), expand(children_bboxes[b], margin))
                        }));
                    if confirmed {
                        let b = clusters.remove(j);
                        clusters[i].bbox = union(clusters[i].bbox, b.bbox);
                        clusters[i].members.extend(b.members);
                        merged_any = true;
                        break 'outer;
                    }
                }
            }
        }
        if !merged_any {
            break;
        }
    }
    clusters
}
