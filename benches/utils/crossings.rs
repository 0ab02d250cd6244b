#![allow(dead_code)]

use geo::Line;
use rstar::{RTree, RTreeObject};
use sweep_crossings::{find_crossings, naive::brute_force_crossings, Crossable, Intersections};

struct GeomWithData<R: RTreeObject, T>(R, T);

impl<R: RTreeObject, T> RTreeObject for GeomWithData<R, T> {
    type Envelope = R::Envelope;

    fn envelope(&self) -> Self::Envelope {
        self.0.envelope()
    }
}

pub fn count_bo(lines: &[Line<f64>]) -> usize {
    find_crossings(lines).count()
}

pub fn count_bo_lazy(lines: &[Line<f64>]) -> usize {
    lines.iter().collect::<Intersections<_>>().count()
}

pub fn count_brute(lines: &[Line<f64>]) -> usize {
    brute_force_crossings(lines).len()
}

/// Test only the pairs whose bounding boxes overlap.
pub fn count_rtree(lines: &[Line<f64>]) -> usize {
    let lines: Vec<_> = lines
        .iter()
        .enumerate()
        .map(|(i, l)| GeomWithData(*l, i))
        .collect();

    let tree = RTree::bulk_load(lines);
    tree.intersection_candidates_with_other_tree(&tree)
        .filter(|(l1, l2)| l1.1 < l2.1)
        .filter(|(l1, l2)| brute_force_crossings([l1.0.line(), l2.0.line()]).len() == 1)
        .count()
}
