//! Quadratic reference for the sweep.
//!
//! Tests every pair of segments against each other with the same
//! predicates and the same reporting rules as [`Sweep`](crate::Sweep),
//! so the two must agree on every input. Useful for testing, and for
//! small inputs where building the sweep isn't worth it.

use itertools::Itertools;
use log::warn;
use slab::Slab;

use crate::{
    crossings::Crossing,
    segments::{is_reportable, Segment},
    Crossable,
};

/// Find all crossings among `segments` by testing every pair.
///
/// Crossings are ordered by the input positions of the two segments.
pub fn brute_force_crossings<I>(segments: I) -> Vec<Crossing<<I::Item as Crossable>::Scalar>>
where
    I: IntoIterator,
    I::Item: Crossable,
{
    let mut storage = Slab::new();
    for (index, cr) in segments.into_iter().enumerate() {
        if let Err(err) = Segment::new(&mut storage, index, cr.line()) {
            warn!("skipping segment {}: {}", index, err);
        }
    }

    let segments: Vec<&Segment<_>> = storage.iter().map(|(_, segment)| segment).collect();
    segments
        .iter()
        .copied()
        .tuple_combinations()
        .filter_map(|(seg_lo, seg_hi)| {
            let geom = seg_lo.intersect(seg_hi)?;
            if !is_reportable(seg_lo, seg_hi, &geom) {
                return None;
            }
            Some(Crossing {
                segments: [seg_lo.index(), seg_hi.index()],
                geom,
            })
        })
        .collect()
}
