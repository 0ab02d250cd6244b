use std::{cmp::Ordering, ops::Range};

use geo::GeoFloat;
use slab::Slab;

use crate::{events::SweepPoint, segments::Segment};

/// The segments currently crossing the sweep line, left to right.
///
/// Entries are keys into the segment storage. The order is only ever
/// decided against an explicit sweep position passed by the caller;
/// segments are never re-keyed while stored. All changes at a sweep
/// position go through [`SweepStatus::replace_below`], which takes the
/// block of segments through that position out, re-orders it and puts
/// it back.
#[derive(Debug, Default)]
pub struct SweepStatus {
    active: Vec<usize>,
}

impl SweepStatus {
    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// The stored keys, left to right.
    #[inline]
    pub fn keys(&self) -> &[usize] {
        &self.active
    }

    #[inline]
    pub fn key_at(&self, position: usize) -> Option<usize> {
        self.active.get(position).copied()
    }

    pub fn position(&self, key: usize) -> Option<usize> {
        self.active.iter().position(|&k| k == key)
    }

    /// Positions of the segments passing through `at`.
    ///
    /// The status must be ordered for the sweep position `at`: every
    /// crossing before `at` has been processed. If no segment passes
    /// through `at`, the range is empty and starts where segments
    /// starting at `at` belong.
    pub fn range_through<T: GeoFloat>(
        &self,
        at: SweepPoint<T>,
        storage: &Slab<Segment<T>>,
    ) -> Range<usize> {
        let start = self
            .active
            .partition_point(|&k| storage[k].side_of(at) == Ordering::Less);
        let len = self.active[start..]
            .partition_point(|&k| storage[k].side_of(at) == Ordering::Equal);
        start..start + len
    }

    /// Replace the entries at `range` with `keys`, in their order just
    /// below `at`. Returns the positions of the new entries.
    ///
    /// Keys through `at`, and keys listed in `through`, are ordered by
    /// direction. The latter covers segments whose computed meeting
    /// point was rounded off them. Any other key passes beside `at` and
    /// goes to that side of the ones through it, keeping its order
    /// relative to others on the same side.
    pub fn replace_below<T: GeoFloat>(
        &mut self,
        range: Range<usize>,
        keys: &mut [usize],
        at: SweepPoint<T>,
        through: &[usize],
        storage: &mut Slab<Segment<T>>,
    ) -> Range<usize> {
        for &key in keys.iter() {
            storage[key].evaluate_at(at);
        }

        let storage = &*storage;
        let side = |key: usize| {
            if through.contains(&key) {
                Ordering::Equal
            } else {
                storage[key].side_of(at)
            }
        };
        keys.sort_by(|&a, &b| {
            let side_a = side(a);
            side_a.cmp(&side(b)).then_with(|| match side_a {
                Ordering::Equal => storage[a].cmp_below(&storage[b]),
                _ => Ordering::Equal,
            })
        });

        let tail = self.active.split_off(range.end);
        self.active.truncate(range.start);
        self.active.extend_from_slice(keys);
        let end = self.active.len();
        self.active.extend(tail);
        range.start..end
    }

    /// Evaluate every active segment at `at` and check that the
    /// x-coordinates are non-decreasing, up to a relative `tolerance`.
    #[cfg(any(test, feature = "slow-asserts"))]
    pub fn validate<T: GeoFloat>(
        &self,
        at: SweepPoint<T>,
        tolerance: T,
        storage: &mut Slab<Segment<T>>,
    ) -> Result<(), String> {
        let mut prev: Option<(usize, T)> = None;
        for &key in self.active.iter() {
            let x = storage[key].evaluate_at(at);
            if let Some((prev_key, prev_x)) = prev {
                let scale = T::one().max(x.abs()).max(prev_x.abs());
                if prev_x - x > tolerance * scale {
                    return Err(format!(
                        "status out of order at {:?}: segment {} (x = {:?}) \
                         before segment {} (x = {:?})",
                        at, prev_key, prev_x, key, x
                    ));
                }
            }
            prev = Some((key, x));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use geo::Line;

    use super::*;

    fn store(lines: &[[f64; 4]]) -> Slab<Segment<f64>> {
        let mut slab = Slab::new();
        for (i, &[x1, y1, x2, y2]) in lines.iter().enumerate() {
            Segment::new(&mut slab, i, Line::from([(x1, y1), (x2, y2)])).unwrap();
        }
        slab
    }

    fn pt(x: f64, y: f64) -> SweepPoint<f64> {
        SweepPoint::from((x, y))
    }

    /// Add the segment at `key` at its upper end point, the way the
    /// sweep does. Returns the positions of the re-ordered block.
    fn insert(
        status: &mut SweepStatus,
        key: usize,
        slab: &mut Slab<Segment<f64>>,
    ) -> Range<usize> {
        let at = slab[key].upper();
        let range = status.range_through(at, slab);
        let mut keys: Vec<usize> = status.keys()[range.clone()].to_vec();
        keys.push(key);
        status.replace_below(range, &mut keys, at, &[], slab)
    }

    #[test]
    fn test_insert_and_range_through() {
        let mut slab = store(&[
            [0., 10., 0., 0.],
            [5., 8., 5., 0.],
            [2., 6., 2., 0.],
            [2., 6., 4., 0.],
        ]);
        let mut status = SweepStatus::default();

        assert_eq!(insert(&mut status, 0, &mut slab), 0..1);
        assert_eq!(insert(&mut status, 1, &mut slab), 1..2);
        assert_eq!(insert(&mut status, 2, &mut slab), 1..2);
        // Same start as 2, but heads to the right below it.
        assert_eq!(insert(&mut status, 3, &mut slab), 1..3);
        assert_eq!(status.keys(), &[0, 2, 3, 1]);
        assert!(status.validate(pt(0., 3.), 1e-12, &mut slab).is_ok());

        assert_eq!(status.range_through(pt(2., 3.), &slab), 1..2);
        assert_eq!(status.range_through(pt(1., 3.), &slab), 1..1);
        assert_eq!(status.range_through(pt(6., 3.), &slab), 4..4);
        assert_eq!(status.position(3), Some(2));

        // Lower end of 2: drop it from its block.
        let at = pt(2., 0.);
        let range = status.range_through(at, &slab);
        assert_eq!(range, 1..2);
        assert_eq!(status.replace_below(range, &mut [], at, &[], &mut slab), 1..1);
        assert_eq!(status.keys(), &[0, 3, 1]);
        assert_eq!(status.position(2), None);
    }

    #[test]
    fn test_insert_left_of_horizontal() {
        let mut slab = store(&[[0., 2., 4., 2.], [1., 2., 1., 0.]]);
        let mut status = SweepStatus::default();
        insert(&mut status, 0, &mut slab);
        assert_eq!(status.range_through(pt(1., 2.), &slab), 0..1);
        insert(&mut status, 1, &mut slab);
        assert_eq!(status.keys(), &[1, 0]);
    }

    #[test]
    fn test_replace_below_crossing() {
        // Three segments meeting at the origin, and one bystander.
        let mut slab = store(&[
            [-1., 1., 1., -1.],
            [0., 1., 0., -1.],
            [1., 1., -1., -1.],
            [5., 1., 5., -1.],
        ]);
        let mut status = SweepStatus::default();
        for key in 0..4 {
            insert(&mut status, key, &mut slab);
        }
        assert_eq!(status.keys(), &[0, 1, 2, 3]);

        let origin = pt(0., 0.);
        let range = status.range_through(origin, &slab);
        assert_eq!(range, 0..3);
        let mut keys: Vec<usize> = status.keys()[range.clone()].to_vec();
        assert_eq!(status.replace_below(range, &mut keys, origin, &[], &mut slab), 0..3);
        assert_eq!(status.keys(), &[2, 1, 0, 3]);
        assert!(status.validate(pt(0., -0.5), 1e-12, &mut slab).is_ok());

        // Idempotent.
        let mut keys = vec![2, 1, 0];
        status.replace_below(0..3, &mut keys, origin, &[], &mut slab);
        assert_eq!(status.keys(), &[2, 1, 0, 3]);
    }

    #[test]
    fn test_replace_below_keeps_bystanders_aside() {
        // 0 and 1 cross at the origin; 2 passes just right of it.
        let mut slab = store(&[
            [-1., 1., 1., -1.],
            [1., 1., -1., -1.],
            [0.001, 1., 0.001, -1.],
        ]);
        // A point on neither 0 nor 1, standing in for a rounded crossing.
        let at = pt(0., 1e-9);
        assert_eq!(slab[0].side_of(at), Ordering::Less);
        assert_eq!(slab[1].side_of(at), Ordering::Greater);

        let mut status = SweepStatus {
            active: vec![0, 2, 1],
        };
        let mut keys = vec![0, 2, 1];
        status.replace_below(0..3, &mut keys, at, &[], &mut slab);
        assert_eq!(status.keys(), &[0, 2, 1]);

        let mut keys = vec![0, 2, 1];
        status.replace_below(0..3, &mut keys, at, &[0, 1], &mut slab);
        assert_eq!(status.keys(), &[1, 0, 2]);
    }
}
