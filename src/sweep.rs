use std::{collections::HashSet, ops::Range};

use geo::GeoFloat;
use log::{debug, trace, warn};
use slab::Slab;
use smallvec::{smallvec, SmallVec};

use crate::{
    active::SweepStatus,
    crossable::Crossable,
    crossings::{Crossing, SweepReport},
    events::{Event, EventType, SweepPoint},
    line_or_point::LineOrPoint,
    queue::EventQueue,
    segments::{is_reportable, Segment},
};

/// Counters collected while sweeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Input segments taking part in the sweep.
    pub segments: usize,
    /// Input segments rejected as degenerate.
    pub skipped: usize,
    /// Events processed, of any type.
    pub events: usize,
    pub upper_events: usize,
    pub lower_events: usize,
    pub intersection_events: usize,
}

/// Sweep algorithm for detecting all crossings.
///
/// This is the [Bentley-Ottman] sweep: a horizontal line moves from
/// top to bottom, stopping at segment end points and at discovered
/// crossings. Maintains a queue of pending events and the currently
/// active segments. End-users should typically use
/// [`find_crossings`](crate::find_crossings) or the
/// [`Intersections`](crate::Intersections) iterator built around it.
///
/// [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
pub struct Sweep<T: GeoFloat> {
    segments: Slab<Segment<T>>,
    events: EventQueue<T>,
    status: SweepStatus,
    reported: HashSet<(usize, usize)>,
    stats: SweepStats,
}

impl<T: GeoFloat> Sweep<T> {
    /// Load the segments and seed the event queue with their end points.
    ///
    /// Degenerate inputs (zero length, non-finite coordinates) are
    /// skipped; crossings refer to inputs by their position in `iter`.
    pub fn new<I>(iter: I) -> Self
    where
        I: IntoIterator,
        I::Item: Crossable<Scalar = T>,
    {
        let iter = iter.into_iter();
        let size = {
            let (min_size, max_size) = iter.size_hint();
            max_size.unwrap_or(min_size)
        };

        let mut sweep = Sweep {
            segments: Slab::with_capacity(size),
            events: EventQueue::default(),
            status: SweepStatus::default(),
            reported: HashSet::new(),
            stats: SweepStats::default(),
        };
        for (index, cr) in iter.enumerate() {
            match Segment::new(&mut sweep.segments, index, cr.line()) {
                Ok(segment) => {
                    for e in segment.events() {
                        sweep.events.push(e);
                    }
                    sweep.stats.segments += 1;
                }
                Err(err) => {
                    warn!("skipping segment {}: {}", index, err);
                    sweep.stats.skipped += 1;
                }
            }
        }
        debug!(
            "loaded {} segments ({} skipped), {} events queued",
            sweep.stats.segments,
            sweep.stats.skipped,
            sweep.events.len()
        );
        sweep
    }

    /// Process every event at the next point in the queue, and return
    /// that point.
    ///
    /// Calls `cb` for every crossing found there.
    pub fn next_event<F: FnMut(Crossing<T>)>(&mut self, mut cb: F) -> Option<SweepPoint<T>> {
        let first = self.events.pop()?;
        let pt = first.point;
        let mut events: SmallVec<[Event<T>; 4]> = smallvec![first];
        while self.events.peek_point() == Some(pt) {
            events.extend(self.events.pop());
        }
        self.stats.events += events.len();
        self.handle_point(pt, &events, &mut cb);

        #[cfg(any(test, feature = "slow-asserts"))]
        {
            if let Err(msg) = self
                .status
                .validate(pt, T::epsilon().sqrt(), &mut self.segments)
            {
                panic!("{}", msg);
            }
        }

        Some(pt)
    }

    /// Peek and return the next point in the sweep.
    #[inline]
    pub fn peek_point(&self) -> Option<SweepPoint<T>> {
        self.events.peek_point()
    }

    /// Run the sweep to completion.
    pub fn run(mut self) -> SweepReport<T> {
        let mut crossings = Vec::new();
        while self.next_event(|c| crossings.push(c)).is_some() {}
        debug_assert!(self.status.is_empty(), "segments left active after the sweep");
        debug!(
            "sweep done: {} events, {} crossings",
            self.stats.events,
            crossings.len()
        );
        SweepReport {
            stats: self.stats,
            crossings,
        }
    }

    #[inline]
    pub fn stats(&self) -> &SweepStats {
        &self.stats
    }

    /// Number of segments currently crossing the sweep line.
    #[inline]
    pub fn active_len(&self) -> usize {
        self.status.len()
    }

    /// Input positions of the active segments, left to right.
    pub fn active_segments(&self) -> impl Iterator<Item = usize> + '_ {
        self.status.keys().iter().map(move |&k| self.segments[k].index())
    }

    /// Handle all events at the sweep position `at`.
    ///
    /// The segments through `at` form one block of the status. Every
    /// pair among them and the segments starting at `at` is reported,
    /// then the block is replaced by its members that go on below `at`,
    /// re-ordered.
    fn handle_point<F: FnMut(Crossing<T>)>(
        &mut self,
        at: SweepPoint<T>,
        events: &[Event<T>],
        cb: &mut F,
    ) {
        use EventType::*;

        let mut upper: SmallVec<[usize; 4]> = SmallVec::new();
        let mut lower: SmallVec<[usize; 4]> = SmallVec::new();
        let mut crossing: SmallVec<[usize; 4]> = SmallVec::new();
        for event in events {
            trace!("handling event: {:?}", event);
            match event.ty {
                Upper => {
                    self.stats.upper_events += 1;
                    upper.push(event.segment_key);
                }
                Lower => {
                    self.stats.lower_events += 1;
                    lower.push(event.segment_key);
                }
                Intersection => {
                    self.stats.intersection_events += 1;
                    match event.pair() {
                        Some(pair) if !self.reported.contains(&pair) => {
                            crossing.extend([pair.0, pair.1]);
                        }
                        _ => trace!("intersection at {:?} already handled", at),
                    }
                }
            }
        }

        // Widen the block to segments that rounding put beside `at`.
        let mut range = self.status.range_through(at, &self.segments);
        for &key in lower.iter().chain(crossing.iter()) {
            match self.status.position(key) {
                Some(pos) => range = range.start.min(pos)..range.end.max(pos + 1),
                None => warn!("segment {} is not active at {:?}", key, at),
            }
        }

        let meeting: SmallVec<[usize; 8]> = self.status.keys()[range.clone()]
            .iter()
            .chain(upper.iter())
            .copied()
            .collect();
        for (i, &a) in meeting.iter().enumerate() {
            for &b in meeting[i + 1..].iter() {
                self.report(a, b, cb);
            }
        }

        let mut below: SmallVec<[usize; 8]> = meeting
            .iter()
            .copied()
            .filter(|key| !lower.contains(key))
            .collect();
        let range = self
            .status
            .replace_below(range, &mut below, at, &crossing, &mut self.segments);
        if meeting.len() > 1 {
            debug!("status[{:?}] below {:?}: {:?}", range, at, below);
        }
        self.check_neighbours(range, at, cb);
    }

    /// Test the adjacent pairs from the entry left of `range` to the
    /// entry right of it.
    fn check_neighbours<F: FnMut(Crossing<T>)>(
        &mut self,
        range: Range<usize>,
        at: SweepPoint<T>,
        cb: &mut F,
    ) {
        for pos in range.start.saturating_sub(1)..range.end {
            if let (Some(a), Some(b)) = (self.status.key_at(pos), self.status.key_at(pos + 1)) {
                self.check_pair(a, b, at, cb);
            }
        }
    }

    /// Test two segments adjacent in the status for a crossing.
    ///
    /// Crossings after the sweep position `at` are queued. A crossing
    /// at or before `at` that was not handled there is handled now.
    fn check_pair<F: FnMut(Crossing<T>)>(
        &mut self,
        a: usize,
        b: usize,
        at: SweepPoint<T>,
        cb: &mut F,
    ) {
        let (lo, hi) = (a.min(b), a.max(b));
        if self.reported.contains(&(lo, hi)) {
            return;
        }
        let (seg_lo, seg_hi) = (&self.segments[lo], &self.segments[hi]);
        let geom = match seg_lo.intersect(seg_hi) {
            Some(geom) if is_reportable(seg_lo, seg_hi, &geom) => geom,
            _ => return,
        };

        match geom {
            LineOrPoint::Point(p) if p > at => {
                if self.events.push(Event::intersection(p, lo, hi)) {
                    debug!("queued intersection of {} and {} at {:?}", lo, hi, p);
                }
            }
            LineOrPoint::Point(p) => {
                debug!("late intersection of {} and {} at {:?}, sweep at {:?}", lo, hi, p, at);
                self.cross_late(lo, hi, at, cb);
            }
            LineOrPoint::Line(_, _) => self.report(lo, hi, cb),
        }
    }

    /// Report two adjacent segments that met at or before `at`, and put
    /// them in their order below `at`.
    fn cross_late<F: FnMut(Crossing<T>)>(
        &mut self,
        a: usize,
        b: usize,
        at: SweepPoint<T>,
        cb: &mut F,
    ) {
        self.report(a, b, cb);
        let (pos_a, pos_b) = match (self.status.position(a), self.status.position(b)) {
            (Some(pos_a), Some(pos_b)) => (pos_a, pos_b),
            _ => return,
        };
        let range = pos_a.min(pos_b)..pos_a.max(pos_b) + 1;
        let mut keys: SmallVec<[usize; 8]> =
            SmallVec::from_slice(&self.status.keys()[range.clone()]);
        let range = self
            .status
            .replace_below(range, &mut keys, at, &[a, b], &mut self.segments);
        self.check_neighbours(range, at, cb);
    }

    /// Report the meeting of two segments, once per pair.
    fn report<F: FnMut(Crossing<T>)>(&mut self, a: usize, b: usize, cb: &mut F) {
        let (lo, hi) = (a.min(b), a.max(b));
        if self.reported.contains(&(lo, hi)) {
            return;
        }
        let (seg_lo, seg_hi) = (&self.segments[lo], &self.segments[hi]);
        let geom = match seg_lo.intersect(seg_hi) {
            Some(geom) if is_reportable(seg_lo, seg_hi, &geom) => geom,
            _ => return,
        };
        self.reported.insert((lo, hi));
        debug!("crossing of {} and {}: {:?}", lo, hi, geom);
        cb(Crossing {
            segments: [seg_lo.index(), seg_hi.index()],
            geom,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossings::tests::init_log;

    #[test]
    fn test_step_events() {
        init_log();
        let input = vec![[0., 0., 2., 2.], [0., 2., 2., 0.]];
        let mut sweep = Sweep::new(input.iter());
        assert_eq!(sweep.peek_point(), Some(SweepPoint::from((0., 2.))));

        let mut found = vec![];
        let mut points = vec![];
        while let Some(pt) = sweep.next_event(|c| found.push(c)) {
            points.push(pt);
            assert!(sweep.active_len() <= 2);
        }
        assert_eq!(
            points,
            vec![
                SweepPoint::from((0., 2.)),
                SweepPoint::from((2., 2.)),
                SweepPoint::from((1., 1.)),
                SweepPoint::from((0., 0.)),
                SweepPoint::from((2., 0.)),
            ]
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].segments, [0, 1]);
        assert_eq!(sweep.active_len(), 0);
        assert_eq!(
            *sweep.stats(),
            SweepStats {
                segments: 2,
                skipped: 0,
                events: 5,
                upper_events: 2,
                lower_events: 2,
                intersection_events: 1,
            }
        );
    }

    #[test]
    fn test_active_segments_order() {
        let input = vec![[4., 3., 4., 0.], [0., 4., 0., 0.], [2., 5., 2., 1.]];
        let mut sweep = Sweep::new(input);
        for _ in 0..3 {
            sweep.next_event(|_| panic!("no crossings expected"));
        }
        assert_eq!(sweep.active_segments().collect::<Vec<_>>(), vec![1, 2, 0]);
    }

    #[test]
    fn test_events_at_one_point_together() {
        init_log();
        // 2 starts where 0 and 1 cross.
        let input = vec![[-1., 1., 1., -1.], [1., 1., -1., -1.], [0., 0., 5., -1.]];
        let mut sweep = Sweep::new(input);
        let mut found = vec![];
        let mut steps = 0;
        while let Some(pt) = sweep.next_event(|c| found.push(c.segments)) {
            steps += 1;
            if pt == SweepPoint::from((0., 0.)) {
                assert_eq!(found.len(), 3);
                assert_eq!(sweep.active_segments().collect::<Vec<_>>(), vec![1, 0, 2]);
            }
        }
        found.sort();
        assert_eq!(found, vec![[0, 1], [0, 2], [1, 2]]);
        assert_eq!(steps, 6);
        assert_eq!(sweep.stats().events, 7);
        assert_eq!(sweep.stats().intersection_events, 1);
    }

    #[test]
    fn test_skips_degenerate() {
        let input = vec![[1., 1., 1., 1.], [0., f64::NAN, 1., 1.], [0., 0., 1., 1.]];
        let report = Sweep::new(input).run();
        assert_eq!(report.stats.segments, 1);
        assert_eq!(report.stats.skipped, 2);
        assert_eq!(report.stats.events, 2);
    }
}
