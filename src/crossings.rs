use std::{collections::VecDeque, iter::FromIterator};

use geo::{Coordinate, GeoFloat};

use crate::{
    line_or_point::LineOrPoint,
    sweep::{Sweep, SweepStats},
    Crossable,
};

/// Two input segments meeting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing<T: GeoFloat> {
    /// Positions of the two segments in the input, ascending.
    pub segments: [usize; 2],

    /// Where they meet: a point, or the shared part of two collinear
    /// segments.
    pub geom: LineOrPoint<T>,
}

impl<T: GeoFloat> Crossing<T> {
    /// The crossing point, or the first point of an overlap.
    #[inline]
    pub fn point(&self) -> Coordinate<T> {
        self.geom.coord()
    }

    #[inline]
    pub fn is_overlap(&self) -> bool {
        self.geom.is_line()
    }
}

/// Everything learned from one complete sweep.
#[derive(Debug, Clone)]
pub struct SweepReport<T: GeoFloat> {
    pub stats: SweepStats,

    /// All crossings, in sweep order (top to bottom, then left to right).
    pub crossings: Vec<Crossing<T>>,
}

impl<T: GeoFloat> SweepReport<T> {
    /// Number of crossings found.
    #[inline]
    pub fn count(&self) -> usize {
        self.crossings.len()
    }
}

/// Find all crossings among `segments` and report them along with the
/// sweep counters.
pub fn find_crossings<I>(segments: I) -> SweepReport<<I::Item as Crossable>::Scalar>
where
    I: IntoIterator,
    I::Item: Crossable,
{
    Sweep::new(segments).run()
}

/// Iterator that yields all crossings.
///
/// Yields crossings and overlaps of a set of line segments, in sweep
/// order, doing only as much of the sweep as needed. Construct it by
/// `collect`-ing an iterator of [`Crossable`]s.
///
/// The implementation uses the [Bentley-Ottman] algorithm; this avoids
/// testing every pair of segments when the number of crossings is
/// small compared to the number of pairs.
///
/// [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
pub struct Intersections<T: GeoFloat> {
    sweep: Sweep<T>,
    pending: VecDeque<Crossing<T>>,
}

impl<T: GeoFloat> Intersections<T> {
    /// Counters of the sweep so far.
    pub fn stats(&self) -> &SweepStats {
        self.sweep.stats()
    }
}

impl<T: GeoFloat, C: Crossable<Scalar = T>> FromIterator<C> for Intersections<T> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Intersections {
            sweep: Sweep::new(iter),
            pending: VecDeque::new(),
        }
    }
}

impl<T: GeoFloat> Iterator for Intersections<T> {
    type Item = Crossing<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let pending = &mut self.pending;
        while pending.is_empty() {
            self.sweep.next_event(|crossing| pending.push_back(crossing))?;
        }
        pending.pop_front()
    }
}
