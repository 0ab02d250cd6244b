use std::cmp::Ordering;

use geo::{
    kernels::{Kernel, Orientation},
    Coordinate, GeoFloat, Line,
};
use slab::Slab;

use crate::{
    error::Error,
    events::{Event, EventType, SweepPoint},
    line_or_point::LineOrPoint,
};

/// An input line segment, as seen by the sweep.
///
/// The end points are canonicalized on construction: `upper` is the
/// end point met first by the sweep (greater `y`, or smaller `x` on a
/// tie), and `direction` points from `upper` to `lower`.
///
/// `sweep_y` and `x_at_sweep_y` record the last evaluation along the
/// sweep (see [`Segment::evaluate_at`]). They are informational and
/// never used as an ordering key.
#[derive(Debug, Clone)]
pub struct Segment<T: GeoFloat> {
    key: usize,
    index: usize,
    upper: SweepPoint<T>,
    lower: SweepPoint<T>,
    direction: SweepPoint<T>,
    sweep_y: T,
    x_at_sweep_y: T,
}

impl<T: GeoFloat> Segment<T> {
    /// Create and store a `Segment` for the input at position `index`.
    ///
    /// Fails if the line has a non-finite coordinate or zero length.
    pub(crate) fn new(
        storage: &mut Slab<Self>,
        index: usize,
        line: Line<T>,
    ) -> Result<&mut Self, Error> {
        let (upper, lower) = canonical_end_points(line)?;
        let entry = storage.vacant_entry();

        let segment = Segment {
            key: entry.key(),
            index,
            upper,
            lower,
            direction: lower - upper,
            sweep_y: upper.y(),
            x_at_sweep_y: upper.x(),
        };
        Ok(entry.insert(segment))
    }

    /// Get the events for both end points of this segment.
    pub(crate) fn events(&self) -> [Event<T>; 2] {
        [
            Event {
                point: self.upper,
                ty: EventType::Upper,
                segment_key: self.key,
                other_key: None,
            },
            Event {
                point: self.lower,
                ty: EventType::Lower,
                segment_key: self.key,
                other_key: None,
            },
        ]
    }

    /// Get the segment's key in the sweep storage.
    #[inline]
    pub fn key(&self) -> usize {
        self.key
    }

    /// Get the position of the segment in the input.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn upper(&self) -> SweepPoint<T> {
        self.upper
    }

    #[inline]
    pub fn lower(&self) -> SweepPoint<T> {
        self.lower
    }

    /// `lower - upper`.
    #[inline]
    pub fn direction(&self) -> SweepPoint<T> {
        self.direction
    }

    #[inline]
    pub fn line(&self) -> Line<T> {
        Line::new(self.upper.coord(), self.lower.coord())
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.upper.y() == self.lower.y()
    }

    /// Height of the last evaluation.
    #[inline]
    pub fn sweep_y(&self) -> T {
        self.sweep_y
    }

    /// The x-coordinate found by the last evaluation.
    #[inline]
    pub fn x_at_sweep_y(&self) -> T {
        self.x_at_sweep_y
    }

    /// The x-coordinate of the segment's line at the height of `at`.
    ///
    /// A horizontal segment has no single x at its own height; it is
    /// taken to be at `at.x`, clamped to the segment's extent.
    pub fn x_at(&self, at: SweepPoint<T>) -> T {
        if self.is_horizontal() {
            at.x().max(self.upper.x()).min(self.lower.x())
        } else {
            self.upper.x()
                + self.direction.x() * (at.y() - self.upper.y()) / self.direction.y()
        }
    }

    /// Evaluate the segment at the sweep position `at`, recording the
    /// height and the x-coordinate found there.
    pub fn evaluate_at(&mut self, at: SweepPoint<T>) -> T {
        self.sweep_y = at.y();
        self.x_at_sweep_y = self.x_at(at);
        self.x_at_sweep_y
    }

    /// The cross product `(lower - upper) × (p - upper)`.
    ///
    /// Positive if `p` is to the right of the segment (which points
    /// downwards), negative if to the left, zero if collinear.
    pub fn orientation_test(&self, p: SweepPoint<T>) -> T {
        self.direction.cross(&(p - self.upper))
    }

    /// Exact sign of [`Self::orientation_test`].
    #[inline]
    pub fn orientation(&self, p: SweepPoint<T>) -> Orientation {
        T::Ker::orient2d(self.upper.coord(), self.lower.coord(), p.coord())
    }

    #[inline]
    pub fn is_endpoint(&self, p: SweepPoint<T>) -> bool {
        p == self.upper || p == self.lower
    }

    /// Intersect with `other` and return a point, an overlapping
    /// segment or `None`.
    ///
    /// Touching counts as intersecting. When an end point of one
    /// segment lies on the other, that end point is returned exactly.
    pub fn intersect(&self, other: &Self) -> Option<LineOrPoint<T>> {
        use Orientation::*;

        let o1 = self.orientation(other.upper);
        let o2 = self.orientation(other.lower);
        if o1 == o2 && o1 != Collinear {
            return None;
        }
        let o3 = other.orientation(self.upper);
        let o4 = other.orientation(self.lower);
        if o3 == o4 && o3 != Collinear {
            return None;
        }

        if o1 == Collinear && o2 == Collinear {
            // Both on one line: intersect the extents along the sweep.
            let start = self.upper.max(other.upper);
            let end = self.lower.min(other.lower);
            return match start.cmp(&end) {
                Ordering::Less => Some(LineOrPoint::Line(start, end)),
                Ordering::Equal => Some(LineOrPoint::Point(start)),
                Ordering::Greater => None,
            };
        }

        let touch = [
            (o1, other.upper),
            (o2, other.lower),
            (o3, self.upper),
            (o4, self.lower),
        ]
        .into_iter()
        .find(|(o, _)| *o == Collinear)
        .map(|(_, p)| p);
        if let Some(p) = touch {
            return Some(LineOrPoint::Point(p));
        }

        let numer = self.direction.cross(&(other.upper - self.upper));
        let denom = other.direction.cross(&self.direction);
        let t = numer / denom;
        let pt = other.upper + other.direction * t;
        debug_assert!(pt.is_finite(), "crossing segments produced {:?}", pt);

        // Keep rounding from pushing the point out of either segment's
        // bounding box; a horizontal segment keeps its crossings at
        // exactly its own height.
        let (x_lo, x_hi) = overlap(self.x_range(), other.x_range());
        let (y_lo, y_hi) = overlap(self.y_range(), other.y_range());
        let x = pt.x().max(x_lo).min(x_hi);
        let y = pt.y().max(y_lo).min(y_hi);
        Some(LineOrPoint::Point(SweepPoint::from((x, y))))
    }

    fn x_range(&self) -> (T, T) {
        let (a, b) = (self.upper.x(), self.lower.x());
        (a.min(b), a.max(b))
    }

    fn y_range(&self) -> (T, T) {
        (self.lower.y(), self.upper.y())
    }

    /// Which side of the point `at` the segment passes on: `Less` if
    /// left of it, `Equal` if through it.
    #[inline]
    pub(crate) fn side_of(&self, at: SweepPoint<T>) -> Ordering {
        orientation_as_ordering(self.orientation(at))
    }

    /// Order of two segments through a common point, just below it.
    ///
    /// Horizontal segments sort after all others through the point.
    pub(crate) fn cmp_below(&self, other: &Self) -> Ordering {
        orientation_as_ordering(T::Ker::orient2d(
            Coordinate::zero(),
            self.direction.coord(),
            other.direction.coord(),
        ))
        .then_with(|| self.key.cmp(&other.key))
    }
}

/// Whether a meeting of `a` and `b` at `geom` is a reportable crossing.
///
/// Segments that only share an end point (e.g. consecutive edges of a
/// polyline) are not reported.
pub(crate) fn is_reportable<T: GeoFloat>(
    a: &Segment<T>,
    b: &Segment<T>,
    geom: &LineOrPoint<T>,
) -> bool {
    match geom {
        LineOrPoint::Point(p) => !(a.is_endpoint(*p) && b.is_endpoint(*p)),
        LineOrPoint::Line(_, _) => true,
    }
}

fn canonical_end_points<T: GeoFloat>(
    line: Line<T>,
) -> Result<(SweepPoint<T>, SweepPoint<T>), Error> {
    let start = SweepPoint::try_new(line.start.x, line.start.y).ok_or(Error::NonFinite)?;
    let end = SweepPoint::try_new(line.end.x, line.end.y).ok_or(Error::NonFinite)?;
    match start.cmp(&end) {
        Ordering::Less => Ok((start, end)),
        Ordering::Greater => Ok((end, start)),
        Ordering::Equal => Err(Error::ZeroLength),
    }
}

fn overlap<T: GeoFloat>((lo_1, hi_1): (T, T), (lo_2, hi_2): (T, T)) -> (T, T) {
    (lo_1.max(lo_2), hi_1.min(hi_2))
}

/// Helper to convert orientation-2d into an ordering
///
/// A point counter-clockwise of a downward segment lies to its right,
/// so the segment orders before it.
#[inline]
fn orientation_as_ordering(orientation: Orientation) -> Ordering {
    match orientation {
        Orientation::CounterClockwise => Ordering::Less,
        Orientation::Clockwise => Ordering::Greater,
        Orientation::Collinear => Ordering::Equal,
    }
}
