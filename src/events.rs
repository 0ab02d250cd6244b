use std::{
    cmp::Ordering,
    ops::{Add, Mul, Sub},
};

use geo::{Coordinate, GeoFloat};

/// A sweep event for the top-to-bottom plane sweep.
///
/// `other_key` is only set for [`EventType::Intersection`], and then
/// holds the larger of the two segment keys.
#[derive(Debug, Clone, Copy)]
pub struct Event<T: GeoFloat> {
    pub point: SweepPoint<T>,
    pub ty: EventType,
    pub segment_key: usize,
    pub other_key: Option<usize>,
}

impl<T: GeoFloat> Event<T> {
    /// Event for the crossing of two segments at `point`.
    ///
    /// The pair is stored in ascending key order, so the same pair
    /// discovered from either side produces the same event.
    pub fn intersection(point: SweepPoint<T>, key_1: usize, key_2: usize) -> Self {
        debug_assert_ne!(key_1, key_2, "segment can't intersect itself");
        Event {
            point,
            ty: EventType::Intersection,
            segment_key: key_1.min(key_2),
            other_key: Some(key_1.max(key_2)),
        }
    }

    /// The key pair of an intersection event.
    pub fn pair(&self) -> Option<(usize, usize)> {
        self.other_key.map(|other| (self.segment_key, other))
    }
}

/// Structural equality, consistent with the `Ord` impl.
impl<T: GeoFloat> PartialEq for Event<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: GeoFloat> Eq for Event<T> {}

impl<T: GeoFloat> PartialOrd for Event<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Events are ordered by point (in sweep order), then by type, and
/// finally by the segment keys. The keys only separate otherwise
/// identical events of different segments; two events that compare
/// equal are interchangeable.
impl<T: GeoFloat> Ord for Event<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.point
            .cmp(&other.point)
            .then_with(|| self.ty.cmp(&other.ty))
            .then_with(|| self.segment_key.cmp(&other.segment_key))
            .then_with(|| self.other_key.cmp(&other.other_key))
    }
}

/// Event type to associate with event.
///
/// The ordering of the variants is important for the algorithm.
/// Crossings at a point are processed before segments start or end
/// there, so the status holds the order just below the point when
/// segments are inserted or removed.
#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Clone, Copy, Hash)]
pub enum EventType {
    Intersection,
    Upper,
    Lower,
}

/// Wraps a [`Coordinate`] to support ordering along the sweep.
///
/// The sweep line moves from top to bottom, so points are ordered by
/// decreasing `y` and then by increasing `x`. Implements `PartialOrd`,
/// `Ord` and `Eq` even though `Coordinate` doesn't implement these.
///
/// Note that the trait impls exist even when `T` is not `Eq` or
/// `Ord`. We must ensure that any sweep point used as an event
/// contains values that can be consistently ordered.
///
/// The type doubles as a 2d vector: it supports `+`, `-`, scaling,
/// [`dot`](Self::dot), [`cross`](Self::cross) and [`norm`](Self::norm).
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SweepPoint<T: GeoFloat>(Coordinate<T>);

impl<T: GeoFloat> SweepPoint<T> {
    /// Create a point, or `None` if a component is not finite.
    pub fn try_new(x: T, y: T) -> Option<Self> {
        if x.is_finite() && y.is_finite() {
            Some(SweepPoint(Coordinate { x, y }))
        } else {
            None
        }
    }

    #[inline]
    pub fn x(&self) -> T {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> T {
        self.0.y
    }

    /// Get the underlying coordinate.
    #[inline]
    pub fn coord(&self) -> Coordinate<T> {
        self.0
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> T {
        self.0.x * other.0.x + self.0.y * other.0.y
    }

    /// The z-component of the 3d cross product.
    #[inline]
    pub fn cross(&self, other: &Self) -> T {
        self.0.x * other.0.y - self.0.y * other.0.x
    }

    #[inline]
    pub fn norm(&self) -> T {
        self.dot(self).sqrt()
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.0.x.is_finite() && self.0.y.is_finite()
    }
}

impl<T: GeoFloat> Add for SweepPoint<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        SweepPoint(self.0 + rhs.0)
    }
}

impl<T: GeoFloat> Sub for SweepPoint<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        SweepPoint(self.0 - rhs.0)
    }
}

impl<T: GeoFloat> Mul<T> for SweepPoint<T> {
    type Output = Self;

    fn mul(self, k: T) -> Self {
        SweepPoint(self.0 * k)
    }
}

/// Implement sweep ordering: higher `y` first, then lower `x`.
impl<T: GeoFloat> PartialOrd for SweepPoint<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match other.0.y.partial_cmp(&self.0.y) {
            Some(Ordering::Equal) => self.0.x.partial_cmp(&other.0.x),
            o => o,
        }
    }
}

/// Derive `Ord` from `PartialOrd` and expect to not fail.
impl<T: GeoFloat> Ord for SweepPoint<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other)
            .unwrap_or_else(|| panic!("non-finite sweep point: {:?} <=> {:?}", self, other))
    }
}

/// We derive `Eq` manually to not require `T: Eq`.
impl<T: GeoFloat> Eq for SweepPoint<T> {}

/// Create from `Coordinate` while checking the components are finite.
impl<T: GeoFloat> From<Coordinate<T>> for SweepPoint<T> {
    fn from(pt: Coordinate<T>) -> Self {
        assert!(
            pt.x.is_finite(),
            "sweep point requires a finite x-coordinate"
        );
        assert!(
            pt.y.is_finite(),
            "sweep point requires a finite y-coordinate"
        );
        SweepPoint(pt)
    }
}

impl<T: GeoFloat> From<(T, T)> for SweepPoint<T> {
    fn from((x, y): (T, T)) -> Self {
        Coordinate { x, y }.into()
    }
}
