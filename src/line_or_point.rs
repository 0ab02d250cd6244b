use geo::{Coordinate, GeoFloat, Line};

use crate::events::SweepPoint;

/// Either a single point or a line segment where two segments meet.
///
/// The `Line` variant describes a collinear overlap; its end points
/// are ordered along the sweep and are distinct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineOrPoint<T: GeoFloat> {
    Point(SweepPoint<T>),
    Line(SweepPoint<T>, SweepPoint<T>),
}

impl<T: GeoFloat> LineOrPoint<T> {
    /// Checks if the variant is a line.
    #[inline]
    pub fn is_line(&self) -> bool {
        matches!(self, LineOrPoint::Line(_, _))
    }

    /// Returns a [`Line`]; a point becomes a degenerate line.
    #[inline]
    pub fn line(&self) -> Line<T> {
        match self {
            LineOrPoint::Line(p, q) => Line::new(p.coord(), q.coord()),
            LineOrPoint::Point(p) => Line::new(p.coord(), p.coord()),
        }
    }

    /// Returns the first point of the geometry in sweep order.
    #[inline]
    pub fn first(&self) -> SweepPoint<T> {
        *match self {
            LineOrPoint::Point(p) => p,
            LineOrPoint::Line(p, _) => p,
        }
    }

    /// Returns the coordinate where the geometry is first met by the
    /// sweep.
    #[inline]
    pub fn coord(&self) -> Coordinate<T> {
        self.first().coord()
    }
}

impl<T: GeoFloat> From<SweepPoint<T>> for LineOrPoint<T> {
    fn from(pt: SweepPoint<T>) -> Self {
        LineOrPoint::Point(pt)
    }
}

/// Build from two points, collapsing to a `Point` if they are equal.
impl<T: GeoFloat> From<(SweepPoint<T>, SweepPoint<T>)> for LineOrPoint<T> {
    fn from((p, q): (SweepPoint<T>, SweepPoint<T>)) -> Self {
        if p < q {
            LineOrPoint::Line(p, q)
        } else if p > q {
            LineOrPoint::Line(q, p)
        } else {
            LineOrPoint::Point(p)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pair_orders_along_sweep() {
        let p = SweepPoint::from((0., 0.));
        let q = SweepPoint::from((1., 1.));
        assert_eq!(LineOrPoint::from((p, q)), LineOrPoint::Line(q, p));
        assert_eq!(LineOrPoint::from((q, p)), LineOrPoint::Line(q, p));
        assert_eq!(LineOrPoint::from((p, p)), LineOrPoint::Point(p));
        assert_eq!(LineOrPoint::Line(q, p).first(), q);
        assert!(!LineOrPoint::Point(p).is_line());
    }
}
