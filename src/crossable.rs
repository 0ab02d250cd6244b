use geo::{Coordinate, GeoFloat, Line};

/// Interface for types that can be processed to detect crossings.
///
/// Implemented for geo's [`Line`], for `[x1, y1, x2, y2]` arrays and
/// `(x1, y1, x2, y2)` tuples, and for references to any of these.
pub trait Crossable {
    type Scalar: GeoFloat;

    /// The segment's end points, in any order.
    fn line(&self) -> Line<Self::Scalar>;
}

impl<T: GeoFloat> Crossable for Line<T> {
    type Scalar = T;

    fn line(&self) -> Line<T> {
        *self
    }
}

impl<T: GeoFloat> Crossable for [T; 4] {
    type Scalar = T;

    fn line(&self) -> Line<T> {
        let [x1, y1, x2, y2] = *self;
        Line::new(Coordinate { x: x1, y: y1 }, Coordinate { x: x2, y: y2 })
    }
}

impl<T: GeoFloat> Crossable for (T, T, T, T) {
    type Scalar = T;

    fn line(&self) -> Line<T> {
        let (x1, y1, x2, y2) = *self;
        [x1, y1, x2, y2].line()
    }
}

impl<'a, C: Crossable> Crossable for &'a C {
    type Scalar = C::Scalar;

    fn line(&self) -> Line<Self::Scalar> {
        C::line(*self)
    }
}
