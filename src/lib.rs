//! Finds all crossings of a set of line segments with a plane sweep.
//!
//! This is an implementation of the [Bentley-Ottman] algorithm: a
//! horizontal line sweeps the plane from top to bottom, and only
//! segments that are neighbours along it, or that pass through the same
//! event point, are ever tested against each other. For `n` segments
//! with `k` crossings this does `O((n + k) log n)` event queue work,
//! against the `O(n²)` of testing every pair (see [`naive`]).
//!
//! # Usage
//!
//! The simplest entry point is [`find_crossings`], which runs the whole
//! sweep and returns a [`SweepReport`] with every [`Crossing`] and the
//! [`SweepStats`] of the run. The [`Intersections`] iterator yields the
//! same crossings lazily, and [`Sweep`] steps through the event points one
//! at a time.
//!
//! Any type implementing [`Crossable`] can be used as input; geo's
//! [`Line`], `[x1, y1, x2, y2]` arrays and 4-tuples all do.
//!
//! ```rust
//! use geo::Line;
//! use sweep_crossings::{find_crossings, Intersections};
//!
//! let input = vec![
//!     Line::from([(1., 0.), (0., 1.)]),
//!     Line::from([(0., 0.5), (1., 0.5)]),
//!     Line::from([(0., 0.), (1., 1.)]),
//! ];
//! let report = find_crossings(&input);
//! // All pairs intersect
//! assert_eq!(report.count(), 3);
//! assert_eq!(report.crossings[0].segments, [0, 1]);
//!
//! let iter: Intersections<_> = input.iter().collect();
//! assert_eq!(iter.count(), 3);
//! ```
//!
//! # Degeneracies
//!
//! Side-of-line decisions use geo's robust predicates. Segments meeting
//! only at a shared end point are not reported; an end point on the
//! interior of another segment is. Collinear overlapping segments are
//! reported once, with the overlap as a [`LineOrPoint::Line`].
//! Zero-length and non-finite segments are skipped.
//!
//! [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
//! [`Line`]: geo::Line
mod events;
pub use events::{Event, EventType, SweepPoint};

mod line_or_point;
pub use line_or_point::LineOrPoint;

mod segments;
pub use segments::Segment;

mod active;
mod queue;

mod crossable;
pub use crossable::Crossable;

pub mod crossings;
pub use crossings::{find_crossings, Crossing, Intersections, SweepReport};

pub mod sweep;
pub use sweep::{Sweep, SweepStats};

pub mod naive;

pub mod io;

mod error;
pub use error::{Error, ParseError, ParseErrorKind, ReadError};

#[cfg(test)]
#[path = "../benches/utils/random.rs"]
pub mod random;
