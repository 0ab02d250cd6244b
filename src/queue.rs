use std::collections::BTreeSet;

use geo::GeoFloat;

use crate::events::{Event, SweepPoint};

/// Pending sweep events, smallest first.
///
/// Backed by an ordered set, so an event equal to a queued one is
/// dropped. In particular an intersection found again from the other
/// side of the pair is only queued once.
#[derive(Debug)]
pub struct EventQueue<T: GeoFloat> {
    events: BTreeSet<Event<T>>,
}

impl<T: GeoFloat> Default for EventQueue<T> {
    fn default() -> Self {
        EventQueue {
            events: BTreeSet::new(),
        }
    }
}

impl<T: GeoFloat> EventQueue<T> {
    /// Queue an event. Returns `false` if it was already queued.
    #[inline]
    pub fn push(&mut self, event: Event<T>) -> bool {
        self.events.insert(event)
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Event<T>> {
        self.events.pop_first()
    }

    #[inline]
    pub fn peek(&self) -> Option<&Event<T>> {
        self.events.first()
    }

    #[inline]
    pub fn peek_point(&self) -> Option<SweepPoint<T>> {
        self.peek().map(|e| e.point)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventType;

    #[test]
    fn test_dedup_and_order() {
        let mut queue = EventQueue::default();
        let pt = SweepPoint::from((1., 1.));

        assert!(queue.push(Event::intersection(pt, 0, 1)));
        assert!(!queue.push(Event::intersection(pt, 1, 0)));
        assert!(queue.push(Event {
            point: SweepPoint::from((0., 2.)),
            ty: EventType::Lower,
            segment_key: 2,
            other_key: None,
        }));
        assert!(queue.push(Event {
            point: pt,
            ty: EventType::Upper,
            segment_key: 3,
            other_key: None,
        }));
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.peek_point(), Some(SweepPoint::from((0., 2.))));

        let kinds: Vec<_> = std::iter::from_fn(|| queue.pop()).map(|e| e.ty).collect();
        assert_eq!(
            kinds,
            vec![EventType::Lower, EventType::Intersection, EventType::Upper]
        );
        assert_eq!(queue.len(), 0);
    }
}
