//! Structural-change notifications.
//!
//! Mutations performed through [`GraphModifier`](crate::GraphModifier)
//! announce themselves through a [`GraphEvent`] stream so that externally
//! held id-indexed data (cost arrays, membership bit vectors) can react.
//! Dispatch is synchronous, in the caller's thread, in listener
//! registration order, and always happens after the mutation has taken
//! full effect — a listener never observes a half-mutated graph.
use crate::{SegmentIndex, VertexIndex};

/// The managed entity collections of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Vertex,
    Edge,
    Segment,
}

/// A structural change to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphEvent {
    /// A segment was newly materialized at `vertex` while breaking an edge.
    SegmentAttached {
        vertex: VertexIndex,
        segment: SegmentIndex,
    },
    /// A segment was removed from the graph. The index is no longer valid
    /// by the time the event is observed.
    SegmentRemoved { segment: SegmentIndex },
    /// The ids of one managed collection were renumbered; every id-indexed
    /// structure over that collection must be rebuilt.
    IdsRecreated { entity: EntityKind },
}

impl GraphEvent {
    /// The kind discriminant of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            GraphEvent::SegmentAttached { .. } => EventKind::SegmentAttached,
            GraphEvent::SegmentRemoved { .. } => EventKind::SegmentRemoved,
            GraphEvent::IdsRecreated { .. } => EventKind::IdsRecreated,
        }
    }
}

/// Event kinds a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    SegmentAttached = 0,
    SegmentRemoved = 1,
    IdsRecreated = 2,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::SegmentAttached,
        EventKind::SegmentRemoved,
        EventKind::IdsRecreated,
    ];

    fn mask(self) -> u8 {
        1 << self as u8
    }
}

struct Listener {
    kinds: u8,
    callback: Box<dyn FnMut(&GraphEvent)>,
}

/// Registry of structural-change listeners.
#[derive(Default)]
pub struct EventRegistry {
    listeners: Vec<Listener>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one or several event kinds.
    pub fn register(
        &mut self,
        kinds: impl IntoIterator<Item = EventKind>,
        callback: impl FnMut(&GraphEvent) + 'static,
    ) {
        let kinds = kinds.into_iter().fold(0, |mask, kind| mask | kind.mask());
        self.listeners.push(Listener {
            kinds,
            callback: Box::new(callback),
        });
    }

    /// Register a listener for all event kinds.
    pub fn register_all(&mut self, callback: impl FnMut(&GraphEvent) + 'static) {
        self.register(EventKind::ALL, callback);
    }

    /// Dispatch an event to every subscribed listener, in registration order.
    pub(crate) fn emit(&mut self, event: GraphEvent) {
        let mask = event.kind().mask();
        for listener in &mut self.listeners {
            if listener.kinds & mask != 0 {
                (listener.callback)(&event);
            }
        }
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::memory::EntityIndex;

    #[test]
    fn dispatch_filters_by_kind_and_keeps_registration_order() {
        let mut registry = EventRegistry::new();
        let seen: Rc<RefCell<Vec<(u8, EventKind)>>> = Rc::default();

        let log = seen.clone();
        registry.register([EventKind::SegmentRemoved], move |event| {
            log.borrow_mut().push((0, event.kind()));
        });
        let log = seen.clone();
        registry.register_all(move |event| {
            log.borrow_mut().push((1, event.kind()));
        });

        registry.emit(GraphEvent::SegmentRemoved {
            segment: SegmentIndex::new(3),
        });
        registry.emit(GraphEvent::IdsRecreated {
            entity: EntityKind::Edge,
        });

        assert_eq!(
            *seen.borrow(),
            vec![
                (0, EventKind::SegmentRemoved),
                (1, EventKind::SegmentRemoved),
                (1, EventKind::IdsRecreated),
            ]
        );
    }
}
