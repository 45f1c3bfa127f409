//! Harness helpers for exercising nodes and buses in tests.
//!
//! Enabled by the `test-utils` feature.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::node::Node;
use crate::yielder::Yield;

// ---------------------------------------------------------------------------
// RecordingYield
// ---------------------------------------------------------------------------

/// A [`Yield`] that stores every event instead of dispatching it. Drive a node
/// directly with it to see what the node would put on a bus.
pub struct RecordingYield<E> {
    events: RefCell<Vec<E>>,
}

impl<E> RecordingYield<E> {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
        }
    }

    /// Drain the recorded events.
    pub fn take(&self) -> Vec<E> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl<E: Clone> RecordingYield<E> {
    pub fn events(&self) -> Vec<E> {
        self.events.borrow().clone()
    }
}

impl<E> Default for RecordingYield<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Yield<E> for RecordingYield<E> {
    fn send(&self, event: E) {
        self.events.borrow_mut().push(event);
    }
}

// ---------------------------------------------------------------------------
// CallLog
// ---------------------------------------------------------------------------

/// One `handle` call observed by a [`Probe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery<E> {
    pub receiver: String,
    pub event: E,
}

/// Ordered record of every `handle` call across a set of probes.
pub struct CallLog<E> {
    deliveries: RefCell<Vec<Delivery<E>>>,
}

impl<E> CallLog<E> {
    pub fn new() -> Self {
        Self {
            deliveries: RefCell::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.deliveries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.deliveries.borrow_mut().clear();
    }
}

impl<E: Clone> CallLog<E> {
    fn record(&self, receiver: &str, event: &E) {
        self.deliveries.borrow_mut().push(Delivery {
            receiver: receiver.to_string(),
            event: event.clone(),
        });
    }

    pub fn deliveries(&self) -> Vec<Delivery<E>> {
        self.deliveries.borrow().clone()
    }

    /// Events handled by `receiver`, in call order.
    pub fn received_by(&self, receiver: &str) -> Vec<E> {
        self.deliveries
            .borrow()
            .iter()
            .filter(|d| d.receiver == receiver)
            .map(|d| d.event.clone())
            .collect()
    }

    /// `(receiver, event)` pairs in call order.
    pub fn sequence(&self) -> Vec<(String, E)> {
        self.deliveries
            .borrow()
            .iter()
            .map(|d| (d.receiver.clone(), d.event.clone()))
            .collect()
    }
}

impl<E> Default for CallLog<E> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Probe
// ---------------------------------------------------------------------------

type Reaction<'l, E> = Box<dyn Fn(&E) -> Vec<E> + 'l>;
type Filter<'l, E> = Box<dyn Fn(&E) -> bool + 'l>;

/// Scriptable node that records every event it handles into a shared
/// [`CallLog`].
///
/// - events passed to [`with_init`](Probe::with_init) are yielded from `init`;
/// - events passed to [`queue`](Probe::queue) are yielded on the next `emit`;
/// - the reaction maps each handled event to events yielded from `handle`;
/// - the filter backs [`Node::accepts`].
pub struct Probe<'l, E> {
    name: String,
    log: &'l CallLog<E>,
    init: RefCell<Vec<E>>,
    pending: RefCell<VecDeque<E>>,
    reaction: Option<Reaction<'l, E>>,
    filter: Option<Filter<'l, E>>,
}

impl<'l, E> Probe<'l, E> {
    pub fn new(name: impl Into<String>, log: &'l CallLog<E>) -> Self {
        Self {
            name: name.into(),
            log,
            init: RefCell::new(Vec::new()),
            pending: RefCell::new(VecDeque::new()),
            reaction: None,
            filter: None,
        }
    }

    pub fn with_init(self, events: impl IntoIterator<Item = E>) -> Self {
        self.init.borrow_mut().extend(events);
        self
    }

    pub fn with_reaction(mut self, reaction: impl Fn(&E) -> Vec<E> + 'l) -> Self {
        self.reaction = Some(Box::new(reaction));
        self
    }

    pub fn with_filter(mut self, filter: impl Fn(&E) -> bool + 'l) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Yield `event` on the next `emit`.
    pub fn queue(&self, event: E) {
        self.pending.borrow_mut().push_back(event);
    }
}

impl<E: Clone> Node<E> for Probe<'_, E> {
    fn init(&self, out: &dyn Yield<E>) {
        // Release the borrow before yielding: dispatch may re-enter this probe.
        let events = std::mem::take(&mut *self.init.borrow_mut());
        for event in events {
            out.send(event);
        }
    }

    fn emit(&self, out: &dyn Yield<E>) {
        let events: Vec<E> = self.pending.borrow_mut().drain(..).collect();
        for event in events {
            out.send(event);
        }
    }

    fn handle(&self, event: &E, out: &dyn Yield<E>) {
        self.log.record(&self.name, event);
        if let Some(reaction) = &self.reaction {
            for next in reaction(event) {
                out.send(next);
            }
        }
    }

    fn accepts(&self, event: &E) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter(event))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
