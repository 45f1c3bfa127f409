//! The yield capability handed to nodes.

use std::fmt;

/// Identity a yield capability is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emitter {
    /// The node at this registration index.
    Node(usize),
    /// A driver outside the node set. Matches no node index.
    External,
}

impl Emitter {
    pub fn index(self) -> Option<usize> {
        match self {
            Emitter::Node(index) => Some(index),
            Emitter::External => None,
        }
    }

    pub fn is_external(self) -> bool {
        matches!(self, Emitter::External)
    }

    /// True when an event from this emitter must not be delivered to `index`.
    pub(crate) fn excludes(self, index: usize) -> bool {
        self == Emitter::Node(index)
    }
}

impl fmt::Display for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Emitter::Node(index) => write!(f, "node#{index}"),
            Emitter::External => f.write_str("external"),
        }
    }
}

/// Pushes one event into synchronous fan-out.
///
/// A node only ever sees a `&dyn Yield<E>` borrowed for the duration of a
/// single `init`, `emit` or `handle` call. Calling [`send`](Yield::send) does
/// not return until every receiver, and everything they yielded in turn, has
/// been handled.
pub trait Yield<E> {
    fn send(&self, event: E);
}

/// Adapts a closure into a [`Yield`].
///
/// Useful for driving a node directly, without a bus:
///
/// ```
/// use std::cell::RefCell;
/// use caster::{from_fn, Yield};
///
/// let seen = RefCell::new(Vec::new());
/// let out = from_fn(|event: u8| seen.borrow_mut().push(event));
/// out.send(7);
/// assert_eq!(*seen.borrow(), vec![7]);
/// ```
pub fn from_fn<E, F>(f: F) -> FromFn<F>
where
    F: Fn(E),
{
    FromFn(f)
}

/// Closure-backed [`Yield`]. See [`from_fn`].
pub struct FromFn<F>(F);

impl<E, F> Yield<E> for FromFn<F>
where
    F: Fn(E),
{
    fn send(&self, event: E) {
        (self.0)(event)
    }
}
