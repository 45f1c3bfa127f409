//! The participant interface.

use crate::yielder::Yield;

/// A participant on the bus.
///
/// All methods take `&self` and may be entered re-entrantly: while a node's
/// `handle` is running it can be called again through another node's yield.
/// Nodes that keep state use `Cell` or `RefCell` and must not hold a borrow
/// across a call to [`Yield::send`].
///
/// `handle` must terminate. Answering an event with an equivalent event that
/// provokes the same answer recurses until the stack is exhausted; the bus
/// does not detect cycles.
pub trait Node<E> {
    /// Called once by [`Bus::init`](crate::Bus::init) before the first tick.
    fn init(&self, _out: &dyn Yield<E>) {}

    /// Called once per tick, in registration order.
    fn emit(&self, out: &dyn Yield<E>);

    /// Called for every event yielded by another node or injected externally.
    /// `out` is bound to this node, so anything yielded here is never handed
    /// back to it.
    fn handle(&self, event: &E, out: &dyn Yield<E>);

    /// Content filter. Returning `false` skips `handle` for this event only.
    fn accepts(&self, _event: &E) -> bool {
        true
    }

    /// Label used in log fields.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<E, N> Node<E> for &N
where
    N: Node<E> + ?Sized,
{
    fn init(&self, out: &dyn Yield<E>) {
        (**self).init(out)
    }

    fn emit(&self, out: &dyn Yield<E>) {
        (**self).emit(out)
    }

    fn handle(&self, event: &E, out: &dyn Yield<E>) {
        (**self).handle(event, out)
    }

    fn accepts(&self, event: &E) -> bool {
        (**self).accepts(event)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
