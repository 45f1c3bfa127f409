//! Synchronous in-process event bus.
//!
//! A fixed, ordered set of [`Node`]s is wired together by a [`Bus`]. Every
//! event a node yields is delivered immediately, depth-first, to every other
//! node before the yielding call returns. There is no queue, no thread and no
//! allocation on the dispatch path: the call stack is the only state.
//!
//! ```text
//! tick ─► node[0].emit ─► yield(X) ─► node[1].handle(X) ─► yield(Y) ─► node[0].handle(Y)
//!                                                                   └► node[2].handle(Y)
//!                                 └► node[2].handle(X)
//!       ─► node[1].emit ─► ...
//! ```
//!
//! A node never receives an event it yielded itself. Nodes own their
//! termination: a handler that answers an event with an equivalent event
//! recurses until the stack runs out, unless a depth guard is configured
//! through [`BusConfig`].

pub mod bus;
pub mod config;
pub mod error;
pub mod node;
pub mod yielder;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use bus::{Broadcast, Bus};
pub use config::BusConfig;
pub use error::CasterError;
pub use node::Node;
pub use yielder::{from_fn, Emitter, Yield};
