//! The dispatch loop.

use std::fmt;

use tracing::{debug, error, trace};

use crate::config::BusConfig;
use crate::error::CasterError;
use crate::node::Node;
use crate::yielder::{Emitter, Yield};

/// Fixed-topology dispatcher.
///
/// Borrows an ordered slice of nodes for its whole lifetime; the slice's
/// length and order never change. The bus holds no mutable state: everything
/// a tick does lives on the call stack and is gone when `tick` returns.
pub struct Bus<'a, E> {
    nodes: &'a [&'a dyn Node<E>],
    config: BusConfig,
}

impl<'a, E> Bus<'a, E>
where
    E: fmt::Debug,
{
    pub fn new(nodes: &'a [&'a dyn Node<E>]) -> Self {
        Self::with_config(nodes, BusConfig::default())
    }

    pub fn with_config(nodes: &'a [&'a dyn Node<E>], config: BusConfig) -> Self {
        Self { nodes, config }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Run every node's `init` once, in registration order. Events yielded
    /// here fan out exactly like tick-time events.
    pub fn init(&self) {
        debug!(nodes = self.nodes.len(), "Initializing bus");
        for (index, node) in self.nodes.iter().enumerate() {
            node.init(&self.frame(Emitter::Node(index), 0));
        }
    }

    /// One control-loop iteration. Asks each node to emit, in registration
    /// order; every yielded event is fully dispatched before the next node is
    /// asked.
    pub fn tick(&self) {
        trace!(nodes = self.nodes.len(), "Tick");
        for (index, node) in self.nodes.iter().enumerate() {
            node.emit(&self.frame(Emitter::Node(index), 0));
        }
    }

    /// Inject an event from outside the node set. No node is the sender, so
    /// every node that accepts the event handles it.
    pub fn emit(&self, event: E) {
        self.fan_out(Emitter::External, 0, event);
    }

    fn frame(&self, emitter: Emitter, depth: usize) -> Broadcast<'_, 'a, E> {
        Broadcast {
            bus: self,
            emitter,
            depth,
        }
    }

    /// Deliver `event` to every node except the emitter, depth-first.
    /// `parent_depth` is the depth of the frame that yielded it.
    fn fan_out(&self, emitter: Emitter, parent_depth: usize, event: E) {
        let depth = parent_depth + 1;
        if let Some(limit) = self.config.max_depth {
            if depth > limit {
                let err = CasterError::DepthExceeded {
                    emitter,
                    depth,
                    limit,
                };
                error!(%emitter, depth, limit, event = ?event, "Dispatch depth guard tripped");
                panic!("{err}");
            }
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if emitter.excludes(index) || !node.accepts(&event) {
                continue;
            }
            trace!(
                %emitter,
                receiver = index,
                node = node.name(),
                depth,
                event = ?event,
                "Delivering event"
            );
            node.handle(&event, &self.frame(Emitter::Node(index), depth));
        }
    }
}

impl<E> fmt::Debug for Bus<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus")
            .field("nodes", &self.nodes.iter().map(|n| n.name()).collect::<Vec<_>>())
            .field("config", &self.config)
            .finish()
    }
}

/// Per-frame yield capability.
///
/// Built fresh for every `init`/`emit`/`handle` call and bound by value to
/// the node being called. Nested fan-outs get their own `Broadcast`, so a
/// recursive yield can never disturb the emitter of an outer frame.
pub struct Broadcast<'b, 'a, E> {
    bus: &'b Bus<'a, E>,
    emitter: Emitter,
    depth: usize,
}

impl<E> Broadcast<'_, '_, E> {
    pub fn emitter(&self) -> Emitter {
        self.emitter
    }

    /// Number of fan-outs enclosing this frame. Zero for `init`/`emit`.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl<E> Yield<E> for Broadcast<'_, '_, E>
where
    E: fmt::Debug,
{
    fn send(&self, event: E) {
        self.bus.fan_out(self.emitter, self.depth, event);
    }
}
