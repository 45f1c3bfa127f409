use thiserror::Error;

use crate::yielder::Emitter;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CasterError {
    /// Raised as a panic by the bus when the depth guard trips. Dispatch never
    /// returns it.
    #[error("dispatch depth exceeded: {emitter} yielded at depth {depth} (limit {limit})")]
    DepthExceeded {
        emitter: Emitter,
        depth: usize,
        limit: usize,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}
