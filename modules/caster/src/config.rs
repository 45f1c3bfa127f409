use std::env;

use crate::error::CasterError;

/// Environment variable read by [`BusConfig::from_env`].
pub const MAX_DEPTH_ENV: &str = "CASTER_MAX_DEPTH";

/// Bus configuration.
///
/// The default imposes no recursion limit. `max_depth` is a diagnostic for
/// test harnesses: when set, a fan-out nested deeper than the limit panics
/// with [`CasterError::DepthExceeded`] instead of exhausting the stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusConfig {
    pub max_depth: Option<usize>,
}

impl BusConfig {
    pub fn with_max_depth(limit: usize) -> Self {
        Self {
            max_depth: Some(limit),
        }
    }

    /// Load configuration from environment variables. Unset or empty
    /// `CASTER_MAX_DEPTH` means no guard.
    pub fn from_env() -> Result<Self, CasterError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CasterError> {
        let max_depth = match lookup(MAX_DEPTH_ENV) {
            None => None,
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(parse_limit(raw.trim())?),
        };
        Ok(Self { max_depth })
    }
}

fn parse_limit(raw: &str) -> Result<usize, CasterError> {
    match raw.parse::<usize>() {
        Ok(0) | Err(_) => Err(CasterError::Config(format!(
            "{MAX_DEPTH_ENV} must be a positive integer, got {raw:?}"
        ))),
        Ok(limit) => Ok(limit),
    }
}
