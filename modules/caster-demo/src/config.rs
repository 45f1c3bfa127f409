use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use caster::BusConfig;
use tracing::info;

/// Demo configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub tick: Duration,
    /// Stop after this many ticks. `None` runs until Ctrl-C.
    pub ticks: Option<u64>,
    pub setpoint: f32,
    pub bus: BusConfig,
}

impl DemoConfig {
    pub fn from_env() -> Result<Self> {
        let tick_ms: u64 = optional_env("CASTER_TICK_MS")?.unwrap_or(100);
        Ok(Self {
            tick: Duration::from_millis(tick_ms.max(1)),
            ticks: optional_env("CASTER_TICKS")?,
            setpoint: optional_env("CASTER_SETPOINT")?.unwrap_or(21.0),
            bus: BusConfig::from_env()?,
        })
    }

    pub fn log(&self) {
        info!(
            tick_ms = self.tick.as_millis() as u64,
            ticks = ?self.ticks,
            setpoint = self.setpoint,
            max_depth = ?self.bus.max_depth,
            "Config loaded"
        );
    }
}

fn optional_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{key} must be a number, got {raw:?}")),
        _ => Ok(None),
    }
}
