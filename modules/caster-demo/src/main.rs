use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use caster::{Bus, Node};

mod config;
mod nodes;

use config::DemoConfig;
use nodes::{Event, Heater, Monitor, Thermometer, Thermostat};

const START_TEMPERATURE: f32 = 16.0;
const HYSTERESIS: f32 = 0.5;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("caster=info".parse()?))
        .init();

    info!("Caster demo starting...");

    let config = DemoConfig::from_env()?;
    config.log();

    let thermometer = Thermometer::new(START_TEMPERATURE);
    let thermostat = Thermostat::new(config.setpoint, HYSTERESIS);
    let heater = Heater::new();
    let monitor = Monitor::default();
    let nodes: [&dyn Node<Event>; 4] = [&thermometer, &thermostat, &heater, &monitor];

    let bus = Bus::with_config(&nodes, config.bus);
    bus.init();
    bus.emit(Event::Setpoint(config.setpoint));

    let mut interval = tokio::time::interval(config.tick);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut ticks: u64 = 0;
    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut shutdown => {
                info!("Interrupted");
                break;
            }
        }

        bus.tick();
        ticks += 1;

        if config.ticks.is_some_and(|limit| ticks >= limit) {
            break;
        }
    }

    info!(
        ticks,
        temperature = thermometer.temperature(),
        heater_on = heater.is_on(),
        deliveries = monitor.seen(),
        "Caster demo stopped"
    );

    Ok(())
}
