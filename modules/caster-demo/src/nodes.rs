//! A small thermostat loop: sensor → controller → actuator, plus a monitor.

use std::cell::Cell;

use caster::{Node, Yield};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Sensor reading in °C.
    Temperature(f32),
    /// Target temperature, usually injected by the driver.
    Setpoint(f32),
    /// Command to the heater.
    Heater(bool),
    /// Heater state after a command took effect.
    HeaterState(bool),
}

// ---------------------------------------------------------------------------
// Thermometer
// ---------------------------------------------------------------------------

const HEAT_RATE: f32 = 0.5;
const COOL_RATE: f32 = 0.3;

/// Simulated sensor. Warms while the heater is on, cools otherwise, and
/// reports once per tick.
pub struct Thermometer {
    temperature: Cell<f32>,
    heating: Cell<bool>,
}

impl Thermometer {
    pub fn new(temperature: f32) -> Self {
        Self {
            temperature: Cell::new(temperature),
            heating: Cell::new(false),
        }
    }

    pub fn temperature(&self) -> f32 {
        self.temperature.get()
    }
}

impl Node<Event> for Thermometer {
    fn init(&self, out: &dyn Yield<Event>) {
        out.send(Event::Temperature(self.temperature.get()));
    }

    fn emit(&self, out: &dyn Yield<Event>) {
        let delta = if self.heating.get() { HEAT_RATE } else { -COOL_RATE };
        let temperature = self.temperature.get() + delta;
        self.temperature.set(temperature);
        out.send(Event::Temperature(temperature));
    }

    fn handle(&self, event: &Event, _out: &dyn Yield<Event>) {
        if let Event::HeaterState(on) = event {
            self.heating.set(*on);
        }
    }

    fn accepts(&self, event: &Event) -> bool {
        matches!(event, Event::HeaterState(_))
    }

    fn name(&self) -> &str {
        "thermometer"
    }
}

// ---------------------------------------------------------------------------
// Thermostat
// ---------------------------------------------------------------------------

/// Bang-bang controller with hysteresis. Only commands the heater when the
/// desired state changes, so a steady reading produces no traffic.
pub struct Thermostat {
    setpoint: Cell<f32>,
    hysteresis: f32,
    last_reading: Cell<Option<f32>>,
    commanded: Cell<Option<bool>>,
}

impl Thermostat {
    pub fn new(setpoint: f32, hysteresis: f32) -> Self {
        Self {
            setpoint: Cell::new(setpoint),
            hysteresis,
            last_reading: Cell::new(None),
            commanded: Cell::new(None),
        }
    }

    fn evaluate(&self, out: &dyn Yield<Event>) {
        let Some(reading) = self.last_reading.get() else {
            return;
        };
        let setpoint = self.setpoint.get();
        let desired = if reading < setpoint - self.hysteresis {
            true
        } else if reading > setpoint + self.hysteresis {
            false
        } else {
            return;
        };
        if self.commanded.get() != Some(desired) {
            self.commanded.set(Some(desired));
            out.send(Event::Heater(desired));
        }
    }
}

impl Node<Event> for Thermostat {
    fn emit(&self, _out: &dyn Yield<Event>) {}

    fn handle(&self, event: &Event, out: &dyn Yield<Event>) {
        match *event {
            Event::Temperature(reading) => self.last_reading.set(Some(reading)),
            Event::Setpoint(setpoint) => self.setpoint.set(setpoint),
            _ => return,
        }
        self.evaluate(out);
    }

    fn accepts(&self, event: &Event) -> bool {
        matches!(event, Event::Temperature(_) | Event::Setpoint(_))
    }

    fn name(&self) -> &str {
        "thermostat"
    }
}

// ---------------------------------------------------------------------------
// Heater
// ---------------------------------------------------------------------------

/// Actuator. Reports its state whenever a command changes it.
pub struct Heater {
    on: Cell<bool>,
}

impl Heater {
    pub fn new() -> Self {
        Self { on: Cell::new(false) }
    }

    pub fn is_on(&self) -> bool {
        self.on.get()
    }
}

impl Default for Heater {
    fn default() -> Self {
        Self::new()
    }
}

impl Node<Event> for Heater {
    fn emit(&self, _out: &dyn Yield<Event>) {}

    fn handle(&self, event: &Event, out: &dyn Yield<Event>) {
        if let Event::Heater(on) = *event {
            if self.on.replace(on) != on {
                out.send(Event::HeaterState(on));
            }
        }
    }

    fn accepts(&self, event: &Event) -> bool {
        matches!(event, Event::Heater(_))
    }

    fn name(&self) -> &str {
        "heater"
    }
}

// ---------------------------------------------------------------------------
// Monitor
// ---------------------------------------------------------------------------

/// Logs traffic. Never yields.
#[derive(Default)]
pub struct Monitor {
    seen: Cell<u64>,
}

impl Monitor {
    pub fn seen(&self) -> u64 {
        self.seen.get()
    }
}

impl Node<Event> for Monitor {
    fn emit(&self, _out: &dyn Yield<Event>) {}

    fn handle(&self, event: &Event, _out: &dyn Yield<Event>) {
        self.seen.set(self.seen.get() + 1);
        match event {
            Event::Temperature(t) => debug!(temperature = t, "Reading"),
            Event::Setpoint(t) => info!(setpoint = t, "Setpoint changed"),
            Event::Heater(on) => info!(on, "Heater commanded"),
            Event::HeaterState(on) => info!(on, "Heater switched"),
        }
    }

    fn name(&self) -> &str {
        "monitor"
    }
}
