//! Raspberry Pi GPIO through `rppal`.
//!
//! Lines are addressed by BCM number. Claimed pins are created with
//! reset-on-drop, so releasing them restores the mode and pull state they
//! had before the sweep.

use crate::error::{MuxError, Result};
use crate::gpio::{GpioBus, GpioProvider, Level};
use rppal::gpio::{Gpio, InputPin, Level as PinLevel, OutputPin};
use std::collections::HashMap;

impl From<Level> for PinLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => PinLevel::Low,
            Level::High => PinLevel::High,
        }
    }
}

impl From<PinLevel> for Level {
    fn from(level: PinLevel) -> Self {
        match level {
            PinLevel::Low => Level::Low,
            PinLevel::High => Level::High,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RppalProvider;

impl GpioProvider for RppalProvider {
    fn name(&self) -> &'static str {
        "rppal"
    }

    fn open(&self) -> Result<Box<dyn GpioBus>> {
        let gpio = Gpio::new().map_err(|e| MuxError::Init(e.to_string()))?;
        Ok(Box::new(RppalBus {
            gpio,
            outputs: HashMap::new(),
            inputs: HashMap::new(),
        }))
    }
}

pub struct RppalBus {
    gpio: Gpio,
    outputs: HashMap<u8, OutputPin>,
    inputs: HashMap<u8, InputPin>,
}

impl RppalBus {
    fn take_pin(&self, line: u8) -> Result<rppal::gpio::Pin> {
        self.gpio
            .get(line)
            .map_err(|e| MuxError::LineUnavailable {
                line,
                message: e.to_string(),
            })
    }
}

impl GpioBus for RppalBus {
    fn claim_output(&mut self, line: u8, initial: Level) -> Result<()> {
        let pin = self.take_pin(line)?;
        let mut out = match initial {
            Level::High => pin.into_output_high(),
            Level::Low => pin.into_output_low(),
        };
        out.set_reset_on_drop(true);
        self.outputs.insert(line, out);
        Ok(())
    }

    fn claim_input(&mut self, line: u8) -> Result<()> {
        let mut input = self.take_pin(line)?.into_input_pulldown();
        input.set_reset_on_drop(true);
        self.inputs.insert(line, input);
        Ok(())
    }

    fn write(&mut self, line: u8, level: Level) -> Result<()> {
        let pin = self.outputs.get_mut(&line).ok_or(MuxError::NotClaimed {
            line,
            expected: "output",
        })?;
        pin.write(level.into());
        Ok(())
    }

    fn read(&mut self, line: u8) -> Result<Level> {
        let pin = self.inputs.get(&line).ok_or(MuxError::NotClaimed {
            line,
            expected: "input",
        })?;
        Ok(pin.read().into())
    }

    fn release_all(&mut self) {
        self.outputs.clear();
        self.inputs.clear();
    }
}
