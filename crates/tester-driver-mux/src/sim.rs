//! In-memory GPIO for tests and bench bring-up.
//!
//! [`SimulatedGpio`] models a multiplexer wired to a cable: channels listed
//! as connected read high on SIG while EN is low and the select lines
//! address them. Every bus operation is recorded as a [`LineEvent`] so tests
//! can check the exact line sequence, and faults can be injected to
//! exercise error and teardown paths.

use crate::addresser::Channel;
use crate::config::MuxConfig;
use crate::error::{MuxError, Result};
use crate::gpio::{GpioBus, GpioProvider, Level};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    ClaimOutput { line: u8, initial: Level },
    ClaimInput { line: u8 },
    Write { line: u8, level: Level },
    Read { line: u8, level: Level },
    Release,
}

/// Injected failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// `open()` fails with [`MuxError::Init`]
    Open(String),
    /// Claiming this line fails
    Claim(u8),
    /// Reading SIG fails while this channel is selected
    ReadOnChannel(u8),
    /// Reading SIG panics while this channel is selected
    PanicOnChannel(u8),
}

#[derive(Debug, Default)]
struct SimState {
    levels: HashMap<u8, Level>,
    outputs: HashSet<u8>,
    inputs: HashSet<u8>,
    connected: HashSet<u8>,
    faults: Vec<Fault>,
    events: Vec<LineEvent>,
    opens: usize,
}

/// Simulated multiplexer wiring. Cloning shares state.
#[derive(Debug, Clone)]
pub struct SimulatedGpio {
    config: MuxConfig,
    state: Arc<Mutex<SimState>>,
}

impl SimulatedGpio {
    pub fn new(config: &MuxConfig) -> Self {
        Self {
            config: config.clone(),
            state: Arc::default(),
        }
    }

    /// Mark channels that have continuity.
    pub fn with_connected(self, channels: impl IntoIterator<Item = u8>) -> Self {
        self.state.lock().connected.extend(channels);
        self
    }

    pub fn with_fault(self, fault: Fault) -> Self {
        self.state.lock().faults.push(fault);
        self
    }

    pub fn events(&self) -> Vec<LineEvent> {
        self.state.lock().events.clone()
    }

    /// Last level driven on `line`.
    pub fn level(&self, line: u8) -> Option<Level> {
        self.state.lock().levels.get(&line).copied()
    }

    /// Number of lines still claimed.
    pub fn claimed(&self) -> usize {
        let state = self.state.lock();
        state.outputs.len() + state.inputs.len()
    }

    pub fn open_count(&self) -> usize {
        self.state.lock().opens
    }
}

impl GpioProvider for SimulatedGpio {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn open(&self) -> Result<Box<dyn GpioBus>> {
        let mut state = self.state.lock();
        state.opens += 1;
        if let Some(Fault::Open(message)) = state
            .faults
            .iter()
            .find(|f| matches!(f, Fault::Open(_)))
        {
            return Err(MuxError::Init(message.clone()));
        }
        Ok(Box::new(SimulatedBus {
            config: self.config.clone(),
            state: Arc::clone(&self.state),
        }))
    }
}

struct SimulatedBus {
    config: MuxConfig,
    state: Arc<Mutex<SimState>>,
}

impl SimulatedBus {
    fn claim(&mut self, line: u8, event: LineEvent) -> Result<()> {
        let mut state = self.state.lock();
        if state.faults.contains(&Fault::Claim(line)) {
            return Err(MuxError::LineUnavailable {
                line,
                message: "line busy".into(),
            });
        }
        state.events.push(event);
        Ok(())
    }

    fn selected_channel(&self, state: &SimState) -> Option<Channel> {
        let mut n = 0u8;
        for (bit, line) in self.config.select_lines.iter().enumerate() {
            if state.levels.get(line).copied()? == Level::High {
                n |= 1 << bit;
            }
        }
        Channel::new(n)
    }
}

impl GpioBus for SimulatedBus {
    fn claim_output(&mut self, line: u8, initial: Level) -> Result<()> {
        self.claim(line, LineEvent::ClaimOutput { line, initial })?;
        let mut state = self.state.lock();
        state.outputs.insert(line);
        state.levels.insert(line, initial);
        Ok(())
    }

    fn claim_input(&mut self, line: u8) -> Result<()> {
        self.claim(line, LineEvent::ClaimInput { line })?;
        self.state.lock().inputs.insert(line);
        Ok(())
    }

    fn write(&mut self, line: u8, level: Level) -> Result<()> {
        let mut state = self.state.lock();
        if !state.outputs.contains(&line) {
            return Err(MuxError::NotClaimed {
                line,
                expected: "output",
            });
        }
        state.levels.insert(line, level);
        state.events.push(LineEvent::Write { line, level });
        Ok(())
    }

    #[allow(clippy::panic)]
    fn read(&mut self, line: u8) -> Result<Level> {
        let mut state = self.state.lock();
        if !state.inputs.contains(&line) {
            return Err(MuxError::NotClaimed {
                line,
                expected: "input",
            });
        }

        let enabled = state.levels.get(&self.config.enable_line) == Some(&Level::Low);
        let channel = self.selected_channel(&state).map(|c| c.index());

        if let Some(c) = channel {
            if state.faults.contains(&Fault::PanicOnChannel(c)) {
                drop(state);
                panic!("simulated fault while sampling channel {c}");
            }
            if state.faults.contains(&Fault::ReadOnChannel(c)) {
                return Err(MuxError::Io {
                    line,
                    message: format!("simulated read failure on channel {c}"),
                });
            }
        }

        let high = line == self.config.signal_line
            && enabled
            && channel.is_some_and(|c| state.connected.contains(&c));
        let level = Level::from(high);
        state.events.push(LineEvent::Read { line, level });
        Ok(level)
    }

    fn release_all(&mut self) {
        let mut state = self.state.lock();
        state.outputs.clear();
        state.inputs.clear();
        state.events.push(LineEvent::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_follow_select_lines_and_enable() {
        let config = MuxConfig::default();
        let sim = SimulatedGpio::new(&config).with_connected([5]);
        let mut bus = sim.open().unwrap();

        for line in config.select_lines {
            bus.claim_output(line, Level::Low).unwrap();
        }
        bus.claim_output(config.enable_line, Level::High).unwrap();
        bus.claim_input(config.signal_line).unwrap();

        // channel 5 = S0 + S2
        bus.write(config.select_lines[0], Level::High).unwrap();
        bus.write(config.select_lines[2], Level::High).unwrap();
        assert_eq!(bus.read(config.signal_line).unwrap(), Level::Low);

        bus.write(config.enable_line, Level::Low).unwrap();
        assert_eq!(bus.read(config.signal_line).unwrap(), Level::High);

        bus.release_all();
        assert_eq!(sim.claimed(), 0);
    }

    #[test]
    fn unclaimed_lines_are_rejected() {
        let sim = SimulatedGpio::new(&MuxConfig::default());
        let mut bus = sim.open().unwrap();
        assert!(matches!(
            bus.write(26, Level::High),
            Err(MuxError::NotClaimed { line: 26, .. })
        ));
    }

    #[test]
    fn open_fault_is_reported() {
        let sim = SimulatedGpio::new(&MuxConfig::default())
            .with_fault(Fault::Open("no gpiomem".into()));
        assert_eq!(sim.open().err(), Some(MuxError::Init("no gpiomem".into())));
        assert_eq!(sim.open_count(), 1);
    }
}
