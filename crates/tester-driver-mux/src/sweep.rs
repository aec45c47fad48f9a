//! One continuity sweep over the multiplexer.
//!
//! [`MuxSession`] owns the bus for the duration of a sweep. Dropping it
//! drives EN high (all channels disconnected) and releases every line, so
//! teardown runs after an early return, a failed read, or a panic unwinding
//! through the sweep.

use crate::addresser::{Channel, ChannelAddresser};
use crate::config::MuxConfig;
use crate::error::Result;
use crate::gpio::{GpioBus, Level};
use std::time::Duration;
use tester_core::{PinId, PinMap, RawPinStatus};
use tracing::{debug, warn};

pub struct MuxSession<'a> {
    bus: &'a mut dyn GpioBus,
    config: &'a MuxConfig,
    addresser: ChannelAddresser,
    enable_claimed: bool,
    current: Option<Channel>,
}

impl<'a> MuxSession<'a> {
    /// Claim S0..S3 low, EN high (disabled) and SIG as a pulled-down input.
    pub fn open(bus: &'a mut dyn GpioBus, config: &'a MuxConfig) -> Result<Self> {
        let mut session = Self {
            bus,
            config,
            addresser: ChannelAddresser,
            enable_claimed: false,
            current: None,
        };
        for line in config.select_lines {
            session.bus.claim_output(line, Level::Low)?;
        }
        session.bus.claim_output(config.enable_line, Level::High)?;
        session.enable_claimed = true;
        session.bus.claim_input(config.signal_line)?;
        Ok(session)
    }

    /// Assert EN (active low).
    pub fn enable(&mut self) -> Result<()> {
        self.bus.write(self.config.enable_line, Level::Low)
    }

    /// Drive the select lines for `channel`. No-op if it is already selected.
    ///
    /// Returns whether the lines changed.
    pub fn select(&mut self, channel: Channel) -> Result<bool> {
        if self.current == Some(channel) {
            return Ok(false);
        }
        self.current = None;
        let levels = self.addresser.select(channel).levels();
        for (line, level) in self.config.select_lines.into_iter().zip(levels) {
            self.bus.write(line, level)?;
        }
        self.current = Some(channel);
        Ok(true)
    }

    pub fn sample(&mut self) -> Result<RawPinStatus> {
        let level = self.bus.read(self.config.signal_line)?;
        Ok(if level.is_high() {
            RawPinStatus::Seen
        } else {
            RawPinStatus::Missing
        })
    }

    fn read_pin(&mut self, channel: Channel, settle: Duration) -> Result<RawPinStatus> {
        if self.select(channel)? && !settle.is_zero() {
            std::thread::sleep(settle);
        }
        self.sample()
    }
}

impl Drop for MuxSession<'_> {
    fn drop(&mut self) {
        if self.enable_claimed {
            if let Err(e) = self.bus.write(self.config.enable_line, Level::High) {
                warn!(error = %e, "Failed to deassert multiplexer enable");
            }
        }
        self.bus.release_all();
        debug!("Multiplexer lines released");
    }
}

/// Read every pin in `pins`, in order.
///
/// Setup failures are returned as errors. A failure on a single pin marks
/// that pin Unknown and the sweep carries on.
pub fn sweep(
    bus: &mut dyn GpioBus,
    config: &MuxConfig,
    pins: &[PinId],
) -> Result<PinMap<RawPinStatus>> {
    let mut session = MuxSession::open(bus, config)?;
    session.enable()?;

    let mut readings = PinMap::with_capacity(pins.len());
    for (position, pin) in pins.iter().enumerate() {
        let channel = session.addresser.channel_for(pin, position);
        let status = match session.read_pin(channel, config.settle) {
            Ok(status) => status,
            Err(e) => {
                warn!(pin = %pin, channel = %channel, error = %e, "Pin read failed");
                RawPinStatus::Unknown
            }
        };
        readings.insert(pin.clone(), status);
    }

    debug!(pins = pins.len(), "Multiplexer sweep complete");
    Ok(readings)
}
