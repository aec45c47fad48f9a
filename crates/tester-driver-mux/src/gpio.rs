//! Digital I/O abstraction used by the multiplexer sweep.
//!
//! [`GpioProvider`] opens the peripheral; the returned [`GpioBus`] claims
//! individual lines as outputs or pulled-down inputs. Implementations are
//! blocking and are only driven from a blocking worker thread.

use crate::error::{MuxError, Result};
use std::sync::Arc;

/// Logic level on a digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub fn is_high(&self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// An opened GPIO peripheral.
pub trait GpioBus: Send {
    /// Claim `line` as an output driven to `initial`.
    fn claim_output(&mut self, line: u8, initial: Level) -> Result<()>;

    /// Claim `line` as an input with the internal pull-down enabled.
    fn claim_input(&mut self, line: u8) -> Result<()>;

    fn write(&mut self, line: u8, level: Level) -> Result<()>;

    fn read(&mut self, line: u8) -> Result<Level>;

    /// Return every claimed line to its unclaimed state. Infallible and
    /// idempotent.
    fn release_all(&mut self);
}

/// Opens GPIO buses.
pub trait GpioProvider: Send + Sync + std::fmt::Debug {
    /// Short implementation name, shown in health details.
    fn name(&self) -> &'static str;

    fn open(&self) -> Result<Box<dyn GpioBus>>;
}

/// Provider used when no GPIO implementation is compiled in.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableGpio;

impl GpioProvider for UnavailableGpio {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn open(&self) -> Result<Box<dyn GpioBus>> {
        Err(MuxError::Unsupported)
    }
}

/// The platform's GPIO provider.
///
/// With the `rpi` feature this is Raspberry Pi GPIO; otherwise every open
/// fails with [`MuxError::Unsupported`].
pub fn default_provider() -> Arc<dyn GpioProvider> {
    #[cfg(feature = "rpi")]
    {
        Arc::new(crate::rpi::RppalProvider)
    }
    #[cfg(not(feature = "rpi"))]
    {
        Arc::new(UnavailableGpio)
    }
}
