//! Multiplexer acquisition backend for the cable tester.
//!
//! The tester's far end is wired through a 16-channel analog multiplexer
//! (CD74HC4067 class). A sweep drives four select lines (S0..S3) with the
//! binary channel number, pulls the active-low enable line (EN) down, waits
//! for the analog path to settle and samples the common signal line (SIG):
//! high means the pin was seen, low means it is missing.
//!
//! # Architecture
//!
//! - [`addresser`] - channel numbers and their 4-bit select patterns
//! - [`gpio`] - the [`GpioBus`] / [`GpioProvider`] HAL traits
//! - [`sweep`] - scoped bus ownership for one sweep; the enable line is
//!   deasserted and all lines released on every exit path, including panics
//! - [`MuxBackend`] - the [`AcquisitionBackend`](tester_core::AcquisitionBackend)
//!   implementation, running the blocking sweep on a blocking worker
//! - [`sim`] - a recording, in-memory bus for tests and bench bring-up
//! - `rpi` (feature `rpi`) - Raspberry Pi GPIO through `rppal`
//!
//! Pins beyond the 16 physical channels wrap around (pin 17 reads channel
//! 0 again). Testing more than 16 distinct conductors needs a second
//! multiplexer, which this backend does not drive.
//!
//! # Example
//!
//! ```rust,ignore
//! use tester_driver_mux::{default_provider, MuxBackend, MuxConfig};
//!
//! let backend = MuxBackend::new(MuxConfig::default(), default_provider())?;
//! println!("{}", backend.health().await);
//! ```

pub mod addresser;
mod backend;
mod config;
pub mod error;
pub mod gpio;
#[cfg(feature = "rpi")]
pub mod rpi;
pub mod sim;
pub mod sweep;

pub use addresser::{
    channel_for_ordinal, Channel, ChannelAddresser, SelectPattern, CHANNEL_COUNT,
};
pub use backend::MuxBackend;
pub use config::MuxConfig;
pub use error::{MuxError, Result};
pub use gpio::{default_provider, GpioBus, GpioProvider, Level, UnavailableGpio};
pub use sim::{Fault, LineEvent, SimulatedGpio};
