//! Core types and traits for the cable tester.
//!
//! Everything the acquisition drivers and the session controller agree on
//! lives here:
//!
//! - [`PinId`], [`Pinout`] and the ordered [`PinMap`] container
//! - [`RawPinStatus`] (what a backend observed) and [`NormalizedPinStatus`]
//!   (what the operator sees)
//! - [`TestResult`] and the [`aggregate`] reduction
//! - [`HealthStatus`] / [`BackendMode`]
//! - the [`AcquisitionBackend`] trait every driver crate implements
//! - [`DriverError`] for driver-level diagnostics
//!
//! # Example
//!
//! ```rust
//! use tester_core::{aggregate, PinId, PinMap, RawPinStatus};
//!
//! let mut raw = PinMap::new();
//! raw.insert(PinId::from("1"), RawPinStatus::Seen);
//! raw.insert(PinId::from("2"), RawPinStatus::Missing);
//!
//! let result = aggregate(&raw);
//! assert!(!result.passed);
//! assert_eq!(result.status_line(), "FAIL");
//! ```

pub mod backend;
pub mod error;
pub mod health;
pub mod pin;
pub mod result;
pub mod status;

pub use backend::{all_unknown, AcquisitionBackend, UnconfiguredBackend};
pub use error::{DriverError, DriverErrorKind, PinoutError};
pub use health::{BackendMode, HealthStatus, UnknownModeError};
pub use pin::{PinId, PinMap, Pinout};
pub use result::{aggregate, TestResult};
pub use status::{NormalizedPinStatus, RawPinStatus};
