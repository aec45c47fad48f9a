//! Cable continuity tester.
//!
//! Tests multi-conductor cables (RJ45, XLR, bench harnesses) by asking an
//! acquisition backend which far-end pins carry signal and reducing that to
//! a per-pin Ok/Bad verdict and an overall PASS/FAIL.
//!
//! # Crates
//!
//! - `tester-core`: pins, statuses, results, the backend trait
//! - `tester-driver-mock`: seeded simulation
//! - `tester-driver-mux`: 16-channel analog multiplexer on GPIO lines
//! - `tester-driver-http`: remote test service
//! - `tester-touch`: touch panel input
//!
//! # Modules
//!
//! - [`config`]: Figment-based configuration (TOML + environment)
//! - [`logging`]: tracing subscriber setup
//! - [`catalog`]: built-in pinouts
//! - [`backend`]: backend selection from configuration
//! - [`session`]: the test session controller and [`Presenter`] trait
//! - [`screen`]: touch panel screens wired to the session
//!
//! [`Presenter`]: session::Presenter

pub mod backend;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod screen;
pub mod session;

pub use backend::build_backend;
pub use catalog::PinoutCatalog;
pub use config::AppConfig;
pub use error::{CatalogError, ConfigError, SessionError};
pub use screen::{PanelLayout, ScreenAction, TouchPanel};
pub use session::{Presenter, TestSession};
