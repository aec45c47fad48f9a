//! Simulated acquisition backend for the cable tester.
//!
//! [`MockBackend`] produces per-pin readings from a seeded random source so
//! the rest of the system can be exercised without a multiplexer board or a
//! remote test service.
//!
//! # Default distribution
//!
//! | status  | probability |
//! |---------|-------------|
//! | Seen    | 0.85        |
//! | Missing | 0.12        |
//! | Unknown | 0.03        |
//!
//! # Example
//!
//! ```rust,ignore
//! use tester_driver_mock::MockBackend;
//!
//! let backend = MockBackend::builder().seed(42).build();
//! let readings = backend.run_test(&pins).await;
//! ```

mod mock_backend;
pub mod mode;
pub mod rng;

pub use mock_backend::{DistributionError, MockBackend, MockBackendBuilder, StatusDistribution};
pub use mode::MockMode;
pub use rng::MockRng;
