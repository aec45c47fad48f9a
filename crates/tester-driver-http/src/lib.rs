//! Remote test service backend for the cable tester.
//!
//! Delegates continuity tests to a service reached over HTTP:
//!
//! | Request            | Success response                          |
//! |--------------------|-------------------------------------------|
//! | `GET {base}/health`| any 2xx                                    |
//! | `GET {base}/test`  | JSON object, pin id → `"seen"` / `"miss"` |
//!
//! Every failure (connection refused, timeout, non-2xx status, a body that
//! is not a JSON object) degrades to all requested pins Unknown.

mod backend;
mod config;
pub mod error;

pub use backend::{decode_statuses, RemoteBackend};
pub use config::HttpConfig;
pub use error::RemoteError;
