//! Structured logging facility for tablex
//!
//! - Single initialization point via `init(profile)`
//! - Boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - In-memory capture layer for deterministic assertions in tests
//!
//! Only the public entry points (`reconcile`, `reconcile_items`) own
//! boundary events. The pipeline stages underneath log with
//! `tracing::debug!` / `tracing::trace!` only.
//!
//! # Usage
//!
//! ```rust
//! use tablex_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod capture;
pub mod init;
pub mod macros;

pub use capture::{init_test_capture, CapturedEvent, TestCapture};
pub use init::{init, Profile};
