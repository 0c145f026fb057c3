//! Core types shared across tablex facilities
//!
//! This crate holds the canonical names used by the logging facility and
//! by anything that inspects its output (tests, log pipelines):
//!
//! - **Schema constants**: canonical field keys and event names

pub mod schema;
