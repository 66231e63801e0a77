//! Shared utilities for atexit
//!
//! Logging setup and helpers for inspecting captured panics.

pub mod panic;
pub mod tracing;

pub use panic::payload_message;
