//! Configuration for atexit
//!
//! Settings are read from `ATEXIT_*` environment variables once, when the
//! process-wide registry is first touched, and are immutable afterwards.

pub mod settings;

pub use settings::*;
