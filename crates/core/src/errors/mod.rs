//! Error types for atexit operations

mod builders;
mod types;

pub use types::{Error, Result};
