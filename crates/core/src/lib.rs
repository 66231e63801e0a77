//! Core domain types and errors for the `atexit` workspace.
//!
//! ## Key Components
//!
//! - **`errors`**: The `Error` enum and `Result` alias shared by configuration
//!   loading, tracing setup and the demo binary. Registry operations never fail.
//! - **`handler`**: `HandlerId` and the `RegistryState` state machine.
//! - **`fatal`**: `FatalMessage`, the three shapes a fatal termination message
//!   can take.

pub mod errors;
pub mod fatal;
pub mod handler;

pub use self::{
    errors::{Error, Result},
    fatal::FatalMessage,
    handler::{HandlerId, RegistryState},
};
