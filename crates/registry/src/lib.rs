//! Exit handlers for Rust programs.
//!
//! Register closures with [`register`] and terminate through [`exit`] or one
//! of [`fatal!`], [`fatalf!`] and [`fatalln!`]. Every handler still registered
//! at that point runs exactly once, in registration order, before the process
//! ends. A panicking handler is reported on stderr and does not stop the
//! others from running.
//!
//! ```no_run
//! let id = atexit::register(|| println!("flushing"));
//! atexit::register(|| println!("exiting"));
//! atexit::cancel(id);
//! atexit::exit(0);
//! ```
//!
//! Returning from `main`, `std::process::exit` and signals do not run the
//! handlers. See [`Registry`] for the constraints placed on handler bodies.

mod macros;

pub mod global;
pub mod registry;
pub mod terminator;

pub use atexit_config::Settings;
pub use atexit_core::{FatalMessage, HandlerId, RegistryState};
pub use global::{cancel, exit, fatal, global, register, run_handlers, state, CancelExt};
pub use registry::{FireReport, HandlerFault, Registry};
pub use terminator::{ProcessTerminator, Terminator, FAULT_DIAGNOSTIC_PREFIX};

/// Package version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
