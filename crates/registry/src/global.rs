//! The process-wide registry and the free functions that drive it.
//!
//! The singleton is created lazily on first use, reading its [`Settings`]
//! from the environment, and lives until the process exits.

use crate::registry::{FireReport, Registry};
use atexit_config::Settings;
use atexit_core::{FatalMessage, HandlerId, RegistryState};
use once_cell::sync::Lazy;

static REGISTRY: Lazy<Registry> =
    Lazy::new(|| Registry::with_settings(Settings::from_env_or_default()));

/// The process-wide registry
pub fn global() -> &'static Registry {
    &REGISTRY
}

/// Register a handler with the process-wide registry.
///
/// The handler runs when [`exit`] or [`fatal`] (or one of the `fatal!`
/// macros) is called, not when `main` returns.
pub fn register<F>(handler: F) -> HandlerId
where
    F: Fn() + Send + Sync + 'static,
{
    REGISTRY.register(handler)
}

/// Cancel a handler registered with [`register`]. Unknown ids are ignored.
pub fn cancel(id: HandlerId) -> bool {
    REGISTRY.cancel(id)
}

/// Fire the process-wide handlers without exiting.
pub fn run_handlers() -> &'static FireReport {
    REGISTRY.run_handlers()
}

pub fn state() -> RegistryState {
    REGISTRY.state()
}

/// Run all handlers, then terminate the process with `code`
pub fn exit(code: i32) -> ! {
    REGISTRY.exit(code)
}

/// Run all handlers, then log `message` and terminate the process
pub fn fatal(message: FatalMessage) -> ! {
    REGISTRY.fatal(message)
}

/// `id.cancel()` against the process-wide registry
pub trait CancelExt {
    fn cancel(self) -> bool;
}

impl CancelExt for HandlerId {
    fn cancel(self) -> bool {
        REGISTRY.cancel(self)
    }
}
