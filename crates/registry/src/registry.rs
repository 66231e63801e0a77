//! The exit-handler registry.
//!
//! A [`Registry`] owns an insertion-ordered set of handlers and a one-shot
//! gate. The first termination call fires every registered handler in
//! registration order, each behind its own `catch_unwind`, and only then hands
//! off to the [`Terminator`]. Concurrent termination calls block on the same
//! gate and never fire a second time.
//!
//! ## Constraints on handlers
//!
//! - Handlers run while the registry holds a shared lock on its handler set.
//!   Calling `register` or `cancel` on the same registry from inside a handler
//!   deadlocks, as does calling `exit`, `fatal` or `run_handlers` again.
//! - There is no timeout. A handler that never returns stalls the exit forever.
//! - Handlers may run on whichever thread called the termination entry point.

use crate::terminator::{ProcessTerminator, Terminator};
use atexit_config::Settings;
use atexit_core::{FatalMessage, HandlerId, RegistryState};
use atexit_utils::payload_message;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info};

type Handler = Box<dyn Fn() + Send + Sync + 'static>;

/// A handler that panicked while firing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFault {
    pub id: HandlerId,
    /// The rendered panic payload
    pub message: String,
}

/// Outcome of the single firing of a registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FireReport {
    /// Number of handlers invoked, including those that panicked
    pub invoked: usize,
    pub faults: Vec<HandlerFault>,
}

impl FireReport {
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

struct Handlers {
    entries: IndexMap<HandlerId, Handler>,
    next_id: u64,
}

impl Handlers {
    fn new() -> Self {
        Self {
            entries: IndexMap::with_capacity(8),
            next_id: 0,
        }
    }
}

/// Registry of handlers to run once before the process terminates
pub struct Registry {
    handlers: RwLock<Handlers>,
    fired: OnceCell<FireReport>,
    state: AtomicU8,
    settings: Settings,
    terminator: Arc<dyn Terminator>,
}

impl Registry {
    /// Create a registry with default settings that exits the real process
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self::with_terminator(settings, Arc::new(ProcessTerminator))
    }

    /// Create a registry that hands termination to `terminator`
    pub fn with_terminator(settings: Settings, terminator: Arc<dyn Terminator>) -> Self {
        Self {
            handlers: RwLock::new(Handlers::new()),
            fired: OnceCell::new(),
            state: AtomicU8::new(RegistryState::Idle.as_u8()),
            settings,
            terminator,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Register a handler to run before the process exits.
    ///
    /// Registering after the registry has fired is allowed but the handler
    /// will never run.
    pub fn register<F>(&self, handler: F) -> HandlerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut handlers = self.handlers.write();
        let id = HandlerId::from_raw(handlers.next_id);
        handlers.next_id = handlers.next_id.wrapping_add(1);
        handlers.entries.insert(id, Box::new(handler));
        debug!(%id, registered = handlers.entries.len(), "registered exit handler");
        id
    }

    /// Remove a handler.
    ///
    /// Returns `true` if the handler was still registered. Unknown, already
    /// cancelled and already fired ids are silently ignored.
    pub fn cancel(&self, id: HandlerId) -> bool {
        let mut handlers = self.handlers.write();
        let removed = handlers.entries.shift_remove(&id).is_some();
        debug!(%id, removed, "cancelled exit handler");
        removed
    }

    /// Number of currently registered handlers
    pub fn len(&self) -> usize {
        self.handlers.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn state(&self) -> RegistryState {
        RegistryState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Fire every registered handler unless that already happened.
    ///
    /// Callers racing with an in-progress firing block until it completes. All
    /// callers observe the same report.
    pub fn run_handlers(&self) -> &FireReport {
        self.fired.get_or_init(|| self.fire())
    }

    /// Run the handlers, then exit the process with `code`
    pub fn exit(&self, code: i32) -> ! {
        self.run_handlers();
        self.terminator.exit(code)
    }

    /// Run the handlers, then log `message` and exit with the fatal exit code
    pub fn fatal(&self, message: FatalMessage) -> ! {
        self.run_handlers();
        self.terminator.fatal(&message, self.settings.fatal_exit_code)
    }

    fn fire(&self) -> FireReport {
        self.state.store(RegistryState::Firing.as_u8(), Ordering::Release);

        let handlers = self.handlers.read();
        info!(count = handlers.entries.len(), "running exit handlers");

        let mut report = FireReport::default();
        for (id, handler) in handlers.entries.iter() {
            report.invoked += 1;
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| handler())) {
                let fault = HandlerFault {
                    id: *id,
                    message: payload_message(payload.as_ref()),
                };
                error!(id = %fault.id, message = %fault.message, "exit handler panicked");
                if self.settings.fault_diagnostics {
                    self.terminator.report_fault(&fault);
                }
                report.faults.push(fault);
            }
        }
        drop(handlers);

        info!(
            invoked = report.invoked,
            faults = report.faults.len(),
            "exit handlers finished"
        );
        self.state.store(RegistryState::Fired.as_u8(), Ordering::Release);
        report
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("registered", &self.len())
            .field("state", &self.state())
            .field("settings", &self.settings)
            .finish()
    }
}
