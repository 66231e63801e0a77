//! Identifiers and lifecycle state for registered exit handlers

use std::fmt::{self, Display};

/// Opaque identifier returned when an exit handler is registered.
///
/// Identifiers are allocated from a monotonically increasing counter and are
/// never reused within a registry, even after the handler they named has been
/// cancelled. Wraparound after `u64::MAX` registrations is not handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    /// Only registries mint identifiers.
    #[doc(hidden)]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw counter value
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler#{}", self.0)
    }
}

/// Lifecycle of a registry: `Idle -> Firing -> Fired`, traversed at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RegistryState {
    /// No termination entry point has been called yet
    Idle = 0,
    /// Handlers are currently being invoked
    Firing = 1,
    /// Every handler has been invoked; further terminations skip straight to exit
    Fired = 2,
}

impl RegistryState {
    /// Decode the value stored by [`RegistryState::as_u8`].
    pub const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => RegistryState::Idle,
            1 => RegistryState::Firing,
            _ => RegistryState::Fired,
        }
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl Display for RegistryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegistryState::Idle => "idle",
            RegistryState::Firing => "firing",
            RegistryState::Fired => "fired",
        };
        f.write_str(name)
    }
}
