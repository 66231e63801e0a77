//! The process-exit and fatal-log primitives a registry hands off to once its
//! handlers have run.

use crate::registry::HandlerFault;
use atexit_core::FatalMessage;
use chrono::Local;
use std::io::{self, Write};

/// Prefix of the stderr line written for every panicking handler
pub const FAULT_DIAGNOSTIC_PREFIX: &str = "error: atexit handler error:";

/// Terminates the process on behalf of a [`Registry`](crate::Registry).
///
/// Implementations must not return from `exit` or `fatal`. Test harnesses
/// typically unwind instead of exiting so the termination can be observed.
pub trait Terminator: Send + Sync {
    /// End the process with `code`
    fn exit(&self, code: i32) -> !;

    /// Log `message` and end the process with `exit_code`
    fn fatal(&self, message: &FatalMessage, exit_code: i32) -> !;

    /// Called once for each handler that panicked while firing
    fn report_fault(&self, fault: &HandlerFault) {
        write_fault_diagnostic(&mut io::stderr().lock(), fault);
    }
}

/// Write the one-line diagnostic for a panicking handler.
///
/// Write errors are ignored: the diagnostic is best effort and must never
/// stop the remaining handlers or the exit itself.
pub fn write_fault_diagnostic<W: Write>(writer: &mut W, fault: &HandlerFault) {
    let _ = writeln!(writer, "{FAULT_DIAGNOSTIC_PREFIX} {}", fault.message);
    let _ = writer.flush();
}

/// Terminates the real process.
///
/// `fatal` mimics a classic logger: a `YYYY/MM/DD HH:MM:SS` local timestamp,
/// the message, then exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessTerminator;

impl ProcessTerminator {
    fn fatal_line(message: &FatalMessage) -> String {
        format!(
            "{} {}",
            Local::now().format("%Y/%m/%d %H:%M:%S"),
            message.render()
        )
    }
}

impl Terminator for ProcessTerminator {
    fn exit(&self, code: i32) -> ! {
        tracing::debug!(code, "exiting process");
        std::process::exit(code)
    }

    fn fatal(&self, message: &FatalMessage, exit_code: i32) -> ! {
        tracing::debug!(exit_code, "fatal termination");
        let mut stderr = io::stderr().lock();
        let _ = stderr.write_all(Self::fatal_line(message).as_bytes());
        let _ = stderr.flush();
        drop(stderr);
        std::process::exit(exit_code)
    }
}
