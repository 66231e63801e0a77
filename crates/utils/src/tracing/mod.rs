use atexit_core::{Error, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export tracing macros for convenience
pub use ::tracing::{debug, error, info, trace, warn};

/// Initialize the tracing system
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (normally the
/// `ATEXIT_LOG` setting) is used. Output goes to stderr so it never mixes with
/// a program's stdout, and ANSI colours are only used on a TTY.
pub fn init(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| Error::tracing_init(format!("invalid filter '{default_filter}': {e}")))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::tracing_init(e.to_string()))
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error() {
        let _ = init("warn");
        let second = init("warn");
        assert!(matches!(second, Err(Error::TracingInit { .. })));
    }
}
