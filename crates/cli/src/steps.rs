//! Scenario steps understood by `atexit-demo`

use atexit::HandlerId;
use atexit_core::{Error, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// One step of a termination scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Register a handler appending the text to the sentinel file
    Write(String),
    /// Register a handler that panics with the message
    Panic(String),
    /// Cancel the most recently registered handler
    CancelLast,
}

impl FromStr for Step {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "cancel-last" {
            return Ok(Step::CancelLast);
        }
        match s.split_once(':') {
            Some(("write", text)) => Ok(Step::Write(text.to_string())),
            Some(("panic", message)) => Ok(Step::Panic(message.to_string())),
            _ => Err(Error::configuration(format!(
                "unknown step '{s}', expected write:<text>, panic:<message> or cancel-last"
            ))),
        }
    }
}

impl Step {
    /// Apply the step to the process-wide registry, tracking the last id
    pub fn apply(&self, sentinel: &Path, last: &mut Option<HandlerId>) {
        match self {
            Step::Write(text) => {
                let path = sentinel.to_path_buf();
                let text = text.clone();
                *last = Some(atexit::register(move || {
                    if let Err(e) = append(&path, &text) {
                        tracing::error!(error = %e, "failed to write sentinel");
                    }
                }));
            }
            Step::Panic(message) => {
                let message = message.clone();
                *last = Some(atexit::register(move || panic!("{message}")));
            }
            Step::CancelLast => {
                if let Some(id) = last.take() {
                    let removed = atexit::cancel(id);
                    tracing::debug!(%id, removed, "cancel-last");
                }
            }
        }
    }
}

fn append(path: &Path, text: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::file_system(path, "open sentinel", e))?;
    file.write_all(text.as_bytes())
        .map_err(|e| Error::file_system(path, "append to sentinel", e))
}
