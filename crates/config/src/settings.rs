use atexit_core::{Error, Result};

pub const FAULT_DIAGNOSTICS_VAR: &str = "ATEXIT_FAULT_DIAGNOSTICS";
pub const FATAL_EXIT_CODE_VAR: &str = "ATEXIT_FATAL_EXIT_CODE";
pub const LOG_FILTER_VAR: &str = "ATEXIT_LOG";

/// Exit status used by the fatal-log primitive unless overridden
pub const DEFAULT_FATAL_EXIT_CODE: i32 = 1;
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Immutable runtime settings for a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Write `error: atexit handler error: ...` to stderr when a handler panics
    pub fault_diagnostics: bool,

    /// Status the default terminator exits with after logging a fatal message
    pub fatal_exit_code: i32,

    /// Default directive for the tracing `EnvFilter`
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fault_diagnostics: true,
            fatal_exit_code: DEFAULT_FATAL_EXIT_CODE,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Settings {
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// Load settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults; a variable that is set but cannot
    /// be parsed is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(raw) = lookup(FAULT_DIAGNOSTICS_VAR) {
            settings.fault_diagnostics = parse_bool(FAULT_DIAGNOSTICS_VAR, &raw)?;
        }

        if let Some(raw) = lookup(FATAL_EXIT_CODE_VAR) {
            settings.fatal_exit_code = raw.trim().parse::<i32>().map_err(|e| {
                Error::environment(FATAL_EXIT_CODE_VAR, format!("invalid exit code '{raw}': {e}"))
            })?;
        }

        if let Some(raw) = lookup(LOG_FILTER_VAR) {
            let raw = raw.trim();
            if !raw.is_empty() {
                settings.log_filter = raw.to_string();
            }
        }

        tracing::trace!(?settings, "loaded atexit settings");
        Ok(settings)
    }

    /// Like [`Settings::from_env`], but falls back to defaults on bad input.
    pub fn from_env_or_default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring invalid atexit settings");
            Settings::default()
        })
    }
}

fn parse_bool(variable: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::environment(
            variable,
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

/// Programmatic construction of [`Settings`]
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    pub fn fault_diagnostics(mut self, enabled: bool) -> Self {
        self.settings.fault_diagnostics = enabled;
        self
    }

    pub fn fatal_exit_code(mut self, code: i32) -> Self {
        self.settings.fatal_exit_code = code;
        self
    }

    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.settings.log_filter = filter.into();
        self
    }

    pub fn build(self) -> Settings {
        self.settings
    }
}
