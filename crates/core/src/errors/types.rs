use std::path::PathBuf;

/// Result type alias for atexit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for atexit operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Environment variable related errors
    #[error("environment variable '{variable}' error: {message}")]
    Environment { variable: String, message: String },

    /// File system operations
    #[error("file system {operation} operation failed for '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Tracing subscriber could not be installed
    #[error("failed to initialise tracing: {message}")]
    TracingInit { message: String },
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::FileSystem {
            path: PathBuf::new(),
            operation: "unknown".to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_display() {
        let err = Error::Environment {
            variable: "ATEXIT_FATAL_EXIT_CODE".to_string(),
            message: "not an integer".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "environment variable 'ATEXIT_FATAL_EXIT_CODE' error: not an integer"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::FileSystem { .. }));
        assert!(err.to_string().contains("gone"));
    }
}
