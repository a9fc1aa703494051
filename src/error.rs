//! Error types for heartfield.
//!
//! Layout generation cannot fail. The only failures are a malformed
//! reference instant and starting the timer without an async runtime.

use std::fmt;

/// Errors that can occur when starting the elapsed-time counter.
#[derive(Debug)]
pub enum TimerError {
    /// The reference instant is not a valid RFC 3339 / ISO-8601 timestamp.
    InvalidReference {
        input: String,
        source: chrono::ParseError,
    },
    /// No Tokio runtime is available to drive the one-second tick.
    NoRuntime,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerError::InvalidReference { input, source } => {
                write!(f, "Invalid reference instant '{}': {}", input, source)
            }
            TimerError::NoRuntime => write!(
                f,
                "No Tokio runtime available. Start the timer from within a runtime context."
            ),
        }
    }
}

impl std::error::Error for TimerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TimerError::InvalidReference { source, .. } => Some(source),
            TimerError::NoRuntime => None,
        }
    }
}

/// Errors that can occur when building or driving a scene.
#[derive(Debug)]
pub enum HeartfieldError {
    /// Timer setup failed.
    Timer(TimerError),
}

impl fmt::Display for HeartfieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeartfieldError::Timer(e) => write!(f, "Timer error: {}", e),
        }
    }
}

impl std::error::Error for HeartfieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HeartfieldError::Timer(e) => Some(e),
        }
    }
}

impl From<TimerError> for HeartfieldError {
    fn from(e: TimerError) -> Self {
        HeartfieldError::Timer(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_reference_display_and_source() {
        let source = chrono::DateTime::parse_from_rfc3339("not a date").unwrap_err();
        let err = TimerError::InvalidReference {
            input: "not a date".into(),
            source,
        };
        assert!(err.to_string().contains("'not a date'"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_wrapping() {
        let err: HeartfieldError = TimerError::NoRuntime.into();
        assert!(err.to_string().starts_with("Timer error:"));
        assert!(err.source().is_some());
    }
}
