//! Configuration error types.

/// Kinds of configuration errors.
///
/// Loading splits into two phases with different remedies: reading the
/// settings sources (file and environment) and deserializing them into the
/// coordinator's settings shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ConfigErrorKind {
    /// The settings sources could not be read or merged
    #[display("Failed to read settings: {}", _0)]
    ReadFailed(String),
    /// The merged settings do not deserialize into the expected shape
    #[display("Invalid settings: {}", _0)]
    InvalidSettings(String),
}

/// Configuration error with location tracking.
///
/// Fatal at startup; there is no degraded mode without timeouts.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use squadboard_error::{ConfigError, ConfigErrorKind};
    ///
    /// let err = ConfigError::new(ConfigErrorKind::InvalidSettings(
    ///     "delivery_timeout_secs: expected integer".to_string(),
    /// ));
    /// assert!(format!("{}", err).contains("Invalid settings"));
    /// ```
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
