//! Top-level error wrapper types.

use crate::{ConfigError, DeliveryError, StorageError};

/// This is the foundation error enum for the Squadboard workspace.
///
/// # Examples
///
/// ```
/// use squadboard_error::{SquadboardError, ConfigError, ConfigErrorKind};
///
/// let cfg_err = ConfigError::new(ConfigErrorKind::ReadFailed(
///     "missing settings file".to_string(),
/// ));
/// let err: SquadboardError = cfg_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum SquadboardErrorKind {
    /// Storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// External delivery error
    #[from(DeliveryError)]
    Delivery(DeliveryError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Squadboard error with kind discrimination.
///
/// # Examples
///
/// ```
/// use squadboard_error::{SquadboardResult, StorageError, StorageErrorKind};
///
/// fn might_fail() -> SquadboardResult<()> {
///     Err(StorageError::new(StorageErrorKind::Unavailable("down".into())))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Squadboard Error: {}", _0)]
pub struct SquadboardError(Box<SquadboardErrorKind>);

impl SquadboardError {
    /// Create a new error from a kind.
    pub fn new(kind: SquadboardErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SquadboardErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to SquadboardErrorKind
impl<T> From<T> for SquadboardError
where
    T: Into<SquadboardErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Squadboard operations.
///
/// # Examples
///
/// ```
/// use squadboard_error::{SquadboardResult, ConfigError, ConfigErrorKind};
///
/// fn load_settings() -> SquadboardResult<String> {
///     Err(ConfigError::new(ConfigErrorKind::ReadFailed(
///         "no such file".to_string(),
///     )))?
/// }
/// ```
pub type SquadboardResult<T> = std::result::Result<T, SquadboardError>;
