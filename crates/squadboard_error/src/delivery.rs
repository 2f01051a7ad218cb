//! Delivery error types for the external render/remove boundary.

/// Kinds of delivery errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum DeliveryErrorKind {
    /// Rendering or sending the post failed
    #[display("Failed to render post: {}", _0)]
    RenderFailed(String),
    /// Removing the rendered post failed
    #[display("Failed to remove delivery: {}", _0)]
    RemoveFailed(String),
    /// The delivery call exceeded its time budget
    #[display("Delivery timed out after {}s", _0)]
    Timeout(u64),
}

/// Delivery error with location tracking.
///
/// A delivery failure during creation causes compensating retirement of the
/// just-created post; during deletion and sweeping it is best-effort and
/// only logged.
///
/// # Examples
///
/// ```
/// use squadboard_error::{DeliveryError, DeliveryErrorKind};
///
/// let err = DeliveryError::new(DeliveryErrorKind::Timeout(10));
/// assert!(format!("{}", err).contains("timed out"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Delivery Error: {} at line {} in {}", kind, line, file)]
pub struct DeliveryError {
    /// The kind of error that occurred
    pub kind: DeliveryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DeliveryError {
    /// Create a new delivery error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DeliveryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
