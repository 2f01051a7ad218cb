//! Error types for the Squadboard request-board coordinator.
//!
//! This crate provides the foundation error types used throughout the Squadboard
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Expected user-facing rejections (eligibility denials, permission checks) are
//! *not* represented here — those are ordinary domain enums in the coordinator
//! crate. This crate covers only genuine failures: storage, delivery, and
//! configuration.
//!
//! # Examples
//!
//! ```
//! use squadboard_error::{SquadboardResult, StorageError, StorageErrorKind};
//!
//! fn load_record() -> SquadboardResult<String> {
//!     Err(StorageError::new(StorageErrorKind::Unavailable(
//!         "backend offline".to_string(),
//!     )))?
//! }
//!
//! match load_record() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod delivery;
mod error;
mod storage;

pub use config::{ConfigError, ConfigErrorKind};
pub use delivery::{DeliveryError, DeliveryErrorKind};
pub use error::{SquadboardError, SquadboardErrorKind, SquadboardResult};
pub use storage::{StorageError, StorageErrorKind};
