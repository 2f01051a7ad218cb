//! External collaborator traits for the Squadboard coordinator.
//!
//! The coordinator never talks to the chat platform directly; it calls out
//! through the narrow seams defined here. Production adapters (the gateway,
//! the audit pipeline) live outside this workspace's scope; tests supply
//! simple doubles.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audit;
mod traits;

pub use audit::AuditEvent;
pub use traits::{AuditNotifier, Delivery, Membership};
