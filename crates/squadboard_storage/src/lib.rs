//! Storage traits and in-memory stores for the Squadboard coordinator.
//!
//! Three stores back the coordinator: the post store (request records and
//! the one-active-post-per-actor constraint), the cooldown ledger
//! (self-expiring per-actor timestamps), and the policy store (per-venue
//! configuration, lazily defaulted). Each is an `async_trait` seam with an
//! in-memory implementation; every operation takes and releases its lock
//! internally, so callers never hold a lock across an await point.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cooldown_ledger;
mod policy_store;
mod post_store;

pub use cooldown_ledger::{CooldownLedger, MemoryCooldownLedger};
pub use policy_store::{MemoryPolicyStore, PolicyStore};
pub use post_store::{InsertActiveError, MemoryPostStore, PostStore};
