//! Squadboard - ephemeral request-board coordinator
//!
//! Squadboard lets an actor publish a short-lived "looking for group"
//! request visible to others in a venue, with per-actor rate limiting, a
//! one-active-request-per-actor guarantee, keyword-based category
//! classification, per-venue policy, and background reclamation of expired
//! requests.
//!
//! # Architecture
//!
//! The workspace is organized as focused crates:
//!
//! - `squadboard_core` - pure domain types and the category classifier
//! - `squadboard_error` - error types
//! - `squadboard_interface` - external collaborator traits (delivery,
//!   membership, audit)
//! - `squadboard_storage` - storage traits and in-memory stores
//!
//! This crate ties them together: the [`EligibilityGate`] decides whether a
//! creation attempt may proceed, the [`Coordinator`] orchestrates the
//! create/edit/delete lifecycle against the stores and collaborators, and
//! the [`Sweeper`] retires expired posts in the background.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use squadboard::{Coordinator, CoordinatorConfig, Sweeper};
//! use squadboard_core::{ActorId, ChannelId, OriginKind, SystemClock, VenueId};
//! use squadboard_storage::{MemoryCooldownLedger, MemoryPolicyStore, MemoryPostStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     squadboard::init_console_telemetry()?;
//!
//!     let coordinator = Arc::new(Coordinator::new(
//!         Arc::new(MemoryPolicyStore::new()),
//!         Arc::new(MemoryPostStore::new()),
//!         Arc::new(MemoryCooldownLedger::new()),
//!         delivery,   // your gateway adapter
//!         membership, // your role adapter
//!         audit,      // your audit adapter
//!         Arc::new(SystemClock),
//!         CoordinatorConfig::load()?,
//!     ));
//!     let sweeper = Sweeper::from_config(coordinator.clone()).spawn();
//!
//!     let post = coordinator
//!         .create_post(
//!             ActorId(3),
//!             VenueId(1),
//!             ChannelId(2),
//!             "lfg valorant ranked",
//!             OriginKind::Interactive,
//!             None,
//!         )
//!         .await?;
//!     println!("posted under {}", post.category());
//!
//!     sweeper.shutdown().await;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod coordinator;
mod eligibility;
mod sweeper;
mod telemetry;

pub use config::CoordinatorConfig;
pub use coordinator::{Coordinator, CreateError, DeleteError, EditError};
pub use eligibility::{EligibilityError, EligibilityGate};
pub use sweeper::{Sweeper, SweeperHandle};
pub use telemetry::init_console_telemetry;

// Re-export the sibling crates for convenience.
pub use squadboard_core as core;
pub use squadboard_error as error;
pub use squadboard_interface as interface;
pub use squadboard_storage as storage;
