//! Core domain types for the Squadboard request-board coordinator.
//!
//! This crate holds the pure domain model: identifier newtypes, the [`Post`]
//! record and its lifecycle states, per-venue policy configuration, cooldown
//! records, and the category classifier. Nothing here performs I/O; async
//! seams (stores, external collaborators) live in the `squadboard_storage`
//! and `squadboard_interface` crates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod classify;
mod cooldown;
mod id;
mod policy;
mod post;
mod time;

pub use classify::{Classification, GENERAL_CATEGORY, classify};
pub use cooldown::{COOLDOWN_RECORD_TTL, CooldownRecord, CooldownStatus};
pub use id::{ActorId, ChannelId, DeliveryRef, PostId, RoleId, VenueId};
pub use policy::{
    AllowedChannel, CategoryPreset, CooldownConfig, ExpirationConfig, FeatureToggles, TriggerMode,
    VenuePolicy, VenuePolicyBuilder, VenuePolicyBuilderError,
};
pub use post::{MAX_BODY_LEN, OriginKind, Post, PostState};
pub use time::{Clock, ManualClock, SystemClock};
