//! Identifier newtypes.
//!
//! Venues, actors, channels and roles carry platform snowflake ids; posts get
//! locally generated UUIDs. Keeping each id a distinct type prevents the
//! argument-swapping bugs that plague `u64`-everywhere code.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a venue (community/tenant scope, e.g. a chat server).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct VenueId(pub u64);

/// Identifier of an actor (the end user creating or deleting posts).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct ActorId(pub u64);

/// Identifier of a channel within a venue.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct ChannelId(pub u64);

/// Identifier of a role within a venue.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct RoleId(pub u64);

/// Identifier of a post, assigned at creation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct PostId(pub Uuid);

impl PostId {
    /// Generate a fresh random post id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Reference to the external rendering of a post (e.g. a sent message id).
///
/// A post starts without one; the delivery collaborator supplies it exactly
/// once after the post is rendered and sent.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[from(String, &str)]
pub struct DeliveryRef(pub String);

impl DeliveryRef {
    /// Create a delivery reference.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }
}
