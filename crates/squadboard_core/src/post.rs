//! The post record and its lifecycle states.

use crate::{ActorId, ChannelId, DeliveryRef, PostId, VenueId};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Maximum length of a post body, in characters. Longer input is truncated
/// at construction.
pub const MAX_BODY_LEN: usize = 512;

/// How a post came to be created.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum OriginKind {
    /// Created via an explicit command.
    Interactive,
    /// Created by heuristic detection of free-form chat text.
    Ambient,
}

/// Lifecycle state of a post.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum PostState {
    /// Visible on the board; counts against the one-per-actor limit.
    Active,
    /// Removed from the board, kept for analytics. Terminal.
    Retired,
}

/// One outstanding request on the board.
///
/// At most one `Active` post exists per (venue, actor); the post store
/// enforces this at insert time. After retirement the only permitted reads
/// are analytics; no field is mutated again.
///
/// # Examples
///
/// ```
/// use squadboard_core::{ActorId, ChannelId, OriginKind, Post, PostId, PostState, VenueId};
/// use chrono::Utc;
///
/// let post = Post::new(
///     PostId::generate(),
///     VenueId(1),
///     ChannelId(2),
///     ActorId(3),
///     "Valorant".to_string(),
///     "lfg valorant ranked".to_string(),
///     None,
///     OriginKind::Interactive,
///     Utc::now(),
///     None,
/// );
/// assert_eq!(*post.state(), PostState::Active);
/// assert!(post.delivery().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Post {
    /// Opaque identifier assigned at creation.
    id: PostId,
    /// Venue the post belongs to.
    venue_id: VenueId,
    /// Channel the triggering command/message was seen in.
    origin_channel_id: ChannelId,
    /// Actor who created the post.
    actor_id: ActorId,
    /// Classified category label.
    category: String,
    /// Free-text request body, bounded by [`MAX_BODY_LEN`].
    body: String,
    /// Optional venue sub-location (e.g. a voice room), attached at creation
    /// and immutable thereafter.
    context_channel: Option<ChannelId>,
    /// Whether the post came from a command or from ambient detection.
    origin: OriginKind,
    /// External delivery reference; `None` until delivery completes, then
    /// set exactly once.
    delivery: Option<DeliveryRef>,
    /// Lifecycle state.
    state: PostState,
    /// Creation instant.
    created_at: DateTime<Utc>,
    /// Expiry instant, computed once at creation. `None` means never.
    expires_at: Option<DateTime<Utc>>,
    /// Number of edits applied. Analytics only.
    edit_count: u32,
    /// Number of recorded views. Analytics only.
    view_count: u64,
}

impl Post {
    /// Construct a new active post with no delivery reference yet.
    ///
    /// The body is trimmed and truncated to [`MAX_BODY_LEN`] characters.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: PostId,
        venue_id: VenueId,
        origin_channel_id: ChannelId,
        actor_id: ActorId,
        category: String,
        body: String,
        context_channel: Option<ChannelId>,
        origin: OriginKind,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            venue_id,
            origin_channel_id,
            actor_id,
            category,
            body: bound_body(&body),
            context_channel,
            origin,
            delivery: None,
            state: PostState::Active,
            created_at,
            expires_at,
            edit_count: 0,
            view_count: 0,
        }
    }

    /// Whether the post is still on the board.
    pub fn is_active(&self) -> bool {
        self.state == PostState::Active
    }

    /// Whether the post has outlived its expiry instant.
    ///
    /// Posts without an expiry never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Move the post to the `Retired` state. Idempotent.
    ///
    /// Mutation is reserved to the post store; callers go through the
    /// coordinator's deletion paths.
    pub fn retire(&mut self) {
        self.state = PostState::Retired;
    }

    /// Attach the external delivery reference.
    ///
    /// The store guarantees this happens at most once and only while the
    /// post is active.
    pub fn attach_delivery(&mut self, delivery: DeliveryRef) {
        self.delivery = Some(delivery);
    }

    /// Replace the body (and optionally the category) and bump the edit
    /// counter.
    pub fn apply_edit(&mut self, body: String, category: Option<String>) {
        self.body = bound_body(&body);
        if let Some(category) = category {
            self.category = category;
        }
        self.edit_count += 1;
    }

    /// Bump the view counter.
    pub fn record_view(&mut self) {
        self.view_count += 1;
    }
}

/// Trim and truncate free text to the body bound, respecting char boundaries.
fn bound_body(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.char_indices().nth(MAX_BODY_LEN) {
        Some((idx, _)) => trimmed[..idx].to_string(),
        None => trimmed.to_string(),
    }
}
