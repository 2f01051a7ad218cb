//! Post records: lifecycle storage and the one-active-post constraint.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use squadboard_core::{ActorId, DeliveryRef, Post, PostId, VenueId};
use squadboard_error::{SquadboardError, SquadboardResult, StorageError, StorageErrorKind};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Error from [`PostStore::insert_active`], distinguishing the uniqueness
/// conflict (an expected outcome the caller maps to a user-facing
/// rejection) from backend failure.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum InsertActiveError {
    /// An active post already exists for this (venue, actor).
    #[display("an active post already exists for this actor in this venue")]
    Conflict,
    /// The backend failed.
    #[display("{}", _0)]
    Storage(SquadboardError),
}

/// Storage for post records.
///
/// `insert_active` is the authoritative guard for the one-active-post
/// invariant: implementations must reject a second active post for the same
/// (venue, actor) atomically with the insert — a plain find-then-insert is
/// not acceptable.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a freshly constructed active post.
    ///
    /// Returns [`InsertActiveError::Conflict`] when an active post already
    /// exists for the post's (venue, actor).
    async fn insert_active(&self, post: Post) -> Result<Post, InsertActiveError>;

    /// Fetch a post by id.
    async fn get(&self, id: PostId) -> SquadboardResult<Option<Post>>;

    /// The active post for an actor in a venue, if any.
    async fn find_active(&self, venue: VenueId, actor: ActorId)
        -> SquadboardResult<Option<Post>>;

    /// Look up a post by its delivery reference.
    async fn find_by_delivery(&self, delivery: &DeliveryRef) -> SquadboardResult<Option<Post>>;

    /// All active posts in a venue.
    async fn active_in_venue(&self, venue: VenueId) -> SquadboardResult<Vec<Post>>;

    /// All active posts whose expiry instant has passed.
    async fn expired(&self, now: DateTime<Utc>) -> SquadboardResult<Vec<Post>>;

    /// Attach the delivery reference to a post.
    ///
    /// Permitted exactly once, and only while the post is active.
    async fn attach_delivery(&self, id: PostId, delivery: DeliveryRef) -> SquadboardResult<Post>;

    /// Replace a post's body (and optionally category), bumping its edit
    /// counter. Rejected for retired posts.
    async fn apply_edit(
        &self,
        id: PostId,
        body: String,
        category: Option<String>,
    ) -> SquadboardResult<Post>;

    /// Bump a post's view counter. Rejected for retired posts; no field
    /// mutates after retirement.
    async fn record_view(&self, id: PostId) -> SquadboardResult<()>;

    /// Move a post to the retired state, freeing its (venue, actor) slot.
    ///
    /// Idempotent: retiring an already retired post is a no-op. Returns the
    /// post after the transition, or `None` if it does not exist.
    async fn retire(&self, id: PostId) -> SquadboardResult<Option<Post>>;
}

#[derive(Debug, Default)]
struct Inner {
    posts: HashMap<PostId, Post>,
    /// Index of active posts by (venue, actor); the uniqueness constraint.
    active: HashMap<(VenueId, ActorId), PostId>,
}

/// In-memory post store.
///
/// The post map and the active index live under one `RwLock`, so the
/// conflict check and the insert in `insert_active` form a single critical
/// section.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    inner: RwLock<Inner>,
}

impl MemoryPostStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn insert_active(&self, post: Post) -> Result<Post, InsertActiveError> {
        let key = (*post.venue_id(), *post.actor_id());
        let mut inner = self.inner.write().await;
        if inner.active.contains_key(&key) {
            debug!(venue = %key.0, actor = %key.1, "active post slot already taken");
            return Err(InsertActiveError::Conflict);
        }
        inner.active.insert(key, *post.id());
        inner.posts.insert(*post.id(), post.clone());
        Ok(post)
    }

    async fn get(&self, id: PostId) -> SquadboardResult<Option<Post>> {
        let inner = self.inner.read().await;
        Ok(inner.posts.get(&id).cloned())
    }

    async fn find_active(
        &self,
        venue: VenueId,
        actor: ActorId,
    ) -> SquadboardResult<Option<Post>> {
        let inner = self.inner.read().await;
        Ok(inner
            .active
            .get(&(venue, actor))
            .and_then(|id| inner.posts.get(id))
            .cloned())
    }

    async fn find_by_delivery(&self, delivery: &DeliveryRef) -> SquadboardResult<Option<Post>> {
        let inner = self.inner.read().await;
        Ok(inner
            .posts
            .values()
            .find(|post| post.delivery().as_ref() == Some(delivery))
            .cloned())
    }

    async fn active_in_venue(&self, venue: VenueId) -> SquadboardResult<Vec<Post>> {
        let inner = self.inner.read().await;
        Ok(inner
            .posts
            .values()
            .filter(|post| post.is_active() && *post.venue_id() == venue)
            .cloned()
            .collect())
    }

    async fn expired(&self, now: DateTime<Utc>) -> SquadboardResult<Vec<Post>> {
        let inner = self.inner.read().await;
        Ok(inner
            .posts
            .values()
            .filter(|post| post.is_active() && post.is_expired(now))
            .cloned()
            .collect())
    }

    async fn attach_delivery(&self, id: PostId, delivery: DeliveryRef) -> SquadboardResult<Post> {
        let mut inner = self.inner.write().await;
        let post = inner.posts.get_mut(&id).ok_or_else(|| {
            StorageError::new(StorageErrorKind::NotFound(format!("post {id}")))
        })?;
        if !post.is_active() {
            return Err(StorageError::new(StorageErrorKind::InvalidTransition(
                format!("post {id} is retired; delivery can no longer be attached"),
            ))
            .into());
        }
        if post.delivery().is_some() {
            return Err(StorageError::new(StorageErrorKind::InvalidTransition(
                format!("post {id} already has a delivery reference"),
            ))
            .into());
        }
        post.attach_delivery(delivery);
        Ok(post.clone())
    }

    async fn apply_edit(
        &self,
        id: PostId,
        body: String,
        category: Option<String>,
    ) -> SquadboardResult<Post> {
        let mut inner = self.inner.write().await;
        let post = inner.posts.get_mut(&id).ok_or_else(|| {
            StorageError::new(StorageErrorKind::NotFound(format!("post {id}")))
        })?;
        if !post.is_active() {
            return Err(StorageError::new(StorageErrorKind::InvalidTransition(
                format!("post {id} is retired and cannot be edited"),
            ))
            .into());
        }
        post.apply_edit(body, category);
        Ok(post.clone())
    }

    async fn record_view(&self, id: PostId) -> SquadboardResult<()> {
        let mut inner = self.inner.write().await;
        let post = inner.posts.get_mut(&id).ok_or_else(|| {
            StorageError::new(StorageErrorKind::NotFound(format!("post {id}")))
        })?;
        if !post.is_active() {
            return Err(StorageError::new(StorageErrorKind::InvalidTransition(
                format!("post {id} is retired; views are no longer recorded"),
            ))
            .into());
        }
        post.record_view();
        Ok(())
    }

    async fn retire(&self, id: PostId) -> SquadboardResult<Option<Post>> {
        let mut inner = self.inner.write().await;
        let Some(mut post) = inner.posts.get(&id).cloned() else {
            return Ok(None);
        };
        if post.is_active() {
            post.retire();
            let key = (*post.venue_id(), *post.actor_id());
            inner.active.remove(&key);
            inner.posts.insert(id, post.clone());
            debug!(post_id = %id, "post retired");
        }
        Ok(Some(post))
    }
}
