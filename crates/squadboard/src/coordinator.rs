//! The lifecycle manager: create, edit, delete, reconcile, sweep.

use crate::{CoordinatorConfig, EligibilityError, EligibilityGate};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use squadboard_core::{
    ActorId, ChannelId, Clock, DeliveryRef, OriginKind, Post, PostId, VenueId, classify,
};
use squadboard_error::{
    DeliveryError, DeliveryErrorKind, SquadboardError, SquadboardResult,
};
use squadboard_interface::{AuditEvent, AuditNotifier, Delivery, Membership};
use squadboard_storage::{CooldownLedger, InsertActiveError, PolicyStore, PostStore};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, error, info, instrument, warn};

/// Why a creation attempt failed.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CreateError {
    /// The attempt was rejected by policy checks. Expected and user-facing.
    #[display("{}", _0)]
    Ineligible(EligibilityError),
    /// External delivery failed; the post was retired as compensation.
    #[display("{}", _0)]
    Delivery(DeliveryError),
    /// A store or collaborator failed.
    #[display("{}", _0)]
    Internal(SquadboardError),
}

/// Why a deletion attempt failed.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum DeleteError {
    /// No such post (or it is already retired).
    #[display("that request no longer exists")]
    NotFound,
    /// The post belongs to a different venue than the request came from.
    #[display("that request belongs to a different venue")]
    WrongVenue,
    /// The requester is neither the post's actor nor privileged, or
    /// deletion is disabled for the venue.
    #[display("you may not delete this request")]
    Forbidden,
    /// A store failed.
    #[display("{}", _0)]
    Internal(SquadboardError),
}

/// Why an edit attempt failed.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum EditError {
    /// No such post (or it is already retired).
    #[display("that request no longer exists")]
    NotFound,
    /// Only the post's actor may edit it.
    #[display("you may not edit this request")]
    Forbidden,
    /// The venue has editing disabled.
    #[display("editing requests is disabled in this venue")]
    FeatureDisabled,
    /// A store failed.
    #[display("{}", _0)]
    Internal(SquadboardError),
}

impl CreateError {
    /// The message shown to the actor. Internal failures map to a generic
    /// retry prompt without exposing detail.
    pub fn user_message(&self) -> String {
        match self {
            CreateError::Ineligible(reason) => reason.to_string(),
            CreateError::Delivery(_) => "your request could not be posted; try again".to_string(),
            CreateError::Internal(_) => "something went wrong; try again".to_string(),
        }
    }
}

/// Expiry instant for a post created at `now`, saturating at the calendar
/// bound for admin-configured lifetimes past what chrono can represent.
fn expiry_deadline(now: DateTime<Utc>, lifetime: std::time::Duration) -> DateTime<Utc> {
    i64::try_from(lifetime.as_secs())
        .ok()
        .and_then(ChronoDuration::try_seconds)
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// How a retirement came about; decides the audit event and attribution.
enum Retirement {
    Deleted { by: ActorId },
    Expired,
    Reconciled,
}

/// Orchestrates the post lifecycle.
///
/// Both trigger paths (explicit command and ambient text detection) funnel
/// into [`Coordinator::create_post`], parameterized by [`OriginKind`], so
/// eligibility, classification, and creation logic exist exactly once.
///
/// The coordinator owns all post and cooldown mutation; stores release
/// their locks before any collaborator call, and every collaborator call is
/// bounded by a configured timeout.
pub struct Coordinator {
    policies: Arc<dyn PolicyStore>,
    posts: Arc<dyn PostStore>,
    cooldowns: Arc<dyn CooldownLedger>,
    delivery: Arc<dyn Delivery>,
    audit: Arc<dyn AuditNotifier>,
    membership: Arc<dyn Membership>,
    clock: Arc<dyn Clock>,
    config: CoordinatorConfig,
    gate: EligibilityGate,
}

impl Coordinator {
    /// Wire up a coordinator over its stores and collaborators.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        policies: Arc<dyn PolicyStore>,
        posts: Arc<dyn PostStore>,
        cooldowns: Arc<dyn CooldownLedger>,
        delivery: Arc<dyn Delivery>,
        membership: Arc<dyn Membership>,
        audit: Arc<dyn AuditNotifier>,
        clock: Arc<dyn Clock>,
        config: CoordinatorConfig,
    ) -> Self {
        let gate = EligibilityGate::new(
            posts.clone(),
            cooldowns.clone(),
            membership.clone(),
            clock.clone(),
        );
        Self {
            policies,
            posts,
            cooldowns,
            delivery,
            audit,
            membership,
            clock,
            config,
            gate,
        }
    }

    /// Create a post from either trigger path.
    ///
    /// Runs the eligibility gate, classifies the text, inserts the post
    /// (the store enforces the one-active-post constraint atomically),
    /// requests delivery, records the cooldown, and fires best-effort side
    /// effects. A delivery failure or timeout retires the just-created post
    /// before surfacing the error, so no post is ever left active without a
    /// visible delivery.
    #[instrument(
        skip(self, raw_text),
        fields(venue = %venue, actor = %actor, channel = %origin_channel, origin = %origin)
    )]
    pub async fn create_post(
        &self,
        actor: ActorId,
        venue: VenueId,
        origin_channel: ChannelId,
        raw_text: &str,
        origin: OriginKind,
        context_channel: Option<ChannelId>,
    ) -> Result<Post, CreateError> {
        let policy = self.policies.get_or_default(venue).await?;

        if let Err(reason) = self.gate.check(&policy, actor, origin_channel, origin).await? {
            debug!(%reason, "creation rejected");
            return Err(CreateError::Ineligible(reason));
        }

        // The category is advisory and never blocks creation; the
        // classifier always produces a fallback.
        let classification = classify(
            raw_text,
            policy.default_category_for(origin_channel),
            policy.category_presets(),
        );

        let now = self.clock.now();
        let expires_at = (*policy.expiration().enabled())
            .then(|| expiry_deadline(now, policy.expiration().duration()));

        let post = Post::new(
            PostId::generate(),
            venue,
            origin_channel,
            actor,
            classification.category().clone(),
            classification.body().clone(),
            context_channel,
            origin,
            now,
            expires_at,
        );

        let post = self.posts.insert_active(post).await.map_err(|e| match e {
            // A concurrent create won the slot between the gate's advisory
            // check and our insert; report it like any other duplicate.
            InsertActiveError::Conflict => {
                CreateError::Ineligible(EligibilityError::ActivePostExists)
            }
            InsertActiveError::Storage(e) => CreateError::Internal(e),
        })?;

        let delivery_ref = match timeout(
            self.config.delivery_timeout(),
            self.delivery.render(&post),
        )
        .await
        {
            Ok(Ok(delivery_ref)) => delivery_ref,
            Ok(Err(e)) => {
                self.compensate_failed_delivery(&post).await;
                return Err(CreateError::Delivery(e));
            }
            Err(_) => {
                self.compensate_failed_delivery(&post).await;
                return Err(CreateError::Delivery(DeliveryError::new(
                    DeliveryErrorKind::Timeout(self.config.delivery_timeout().as_secs()),
                )));
            }
        };

        let post = self.posts.attach_delivery(*post.id(), delivery_ref).await?;

        self.cooldowns
            .record(actor, venue, policy.cooldown().duration(), now)
            .await?;

        if *policy.auto_assign()
            && let Some(role) = policy.auto_assign_role()
        {
            match timeout(
                self.config.side_effect_timeout(),
                self.membership.assign_role(venue, actor, *role),
            )
            .await
            {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(role = %role, error = %e, "role auto-assign failed"),
                Err(_) => warn!(role = %role, "role auto-assign timed out"),
            }
        }

        self.notify_best_effort(
            venue,
            AuditEvent::PostCreated {
                post_id: *post.id(),
                actor_id: actor,
                category: post.category().clone(),
            },
        )
        .await;

        info!(post_id = %post.id(), category = %post.category(), "post created");
        Ok(post)
    }

    /// Replace a post's body, optionally re-classifying its category.
    ///
    /// Allowed only for the post's own actor and only when the venue has
    /// editing enabled. Never changes id, actor, venue, or creation time.
    #[instrument(skip(self, new_body), fields(requester = %requester, post_id = %post_id))]
    pub async fn edit_post(
        &self,
        requester: ActorId,
        post_id: PostId,
        new_body: &str,
        reclassify: bool,
    ) -> Result<Post, EditError> {
        let post = self
            .posts
            .get(post_id)
            .await?
            .filter(Post::is_active)
            .ok_or(EditError::NotFound)?;
        if *post.actor_id() != requester {
            return Err(EditError::Forbidden);
        }

        let policy = self.policies.get_or_default(*post.venue_id()).await?;
        if !*policy.features().allow_edit() {
            return Err(EditError::FeatureDisabled);
        }

        let category = reclassify.then(|| {
            classify(
                new_body,
                policy.default_category_for(*post.origin_channel_id()),
                policy.category_presets(),
            )
            .category()
            .clone()
        });

        let post = self
            .posts
            .apply_edit(post_id, new_body.to_string(), category)
            .await?;

        self.notify_best_effort(
            *post.venue_id(),
            AuditEvent::PostEdited {
                post_id,
                actor_id: requester,
            },
        )
        .await;

        info!(edit_count = *post.edit_count(), "post edited");
        Ok(post)
    }

    /// Delete a post on behalf of a requester.
    ///
    /// Non-privileged requesters may only delete their own posts, and only
    /// when the venue allows deletion. Privileged requesters bypass both
    /// checks.
    #[instrument(skip(self), fields(requester = %requester, post_id = %post_id, privileged))]
    pub async fn delete_post(
        &self,
        requester: ActorId,
        venue: VenueId,
        post_id: PostId,
        privileged: bool,
    ) -> Result<(), DeleteError> {
        let post = self
            .posts
            .get(post_id)
            .await?
            .filter(Post::is_active)
            .ok_or(DeleteError::NotFound)?;
        if *post.venue_id() != venue {
            return Err(DeleteError::WrongVenue);
        }
        if !privileged {
            if *post.actor_id() != requester {
                return Err(DeleteError::Forbidden);
            }
            let policy = self.policies.get_or_default(venue).await?;
            if !*policy.features().allow_delete() {
                return Err(DeleteError::Forbidden);
            }
        }

        self.retire_and_clean_up(&post, Retirement::Deleted { by: requester }, true)
            .await?;
        info!("post deleted");
        Ok(())
    }

    /// Reconcile a delivery that disappeared out-of-band.
    ///
    /// Invoked by the gateway adapter when a rendered post was removed
    /// directly (e.g. by a moderator). Idempotent: unknown references and
    /// already-retired posts are no-ops.
    #[instrument(skip(self), fields(delivery = %delivery_ref))]
    pub async fn handle_external_deletion(
        &self,
        delivery_ref: &DeliveryRef,
    ) -> SquadboardResult<()> {
        let Some(post) = self.posts.find_by_delivery(delivery_ref).await? else {
            debug!("no post for externally removed delivery");
            return Ok(());
        };
        if !post.is_active() {
            debug!(post_id = %post.id(), "post already retired");
            return Ok(());
        }
        // The delivery is already gone; retire and audit, but skip removal.
        self.retire_and_clean_up(&post, Retirement::Reconciled, false)
            .await?;
        info!(post_id = %post.id(), "post reconciled after external removal");
        Ok(())
    }

    /// One sweep pass: retire every active post past its expiry and purge
    /// stale cooldown records. Returns the number of posts retired.
    ///
    /// Each retirement is independent and bounded by the per-post timeout;
    /// one stuck post never stalls the rest of the batch.
    #[instrument(skip(self))]
    pub async fn sweep_once(&self) -> SquadboardResult<usize> {
        let now = self.clock.now();
        let expired = self.posts.expired(now).await?;

        let passes = expired.iter().map(|post| async move {
            match timeout(
                self.config.sweep_post_timeout(),
                self.retire_and_clean_up(post, Retirement::Expired, true),
            )
            .await
            {
                Ok(Ok(())) => true,
                Ok(Err(e)) => {
                    error!(post_id = %post.id(), error = %e, "failed to retire expired post");
                    false
                }
                Err(_) => {
                    warn!(post_id = %post.id(), "timed out retiring expired post");
                    false
                }
            }
        });
        let retired = futures::future::join_all(passes)
            .await
            .into_iter()
            .filter(|ok| *ok)
            .count();

        if let Err(e) = self.cooldowns.purge_stale(now).await {
            error!(error = %e, "failed to purge stale cooldown records");
        }

        if retired > 0 {
            info!(retired, "sweep pass retired expired posts");
        }
        Ok(retired)
    }

    /// The coordinator's runtime configuration.
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Bump a post's view counter. Analytics only, non-authoritative.
    pub async fn record_view(&self, post_id: PostId) -> SquadboardResult<()> {
        self.posts.record_view(post_id).await
    }

    /// The requester's active post in a venue, if any.
    pub async fn active_post_for(
        &self,
        venue: VenueId,
        actor: ActorId,
    ) -> SquadboardResult<Option<Post>> {
        self.posts.find_active(venue, actor).await
    }

    /// All active posts in a venue.
    pub async fn active_posts_in(&self, venue: VenueId) -> SquadboardResult<Vec<Post>> {
        self.posts.active_in_venue(venue).await
    }

    /// Shared retirement path for deletion, expiry, and reconciliation.
    ///
    /// Retires first so the actor's slot frees even when delivery removal
    /// is slow; removal and the audit notification are best-effort.
    async fn retire_and_clean_up(
        &self,
        post: &Post,
        retirement: Retirement,
        remove_delivery: bool,
    ) -> SquadboardResult<()> {
        self.posts.retire(*post.id()).await?;

        if remove_delivery
            && let Some(delivery_ref) = post.delivery()
        {
            match timeout(
                self.config.side_effect_timeout(),
                self.delivery.remove(delivery_ref),
            )
            .await
            {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    warn!(post_id = %post.id(), error = %e, "failed to remove delivery")
                }
                Err(_) => warn!(post_id = %post.id(), "delivery removal timed out"),
            }
        }

        let event = match retirement {
            Retirement::Deleted { by } => AuditEvent::PostDeleted {
                post_id: *post.id(),
                by,
            },
            Retirement::Expired => AuditEvent::PostExpired {
                post_id: *post.id(),
            },
            Retirement::Reconciled => AuditEvent::PostReconciled {
                post_id: *post.id(),
            },
        };
        self.notify_best_effort(*post.venue_id(), event).await;
        Ok(())
    }

    /// Retire a post whose delivery failed, so it is never left active
    /// without a visible delivery.
    async fn compensate_failed_delivery(&self, post: &Post) {
        if let Err(e) = self.posts.retire(*post.id()).await {
            error!(post_id = %post.id(), error = %e, "failed to retire post after delivery failure");
        }
    }

    /// Fire an audit notification without letting it block or fail the
    /// caller's success path.
    async fn notify_best_effort(&self, venue: VenueId, event: AuditEvent) {
        match timeout(
            self.config.side_effect_timeout(),
            self.audit.notify(venue, event),
        )
        .await
        {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "audit notification failed"),
            Err(_) => warn!("audit notification timed out"),
        }
    }
}
