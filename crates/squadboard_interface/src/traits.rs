//! Collaborator trait definitions.

use crate::AuditEvent;
use async_trait::async_trait;
use squadboard_core::{ActorId, DeliveryRef, Post, RoleId, VenueId};
use squadboard_error::{DeliveryError, SquadboardResult};

/// Renders posts to their visible destination and removes them again.
///
/// The coordinator bounds every call with a timeout; implementations do not
/// need their own deadline handling. A render failure during creation makes
/// the coordinator retire the just-created post (compensation), so `render`
/// must not leave partial output behind on error.
///
/// Out-of-band removals (someone deletes the rendered message directly) are
/// reported by the gateway adapter calling
/// `Coordinator::handle_external_deletion` with the vanished reference.
#[async_trait]
pub trait Delivery: Send + Sync {
    /// Render and send the post, returning the external reference.
    async fn render(&self, post: &Post) -> Result<DeliveryRef, DeliveryError>;

    /// Remove the rendered post. Best-effort; callers log and swallow
    /// failures.
    async fn remove(&self, delivery: &DeliveryRef) -> Result<(), DeliveryError>;
}

/// Role membership queries and best-effort role assignment.
#[async_trait]
pub trait Membership: Send + Sync {
    /// Whether the actor holds the role in the venue.
    ///
    /// Failures here are fatal to the calling eligibility check.
    async fn actor_has_role(
        &self,
        venue: VenueId,
        actor: ActorId,
        role: RoleId,
    ) -> SquadboardResult<bool>;

    /// Grant the role to the actor. Best-effort; callers log and swallow
    /// failures.
    async fn assign_role(
        &self,
        venue: VenueId,
        actor: ActorId,
        role: RoleId,
    ) -> SquadboardResult<()>;
}

/// Receives audit notifications. Best-effort; never blocks the caller's
/// success path.
#[async_trait]
pub trait AuditNotifier: Send + Sync {
    /// Deliver one audit event for the venue.
    async fn notify(&self, venue: VenueId, event: AuditEvent) -> SquadboardResult<()>;
}
