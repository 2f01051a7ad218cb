//! The eligibility gate: may this creation attempt proceed?

use squadboard_core::{ActorId, ChannelId, Clock, CooldownStatus, OriginKind, VenuePolicy};
use squadboard_error::SquadboardResult;
use squadboard_interface::Membership;
use squadboard_storage::{CooldownLedger, PostStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Why a creation attempt was rejected.
///
/// These are expected, user-facing outcomes, never logged as failures. The
/// `Display` text is the message shown to the actor.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EligibilityError {
    /// The channel is not on the venue's allow-list.
    #[display("requests cannot be posted in this channel")]
    ChannelNotAllowed,
    /// The actor lacks the venue's required role.
    #[display("you need the required role to post a request here")]
    MissingRole,
    /// The actor posted too recently.
    #[display("you are on cooldown; try again in {}s", remaining.as_secs().max(1))]
    OnCooldown {
        /// Time left until the cooldown lapses.
        remaining: Duration,
    },
    /// The actor already has an active post in this venue.
    #[display("you already have an active request; delete it first")]
    ActivePostExists,
    /// The venue does not accept posts from this trigger path.
    #[display("this kind of request is disabled in this venue")]
    FeatureDisabled,
}

/// Composes policy, cooldown ledger, and post store into one ordered
/// decision.
///
/// Checks run in a fixed order — trigger mode, ambient monitoring,
/// allow-list, required role, cooldown, active post — and the first
/// failure short-circuits. The
/// active-post check here is advisory (it produces the friendly rejection
/// early); the authoritative guard for the one-active-post invariant is the
/// post store's atomic `insert_active`.
pub struct EligibilityGate {
    posts: Arc<dyn PostStore>,
    cooldowns: Arc<dyn CooldownLedger>,
    membership: Arc<dyn Membership>,
    clock: Arc<dyn Clock>,
}

impl EligibilityGate {
    /// Create a gate over the given stores and collaborators.
    pub fn new(
        posts: Arc<dyn PostStore>,
        cooldowns: Arc<dyn CooldownLedger>,
        membership: Arc<dyn Membership>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts,
            cooldowns,
            membership,
            clock,
        }
    }

    /// Check whether the actor may create a post in the channel.
    ///
    /// The outer `Result` carries fatal storage/collaborator failures; the
    /// inner one carries the structured rejection reason. Callers map each
    /// reason to a user-facing message.
    #[instrument(
        skip(self, policy),
        fields(venue = %policy.venue_id(), actor = %actor, channel = %channel, origin = %origin)
    )]
    pub async fn check(
        &self,
        policy: &VenuePolicy,
        actor: ActorId,
        channel: ChannelId,
        origin: OriginKind,
    ) -> SquadboardResult<Result<(), EligibilityError>> {
        if !policy.trigger_mode().permits(origin) {
            debug!("trigger path disabled for venue");
            return Ok(Err(EligibilityError::FeatureDisabled));
        }

        // An empty monitored list means the ambient path scans everywhere.
        if origin == OriginKind::Ambient
            && !policy.monitored_channels().is_empty()
            && !policy.monitors(channel)
        {
            debug!("channel not scanned by the ambient path");
            return Ok(Err(EligibilityError::ChannelNotAllowed));
        }

        if !policy.channel_allowed(channel) {
            debug!("channel not on allow-list");
            return Ok(Err(EligibilityError::ChannelNotAllowed));
        }

        if let Some(role) = policy.required_role()
            && !self
                .membership
                .actor_has_role(*policy.venue_id(), actor, *role)
                .await?
        {
            debug!(role = %role, "actor lacks required role");
            return Ok(Err(EligibilityError::MissingRole));
        }

        if *policy.cooldown().enabled()
            && let CooldownStatus::OnCooldown { remaining } = self
                .cooldowns
                .check(actor, *policy.venue_id(), self.clock.now())
                .await?
        {
            debug!(remaining_secs = remaining.as_secs(), "actor on cooldown");
            return Ok(Err(EligibilityError::OnCooldown { remaining }));
        }

        if self
            .posts
            .find_active(*policy.venue_id(), actor)
            .await?
            .is_some()
        {
            debug!("actor already has an active post");
            return Ok(Err(EligibilityError::ActivePostExists));
        }

        Ok(Ok(()))
    }
}
