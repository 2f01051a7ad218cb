//! Cooldown records and status.

use crate::{ActorId, VenueId};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use std::time::Duration;

/// How long a ledger record is retained after its post, independent of the
/// cooldown duration itself (which may be much shorter). Bounds ledger
/// growth.
pub const COOLDOWN_RECORD_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Per-(actor, venue) record of the last successful post.
///
/// The cooldown duration is captured at write time; a later policy change
/// never retroactively shortens or lengthens an in-flight cooldown.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct CooldownRecord {
    /// Actor the record belongs to.
    actor_id: ActorId,
    /// Venue the record belongs to.
    venue_id: VenueId,
    /// Instant of the last successful post.
    last_post_at: DateTime<Utc>,
    /// Cooldown duration in effect when the record was written.
    cooldown: Duration,
}

impl CooldownRecord {
    /// Whether the record has outlived its 24h retention window.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        elapsed_since(self.last_post_at, now) >= COOLDOWN_RECORD_TTL
    }

    /// Time left on the captured cooldown, if any.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.cooldown
            .checked_sub(elapsed_since(self.last_post_at, now))
            .filter(|left| !left.is_zero())
    }
}

/// Outcome of a cooldown check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownStatus {
    /// The actor may post.
    Ready,
    /// The actor must wait out the remaining duration.
    OnCooldown {
        /// Time left until the cooldown lapses.
        remaining: Duration,
    },
}

impl CooldownStatus {
    /// Whether the actor may post.
    pub fn is_ready(&self) -> bool {
        matches!(self, CooldownStatus::Ready)
    }
}

/// Wall-clock elapsed time, clamped to zero when `now` precedes `since`.
fn elapsed_since(since: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    now.signed_duration_since(since).to_std().unwrap_or_default()
}
