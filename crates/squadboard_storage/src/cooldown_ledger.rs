//! The cooldown ledger: per-(actor, venue) last-post timestamps.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use squadboard_core::{ActorId, CooldownRecord, CooldownStatus, VenueId};
use squadboard_error::SquadboardResult;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Ledger of last successful posts, used for creation rate limiting.
///
/// Writes are last-writer-wins: only successful creations write a record
/// for a given key, strictly after their own insert, so there is no
/// read-modify-write race. Records self-expire 24h after their timestamp
/// regardless of the cooldown duration they carry.
#[async_trait]
pub trait CooldownLedger: Send + Sync {
    /// Check the actor's cooldown from the recorded duration.
    ///
    /// Uses the duration captured when the record was written, never the
    /// current policy value. Callers short-circuit to ready when the
    /// venue's cooldown is disabled; this method only consults the ledger.
    async fn check(
        &self,
        actor: ActorId,
        venue: VenueId,
        now: DateTime<Utc>,
    ) -> SquadboardResult<CooldownStatus>;

    /// Upsert the record for a successful post at `now`, capturing the
    /// venue's current cooldown duration.
    async fn record(
        &self,
        actor: ActorId,
        venue: VenueId,
        cooldown: Duration,
        now: DateTime<Utc>,
    ) -> SquadboardResult<()>;

    /// Drop records past their 24h retention window. Returns the number
    /// removed.
    async fn purge_stale(&self, now: DateTime<Utc>) -> SquadboardResult<usize>;
}

/// In-memory cooldown ledger.
///
/// Stale records are dropped lazily when `check` encounters them and in
/// bulk by `purge_stale` during sweeper passes.
#[derive(Debug, Default)]
pub struct MemoryCooldownLedger {
    records: RwLock<HashMap<(ActorId, VenueId), CooldownRecord>>,
}

impl MemoryCooldownLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CooldownLedger for MemoryCooldownLedger {
    async fn check(
        &self,
        actor: ActorId,
        venue: VenueId,
        now: DateTime<Utc>,
    ) -> SquadboardResult<CooldownStatus> {
        let mut records = self.records.write().await;
        let key = (actor, venue);
        let Some(record) = records.get(&key) else {
            return Ok(CooldownStatus::Ready);
        };
        if record.is_stale(now) {
            records.remove(&key);
            return Ok(CooldownStatus::Ready);
        }
        Ok(match record.remaining(now) {
            Some(remaining) => CooldownStatus::OnCooldown { remaining },
            None => CooldownStatus::Ready,
        })
    }

    async fn record(
        &self,
        actor: ActorId,
        venue: VenueId,
        cooldown: Duration,
        now: DateTime<Utc>,
    ) -> SquadboardResult<()> {
        let mut records = self.records.write().await;
        records.insert(
            (actor, venue),
            CooldownRecord::new(actor, venue, now, cooldown),
        );
        Ok(())
    }

    async fn purge_stale(&self, now: DateTime<Utc>) -> SquadboardResult<usize> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_stale(now));
        let removed = before - records.len();
        if removed > 0 {
            debug!(removed, remaining = records.len(), "purged stale cooldown records");
        }
        Ok(removed)
    }
}
