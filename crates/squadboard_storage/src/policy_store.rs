//! The policy store: per-venue configuration, lazily defaulted.

use async_trait::async_trait;
use squadboard_core::{ChannelId, VenueId, VenuePolicy};
use squadboard_error::SquadboardResult;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Storage for venue policies.
///
/// Policies are read-mostly: the coordinator only reads them, always
/// fetch-fresh; administrative operations (outside this core) write through
/// `put`. Policies are never deleted during normal operation.
#[async_trait]
pub trait PolicyStore: Send + Sync {
    /// The venue's policy, creating and persisting the defaults on first
    /// access.
    async fn get_or_default(&self, venue: VenueId) -> SquadboardResult<VenuePolicy>;

    /// Replace the venue's policy. Used by the administrative surface.
    async fn put(&self, policy: VenuePolicy) -> SquadboardResult<()>;

    /// The default category for a channel, from the venue's allow-list.
    async fn resolve_default_category(
        &self,
        venue: VenueId,
        channel: ChannelId,
    ) -> SquadboardResult<Option<String>> {
        let policy = self.get_or_default(venue).await?;
        Ok(policy.default_category_for(channel).map(str::to_string))
    }
}

/// In-memory policy store.
#[derive(Debug, Default)]
pub struct MemoryPolicyStore {
    policies: RwLock<HashMap<VenueId, VenuePolicy>>,
}

impl MemoryPolicyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PolicyStore for MemoryPolicyStore {
    async fn get_or_default(&self, venue: VenueId) -> SquadboardResult<VenuePolicy> {
        {
            let policies = self.policies.read().await;
            if let Some(policy) = policies.get(&venue) {
                return Ok(policy.clone());
            }
        }
        let mut policies = self.policies.write().await;
        // Re-check under the write lock; another task may have defaulted it.
        let policy = policies
            .entry(venue)
            .or_insert_with(|| {
                debug!(%venue, "creating default venue policy");
                VenuePolicy::defaults(venue)
            })
            .clone();
        Ok(policy)
    }

    async fn put(&self, policy: VenuePolicy) -> SquadboardResult<()> {
        let mut policies = self.policies.write().await;
        policies.insert(*policy.venue_id(), policy);
        Ok(())
    }
}
