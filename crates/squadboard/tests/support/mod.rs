//! Shared test doubles and harness for coordinator tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use squadboard::{Coordinator, CoordinatorConfig};
use squadboard_core::{ActorId, DeliveryRef, ManualClock, Post, RoleId, VenueId};
use squadboard_error::{DeliveryError, DeliveryErrorKind, SquadboardResult};
use squadboard_interface::{AuditEvent, AuditNotifier, Delivery, Membership};
use squadboard_storage::{MemoryCooldownLedger, MemoryPolicyStore, MemoryPostStore, PostStore};
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Delivery double: hands out sequential references, optionally failing or
/// stalling. Delays are in milliseconds of tokio time, so tests pair them
/// with a paused runtime instead of real sleeps.
pub struct MockDelivery {
    next_ref: AtomicU64,
    fail_render: AtomicBool,
    fail_remove: AtomicBool,
    render_delay_ms: AtomicU64,
    remove_delay_ms: AtomicU64,
    removed: Mutex<Vec<DeliveryRef>>,
}

impl MockDelivery {
    pub fn new() -> Self {
        Self {
            next_ref: AtomicU64::new(100),
            fail_render: AtomicBool::new(false),
            fail_remove: AtomicBool::new(false),
            render_delay_ms: AtomicU64::new(0),
            remove_delay_ms: AtomicU64::new(0),
            removed: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_render(&self, fail: bool) {
        self.fail_render.store(fail, Ordering::SeqCst);
    }

    pub fn fail_remove(&self, fail: bool) {
        self.fail_remove.store(fail, Ordering::SeqCst);
    }

    pub fn delay_render(&self, delay: Duration) {
        self.render_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn delay_remove(&self, delay: Duration) {
        self.remove_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn removed(&self) -> Vec<DeliveryRef> {
        self.removed.lock().expect("removed lock").clone()
    }

    async fn stall(delay_ms: u64) {
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }
}

#[async_trait]
impl Delivery for MockDelivery {
    async fn render(&self, _post: &Post) -> Result<DeliveryRef, DeliveryError> {
        Self::stall(self.render_delay_ms.load(Ordering::SeqCst)).await;
        if self.fail_render.load(Ordering::SeqCst) {
            return Err(DeliveryError::new(DeliveryErrorKind::RenderFailed(
                "mock render failure".to_string(),
            )));
        }
        let n = self.next_ref.fetch_add(1, Ordering::SeqCst);
        Ok(DeliveryRef::new(format!("msg-{n}")))
    }

    async fn remove(&self, delivery: &DeliveryRef) -> Result<(), DeliveryError> {
        Self::stall(self.remove_delay_ms.load(Ordering::SeqCst)).await;
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(DeliveryError::new(DeliveryErrorKind::RemoveFailed(
                "mock remove failure".to_string(),
            )));
        }
        self.removed
            .lock()
            .expect("removed lock")
            .push(delivery.clone());
        Ok(())
    }
}

/// Membership double backed by an explicit grant set.
pub struct MockMembership {
    grants: Mutex<HashSet<(VenueId, ActorId, RoleId)>>,
    assigned: Mutex<Vec<(VenueId, ActorId, RoleId)>>,
}

impl MockMembership {
    pub fn new() -> Self {
        Self {
            grants: Mutex::new(HashSet::new()),
            assigned: Mutex::new(Vec::new()),
        }
    }

    pub fn grant(&self, venue: VenueId, actor: ActorId, role: RoleId) {
        self.grants
            .lock()
            .expect("grants lock")
            .insert((venue, actor, role));
    }

    pub fn assigned(&self) -> Vec<(VenueId, ActorId, RoleId)> {
        self.assigned.lock().expect("assigned lock").clone()
    }
}

#[async_trait]
impl Membership for MockMembership {
    async fn actor_has_role(
        &self,
        venue: VenueId,
        actor: ActorId,
        role: RoleId,
    ) -> SquadboardResult<bool> {
        Ok(self
            .grants
            .lock()
            .expect("grants lock")
            .contains(&(venue, actor, role)))
    }

    async fn assign_role(
        &self,
        venue: VenueId,
        actor: ActorId,
        role: RoleId,
    ) -> SquadboardResult<()> {
        self.assigned
            .lock()
            .expect("assigned lock")
            .push((venue, actor, role));
        Ok(())
    }
}

/// Audit double that records every event it receives.
pub struct RecordingAudit {
    events: Mutex<Vec<(VenueId, AuditEvent)>>,
}

impl RecordingAudit {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<(VenueId, AuditEvent)> {
        self.events.lock().expect("events lock").clone()
    }
}

#[async_trait]
impl AuditNotifier for RecordingAudit {
    async fn notify(&self, venue: VenueId, event: AuditEvent) -> SquadboardResult<()> {
        self.events.lock().expect("events lock").push((venue, event));
        Ok(())
    }
}

/// A fully wired coordinator over in-memory stores and test doubles.
pub struct Harness {
    pub coordinator: Arc<Coordinator>,
    pub policies: Arc<MemoryPolicyStore>,
    pub posts: Arc<MemoryPostStore>,
    pub delivery: Arc<MockDelivery>,
    pub membership: Arc<MockMembership>,
    pub audit: Arc<RecordingAudit>,
    pub clock: Arc<ManualClock>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(CoordinatorConfig::default())
    }

    pub fn with_config(config: CoordinatorConfig) -> Self {
        let policies = Arc::new(MemoryPolicyStore::new());
        let posts = Arc::new(MemoryPostStore::new());
        let cooldowns = Arc::new(MemoryCooldownLedger::new());
        let delivery = Arc::new(MockDelivery::new());
        let membership = Arc::new(MockMembership::new());
        let audit = Arc::new(RecordingAudit::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));

        let coordinator = Arc::new(Coordinator::new(
            policies.clone(),
            posts.clone() as Arc<dyn PostStore>,
            cooldowns,
            delivery.clone(),
            membership.clone(),
            audit.clone(),
            clock.clone(),
            config,
        ));

        Self {
            coordinator,
            policies,
            posts,
            delivery,
            membership,
            audit,
            clock,
        }
    }
}
