//! Tests for the in-memory stores.

use chrono::{Duration as ChronoDuration, Utc};
use squadboard_core::{
    ActorId, ChannelId, CooldownStatus, DeliveryRef, OriginKind, Post, PostId, PostState, VenueId,
};
use squadboard_storage::{
    CooldownLedger, InsertActiveError, MemoryCooldownLedger, MemoryPolicyStore, MemoryPostStore,
    PolicyStore, PostStore,
};
use std::sync::Arc;
use std::time::Duration;

fn make_post(venue: u64, actor: u64) -> Post {
    Post::new(
        PostId::generate(),
        VenueId(venue),
        ChannelId(1),
        ActorId(actor),
        "Valorant".to_string(),
        "lfg ranked".to_string(),
        None,
        OriginKind::Interactive,
        Utc::now(),
        None,
    )
}

#[tokio::test]
async fn second_active_insert_for_same_actor_conflicts() {
    let store = MemoryPostStore::new();
    store
        .insert_active(make_post(1, 1))
        .await
        .expect("first insert");

    let err = store
        .insert_active(make_post(1, 1))
        .await
        .expect_err("second insert must conflict");
    assert!(matches!(err, InsertActiveError::Conflict));

    // A different actor or venue is unaffected.
    store.insert_active(make_post(1, 2)).await.expect("other actor");
    store.insert_active(make_post(2, 1)).await.expect("other venue");
}

#[tokio::test]
async fn concurrent_duplicate_inserts_admit_exactly_one() {
    let store = Arc::new(MemoryPostStore::new());
    let (a, b) = futures::future::join(
        store.insert_active(make_post(1, 1)),
        store.insert_active(make_post(1, 1)),
    )
    .await;

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1, "exactly one concurrent insert may win");

    let active = store
        .find_active(VenueId(1), ActorId(1))
        .await
        .expect("query")
        .expect("winner is active");
    assert_eq!(*active.state(), PostState::Active);
}

#[tokio::test]
async fn retiring_frees_the_actor_slot() {
    let store = MemoryPostStore::new();
    let post = store.insert_active(make_post(1, 1)).await.expect("insert");

    let retired = store
        .retire(*post.id())
        .await
        .expect("retire")
        .expect("post exists");
    assert_eq!(*retired.state(), PostState::Retired);

    assert!(
        store
            .find_active(VenueId(1), ActorId(1))
            .await
            .expect("query")
            .is_none()
    );
    store
        .insert_active(make_post(1, 1))
        .await
        .expect("slot is free again");
}

#[tokio::test]
async fn retire_is_idempotent_and_tolerates_missing_posts() {
    let store = MemoryPostStore::new();
    let post = store.insert_active(make_post(1, 1)).await.expect("insert");

    store.retire(*post.id()).await.expect("first retire");
    let again = store
        .retire(*post.id())
        .await
        .expect("second retire is a no-op")
        .expect("post still exists");
    assert_eq!(*again.state(), PostState::Retired);

    assert!(store.retire(PostId::generate()).await.expect("missing").is_none());
}

#[tokio::test]
async fn delivery_attaches_exactly_once() {
    let store = MemoryPostStore::new();
    let post = store.insert_active(make_post(1, 1)).await.expect("insert");

    let updated = store
        .attach_delivery(*post.id(), DeliveryRef::new("msg-100"))
        .await
        .expect("first attach");
    assert_eq!(updated.delivery().as_ref(), Some(&DeliveryRef::new("msg-100")));

    store
        .attach_delivery(*post.id(), DeliveryRef::new("msg-101"))
        .await
        .expect_err("second attach must fail");

    let found = store
        .find_by_delivery(&DeliveryRef::new("msg-100"))
        .await
        .expect("query")
        .expect("post is indexed by delivery");
    assert_eq!(found.id(), post.id());
}

#[tokio::test]
async fn attach_is_rejected_after_retirement() {
    let store = MemoryPostStore::new();
    let post = store.insert_active(make_post(1, 1)).await.expect("insert");
    store.retire(*post.id()).await.expect("retire");

    store
        .attach_delivery(*post.id(), DeliveryRef::new("msg-100"))
        .await
        .expect_err("retired posts accept no delivery");
}

#[tokio::test]
async fn view_recording_is_rejected_after_retirement() {
    let store = MemoryPostStore::new();
    let post = store.insert_active(make_post(1, 1)).await.expect("insert");
    store.record_view(*post.id()).await.expect("active view");
    store.retire(*post.id()).await.expect("retire");

    store
        .record_view(*post.id())
        .await
        .expect_err("retired posts accept no views");

    let stored = store.get(*post.id()).await.expect("query").expect("post");
    assert_eq!(*stored.view_count(), 1);
}

#[tokio::test]
async fn expired_returns_only_overdue_active_posts() {
    let store = MemoryPostStore::new();
    let now = Utc::now();

    let overdue = Post::new(
        PostId::generate(),
        VenueId(1),
        ChannelId(1),
        ActorId(1),
        "General".to_string(),
        "old".to_string(),
        None,
        OriginKind::Interactive,
        now - ChronoDuration::hours(3),
        Some(now - ChronoDuration::seconds(1)),
    );
    let fresh = Post::new(
        PostId::generate(),
        VenueId(1),
        ChannelId(1),
        ActorId(2),
        "General".to_string(),
        "new".to_string(),
        None,
        OriginKind::Interactive,
        now,
        Some(now + ChronoDuration::hours(1)),
    );
    let eternal = make_post(1, 3);

    let overdue = store.insert_active(overdue).await.expect("insert");
    store.insert_active(fresh).await.expect("insert");
    store.insert_active(eternal).await.expect("insert");

    let expired = store.expired(now).await.expect("query");
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].id(), overdue.id());

    // Retired posts never show up, even when overdue.
    store.retire(*overdue.id()).await.expect("retire");
    assert!(store.expired(now).await.expect("query").is_empty());
}

#[tokio::test]
async fn edit_bumps_count_and_rejects_retired_posts() {
    let store = MemoryPostStore::new();
    let post = store.insert_active(make_post(1, 1)).await.expect("insert");

    let edited = store
        .apply_edit(*post.id(), "updated text".to_string(), None)
        .await
        .expect("edit");
    assert_eq!(edited.body(), "updated text");
    assert_eq!(*edited.edit_count(), 1);

    store.retire(*post.id()).await.expect("retire");
    store
        .apply_edit(*post.id(), "too late".to_string(), None)
        .await
        .expect_err("retired posts cannot be edited");
}

#[tokio::test]
async fn cooldown_ledger_reports_remaining_from_recorded_duration() {
    let ledger = MemoryCooldownLedger::new();
    let now = Utc::now();
    let actor = ActorId(1);
    let venue = VenueId(1);

    assert!(
        ledger
            .check(actor, venue, now)
            .await
            .expect("check")
            .is_ready()
    );

    ledger
        .record(actor, venue, Duration::from_secs(600), now)
        .await
        .expect("record");

    let status = ledger
        .check(actor, venue, now + ChronoDuration::seconds(100))
        .await
        .expect("check");
    assert_eq!(
        status,
        CooldownStatus::OnCooldown {
            remaining: Duration::from_secs(500)
        }
    );

    // At the captured duration boundary the actor is ready again.
    assert!(
        ledger
            .check(actor, venue, now + ChronoDuration::seconds(600))
            .await
            .expect("check")
            .is_ready()
    );
}

#[tokio::test]
async fn cooldown_records_expire_after_retention_window() {
    let ledger = MemoryCooldownLedger::new();
    let now = Utc::now();

    ledger
        .record(ActorId(1), VenueId(1), Duration::from_secs(600), now)
        .await
        .expect("record");
    ledger
        .record(
            ActorId(2),
            VenueId(1),
            Duration::from_secs(600),
            now - ChronoDuration::hours(25),
        )
        .await
        .expect("record");

    let purged = ledger.purge_stale(now).await.expect("purge");
    assert_eq!(purged, 1);

    // Lazy expiry on check as well, independent of purge passes.
    ledger
        .record(
            ActorId(3),
            VenueId(1),
            Duration::from_secs(600),
            now - ChronoDuration::hours(25),
        )
        .await
        .expect("record");
    assert!(
        ledger
            .check(ActorId(3), VenueId(1), now)
            .await
            .expect("check")
            .is_ready()
    );
}

#[tokio::test]
async fn policy_store_defaults_and_persists_on_first_access() {
    let store = MemoryPolicyStore::new();
    let venue = VenueId(42);

    let first = store.get_or_default(venue).await.expect("first access");
    assert!(*first.cooldown().enabled());

    // Same policy on the second read, not a fresh default.
    let second = store.get_or_default(venue).await.expect("second access");
    assert_eq!(first, second);
}

#[tokio::test]
async fn policy_store_resolves_default_categories() {
    use squadboard_core::{AllowedChannel, VenuePolicyBuilder};

    let store = MemoryPolicyStore::new();
    let policy = VenuePolicyBuilder::default()
        .venue_id(VenueId(1))
        .allowed_channels(vec![AllowedChannel::new(
            ChannelId(10),
            Some("Minecraft".to_string()),
        )])
        .build()
        .expect("valid policy");
    store.put(policy).await.expect("put");

    assert_eq!(
        store
            .resolve_default_category(VenueId(1), ChannelId(10))
            .await
            .expect("resolve"),
        Some("Minecraft".to_string())
    );
    assert_eq!(
        store
            .resolve_default_category(VenueId(1), ChannelId(11))
            .await
            .expect("resolve"),
        None
    );
}
