//! Registration ledger, subscription registry and fan-out integration tests

mod helpers;

use std::sync::Arc;

use helpers::*;

use DiceBuddy::models::event::{Event, EventKind};
use DiceBuddy::services::NotificationService;

#[tokio::test]
async fn duplicate_registration_is_reported_not_errored() {
    let db = test_db().await;
    let oneshot = db
        .create_oneshot(oneshot_request("Test", &start_in_days(3)))
        .await
        .unwrap();

    let first = db
        .registrations
        .register(EventKind::Oneshot, oneshot.id, 100, Some("alice"), Some("Alice"))
        .await
        .unwrap();
    let second = db
        .registrations
        .register(EventKind::Oneshot, oneshot.id, 100, Some("alice"), Some("Alice"))
        .await
        .unwrap();

    assert!(first);
    assert!(!second);

    let registrants = db
        .registrations
        .list_registrants(EventKind::Oneshot, oneshot.id)
        .await
        .unwrap();
    assert_eq!(registrants.len(), 1);
    assert_eq!(registrants[0].user_id, 100);
    assert_eq!(registrants[0].username.as_deref(), Some("alice"));
}

#[tokio::test]
async fn same_user_can_register_for_both_kinds() {
    let db = test_db().await;
    let oneshot = db
        .create_oneshot(oneshot_request("Oneshot", &start_in_days(3)))
        .await
        .unwrap();
    let campaign = db
        .create_campaign(campaign_request("Campaign", &start_in_days(5)))
        .await
        .unwrap();

    assert!(db
        .registrations
        .register(EventKind::Oneshot, oneshot.id, 100, None, None)
        .await
        .unwrap());
    assert!(db
        .registrations
        .register(EventKind::Campaign, campaign.id, 100, None, None)
        .await
        .unwrap());
}

#[tokio::test]
async fn subscribing_twice_keeps_a_single_subscription() {
    let db = test_db().await;

    db.notifications.subscribe(100, EventKind::Oneshot).await.unwrap();
    db.notifications.subscribe(100, EventKind::Oneshot).await.unwrap();

    let subscribers = db.notifications.subscribers(EventKind::Oneshot).await.unwrap();
    assert_eq!(subscribers, vec![100]);

    // Kinds are independent registries
    assert!(db
        .notifications
        .subscribers(EventKind::Campaign)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn reminder_join_covers_only_future_events() {
    let db = test_db().await;

    let future = db
        .create_oneshot(oneshot_request("Future", &start_in_days(3)))
        .await
        .unwrap();
    let past = db
        .create_oneshot(oneshot_request("Past", "2020-01-01 12:00"))
        .await
        .unwrap();
    let campaign = db
        .create_campaign(campaign_request("Ongoing", &start_in_days(6)))
        .await
        .unwrap();

    for (kind, id) in [
        (EventKind::Oneshot, future.id),
        (EventKind::Oneshot, past.id),
        (EventKind::Campaign, campaign.id),
    ] {
        db.registrations.register(kind, id, 100, None, None).await.unwrap();
    }

    let entries = db.registrations.list_for_reminders().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries
        .iter()
        .any(|e| e.event_type == EventKind::Oneshot && e.event_id == future.id));
    assert!(entries
        .iter()
        .any(|e| e.event_type == EventKind::Campaign && e.event_id == campaign.id));
}

#[tokio::test]
async fn audit_list_spans_both_kinds_sorted_by_event_start() {
    let db = test_db().await;

    let later = db
        .create_oneshot(oneshot_request("Later", &start_in_days(10)))
        .await
        .unwrap();
    let sooner = db
        .create_campaign(campaign_request("Sooner", &start_in_days(1)))
        .await
        .unwrap();

    db.registrations
        .register(EventKind::Oneshot, later.id, 100, Some("alice"), None)
        .await
        .unwrap();
    db.registrations
        .register(EventKind::Campaign, sooner.id, 200, Some("bob"), None)
        .await
        .unwrap();

    let records = db.registrations.list_all().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].event_name, "Sooner");
    assert_eq!(records[1].event_name, "Later");
    assert_eq!(records[0].event_type, EventKind::Campaign);
}

// End-to-end: create -> two users register -> duplicate rejected -> delete
// cascades.
#[tokio::test]
async fn registration_lifecycle_end_to_end() {
    let db = test_db().await;

    let oneshot = db
        .create_oneshot(oneshot_request("Test", &start_in_hours(1)))
        .await
        .unwrap();
    assert!(!oneshot.free_drink);

    assert!(db
        .registrations
        .register(EventKind::Oneshot, oneshot.id, 100, Some("alice"), Some("Alice"))
        .await
        .unwrap());
    assert!(db
        .registrations
        .register(EventKind::Oneshot, oneshot.id, 200, Some("bob"), Some("Bob"))
        .await
        .unwrap());
    assert!(!db
        .registrations
        .register(EventKind::Oneshot, oneshot.id, 100, Some("alice"), Some("Alice"))
        .await
        .unwrap());

    let registrants = db
        .registrations
        .list_registrants(EventKind::Oneshot, oneshot.id)
        .await
        .unwrap();
    assert_eq!(registrants.len(), 2);

    db.delete_event(EventKind::Oneshot, oneshot.id).await.unwrap();
    let registrants = db
        .registrations
        .list_registrants(EventKind::Oneshot, oneshot.id)
        .await
        .unwrap();
    assert!(registrants.is_empty());
}

// End-to-end: subscribe while nothing is scheduled -> event published ->
// fan-out reaches the subscriber once, and the subscription survives.
#[tokio::test]
async fn publish_fan_out_end_to_end() {
    let db = test_db().await;
    let sender = Arc::new(MockSender::new());
    let notifier = NotificationService::new(db.clone(), sender.clone(), vec![1]);

    assert!(db.events.upcoming_oneshots().await.unwrap().is_empty());
    db.notifications.subscribe(100, EventKind::Oneshot).await.unwrap();

    let oneshot = db
        .create_oneshot(oneshot_request("Fresh", &start_in_days(7)))
        .await
        .unwrap();
    let event = Event::Oneshot(oneshot.clone());

    let delivered = notifier.announce_new_event(&event).await.unwrap();
    assert_eq!(delivered, 1);

    let messages = sender.sent_to(100);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].text.contains("A new oneshot has appeared!"));
    assert!(messages[0].text.contains("Fresh"));
    let action = messages[0].action.unwrap();
    assert_eq!(action.kind, EventKind::Oneshot);
    assert_eq!(action.event_id, oneshot.id);

    // Not auto-removed: the next publish will notify the same user again
    let subscribers = db.notifications.subscribers(EventKind::Oneshot).await.unwrap();
    assert_eq!(subscribers, vec![100]);
}

#[tokio::test]
async fn fan_out_continues_past_unreachable_subscribers() {
    let db = test_db().await;
    let sender = Arc::new(MockSender::new());
    let notifier = NotificationService::new(db.clone(), sender.clone(), vec![]);

    db.notifications.subscribe(100, EventKind::Campaign).await.unwrap();
    db.notifications.subscribe(200, EventKind::Campaign).await.unwrap();
    sender.fail_for(100);

    let campaign = db
        .create_campaign(campaign_request("Strahd", &start_in_days(7)))
        .await
        .unwrap();
    let delivered = notifier
        .announce_new_event(&Event::Campaign(campaign))
        .await
        .unwrap();

    assert_eq!(delivered, 1);
    assert_eq!(sender.sent_to(200).len(), 1);
    assert!(sender.sent_to(100).is_empty());
}

#[tokio::test]
async fn admin_registration_notice_reports_headcount() {
    let db = test_db().await;
    let sender = Arc::new(MockSender::new());
    let notifier = NotificationService::new(db.clone(), sender.clone(), vec![1, 2]);

    let oneshot = db
        .create_oneshot(oneshot_request("Test", &start_in_days(2)))
        .await
        .unwrap();
    db.registrations
        .register(EventKind::Oneshot, oneshot.id, 100, Some("alice"), None)
        .await
        .unwrap();

    notifier
        .notify_admins_new_registration(&Event::Oneshot(oneshot), Some("alice"), None)
        .await
        .unwrap();

    for admin_id in [1, 2] {
        let messages = sender.sent_to(admin_id);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].text.contains("@alice"));
        assert!(messages[0].text.contains("Total registrations: 1"));
    }
}
