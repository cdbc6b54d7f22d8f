//! Reminder scheduler integration tests
//!
//! Events are stored with real-future start times so the registration join
//! picks them up, and the scheduler clock is injected through `tick_at` to
//! land exactly where each test needs it relative to the parsed start.

mod helpers;

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use helpers::*;

use DiceBuddy::config::SchedulerConfig;
use DiceBuddy::models::event::{parse_start_time, EventKind};
use DiceBuddy::services::ReminderScheduler;

struct Harness {
    db: DiceBuddy::database::DatabaseService,
    sender: Arc<MockSender>,
    scheduler: ReminderScheduler,
    event_id: i64,
}

/// One oneshot starting `days` from now with `users` registered for it.
/// Returns the harness and the parsed start time.
async fn oneshot_harness(days: i64, users: &[i64]) -> (Harness, NaiveDateTime) {
    let db = test_db().await;
    let oneshot = db
        .create_oneshot(oneshot_request("Goblin Ambush", &start_in_days(days)))
        .await
        .unwrap();
    for user_id in users {
        db.registrations
            .register(EventKind::Oneshot, oneshot.id, *user_id, None, None)
            .await
            .unwrap();
    }
    let start = parse_start_time(&oneshot.date_time).unwrap();

    let sender = Arc::new(MockSender::new());
    let scheduler = ReminderScheduler::new(db.clone(), sender.clone(), SchedulerConfig::default());
    (
        Harness {
            db,
            sender,
            scheduler,
            event_id: oneshot.id,
        },
        start,
    )
}

#[tokio::test]
async fn nothing_fires_before_the_window_opens() {
    let (h, start) = oneshot_harness(10, &[100]).await;

    // 30 minutes before the 3-day threshold becomes due
    let now = start - Duration::days(3) - Duration::minutes(30);
    h.scheduler.tick_at(now).await.unwrap();

    assert!(h.sender.sent().is_empty());
}

#[tokio::test]
async fn reminder_fires_inside_the_window() {
    let (h, start) = oneshot_harness(10, &[100]).await;

    let now = start - Duration::days(3) + Duration::minutes(10);
    h.scheduler.tick_at(now).await.unwrap();

    let messages = h.sender.sent_to(100);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].text.contains("starts in 3 days"));
    assert!(messages[0].text.contains("Goblin Ambush"));
    assert!(messages[0].action.is_none());
}

#[tokio::test]
async fn repeated_ticks_deliver_each_threshold_at_most_once() {
    let (h, start) = oneshot_harness(10, &[100]).await;

    let due = start - Duration::days(3);
    h.scheduler.tick_at(due + Duration::minutes(5)).await.unwrap();
    h.scheduler.tick_at(due + Duration::minutes(35)).await.unwrap();
    h.scheduler.tick_at(due + Duration::minutes(55)).await.unwrap();

    assert_eq!(h.sender.sent_to(100).len(), 1);
}

#[tokio::test]
async fn fully_missed_window_is_skipped_for_good() {
    let (h, start) = oneshot_harness(10, &[100]).await;

    // Two hours past the 3-day threshold, as after long process downtime
    let now = start - Duration::days(3) + Duration::hours(2);
    h.scheduler.tick_at(now).await.unwrap();

    assert!(h.sender.sent().is_empty());
}

#[tokio::test]
async fn each_threshold_fires_independently() {
    let (h, start) = oneshot_harness(10, &[100]).await;

    h.scheduler
        .tick_at(start - Duration::days(3) + Duration::minutes(10))
        .await
        .unwrap();
    h.scheduler
        .tick_at(start - Duration::days(1) + Duration::minutes(10))
        .await
        .unwrap();
    h.scheduler
        .tick_at(start - Duration::hours(6) + Duration::minutes(10))
        .await
        .unwrap();

    let messages = h.sender.sent_to(100);
    assert_eq!(messages.len(), 3);
    assert!(messages[0].text.contains("starts in 3 days"));
    assert!(messages[1].text.contains("starts in 1 day"));
    assert!(messages[2].text.contains("starts in 6 hours"));
}

#[tokio::test]
async fn failed_delivery_is_retried_and_others_are_not_resent() {
    let (h, start) = oneshot_harness(10, &[100, 200]).await;
    h.sender.fail_for(100);

    let due = start - Duration::days(3);
    h.scheduler.tick_at(due + Duration::minutes(5)).await.unwrap();

    // The unreachable recipient did not block the other one
    assert!(h.sender.sent_to(100).is_empty());
    assert_eq!(h.sender.sent_to(200).len(), 1);

    // Next tick inside the window: only the failed delivery is retried
    h.sender.clear_failures();
    h.scheduler.tick_at(due + Duration::minutes(35)).await.unwrap();

    assert_eq!(h.sender.sent_to(100).len(), 1);
    assert_eq!(h.sender.sent_to(200).len(), 1);
}

#[tokio::test]
async fn unparseable_start_time_never_produces_reminders() {
    let db = test_db().await;
    let oneshot = db
        .create_oneshot(oneshot_request("Sometime", "to be decided"))
        .await
        .unwrap();
    db.registrations
        .register(EventKind::Oneshot, oneshot.id, 100, None, None)
        .await
        .unwrap();

    let sender = Arc::new(MockSender::new());
    let scheduler = ReminderScheduler::new(db, sender.clone(), SchedulerConfig::default());

    scheduler
        .tick_at(chrono::Local::now().naive_local())
        .await
        .unwrap();
    assert!(sender.sent().is_empty());
}

#[tokio::test]
async fn campaign_registrations_get_reminders_too() {
    let db = test_db().await;
    let campaign = db
        .create_campaign(campaign_request("Strahd", &start_in_days(10)))
        .await
        .unwrap();
    db.registrations
        .register(EventKind::Campaign, campaign.id, 100, None, None)
        .await
        .unwrap();
    let start = parse_start_time(&campaign.date_time).unwrap();

    let sender = Arc::new(MockSender::new());
    let scheduler = ReminderScheduler::new(db, sender.clone(), SchedulerConfig::default());

    scheduler
        .tick_at(start - Duration::days(1) + Duration::minutes(10))
        .await
        .unwrap();

    let messages = sender.sent_to(100);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].text.contains("Strahd"));
    assert!(messages[0].text.contains("starts in 1 day"));
}

#[tokio::test]
async fn reminders_survive_only_successful_sends() {
    let (h, start) = oneshot_harness(10, &[100]).await;
    h.sender.fail_for(100);

    let due = start - Duration::days(3);
    h.scheduler.tick_at(due + Duration::minutes(5)).await.unwrap();

    // Nothing was recorded as sent
    let was_sent = h
        .db
        .reminders
        .was_sent(EventKind::Oneshot, h.event_id, 100, "3_days")
        .await
        .unwrap();
    assert!(!was_sent);
}
