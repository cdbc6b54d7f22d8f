//! Reminder scheduler
//!
//! Periodic background task that scans every registration for a future event
//! and delivers reminders at fixed lead times before the start. Each
//! threshold is checked against a one hour half-open window `[due, due + 1h)`
//! so a tick that lands anywhere inside the window still fires; the window is
//! wider than the tick interval, so a threshold cannot fall between two
//! ticks. A threshold whose window has fully passed (process downtime longer
//! than an hour) is skipped for good.
//!
//! Delivery is at-most-once per (event, user, threshold): the reminder
//! tracker is consulted before sending and written only after a successful
//! send, and its storage-level unique key rejects the second writer even if
//! two ticks overlap.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Local, NaiveDateTime};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::SchedulerConfig;
use crate::database::DatabaseService;
use crate::models::event::parse_start_time;
use crate::services::delivery::MessageSender;
use crate::services::formatting::render_event_summary;
use crate::utils::errors::Result;

/// A fixed lead time before an event's start at which a reminder is due.
#[derive(Debug, Clone, Copy)]
pub struct ReminderThreshold {
    pub lead_secs: i64,
    /// Stable label used as part of the reminder tracker key
    pub label: &'static str,
    /// Human-readable lead time used in the message body
    pub human: &'static str,
}

impl ReminderThreshold {
    pub fn lead(&self) -> Duration {
        Duration::seconds(self.lead_secs)
    }
}

/// The fixed ordered set of reminder thresholds.
pub const REMINDER_THRESHOLDS: [ReminderThreshold; 3] = [
    ReminderThreshold {
        lead_secs: 3 * 24 * 3600,
        label: "3_days",
        human: "3 days",
    },
    ReminderThreshold {
        lead_secs: 24 * 3600,
        label: "1_day",
        human: "1 day",
    },
    ReminderThreshold {
        lead_secs: 6 * 3600,
        label: "6_hours",
        human: "6 hours",
    },
];

/// Width of the delivery tolerance window after a threshold becomes due.
pub fn reminder_window() -> Duration {
    Duration::hours(1)
}

/// `true` if `now` falls inside the half-open window `[due, due + 1h)`.
fn reminder_due(now: NaiveDateTime, due: NaiveDateTime) -> bool {
    let since_due = now.signed_duration_since(due);
    since_due >= Duration::zero() && since_due < reminder_window()
}

pub struct ReminderScheduler {
    db: DatabaseService,
    sender: Arc<dyn MessageSender>,
    config: SchedulerConfig,
}

impl ReminderScheduler {
    pub fn new(db: DatabaseService, sender: Arc<dyn MessageSender>, config: SchedulerConfig) -> Self {
        Self { db, sender, config }
    }

    /// Run the tick loop forever on the tokio timer. There is no cancellation
    /// concept; a tick always runs to completion and the next one is simply
    /// scheduled again.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        let initial_delay = StdDuration::from_secs(self.config.initial_delay_secs);
        let period = StdDuration::from_secs(self.config.interval_secs);

        tokio::spawn(async move {
            tokio::time::sleep(initial_delay).await;
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                if let Err(e) = self.tick().await {
                    error!(error = %e, "Reminder tick failed");
                }
            }
        })
    }

    /// One scheduler pass against the current wall clock
    pub async fn tick(&self) -> Result<()> {
        self.tick_at(Local::now().naive_local()).await
    }

    /// One scheduler pass with an explicit clock. Storage errors abort the
    /// tick; everything per-registration and per-recipient is isolated.
    pub async fn tick_at(&self, now: NaiveDateTime) -> Result<()> {
        let entries = self.db.registrations.list_for_reminders().await?;

        for entry in entries {
            let Some(start) = parse_start_time(&entry.date_time) else {
                warn!(
                    event_id = entry.event_id,
                    kind = %entry.event_type,
                    date_time = %entry.date_time,
                    "Skipping reminder for event with unparseable start time"
                );
                continue;
            };

            for threshold in REMINDER_THRESHOLDS {
                let due = start - threshold.lead();
                if !reminder_due(now, due) {
                    continue;
                }

                if self
                    .db
                    .reminders
                    .was_sent(entry.event_type, entry.event_id, entry.user_id, threshold.label)
                    .await?
                {
                    continue;
                }

                // Re-fetch the full record so the message carries current
                // story/location/price. A concurrently deleted event is a
                // normal miss, not an error.
                let Some(event) = self.db.find_event(entry.event_type, entry.event_id).await? else {
                    continue;
                };

                let text = format!(
                    "Reminder: \"{}\" starts in {}!\n\n{}",
                    entry.name,
                    threshold.human,
                    render_event_summary(&event)
                );

                match self.sender.send(entry.user_id, &text, None).await {
                    Ok(()) => {
                        self.db
                            .reminders
                            .mark_sent(entry.event_type, entry.event_id, entry.user_id, threshold.label)
                            .await?;
                        info!(
                            user_id = entry.user_id,
                            event_id = entry.event_id,
                            kind = %entry.event_type,
                            threshold = threshold.label,
                            "Reminder sent"
                        );
                    }
                    Err(e) => {
                        warn!(
                            user_id = entry.user_id,
                            event_id = entry.event_id,
                            threshold = threshold.label,
                            error = %e,
                            "Failed to deliver reminder"
                        );
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 9, 10)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn not_due_before_window() {
        // 30 minutes before the threshold becomes due
        assert!(!reminder_due(at(11, 30), at(12, 0)));
    }

    #[test]
    fn due_inside_window() {
        assert!(reminder_due(at(12, 0), at(12, 0)));
        assert!(reminder_due(at(12, 10), at(12, 0)));
        assert!(reminder_due(at(12, 59), at(12, 0)));
    }

    #[test]
    fn missed_after_window() {
        // Window is half-open: exactly due + 1h is already outside
        assert!(!reminder_due(at(13, 0), at(12, 0)));
        assert!(!reminder_due(at(14, 0), at(12, 0)));
    }

    #[test]
    fn threshold_labels_are_stable() {
        let labels: Vec<_> = REMINDER_THRESHOLDS.iter().map(|t| t.label).collect();
        assert_eq!(labels, vec!["3_days", "1_day", "6_hours"]);
    }
}
