//! Notification fan-out service
//!
//! Publishes "a new event appeared" messages to subscribers and keeps admins
//! informed about new registrations and forwarded user messages. Every loop
//! over recipients isolates per-recipient failures: one blocked or
//! unreachable user must never stop the rest of the batch.

use std::sync::Arc;

use tracing::{info, warn};

use crate::database::DatabaseService;
use crate::models::event::{Event, EventKind};
use crate::services::delivery::{MessageSender, RegisterAction};
use crate::services::formatting::render_event_summary;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct NotificationService {
    db: DatabaseService,
    sender: Arc<dyn MessageSender>,
    admin_ids: Vec<i64>,
}

impl NotificationService {
    pub fn new(db: DatabaseService, sender: Arc<dyn MessageSender>, admin_ids: Vec<i64>) -> Self {
        Self {
            db,
            sender,
            admin_ids,
        }
    }

    /// Announce a freshly published event to everyone subscribed to its kind.
    ///
    /// Subscriptions are read, not consumed: the same users will be notified
    /// again on the next event of this kind. Returns the number of successful
    /// deliveries.
    pub async fn announce_new_event(&self, event: &Event) -> Result<usize> {
        let subscribers = self.db.notifications.subscribers(event.kind()).await?;
        let headline = match event.kind() {
            EventKind::Oneshot => "A new oneshot has appeared!",
            EventKind::Campaign => "A new campaign has appeared!",
        };
        let text = format!("{}\n\n{}", headline, render_event_summary(event));
        let action = RegisterAction {
            kind: event.kind(),
            event_id: event.id(),
        };

        let mut delivered = 0;
        for user_id in subscribers {
            match self.sender.send(user_id, &text, Some(action)).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(user_id = user_id, error = %e, "Failed to announce new event to subscriber");
                }
            }
        }

        info!(
            event_id = event.id(),
            kind = %event.kind(),
            delivered = delivered,
            "New event announced to subscribers"
        );
        Ok(delivered)
    }

    /// Tell every admin about a new registration, with the current headcount.
    pub async fn notify_admins_new_registration(
        &self,
        event: &Event,
        username: Option<&str>,
        first_name: Option<&str>,
    ) -> Result<()> {
        let registrants = self
            .db
            .registrations
            .list_registrants(event.kind(), event.id())
            .await?;

        let user_label = match (username, first_name) {
            (Some(username), _) => format!("@{}", username),
            (None, Some(first_name)) => first_name.to_string(),
            (None, None) => "User".to_string(),
        };
        let kind_label = match event.kind() {
            EventKind::Oneshot => "oneshot",
            EventKind::Campaign => "campaign",
        };
        let text = format!(
            "New registration for a {}!\n\nEvent: {}\nUser: {}\nTotal registrations: {}",
            kind_label,
            event.name(),
            user_label,
            registrants.len()
        );

        self.notify_admins(&text).await;
        Ok(())
    }

    /// Send a plain text notice to every configured admin, skipping failures.
    pub async fn notify_admins(&self, text: &str) {
        for admin_id in &self.admin_ids {
            if let Err(e) = self.sender.send(*admin_id, text, None).await {
                warn!(admin_id = admin_id, error = %e, "Failed to notify admin");
            }
        }
    }
}
