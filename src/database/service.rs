//! Database service layer
//!
//! High-level facade over the repositories. Input validation that the
//! presentation layer is not trusted to do (non-empty name and start time)
//! lives here, in front of the event store.

use crate::database::{
    DatabasePool, EventRepository, NotificationRepository, RegistrationRepository,
    ReminderRepository, ReviewRepository,
};
use crate::models::event::{
    Campaign, CreateCampaignRequest, CreateOneshotRequest, Event, EventKind, Oneshot,
};
use crate::utils::errors::{DiceBuddyError, Result};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub events: EventRepository,
    pub registrations: RegistrationRepository,
    pub notifications: NotificationRepository,
    pub reminders: ReminderRepository,
    pub reviews: ReviewRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool.clone()),
            reminders: ReminderRepository::new(pool.clone()),
            reviews: ReviewRepository::new(pool),
        }
    }

    /// Create a oneshot after validating required fields
    pub async fn create_oneshot(&self, request: CreateOneshotRequest) -> Result<Oneshot> {
        validate_required("name", &request.name)?;
        validate_required("date_time", &request.date_time)?;
        self.events.create_oneshot(request).await
    }

    /// Create a campaign after validating required fields
    pub async fn create_campaign(&self, request: CreateCampaignRequest) -> Result<Campaign> {
        validate_required("name", &request.name)?;
        validate_required("date_time", &request.date_time)?;
        self.events.create_campaign(request).await
    }

    /// Fetch an event of either kind. `None` is the normal outcome for an
    /// unknown id; the caller decides presentation.
    pub async fn find_event(&self, kind: EventKind, event_id: i64) -> Result<Option<Event>> {
        let event = match kind {
            EventKind::Oneshot => self.events.find_oneshot(event_id).await?.map(Event::Oneshot),
            EventKind::Campaign => self
                .events
                .find_campaign(event_id)
                .await?
                .map(Event::Campaign),
        };

        Ok(event)
    }

    /// Delete an event of either kind; registrations cascade with it
    pub async fn delete_event(&self, kind: EventKind, event_id: i64) -> Result<()> {
        match kind {
            EventKind::Oneshot => self.events.delete_oneshot(event_id).await,
            EventKind::Campaign => self.events.delete_campaign(event_id).await,
        }
    }
}

fn validate_required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DiceBuddyError::InvalidInput(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_field_rejects_blank_input() {
        assert!(validate_required("name", "Lost Mine of Phandelver").is_ok());
        assert!(validate_required("name", "").is_err());
        assert!(validate_required("date_time", "   ").is_err());
    }
}
