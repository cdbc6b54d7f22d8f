//! Multi-step event entry builders
//!
//! An admin publishes an event through a short question/answer flow. The
//! draft collects one free-text answer per step in a fixed order and is only
//! convertible into a create request once every step has an answer; the final
//! free-drink step comes in through inline buttons rather than text.

use crate::models::event::{CreateCampaignRequest, CreateOneshotRequest};

/// What the flow should ask for next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPrompt {
    Name,
    DateTime,
    Duration,
    Story,
    Location,
    Price,
    FreeDrink,
}

impl DraftPrompt {
    /// Prompt text shown to the admin
    pub fn question(&self) -> &'static str {
        match self {
            DraftPrompt::Name => "Enter the event name:",
            DraftPrompt::DateTime => "Enter date and time (format: YYYY-MM-DD HH:MM):",
            DraftPrompt::Duration => "Enter the duration:",
            DraftPrompt::Story => "Enter the story:",
            DraftPrompt::Location => "Enter the location:",
            DraftPrompt::Price => "Enter the price:",
            DraftPrompt::FreeDrink => "Is a free drink included in the price?",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OneshotDraft {
    pub name: Option<String>,
    pub date_time: Option<String>,
    pub story: Option<String>,
    pub location: Option<String>,
    pub price: Option<String>,
}

impl OneshotDraft {
    pub fn next_prompt(&self) -> DraftPrompt {
        if self.name.is_none() {
            DraftPrompt::Name
        } else if self.date_time.is_none() {
            DraftPrompt::DateTime
        } else if self.story.is_none() {
            DraftPrompt::Story
        } else if self.location.is_none() {
            DraftPrompt::Location
        } else if self.price.is_none() {
            DraftPrompt::Price
        } else {
            DraftPrompt::FreeDrink
        }
    }

    /// Store `text` as the answer to the current step; returns the next prompt.
    pub fn apply_text(&mut self, text: String) -> DraftPrompt {
        match self.next_prompt() {
            DraftPrompt::Name => self.name = Some(text),
            DraftPrompt::DateTime => self.date_time = Some(text),
            DraftPrompt::Story => self.story = Some(text),
            DraftPrompt::Location => self.location = Some(text),
            DraftPrompt::Price => self.price = Some(text),
            DraftPrompt::Duration | DraftPrompt::FreeDrink => {}
        }
        self.next_prompt()
    }

    /// Complete the draft. `None` if a required text step is still missing.
    pub fn finish(self, free_drink: bool) -> Option<CreateOneshotRequest> {
        Some(CreateOneshotRequest {
            name: self.name?,
            date_time: self.date_time?,
            story: self.story,
            location: self.location,
            price: self.price,
            free_drink,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CampaignDraft {
    pub name: Option<String>,
    pub date_time: Option<String>,
    pub duration: Option<String>,
    pub story: Option<String>,
    pub location: Option<String>,
    pub price: Option<String>,
}

impl CampaignDraft {
    pub fn next_prompt(&self) -> DraftPrompt {
        if self.name.is_none() {
            DraftPrompt::Name
        } else if self.date_time.is_none() {
            DraftPrompt::DateTime
        } else if self.duration.is_none() {
            DraftPrompt::Duration
        } else if self.story.is_none() {
            DraftPrompt::Story
        } else if self.location.is_none() {
            DraftPrompt::Location
        } else if self.price.is_none() {
            DraftPrompt::Price
        } else {
            DraftPrompt::FreeDrink
        }
    }

    pub fn apply_text(&mut self, text: String) -> DraftPrompt {
        match self.next_prompt() {
            DraftPrompt::Name => self.name = Some(text),
            DraftPrompt::DateTime => self.date_time = Some(text),
            DraftPrompt::Duration => self.duration = Some(text),
            DraftPrompt::Story => self.story = Some(text),
            DraftPrompt::Location => self.location = Some(text),
            DraftPrompt::Price => self.price = Some(text),
            DraftPrompt::FreeDrink => {}
        }
        self.next_prompt()
    }

    pub fn finish(self, free_drink: bool) -> Option<CreateCampaignRequest> {
        Some(CreateCampaignRequest {
            name: self.name?,
            date_time: self.date_time?,
            duration: self.duration,
            story: self.story,
            location: self.location,
            price: self.price,
            free_drink,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oneshot_draft_walks_steps_in_order() {
        let mut draft = OneshotDraft::default();
        assert_eq!(draft.next_prompt(), DraftPrompt::Name);
        assert_eq!(draft.apply_text("Test".into()), DraftPrompt::DateTime);
        assert_eq!(
            draft.apply_text("2026-09-10 19:00".into()),
            DraftPrompt::Story
        );
        assert_eq!(draft.apply_text("A heist".into()), DraftPrompt::Location);
        assert_eq!(draft.apply_text("The cellar".into()), DraftPrompt::Price);
        assert_eq!(draft.apply_text("10 eur".into()), DraftPrompt::FreeDrink);

        let request = draft.finish(true).unwrap();
        assert_eq!(request.name, "Test");
        assert_eq!(request.date_time, "2026-09-10 19:00");
        assert!(request.free_drink);
    }

    #[test]
    fn campaign_draft_includes_duration_step() {
        let mut draft = CampaignDraft::default();
        draft.apply_text("Curse of Strahd".into());
        assert_eq!(
            draft.apply_text("2026-10-01 18:00".into()),
            DraftPrompt::Duration
        );
        draft.apply_text("10 sessions".into());
        draft.apply_text("Gothic horror".into());
        draft.apply_text("Back room".into());
        draft.apply_text("15 eur per session".into());

        let request = draft.finish(false).unwrap();
        assert_eq!(request.duration.as_deref(), Some("10 sessions"));
        assert!(!request.free_drink);
    }

    #[test]
    fn unfinished_draft_does_not_build_a_request() {
        let mut draft = OneshotDraft::default();
        draft.apply_text("Test".into());
        assert!(draft.finish(false).is_none());
    }
}
