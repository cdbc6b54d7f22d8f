//! Event summary rendering
//!
//! Produces the human-readable description shown in announcements, reminders
//! and the browse flow. Campaign summaries carry a status line computed from
//! the start time; when the stored text is not in the canonical format the
//! status is silently omitted and the rest of the summary stands.

use chrono::{Local, NaiveDateTime};

use crate::models::event::{parse_start_time, Campaign, Event, Oneshot};

pub fn render_oneshot_summary(oneshot: &Oneshot) -> String {
    let mut text = format!("Oneshot \"{}\"\n\n", oneshot.name);
    text.push_str(&format!("Date and time: {}\n", oneshot.date_time));
    text.push_str(&format!(
        "Story: {}\n",
        oneshot.story.as_deref().unwrap_or("-")
    ));
    text.push_str(&format!(
        "Location: {}\n",
        oneshot.location.as_deref().unwrap_or("-")
    ));
    text.push_str(&format!(
        "Price: {}\n",
        oneshot.price.as_deref().unwrap_or("-")
    ));
    if oneshot.free_drink {
        text.push_str("\nA free drink is included in the price!");
    }
    text
}

pub fn render_campaign_summary(campaign: &Campaign) -> String {
    let mut text = format!("Campaign \"{}\"\n\n", campaign.name);
    text.push_str(&format!("Date and time: {}\n", campaign.date_time));
    text.push_str(&format!(
        "Duration: {}\n",
        campaign.duration.as_deref().unwrap_or("-")
    ));
    text.push_str(&format!(
        "Story: {}\n",
        campaign.story.as_deref().unwrap_or("-")
    ));
    text.push_str(&format!(
        "Location: {}\n",
        campaign.location.as_deref().unwrap_or("-")
    ));
    text.push_str(&format!(
        "Price: {}\n",
        campaign.price.as_deref().unwrap_or("-")
    ));

    if let Some(status) = campaign_status(&campaign.date_time, Local::now().naive_local()) {
        text.push_str(&format!("\nStatus: {}", status));
    }

    if campaign.free_drink {
        text.push_str("\nA free drink is included in the price!");
    }

    text
}

pub fn render_event_summary(event: &Event) -> String {
    match event {
        Event::Oneshot(oneshot) => render_oneshot_summary(oneshot),
        Event::Campaign(campaign) => render_campaign_summary(campaign),
    }
}

/// Campaign display status. `None` when the start time does not parse.
fn campaign_status(date_time: &str, now: NaiveDateTime) -> Option<String> {
    let start = parse_start_time(date_time)?;
    if start > now {
        Some("Not started yet".to_string())
    } else {
        Some(format!("Started on {}", start.format("%d/%m")))
    }
}
