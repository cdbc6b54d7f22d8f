//! Conversation state management
//!
//! Multi-step admin data entry and the leave-review mode are per-session
//! state, scoped to the user working through the flow.

pub mod draft;
pub mod store;

pub use draft::{CampaignDraft, DraftPrompt, OneshotDraft};
pub use store::{Flow, SessionStore};
