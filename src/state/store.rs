//! In-process session store
//!
//! One active flow per user: an admin working through an event draft, or an
//! ordinary user who tapped "leave review" and owes us one text message.
//! State is deliberately in-memory; losing it on restart just cancels the
//! in-progress conversation, durable data is untouched.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::draft::{CampaignDraft, OneshotDraft};

/// The active conversation flow for one user
#[derive(Debug, Clone)]
pub enum Flow {
    OneshotDraft(OneshotDraft),
    CampaignDraft(CampaignDraft),
    LeavingReview,
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<i64, Flow>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the user's active flow
    pub async fn set(&self, user_id: i64, flow: Flow) {
        self.inner.lock().await.insert(user_id, flow);
    }

    /// Remove and return the user's active flow
    pub async fn take(&self, user_id: i64) -> Option<Flow> {
        self.inner.lock().await.remove(&user_id)
    }

    /// Drop the user's active flow, if any
    pub async fn clear(&self, user_id: i64) {
        self.inner.lock().await.remove(&user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn take_consumes_the_flow() {
        let store = SessionStore::new();
        store.set(1, Flow::LeavingReview).await;

        assert!(matches!(store.take(1).await, Some(Flow::LeavingReview)));
        assert!(store.take(1).await.is_none());
    }

    #[tokio::test]
    async fn flows_are_per_user() {
        let store = SessionStore::new();
        store.set(1, Flow::LeavingReview).await;
        store.set(2, Flow::OneshotDraft(OneshotDraft::default())).await;

        store.clear(1).await;
        assert!(store.take(1).await.is_none());
        assert!(store.take(2).await.is_some());
    }
}
