//! Activity log service: append to the store, then publish to live subscribers.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::activity::{ActivityLogEntry, NewActivity};
use crate::models::user::User;

use super::store::ActivityStore;

const CHANNEL_CAPACITY: usize = 256;

/// The tool an entry is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    YapOptimizer,
    DraftImprover,
    InfoFiContent,
    ThreadGenerator,
    ContentIdeas,
    AuthenticReply,
    PostMortemAnalyzer,
    PersonaGenerator,
    DraftSuggestions,
}

impl Feature {
    pub fn label(self) -> &'static str {
        match self {
            Feature::YapOptimizer => "Yap Optimizer",
            Feature::DraftImprover => "Draft Improver",
            Feature::InfoFiContent => "InfoFi Content",
            Feature::ThreadGenerator => "Thread Generator",
            Feature::ContentIdeas => "Content Ideas",
            Feature::AuthenticReply => "Authentic Reply",
            Feature::PostMortemAnalyzer => "Post-Mortem Analyzer",
            Feature::PersonaGenerator => "Persona Generator",
            Feature::DraftSuggestions => "Draft Suggestions",
        }
    }
}

#[derive(Clone)]
pub struct ActivityLog {
    store: Arc<dyn ActivityStore>,
    tx: broadcast::Sender<ActivityLogEntry>,
}

impl ActivityLog {
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { store, tx }
    }

    /// Appends one entry attributed to `user` and fans it out to subscribers.
    pub async fn record(
        &self,
        user: &User,
        feature: Feature,
        action: &str,
        details: String,
    ) -> Result<ActivityLogEntry, AppError> {
        let entry = self
            .store
            .append(NewActivity {
                user_id: user.id,
                user_email: user.email.clone(),
                user_display_name: user.effective_display_name(),
                feature: feature.label().to_string(),
                action: action.to_string(),
                details,
            })
            .await?;

        // No receivers is the normal idle state.
        let receivers = self.tx.send(entry.clone()).unwrap_or(0);
        debug!(
            "Recorded activity '{}' for {} ({} live subscribers)",
            entry.action, entry.user_email, receivers
        );
        Ok(entry)
    }

    /// Records after a successful tool call. A logging failure never fails the tool.
    pub async fn record_quietly(&self, user: &User, feature: Feature, action: &str, details: String) {
        if let Err(e) = self.record(user, feature, action, details).await {
            warn!("Failed to record activity for {}: {e}", user.email);
        }
    }

    /// Every entry ever recorded, newest first.
    pub async fn list(&self) -> Result<Vec<ActivityLogEntry>, AppError> {
        self.store.list_newest_first().await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ActivityLogEntry> {
        self.tx.subscribe()
    }
}

/// First `max_chars` characters of `text`, with an ellipsis when truncated.
pub fn snippet(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::store::memory::InMemoryActivityStore;
    use crate::models::user::test_user;

    fn log() -> ActivityLog {
        ActivityLog::new(Arc::new(InMemoryActivityStore::default()))
    }

    #[tokio::test]
    async fn test_n_appends_read_back_newest_first() {
        let log = log();
        let user = test_user("ninja@example.com");
        for i in 0..25 {
            log.record(&user, Feature::ThreadGenerator, "Generated Thread", format!("#{i}"))
                .await
                .unwrap();
        }

        let entries = log.list().await.unwrap();
        assert_eq!(entries.len(), 25);
        for pair in entries.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
        assert_eq!(entries[0].details, "#24");
        assert_eq!(entries[24].details, "#0");
    }

    #[tokio::test]
    async fn test_entry_attributed_to_explicit_user() {
        let log = log();
        let user = test_user("heisninja@example.com");
        let entry = log
            .record(&user, Feature::YapOptimizer, "Analyzed Draft", "gm".into())
            .await
            .unwrap();
        assert_eq!(entry.user_id, user.id);
        assert_eq!(entry.user_display_name, "heisninja");
        assert_eq!(entry.feature, "Yap Optimizer");
    }

    #[tokio::test]
    async fn test_subscribers_receive_new_entries() {
        let log = log();
        let mut rx = log.subscribe();
        let user = test_user("a@b.co");
        log.record(&user, Feature::ContentIdeas, "Generated Ideas", "zk".into())
            .await
            .unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.action, "Generated Ideas");
        assert_eq!(received.details, "zk");
    }

    #[tokio::test]
    async fn test_record_without_subscribers_succeeds() {
        let log = log();
        let user = test_user("a@b.co");
        log.record_quietly(&user, Feature::PersonaGenerator, "Generated Persona", "x".into())
            .await;
        assert_eq!(log.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_not_truncated() {
        let log = log();
        let user = test_user("ninja@example.com");
        let total = 1500;
        for i in 0..total {
            log.record(&user, Feature::YapOptimizer, "Analyzed Draft", format!("#{i}"))
                .await
                .unwrap();
        }

        let entries = log.list().await.unwrap();
        assert_eq!(entries.len(), total);
        assert_eq!(entries[0].details, format!("#{}", total - 1));
        assert_eq!(entries[total - 1].details, "#0");
    }

    #[test]
    fn test_snippet_truncates_on_char_boundary() {
        assert_eq!(snippet("short", 40), "short");
        assert_eq!(snippet("abcdef", 3), "abc...");
        assert_eq!(snippet("ééééé", 2), "éé...");
    }
}
