//! Activity feed: the audit trail behind the dashboard's "latest
//! activity" panel.
//!
//! Logging is a best-effort side channel: entries go to MongoDB when it
//! is reachable and into a capped in-memory buffer when it is not, and a
//! logging failure never aborts the entity operation being audited.

use bson::doc;
use mongodb::options::FindOptions;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::db::mongo::Connector;
use crate::db::schemas::{ActivityDoc, ACTIVITY_COLLECTION};
use crate::types::Result;

/// Most-recent entries kept in memory when the database is unreachable;
/// the oldest entry is evicted first.
pub const ACTIVITY_BUFFER_CAP: usize = 100;

/// Audit action recorded on an activity entry
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    #[default]
    Create,
    Update,
    Delete,
    Complete,
}

/// Localized description for an audit entry
pub fn describe(action: ActivityAction, noun: &str, name: &str) -> String {
    match action {
        ActivityAction::Create => format!("تمت إضافة {}: {}", noun, name),
        ActivityAction::Update => format!("تم تحديث {}: {}", noun, name),
        ActivityAction::Delete => format!("تم حذف {}: {}", noun, name),
        ActivityAction::Complete => format!("تم إنجاز {}: {}", noun, name),
    }
}

/// Dual-path activity logger
pub struct ActivityLog {
    connector: Arc<Connector>,
    buffer: Mutex<VecDeque<ActivityDoc>>,
}

impl ActivityLog {
    pub fn new(connector: Arc<Connector>) -> Self {
        Self {
            connector,
            buffer: Mutex::new(VecDeque::new()),
        }
    }

    /// Record an entry on behalf of the system user.
    pub async fn log(&self, action: ActivityAction, entity: &str, description: String) {
        self.log_as(action, entity, description, "System").await;
    }

    /// Record an entry. Failures are swallowed: the audited operation has
    /// already succeeded and must not be failed by its audit trail.
    pub async fn log_as(&self, action: ActivityAction, entity: &str, description: String, user: &str) {
        let mut entry = ActivityDoc::new(action, entity, description, user);

        match self.insert_durable(&mut entry).await {
            Ok(()) => debug!(entity, ?action, "activity entry recorded"),
            Err(err) => {
                warn!("activity entry kept in memory only: {}", err);
                self.push_fallback(entry);
            }
        }
    }

    /// The `limit` most recent entries, newest first, from whichever store
    /// currently serves reads.
    pub async fn recent(&self, limit: i64) -> Vec<ActivityDoc> {
        match self.recent_durable(limit).await {
            Ok(entries) => entries,
            Err(err) => {
                warn!("database unreachable, serving in-memory activity feed: {}", err);
                self.fallback_snapshot(limit as usize)
            }
        }
    }

    async fn insert_durable(&self, entry: &mut ActivityDoc) -> Result<()> {
        let client = self.connector.get().await?;
        let collection = client.collection::<ActivityDoc>(ACTIVITY_COLLECTION).await?;
        collection.insert_one(entry).await?;
        Ok(())
    }

    async fn recent_durable(&self, limit: i64) -> Result<Vec<ActivityDoc>> {
        use futures::stream::StreamExt;

        let client = self.connector.get().await?;
        let collection = client.collection::<ActivityDoc>(ACTIVITY_COLLECTION).await?;

        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .limit(limit)
            .build();

        let mut cursor = collection
            .inner()
            .find(doc! {})
            .with_options(options)
            .await?;

        let mut entries = Vec::new();
        while let Some(result) = cursor.next().await {
            match result {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!("error reading activity entry: {}", e),
            }
        }
        Ok(entries)
    }

    /// The buffer is kept newest-first, capped at [`ACTIVITY_BUFFER_CAP`].
    fn push_fallback(&self, entry: ActivityDoc) {
        let mut buffer = self.buffer.lock().expect("activity lock poisoned");
        buffer.push_front(entry);
        buffer.truncate(ACTIVITY_BUFFER_CAP);
    }

    fn fallback_snapshot(&self, limit: usize) -> Vec<ActivityDoc> {
        let buffer = self.buffer.lock().expect("activity lock poisoned");
        buffer.iter().take(limit).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> ActivityLog {
        ActivityLog::new(Arc::new(Connector::new("mongodb://localhost:27017", "callboard_test")))
    }

    fn entry(description: &str) -> ActivityDoc {
        ActivityDoc::new(ActivityAction::Create, "Task", description.to_string(), "System")
    }

    #[test]
    fn test_action_serializes_screaming() {
        assert_eq!(
            serde_json::to_string(&ActivityAction::Complete).unwrap(),
            r#""COMPLETE""#
        );
        assert_eq!(
            serde_json::to_string(&ActivityAction::Create).unwrap(),
            r#""CREATE""#
        );
    }

    #[test]
    fn test_describe_is_localized() {
        let text = describe(ActivityAction::Create, "مهمة", "تسجيل الدرس");
        assert_eq!(text, "تمت إضافة مهمة: تسجيل الدرس");

        let text = describe(ActivityAction::Complete, "مهمة", "تسجيل الدرس");
        assert_eq!(text, "تم إنجاز مهمة: تسجيل الدرس");
    }

    #[test]
    fn test_buffer_caps_at_hundred_oldest_out() {
        let log = log();
        for i in 0..101 {
            log.push_fallback(entry(&format!("entry {}", i)));
        }

        let snapshot = log.fallback_snapshot(ACTIVITY_BUFFER_CAP + 10);
        assert_eq!(snapshot.len(), ACTIVITY_BUFFER_CAP);

        // Newest first; the oldest entry (0) was evicted
        assert_eq!(snapshot[0].description, "entry 100");
        assert_eq!(snapshot[99].description, "entry 1");
    }

    #[test]
    fn test_snapshot_limit() {
        let log = log();
        for i in 0..10 {
            log.push_fallback(entry(&format!("entry {}", i)));
        }

        let snapshot = log.fallback_snapshot(5);
        assert_eq!(snapshot.len(), 5);
        assert_eq!(snapshot[0].description, "entry 9");
    }
}
