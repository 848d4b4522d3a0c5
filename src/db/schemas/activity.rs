//! Activity document schema
//!
//! Append-only audit trail. Entries reference other records only by the
//! localized description text, never by foreign key.

use bson::{doc, Document};
use chrono::{DateTime, Utc};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::activity::ActivityAction;
use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::{HasRecordId, Metadata, RecordId};

/// Collection name for activities
pub const ACTIVITY_COLLECTION: &str = "activities";

/// Activity document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    #[serde(default)]
    pub metadata: Metadata,

    pub action: ActivityAction,

    /// Entity type name, e.g. "Task"
    pub entity: String,

    /// Localized human-readable description
    pub description: String,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_user() -> String {
    "System".to_string()
}

impl ActivityDoc {
    pub fn new(action: ActivityAction, entity: &str, description: String, user: &str) -> Self {
        Self {
            id: None,
            metadata: Metadata::new(),
            action,
            entity: entity.to_string(),
            description,
            user: user.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}

impl HasRecordId for ActivityDoc {
    fn record_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

impl IntoIndexes for ActivityDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "createdAt": -1 },
            Some(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            ),
        )]
    }
}

impl MutMetadata for ActivityDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}
