//! Idea document schema
//!
//! Strategy notes pinned to the dashboard. `createdAt` defaults to the
//! moment of creation when the client omits it.

use bson::Document;
use chrono::{DateTime, Utc};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::{HasRecordId, Metadata, RecordId};
use crate::store::{fixtures, Entity, Patch};

/// Collection name for ideas
pub const IDEA_COLLECTION: &str = "ideas";

/// Idea document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct IdeaDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    #[serde(default)]
    pub metadata: Metadata,

    pub title: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub color: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Partial update payload for an idea
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct IdeaPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Patch<IdeaDoc> for IdeaPatch {
    fn apply(&self, target: &mut IdeaDoc) {
        if let Some(v) = &self.title {
            target.title = v.clone();
        }
        if let Some(v) = &self.content {
            target.content = v.clone();
        }
        if let Some(v) = &self.category {
            target.category = v.clone();
        }
        if let Some(v) = &self.color {
            target.color = v.clone();
        }
    }
}

impl HasRecordId for IdeaDoc {
    fn record_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

impl IntoIndexes for IdeaDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![]
    }
}

impl MutMetadata for IdeaDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

impl Entity for IdeaDoc {
    type Patch = IdeaPatch;

    const COLLECTION: &'static str = IDEA_COLLECTION;
    const KIND: &'static str = "Idea";
    const NOUN: &'static str = "فكرة";

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn display_name(&self) -> String {
        self.title.clone()
    }

    fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is required".to_string());
        }
        Ok(())
    }

    fn prepare_insert(&mut self) {
        if self.created_at.is_none() {
            self.created_at = Some(Utc::now());
        }
    }

    fn fixtures() -> Vec<Self> {
        fixtures::ideas()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_at_defaults_on_insert() {
        let mut idea = IdeaDoc {
            title: "قناة يوتيوب".into(),
            ..Default::default()
        };
        assert!(idea.created_at.is_none());
        idea.prepare_insert();
        assert!(idea.created_at.is_some());

        // An explicit createdAt is preserved
        let stamp = idea.created_at;
        idea.prepare_insert();
        assert_eq!(idea.created_at, stamp);
    }
}
