//! Milestone document schema
//!
//! Timeline phases for the studio roadmap. Dates are `YYYY-MM-DD` strings
//! so lexicographic order is chronological order. At most one milestone is
//! expected to carry `isCurrent` at a time; storage does not enforce it.

use bson::Document;
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::{HasRecordId, Metadata, RecordId};
use crate::store::{fixtures, Entity, Patch};

/// Collection name for milestones
pub const MILESTONE_COLLECTION: &str = "milestones";

/// Milestone document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    #[serde(default)]
    pub metadata: Metadata,

    pub phase: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub start_date: String,

    #[serde(default)]
    pub end_date: String,

    #[serde(default)]
    pub is_complete: bool,

    #[serde(default)]
    pub is_current: bool,
}

/// Partial update payload for a milestone
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct MilestonePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_current: Option<bool>,
}

impl Patch<MilestoneDoc> for MilestonePatch {
    fn apply(&self, target: &mut MilestoneDoc) {
        if let Some(v) = &self.phase {
            target.phase = v.clone();
        }
        if let Some(v) = &self.description {
            target.description = v.clone();
        }
        if let Some(v) = &self.start_date {
            target.start_date = v.clone();
        }
        if let Some(v) = &self.end_date {
            target.end_date = v.clone();
        }
        if let Some(v) = self.is_complete {
            target.is_complete = v;
        }
        if let Some(v) = self.is_current {
            target.is_current = v;
        }
    }
}

impl HasRecordId for MilestoneDoc {
    fn record_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

impl IntoIndexes for MilestoneDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![]
    }
}

impl MutMetadata for MilestoneDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

impl Entity for MilestoneDoc {
    type Patch = MilestonePatch;

    const COLLECTION: &'static str = MILESTONE_COLLECTION;
    const KIND: &'static str = "Milestone";
    const NOUN: &'static str = "مرحلة";

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn display_name(&self) -> String {
        self.phase.clone()
    }

    fn validate(&self) -> Result<(), String> {
        if self.phase.trim().is_empty() {
            return Err("phase is required".to_string());
        }
        Ok(())
    }

    fn fixtures() -> Vec<Self> {
        fixtures::milestones()
    }
}
