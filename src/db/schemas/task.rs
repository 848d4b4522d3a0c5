//! Task document schema
//!
//! The studio to-do board. Status and priority carry the canonical Arabic
//! labels; the English labels written by the first version of the
//! dashboard are still accepted on read (serde aliases) and rewritten in
//! place by the label migration.

use bson::{doc, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::activity::ActivityAction;
use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::{HasRecordId, Metadata, RecordId};
use crate::store::{fixtures, Entity, Patch};

/// Collection name for tasks
pub const TASK_COLLECTION: &str = "tasks";

/// Task status, canonical Arabic labels
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "قيد الانتظار", alias = "pending")]
    Pending,

    #[serde(rename = "قيد التنفيذ", alias = "in-progress")]
    InProgress,

    #[serde(rename = "مكتملة", alias = "completed")]
    Done,
}

/// Task priority, canonical Arabic labels
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TaskPriority {
    #[serde(rename = "عالية", alias = "high")]
    High,

    #[default]
    #[serde(rename = "متوسطة", alias = "medium")]
    Medium,

    #[serde(rename = "منخفضة", alias = "low")]
    Low,
}

/// Task document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    #[serde(default)]
    pub metadata: Metadata,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default)]
    pub priority: TaskPriority,

    #[serde(default)]
    pub assignee: String,
}

/// Partial update payload for a task
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

impl Patch<TaskDoc> for TaskPatch {
    fn apply(&self, target: &mut TaskDoc) {
        if let Some(v) = &self.title {
            target.title = v.clone();
        }
        if let Some(v) = &self.description {
            target.description = v.clone();
        }
        if let Some(v) = self.status {
            target.status = v;
        }
        if let Some(v) = self.priority {
            target.priority = v;
        }
        if let Some(v) = &self.assignee {
            target.assignee = v.clone();
        }
    }
}

/// Derive the audit action for a task update.
///
/// COMPLETE is a derived classification of the status transition, not a
/// stored field: it applies only when the status moves into Done from a
/// different previous value.
pub fn classify_status_change(before: TaskStatus, after: TaskStatus) -> ActivityAction {
    if after == TaskStatus::Done && before != TaskStatus::Done {
        ActivityAction::Complete
    } else {
        ActivityAction::Update
    }
}

impl HasRecordId for TaskDoc {
    fn record_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

impl IntoIndexes for TaskDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "status": 1 },
            Some(IndexOptions::builder().name("status_index".to_string()).build()),
        )]
    }
}

impl MutMetadata for TaskDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

impl Entity for TaskDoc {
    type Patch = TaskPatch;

    const COLLECTION: &'static str = TASK_COLLECTION;
    const KIND: &'static str = "Task";
    const NOUN: &'static str = "مهمة";

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

    fn fixtures() -> Vec<Self> {
        fixtures::tasks()
    }

    fn classify_update(before: &Self, after: &Self) -> ActivityAction {
        classify_status_change(before.status, after.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_transition_into_done() {
        assert_eq!(
            classify_status_change(TaskStatus::Pending, TaskStatus::Done),
            ActivityAction::Complete
        );
        assert_eq!(
            classify_status_change(TaskStatus::InProgress, TaskStatus::Done),
            ActivityAction::Complete
        );
    }

    #[test]
    fn test_classify_other_updates() {
        assert_eq!(
            classify_status_change(TaskStatus::Done, TaskStatus::Done),
            ActivityAction::Update
        );
        assert_eq!(
            classify_status_change(TaskStatus::Done, TaskStatus::Pending),
            ActivityAction::Update
        );
        assert_eq!(
            classify_status_change(TaskStatus::Pending, TaskStatus::InProgress),
            ActivityAction::Update
        );
    }

    #[test]
    fn test_legacy_labels_normalize_on_read() {
        // Legacy English values deserialize into the same variants as the
        // canonical Arabic labels, so lists display correctly even before
        // the migration has rewritten the documents.
        let legacy: TaskStatus = serde_json::from_str(r#""in-progress""#).unwrap();
        assert_eq!(legacy, TaskStatus::InProgress);
        assert_eq!(serde_json::to_string(&legacy).unwrap(), r#""قيد التنفيذ""#);

        let legacy: TaskPriority = serde_json::from_str(r#""high""#).unwrap();
        assert_eq!(legacy, TaskPriority::High);
        assert_eq!(serde_json::to_string(&legacy).unwrap(), r#""عالية""#);
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(serde_json::from_str::<TaskStatus>(r#""urgent""#).is_err());
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut task = TaskDoc {
            title: "تجهيز الاستوديو".into(),
            status: TaskStatus::Pending,
            assignee: "سارة".into(),
            ..Default::default()
        };

        let patch: TaskPatch = serde_json::from_str(r#"{"status": "مكتملة"}"#).unwrap();
        patch.apply(&mut task);

        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.title, "تجهيز الاستوديو");
        assert_eq!(task.assignee, "سارة");
    }

    #[test]
    fn test_empty_patch_serializes_to_nothing() {
        let patch = TaskPatch::default();
        let set = bson::to_document(&patch).unwrap();
        assert!(set.is_empty());
    }
}
