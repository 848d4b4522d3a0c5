//! Document schemas for the dashboard collections.
//!
//! Each entity lives in its own collection. Enumerated fields are Rust
//! enums whose canonical serde name is the Arabic label shown in the
//! dashboard; legacy English labels are accepted on read via serde
//! aliases, which is what keeps pre-migration documents displaying
//! correctly (see `migration`).

pub mod activity;
pub mod asset;
pub mod competitor;
pub mod expense;
pub mod idea;
pub mod metadata;
pub mod milestone;
pub mod settings;
pub mod task;

pub use activity::{ActivityDoc, ACTIVITY_COLLECTION};
pub use asset::{AssetCategory, AssetDoc, AssetStatus, ASSET_COLLECTION};
pub use competitor::{CompetitorDoc, COMPETITOR_COLLECTION};
pub use expense::{ExpenseDoc, ExpenseStatus, EXPENSE_COLLECTION};
pub use idea::{IdeaDoc, IDEA_COLLECTION};
pub use metadata::Metadata;
pub use milestone::{MilestoneDoc, MILESTONE_COLLECTION};
pub use settings::{SettingsDoc, SettingsPatch, SETTINGS_COLLECTION, SETTINGS_KEY};
pub use task::{TaskDoc, TaskPriority, TaskStatus, TASK_COLLECTION};

use bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Document key: either a store-assigned ObjectId or a string key
/// (synthetic degraded-mode keys and legacy fixture identifiers).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum RecordId {
    Oid(ObjectId),
    Key(String),
}

impl RecordId {
    /// Opaque string form used in API responses and lookups
    pub fn as_string(&self) -> String {
        match self {
            Self::Oid(oid) => oid.to_hex(),
            Self::Key(key) => key.clone(),
        }
    }

    /// Whether this key matches an identifier supplied by a caller
    pub fn matches(&self, id: &str) -> bool {
        match self {
            Self::Oid(oid) => oid.to_hex() == id,
            Self::Key(key) => key == id,
        }
    }

    /// Build a `_id` filter that works with either an ObjectId hex string
    /// or a raw string key.
    pub fn filter(id: &str) -> Document {
        if let Ok(oid) = ObjectId::parse_str(id) {
            doc! { "_id": oid }
        } else {
            doc! { "_id": id }
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

/// Documents that carry a `RecordId` primary key.
pub trait HasRecordId {
    fn record_id(&self) -> Option<&RecordId>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_filter_parses_object_ids() {
        let hex = "507f1f77bcf86cd799439011";
        let filter = RecordId::filter(hex);
        assert!(filter.get_object_id("_id").is_ok());

        let filter = RecordId::filter("1723-ab12cd34");
        assert_eq!(filter.get_str("_id").unwrap(), "1723-ab12cd34");
    }

    #[test]
    fn test_record_id_matches_either_form() {
        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        assert!(RecordId::Oid(oid).matches("507f1f77bcf86cd799439011"));
        assert!(RecordId::Key("3".into()).matches("3"));
        assert!(!RecordId::Key("3".into()).matches("4"));
    }

    #[test]
    fn test_record_id_deserializes_untagged() {
        let from_key: RecordId = bson::from_bson(bson::Bson::String("legacy-7".into())).unwrap();
        assert_eq!(from_key, RecordId::Key("legacy-7".into()));

        let oid = ObjectId::new();
        let from_oid: RecordId = bson::from_bson(bson::Bson::ObjectId(oid)).unwrap();
        assert_eq!(from_oid, RecordId::Oid(oid));
    }
}
