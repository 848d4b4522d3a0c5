//! Settings document schema
//!
//! A singleton document keyed by a fixed constant and maintained by
//! upsert, holding the studio's budget and launch planning numbers.

use bson::{doc, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::{HasRecordId, Metadata, RecordId};

/// Collection name for settings
pub const SETTINGS_COLLECTION: &str = "settings";

/// Fixed key of the singleton document
pub const SETTINGS_KEY: &str = "studio-settings";

/// Settings document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    #[serde(default)]
    pub metadata: Metadata,

    pub key: String,

    #[serde(default)]
    pub total_budget: f64,

    #[serde(default)]
    pub launch_date: String,

    #[serde(default)]
    pub revenue_per_student: f64,
}

impl SettingsDoc {
    /// Baseline document returned before the first PUT
    pub fn defaults() -> Self {
        Self {
            id: None,
            metadata: Metadata::default(),
            key: SETTINGS_KEY.to_string(),
            total_budget: 0.0,
            launch_date: String::new(),
            revenue_per_student: 0.0,
        }
    }
}

/// Partial settings update.
///
/// Built from a raw JSON body: fields of the wrong type (or an empty
/// launch date) are silently ignored rather than rejected, so a sloppy
/// client can never wipe a number with a string.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_budget: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_per_student: Option<f64>,
}

impl SettingsPatch {
    pub fn from_json(body: &serde_json::Value) -> Self {
        Self {
            total_budget: body.get("totalBudget").and_then(|v| v.as_f64()),
            launch_date: body
                .get("launchDate")
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            revenue_per_student: body.get("revenuePerStudent").and_then(|v| v.as_f64()),
        }
    }

    /// Fields to `$set` on the singleton
    pub fn set_document(&self) -> Document {
        let mut set = doc! {};
        if let Some(v) = self.total_budget {
            set.insert("totalBudget", v);
        }
        if let Some(v) = &self.launch_date {
            set.insert("launchDate", v.as_str());
        }
        if let Some(v) = self.revenue_per_student {
            set.insert("revenuePerStudent", v);
        }
        set
    }

    pub fn apply(&self, target: &mut SettingsDoc) {
        if let Some(v) = self.total_budget {
            target.total_budget = v;
        }
        if let Some(v) = &self.launch_date {
            target.launch_date = v.clone();
        }
        if let Some(v) = self.revenue_per_student {
            target.revenue_per_student = v;
        }
    }
}

impl HasRecordId for SettingsDoc {
    fn record_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

impl IntoIndexes for SettingsDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "key": 1 },
            Some(
                IndexOptions::builder()
                    .unique(true)
                    .name("key_unique".to_string())
                    .build(),
            ),
        )]
    }
}

impl MutMetadata for SettingsDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrong_types_silently_ignored() {
        let patch = SettingsPatch::from_json(&json!({
            "totalBudget": "a lot",
            "launchDate": 2026,
            "revenuePerStudent": 250.0
        }));
        assert!(patch.total_budget.is_none());
        assert!(patch.launch_date.is_none());
        assert_eq!(patch.revenue_per_student, Some(250.0));
    }

    #[test]
    fn test_empty_launch_date_ignored() {
        let patch = SettingsPatch::from_json(&json!({ "launchDate": "" }));
        assert!(patch.launch_date.is_none());
    }

    #[test]
    fn test_apply_is_partial() {
        let mut settings = SettingsDoc::defaults();
        settings.total_budget = 50000.0;
        settings.launch_date = "2026-09-01".into();

        let patch = SettingsPatch::from_json(&json!({ "totalBudget": 75000.0 }));
        patch.apply(&mut settings);

        assert_eq!(settings.total_budget, 75000.0);
        assert_eq!(settings.launch_date, "2026-09-01");
    }
}
