//! Competitor document schema
//!
//! Research notes on competing studios and platforms. Early documents
//! wrote the logo under `logo`; newer ones use `logoUrl` (alias on read).

use bson::Document;
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::{HasRecordId, Metadata, RecordId};
use crate::store::{fixtures, Entity, Patch};

/// Collection name for competitors
pub const COMPETITOR_COLLECTION: &str = "competitors";

/// Competitor document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    #[serde(default)]
    pub metadata: Metadata,

    pub name: String,

    #[serde(default, alias = "logo")]
    pub logo_url: String,

    #[serde(default)]
    pub strengths: Vec<String>,

    #[serde(default)]
    pub weaknesses: Vec<String>,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub rich_notes: String,

    #[serde(default)]
    pub images: Vec<String>,
}

/// Partial update payload for a competitor
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, alias = "logo", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strengths: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weaknesses: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rich_notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl Patch<CompetitorDoc> for CompetitorPatch {
    fn apply(&self, target: &mut CompetitorDoc) {
        if let Some(v) = &self.name {
            target.name = v.clone();
        }
        if let Some(v) = &self.logo_url {
            target.logo_url = v.clone();
        }
        if let Some(v) = &self.strengths {
            target.strengths = v.clone();
        }
        if let Some(v) = &self.weaknesses {
            target.weaknesses = v.clone();
        }
        if let Some(v) = &self.url {
            target.url = v.clone();
        }
        if let Some(v) = &self.rich_notes {
            target.rich_notes = v.clone();
        }
        if let Some(v) = &self.images {
            target.images = v.clone();
        }
    }
}

impl HasRecordId for CompetitorDoc {
    fn record_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

impl IntoIndexes for CompetitorDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![]
    }
}

impl MutMetadata for CompetitorDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

impl Entity for CompetitorDoc {
    type Patch = CompetitorPatch;

    const COLLECTION: &'static str = COMPETITOR_COLLECTION;
    const KIND: &'static str = "Competitor";
    const NOUN: &'static str = "منافس";

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        Ok(())
    }

    fn fixtures() -> Vec<Self> {
        fixtures::competitors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_logo_field_accepted() {
        let doc: CompetitorDoc =
            serde_json::from_str(r#"{"name": "منصة تدرب", "logo": "https://x.test/l.png"}"#)
                .unwrap();
        assert_eq!(doc.logo_url, "https://x.test/l.png");
    }
}
