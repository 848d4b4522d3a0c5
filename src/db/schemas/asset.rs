//! Asset document schema
//!
//! Equipment and purchases tracked by the studio: what to buy, what has
//! been ordered, and what has arrived.

use bson::Document;
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::{HasRecordId, Metadata, RecordId};
use crate::store::{fixtures, Entity, Patch};

/// Collection name for assets
pub const ASSET_COLLECTION: &str = "assets";

/// Asset category
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AssetCategory {
    #[default]
    #[serde(rename = "إنتاج")]
    Production,

    #[serde(rename = "بنية تحتية")]
    Infrastructure,

    #[serde(rename = "إلكترونيات")]
    Electronics,

    #[serde(rename = "تراخيص")]
    Licenses,

    #[serde(rename = "أثاث")]
    Furniture,
}

/// Purchase status
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AssetStatus {
    #[default]
    #[serde(rename = "للشراء")]
    ToBuy,

    #[serde(rename = "تم الطلب")]
    Ordered,

    #[serde(rename = "تم الاستلام")]
    Received,
}

/// Asset document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssetDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    #[serde(default)]
    pub metadata: Metadata,

    pub name: String,

    #[serde(default)]
    pub category: AssetCategory,

    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub status: AssetStatus,

    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub note: String,
}

/// Partial update payload for an asset
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<AssetCategory>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Patch<AssetDoc> for AssetPatch {
    fn apply(&self, target: &mut AssetDoc) {
        if let Some(v) = &self.name {
            target.name = v.clone();
        }
        if let Some(v) = self.category {
            target.category = v;
        }
        if let Some(v) = self.price {
            target.price = v;
        }
        if let Some(v) = self.status {
            target.status = v;
        }
        if let Some(v) = &self.owner {
            target.owner = v.clone();
        }
        if let Some(v) = &self.note {
            target.note = v.clone();
        }
    }
}

impl HasRecordId for AssetDoc {
    fn record_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

impl IntoIndexes for AssetDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![]
    }
}

impl MutMetadata for AssetDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

impl Entity for AssetDoc {
    type Patch = AssetPatch;

    const COLLECTION: &'static str = ASSET_COLLECTION;
    const KIND: &'static str = "Asset";
    const NOUN: &'static str = "أصل";

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
        if self.price < 0.0 {
            return Err("price must not be negative".to_string());
        }
        Ok(())
    }

    fn fixtures() -> Vec<Self> {
        fixtures::assets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_price_rejected() {
        let asset = AssetDoc {
            name: "كاميرا".into(),
            price: -1.0,
            ..Default::default()
        };
        assert!(asset.validate().is_err());
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(serde_json::from_str::<AssetCategory>(r#""ديكور""#).is_err());
    }
}
