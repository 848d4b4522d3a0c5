//! Expense document schema
//!
//! Recurring and one-off spending. Category is free-form text
//! (historically برمجيات / مرافق / أخرى); only status is enumerated.

use bson::Document;
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::{HasRecordId, Metadata, RecordId};
use crate::store::{fixtures, Entity, Patch};

/// Collection name for expenses
pub const EXPENSE_COLLECTION: &str = "expenses";

/// Expense status
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExpenseStatus {
    #[default]
    #[serde(rename = "نشط")]
    Active,

    #[serde(rename = "متوقف")]
    Paused,

    #[serde(rename = "ملغي")]
    Cancelled,
}

/// Expense document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    #[serde(default)]
    pub metadata: Metadata,

    pub name: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub amount: f64,

    #[serde(default)]
    pub status: ExpenseStatus,

    #[serde(default)]
    pub note: String,
}

/// Partial update payload for an expense
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ExpenseStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Patch<ExpenseDoc> for ExpensePatch {
    fn apply(&self, target: &mut ExpenseDoc) {
        if let Some(v) = &self.name {
            target.name = v.clone();
        }
        if let Some(v) = &self.category {
            target.category = v.clone();
        }
        if let Some(v) = self.amount {
            target.amount = v;
        }
        if let Some(v) = self.status {
            target.status = v;
        }
        if let Some(v) = &self.note {
            target.note = v.clone();
        }
    }
}

impl HasRecordId for ExpenseDoc {
    fn record_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

impl IntoIndexes for ExpenseDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![]
    }
}

impl MutMetadata for ExpenseDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

impl Entity for ExpenseDoc {
    type Patch = ExpensePatch;

    const COLLECTION: &'static str = EXPENSE_COLLECTION;
    const KIND: &'static str = "Expense";
    const NOUN: &'static str = "مصروف";

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
        if self.amount < 0.0 {
            return Err("amount must not be negative".to_string());
        }
        Ok(())
    }

    fn fixtures() -> Vec<Self> {
        fixtures::expenses()
    }
}
