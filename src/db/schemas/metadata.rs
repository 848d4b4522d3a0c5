//! Common metadata for all documents
//!
//! Tracks creation and update timestamps. Stored as RFC 3339 strings so
//! the values read back exactly as the API serves them and still sort
//! chronologically.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Common metadata for all documents
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// When the document was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the document was last updated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Create new metadata with current timestamp
    pub fn new() -> Self {
        Self {
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    /// Stamp both timestamps, as on first insert
    pub fn stamp_created(&mut self) {
        self.created_at = Some(Utc::now());
        self.updated_at = Some(Utc::now());
    }

    /// Stamp the update timestamp only
    pub fn stamp_updated(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
