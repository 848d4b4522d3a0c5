//! Cross-database copy: clone the dashboard collections from one MongoDB
//! deployment into another.
//!
//! Copies are insert-if-absent by `_id`: a document already present at
//! the target is never overwritten, so repeated runs converge to
//! `skipped = found` without corrupting anything. Preconditions are
//! checked before any write, and a violation aborts the whole run with
//! no partial effect.

use bson::{doc, Document};
use serde::Serialize;
use tracing::info;

use crate::db::mongo::MongoClient;
use crate::types::{CallboardError, Result};

/// Collections copied, in order
pub const COPY_COLLECTIONS: &[&str] = &[
    "tasks",
    "assets",
    "expenses",
    "milestones",
    "ideas",
    "competitors",
    "settings",
    "activities",
];

pub struct CopyConfig {
    pub source_uri: String,
    pub target_uri: String,
    /// Database name the source URI must resolve to
    pub source_db: String,
    /// Database name the target URI must resolve to
    pub target_db: String,
}

impl CopyConfig {
    /// Connection-free checks, run before anything is opened.
    pub fn check_preconditions(&self) -> Result<()> {
        if self.source_uri == self.target_uri {
            return Err(CallboardError::Validation(
                "source and target URIs are identical; refusing to copy a database into itself"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-collection copy outcome
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionOutcome {
    pub collection: String,
    pub found: u64,
    pub upserted: u64,
    pub skipped: u64,
}

/// Copy every collection from source to target.
///
/// Opens two independent connections rather than the process-wide cached
/// handle, keeping source and target pools separate.
pub async fn run(config: &CopyConfig) -> Result<Vec<CollectionOutcome>> {
    config.check_preconditions()?;

    let source_name = resolved_db_name(&config.source_uri).await?;
    if source_name.as_deref() != Some(config.source_db.as_str()) {
        return Err(CallboardError::Validation(format!(
            "source URI resolves to database {:?}, expected '{}'",
            source_name, config.source_db
        )));
    }

    let target_name = resolved_db_name(&config.target_uri).await?;
    if target_name.as_deref() != Some(config.target_db.as_str()) {
        return Err(CallboardError::Validation(format!(
            "target URI resolves to database {:?}, expected '{}'",
            target_name, config.target_db
        )));
    }

    let source = MongoClient::new(&config.source_uri, &config.source_db).await?;
    let target = MongoClient::new(&config.target_uri, &config.target_db).await?;

    let mut outcomes = Vec::with_capacity(COPY_COLLECTIONS.len());
    for name in COPY_COLLECTIONS {
        outcomes.push(copy_collection(&source, &target, name).await?);
    }

    Ok(outcomes)
}

/// Database name a URI resolves to, from its connection-string path.
async fn resolved_db_name(uri: &str) -> Result<Option<String>> {
    let options = mongodb::options::ClientOptions::parse(uri)
        .await
        .map_err(CallboardError::from)?;
    Ok(options.default_database)
}

async fn copy_collection(
    source: &MongoClient,
    target: &MongoClient,
    name: &str,
) -> Result<CollectionOutcome> {
    use futures_util::StreamExt;
    use mongodb::options::UpdateOptions;

    let source_collection = source
        .inner()
        .database(source.db_name())
        .collection::<Document>(name);
    let target_collection = target
        .inner()
        .database(target.db_name())
        .collection::<Document>(name);

    let mut cursor = source_collection.find(doc! {}).await?;

    let mut found = 0u64;
    let mut upserted = 0u64;
    let mut skipped = 0u64;

    while let Some(next) = cursor.next().await {
        let document = next?;
        found += 1;

        let Some(id) = document.get("_id") else {
            skipped += 1;
            continue;
        };

        // Insert-if-absent: the whole document lands only when the id is
        // new at the target; matches are left untouched.
        let result = target_collection
            .update_one(
                doc! { "_id": id.clone() },
                doc! { "$setOnInsert": document.clone() },
            )
            .with_options(UpdateOptions::builder().upsert(true).build())
            .await?;

        if result.upserted_id.is_some() {
            upserted += 1;
        } else {
            skipped += 1;
        }
    }

    info!(collection = name, found, upserted, skipped, "collection copied");

    Ok(CollectionOutcome {
        collection: name.to_string(),
        found,
        upserted,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_uris_refused() {
        let config = CopyConfig {
            source_uri: "mongodb://host:27017/callboard".into(),
            target_uri: "mongodb://host:27017/callboard".into(),
            source_db: "callboard".into(),
            target_db: "callboard".into(),
        };
        let err = config.check_preconditions().unwrap_err();
        assert!(matches!(err, CallboardError::Validation(_)));
    }

    #[test]
    fn test_distinct_uris_pass_preconditions() {
        let config = CopyConfig {
            source_uri: "mongodb://dev:27017/callboard_dev".into(),
            target_uri: "mongodb://prod:27017/callboard".into(),
            source_db: "callboard_dev".into(),
            target_db: "callboard".into(),
        };
        assert!(config.check_preconditions().is_ok());
    }

    #[test]
    fn test_all_dashboard_collections_covered() {
        assert_eq!(COPY_COLLECTIONS.len(), 8);
        assert!(COPY_COLLECTIONS.contains(&"settings"));
        assert!(COPY_COLLECTIONS.contains(&"activities"));
    }
}
