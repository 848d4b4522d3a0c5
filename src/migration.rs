//! One-shot normalization of legacy task labels.
//!
//! The first version of the dashboard stored task status and priority as
//! English slugs. The canonical values are the Arabic labels, and this
//! routine rewrites the legacy values in place with one conditional bulk
//! update per mapping. Running it twice is safe: after the first run no
//! document matches a legacy value, so the second run reports zero
//! modifications.
//!
//! Reads do not depend on this having run: the schema enums accept the
//! legacy slugs as serde aliases, so lists display canonical labels
//! without persisting the change.

use bson::{doc, Document};
use serde::Serialize;
use tracing::info;

use crate::db::mongo::Connector;
use crate::db::schemas::TASK_COLLECTION;
use crate::types::{CallboardError, Result};

/// (field, legacy value, canonical value)
pub const LABEL_MIGRATIONS: [(&str, &str, &str); 6] = [
    ("status", "pending", "قيد الانتظار"),
    ("status", "in-progress", "قيد التنفيذ"),
    ("status", "completed", "مكتملة"),
    ("priority", "high", "عالية"),
    ("priority", "medium", "متوسطة"),
    ("priority", "low", "منخفضة"),
];

/// Outcome of a migration run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    /// Total modified-document count summed over all six mappings
    pub updated_fields: u64,

    /// Task documents in the collection after the run
    pub total_tasks: u64,
}

/// Rewrite legacy labels on the task collection.
///
/// This is a write-intent operation: an unreachable store is an error,
/// never a silent fallback, so the caller is not told a requested
/// migration succeeded when nothing was written.
pub async fn migrate_task_labels(connector: &Connector) -> Result<MigrationReport> {
    let client = connector
        .get()
        .await
        .map_err(|e| CallboardError::Migration(e.to_string()))?;

    let collection = client
        .inner()
        .database(client.db_name())
        .collection::<Document>(TASK_COLLECTION);

    let mut updated_fields = 0;
    for (field, legacy, canonical) in LABEL_MIGRATIONS {
        let mut filter = Document::new();
        filter.insert(field, legacy);

        let mut fields = Document::new();
        fields.insert(field, canonical);

        let result = collection
            .update_many(filter, doc! { "$set": fields })
            .await
            .map_err(|e| CallboardError::Migration(e.to_string()))?;

        updated_fields += result.modified_count;
    }

    let total_tasks = collection
        .count_documents(doc! {})
        .await
        .map_err(|e| CallboardError::Migration(e.to_string()))?;

    info!(updated_fields, total_tasks, "task label migration finished");

    Ok(MigrationReport {
        updated_fields,
        total_tasks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schemas::{TaskPriority, TaskStatus};
    use serde_json::json;

    #[test]
    fn test_mappings_cover_both_fields() {
        assert_eq!(
            LABEL_MIGRATIONS.iter().filter(|(f, _, _)| *f == "status").count(),
            3
        );
        assert_eq!(
            LABEL_MIGRATIONS.iter().filter(|(f, _, _)| *f == "priority").count(),
            3
        );
    }

    #[test]
    fn test_canonical_values_match_schema_enums() {
        // The migration writes exactly what the enums serialize to, so a
        // migrated document round-trips through the typed schema.
        for (field, legacy, canonical) in LABEL_MIGRATIONS {
            let canonical_json = json!(canonical);
            if field == "status" {
                let parsed: TaskStatus = serde_json::from_str(&format!("\"{}\"", legacy)).unwrap();
                assert_eq!(serde_json::to_value(parsed).unwrap(), canonical_json);
            } else {
                let parsed: TaskPriority =
                    serde_json::from_str(&format!("\"{}\"", legacy)).unwrap();
                assert_eq!(serde_json::to_value(parsed).unwrap(), canonical_json);
            }
        }
    }

    #[test]
    fn test_no_legacy_value_is_canonical() {
        // Idempotency rests on the rewrite removing every match: a legacy
        // value that equals some canonical value would keep matching.
        for (_, legacy, _) in LABEL_MIGRATIONS {
            assert!(LABEL_MIGRATIONS.iter().all(|(_, _, canonical)| legacy != *canonical));
        }
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = MigrationReport {
            updated_fields: 4,
            total_tasks: 9,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value, json!({ "updatedFields": 4, "totalTasks": 9 }));
    }
}
