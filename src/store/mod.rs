//! Repositories and the dual-path persistence policy.
//!
//! Every entity is served by two interchangeable repositories behind the
//! same interface: [`MongoRepository`] (durable) and [`MemoryRepository`]
//! (process-lifetime, fixture-seeded). [`DualStore`] composes them
//! explicitly: try the durable store; on a connection error and outside
//! production, retry the in-memory store. In production there is no
//! in-memory fallback: reads fail soft with empty results and writes
//! fail loud, so a real outage is never masked by fabricated success.
//!
//! The two stores are intentionally never reconciled: records written in
//! degraded mode stay in memory even if the database comes back, and a
//! process restart resets the in-memory store to its fixture baseline.

pub mod durable;
pub mod fixtures;
pub mod memory;
pub mod settings;

pub use durable::MongoRepository;
pub use memory::MemoryRepository;
pub use settings::SettingsStore;

use async_trait::async_trait;
use bson::Document;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::warn;

use crate::activity::ActivityAction;
use crate::db::mongo::{Connector, IntoIndexes, MutMetadata};
use crate::db::schemas::{HasRecordId, RecordId};
use crate::types::{CallboardError, Result};

/// A dashboard entity with its own collection and CRUD surface.
pub trait Entity:
    Serialize
    + DeserializeOwned
    + Clone
    + Debug
    + Default
    + Unpin
    + Send
    + Sync
    + HasRecordId
    + IntoIndexes
    + MutMetadata
    + 'static
{
    /// Partial-update payload; absent fields are left untouched.
    type Patch: Patch<Self> + Serialize + DeserializeOwned + Send + Sync;

    const COLLECTION: &'static str;

    /// Entity type name recorded on activity entries, e.g. "Task"
    const KIND: &'static str;

    /// Localized noun used in activity descriptions
    const NOUN: &'static str;

    fn set_id(&mut self, id: RecordId);

    /// Name shown in audit descriptions
    fn display_name(&self) -> String;

    fn validate(&self) -> std::result::Result<(), String> {
        Ok(())
    }

    /// Hook run before first persistence (e.g. defaulting timestamps)
    fn prepare_insert(&mut self) {}

    /// Static records seeding the in-memory degraded store
    fn fixtures() -> Vec<Self>;

    /// Audit action for an update, derived from both snapshots
    fn classify_update(_before: &Self, _after: &Self) -> ActivityAction {
        ActivityAction::Update
    }
}

/// Shallow partial update applied over an existing record.
pub trait Patch<E> {
    fn apply(&self, target: &mut E);
}

/// Fields a patch would `$set`, serialized shallowly. An empty document
/// means the patch carries no changes.
pub fn set_document<P: Serialize>(patch: &P) -> Result<Document> {
    bson::to_document(patch).map_err(|e| CallboardError::Validation(e.to_string()))
}

/// Uniform read/write interface over durable and in-memory storage.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn list(&self) -> Result<Vec<E>>;

    async fn get(&self, id: &str) -> Result<Option<E>>;

    async fn insert(&self, doc: E) -> Result<E>;

    /// Returns the (before, after) snapshots, or None if the id does not
    /// resolve to a record.
    async fn update(&self, id: &str, patch: &E::Patch) -> Result<Option<(E, E)>>;

    /// Returns the removed record, or None if the id does not resolve.
    async fn delete(&self, id: &str) -> Result<Option<E>>;
}

/// Durable-first store with an explicit degraded-mode branch.
pub struct DualStore<E: Entity> {
    durable: MongoRepository<E>,
    degraded: MemoryRepository<E>,
    production: bool,
}

impl<E: Entity> DualStore<E> {
    pub fn new(connector: Arc<Connector>, production: bool) -> Self {
        Self {
            durable: MongoRepository::new(connector),
            degraded: MemoryRepository::new(),
            production,
        }
    }

    /// List all records. In production an unreachable database yields an
    /// empty list rather than fixture data.
    pub async fn list(&self) -> Result<Vec<E>> {
        match self.durable.list().await {
            Ok(docs) => Ok(docs),
            Err(err) if err.is_connection() && self.production => {
                warn!(collection = E::COLLECTION, "database unreachable, returning empty list: {}", err);
                Ok(Vec::new())
            }
            Err(err) if err.is_connection() => {
                warn!(collection = E::COLLECTION, "database unreachable, serving in-memory records: {}", err);
                self.degraded.list().await
            }
            Err(err) => Err(err),
        }
    }

    /// Create a record. In production a connection failure surfaces to the
    /// caller instead of fabricating a persisted write.
    pub async fn create(&self, doc: E) -> Result<E> {
        match self.durable.insert(doc.clone()).await {
            Ok(stored) => Ok(stored),
            Err(err) if err.is_connection() && !self.production => {
                warn!(collection = E::COLLECTION, "database unreachable, writing to in-memory store: {}", err);
                self.degraded.insert(doc).await
            }
            Err(err) => Err(err),
        }
    }

    /// Apply a partial update, returning (before, after) snapshots.
    pub async fn update(&self, id: &str, patch: &E::Patch) -> Result<(E, E)> {
        let outcome = match self.durable.update(id, patch).await {
            Ok(v) => v,
            Err(err) if err.is_connection() && !self.production => {
                warn!(collection = E::COLLECTION, "database unreachable, updating in-memory store: {}", err);
                self.degraded.update(id, patch).await?
            }
            Err(err) => return Err(err),
        };
        outcome.ok_or_else(|| CallboardError::NotFound(E::KIND.to_string()))
    }

    /// Remove a record from whichever store currently serves, returning it.
    pub async fn delete(&self, id: &str) -> Result<E> {
        let outcome = match self.durable.delete(id).await {
            Ok(v) => v,
            Err(err) if err.is_connection() && !self.production => {
                warn!(collection = E::COLLECTION, "database unreachable, deleting from in-memory store: {}", err);
                self.degraded.delete(id).await?
            }
            Err(err) => return Err(err),
        };
        outcome.ok_or_else(|| CallboardError::NotFound(E::KIND.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schemas::task::{TaskDoc, TaskPatch};
    use crate::db::schemas::TaskStatus;

    /// An unparsable URI fails the connection attempt immediately,
    /// standing in for an unreachable database without the
    /// server-selection wait.
    fn unreachable() -> Arc<Connector> {
        Arc::new(Connector::new("not-a-mongodb-uri", "callboard_test"))
    }

    fn task(title: &str) -> TaskDoc {
        TaskDoc {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_development_falls_back_to_memory() {
        let store = DualStore::<TaskDoc>::new(unreachable(), false);

        let created = store.create(task("تسجيل الدرس")).await.unwrap();
        let id = created.id.as_ref().unwrap().as_string();
        assert!(id.contains('-'), "degraded-mode id should be synthetic");

        let listed = store.list().await.unwrap();
        assert!(listed
            .iter()
            .any(|t| t.id.as_ref().is_some_and(|k| k.matches(&id))));

        let patch = TaskPatch {
            status: Some(TaskStatus::Done),
            ..Default::default()
        };
        let (before, after) = store.update(&id, &patch).await.unwrap();
        assert_eq!(before.status, TaskStatus::Pending);
        assert_eq!(after.status, TaskStatus::Done);

        let removed = store.delete(&id).await.unwrap();
        assert_eq!(removed.title, "تسجيل الدرس");
    }

    #[tokio::test]
    async fn test_development_unknown_id_is_not_found() {
        let store = DualStore::<TaskDoc>::new(unreachable(), false);
        let err = store.delete("no-such-record").await.unwrap_err();
        assert!(matches!(err, CallboardError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_production_reads_fail_soft_writes_fail_loud() {
        let store = DualStore::<TaskDoc>::new(unreachable(), true);

        // Reads: empty list, never fixture data
        assert!(store.list().await.unwrap().is_empty());

        // Writes: the connection failure surfaces to the caller
        let err = store.create(task("مهمة")).await.unwrap_err();
        assert!(err.is_connection());

        let err = store
            .update("1", &TaskPatch::default())
            .await
            .unwrap_err();
        assert!(err.is_connection());
    }

    #[tokio::test]
    async fn test_invalid_payload_rejected_before_fallback() {
        let store = DualStore::<TaskDoc>::new(unreachable(), false);
        let err = store.create(task("   ")).await.unwrap_err();
        assert!(matches!(err, CallboardError::Validation(_)));
    }
}
