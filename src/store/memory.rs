//! In-memory degraded-mode repository.
//!
//! A process-lifetime list per entity type, lazily seeded from fixture
//! data by the first caller. Records created here get a synthetic
//! `{timestamp}-{random-suffix}` key; fixture records keep their legacy
//! string keys, and both forms resolve on lookup. Nothing here survives a
//! process restart, and nothing is ever copied back into MongoDB.

use async_trait::async_trait;
use std::sync::{OnceLock, RwLock};

use crate::db::schemas::RecordId;
use crate::store::{set_document, Entity, Patch, Repository};
use crate::types::{CallboardError, Result};

pub struct MemoryRepository<E: Entity> {
    records: OnceLock<RwLock<Vec<E>>>,
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            records: OnceLock::new(),
        }
    }

    /// Seed from fixtures on first access; later callers share the list.
    fn records(&self) -> &RwLock<Vec<E>> {
        self.records.get_or_init(|| RwLock::new(E::fixtures()))
    }

    /// Synthesize a degraded-mode key, unique within the process lifetime.
    fn synthesize_id() -> RecordId {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        RecordId::Key(format!("{}-{}", millis, &suffix[..12]))
    }

    fn matches(record: &E, id: &str) -> bool {
        record.record_id().is_some_and(|key| key.matches(id))
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn list(&self) -> Result<Vec<E>> {
        Ok(self.records().read().expect("store lock poisoned").clone())
    }

    async fn get(&self, id: &str) -> Result<Option<E>> {
        let records = self.records().read().expect("store lock poisoned");
        Ok(records.iter().find(|r| Self::matches(r, id)).cloned())
    }

    async fn insert(&self, mut doc: E) -> Result<E> {
        doc.prepare_insert();
        doc.validate().map_err(CallboardError::Validation)?;

        doc.mut_metadata().stamp_created();
        doc.set_id(Self::synthesize_id());

        let mut records = self.records().write().expect("store lock poisoned");
        records.push(doc.clone());

        Ok(doc)
    }

    async fn update(&self, id: &str, patch: &E::Patch) -> Result<Option<(E, E)>> {
        let mut records = self.records().write().expect("store lock poisoned");

        let Some(record) = records.iter_mut().find(|r| Self::matches(r, id)) else {
            return Ok(None);
        };

        let before = record.clone();

        let fields = set_document(patch)?;
        if fields.is_empty() {
            return Ok(Some((before.clone(), before)));
        }

        let mut preview = before.clone();
        patch.apply(&mut preview);
        preview.validate().map_err(CallboardError::Validation)?;

        patch.apply(record);
        record.mut_metadata().stamp_updated();

        Ok(Some((before, record.clone())))
    }

    async fn delete(&self, id: &str) -> Result<Option<E>> {
        let mut records = self.records().write().expect("store lock poisoned");

        let Some(index) = records.iter().position(|r| Self::matches(r, id)) else {
            return Ok(None);
        };

        Ok(Some(records.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schemas::task::{TaskDoc, TaskPatch, TaskStatus};
    use std::collections::HashSet;

    fn task(title: &str) -> TaskDoc {
        TaskDoc {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_seeds_fixtures_on_first_access() {
        let repo = MemoryRepository::<TaskDoc>::new();
        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), TaskDoc::fixtures().len());
        assert!(!listed.is_empty());
    }

    #[tokio::test]
    async fn test_insert_synthesizes_unique_ids() {
        let repo = MemoryRepository::<TaskDoc>::new();
        let mut ids = HashSet::new();

        for i in 0..100 {
            let stored = repo.insert(task(&format!("مهمة {}", i))).await.unwrap();
            let id = stored.id.as_ref().unwrap().as_string();
            assert!(id.contains('-'));
            assert!(ids.insert(id), "synthetic id collided");
        }
    }

    #[tokio::test]
    async fn test_created_record_is_addressable() {
        let repo = MemoryRepository::<TaskDoc>::new();
        let stored = repo.insert(task("تسجيل الدرس")).await.unwrap();
        let id = stored.id.as_ref().unwrap().as_string();

        assert!(repo.get(&id).await.unwrap().is_some());

        let patch: TaskPatch = serde_json::from_str(r#"{"status": "مكتملة"}"#).unwrap();
        let (before, after) = repo.update(&id, &patch).await.unwrap().unwrap();
        assert_eq!(before.status, TaskStatus::Pending);
        assert_eq!(after.status, TaskStatus::Done);

        assert!(repo.delete(&id).await.unwrap().is_some());
        assert!(repo.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_legacy_fixture_key_resolves() {
        let repo = MemoryRepository::<TaskDoc>::new();
        let fixture_id = TaskDoc::fixtures()[0].id.as_ref().unwrap().as_string();

        let found = repo.get(&fixture_id).await.unwrap();
        assert!(found.is_some());

        let patch = TaskPatch {
            assignee: Some("ليلى".into()),
            ..Default::default()
        };
        let (_, after) = repo.update(&fixture_id, &patch).await.unwrap().unwrap();
        assert_eq!(after.assignee, "ليلى");
    }

    #[tokio::test]
    async fn test_empty_patch_returns_record_unchanged() {
        let repo = MemoryRepository::<TaskDoc>::new();
        let stored = repo.insert(task("مونتاج الفيديو")).await.unwrap();
        let id = stored.id.as_ref().unwrap().as_string();

        let (before, after) = repo
            .update(&id, &TaskPatch::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(before.title, after.title);
        assert_eq!(before.status, after.status);
        assert_eq!(
            before.metadata.updated_at, after.metadata.updated_at,
            "empty patch must not touch the record"
        );
    }

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let repo = MemoryRepository::<TaskDoc>::new();
        assert!(repo.get("missing").await.unwrap().is_none());
        assert!(repo
            .update("missing", &TaskPatch::default())
            .await
            .unwrap()
            .is_none());
        assert!(repo.delete("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_validation_applies_to_patched_snapshot() {
        let repo = MemoryRepository::<TaskDoc>::new();
        let stored = repo.insert(task("مهمة صالحة")).await.unwrap();
        let id = stored.id.as_ref().unwrap().as_string();

        let patch = TaskPatch {
            title: Some("   ".into()),
            ..Default::default()
        };
        let err = repo.update(&id, &patch).await.unwrap_err();
        assert!(matches!(err, CallboardError::Validation(_)));

        // The record is untouched after a rejected patch
        let current = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(current.title, "مهمة صالحة");
    }
}
