//! MongoDB-backed repository.

use async_trait::async_trait;
use bson::doc;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::db::mongo::{Connector, MongoCollection};
use crate::db::schemas::RecordId;
use crate::store::{set_document, Entity, Patch, Repository};
use crate::types::{CallboardError, Result};

/// Durable repository over the lazily-connected shared client.
pub struct MongoRepository<E: Entity> {
    connector: Arc<Connector>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> MongoRepository<E> {
    pub fn new(connector: Arc<Connector>) -> Self {
        Self {
            connector,
            _entity: PhantomData,
        }
    }

    async fn collection(&self) -> Result<MongoCollection<E>> {
        let client = self.connector.get().await?;
        client.collection::<E>(E::COLLECTION).await
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MongoRepository<E> {
    async fn list(&self) -> Result<Vec<E>> {
        self.collection().await?.find_many(doc! {}).await
    }

    async fn get(&self, id: &str) -> Result<Option<E>> {
        self.collection().await?.find_one(RecordId::filter(id)).await
    }

    async fn insert(&self, mut doc: E) -> Result<E> {
        doc.prepare_insert();
        doc.validate().map_err(CallboardError::Validation)?;

        let collection = self.collection().await?;
        let oid = collection.insert_one(&mut doc).await?;
        doc.set_id(RecordId::Oid(oid));

        Ok(doc)
    }

    async fn update(&self, id: &str, patch: &E::Patch) -> Result<Option<(E, E)>> {
        let collection = self.collection().await?;
        let filter = RecordId::filter(id);

        let Some(before) = collection.find_one(filter.clone()).await? else {
            return Ok(None);
        };

        let fields = set_document(patch)?;
        if fields.is_empty() {
            // Nothing to change; the record is returned as-is
            return Ok(Some((before.clone(), before)));
        }

        // Re-validate the merged snapshot before writing
        let mut preview = before.clone();
        patch.apply(&mut preview);
        preview.validate().map_err(CallboardError::Validation)?;

        collection.set_fields(filter.clone(), fields).await?;

        let after = collection.find_one(filter).await?.unwrap_or(preview);
        Ok(Some((before, after)))
    }

    async fn delete(&self, id: &str) -> Result<Option<E>> {
        let collection = self.collection().await?;
        let filter = RecordId::filter(id);

        let Some(doc) = collection.find_one(filter.clone()).await? else {
            return Ok(None);
        };

        collection.delete_one(filter).await?;
        Ok(Some(doc))
    }
}
