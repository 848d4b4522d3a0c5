//! MongoDB client and collection wrapper

use bson::{doc, oid::ObjectId, Document};
use mongodb::{
    options::IndexOptions,
    results::UpdateResult,
    Client, Collection, IndexModel,
};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::db::schemas::Metadata;
use crate::types::{CallboardError, Result};

/// Trait for schemas that provide index definitions
pub trait IntoIndexes {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)>;
}

/// Trait for schemas with mutable metadata
pub trait MutMetadata {
    fn mut_metadata(&mut self) -> &mut Metadata;
}

/// MongoDB client wrapper
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    db_name: String,
}

impl MongoClient {
    /// Create a new MongoDB client
    pub async fn new(uri: &str, db_name: &str) -> Result<Self> {
        info!("Connecting to MongoDB at {}", uri);

        // Bound server selection so an unreachable MongoDB fails the call
        // instead of hanging it
        let timeout_uri = if uri.contains('?') {
            format!("{}&serverSelectionTimeoutMS=5000&connectTimeoutMS=5000", uri)
        } else {
            format!("{}?serverSelectionTimeoutMS=5000&connectTimeoutMS=5000", uri)
        };

        let client = Client::with_uri_str(&timeout_uri)
            .await
            .map_err(|e| CallboardError::Connection(format!("failed to connect: {}", e)))?;

        // Verify connectivity before handing the client out
        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| CallboardError::Connection(format!("ping failed: {}", e)))?;

        info!("Connected to MongoDB database '{}'", db_name);

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// Get a typed collection
    pub async fn collection<T>(&self, name: &str) -> Result<MongoCollection<T>>
    where
        T: Serialize + DeserializeOwned + Unpin + Send + Sync + Default + IntoIndexes + MutMetadata,
    {
        MongoCollection::new(&self.client, &self.db_name, name).await
    }

    /// Get the raw MongoDB client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the database name
    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}

/// Lazily-established, process-wide MongoDB connection.
///
/// Concurrent callers during an in-flight connection attempt all wait on
/// the same initialization future; a failed attempt leaves the cell empty
/// so the next caller retries, while a successful connection is cached for
/// the remainder of the process lifetime.
pub struct Connector {
    uri: String,
    db_name: String,
    cell: OnceCell<MongoClient>,
}

impl Connector {
    pub fn new(uri: &str, db_name: &str) -> Self {
        Self {
            uri: uri.to_string(),
            db_name: db_name.to_string(),
            cell: OnceCell::new(),
        }
    }

    /// Get the shared client, connecting on first use.
    pub async fn get(&self) -> Result<&MongoClient> {
        self.cell
            .get_or_try_init(|| MongoClient::new(&self.uri, &self.db_name))
            .await
    }

    /// Whether a connection has been established at some point.
    pub fn is_connected(&self) -> bool {
        self.cell.initialized()
    }

    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}

/// Typed MongoDB collection with automatic indexing
#[derive(Debug, Clone)]
pub struct MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    inner: Collection<T>,
}

impl<T> MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync + Default + IntoIndexes + MutMetadata,
{
    /// Create a new collection and apply indexes
    pub async fn new(client: &Client, db_name: &str, collection_name: &str) -> Result<Self> {
        let collection = client.database(db_name).collection::<T>(collection_name);
        let mongo_collection = MongoCollection { inner: collection };

        mongo_collection.apply_indexes().await?;

        Ok(mongo_collection)
    }

    /// Apply schema-defined indexes
    async fn apply_indexes(&self) -> Result<()> {
        let schema_indices = T::into_indices();

        if schema_indices.is_empty() {
            return Ok(());
        }

        let indices: Vec<IndexModel> = schema_indices
            .into_iter()
            .map(|(keys, opts)| IndexModel::builder().keys(keys).options(opts).build())
            .collect();

        self.inner
            .create_indexes(indices)
            .await
            .map_err(|e| CallboardError::Connection(format!("failed to create indexes: {}", e)))?;

        Ok(())
    }

    /// Insert a document, stamping metadata timestamps
    pub async fn insert_one(&self, item: &mut T) -> Result<ObjectId> {
        item.mut_metadata().stamp_created();

        let result = self.inner.insert_one(&*item).await?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| CallboardError::Connection("failed to get inserted ID".into()))
    }

    /// Find one document by filter
    pub async fn find_one(&self, filter: Document) -> Result<Option<T>> {
        Ok(self.inner.find_one(filter).await?)
    }

    /// Find many documents by filter
    pub async fn find_many(&self, filter: Document) -> Result<Vec<T>> {
        use futures_util::StreamExt;

        let cursor = self.inner.find(filter).await?;

        let results: Vec<T> = cursor
            .filter_map(|doc| async {
                match doc {
                    Ok(d) => Some(d),
                    Err(e) => {
                        error!("Error reading document: {}", e);
                        None
                    }
                }
            })
            .collect()
            .await;

        Ok(results)
    }

    /// Apply a shallow `$set` of the given fields, stamping `updatedAt`
    pub async fn set_fields(&self, filter: Document, mut fields: Document) -> Result<UpdateResult> {
        fields.insert("metadata.updatedAt", chrono::Utc::now().to_rfc3339());

        Ok(self
            .inner
            .update_one(filter, doc! { "$set": fields })
            .await?)
    }

    /// Remove one document
    pub async fn delete_one(&self, filter: Document) -> Result<bool> {
        let result = self.inner.delete_one(filter).await?;
        Ok(result.deleted_count > 0)
    }

    /// Get the underlying collection for advanced operations
    pub fn inner(&self) -> &Collection<T> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    // Integration tests require a running MongoDB instance.
    // The repository-level behavior is covered in store::memory instead.
}
