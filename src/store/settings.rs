//! Singleton settings store.
//!
//! The settings document is maintained by upsert on a fixed key, so there
//! is exactly one per database. Outside production an unreachable
//! database falls back to a process-lifetime copy; in production the
//! connection error surfaces to the caller.

use std::sync::{Arc, RwLock};
use tracing::warn;

use bson::doc;

use crate::db::mongo::Connector;
use crate::db::schemas::{SettingsDoc, SettingsPatch, SETTINGS_COLLECTION, SETTINGS_KEY};
use crate::types::Result;

pub struct SettingsStore {
    connector: Arc<Connector>,
    production: bool,
    fallback: RwLock<SettingsDoc>,
}

impl SettingsStore {
    pub fn new(connector: Arc<Connector>, production: bool) -> Self {
        Self {
            connector,
            production,
            fallback: RwLock::new(SettingsDoc::defaults()),
        }
    }

    /// Fetch the singleton, or its defaults before the first PUT.
    pub async fn get(&self) -> Result<SettingsDoc> {
        match self.get_durable().await {
            Ok(settings) => Ok(settings),
            Err(err) if err.is_connection() && !self.production => {
                warn!("database unreachable, serving in-memory settings: {}", err);
                Ok(self.fallback.read().expect("settings lock poisoned").clone())
            }
            Err(err) => Err(err),
        }
    }

    /// Apply a partial update by upsert on the fixed key.
    pub async fn upsert(&self, patch: &SettingsPatch) -> Result<SettingsDoc> {
        match self.upsert_durable(patch).await {
            Ok(settings) => Ok(settings),
            Err(err) if err.is_connection() && !self.production => {
                warn!("database unreachable, updating in-memory settings: {}", err);
                let mut fallback = self.fallback.write().expect("settings lock poisoned");
                patch.apply(&mut fallback);
                Ok(fallback.clone())
            }
            Err(err) => Err(err),
        }
    }

    async fn get_durable(&self) -> Result<SettingsDoc> {
        let client = self.connector.get().await?;
        let collection = client
            .collection::<SettingsDoc>(SETTINGS_COLLECTION)
            .await?;

        let found = collection.find_one(doc! { "key": SETTINGS_KEY }).await?;
        Ok(found.unwrap_or_else(SettingsDoc::defaults))
    }

    async fn upsert_durable(&self, patch: &SettingsPatch) -> Result<SettingsDoc> {
        use mongodb::options::UpdateOptions;

        let client = self.connector.get().await?;
        let collection = client
            .collection::<SettingsDoc>(SETTINGS_COLLECTION)
            .await?;

        let mut fields = patch.set_document();
        fields.insert("key", SETTINGS_KEY);
        fields.insert("metadata.updatedAt", chrono::Utc::now().to_rfc3339());

        collection
            .inner()
            .update_one(doc! { "key": SETTINGS_KEY }, doc! { "$set": fields })
            .with_options(UpdateOptions::builder().upsert(true).build())
            .await
            .map_err(crate::types::CallboardError::from)?;

        self.get_durable().await
    }
}
