//! MongoDB access layer: client wrapper, lazy shared connector, and
//! document schemas.

pub mod mongo;
pub mod schemas;

pub use mongo::{Connector, IntoIndexes, MongoClient, MongoCollection, MutMetadata};
