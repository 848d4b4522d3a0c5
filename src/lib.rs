//! Callboard - studio management dashboard backend
//!
//! CRUD HTTP service over MongoDB for a studio team's internal dashboard:
//! tasks, assets, expenses, timeline milestones, idea notes, competitor
//! research, budget settings, and an audit-trail activity feed.
//!
//! ## Services
//!
//! - **Entity handlers**: list/create/update/delete per collection, with
//!   durable-first, in-memory-fallback storage outside production
//! - **Activity log**: best-effort audit trail with a capped in-memory
//!   buffer when MongoDB is unreachable
//! - **Label migration**: idempotent rewrite of legacy English task
//!   labels to their canonical Arabic values
//! - **Copy tool**: `callboard-copydb` clones the collections between
//!   deployments with insert-if-absent semantics

pub mod activity;
pub mod config;
pub mod copydb;
pub mod db;
pub mod migration;
pub mod routes;
pub mod server;
pub mod store;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{CallboardError, Result};
