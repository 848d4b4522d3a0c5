//! HTTP server: shared state and the request loop.

mod http;

pub use http::{run, AppState, Stores};
