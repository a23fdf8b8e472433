//! brandreg-server: HTTP server for brand registration records
//!
//! Exposes create/list/get/update/delete over a single `brands` table
//! stored in PostgreSQL, plus health and root endpoints.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{Settings, StoreConfig};
pub use db::{ConnectionManager, DbError};
pub use http::{run_server, AppState, ServerConfig, ServerError};
