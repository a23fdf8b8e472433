//! Database layer - store handle, schema and repositories
//!
//! # Design Principles
//!
//! - One `ConnectionManager` per process, shared by reference
//! - Parameterized statements only
//! - Rely on DB constraints as a second line behind request validation

pub mod error;
pub mod manager;
pub mod repos;
pub mod schema;
pub mod seed;

pub use error::DbError;
pub use manager::ConnectionManager;
pub use repos::*;
