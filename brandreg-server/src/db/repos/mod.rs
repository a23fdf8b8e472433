//! Repository implementations for database access
//!
//! Each repository borrows the [`ConnectionManager`](super::ConnectionManager)
//! and runs single parameterized statements through it.

pub mod brands;

pub use brands::{Brand, BrandRepo};
