//! Database module: models, schema and the store that owns the catalog tables.
//!
//! Layout:
//! - `models.rs`: row structs and the domain types they convert into
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: `CatalogStorage`, one method per entity operation

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Favorite, Product, User};
pub use schema::SQLITE_INIT;
pub use sqlite::{CatalogStorage, SqlitePool};
