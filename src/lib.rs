pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod password;
pub mod router;

pub use config::Config;
pub use db::CatalogStorage;
pub use error::CatalogError;
