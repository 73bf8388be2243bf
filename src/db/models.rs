use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user as exposed to callers. The password hash never leaves
/// the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: Uuid,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Favorite {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
}

/// Raw `users` row without the `password` column.
#[derive(Debug, Clone, FromRow)]
pub struct DbUser {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct DbProduct {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DbFavorite {
    pub id: String,
    pub product_id: String,
    pub user_id: String,
}

fn parse_id(column: &str, raw: &str) -> Result<Uuid, CatalogError> {
    Uuid::parse_str(raw)
        .map_err(|e| CatalogError::DataCorruption(format!("invalid {column} {raw:?}: {e}")))
}

impl TryFrom<DbUser> for User {
    type Error = CatalogError;

    fn try_from(row: DbUser) -> Result<Self, Self::Error> {
        Ok(User {
            id: parse_id("users.id", &row.id)?,
            username: row.username,
        })
    }
}

impl TryFrom<DbProduct> for Product {
    type Error = CatalogError;

    fn try_from(row: DbProduct) -> Result<Self, Self::Error> {
        Ok(Product {
            id: parse_id("products.id", &row.id)?,
            name: row.name,
        })
    }
}

impl TryFrom<DbFavorite> for Favorite {
    type Error = CatalogError;

    fn try_from(row: DbFavorite) -> Result<Self, Self::Error> {
        Ok(Favorite {
            id: parse_id("favorites.id", &row.id)?,
            product_id: parse_id("favorites.product_id", &row.product_id)?,
            user_id: parse_id("favorites.user_id", &row.user_id)?,
        })
    }
}
