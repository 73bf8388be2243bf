use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get},
};

use crate::db::CatalogStorage;
use crate::handlers::{favorites, products, users};

const BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone)]
pub struct CatalogState {
    pub storage: CatalogStorage,
}

impl CatalogState {
    pub fn new(storage: CatalogStorage) -> Self {
        Self { storage }
    }
}

pub fn catalog_router(state: CatalogState) -> Router {
    Router::new()
        .route(
            "/api/users",
            get(users::list_users).post(users::create_user),
        )
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/users/{id}/favorites",
            get(favorites::list_favorites).post(favorites::create_favorite),
        )
        .route(
            "/api/users/{user_id}/favorites/{id}",
            delete(favorites::destroy_favorite),
        )
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state)
}
