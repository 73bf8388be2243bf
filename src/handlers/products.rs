use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::db::Product;
use crate::{CatalogError, router::CatalogState};

#[derive(Debug, Default, Deserialize)]
pub struct CreateProductBody {
    #[serde(default)]
    pub name: Option<String>,
}

pub async fn list_products(
    State(state): State<CatalogState>,
) -> Result<Json<Vec<Product>>, CatalogError> {
    Ok(Json(state.storage.fetch_products().await?))
}

pub async fn create_product(
    State(state): State<CatalogState>,
    Json(body): Json<CreateProductBody>,
) -> Result<(StatusCode, Json<Product>), CatalogError> {
    let product = state.storage.create_product(body.name.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}
