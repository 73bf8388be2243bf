use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::db::Favorite;
use crate::{CatalogError, router::CatalogState};

#[derive(Debug, Deserialize)]
pub struct CreateFavoriteBody {
    pub product_id: Uuid,
}

pub async fn list_favorites(
    State(state): State<CatalogState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Favorite>>, CatalogError> {
    Ok(Json(state.storage.fetch_favorites(user_id).await?))
}

pub async fn create_favorite(
    State(state): State<CatalogState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<CreateFavoriteBody>,
) -> Result<(StatusCode, Json<Favorite>), CatalogError> {
    let favorite = state
        .storage
        .create_favorite(body.product_id, user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// The user segment is not checked against the favorite's owner; deletion is
/// keyed by favorite id alone.
pub async fn destroy_favorite(
    State(state): State<CatalogState>,
    Path((user_id, favorite_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, CatalogError> {
    debug!(%user_id, %favorite_id, "delete favorite requested");
    state.storage.destroy_favorite(favorite_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
