use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::db::User;
use crate::{CatalogError, router::CatalogState};

#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    pub username: String,
    pub password: String,
}

pub async fn list_users(
    State(state): State<CatalogState>,
) -> Result<Json<Vec<User>>, CatalogError> {
    Ok(Json(state.storage.fetch_users().await?))
}

pub async fn create_user(
    State(state): State<CatalogState>,
    Json(body): Json<CreateUserBody>,
) -> Result<(StatusCode, Json<User>), CatalogError> {
    let user = state
        .storage
        .create_user(&body.username, &body.password)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}
