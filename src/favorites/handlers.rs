use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    error::{is_unique_violation, ApiError},
    favorites::{
        dto::{AddFavoriteRequest, FavoriteResponse, FavoritesResponse, RemovedResponse},
        repo::Favorite,
    },
    state::AppState,
};

pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/me/favorites", get(list_favorites).post(add_favorite))
        .route("/me/favorites/:id", delete(remove_favorite))
}

#[instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn list_favorites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let favorites = Favorite::list_by_user(&state.db, auth.user_id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch favorites", e))?;
    Ok(Json(FavoritesResponse { favorites }))
}

#[instrument(skip(state, auth, payload), fields(user_id = %auth.user_id))]
pub async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<AddFavoriteRequest>,
) -> Result<(StatusCode, Json<FavoriteResponse>), ApiError> {
    let new = payload.into_new_favorite().map_err(|missing| {
        warn!(missing = ?missing, "add favorite missing fields");
        ApiError::Validation(format!("Missing required fields: {}", missing.join(", ")))
    })?;

    let favorite = match Favorite::create(&state.db, auth.user_id, &new).await {
        Ok(f) => f,
        Err(e) if is_unique_violation(&e) => {
            warn!(repo_id = new.repo_id, "repo already in favorites");
            return Err(ApiError::Conflict("Repo already in favorites"));
        }
        Err(e) => return Err(ApiError::internal("Failed to add favorite", e)),
    };

    info!(favorite_id = %favorite.id, repo_id = favorite.repo_id, "favorite added");
    Ok((StatusCode::CREATED, Json(FavoriteResponse { favorite })))
}

#[instrument(skip(state, auth), fields(user_id = %auth.user_id, email = %auth.email))]
pub async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RemovedResponse>, ApiError> {
    let removed = Favorite::delete_by_user(&state.db, auth.user_id, id)
        .await
        .map_err(|e| ApiError::internal("Failed to remove favorite repo", e))?;

    if removed == 0 {
        warn!(favorite_id = %id, "favorite not found for user");
        return Err(ApiError::NotFound("Favorite repo not found"));
    }

    info!(favorite_id = %id, "favorite removed");
    Ok(Json(RemovedResponse {
        message: "Favorite repo removed",
    }))
}
