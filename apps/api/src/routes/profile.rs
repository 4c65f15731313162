use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::{Profile, ProfileDocument, ProfileUpdate};
use crate::state::AppState;

/// GET /profile
/// The configured profile (or the lowest id) with all child collections.
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<Json<ProfileDocument>, AppError> {
    state
        .store
        .profile(state.config.profile_id)
        .await?
        .map(Json)
        .ok_or_else(AppError::profile_not_found)
}

/// PUT /profile/:id
/// Overwrites the supplied top-level fields. Nested collections in the body are ignored.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<Profile>, AppError> {
    // A non-integer id can never name a row.
    let id: i32 = id.parse().map_err(|_| AppError::profile_not_found())?;
    let Json(update) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let updated = state
        .store
        .update_profile(id, &update)
        .await?
        .ok_or_else(AppError::profile_not_found)?;

    info!("Profile {id} updated");
    Ok(Json(updated))
}
