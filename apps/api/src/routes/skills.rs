use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::profile::Skill;
use crate::state::AppState;
use crate::store::TOP_SKILLS_LIMIT;

/// GET /skills/top
/// At most ten skills in storage order. There is no popularity signal to rank by.
pub async fn handle_top_skills(
    State(state): State<AppState>,
) -> Result<Json<Vec<Skill>>, AppError> {
    Ok(Json(state.store.list_skills(TOP_SKILLS_LIMIT).await?))
}
