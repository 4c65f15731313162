//! Data access for the portfolio.
//!
//! `AppState` holds an `Arc<dyn PortfolioStore>` built once at startup, so
//! handlers never reach for a global client and tests can swap in
//! `MemoryStore`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::profile::{
    NewProfile, Profile, ProfileDocument, ProfileUpdate, Project, Skill, WorkExperience,
};
use crate::search::TextFilter;

/// Upper bound for `GET /skills/top`.
pub const TOP_SKILLS_LIMIT: usize = 10;

#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// Resolves "the" profile with every child collection attached.
    /// `Some(id)` selects that row; `None` selects the lowest id.
    /// Children are ordered by id.
    async fn profile(&self, id: Option<i32>) -> Result<Option<ProfileDocument>, AppError>;

    /// Applies a partial update. `Ok(None)` when no row has this id.
    async fn update_profile(
        &self,
        id: i32,
        update: &ProfileUpdate,
    ) -> Result<Option<Profile>, AppError>;

    /// All projects by id, restricted to `tech_stack` containing `skill` when given.
    async fn list_projects(&self, skill: Option<&TextFilter>) -> Result<Vec<Project>, AppError>;

    /// The first `limit` skills in storage order. No ranking.
    async fn list_skills(&self, limit: usize) -> Result<Vec<Skill>, AppError>;

    /// Projects whose title, description or tech stack contains the needle.
    async fn search_projects(&self, filter: &TextFilter) -> Result<Vec<Project>, AppError>;

    /// Skills whose name contains the needle.
    async fn search_skills(&self, filter: &TextFilter) -> Result<Vec<Skill>, AppError>;

    /// Experience whose company, role or description contains the needle.
    async fn search_experience(
        &self,
        filter: &TextFilter,
    ) -> Result<Vec<WorkExperience>, AppError>;

    /// Deletes every row in every table and inserts `seed` as the only profile.
    async fn replace_all(&self, seed: &NewProfile) -> Result<ProfileDocument, AppError>;
}
