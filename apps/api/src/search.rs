//! Query-parameter-to-filter translation and the cross-table search.
//!
//! Every text filter in the API is a case-sensitive substring match. An empty
//! or absent parameter means "no filter", never "match nothing".

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::models::profile::{Project, Skill, WorkExperience};
use crate::store::PortfolioStore;

/// A non-empty needle for a substring filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFilter(String);

impl TextFilter {
    /// `None` for absent or empty input. The needle is not trimmed: the match
    /// is byte-exact, so surrounding spaces are part of what is searched for.
    pub fn from_param(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some(s) if !s.is_empty() => Some(TextFilter(s.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, haystack: &str) -> bool {
        haystack.contains(self.0.as_str())
    }

    /// True when any of `fields` contains the needle (the OR of the filters).
    pub fn matches_any(&self, fields: &[&str]) -> bool {
        fields.iter().any(|f| self.matches(f))
    }
}

/// Columns each search sub-query ORs over.
pub fn project_matches(filter: &TextFilter, project: &Project) -> bool {
    filter.matches_any(&[&project.title, &project.description, &project.tech_stack])
}

pub fn skill_matches(filter: &TextFilter, skill: &Skill) -> bool {
    filter.matches(&skill.name)
}

pub fn experience_matches(filter: &TextFilter, experience: &WorkExperience) -> bool {
    filter.matches_any(&[&experience.company, &experience.role, &experience.description])
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
    pub experience: Vec<WorkExperience>,
}

/// Runs the three sub-queries concurrently. An empty query returns empty
/// lists without touching the store; any failing sub-query fails the search.
pub async fn run_search(
    store: &dyn PortfolioStore,
    query: Option<&str>,
) -> Result<SearchResults, AppError> {
    let Some(filter) = TextFilter::from_param(query) else {
        return Ok(SearchResults::default());
    };

    let (projects, skills, experience) = tokio::try_join!(
        store.search_projects(&filter),
        store.search_skills(&filter),
        store.search_experience(&filter),
    )?;

    debug!(
        "search {:?}: {} projects, {} skills, {} experience",
        filter.as_str(),
        projects.len(),
        skills.len(),
        experience.len()
    );

    Ok(SearchResults {
        projects,
        skills,
        experience,
    })
}
