use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::profile::Project;
use crate::search::TextFilter;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProjectsQuery {
    pub skill: Option<String>,
}

/// GET /projects?skill=<text>
/// Substring match on `techStack`; an empty or absent `skill` lists everything.
pub async fn handle_list_projects(
    State(state): State<AppState>,
    query: Result<Query<ProjectsQuery>, QueryRejection>,
) -> Result<Json<Vec<Project>>, AppError> {
    let Query(params) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let filter = TextFilter::from_param(params.skill.as_deref());
    let projects = state.store.list_projects(filter.as_ref()).await?;
    Ok(Json(projects))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rstest::rstest;
    use serde_json::Value;

    use crate::routes::build_app;
    use crate::state::AppState;
    use crate::tests::fixtures::seeded_state;
    use crate::tests::helpers::{failing_state, get_json};

    fn titles(body: &Value) -> Vec<&str> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap())
            .collect()
    }

    #[rstest]
    #[case("/projects?skill=Python", vec!["AgriNova"])]
    #[case("/projects?skill=TensorFlow", vec!["AgriNova", "Skin Disease Classification"])]
    #[case("/projects?skill=Java", vec!["PixelPlayground"])]
    #[case("/projects?skill=python", vec![])]
    #[case("/projects?skill=Rust", vec![])]
    #[tokio::test]
    async fn test_skill_filter_is_substring(
        #[future] seeded_state: AppState,
        #[case] uri: &str,
        #[case] expected: Vec<&str>,
    ) {
        let state = seeded_state.await;
        let (status, body) = get_json(build_app(state), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(titles(&body), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn test_unfiltered_listing_is_stable(#[future] seeded_state: AppState) {
        let state = seeded_state.await;
        let (_, first) = get_json(build_app(state.clone()), "/projects").await;
        let (_, second) = get_json(build_app(state.clone()), "/projects").await;
        let (_, empty) = get_json(build_app(state), "/projects?skill=").await;

        assert_eq!(titles(&first).len(), 3);
        assert_eq!(first, second);
        assert_eq!(first, empty);
    }

    #[rstest]
    #[tokio::test]
    async fn test_repeated_skill_is_json_400(#[future] seeded_state: AppState) {
        let state = seeded_state.await;
        let (status, body) =
            get_json(build_app(state), "/projects?skill=Python&skill=HTML").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("skill"));
    }

    #[tokio::test]
    async fn test_store_failure_is_500() {
        let (status, body) = get_json(build_app(failing_state()), "/projects").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }
}
