use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::search::{run_search, SearchResults};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// GET /search?q=<text>
pub async fn handle_search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResults>, AppError> {
    let Query(params) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let results = run_search(state.store.as_ref(), params.q.as_deref()).await?;
    Ok(Json(results))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rstest::rstest;
    use serde_json::json;

    use crate::routes::build_app;
    use crate::state::AppState;
    use crate::tests::fixtures::seeded_state;
    use crate::tests::helpers::{failing_state, get_json};

    #[tokio::test]
    async fn test_empty_query_never_touches_store() {
        let empty = json!({ "projects": [], "skills": [], "experience": [] });
        for uri in ["/search", "/search?q="] {
            let (status, body) = get_json(build_app(failing_state()), uri).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, empty);
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_search_nit(#[future] seeded_state: AppState) {
        let state = seeded_state.await;
        let (status, body) = get_json(build_app(state), "/search?q=NIT").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["projects"], json!([]));
        assert_eq!(body["skills"], json!([]));
        let companies: Vec<&str> = body["experience"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["company"].as_str().unwrap())
            .collect();
        assert_eq!(
            companies,
            vec![
                "Training and Placement Cell, NIT Delhi",
                "Social Reform Cell, NIT Delhi"
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_search_url_encoded_query(#[future] seeded_state: AppState) {
        let state = seeded_state.await;
        let (_, body) = get_json(build_app(state), "/search?q=VS%20Code").await;
        assert_eq!(body["skills"][0]["name"], "VS Code");
        assert_eq!(body["skills"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_repeated_q_is_json_400() {
        // Rejected before any store call.
        let (status, body) = get_json(build_app(failing_state()), "/search?q=a&q=b").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_store_failure_is_500() {
        let (status, body) = get_json(build_app(failing_state()), "/search?q=NIT").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }
}
