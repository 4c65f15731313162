#![cfg(test)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::profile::{
    NewProfile, Profile, ProfileDocument, ProfileUpdate, Project, Skill, WorkExperience,
};
use crate::search::TextFilter;
use crate::state::AppState;
use crate::store::PortfolioStore;

/// A store whose every call fails the way a dropped connection would.
pub struct FailingStore;

fn unavailable<T>() -> Result<T, AppError> {
    Err(AppError::Database(sqlx::Error::PoolClosed))
}

#[async_trait]
impl PortfolioStore for FailingStore {
    async fn profile(&self, _id: Option<i32>) -> Result<Option<ProfileDocument>, AppError> {
        unavailable()
    }

    async fn update_profile(
        &self,
        _id: i32,
        _update: &ProfileUpdate,
    ) -> Result<Option<Profile>, AppError> {
        unavailable()
    }

    async fn list_projects(&self, _skill: Option<&TextFilter>) -> Result<Vec<Project>, AppError> {
        unavailable()
    }

    async fn list_skills(&self, _limit: usize) -> Result<Vec<Skill>, AppError> {
        unavailable()
    }

    async fn search_projects(&self, _filter: &TextFilter) -> Result<Vec<Project>, AppError> {
        unavailable()
    }

    async fn search_skills(&self, _filter: &TextFilter) -> Result<Vec<Skill>, AppError> {
        unavailable()
    }

    async fn search_experience(
        &self,
        _filter: &TextFilter,
    ) -> Result<Vec<WorkExperience>, AppError> {
        unavailable()
    }

    async fn replace_all(&self, _seed: &NewProfile) -> Result<ProfileDocument, AppError> {
        unavailable()
    }
}

pub fn failing_state() -> AppState {
    AppState {
        store: Arc::new(FailingStore),
        config: Config::in_memory(),
    }
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    call(app, request).await
}

pub async fn send_json(app: Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("encode body")))
        .expect("build request");
    call(app, request).await
}
