//! `/resource` routes: paged list with keyword search, CRUD, batch delete.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{not_found, reject, Db, Rejection};

const DEFAULT_LIMIT: usize = 100;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Resource {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub status: i32,
    pub created_by: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Deserialize)]
pub struct CreateResource {
    pub name: String,
    pub description: String,
}

#[derive(Deserialize)]
pub struct UpdateResource {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub list: Vec<Resource>,
    pub total: u64,
}

#[derive(Deserialize)]
pub struct BatchDelete {
    pub ids: Vec<u64>,
}

pub fn router(db: Db<Resource>) -> Router {
    Router::new()
        .route("/resource", post(create_resource))
        .route("/resource/list", get(list_resources))
        .route("/resource/batch-delete", post(batch_delete))
        .route(
            "/resource/{id}",
            get(get_resource).put(update_resource).delete(delete_resource),
        )
        .with_state(db)
}

fn matches_keyword(resource: &Resource, keyword: Option<&str>) -> bool {
    match keyword {
        Some(k) if !k.is_empty() => resource.name.to_lowercase().contains(&k.to_lowercase()),
        _ => true,
    }
}

async fn list_resources(State(db): State<Db<Resource>>, Query(query): Query<ListQuery>) -> Json<ListResponse> {
    let table = db.read().await;
    let matching: Vec<&Resource> = table
        .rows
        .values()
        .filter(|r| matches_keyword(r, query.keyword.as_deref()))
        .collect();
    let total = matching.len() as u64;
    let list = matching
        .into_iter()
        .skip(query.skip.unwrap_or(0))
        .take(query.limit.unwrap_or(DEFAULT_LIMIT))
        .cloned()
        .collect();
    Json(ListResponse { list, total })
}

async fn create_resource(
    State(db): State<Db<Resource>>,
    Json(input): Json<CreateResource>,
) -> Result<Json<Resource>, Rejection> {
    if input.name.trim().is_empty() {
        return Err(reject(StatusCode::BAD_REQUEST, "name is required"));
    }
    let resource = db.write().await.insert_with(|id| Resource {
        id,
        name: input.name,
        description: input.description,
        status: 0,
        created_by: Some("admin".to_string()),
        created_at: Utc::now().naive_utc(),
        updated_at: None,
    });
    tracing::debug!(id = resource.id, "resource created");
    Ok(Json(resource))
}

async fn get_resource(State(db): State<Db<Resource>>, Path(id): Path<u64>) -> Result<Json<Resource>, Rejection> {
    let table = db.read().await;
    table.rows.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn update_resource(
    State(db): State<Db<Resource>>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateResource>,
) -> Result<Json<Resource>, Rejection> {
    let mut table = db.write().await;
    let resource = table.rows.get_mut(&id).ok_or_else(not_found)?;
    if let Some(name) = input.name {
        resource.name = name;
    }
    if let Some(description) = input.description {
        resource.description = description;
    }
    if let Some(status) = input.status {
        resource.status = status;
    }
    resource.updated_at = Some(Utc::now().naive_utc());
    Ok(Json(resource.clone()))
}

async fn delete_resource(State(db): State<Db<Resource>>, Path(id): Path<u64>) -> Result<Json<Value>, Rejection> {
    let mut table = db.write().await;
    table.rows.remove(&id).ok_or_else(not_found)?;
    Ok(Json(json!({ "message": "deleted" })))
}

async fn batch_delete(State(db): State<Db<Resource>>, Json(input): Json<BatchDelete>) -> Json<Value> {
    let mut table = db.write().await;
    let deleted = input
        .ids
        .iter()
        .filter(|id| table.rows.remove(*id).is_some())
        .count();
    Json(json!({ "deleted": deleted }))
}
