//! `/dimension` routes.
//!
//! Codes are unique across the table. System dimensions keep their code and
//! cannot be deleted. Pages are ordered newest first; `all` is ordered by name.
//! `GET /dimension/{id}` reports a missing id in-band: 200 with
//! `{"error": "Dimension not found"}`.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{not_found, reject, Db, Rejection, Table};

const DEFAULT_PAGE_SIZE: u64 = 10;
const MAX_PAGE_SIZE: u64 = 100;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Dimension {
    pub id: u64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub values: Vec<String>,
    pub value_labels: BTreeMap<String, String>,
    pub is_system: bool,
    pub enabled: bool,
    pub create_time: NaiveDateTime,
    pub update_time: Option<NaiveDateTime>,
    pub value_count: u64,
}

impl Dimension {
    pub(crate) fn new(id: u64, input: DimensionInput, is_system: bool) -> Self {
        let value_count = input.values.len() as u64;
        Self {
            id,
            name: input.name.trim().to_string(),
            code: input.code.trim().to_string(),
            description: input.description.map(|d| d.trim().to_string()),
            values: input.values,
            value_labels: input.value_labels.unwrap_or_default(),
            is_system,
            enabled: input.enabled.unwrap_or(true),
            create_time: Utc::now().naive_utc(),
            update_time: None,
            value_count,
        }
    }

    fn summary(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "code": self.code,
            "description": self.description,
            "value_count": self.value_count,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DimensionInput {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,
    pub value_labels: Option<BTreeMap<String, String>>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DimensionPatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub values: Option<Vec<String>>,
    pub value_labels: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub name: Option<String>,
    pub code: Option<String>,
    pub enabled: Option<bool>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<Dimension>,
    pub current_page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

#[derive(Debug, Deserialize)]
pub struct AllQuery {
    pub enabled_only: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct EnableQuery {
    pub enabled: bool,
}

pub fn router(db: Db<Dimension>) -> Router {
    Router::new()
        .route("/dimension", post(create_dimension))
        .route("/dimension/list", get(list_dimensions))
        .route("/dimension/all", get(all_dimensions))
        .route(
            "/dimension/{id}",
            get(get_dimension).put(update_dimension).delete(delete_dimension),
        )
        .route("/dimension/{id}/enable", patch(enable_dimension))
        .with_state(db)
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(n) if !n.is_empty() => haystack.to_lowercase().contains(&n.to_lowercase()),
        _ => true,
    }
}

/// Clamp page size to 1..=100 and the page to 1..=total_pages. An empty
/// result still reports one page.
fn paginate(total_count: u64, page: Option<u64>, page_size: Option<u64>) -> (u64, u64, u64) {
    let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let total_pages = if total_count > 0 {
        total_count.div_ceil(page_size)
    } else {
        1
    };
    let current_page = page.unwrap_or(1).clamp(1, total_pages);
    (current_page, page_size, total_pages)
}

fn code_taken(table: &Table<Dimension>, code: &str, except: Option<u64>) -> bool {
    table
        .rows
        .values()
        .any(|d| d.code == code && Some(d.id) != except)
}

async fn list_dimensions(State(db): State<Db<Dimension>>, Query(query): Query<ListQuery>) -> Json<Page> {
    let table = db.read().await;
    let mut matching: Vec<&Dimension> = table
        .rows
        .values()
        .filter(|d| contains_ignore_case(&d.name, query.name.as_deref()))
        .filter(|d| contains_ignore_case(&d.code, query.code.as_deref()))
        .filter(|d| query.enabled.map_or(true, |enabled| d.enabled == enabled))
        .collect();
    matching.sort_by(|a, b| (b.create_time, b.id).cmp(&(a.create_time, a.id)));

    let total_count = matching.len() as u64;
    let (current_page, page_size, total_pages) = paginate(total_count, query.page, query.page_size);
    let items = matching
        .into_iter()
        .skip(((current_page - 1) * page_size) as usize)
        .take(page_size as usize)
        .cloned()
        .collect();

    Json(Page {
        items,
        current_page,
        page_size,
        total_count,
        total_pages,
    })
}

async fn all_dimensions(State(db): State<Db<Dimension>>, Query(query): Query<AllQuery>) -> Json<Vec<Value>> {
    let enabled_only = query.enabled_only.unwrap_or(true);
    let table = db.read().await;
    let mut dims: Vec<&Dimension> = table
        .rows
        .values()
        .filter(|d| !enabled_only || d.enabled)
        .collect();
    dims.sort_by(|a, b| a.name.cmp(&b.name));
    Json(dims.into_iter().map(Dimension::summary).collect())
}

async fn get_dimension(State(db): State<Db<Dimension>>, Path(id): Path<u64>) -> Response {
    let table = db.read().await;
    match table.rows.get(&id) {
        Some(dim) => Json(dim.clone()).into_response(),
        None => Json(json!({ "error": "Dimension not found" })).into_response(),
    }
}

async fn create_dimension(
    State(db): State<Db<Dimension>>,
    Json(input): Json<DimensionInput>,
) -> Result<Json<Value>, Rejection> {
    if input.name.trim().is_empty() {
        return Err(reject(StatusCode::BAD_REQUEST, "name is required"));
    }
    if input.code.trim().is_empty() {
        return Err(reject(StatusCode::BAD_REQUEST, "code is required"));
    }
    let mut table = db.write().await;
    if code_taken(&table, input.code.trim(), None) {
        return Err(reject(StatusCode::BAD_REQUEST, "code already exists"));
    }
    let dim = table.insert_with(|id| Dimension::new(id, input, false));
    tracing::debug!(id = dim.id, code = %dim.code, "dimension created");
    Ok(Json(json!({ "id": dim.id, "message": "Dimension created successfully" })))
}

async fn update_dimension(
    State(db): State<Db<Dimension>>,
    Path(id): Path<u64>,
    Json(input): Json<DimensionPatch>,
) -> Result<Json<Value>, Rejection> {
    let mut table = db.write().await;
    let current = table.rows.get(&id).ok_or_else(not_found)?;

    let new_code = input.code.as_deref().map(str::trim).filter(|c| !c.is_empty());
    if let Some(code) = new_code {
        if code != current.code {
            if current.is_system {
                return Err(reject(StatusCode::BAD_REQUEST, "system dimension code cannot change"));
            }
            if code_taken(&table, code, Some(id)) {
                return Err(reject(StatusCode::BAD_REQUEST, "code already exists"));
            }
        }
    }
    let new_code = new_code.map(str::to_string);

    let dim = table.rows.get_mut(&id).ok_or_else(not_found)?;
    if let Some(name) = input.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        dim.name = name.to_string();
    }
    if let Some(code) = new_code {
        dim.code = code;
    }
    if let Some(description) = input.description {
        dim.description = Some(description.trim().to_string());
    }
    if let Some(values) = input.values {
        dim.value_count = values.len() as u64;
        dim.values = values;
    }
    if let Some(labels) = input.value_labels {
        dim.value_labels = labels;
    }
    dim.update_time = Some(Utc::now().naive_utc());
    Ok(Json(json!({ "id": id, "message": "Dimension updated successfully" })))
}

async fn delete_dimension(State(db): State<Db<Dimension>>, Path(id): Path<u64>) -> Result<Json<Value>, Rejection> {
    let mut table = db.write().await;
    let dim = table.rows.get(&id).ok_or_else(not_found)?;
    if dim.is_system {
        return Err(reject(StatusCode::BAD_REQUEST, "system dimension cannot be deleted"));
    }
    table.rows.remove(&id);
    Ok(Json(json!({ "message": "Dimension deleted successfully" })))
}

async fn enable_dimension(
    State(db): State<Db<Dimension>>,
    Path(id): Path<u64>,
    Query(query): Query<EnableQuery>,
) -> Result<Json<Value>, Rejection> {
    let mut table = db.write().await;
    let dim = table.rows.get_mut(&id).ok_or_else(not_found)?;
    dim.enabled = query.enabled;
    dim.update_time = Some(Utc::now().naive_utc());
    let verb = if query.enabled { "enabled" } else { "disabled" };
    Ok(Json(json!({ "message": format!("Dimension {verb} successfully") })))
}
