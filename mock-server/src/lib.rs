//! In-memory backend for the `/resource` and `/dimension` endpoint families.
//!
//! Every table hands out ids from its own counter starting at 1. State lives
//! for the lifetime of the `Router`; nothing is persisted.

use std::{collections::BTreeMap, sync::Arc};

use axum::{http::StatusCode, Json, Router};
use serde::Serialize;
use tokio::{net::TcpListener, sync::RwLock};

pub mod dimension;
pub mod resource;

pub use dimension::Dimension;
pub use resource::Resource;

/// Rows keyed by id plus the next id to hand out.
#[derive(Debug)]
pub struct Table<T> {
    next_id: u64,
    rows: BTreeMap<u64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T: Clone> Table<T> {
    pub fn insert_with(&mut self, build: impl FnOnce(u64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }
}

pub type Db<T> = Arc<RwLock<Table<T>>>;

/// Error body in the `{"detail": ...}` shape the real backend uses.
#[derive(Debug, Serialize)]
pub struct Detail {
    pub detail: String,
}

pub type Rejection = (StatusCode, Json<Detail>);

pub(crate) fn reject(status: StatusCode, detail: &str) -> Rejection {
    (
        status,
        Json(Detail {
            detail: detail.to_string(),
        }),
    )
}

pub(crate) fn not_found() -> Rejection {
    reject(StatusCode::NOT_FOUND, "not found")
}

/// Initial contents for a server.
#[derive(Debug, Default)]
pub struct Store {
    resources: Table<Resource>,
    dimensions: Table<Dimension>,
}

impl Store {
    /// Add a built-in dimension that cannot be deleted or re-coded.
    pub fn with_system_dimension(mut self, name: &str, code: &str, values: &[&str]) -> Self {
        self.dimensions.insert_with(|id| {
            Dimension::new(
                id,
                dimension::DimensionInput {
                    name: name.to_string(),
                    code: code.to_string(),
                    values: values.iter().map(|v| v.to_string()).collect(),
                    ..Default::default()
                },
                true,
            )
        });
        self
    }
}

pub fn app() -> Router {
    app_with(Store::default())
}

pub fn app_with(store: Store) -> Router {
    Router::new()
        .merge(resource::router(Arc::new(RwLock::new(store.resources))))
        .merge(dimension::router(Arc::new(RwLock::new(store.dimensions))))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_app(listener, app()).await
}

pub async fn run_app(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}
