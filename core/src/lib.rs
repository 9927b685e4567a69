//! Typed client core for REST CRUD resources.
//!
//! # Overview
//! Every entity lives under the same path scheme (`/R/list`, `/R/{id}`,
//! `/R/batch-delete`, ...). `ResourceClient<R>` turns calls into
//! `HttpRequest` values and `HttpResponse` values back into typed results
//! without touching the network; `ResourceApi<R, T>` drives a `Transport` to
//! do the round-trip asynchronously.
//!
//! # Design
//! - One generic client; entities plug in by implementing `RestResource`
//!   (and `ToggleResource` for entities with an enable flag).
//! - `ResourceClient` is stateless; it holds only `base_url`.
//! - Build and parse are separate so the I/O boundary is explicit and the
//!   request shape can be tested without a server.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//! - Errors are reported, never retried.

pub mod api;
pub mod client;
pub mod config;
pub mod dimension;
pub mod error;
pub mod http;
pub mod resource;
pub mod transport;
pub mod types;

pub use api::ResourceApi;
pub use client::ResourceClient;
pub use config::ClientConfig;
pub use dimension::{
    Dimension, DimensionCreate, DimensionListParams, DimensionPage, DimensionSummary, DimensionUpdate,
};
pub use error::{ApiError, ApiResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use resource::{BatchDeleteResource, RestResource, ToggleResource};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    Acknowledgement, BatchDelete, Id, Resource, ResourceCreate, ResourceListParams, ResourceListResponse,
    ResourceUpdate,
};
