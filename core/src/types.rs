//! DTOs for the generic `/resource` entity and the payloads shared by all
//! entities.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::resource::{BatchDeleteResource, RestResource};

/// Identifier assigned by the backend. Never generated client-side.
pub type Id = u64;

/// A generic backend entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Request payload for creating a new resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceCreate {
    pub name: String,
    pub description: String,
}

impl From<&Resource> for ResourceCreate {
    fn from(resource: &Resource) -> Self {
        Self {
            name: resource.name.clone(),
            description: resource.description.clone(),
        }
    }
}

/// Request payload for updating an existing resource. Only the fields present
/// in the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
}

/// Pagination and filter parameters for `GET /resource/list`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// One page of resources. `total` counts every match on the server, not just
/// this page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceListResponse {
    pub list: Vec<Resource>,
    pub total: u64,
}

impl RestResource for Resource {
    const PATH: &'static str = "resource";

    type Create = ResourceCreate;
    type Update = ResourceUpdate;
    type ListParams = ResourceListParams;
    type Page = ResourceListResponse;
    type Created = Resource;
    type Updated = Resource;
}

impl BatchDeleteResource for Resource {}

/// Body of `POST /{R}/batch-delete`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchDelete {
    pub ids: Vec<Id>,
}

/// Short status reply returned by endpoints that do not echo the entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Acknowledgement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub message: String,
}
