//! DTOs for the `/dimension` toggle entity.
//!
//! A dimension is a named enumeration of values (with optional display
//! labels) that a field may take. Create and update reply with an
//! `Acknowledgement` rather than the entity.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::resource::{RestResource, ToggleResource};
use crate::types::{Acknowledgement, Id};

/// Full dimension as returned by `GET /dimension/{id}` and inside list pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dimension {
    pub id: Id,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub value_labels: BTreeMap<String, String>,
    #[serde(default)]
    pub is_system: bool,
    pub enabled: bool,
    #[serde(default)]
    pub create_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub value_count: u64,
}

/// Request payload for creating a dimension.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DimensionCreate {
    pub name: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Partial patch for a dimension. `enabled` is not patchable here; flip it
/// with `ResourceApi::enable`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DimensionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_labels: Option<BTreeMap<String, String>>,
}

/// Filters for `GET /dimension/list`. `name` and `code` are substring matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DimensionListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
}

/// One page of dimensions. The server clamps `current_page` and `page_size`,
/// so they may differ from what was requested.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DimensionPage {
    pub items: Vec<Dimension>,
    pub current_page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

/// Compact form returned by `GET /dimension/all`, meant for pickers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DimensionSummary {
    pub id: Id,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub value_count: u64,
}

impl RestResource for Dimension {
    const PATH: &'static str = "dimension";

    type Create = DimensionCreate;
    type Update = DimensionUpdate;
    type ListParams = DimensionListParams;
    type Page = DimensionPage;
    type Created = Acknowledgement;
    type Updated = Acknowledgement;

    /// The dimension backend answers a missing id with 200 and
    /// `{"error": "..."}`.
    fn check_found(body: &str) -> ApiResult<()> {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(fields)) if fields.contains_key("error") => Err(ApiError::NotFound),
            _ => Ok(()),
        }
    }
}

impl ToggleResource for Dimension {
    type Summary = DimensionSummary;
}
