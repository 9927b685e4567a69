//! Stateless HTTP request builder and response parser for any `RestResource`.
//!
//! # Design
//! `ResourceClient<R>` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Paths follow one scheme for every entity:
//!
//! | verb | request |
//! |---|---|
//! | list | `GET /R/list?..` |
//! | get | `GET /R/{id}` |
//! | create | `POST /R` |
//! | update | `PUT /R/{id}` |
//! | delete | `DELETE /R/{id}` |
//! | batch delete | `POST /R/batch-delete` |
//! | all (toggle) | `GET /R/all?enabled_only=..` |
//! | enable (toggle) | `PATCH /R/{id}/enable?enabled=..` |
//!
//! Ids must be positive and batch deletes non-empty; both are checked in
//! `build_*` so a rejected call never reaches the transport.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::{ApiError, ApiResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::resource::{BatchDeleteResource, RestResource, ToggleResource};
use crate::types::{BatchDelete, Id};

/// Synchronous, stateless client for one entity type.
pub struct ResourceClient<R> {
    base_url: String,
    _entity: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            _entity: PhantomData,
        }
    }
}

impl<R> fmt::Debug for ResourceClient<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("base_url", &self.base_url)
            .field("entity", &std::any::type_name::<R>())
            .finish()
    }
}

impl<R: RestResource> ResourceClient<R> {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            _entity: PhantomData,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, R::PATH)
    }

    fn member_url(&self, id: Id) -> ApiResult<String> {
        check_id(id)?;
        Ok(format!("{}/{}/{id}", self.base_url, R::PATH))
    }

    /// `None` and an all-unset params value both produce a bare `/R/list`.
    pub fn build_list(&self, params: Option<&R::ListParams>) -> ApiResult<HttpRequest> {
        let pairs = match params {
            Some(params) => query_pairs(params)?,
            None => Vec::new(),
        };
        let url = with_query(format!("{}/list", self.collection_url()), &pairs);
        Ok(bodyless(HttpMethod::Get, url))
    }

    pub fn build_get(&self, id: Id) -> ApiResult<HttpRequest> {
        Ok(bodyless(HttpMethod::Get, self.member_url(id)?))
    }

    pub fn build_create(&self, input: &R::Create) -> ApiResult<HttpRequest> {
        json_request(HttpMethod::Post, self.collection_url(), input)
    }

    pub fn build_update(&self, id: Id, input: &R::Update) -> ApiResult<HttpRequest> {
        json_request(HttpMethod::Put, self.member_url(id)?, input)
    }

    pub fn build_delete(&self, id: Id) -> ApiResult<HttpRequest> {
        Ok(bodyless(HttpMethod::Delete, self.member_url(id)?))
    }

    pub fn parse_list(&self, response: HttpResponse) -> ApiResult<R::Page> {
        decode(response)
    }

    pub fn parse_get(&self, response: HttpResponse) -> ApiResult<R> {
        check_status(&response)?;
        R::check_found(&response.body)?;
        decode(response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> ApiResult<R::Created> {
        decode(response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> ApiResult<R::Updated> {
        decode(response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> ApiResult<()> {
        check_status(&response)
    }
}

impl<R: BatchDeleteResource> ResourceClient<R> {
    pub fn build_batch_delete(&self, ids: &[Id]) -> ApiResult<HttpRequest> {
        if ids.is_empty() {
            return Err(ApiError::InvalidArgument(
                "batch delete needs at least one id".to_string(),
            ));
        }
        for &id in ids {
            check_id(id)?;
        }
        let body = BatchDelete { ids: ids.to_vec() };
        json_request(
            HttpMethod::Post,
            format!("{}/batch-delete", self.collection_url()),
            &body,
        )
    }

    pub fn parse_batch_delete(&self, response: HttpResponse) -> ApiResult<()> {
        check_status(&response)
    }
}

impl<R: ToggleResource> ResourceClient<R> {
    pub fn build_all(&self, enabled_only: bool) -> HttpRequest {
        let pairs = [("enabled_only".to_string(), enabled_only.to_string())];
        let url = with_query(format!("{}/all", self.collection_url()), &pairs);
        bodyless(HttpMethod::Get, url)
    }

    /// The flag travels in the query string; the request has no body.
    pub fn build_enable(&self, id: Id, enabled: bool) -> ApiResult<HttpRequest> {
        let pairs = [("enabled".to_string(), enabled.to_string())];
        let url = with_query(format!("{}/enable", self.member_url(id)?), &pairs);
        Ok(bodyless(HttpMethod::Patch, url))
    }

    pub fn parse_all(&self, response: HttpResponse) -> ApiResult<Vec<R::Summary>> {
        decode(response)
    }

    pub fn parse_enable(&self, response: HttpResponse) -> ApiResult<()> {
        check_status(&response)
    }
}

fn check_id(id: Id) -> ApiResult<()> {
    if id == 0 {
        return Err(ApiError::InvalidArgument("id must be positive".to_string()));
    }
    Ok(())
}

fn bodyless(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn json_request<T: Serialize + ?Sized>(
    method: HttpMethod,
    path: String,
    input: &T,
) -> ApiResult<HttpRequest> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

/// Flatten a params struct into query pairs in field order, dropping nulls.
fn query_pairs<T: Serialize>(params: &T) -> ApiResult<Vec<(String, String)>> {
    let value = serde_json::to_value(params).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(ApiError::SerializationError(
            "query parameters must serialize to an object".to_string(),
        ));
    };
    fields
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some(Ok((key, s))),
            Value::Bool(b) => Some(Ok((key, b.to_string()))),
            Value::Number(n) => Some(Ok((key, n.to_string()))),
            Value::Array(_) | Value::Object(_) => Some(Err(ApiError::SerializationError(format!(
                "query parameter `{key}` is not a scalar"
            )))),
        })
        .collect()
}

fn with_query(mut url: String, pairs: &[(String, String)]) -> String {
    if !pairs.is_empty() {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish();
        url.push('?');
        url.push_str(&query);
    }
    url
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> ApiResult<()> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> ApiResult<T> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
