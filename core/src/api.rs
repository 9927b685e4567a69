//! Async facade: one method per verb, one request per call.
//!
//! `ResourceApi` pairs a `ResourceClient` with a `Transport` and runs
//! build → execute → parse. Calls share no mutable state; callers that need
//! ordering between, say, an `update` and a `delete` on the same id must
//! await them in sequence themselves.

use crate::client::ResourceClient;
use crate::config::ClientConfig;
use crate::error::ApiResult;
use crate::resource::{BatchDeleteResource, RestResource, ToggleResource};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::Id;

pub struct ResourceApi<R, T = ReqwestTransport> {
    client: ResourceClient<R>,
    transport: T,
}

impl<R, T: Clone> Clone for ResourceApi<R, T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            transport: self.transport.clone(),
        }
    }
}

impl<R: RestResource> ResourceApi<R, ReqwestTransport> {
    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        Ok(Self::new(
            ResourceClient::new(&config.base_url),
            ReqwestTransport::new(config)?,
        ))
    }
}

impl<R: RestResource, T: Transport> ResourceApi<R, T> {
    pub fn new(client: ResourceClient<R>, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ResourceClient<R> {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch one page. `None` leaves paging and filtering to the server.
    #[tracing::instrument(skip_all, fields(resource = R::PATH))]
    pub async fn list(&self, params: Option<&R::ListParams>) -> ApiResult<R::Page> {
        let request = self.client.build_list(params)?;
        self.client.parse_list(self.transport.execute(request).await?)
    }

    #[tracing::instrument(skip_all, fields(resource = R::PATH, id = id))]
    pub async fn get(&self, id: Id) -> ApiResult<R> {
        let request = self.client.build_get(id)?;
        self.client.parse_get(self.transport.execute(request).await?)
    }

    #[tracing::instrument(skip_all, fields(resource = R::PATH))]
    pub async fn create(&self, input: &R::Create) -> ApiResult<R::Created> {
        let request = self.client.build_create(input)?;
        self.client.parse_create(self.transport.execute(request).await?)
    }

    /// Partial update; fields left unset in `input` keep their server value.
    #[tracing::instrument(skip_all, fields(resource = R::PATH, id = id))]
    pub async fn update(&self, id: Id, input: &R::Update) -> ApiResult<R::Updated> {
        let request = self.client.build_update(id, input)?;
        self.client.parse_update(self.transport.execute(request).await?)
    }

    /// Deleting an id that is already gone yields `ApiError::NotFound`.
    #[tracing::instrument(skip_all, fields(resource = R::PATH, id = id))]
    pub async fn delete(&self, id: Id) -> ApiResult<()> {
        let request = self.client.build_delete(id)?;
        self.client.parse_delete(self.transport.execute(request).await?)
    }
}

impl<R: BatchDeleteResource, T: Transport> ResourceApi<R, T> {
    /// An empty `ids` slice fails with `InvalidArgument` and sends nothing.
    #[tracing::instrument(skip_all, fields(resource = R::PATH, count = ids.len()))]
    pub async fn batch_delete(&self, ids: &[Id]) -> ApiResult<()> {
        let request = self.client.build_batch_delete(ids)?;
        self.client
            .parse_batch_delete(self.transport.execute(request).await?)
    }
}

impl<R: ToggleResource, T: Transport> ResourceApi<R, T> {
    /// Unpaginated listing, optionally restricted to enabled entries.
    #[tracing::instrument(skip_all, fields(resource = R::PATH, enabled_only = enabled_only))]
    pub async fn all(&self, enabled_only: bool) -> ApiResult<Vec<R::Summary>> {
        let request = self.client.build_all(enabled_only);
        self.client.parse_all(self.transport.execute(request).await?)
    }

    /// Flip only the `enabled` flag; every other field is left alone.
    #[tracing::instrument(skip_all, fields(resource = R::PATH, id = id, enabled = enabled))]
    pub async fn enable(&self, id: Id, enabled: bool) -> ApiResult<()> {
        let request = self.client.build_enable(id, enabled)?;
        self.client.parse_enable(self.transport.execute(request).await?)
    }
}
