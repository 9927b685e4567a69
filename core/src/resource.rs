//! Entity descriptors for the generic client.
//!
//! # Design
//! An entity type implements `RestResource` to tell `ResourceClient` where it
//! lives (`PATH`) and which DTOs travel over each verb. The client itself has
//! a single implementation shared by every entity; adding a new entity means
//! adding its DTOs and one `impl RestResource`.
//!
//! Create and update reply types are per entity: `Resource` echoes itself,
//! `Dimension` answers with an `Acknowledgement`.
//!
//! Optional capabilities are separate traits: `ToggleResource` for the
//! enable flag and `BatchDeleteResource` for `POST /{PATH}/batch-delete`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiResult;

/// A backend-managed entity reachable under `/{PATH}`.
pub trait RestResource: DeserializeOwned {
    /// Path segment without slashes, e.g. `"resource"`.
    const PATH: &'static str;

    /// Creation payload. Carries no identifier and no audit fields.
    type Create: Serialize;

    /// Partial patch payload. Unset fields must be skipped on serialization.
    type Update: Serialize;

    /// Query parameters for `list`. Unset fields must be skipped on
    /// serialization; field order is the query string order.
    type ListParams: Serialize;

    /// Decoded body of `GET /{PATH}/list`.
    type Page: DeserializeOwned;

    /// Decoded body of `POST /{PATH}`.
    type Created: DeserializeOwned;

    /// Decoded body of `PUT /{PATH}/{id}`.
    type Updated: DeserializeOwned;

    /// Inspect a 2xx `GET /{PATH}/{id}` body before it is decoded. Backends
    /// that report a missing entity in-band override this to return
    /// `ApiError::NotFound`.
    fn check_found(_body: &str) -> ApiResult<()> {
        Ok(())
    }
}

/// An entity whose backend serves `POST /{PATH}/batch-delete`.
///
/// `Dimension` has no such route, so its client has no `batch_delete`:
///
/// ```compile_fail
/// use resource_core::{Dimension, ResourceClient};
///
/// let client: ResourceClient<Dimension> = ResourceClient::new("http://localhost:3000");
/// let _ = client.build_batch_delete(&[1, 2]);
/// ```
pub trait BatchDeleteResource: RestResource {}

/// An entity with an `enabled` flag flipped through its own endpoint.
pub trait ToggleResource: RestResource {
    /// Element type of `GET /{PATH}/all`.
    type Summary: DeserializeOwned;
}
