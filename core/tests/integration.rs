//! Full lifecycle tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every
//! `ResourceApi` operation over real HTTP through `ReqwestTransport`.
//! Validates that request building, the transport, and response parsing work
//! end-to-end and that the client DTOs match the server's schema.

use mock_server::Store;
use resource_core::{
    ApiError, ClientConfig, Dimension, DimensionCreate, DimensionListParams, DimensionUpdate, Resource, ResourceApi,
    ResourceCreate, ResourceListParams, ResourceUpdate,
};
use tokio::net::TcpListener;

/// Bind a random port, serve `store` on it, and return a matching config.
async fn start_server(store: Store) -> ClientConfig {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run_app(listener, mock_server::app_with(store)));
    ClientConfig {
        base_url: format!("http://{addr}"),
        ..ClientConfig::default()
    }
}

#[tokio::test]
async fn resource_crud_lifecycle() {
    let config = start_server(Store::default()).await;
    let api: ResourceApi<Resource> = ResourceApi::from_config(&config).unwrap();

    // Step 1: list — should be empty.
    let page = api.list(None).await.unwrap();
    assert!(page.list.is_empty(), "expected empty list");
    assert_eq!(page.total, 0);

    // Step 2: create.
    let input = ResourceCreate {
        name: "Orders".to_string(),
        description: "order table".to_string(),
    };
    let created = api.create(&input).await.unwrap();
    let id = created.id.expect("server assigns an id");
    assert_eq!(created.name, input.name);
    assert!(created.created_at.is_some());

    // Step 3: get returns the submitted required fields.
    let fetched = api.get(id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.description, input.description);

    // Step 4: partial update leaves other fields alone.
    let updated = api
        .update(
            id,
            &ResourceUpdate {
                status: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, Some(2));
    assert_eq!(updated.name, "Orders");
    assert!(updated.updated_at.is_some());

    // Step 5: create two more and page through them.
    for name in ["Invoices", "Order lines"] {
        api.create(&ResourceCreate {
            name: name.to_string(),
            description: String::new(),
        })
        .await
        .unwrap();
    }
    let params = ResourceListParams {
        skip: Some(0),
        limit: Some(1),
        keyword: Some("order".to_string()),
    };
    let page = api.list(Some(&params)).await.unwrap();
    assert_eq!(page.list.len(), 1);
    assert_eq!(page.total, 2);

    // Step 6: delete, then get and delete again — NotFound.
    api.delete(id).await.unwrap();
    assert!(matches!(api.get(id).await, Err(ApiError::NotFound)));
    assert!(matches!(api.delete(id).await, Err(ApiError::NotFound)));

    // Step 7: batch delete the rest.
    let remaining: Vec<u64> = api
        .list(None)
        .await
        .unwrap()
        .list
        .iter()
        .filter_map(|r| r.id)
        .collect();
    assert_eq!(remaining.len(), 2);
    api.batch_delete(&remaining).await.unwrap();
    assert_eq!(api.list(None).await.unwrap().total, 0);

    // Step 8: empty batch never leaves the client.
    assert!(matches!(
        api.batch_delete(&[]).await,
        Err(ApiError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn dimension_lifecycle() {
    let config = start_server(Store::default().with_system_dimension("Region", "region", &["north", "south"])).await;
    let api: ResourceApi<Dimension> = ResourceApi::from_config(&config).unwrap();

    // Step 1: create.
    let ack = api
        .create(&DimensionCreate {
            name: "Order status".to_string(),
            code: "order_status".to_string(),
            description: Some("lifecycle of an order".to_string()),
            values: vec!["pending".to_string(), "shipped".to_string(), "done".to_string()],
            value_labels: Some(
                [("done".to_string(), "Completed".to_string())]
                    .into_iter()
                    .collect(),
            ),
            enabled: None,
        })
        .await
        .unwrap();
    let id = ack.id.expect("create acknowledges with the new id");

    let dim = api.get(id).await.unwrap();
    assert_eq!(dim.code, "order_status");
    assert_eq!(dim.value_count, 3);
    assert_eq!(dim.value_labels.get("done").map(String::as_str), Some("Completed"));
    assert!(dim.enabled);
    assert!(!dim.is_system);

    // Step 2: duplicate code is a server-side 400, passed through unchanged.
    let err = api
        .create(&DimensionCreate {
            name: "Again".to_string(),
            code: "order_status".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 400, .. }));

    // Step 3: partial update.
    api.update(
        id,
        &DimensionUpdate {
            values: Some(vec!["pending".to_string(), "done".to_string()]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let dim = api.get(id).await.unwrap();
    assert_eq!(dim.value_count, 2);
    assert_eq!(dim.name, "Order status");

    // Step 4: disable through the toggle endpoint; content is untouched.
    api.enable(id, false).await.unwrap();
    let dim = api.get(id).await.unwrap();
    assert!(!dim.enabled);
    assert_eq!(dim.values, ["pending", "done"]);

    let enabled: Vec<String> = api.all(true).await.unwrap().into_iter().map(|d| d.code).collect();
    assert_eq!(enabled, ["region"]);
    let everything = api.all(false).await.unwrap();
    assert_eq!(everything.len(), 2);

    // Step 5: filtered page.
    let page = api
        .list(Some(&DimensionListParams {
            enabled: Some(false),
            ..Default::default()
        }))
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].id, id);
    assert_eq!(page.current_page, 1);

    // Step 6: system dimensions refuse deletion; ours goes away.
    let system_id = everything.iter().find(|d| d.code == "region").unwrap().id;
    assert!(matches!(
        api.delete(system_id).await,
        Err(ApiError::HttpError { status: 400, .. })
    ));
    api.delete(id).await.unwrap();
    assert!(api.get(id).await.unwrap_err().is_not_found());
    assert!(api.enable(id, true).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Bind and drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig {
        base_url: format!("http://{addr}"),
        ..ClientConfig::default()
    };
    let api: ResourceApi<Resource> = ResourceApi::from_config(&config).unwrap();
    assert!(matches!(api.get(1).await, Err(ApiError::Transport(_))));
}
