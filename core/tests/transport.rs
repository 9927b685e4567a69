//! Wire-level checks for `ReqwestTransport` using wiremock.
//!
//! These tests pin exactly what goes over the network: method, path, query,
//! headers, body, and that each call produces a single request.

use resource_core::{
    ApiError, ClientConfig, Dimension, HttpMethod, HttpRequest, ReqwestTransport, Resource, ResourceApi,
    ResourceCreate, ResourceListParams, ResourceUpdate, Transport,
};
use serde_json::json;
use wiremock::matchers::{bearer_token, body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer, token: Option<&str>) -> ClientConfig {
    ClientConfig {
        base_url: server.uri(),
        token: token.map(str::to_string),
        ..ClientConfig::default()
    }
}

#[tokio::test]
async fn list_sends_query_and_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resource/list"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "20"))
        .and(query_param("keyword", "foo"))
        .and(bearer_token("test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [{"id": 1, "name": "foo", "description": "bar"}],
            "total": 33
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api: ResourceApi<Resource> = ResourceApi::from_config(&config(&server, Some("test-token"))).unwrap();
    let params = ResourceListParams {
        skip: Some(0),
        limit: Some(20),
        keyword: Some("foo".to_string()),
    };
    let page = api.list(Some(&params)).await.unwrap();
    assert_eq!(page.total, 33);
    assert_eq!(page.list[0].name, "foo");
}

#[tokio::test]
async fn get_issues_one_request_and_returns_body_unchanged() {
    let server = MockServer::start().await;

    let body = json!({
        "id": 8,
        "name": "Orders",
        "description": "order table",
        "status": 1,
        "created_by": "admin"
    });
    Mock::given(method("GET"))
        .and(path("/resource/8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let api: ResourceApi<Resource> = ResourceApi::from_config(&config(&server, None)).unwrap();
    let resource = api.get(8).await.unwrap();
    assert_eq!(serde_json::to_value(&resource).unwrap(), body);
}

#[tokio::test]
async fn create_posts_json_without_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/resource"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "Orders", "description": "order table"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "name": "Orders", "description": "order table"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let local = Resource {
        id: Some(99),
        name: "Orders".to_string(),
        description: "order table".to_string(),
        status: None,
        created_by: None,
        created_at: None,
        updated_at: None,
    };
    let api: ResourceApi<Resource> = ResourceApi::from_config(&config(&server, None)).unwrap();
    let created = api.create(&ResourceCreate::from(&local)).await.unwrap();
    assert_eq!(created.id, Some(1));
}

#[tokio::test]
async fn update_puts_only_set_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/resource/3"))
        .and(body_json(json!({"description": "new"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "name": "kept", "description": "new"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api: ResourceApi<Resource> = ResourceApi::from_config(&config(&server, None)).unwrap();
    let updated = api
        .update(
            3,
            &ResourceUpdate {
                description: Some("new".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "kept");
}

#[tokio::test]
async fn batch_delete_posts_ids() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/resource/batch-delete"))
        .and(body_json(json!({"ids": [4, 5]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let api: ResourceApi<Resource> = ResourceApi::from_config(&config(&server, None)).unwrap();
    api.batch_delete(&[4, 5]).await.unwrap();
}

#[tokio::test]
async fn enable_sends_patch_with_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/dimension/5/enable"))
        .and(query_param("enabled", "false"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Dimension disabled successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api: ResourceApi<Dimension> = ResourceApi::from_config(&config(&server, None)).unwrap();
    api.enable(5, false).await.unwrap();
}

#[tokio::test]
async fn all_sends_enabled_only() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dimension/all"))
        .and(query_param("enabled_only", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Region", "code": "region", "description": null, "value_count": 4}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api: ResourceApi<Dimension> = ResourceApi::from_config(&config(&server, None)).unwrap();
    let all = api.all(true).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].value_count, 4);
}

#[tokio::test]
async fn status_404_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/resource/12"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "not found"})))
        .expect(1)
        .mount(&server)
        .await;

    let api: ResourceApi<Resource> = ResourceApi::from_config(&config(&server, None)).unwrap();
    assert!(api.delete(12).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn server_error_keeps_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resource/list"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let api: ResourceApi<Resource> = ResourceApi::from_config(&config(&server, None)).unwrap();
    match api.list(None).await.unwrap_err() {
        ApiError::HttpError { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn invalid_arguments_never_reach_the_server() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api: ResourceApi<Resource> = ResourceApi::from_config(&config(&server, None)).unwrap();
    assert!(matches!(api.get(0).await, Err(ApiError::InvalidArgument(_))));
    assert!(matches!(api.batch_delete(&[]).await, Err(ApiError::InvalidArgument(_))));
}

#[tokio::test]
async fn transport_returns_error_statuses_as_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/anything"))
        .respond_with(ResponseTemplate::new(418).insert_header("x-teapot", "yes").set_body_string("short and stout"))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(&config(&server, None)).unwrap();
    let response = transport
        .execute(HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/anything", server.uri()),
            headers: Vec::new(),
            body: None,
        })
        .await
        .unwrap();
    assert_eq!(response.status, 418);
    assert_eq!(response.body, "short and stout");
    assert!(response.headers.iter().any(|(k, v)| k == "x-teapot" && v == "yes"));
}
