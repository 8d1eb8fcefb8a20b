//! Integration tests for the request dispatcher using wiremock
//!
//! These tests verify the dispatcher against mocked endpoints: header policy,
//! response normalization, and the client-level scenarios built on top of it.

use hcloud_api::resources::networks::CreateNetworkParams;
use hcloud_api::types::{ListActionsParams, ListParams};
use hcloud_api::{ApiResult, HetznerClient, HttpDispatcher};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::{json, Value};
use wiremock::matchers::{bearer_token, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn network_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "ip_range": "10.0.0.0/16",
        "subnets": [],
        "routes": [],
        "servers": [],
        "load_balancers": [],
        "protection": {"delete": false},
        "labels": {},
        "created": "2016-01-30T23:55:00+00:00",
        "expose_routes_to_vswitch": false
    })
}

fn error_json(code: &str, message: &str) -> Value {
    json!({"error": {"code": code, "message": message}})
}

async fn client_for(server: &MockServer) -> HetznerClient {
    HetznerClient::with_base_url(TOKEN, &server.uri()).expect("client should build")
}

/// Dispatcher behavior independent of any resource
mod dispatcher_tests {
    use super::*;

    /// Every request carries the bearer token and a JSON content type
    #[tokio::test]
    async fn test_fixed_headers_are_sent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/locations"))
            .and(bearer_token(TOKEN))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"locations": []})))
            .expect(1)
            .mount(&server)
            .await;

        let http = HttpDispatcher::new(TOKEN, &server.uri()).unwrap();
        let result = http.get::<Value>("/locations").await.unwrap();

        assert!(result.is_success());
    }

    /// Caller headers are forwarded but cannot replace the fixed pair
    #[tokio::test]
    async fn test_caller_headers_merge_and_fixed_pair_wins() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/networks"))
            .and(bearer_token(TOKEN))
            .and(header("content-type", "application/json"))
            .and(header("x-request-tag", "nightly"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"network": network_json(1, "n")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut headers = HeaderMap::new();
        headers.insert("x-request-tag", HeaderValue::from_static("nightly"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer someone-else"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        let http = HttpDispatcher::new(TOKEN, &server.uri()).unwrap();
        let result = http
            .dispatch::<Value, _>(
                Method::POST,
                "/networks",
                headers,
                Some(&json!({"name": "n", "ip_range": "10.0.0.0/16"})),
            )
            .await
            .unwrap();

        assert!(result.is_success());
    }

    /// 204 No Content decodes as the unit payload
    #[tokio::test]
    async fn test_no_content_is_success_with_unit() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/networks/7"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.networks().delete(7).await.unwrap();

        assert_eq!(result, ApiResult::Success(()));
    }

    /// Non-2xx bodies come back as Failure with the API's error object
    #[tokio::test]
    async fn test_error_status_yields_failure_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/networks"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "error": {
                    "code": "invalid_input",
                    "message": "invalid input in field 'ip_range'",
                    "details": {"fields": [{"name": "ip_range", "messages": ["is invalid"]}]}
                }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let params = CreateNetworkParams {
            name: "bad".into(),
            ip_range: "nope".into(),
            ..Default::default()
        };
        let result = client.networks().create(&params).await.unwrap();

        let error = result.failure().expect("should be a failure");
        assert_eq!(error.code(), "invalid_input");
        assert_eq!(error.field_errors()[0].name, "ip_range");
    }

    /// A body that is not JSON is a fault, not a Failure
    #[tokio::test]
    async fn test_malformed_json_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/networks/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.networks().get(1).await.unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to parse response JSON"));
    }

    /// Error bodies of any shape are passed through as Failure
    #[tokio::test]
    async fn test_unexpected_error_shape_is_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/networks/1"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"oops": true})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let error = client.networks().get(1).await.unwrap().failure().unwrap();

        assert_eq!(error.body(), &json!({"oops": true}));
        assert_eq!(error.code(), "");
    }

    /// An error object missing `message` is still a Failure
    #[tokio::test]
    async fn test_partial_error_object_is_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/servers/1"))
            .respond_with(
                ResponseTemplate::new(503).set_body_json(json!({"error": {"code": "unavailable"}})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.servers().get(1).await.unwrap();

        let error = result.failure().expect("should be a failure");
        assert_eq!(error.code(), "unavailable");
        assert_eq!(error.body(), &json!({"error": {"code": "unavailable"}}));
    }

    /// Unreachable hosts surface as faults
    #[tokio::test]
    async fn test_connection_refused_is_an_error() {
        let client = HetznerClient::with_base_url(TOKEN, "http://127.0.0.1:9").unwrap();
        let err = client.locations().list(None).await.unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to send request"));
    }
}

/// Scenarios exercised through the typed accessors
mod client_tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_token_is_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/networks"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(error_json("unauthorized", "unable to authenticate")),
            )
            .mount(&server)
            .await;

        let client = HetznerClient::with_base_url("invalid-token", &server.uri()).unwrap();
        let result = client.networks().list(None).await.unwrap();

        assert!(result.is_failure());
        assert_eq!(result.failure().unwrap().code(), "unauthorized");
    }

    #[tokio::test]
    async fn test_missing_id_is_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/servers/999999999"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(error_json("not_found", "server with ID '999999999' not found")),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.servers().get(999999999).await.unwrap();

        assert_eq!(result.failure().unwrap().code(), "not_found");
    }

    #[tokio::test]
    async fn test_empty_list_is_success_with_empty_vec() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/volumes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "volumes": [],
                "meta": {"pagination": {
                    "page": 1, "per_page": 25, "previous_page": null,
                    "next_page": null, "last_page": 1, "total_entries": 0
                }}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client.volumes().list(None).await.unwrap().success().unwrap();

        assert!(response.volumes.is_empty());
        let pagination = response.meta.unwrap().pagination.unwrap();
        assert_eq!(pagination.total_entries, Some(0));
    }

    /// Exact query string reaches the server
    #[tokio::test]
    async fn test_list_params_become_query_string() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/networks"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"networks": []})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client
            .networks()
            .list(Some(&ListParams::page(2, 10)))
            .await
            .unwrap();
        assert!(result.is_success());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.query(), Some("page=2&per_page=10"));
    }

    /// Action filters repeat keys and leave unset fields out
    #[tokio::test]
    async fn test_action_filter_repeats_ids() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/actions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"actions": []})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let params = ListActionsParams {
            id: vec![4, 8],
            ..Default::default()
        };
        client.actions().list(Some(&params)).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("id=4&id=8"));
    }

    /// create -> get -> delete -> get reports the resource, then its absence
    #[tokio::test]
    async fn test_create_get_delete_get_sequence() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/networks"))
            .and(body_json(json!({"name": "seq", "ip_range": "10.0.0.0/16"})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"network": network_json(5, "seq")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/networks/5"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"network": network_json(5, "seq")})),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/networks/5"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/networks/5"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(error_json("not_found", "network not found")),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let networks = client.networks();

        let params = CreateNetworkParams {
            name: "seq".into(),
            ip_range: "10.0.0.0/16".into(),
            ..Default::default()
        };
        let created = networks.create(&params).await.unwrap().success().unwrap();
        assert_eq!(created.network.id, 5);

        let fetched = networks.get(5).await.unwrap().success().unwrap();
        assert_eq!(fetched.network.name, "seq");

        assert!(networks.delete(5).await.unwrap().is_success());

        let gone = networks.get(5).await.unwrap();
        assert_eq!(gone.failure().unwrap().code(), "not_found");
    }

    /// Repeated reads of one resource yield identical payloads
    #[tokio::test]
    async fn test_repeated_get_returns_identical_payloads() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/networks/12"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"network": network_json(12, "same")})),
            )
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let networks = client.networks();

        let first = networks.get(12).await.unwrap();
        let second = networks.get(12).await.unwrap();

        assert!(first.is_success());
        assert_eq!(first, second);
    }

    /// Nested accessors authenticate with the parent's token
    #[tokio::test]
    async fn test_nested_accessor_uses_same_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/server_types"))
            .and(bearer_token(TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"server_types": []})))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/networks/actions"))
            .and(bearer_token(TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"actions": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.servers().server_types().list(None).await.unwrap().is_success());
        assert!(client.networks().actions().list(None).await.unwrap().is_success());
    }

    /// Concurrent calls are independent of each other
    #[tokio::test]
    async fn test_concurrent_requests_are_independent() {
        let server = MockServer::start().await;

        for id in 1..=3u64 {
            Mock::given(method("GET"))
                .and(path(format!("/networks/{}", id)))
                .respond_with(ResponseTemplate::new(200).set_body_json(
                    json!({"network": network_json(id, &format!("net-{}", id))}),
                ))
                .mount(&server)
                .await;
        }

        Mock::given(method("GET"))
            .and(path("/networks/4"))
            .respond_with(ResponseTemplate::new(404).set_body_json(error_json("not_found", "nope")))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let networks = client.networks();

        let results = futures::future::join_all((1..=4u64).map(|id| networks.get(id))).await;

        for (i, result) in results.into_iter().enumerate() {
            let result = result.unwrap();
            let id = i as u64 + 1;
            if id == 4 {
                assert!(result.is_failure());
            } else {
                assert_eq!(result.success().unwrap().network.name, format!("net-{}", id));
            }
        }
    }

    /// Dispatcher futures can be driven outside an async test
    #[test]
    fn test_block_on_drives_dispatch() {
        let server = tokio_test::block_on(MockServer::start());

        tokio_test::block_on(
            Mock::given(method("GET"))
                .and(path("/pricing"))
                .respond_with(
                    ResponseTemplate::new(401).set_body_json(error_json("unauthorized", "no")),
                )
                .mount(&server),
        );

        let client = HetznerClient::with_base_url(TOKEN, &server.uri()).unwrap();
        let result = tokio_test::block_on(client.billing().get()).unwrap();

        assert!(result.is_failure());
    }
}
