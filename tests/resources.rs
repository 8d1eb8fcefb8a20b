//! Route, method and body checks for the resource accessors
//!
//! Each test mounts a mock for one endpoint and asserts both what the
//! accessor sent and how it decoded the answer.

use chrono::{TimeZone, Utc};
use hcloud_api::resources::firewalls::{FirewallResource, FirewallRule, Protocol};
use hcloud_api::resources::load_balancers::{Algorithm, AlgorithmType, LoadBalancerTarget};
use hcloud_api::resources::networks::Route;
use hcloud_api::resources::primary_ips::{AssignPrimaryIpParams, AssigneeType};
use hcloud_api::resources::servers::{
    ChangeServerProtectionParams, EnableRescueParams, ListServersParams, ServerStatus,
};
use hcloud_api::resources::volumes::{AttachVolumeParams, ResizeVolumeParams};
use hcloud_api::resources::floating_ips::AssignFloatingIpParams;
use hcloud_api::types::{
    ActionStatus, ChangeDnsPtrParams, ChangeProtectionParams, ListParams, MetricsParams,
};
use hcloud_api::HetznerClient;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn action_json(id: u64, command: &str) -> Value {
    json!({
        "id": id,
        "command": command,
        "status": "running",
        "progress": 0,
        "started": "2016-01-30T23:50:00+00:00",
        "finished": null,
        "resources": [{"id": 42, "type": "server"}],
        "error": null
    })
}

fn location_json() -> Value {
    json!({
        "id": 1,
        "name": "fsn1",
        "description": "Falkenstein DC Park 1",
        "country": "DE",
        "city": "Falkenstein",
        "latitude": 50.47612,
        "longitude": 12.370071,
        "network_zone": "eu-central"
    })
}

async fn setup() -> (MockServer, HetznerClient) {
    let server = MockServer::start().await;
    let client = HetznerClient::with_base_url("token", &server.uri()).unwrap();
    (server, client)
}

async fn mount_action(server: &MockServer, verb: &str, route: &str, command: &str) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"action": action_json(13, command)})),
        )
        .expect(1)
        .mount(server)
        .await;
}

async fn only_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    requests.remove(0)
}

mod network_tests {
    use super::*;

    #[tokio::test]
    async fn test_add_route_posts_route_body() {
        let (server, client) = setup().await;
        mount_action(&server, "POST", "/networks/4711/actions/add_route", "add_route").await;

        let route = Route {
            destination: "10.100.1.0/24".into(),
            gateway: "10.0.1.1".into(),
        };
        let result = client
            .networks()
            .actions()
            .add_route(4711, &route)
            .await
            .unwrap();

        let action = result.success().unwrap().action;
        assert_eq!(action.command, "add_route");
        assert_eq!(action.status, ActionStatus::Running);

        let request = only_request(&server).await;
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body, json!({"destination": "10.100.1.0/24", "gateway": "10.0.1.1"}));
    }

    #[tokio::test]
    async fn test_actions_for_one_network() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/networks/4711/actions/13"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"action": action_json(13, "add_subnet")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = client.networks().actions().get_for(4711, 13).await.unwrap();
        assert_eq!(result.success().unwrap().action.id, 13);
    }
}

mod volume_tests {
    use super::*;

    #[tokio::test]
    async fn test_attach_and_resize_bodies() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/volumes/9/actions/attach"))
            .and(body_json(json!({"server": 42, "automount": true})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"action": action_json(1, "attach_volume")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/volumes/9/actions/resize"))
            .and(body_json(json!({"size": 100})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"action": action_json(2, "resize_volume")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let actions = client.volumes().actions();
        let attach = AttachVolumeParams {
            server: 42,
            automount: Some(true),
        };
        assert!(actions.attach(9, &attach).await.unwrap().is_success());
        assert!(actions
            .resize(9, &ResizeVolumeParams { size: 100 })
            .await
            .unwrap()
            .is_success());
    }

    #[tokio::test]
    async fn test_detach_sends_no_body() {
        let (server, client) = setup().await;
        mount_action(&server, "POST", "/volumes/9/actions/detach", "detach_volume").await;

        client.volumes().actions().detach(9).await.unwrap();

        assert!(only_request(&server).await.body.is_empty());
    }

    #[tokio::test]
    async fn test_delete_volume_no_content_is_none() {
        let (server, client) = setup().await;

        Mock::given(method("DELETE"))
            .and(path("/volumes/9"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let result = client.volumes().delete(9).await.unwrap();
        assert_eq!(result.success(), Some(None));
    }
}

mod firewall_tests {
    use super::*;

    #[tokio::test]
    async fn test_set_rules_wraps_rules() {
        let (server, client) = setup().await;

        let rule = FirewallRule::inbound(Protocol::Tcp, vec!["0.0.0.0/0".into()]).with_port("80");

        Mock::given(method("POST"))
            .and(path("/firewalls/38/actions/set_rules"))
            .and(body_json(json!({"rules": [{
                "direction": "in",
                "protocol": "tcp",
                "source_ips": ["0.0.0.0/0"],
                "port": "80"
            }]})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"actions": [action_json(13, "set_firewall_rules")]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = client
            .firewalls()
            .actions()
            .set_rules(38, &[rule])
            .await
            .unwrap();
        assert_eq!(result.success().unwrap().actions.len(), 1);
    }

    #[tokio::test]
    async fn test_apply_and_remove_resources() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/firewalls/38/actions/apply_to_resources"))
            .and(body_json(json!({"apply_to": [{"type": "server", "server": {"id": 42}}]})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"actions": []})))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/firewalls/38/actions/remove_from_resources"))
            .and(body_json(json!({"remove_from": [{
                "type": "label_selector",
                "label_selector": {"selector": "env=prod"}
            }]})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"actions": []})))
            .expect(1)
            .mount(&server)
            .await;

        let actions = client.firewalls().actions();
        actions
            .apply_to_resources(38, &[FirewallResource::server(42)])
            .await
            .unwrap();
        actions
            .remove_from_resources(38, &[FirewallResource::label_selector("env=prod")])
            .await
            .unwrap();
    }
}

mod ip_tests {
    use super::*;

    #[tokio::test]
    async fn test_floating_ip_assign_and_dns_ptr() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/floating_ips/3/actions/assign"))
            .and(body_json(json!({"server": 42})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"action": action_json(1, "assign_floating_ip")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/floating_ips/3/actions/change_dns_ptr"))
            .and(body_json(json!({"ip": "1.2.3.4", "dns_ptr": null})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"action": action_json(2, "change_dns_ptr")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let actions = client.floating_ips().actions();
        actions
            .assign(3, &AssignFloatingIpParams { server: 42 })
            .await
            .unwrap();
        actions
            .change_dns_ptr(
                3,
                &ChangeDnsPtrParams {
                    ip: "1.2.3.4".into(),
                    dns_ptr: None,
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_primary_ip_assign_body() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/primary_ips/5/actions/assign"))
            .and(body_json(json!({"assignee_id": 42, "assignee_type": "server"})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"action": action_json(1, "assign_primary_ip")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let params = AssignPrimaryIpParams {
            assignee_id: 42,
            assignee_type: AssigneeType::Server,
        };
        let result = client
            .servers()
            .primary_ips()
            .actions()
            .assign(5, &params)
            .await
            .unwrap();
        assert!(result.is_success());
    }
}

mod load_balancer_tests {
    use super::*;

    #[tokio::test]
    async fn test_service_and_target_commands() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/load_balancers/7/actions/delete_service"))
            .and(body_json(json!({"listen_port": 443})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"action": action_json(1, "delete_service")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/load_balancers/7/actions/add_target"))
            .and(body_json(json!({"type": "ip", "ip": {"ip": "203.0.113.1"}})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"action": action_json(2, "add_target")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/load_balancers/7/actions/change_algorithm"))
            .and(body_json(json!({"type": "least_connections"})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"action": action_json(3, "change_algorithm")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let actions = client.load_balancers().actions();
        actions.delete_service(7, 443).await.unwrap();
        actions
            .add_target(7, &LoadBalancerTarget::ip("203.0.113.1"))
            .await
            .unwrap();
        actions
            .change_algorithm(
                7,
                &Algorithm {
                    kind: AlgorithmType::LeastConnections,
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_enable_public_interface_sends_no_body() {
        let (server, client) = setup().await;
        mount_action(
            &server,
            "POST",
            "/load_balancers/7/actions/enable_public_interface",
            "enable_public_interface",
        )
        .await;

        client
            .load_balancers()
            .actions()
            .enable_public_interface(7)
            .await
            .unwrap();

        assert!(only_request(&server).await.body.is_empty());
    }

    #[tokio::test]
    async fn test_load_balancer_types_are_nested() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/load_balancer_types/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "load_balancer_type": {
                    "id": 1,
                    "name": "lb11",
                    "description": "LB11",
                    "max_connections": 20000,
                    "max_services": 5,
                    "max_targets": 25,
                    "max_assigned_certificates": 10,
                    "deprecated": null,
                    "prices": []
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client.load_balancers().types().get(1).await.unwrap();
        assert_eq!(result.success().unwrap().load_balancer_type.name, "lb11");
    }

    #[tokio::test]
    async fn test_metrics_query() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/load_balancers/7/metrics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "metrics": {
                    "start": "2017-01-01T00:00:00+00:00",
                    "end": "2017-01-01T23:00:00+00:00",
                    "step": 60,
                    "time_series": {"open_connections": {"values": [[1483228800.0, "12"]]}}
                }
            })))
            .mount(&server)
            .await;

        let params = MetricsParams::new(
            &["open_connections"],
            Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2017, 1, 1, 23, 0, 0).unwrap(),
        )
        .with_step(60);
        let result = client.load_balancers().get_metrics(7, &params).await.unwrap();
        let metrics = result.success().unwrap().metrics;
        assert_eq!(metrics.time_series["open_connections"].values[0].1, "12");

        let request = only_request(&server).await;
        let expected = concat!(
            "end=2017-01-01T23%3A00%3A00Z&start=2017-01-01T00%3A00%3A00Z",
            "&step=60&type=open_connections"
        );
        assert_eq!(request.url.query(), Some(expected));
    }
}

mod server_tests {
    use super::*;

    #[tokio::test]
    async fn test_corrected_action_routes() {
        let (server, client) = setup().await;
        mount_action(&server, "POST", "/servers/42/actions/change_dns_ptr", "change_dns_ptr").await;
        mount_action(&server, "POST", "/servers/42/actions/enable_backup", "enable_backup").await;
        mount_action(&server, "POST", "/servers/42/actions/disable_backup", "disable_backup").await;

        let actions = client.servers().actions();
        actions
            .change_dns_ptr(
                42,
                &ChangeDnsPtrParams {
                    ip: "1.2.3.4".into(),
                    dns_ptr: Some("server.example.com".into()),
                },
            )
            .await
            .unwrap();
        actions.enable_backup(42).await.unwrap();
        actions.disable_backup(42).await.unwrap();
    }

    #[tokio::test]
    async fn test_change_protection_sends_both_flags() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/servers/42/actions/change_protection"))
            .and(body_json(json!({"delete": true, "rebuild": false})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"action": action_json(1, "change_protection")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let params = ChangeServerProtectionParams {
            delete: Some(true),
            rebuild: Some(false),
        };
        client
            .servers()
            .actions()
            .change_protection(42, &params)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_enable_rescue_sends_body_and_returns_password() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/servers/42/actions/enable_rescue"))
            .and(body_json(json!({"type": "linux64", "ssh_keys": [2323]})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "action": action_json(1, "enable_rescue"),
                "root_password": "zCWbFhnu950dUTko5f40"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let params = EnableRescueParams {
            kind: Some("linux64".into()),
            ssh_keys: vec![2323],
        };
        let result = client
            .servers()
            .actions()
            .enable_rescue(42, &params)
            .await
            .unwrap();
        assert_eq!(
            result.success().unwrap().root_password.as_deref(),
            Some("zCWbFhnu950dUTko5f40")
        );
    }

    #[tokio::test]
    async fn test_request_console() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/servers/42/actions/request_console"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "action": action_json(1, "request_console"),
                "wss_url": "wss://console.hetzner.cloud/?server_id=1&token=3db32d15",
                "password": "9MQaTg2VAGI0FIpc10k3UpRXcHj2wQ6x"
            })))
            .mount(&server)
            .await;

        let result = client.servers().actions().request_console(42).await.unwrap();
        assert!(result.success().unwrap().wss_url.starts_with("wss://"));
    }

    #[tokio::test]
    async fn test_delete_server_returns_action() {
        let (server, client) = setup().await;

        Mock::given(method("DELETE"))
            .and(path("/servers/42"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"action": action_json(1, "delete_server")})),
            )
            .mount(&server)
            .await;

        let result = client.servers().delete(42).await.unwrap();
        assert_eq!(result.success().unwrap().action.command, "delete_server");
    }

    #[tokio::test]
    async fn test_list_with_status_filter() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/servers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"servers": []})))
            .mount(&server)
            .await;

        let params = ListServersParams {
            common: ListParams::default().with_label_selector("env=prod"),
            status: vec![ServerStatus::Running],
        };
        client.servers().list(Some(&params)).await.unwrap();

        let request = only_request(&server).await;
        assert_eq!(
            request.url.query(),
            Some("label_selector=env%3Dprod&status=running")
        );
    }

    #[tokio::test]
    async fn test_image_protection_is_nested_under_servers() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/images/4711/actions/change_protection"))
            .and(body_json(json!({"delete": true})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"action": action_json(1, "change_protection")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        client
            .servers()
            .images()
            .actions()
            .change_protection(4711, &ChangeProtectionParams { delete: true })
            .await
            .unwrap();
    }
}

mod catalogue_tests {
    use super::*;

    #[tokio::test]
    async fn test_datacenters_include_recommendation() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/datacenters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "datacenters": [{
                    "id": 1,
                    "name": "fsn1-dc8",
                    "description": "Falkenstein 1 DC 8",
                    "location": location_json(),
                    "server_types": {
                        "supported": [1, 2],
                        "available": [1],
                        "available_for_migration": [1]
                    }
                }],
                "recommendation": 1
            })))
            .mount(&server)
            .await;

        let response = client.datacenters().list(None).await.unwrap().success().unwrap();
        assert_eq!(response.recommendation, Some(1));
        assert_eq!(response.datacenters[0].location.name, "fsn1");
        assert_eq!(response.datacenters[0].server_types.supported, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_pricing() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/pricing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "pricing": {
                    "currency": "EUR",
                    "vat_rate": "19.00",
                    "primary_ips": [],
                    "floating_ips": [],
                    "image": {"price_per_gb_month": {"net": "1.00", "gross": "1.19"}},
                    "volume": {"price_per_gb_month": {"net": "1.00", "gross": "1.19"}},
                    "server_backup": {"percentage": "20.00"},
                    "server_types": [],
                    "load_balancer_types": []
                }
            })))
            .mount(&server)
            .await;

        let pricing = client.billing().get().await.unwrap().success().unwrap().pricing;
        assert_eq!(pricing.currency, "EUR");
        assert_eq!(pricing.server_backup.percentage, "20.00");
    }

    #[tokio::test]
    async fn test_location_get() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/locations/1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"location": location_json()})),
            )
            .mount(&server)
            .await;

        let location = client.locations().get(1).await.unwrap().success().unwrap().location;
        assert_eq!(location.network_zone, "eu-central");
    }

    #[tokio::test]
    async fn test_certificate_retry_and_ssh_key_delete() {
        let (server, client) = setup().await;
        mount_action(&server, "POST", "/certificates/897/actions/retry", "issue_certificate").await;

        Mock::given(method("DELETE"))
            .and(path("/ssh_keys/2323"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client.certificates().actions().retry(897).await.unwrap();
        assert!(client.ssh_keys().delete(2323).await.unwrap().is_success());
    }
}
