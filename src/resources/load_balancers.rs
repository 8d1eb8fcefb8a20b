//! Load Balancers
//!
//! Managed load balancers with their services, targets and health checks,
//! plus the catalogue of load balancer types.

use super::resource_actions::{ActionScope, ResourceActions};
use crate::http::HttpDispatcher;
use crate::query::append_query;
use crate::result::ApiResult;
use crate::types::{
    Action, ActionResponse, ChangeDnsPtrParams, ChangeProtectionParams, Labels, ListParams,
    Location, LocationPrice, Meta, MetricsParams, MetricsResponse, Protection,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Load balancer types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerType {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub max_connections: u64,
    pub max_services: u32,
    pub max_targets: u32,
    pub max_assigned_certificates: u32,
    /// Deprecation timestamp, if the type is being phased out
    #[serde(default)]
    pub deprecated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub prices: Vec<LocationPrice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerTypeResponse {
    pub load_balancer_type: LoadBalancerType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerTypesResponse {
    pub load_balancer_types: Vec<LoadBalancerType>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone)]
pub struct LoadBalancerTypes {
    http: HttpDispatcher,
}

impl LoadBalancerTypes {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self { http }
    }

    pub async fn list(
        &self,
        params: Option<&ListParams>,
    ) -> Result<ApiResult<LoadBalancerTypesResponse>> {
        let path = append_query("/load_balancer_types", params)?;
        self.http.get(&path).await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResult<LoadBalancerTypeResponse>> {
        self.http.get(&format!("/load_balancer_types/{}", id)).await
    }
}

// =============================================================================
// Services, targets, networking
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceProtocol {
    Tcp,
    Http,
    Https,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckHttp {
    #[serde(default)]
    pub domain: Option<String>,
    pub path: String,
    /// Expected response body
    #[serde(default)]
    pub response: Option<String>,
    /// e.g. `["2??", "3??"]`
    #[serde(default)]
    pub status_codes: Vec<String>,
    #[serde(default)]
    pub tls: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub protocol: ServiceProtocol,
    pub port: u16,
    /// Seconds
    pub interval: u32,
    /// Seconds
    pub timeout: u32,
    pub retries: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HealthCheckHttp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHttp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_lifetime: Option<u32>,
    /// Certificate IDs, for `https` services
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certificates: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_http: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticky_sessions: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerService {
    pub protocol: ServiceProtocol,
    pub listen_port: u16,
    pub destination_port: u16,
    #[serde(default)]
    pub proxyprotocol: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheck>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<ServiceHttp>,
}

/// Partial service update, identified by `listen_port`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateServiceParams {
    pub listen_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<ServiceProtocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxyprotocol: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<ServiceHttp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteServiceParams {
    pub listen_port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    Server,
    LabelSelector,
    Ip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetServer {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetLabelSelector {
    pub selector: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetIp {
    pub ip: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Healthy,
    Unhealthy,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetHealthStatus {
    pub listen_port: u16,
    pub status: HealthState,
}

/// Target as reported by the API, or as sent to `add_target`/`remove_target`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerTarget {
    #[serde(rename = "type")]
    pub kind: TargetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<TargetServer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_selector: Option<TargetLabelSelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<TargetIp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_private_ip: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub health_status: Vec<TargetHealthStatus>,
    /// Servers resolved from a label selector (responses only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<LoadBalancerTarget>,
}

impl LoadBalancerTarget {
    fn bare(kind: TargetType) -> Self {
        Self {
            kind,
            server: None,
            label_selector: None,
            ip: None,
            use_private_ip: None,
            health_status: Vec::new(),
            targets: Vec::new(),
        }
    }

    pub fn server(id: u64) -> Self {
        Self {
            server: Some(TargetServer { id }),
            ..Self::bare(TargetType::Server)
        }
    }

    pub fn label_selector(selector: impl Into<String>) -> Self {
        Self {
            label_selector: Some(TargetLabelSelector {
                selector: selector.into(),
            }),
            ..Self::bare(TargetType::LabelSelector)
        }
    }

    pub fn ip(ip: impl Into<String>) -> Self {
        Self {
            ip: Some(TargetIp { ip: ip.into() }),
            ..Self::bare(TargetType::Ip)
        }
    }

    pub fn with_private_ip(mut self, use_private_ip: bool) -> Self {
        self.use_private_ip = Some(use_private_ip);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmType {
    #[default]
    RoundRobin,
    LeastConnections,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Algorithm {
    #[serde(rename = "type")]
    pub kind: AlgorithmType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicIpDetail {
    pub ip: String,
    #[serde(default)]
    pub dns_ptr: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerPublicNet {
    pub enabled: bool,
    #[serde(default)]
    pub ipv4: Option<PublicIpDetail>,
    #[serde(default)]
    pub ipv6: Option<PublicIpDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerPrivateNet {
    pub network: u64,
    pub ip: String,
}

// =============================================================================
// Load balancers
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancer {
    pub id: u64,
    pub name: String,
    pub public_net: LoadBalancerPublicNet,
    #[serde(default)]
    pub private_net: Vec<LoadBalancerPrivateNet>,
    pub location: Location,
    pub load_balancer_type: LoadBalancerType,
    #[serde(default)]
    pub protection: Protection,
    #[serde(default)]
    pub labels: Labels,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub services: Vec<LoadBalancerService>,
    #[serde(default)]
    pub targets: Vec<LoadBalancerTarget>,
    pub algorithm: Algorithm,
    #[serde(default)]
    pub outgoing_traffic: Option<u64>,
    #[serde(default)]
    pub ingoing_traffic: Option<u64>,
    #[serde(default)]
    pub included_traffic: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerResponse {
    pub load_balancer: LoadBalancer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLoadBalancerResponse {
    pub load_balancer: LoadBalancer,
    #[serde(default)]
    pub action: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancersResponse {
    pub load_balancers: Vec<LoadBalancer>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateLoadBalancerParams {
    pub name: String,
    /// Type ID or name
    pub load_balancer_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<Algorithm>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<LoadBalancerService>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<LoadBalancerTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_interface: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<u64>,
    /// Either `network_zone` or `location` must be given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateLoadBalancerParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachLoadBalancerToNetworkParams {
    pub network: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetachLoadBalancerFromNetworkParams {
    pub network: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeLoadBalancerTypeParams {
    /// Type ID or name
    pub load_balancer_type: String,
}

pub type LoadBalancerActions = ResourceActions<LoadBalancers>;

#[derive(Debug, Clone)]
pub struct LoadBalancers {
    http: HttpDispatcher,
    actions: LoadBalancerActions,
    types: LoadBalancerTypes,
}

impl ActionScope for LoadBalancers {
    const PATH: &'static str = "/load_balancers";
}

impl LoadBalancers {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self {
            actions: LoadBalancerActions::new(http.clone()),
            types: LoadBalancerTypes::new(http.clone()),
            http,
        }
    }

    pub fn actions(&self) -> &LoadBalancerActions {
        &self.actions
    }

    pub fn types(&self) -> &LoadBalancerTypes {
        &self.types
    }

    pub async fn list(
        &self,
        params: Option<&ListParams>,
    ) -> Result<ApiResult<LoadBalancersResponse>> {
        let path = append_query("/load_balancers", params)?;
        self.http.get(&path).await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResult<LoadBalancerResponse>> {
        self.http.get(&format!("/load_balancers/{}", id)).await
    }

    pub async fn create(
        &self,
        params: &CreateLoadBalancerParams,
    ) -> Result<ApiResult<CreateLoadBalancerResponse>> {
        self.http.post("/load_balancers", params).await
    }

    pub async fn update(
        &self,
        id: u64,
        params: &UpdateLoadBalancerParams,
    ) -> Result<ApiResult<LoadBalancerResponse>> {
        self.http
            .put(&format!("/load_balancers/{}", id), params)
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<ApiResult<Option<ActionResponse>>> {
        self.http.delete(&format!("/load_balancers/{}", id)).await
    }

    /// Metrics such as `open_connections` or `requests_per_second`
    pub async fn get_metrics(
        &self,
        id: u64,
        params: &MetricsParams,
    ) -> Result<ApiResult<MetricsResponse>> {
        let path = append_query(&format!("/load_balancers/{}/metrics", id), Some(params))?;
        self.http.get(&path).await
    }
}

impl ResourceActions<LoadBalancers> {
    pub async fn add_service(
        &self,
        load_balancer_id: u64,
        service: &LoadBalancerService,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(load_balancer_id, "add_service", service).await
    }

    pub async fn update_service(
        &self,
        load_balancer_id: u64,
        params: &UpdateServiceParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(load_balancer_id, "update_service", params)
            .await
    }

    pub async fn delete_service(
        &self,
        load_balancer_id: u64,
        listen_port: u16,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(
            load_balancer_id,
            "delete_service",
            &DeleteServiceParams { listen_port },
        )
        .await
    }

    pub async fn add_target(
        &self,
        load_balancer_id: u64,
        target: &LoadBalancerTarget,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(load_balancer_id, "add_target", target).await
    }

    pub async fn remove_target(
        &self,
        load_balancer_id: u64,
        target: &LoadBalancerTarget,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(load_balancer_id, "remove_target", target).await
    }

    pub async fn attach_to_network(
        &self,
        load_balancer_id: u64,
        params: &AttachLoadBalancerToNetworkParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(load_balancer_id, "attach_to_network", params)
            .await
    }

    pub async fn detach_from_network(
        &self,
        load_balancer_id: u64,
        params: &DetachLoadBalancerFromNetworkParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(load_balancer_id, "detach_from_network", params)
            .await
    }

    pub async fn change_algorithm(
        &self,
        load_balancer_id: u64,
        algorithm: &Algorithm,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(load_balancer_id, "change_algorithm", algorithm)
            .await
    }

    pub async fn change_dns_ptr(
        &self,
        load_balancer_id: u64,
        params: &ChangeDnsPtrParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(load_balancer_id, "change_dns_ptr", params)
            .await
    }

    pub async fn change_protection(
        &self,
        load_balancer_id: u64,
        params: &ChangeProtectionParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(load_balancer_id, "change_protection", params)
            .await
    }

    pub async fn change_type(
        &self,
        load_balancer_id: u64,
        params: &ChangeLoadBalancerTypeParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(load_balancer_id, "change_type", params).await
    }

    pub async fn enable_public_interface(
        &self,
        load_balancer_id: u64,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command_empty(load_balancer_id, "enable_public_interface")
            .await
    }

    pub async fn disable_public_interface(
        &self,
        load_balancer_id: u64,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command_empty(load_balancer_id, "disable_public_interface")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_target_with_private_ip() {
        let target = LoadBalancerTarget::server(42).with_private_ip(true);
        assert_eq!(
            serde_json::to_value(&target).unwrap(),
            json!({"type": "server", "server": {"id": 42}, "use_private_ip": true})
        );
    }

    #[test]
    fn test_algorithm_body() {
        let algorithm = Algorithm {
            kind: AlgorithmType::LeastConnections,
        };
        assert_eq!(
            serde_json::to_value(algorithm).unwrap(),
            json!({"type": "least_connections"})
        );
    }

    #[test]
    fn test_label_selector_target_parses_resolved_servers() {
        let target: LoadBalancerTarget = serde_json::from_value(json!({
            "type": "label_selector",
            "label_selector": {"selector": "role=web"},
            "targets": [{
                "type": "server",
                "server": {"id": 80},
                "health_status": [{"listen_port": 443, "status": "healthy"}],
                "use_private_ip": false
            }]
        }))
        .unwrap();

        let resolved = &target.targets[0];
        assert_eq!(resolved.server, Some(TargetServer { id: 80 }));
        assert_eq!(resolved.health_status[0].status, HealthState::Healthy);
    }
}
