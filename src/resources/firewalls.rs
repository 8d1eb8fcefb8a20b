//! Firewalls
//!
//! Rule sets limiting traffic to and from servers. A firewall is applied
//! either to individual servers or to every server matching a label selector.

use super::resource_actions::{ActionScope, ResourceActions};
use crate::http::HttpDispatcher;
use crate::query::append_query;
use crate::result::ApiResult;
use crate::types::{Action, ActionsResponse, Labels, ListParams, Meta};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    Tcp,
    Udp,
    Icmp,
    Esp,
    Gre,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallRule {
    pub direction: Direction,
    pub protocol: Protocol,
    /// Used with `direction: in`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_ips: Vec<String>,
    /// Used with `direction: out`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub destination_ips: Vec<String>,
    /// Single port `"80"` or range `"80-443"`; only for tcp and udp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FirewallRule {
    /// Inbound rule accepting `protocol` from `source_ips`
    pub fn inbound(protocol: Protocol, source_ips: Vec<String>) -> Self {
        Self {
            direction: Direction::In,
            protocol,
            source_ips,
            destination_ips: Vec::new(),
            port: None,
            description: None,
        }
    }

    /// Outbound rule accepting `protocol` to `destination_ips`
    pub fn outbound(protocol: Protocol, destination_ips: Vec<String>) -> Self {
        Self {
            direction: Direction::Out,
            protocol,
            source_ips: Vec::new(),
            destination_ips,
            port: None,
            description: None,
        }
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRef {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSelector {
    pub selector: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirewallResourceType {
    Server,
    LabelSelector,
}

/// Target a firewall is applied to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallResource {
    #[serde(rename = "type")]
    pub kind: FirewallResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_selector: Option<LabelSelector>,
    /// Servers currently matched by a label selector (responses only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applied_to_resources: Vec<FirewallResource>,
}

impl FirewallResource {
    pub fn server(id: u64) -> Self {
        Self {
            kind: FirewallResourceType::Server,
            server: Some(ServerRef { id }),
            label_selector: None,
            applied_to_resources: Vec::new(),
        }
    }

    pub fn label_selector(selector: impl Into<String>) -> Self {
        Self {
            kind: FirewallResourceType::LabelSelector,
            server: None,
            label_selector: Some(LabelSelector {
                selector: selector.into(),
            }),
            applied_to_resources: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Firewall {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub labels: Labels,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub rules: Vec<FirewallRule>,
    #[serde(default)]
    pub applied_to: Vec<FirewallResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirewallResponse {
    pub firewall: Firewall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFirewallResponse {
    pub firewall: Firewall,
    #[serde(default)]
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirewallsResponse {
    pub firewalls: Vec<Firewall>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateFirewallParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<FirewallRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub apply_to: Vec<FirewallResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateFirewallParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

#[derive(Serialize)]
struct ApplyToBody<'a> {
    apply_to: &'a [FirewallResource],
}

#[derive(Serialize)]
struct RemoveFromBody<'a> {
    remove_from: &'a [FirewallResource],
}

#[derive(Serialize)]
struct SetRulesBody<'a> {
    rules: &'a [FirewallRule],
}

pub type FirewallActions = ResourceActions<Firewalls>;

#[derive(Debug, Clone)]
pub struct Firewalls {
    http: HttpDispatcher,
    actions: FirewallActions,
}

impl ActionScope for Firewalls {
    const PATH: &'static str = "/firewalls";
}

impl Firewalls {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self {
            actions: FirewallActions::new(http.clone()),
            http,
        }
    }

    pub fn actions(&self) -> &FirewallActions {
        &self.actions
    }

    pub async fn list(&self, params: Option<&ListParams>) -> Result<ApiResult<FirewallsResponse>> {
        let path = append_query("/firewalls", params)?;
        self.http.get(&path).await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResult<FirewallResponse>> {
        self.http.get(&format!("/firewalls/{}", id)).await
    }

    pub async fn create(
        &self,
        params: &CreateFirewallParams,
    ) -> Result<ApiResult<CreateFirewallResponse>> {
        self.http.post("/firewalls", params).await
    }

    pub async fn update(
        &self,
        id: u64,
        params: &UpdateFirewallParams,
    ) -> Result<ApiResult<FirewallResponse>> {
        self.http.put(&format!("/firewalls/{}", id), params).await
    }

    pub async fn delete(&self, id: u64) -> Result<ApiResult<()>> {
        self.http.delete(&format!("/firewalls/{}", id)).await
    }
}

impl ResourceActions<Firewalls> {
    pub async fn apply_to_resources(
        &self,
        firewall_id: u64,
        resources: &[FirewallResource],
    ) -> Result<ApiResult<ActionsResponse>> {
        let body = ApplyToBody {
            apply_to: resources,
        };
        self.command(firewall_id, "apply_to_resources", &body).await
    }

    pub async fn remove_from_resources(
        &self,
        firewall_id: u64,
        resources: &[FirewallResource],
    ) -> Result<ApiResult<ActionsResponse>> {
        let body = RemoveFromBody {
            remove_from: resources,
        };
        self.command(firewall_id, "remove_from_resources", &body)
            .await
    }

    /// Replace every rule; an empty slice removes them all
    pub async fn set_rules(
        &self,
        firewall_id: u64,
        rules: &[FirewallRule],
    ) -> Result<ApiResult<ActionsResponse>> {
        self.command(firewall_id, "set_rules", &SetRulesBody { rules })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inbound_rule_serializes_only_relevant_fields() {
        let rule = FirewallRule::inbound(Protocol::Tcp, vec!["0.0.0.0/0".into()]).with_port("22");
        assert_eq!(
            serde_json::to_value(&rule).unwrap(),
            json!({
                "direction": "in",
                "protocol": "tcp",
                "source_ips": ["0.0.0.0/0"],
                "port": "22"
            })
        );
    }

    #[test]
    fn test_label_selector_resource_shape() {
        let resource = FirewallResource::label_selector("env=prod");
        assert_eq!(
            serde_json::to_value(&resource).unwrap(),
            json!({"type": "label_selector", "label_selector": {"selector": "env=prod"}})
        );
    }

    #[test]
    fn test_firewall_deserializes_applied_resources() {
        let firewall: Firewall = serde_json::from_value(json!({
            "id": 38,
            "name": "web",
            "labels": {},
            "created": "2016-01-30T23:55:00+00:00",
            "rules": [],
            "applied_to": [{
                "type": "label_selector",
                "label_selector": {"selector": "env=prod"},
                "applied_to_resources": [{"type": "server", "server": {"id": 42}}]
            }]
        }))
        .unwrap();

        let applied = &firewall.applied_to[0];
        assert_eq!(applied.kind, FirewallResourceType::LabelSelector);
        assert_eq!(applied.applied_to_resources[0].server, Some(ServerRef { id: 42 }));
    }
}
