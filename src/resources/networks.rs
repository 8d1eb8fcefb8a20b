//! Networks
//!
//! Private networks, their subnets and routes.

use super::resource_actions::{ActionScope, ResourceActions};
use crate::http::HttpDispatcher;
use crate::query::append_query;
use crate::result::ApiResult;
use crate::types::{ActionResponse, ChangeProtectionParams, Labels, ListParams, Meta, Protection};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubnetType {
    Cloud,
    Vswitch,
    /// Deprecated, kept for older networks
    Server,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    #[serde(rename = "type")]
    pub kind: SubnetType,
    pub ip_range: String,
    pub network_zone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vswitch_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// CIDR block
    pub destination: String,
    pub gateway: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub id: u64,
    pub name: String,
    pub ip_range: String,
    #[serde(default)]
    pub subnets: Vec<Subnet>,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub servers: Vec<u64>,
    #[serde(default)]
    pub load_balancers: Vec<u64>,
    #[serde(default)]
    pub protection: Protection,
    #[serde(default)]
    pub labels: Labels,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub expose_routes_to_vswitch: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkResponse {
    pub network: Network,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworksResponse {
    pub networks: Vec<Network>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateNetworkParams {
    pub name: String,
    /// RFC 1918 CIDR block
    pub ip_range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subnets: Vec<Subnet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expose_routes_to_vswitch: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateNetworkParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expose_routes_to_vswitch: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddSubnetParams {
    #[serde(rename = "type")]
    pub kind: SubnetType,
    pub network_zone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vswitch_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteSubnetParams {
    pub ip_range: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeIpRangeParams {
    pub ip_range: String,
}

pub type NetworkActions = ResourceActions<Networks>;

#[derive(Debug, Clone)]
pub struct Networks {
    http: HttpDispatcher,
    actions: NetworkActions,
}

impl ActionScope for Networks {
    const PATH: &'static str = "/networks";
}

impl Networks {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self {
            actions: NetworkActions::new(http.clone()),
            http,
        }
    }

    pub fn actions(&self) -> &NetworkActions {
        &self.actions
    }

    pub async fn list(&self, params: Option<&ListParams>) -> Result<ApiResult<NetworksResponse>> {
        let path = append_query("/networks", params)?;
        self.http.get(&path).await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResult<NetworkResponse>> {
        self.http.get(&format!("/networks/{}", id)).await
    }

    pub async fn create(&self, params: &CreateNetworkParams) -> Result<ApiResult<NetworkResponse>> {
        self.http.post("/networks", params).await
    }

    pub async fn update(
        &self,
        id: u64,
        params: &UpdateNetworkParams,
    ) -> Result<ApiResult<NetworkResponse>> {
        self.http.put(&format!("/networks/{}", id), params).await
    }

    pub async fn delete(&self, id: u64) -> Result<ApiResult<()>> {
        self.http.delete(&format!("/networks/{}", id)).await
    }
}

impl ResourceActions<Networks> {
    pub async fn add_route(
        &self,
        network_id: u64,
        route: &Route,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(network_id, "add_route", route).await
    }

    pub async fn delete_route(
        &self,
        network_id: u64,
        route: &Route,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(network_id, "delete_route", route).await
    }

    pub async fn add_subnet(
        &self,
        network_id: u64,
        params: &AddSubnetParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(network_id, "add_subnet", params).await
    }

    pub async fn delete_subnet(
        &self,
        network_id: u64,
        params: &DeleteSubnetParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(network_id, "delete_subnet", params).await
    }

    /// Only extending the range is allowed by the API
    pub async fn change_ip_range(
        &self,
        network_id: u64,
        params: &ChangeIpRangeParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(network_id, "change_ip_range", params).await
    }

    pub async fn change_protection(
        &self,
        network_id: u64,
        params: &ChangeProtectionParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(network_id, "change_protection", params).await
    }
}
