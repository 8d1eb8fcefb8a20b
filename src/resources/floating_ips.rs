//! Floating IPs
//!
//! Addresses that can be moved between servers in the same network zone.

use super::resource_actions::{ActionScope, ResourceActions};
use crate::http::HttpDispatcher;
use crate::query::append_query;
use crate::result::ApiResult;
use crate::types::{
    Action, ActionResponse, ChangeDnsPtrParams, ChangeProtectionParams, IpType, Labels,
    ListParams, Location, Meta, Protection,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reverse DNS entry of one address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsPtr {
    pub ip: String,
    pub dns_ptr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingIp {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub ip: String,
    #[serde(rename = "type")]
    pub kind: IpType,
    #[serde(default)]
    pub server: Option<u64>,
    #[serde(default)]
    pub dns_ptr: Vec<DnsPtr>,
    pub home_location: Location,
    #[serde(default)]
    pub blocked: bool,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub protection: Protection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingIpResponse {
    pub floating_ip: FloatingIp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFloatingIpResponse {
    pub floating_ip: FloatingIp,
    #[serde(default)]
    pub action: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingIpsResponse {
    pub floating_ips: Vec<FloatingIp>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateFloatingIpParams {
    #[serde(rename = "type")]
    pub kind: IpType,
    /// Server to assign to; otherwise `home_location` is required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateFloatingIpParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssignFloatingIpParams {
    pub server: u64,
}

pub type FloatingIpActions = ResourceActions<FloatingIps>;

#[derive(Debug, Clone)]
pub struct FloatingIps {
    http: HttpDispatcher,
    actions: FloatingIpActions,
}

impl ActionScope for FloatingIps {
    const PATH: &'static str = "/floating_ips";
}

impl FloatingIps {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self {
            actions: FloatingIpActions::new(http.clone()),
            http,
        }
    }

    pub fn actions(&self) -> &FloatingIpActions {
        &self.actions
    }

    pub async fn list(
        &self,
        params: Option<&ListParams>,
    ) -> Result<ApiResult<FloatingIpsResponse>> {
        let path = append_query("/floating_ips", params)?;
        self.http.get(&path).await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResult<FloatingIpResponse>> {
        self.http.get(&format!("/floating_ips/{}", id)).await
    }

    pub async fn create(
        &self,
        params: &CreateFloatingIpParams,
    ) -> Result<ApiResult<CreateFloatingIpResponse>> {
        self.http.post("/floating_ips", params).await
    }

    pub async fn update(
        &self,
        id: u64,
        params: &UpdateFloatingIpParams,
    ) -> Result<ApiResult<FloatingIpResponse>> {
        self.http.put(&format!("/floating_ips/{}", id), params).await
    }

    pub async fn delete(&self, id: u64) -> Result<ApiResult<()>> {
        self.http.delete(&format!("/floating_ips/{}", id)).await
    }
}

impl ResourceActions<FloatingIps> {
    pub async fn assign(
        &self,
        floating_ip_id: u64,
        params: &AssignFloatingIpParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(floating_ip_id, "assign", params).await
    }

    pub async fn unassign(&self, floating_ip_id: u64) -> Result<ApiResult<ActionResponse>> {
        self.command_empty(floating_ip_id, "unassign").await
    }

    /// Set the PTR record of `ip`; `dns_ptr: None` resets it to the default
    pub async fn change_dns_ptr(
        &self,
        floating_ip_id: u64,
        params: &ChangeDnsPtrParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(floating_ip_id, "change_dns_ptr", params).await
    }

    pub async fn change_protection(
        &self,
        floating_ip_id: u64,
        params: &ChangeProtectionParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(floating_ip_id, "change_protection", params)
            .await
    }
}
