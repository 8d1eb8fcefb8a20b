//! Primary IPs
//!
//! Public addresses a server is created with. They can outlive the server
//! and be reassigned while it is powered off.

use super::floating_ips::DnsPtr;
use super::locations::Datacenter;
use super::resource_actions::{ActionScope, ResourceActions};
use crate::http::HttpDispatcher;
use crate::query::append_query;
use crate::result::ApiResult;
use crate::types::{
    Action, ActionResponse, ChangeDnsPtrParams, ChangeProtectionParams, IpType, Labels,
    ListParams, Meta, Protection,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssigneeType {
    #[default]
    Server,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryIp {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub labels: Labels,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub datacenter: Option<Datacenter>,
    pub ip: String,
    #[serde(default)]
    pub dns_ptr: Vec<DnsPtr>,
    #[serde(default)]
    pub protection: Protection,
    #[serde(rename = "type")]
    pub kind: IpType,
    /// Delete the address together with its server
    #[serde(default)]
    pub auto_delete: bool,
    pub assignee_type: AssigneeType,
    #[serde(default)]
    pub assignee_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryIpResponse {
    pub primary_ip: PrimaryIp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePrimaryIpResponse {
    pub primary_ip: PrimaryIp,
    #[serde(default)]
    pub action: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryIpsResponse {
    pub primary_ips: Vec<PrimaryIp>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListPrimaryIpsParams {
    #[serde(flatten)]
    pub common: ListParams,
    /// Exact address
    pub ip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePrimaryIpParams {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: IpType,
    pub assignee_type: AssigneeType,
    /// Server to assign to; otherwise `datacenter` is required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datacenter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdatePrimaryIpParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssignPrimaryIpParams {
    pub assignee_id: u64,
    pub assignee_type: AssigneeType,
}

pub type PrimaryIpActions = ResourceActions<PrimaryIps>;

#[derive(Debug, Clone)]
pub struct PrimaryIps {
    http: HttpDispatcher,
    actions: PrimaryIpActions,
}

impl ActionScope for PrimaryIps {
    const PATH: &'static str = "/primary_ips";
}

impl PrimaryIps {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self {
            actions: PrimaryIpActions::new(http.clone()),
            http,
        }
    }

    pub fn actions(&self) -> &PrimaryIpActions {
        &self.actions
    }

    pub async fn list(
        &self,
        params: Option<&ListPrimaryIpsParams>,
    ) -> Result<ApiResult<PrimaryIpsResponse>> {
        let path = append_query("/primary_ips", params)?;
        self.http.get(&path).await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResult<PrimaryIpResponse>> {
        self.http.get(&format!("/primary_ips/{}", id)).await
    }

    pub async fn create(
        &self,
        params: &CreatePrimaryIpParams,
    ) -> Result<ApiResult<CreatePrimaryIpResponse>> {
        self.http.post("/primary_ips", params).await
    }

    pub async fn update(
        &self,
        id: u64,
        params: &UpdatePrimaryIpParams,
    ) -> Result<ApiResult<PrimaryIpResponse>> {
        self.http.put(&format!("/primary_ips/{}", id), params).await
    }

    pub async fn delete(&self, id: u64) -> Result<ApiResult<()>> {
        self.http.delete(&format!("/primary_ips/{}", id)).await
    }
}

impl ResourceActions<PrimaryIps> {
    /// The target server must be powered off
    pub async fn assign(
        &self,
        primary_ip_id: u64,
        params: &AssignPrimaryIpParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(primary_ip_id, "assign", params).await
    }

    pub async fn unassign(&self, primary_ip_id: u64) -> Result<ApiResult<ActionResponse>> {
        self.command_empty(primary_ip_id, "unassign").await
    }

    pub async fn change_dns_ptr(
        &self,
        primary_ip_id: u64,
        params: &ChangeDnsPtrParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(primary_ip_id, "change_dns_ptr", params).await
    }

    pub async fn change_protection(
        &self,
        primary_ip_id: u64,
        params: &ChangeProtectionParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(primary_ip_id, "change_protection", params)
            .await
    }
}
