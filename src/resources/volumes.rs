//! Volumes
//!
//! Block storage that can be attached to servers in the same location.

use super::resource_actions::{ActionScope, ResourceActions};
use crate::http::HttpDispatcher;
use crate::query::append_query;
use crate::result::ApiResult;
use crate::types::{
    Action, ActionResponse, ChangeProtectionParams, Labels, ListParams, Location, Meta, Protection,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeStatus {
    Available,
    Creating,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub id: u64,
    pub name: String,
    pub created: DateTime<Utc>,
    /// Attached server, if any
    #[serde(default)]
    pub server: Option<u64>,
    pub location: Location,
    /// Size in GB
    pub size: u64,
    pub linux_device: String,
    #[serde(default)]
    pub protection: Protection,
    #[serde(default)]
    pub labels: Labels,
    pub status: VolumeStatus,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeResponse {
    pub volume: Volume,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateVolumeResponse {
    pub volume: Volume,
    #[serde(default)]
    pub action: Option<Action>,
    #[serde(default)]
    pub next_actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumesResponse {
    pub volumes: Vec<Volume>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListVolumesParams {
    #[serde(flatten)]
    pub common: ListParams,
    pub status: Vec<VolumeStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateVolumeParams {
    pub name: String,
    /// Size in GB
    pub size: u64,
    /// Location name; required unless `server` is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<u64>,
    /// `ext4` or `xfs`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automount: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateVolumeParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachVolumeParams {
    pub server: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automount: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResizeVolumeParams {
    /// New size in GB, must be larger than the current size
    pub size: u64,
}

pub type VolumeActions = ResourceActions<Volumes>;

#[derive(Debug, Clone)]
pub struct Volumes {
    http: HttpDispatcher,
    actions: VolumeActions,
}

impl ActionScope for Volumes {
    const PATH: &'static str = "/volumes";
}

impl Volumes {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self {
            actions: VolumeActions::new(http.clone()),
            http,
        }
    }

    pub fn actions(&self) -> &VolumeActions {
        &self.actions
    }

    pub async fn list(
        &self,
        params: Option<&ListVolumesParams>,
    ) -> Result<ApiResult<VolumesResponse>> {
        let path = append_query("/volumes", params)?;
        self.http.get(&path).await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResult<VolumeResponse>> {
        self.http.get(&format!("/volumes/{}", id)).await
    }

    pub async fn create(
        &self,
        params: &CreateVolumeParams,
    ) -> Result<ApiResult<CreateVolumeResponse>> {
        self.http.post("/volumes", params).await
    }

    pub async fn update(
        &self,
        id: u64,
        params: &UpdateVolumeParams,
    ) -> Result<ApiResult<VolumeResponse>> {
        self.http.put(&format!("/volumes/{}", id), params).await
    }

    /// Usually answered with 204; some deployments return the detach action
    pub async fn delete(&self, id: u64) -> Result<ApiResult<Option<ActionResponse>>> {
        self.http.delete(&format!("/volumes/{}", id)).await
    }
}

impl ResourceActions<Volumes> {
    pub async fn attach(
        &self,
        volume_id: u64,
        params: &AttachVolumeParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(volume_id, "attach", params).await
    }

    pub async fn detach(&self, volume_id: u64) -> Result<ApiResult<ActionResponse>> {
        self.command_empty(volume_id, "detach").await
    }

    pub async fn resize(
        &self,
        volume_id: u64,
        params: &ResizeVolumeParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(volume_id, "resize", params).await
    }

    pub async fn change_protection(
        &self,
        volume_id: u64,
        params: &ChangeProtectionParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(volume_id, "change_protection", params).await
    }
}
