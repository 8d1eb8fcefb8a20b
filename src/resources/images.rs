//! Images
//!
//! System images, app images, snapshots and backups.

use super::resource_actions::{ActionScope, ResourceActions};
use crate::http::HttpDispatcher;
use crate::query::append_query;
use crate::result::ApiResult;
use crate::types::{
    ActionResponse, Architecture, ChangeProtectionParams, Labels, ListParams, Meta, Protection,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageType {
    System,
    App,
    Snapshot,
    Backup,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStatus {
    Available,
    Creating,
    Unavailable,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedFrom {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: ImageType,
    pub status: ImageStatus,
    /// Unique identifier, only set for system and app images
    #[serde(default)]
    pub name: Option<String>,
    pub description: String,
    /// GB, only set for snapshots and backups
    #[serde(default)]
    pub image_size: Option<f64>,
    /// GB
    pub disk_size: f64,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub created_from: Option<CreatedFrom>,
    /// Server a backup is bound to
    #[serde(default)]
    pub bound_to: Option<u64>,
    pub os_flavor: String,
    #[serde(default)]
    pub os_version: Option<String>,
    #[serde(default)]
    pub rapid_deploy: bool,
    #[serde(default)]
    pub protection: Protection,
    #[serde(default)]
    pub deprecated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted: Option<DateTime<Utc>>,
    #[serde(default)]
    pub labels: Labels,
    pub architecture: Architecture,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResponse {
    pub image: Image,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagesResponse {
    pub images: Vec<Image>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListImagesParams {
    #[serde(flatten)]
    pub common: ListParams,
    #[serde(rename = "type")]
    pub kind: Vec<ImageType>,
    pub status: Vec<ImageStatus>,
    /// Server ID backups are bound to
    pub bound_to: Option<u64>,
    pub include_deprecated: Option<bool>,
    pub architecture: Option<Architecture>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateImageParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Convert a backup to a snapshot with `Some(ImageType::Snapshot)`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ImageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

pub type ImageActions = ResourceActions<Images>;

#[derive(Debug, Clone)]
pub struct Images {
    http: HttpDispatcher,
    actions: ImageActions,
}

impl ActionScope for Images {
    const PATH: &'static str = "/images";
}

impl Images {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self {
            actions: ImageActions::new(http.clone()),
            http,
        }
    }

    pub fn actions(&self) -> &ImageActions {
        &self.actions
    }

    pub async fn list(
        &self,
        params: Option<&ListImagesParams>,
    ) -> Result<ApiResult<ImagesResponse>> {
        let path = append_query("/images", params)?;
        self.http.get(&path).await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResult<ImageResponse>> {
        self.http.get(&format!("/images/{}", id)).await
    }

    pub async fn update(
        &self,
        id: u64,
        params: &UpdateImageParams,
    ) -> Result<ApiResult<ImageResponse>> {
        self.http.put(&format!("/images/{}", id), params).await
    }

    /// Only snapshots and backups can be deleted
    pub async fn delete(&self, id: u64) -> Result<ApiResult<()>> {
        self.http.delete(&format!("/images/{}", id)).await
    }
}

impl ResourceActions<Images> {
    pub async fn change_protection(
        &self,
        image_id: u64,
        params: &ChangeProtectionParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(image_id, "change_protection", params).await
    }
}
