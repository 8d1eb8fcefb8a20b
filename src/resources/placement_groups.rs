//! Placement Groups
//!
//! Groups that spread their servers across different physical hosts.

use crate::http::HttpDispatcher;
use crate::query::append_query;
use crate::result::ApiResult;
use crate::types::{Action, Labels, ListParams, Meta};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementGroupType {
    #[default]
    Spread,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementGroup {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub labels: Labels,
    #[serde(rename = "type")]
    pub kind: PlacementGroupType,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub servers: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementGroupResponse {
    pub placement_group: PlacementGroup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePlacementGroupResponse {
    pub placement_group: PlacementGroup,
    #[serde(default)]
    pub action: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementGroupsResponse {
    pub placement_groups: Vec<PlacementGroup>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListPlacementGroupsParams {
    #[serde(flatten)]
    pub common: ListParams,
    #[serde(rename = "type")]
    pub kind: Vec<PlacementGroupType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreatePlacementGroupParams {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PlacementGroupType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdatePlacementGroupParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone)]
pub struct PlacementGroups {
    http: HttpDispatcher,
}

impl PlacementGroups {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self { http }
    }

    pub async fn list(
        &self,
        params: Option<&ListPlacementGroupsParams>,
    ) -> Result<ApiResult<PlacementGroupsResponse>> {
        let path = append_query("/placement_groups", params)?;
        self.http.get(&path).await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResult<PlacementGroupResponse>> {
        self.http.get(&format!("/placement_groups/{}", id)).await
    }

    pub async fn create(
        &self,
        params: &CreatePlacementGroupParams,
    ) -> Result<ApiResult<CreatePlacementGroupResponse>> {
        self.http.post("/placement_groups", params).await
    }

    pub async fn update(
        &self,
        id: u64,
        params: &UpdatePlacementGroupParams,
    ) -> Result<ApiResult<PlacementGroupResponse>> {
        self.http
            .put(&format!("/placement_groups/{}", id), params)
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<ApiResult<()>> {
        self.http.delete(&format!("/placement_groups/{}", id)).await
    }
}
