//! Server Types
//!
//! Read-only catalogue of server plans with their hardware and prices.

use crate::http::HttpDispatcher;
use crate::query::append_query;
use crate::result::ApiResult;
use crate::types::{Architecture, DeprecationInfo, ListParams, LocationPrice, Meta};
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    Local,
    Network,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CpuType {
    Shared,
    Dedicated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerType {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub cores: u32,
    /// GB
    pub memory: f64,
    /// GB
    pub disk: u64,
    #[serde(default)]
    pub deprecated: Option<bool>,
    #[serde(default)]
    pub prices: Vec<LocationPrice>,
    pub storage_type: StorageType,
    pub cpu_type: CpuType,
    pub architecture: Architecture,
    #[serde(default)]
    pub deprecation: Option<DeprecationInfo>,
}

impl ServerType {
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.unwrap_or(false) || self.deprecation.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerTypeResponse {
    pub server_type: ServerType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerTypesResponse {
    pub server_types: Vec<ServerType>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone)]
pub struct ServerTypes {
    http: HttpDispatcher,
}

impl ServerTypes {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self { http }
    }

    pub async fn list(
        &self,
        params: Option<&ListParams>,
    ) -> Result<ApiResult<ServerTypesResponse>> {
        let path = append_query("/server_types", params)?;
        self.http.get(&path).await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResult<ServerTypeResponse>> {
        self.http.get(&format!("/server_types/{}", id)).await
    }
}
