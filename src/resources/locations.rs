//! Locations and Datacenters

use crate::http::HttpDispatcher;
use crate::query::append_query;
use crate::result::ApiResult;
use crate::types::{ListParams, Location, Meta};
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResponse {
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationsResponse {
    pub locations: Vec<Location>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatacenterServerTypes {
    #[serde(default)]
    pub supported: Vec<u64>,
    #[serde(default)]
    pub available: Vec<u64>,
    #[serde(default)]
    pub available_for_migration: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datacenter {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub location: Location,
    #[serde(default)]
    pub server_types: DatacenterServerTypes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatacenterResponse {
    pub datacenter: Datacenter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatacentersResponse {
    pub datacenters: Vec<Datacenter>,
    /// ID of the datacenter recommended for new resources
    #[serde(default)]
    pub recommendation: Option<u64>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone)]
pub struct Locations {
    http: HttpDispatcher,
}

impl Locations {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self { http }
    }

    pub async fn list(&self, params: Option<&ListParams>) -> Result<ApiResult<LocationsResponse>> {
        let path = append_query("/locations", params)?;
        self.http.get(&path).await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResult<LocationResponse>> {
        self.http.get(&format!("/locations/{}", id)).await
    }
}

#[derive(Debug, Clone)]
pub struct Datacenters {
    http: HttpDispatcher,
}

impl Datacenters {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self { http }
    }

    pub async fn list(
        &self,
        params: Option<&ListParams>,
    ) -> Result<ApiResult<DatacentersResponse>> {
        let path = append_query("/datacenters", params)?;
        self.http.get(&path).await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResult<DatacenterResponse>> {
        self.http.get(&format!("/datacenters/{}", id)).await
    }
}
