//! ISOs
//!
//! Read-only catalogue of ISO images that can be mounted into servers.

use crate::http::HttpDispatcher;
use crate::query::append_query;
use crate::result::ApiResult;
use crate::types::{Architecture, DeprecationInfo, ListParams, Meta};
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Iso {
    pub id: u64,
    pub name: String,
    pub description: String,
    /// `public` or `private`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub deprecation: Option<DeprecationInfo>,
    /// `None` means compatible with every architecture
    #[serde(default)]
    pub architecture: Option<Architecture>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsoResponse {
    pub iso: Iso,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsosResponse {
    pub isos: Vec<Iso>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone)]
pub struct Isos {
    http: HttpDispatcher,
}

impl Isos {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self { http }
    }

    pub async fn list(&self, params: Option<&ListParams>) -> Result<ApiResult<IsosResponse>> {
        let path = append_query("/isos", params)?;
        self.http.get(&path).await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResult<IsoResponse>> {
        self.http.get(&format!("/isos/{}", id)).await
    }
}
