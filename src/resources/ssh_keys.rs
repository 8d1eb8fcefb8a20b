//! SSH Keys

use crate::http::HttpDispatcher;
use crate::query::append_query;
use crate::result::ApiResult;
use crate::types::{Labels, ListParams, Meta};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKey {
    pub id: u64,
    pub name: String,
    pub fingerprint: String,
    pub public_key: String,
    #[serde(default)]
    pub labels: Labels,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKeyResponse {
    pub ssh_key: SshKey,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SshKeysResponse {
    pub ssh_keys: Vec<SshKey>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListSshKeysParams {
    #[serde(flatten)]
    pub common: ListParams,
    pub fingerprint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateSshKeyParams {
    pub name: String,
    /// OpenSSH format
    pub public_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateSshKeyParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone)]
pub struct SshKeys {
    http: HttpDispatcher,
}

impl SshKeys {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self { http }
    }

    pub async fn list(
        &self,
        params: Option<&ListSshKeysParams>,
    ) -> Result<ApiResult<SshKeysResponse>> {
        let path = append_query("/ssh_keys", params)?;
        self.http.get(&path).await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResult<SshKeyResponse>> {
        self.http.get(&format!("/ssh_keys/{}", id)).await
    }

    pub async fn create(&self, params: &CreateSshKeyParams) -> Result<ApiResult<SshKeyResponse>> {
        self.http.post("/ssh_keys", params).await
    }

    pub async fn update(
        &self,
        id: u64,
        params: &UpdateSshKeyParams,
    ) -> Result<ApiResult<SshKeyResponse>> {
        self.http.put(&format!("/ssh_keys/{}", id), params).await
    }

    pub async fn delete(&self, id: u64) -> Result<ApiResult<()>> {
        self.http.delete(&format!("/ssh_keys/{}", id)).await
    }
}
