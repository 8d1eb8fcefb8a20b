//! Certificates
//!
//! TLS certificates for HTTPS load balancer services, either uploaded or
//! issued and renewed by the platform.

use super::resource_actions::{ActionScope, ResourceActions};
use crate::http::HttpDispatcher;
use crate::query::append_query;
use crate::result::ApiResult;
use crate::types::{Action, ActionError, ActionResponse, Labels, ListParams, Meta};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateType {
    #[default]
    Uploaded,
    Managed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuanceStatus {
    Pending,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

/// Issuance and renewal state of a managed certificate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateStatus {
    pub issuance: IssuanceStatus,
    #[serde(default)]
    pub renewal: Option<String>,
    #[serde(default)]
    pub error: Option<ActionError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: CertificateType,
    /// PEM, absent while a managed certificate is pending
    #[serde(default)]
    pub certificate: Option<String>,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub domain_names: Vec<String>,
    #[serde(default)]
    pub fingerprint: Option<String>,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub not_valid_after: Option<DateTime<Utc>>,
    #[serde(default)]
    pub not_valid_before: Option<DateTime<Utc>>,
    /// Only for managed certificates
    #[serde(default)]
    pub status: Option<CertificateStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateResponse {
    pub certificate: Certificate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCertificateResponse {
    pub certificate: Certificate,
    /// Issuance action, managed certificates only
    #[serde(default)]
    pub action: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificatesResponse {
    pub certificates: Vec<Certificate>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateCertificateParams {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CertificateType,
    /// PEM chain, uploaded certificates only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    /// PEM key, uploaded certificates only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// Managed certificates only
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub domain_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

impl CreateCertificateParams {
    pub fn uploaded(
        name: impl Into<String>,
        certificate: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: CertificateType::Uploaded,
            certificate: Some(certificate.into()),
            private_key: Some(private_key.into()),
            ..Default::default()
        }
    }

    pub fn managed(name: impl Into<String>, domain_names: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind: CertificateType::Managed,
            domain_names,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateCertificateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

pub type CertificateActions = ResourceActions<Certificates>;

#[derive(Debug, Clone)]
pub struct Certificates {
    http: HttpDispatcher,
    actions: CertificateActions,
}

impl ActionScope for Certificates {
    const PATH: &'static str = "/certificates";
}

impl Certificates {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self {
            actions: CertificateActions::new(http.clone()),
            http,
        }
    }

    pub fn actions(&self) -> &CertificateActions {
        &self.actions
    }

    pub async fn list(
        &self,
        params: Option<&ListParams>,
    ) -> Result<ApiResult<CertificatesResponse>> {
        let path = append_query("/certificates", params)?;
        self.http.get(&path).await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResult<CertificateResponse>> {
        self.http.get(&format!("/certificates/{}", id)).await
    }

    pub async fn create(
        &self,
        params: &CreateCertificateParams,
    ) -> Result<ApiResult<CreateCertificateResponse>> {
        self.http.post("/certificates", params).await
    }

    pub async fn update(
        &self,
        id: u64,
        params: &UpdateCertificateParams,
    ) -> Result<ApiResult<CertificateResponse>> {
        self.http.put(&format!("/certificates/{}", id), params).await
    }

    pub async fn delete(&self, id: u64) -> Result<ApiResult<()>> {
        self.http.delete(&format!("/certificates/{}", id)).await
    }
}

impl ResourceActions<Certificates> {
    /// Retry a failed issuance or renewal of a managed certificate
    pub async fn retry(&self, certificate_id: u64) -> Result<ApiResult<ActionResponse>> {
        self.command_empty(certificate_id, "retry").await
    }
}
