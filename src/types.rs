//! Shared Types
//!
//! Wire models used across several resource groups: pagination metadata,
//! action records, prices, locations and the common list filter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resource labels (`key -> value`)
pub type Labels = HashMap<String, String>;

/// Pagination metadata attached to list responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    #[serde(default)]
    pub previous_page: Option<u32>,
    #[serde(default)]
    pub next_page: Option<u32>,
    #[serde(default)]
    pub last_page: Option<u32>,
    #[serde(default)]
    pub total_entries: Option<u64>,
}

/// Common filter for list endpoints
///
/// Unset fields are left out of the query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListParams {
    pub name: Option<String>,
    pub label_selector: Option<String>,
    /// e.g. `id`, `name:asc`, `created:desc`
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListParams {
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            ..Default::default()
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_label_selector(mut self, selector: impl Into<String>) -> Self {
        self.label_selector = Some(selector.into());
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

// =============================================================================
// Actions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Running,
    Success,
    Error,
    #[serde(other)]
    Unknown,
}

/// Resource touched by an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResource {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionError {
    pub code: String,
    pub message: String,
}

/// Asynchronous operation record, polled by ID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: u64,
    pub command: String,
    pub status: ActionStatus,
    pub progress: u32,
    pub started: DateTime<Utc>,
    #[serde(default)]
    pub finished: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resources: Vec<ActionResource>,
    #[serde(default)]
    pub error: Option<ActionError>,
}

impl Action {
    pub fn is_finished(&self) -> bool {
        self.status != ActionStatus::Running
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionsResponse {
    pub actions: Vec<Action>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

/// Filter for action list endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListActionsParams {
    /// Only return actions with these IDs
    pub id: Vec<u64>,
    pub status: Vec<ActionStatus>,
    /// e.g. `id`, `command:asc`, `started:desc`; repeatable
    pub sort: Vec<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

// =============================================================================
// Misc building blocks
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protection {
    pub delete: bool,
}

/// Body for the `change_protection` action on most resources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeProtectionParams {
    pub delete: bool,
}

/// Body for `change_dns_ptr` actions; `dns_ptr: None` resets to the default
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeDnsPtrParams {
    pub ip: String,
    pub dns_ptr: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub net: String,
    pub gross: String,
}

/// Per-location price entry for server and load balancer types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPrice {
    pub location: String,
    #[serde(default)]
    pub price_hourly: Option<Price>,
    pub price_monthly: Price,
    #[serde(default)]
    pub included_traffic: Option<u64>,
    #[serde(default)]
    pub price_per_tb_traffic: Option<Price>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecationInfo {
    pub announced: DateTime<Utc>,
    pub unavailable_after: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub country: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub network_zone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    X86,
    Arm64,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpType {
    Ipv4,
    Ipv6,
}

/// Time series returned by the metrics endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub step: f64,
    pub time_series: HashMap<String, TimeSeries>,
}

/// `values` are `[unix_timestamp, "value"]` pairs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub values: Vec<(f64, String)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub metrics: Metrics,
}

/// Query for the server and load balancer metrics endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsParams {
    /// Metric families, e.g. `cpu`, `disk`, `network`, `open_connections`
    #[serde(rename = "type")]
    pub kind: Vec<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Seconds between data points; chosen by the API when unset
    pub step: Option<u32>,
}

impl MetricsParams {
    pub fn new(kind: &[&str], start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            kind: kind.iter().map(|k| k.to_string()).collect(),
            start,
            end,
            step: None,
        }
    }

    pub fn with_step(mut self, step: u32) -> Self {
        self.step = Some(step);
        self
    }
}
