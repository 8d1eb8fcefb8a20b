//! Billing
//!
//! Prices for every resource kind, in the project's currency and VAT rate.

use crate::http::HttpDispatcher;
use crate::result::ApiResult;
use crate::types::{LocationPrice, Price};
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResponse {
    pub pricing: Pricing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    /// ISO 4217 currency code
    pub currency: String,
    pub vat_rate: String,
    #[serde(default)]
    pub primary_ips: Vec<TypedLocationPrice>,
    #[serde(default)]
    pub floating_ips: Vec<TypedLocationPrice>,
    pub image: PerGbPrice,
    pub volume: PerGbPrice,
    pub server_backup: BackupPrice,
    #[serde(default)]
    pub server_types: Vec<TypePrice>,
    #[serde(default)]
    pub load_balancer_types: Vec<TypePrice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedLocationPrice {
    #[serde(rename = "type")]
    pub kind: String,
    pub prices: Vec<LocationPrice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerGbPrice {
    pub price_per_gb_month: Price,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupPrice {
    /// Surcharge on the server price, as a decimal string
    pub percentage: String,
}

/// Prices of one server or load balancer type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypePrice {
    pub id: u64,
    pub name: String,
    pub prices: Vec<LocationPrice>,
}

#[derive(Debug, Clone)]
pub struct Billing {
    http: HttpDispatcher,
}

impl Billing {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self { http }
    }

    /// Get all prices
    pub async fn get(&self) -> Result<ApiResult<PricingResponse>> {
        self.http.get("/pricing").await
    }
}
