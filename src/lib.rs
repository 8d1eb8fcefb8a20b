//! Async client for the Hetzner Cloud API
//!
//! Every call goes through one [`HttpDispatcher`] which resolves to an
//! [`ApiResult`]: `Success` with the decoded payload, or `Failure` with the
//! API's error object. Transport and decoding faults surface as
//! `anyhow::Error` instead.
//!
//! ```ignore
//! use hcloud_api::{ApiResult, HetznerClient};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = HetznerClient::new("my-token")?;
//!     match client.networks().get(42).await? {
//!         ApiResult::Success(res) => println!("{}", res.network.name),
//!         ApiResult::Failure(err) => eprintln!("{}", err),
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod http;
pub mod query;
pub mod resources;
pub mod result;
pub mod types;

pub use client::HetznerClient;
pub use http::{HttpDispatcher, DEFAULT_BASE_URL};
pub use result::{ApiError, ApiResult, ErrorDetails, FieldError};
