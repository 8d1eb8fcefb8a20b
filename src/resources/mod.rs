//! Resource accessors
//!
//! One accessor per resource group. Each holds a clone of the shared
//! [`HttpDispatcher`](crate::http::HttpDispatcher) and maps its operations to
//! a method, a path and an optional body. Nested namespaces (actions, server
//! catalogues, load balancer types) are built together with their parent.
//!
//! # Module Structure
//!
//! - [`resource_actions`] - Generic `actions` namespace shared by resource groups
//! - [`actions`] - Project-wide actions
//! - [`billing`] - Pricing
//! - [`certificates`] - TLS certificates
//! - [`firewalls`] - Firewalls and their rules
//! - [`floating_ips`] - Floating IPs
//! - [`load_balancers`] - Load balancers and load balancer types
//! - [`locations`] - Locations and datacenters
//! - [`networks`] - Private networks
//! - [`servers`] - Servers, with images, ISOs, placement groups, primary IPs
//!   and server types nested beneath
//! - [`ssh_keys`] - SSH keys
//! - [`volumes`] - Block storage volumes
//!
//! # Example
//!
//! ```ignore
//! use hcloud_api::HetznerClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = HetznerClient::new("my-token")?;
//!     let networks = client.networks().list(None).await?;
//!     let types = client.servers().server_types().list(None).await?;
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod billing;
pub mod certificates;
pub mod firewalls;
pub mod floating_ips;
pub mod images;
pub mod isos;
pub mod load_balancers;
pub mod locations;
pub mod networks;
pub mod placement_groups;
pub mod primary_ips;
pub mod resource_actions;
pub mod server_types;
pub mod servers;
pub mod ssh_keys;
pub mod volumes;

pub use actions::Actions;
pub use billing::Billing;
pub use certificates::Certificates;
pub use firewalls::Firewalls;
pub use floating_ips::FloatingIps;
pub use images::Images;
pub use isos::Isos;
pub use load_balancers::{LoadBalancerTypes, LoadBalancers};
pub use locations::{Datacenters, Locations};
pub use networks::Networks;
pub use placement_groups::PlacementGroups;
pub use primary_ips::PrimaryIps;
pub use resource_actions::{ActionScope, ResourceActions};
pub use server_types::ServerTypes;
pub use servers::Servers;
pub use ssh_keys::SshKeys;
pub use volumes::Volumes;
