//! Hetzner Client
//!
//! Entry point of the library. Owns the dispatcher and every resource
//! accessor, all sharing the same token and base URL.

use crate::http::{HttpDispatcher, DEFAULT_BASE_URL};
use crate::resources::{
    Actions, Billing, Certificates, Datacenters, Firewalls, FloatingIps, LoadBalancers, Locations,
    Networks, Servers, SshKeys, Volumes,
};
use anyhow::{Context, Result};

/// Main Hetzner Cloud client
#[derive(Debug, Clone)]
pub struct HetznerClient {
    http: HttpDispatcher,
    actions: Actions,
    billing: Billing,
    certificates: Certificates,
    datacenters: Datacenters,
    firewalls: Firewalls,
    floating_ips: FloatingIps,
    load_balancers: LoadBalancers,
    locations: Locations,
    networks: Networks,
    servers: Servers,
    ssh_keys: SshKeys,
    volumes: Volumes,
}

impl HetznerClient {
    /// Create a client for the production API
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Create a client against another API root, e.g. a mock server
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let http = HttpDispatcher::new(token, base_url)
            .context("Failed to initialize Hetzner Cloud client")?;

        tracing::debug!("Hetzner client for {}", http.base_url());

        Ok(Self {
            actions: Actions::new(http.clone()),
            billing: Billing::new(http.clone()),
            certificates: Certificates::new(http.clone()),
            datacenters: Datacenters::new(http.clone()),
            firewalls: Firewalls::new(http.clone()),
            floating_ips: FloatingIps::new(http.clone()),
            load_balancers: LoadBalancers::new(http.clone()),
            locations: Locations::new(http.clone()),
            networks: Networks::new(http.clone()),
            servers: Servers::new(http.clone()),
            ssh_keys: SshKeys::new(http.clone()),
            volumes: Volumes::new(http.clone()),
            http,
        })
    }

    /// Raw dispatcher, for endpoints without a typed accessor
    pub fn http(&self) -> &HttpDispatcher {
        &self.http
    }

    pub fn actions(&self) -> &Actions {
        &self.actions
    }

    pub fn billing(&self) -> &Billing {
        &self.billing
    }

    pub fn certificates(&self) -> &Certificates {
        &self.certificates
    }

    pub fn datacenters(&self) -> &Datacenters {
        &self.datacenters
    }

    pub fn firewalls(&self) -> &Firewalls {
        &self.firewalls
    }

    pub fn floating_ips(&self) -> &FloatingIps {
        &self.floating_ips
    }

    pub fn load_balancers(&self) -> &LoadBalancers {
        &self.load_balancers
    }

    pub fn locations(&self) -> &Locations {
        &self.locations
    }

    pub fn networks(&self) -> &Networks {
        &self.networks
    }

    pub fn servers(&self) -> &Servers {
        &self.servers
    }

    pub fn ssh_keys(&self) -> &SshKeys {
        &self.ssh_keys
    }

    pub fn volumes(&self) -> &Volumes {
        &self.volumes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_production_root() {
        let client = HetznerClient::new("token").unwrap();
        assert_eq!(client.http().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_nested_accessors_share_credentials() {
        let client = HetznerClient::with_base_url("abc", "http://127.0.0.1:9/v1/").unwrap();
        assert_eq!(client.http().token(), "abc");
        assert_eq!(client.networks().actions().http().token(), "abc");
        assert_eq!(
            client.networks().actions().http().base_url(),
            "http://127.0.0.1:9/v1"
        );
    }

    #[test]
    fn test_invalid_base_url_is_an_error() {
        assert!(HetznerClient::with_base_url("abc", "::not-a-url").is_err());
    }
}
