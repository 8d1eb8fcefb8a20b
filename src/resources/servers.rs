//! Servers
//!
//! Virtual machines and their power, rescue, backup and networking actions.
//! The server-adjacent catalogues (images, ISOs, placement groups, primary
//! IPs and server types) hang off [`Servers`] as nested accessors.

use super::floating_ips::DnsPtr;
use super::images::{Image, ImageType, Images};
use super::isos::{Iso, Isos};
use super::locations::Datacenter;
use super::placement_groups::{PlacementGroup, PlacementGroups};
use super::primary_ips::PrimaryIps;
use super::resource_actions::{ActionScope, ResourceActions};
use super::server_types::{ServerType, ServerTypes};
use crate::http::HttpDispatcher;
use crate::query::append_query;
use crate::result::ApiResult;
use crate::types::{
    Action, ActionResponse, ChangeDnsPtrParams, Labels, ListParams, Meta, MetricsParams,
    MetricsResponse,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Models
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    Running,
    Initializing,
    Starting,
    Stopping,
    Off,
    Deleting,
    Migrating,
    Rebuilding,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv4 {
    #[serde(default)]
    pub id: Option<u64>,
    pub ip: String,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub dns_ptr: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv6 {
    #[serde(default)]
    pub id: Option<u64>,
    /// Assigned /64 network
    pub ip: String,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub dns_ptr: Vec<DnsPtr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedFirewall {
    pub id: u64,
    /// `applied` or `pending`
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicNet {
    #[serde(default)]
    pub ipv4: Option<Ipv4>,
    #[serde(default)]
    pub ipv6: Option<Ipv6>,
    #[serde(default)]
    pub floating_ips: Vec<u64>,
    #[serde(default)]
    pub firewalls: Vec<AppliedFirewall>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateNet {
    pub network: u64,
    pub ip: String,
    #[serde(default)]
    pub alias_ips: Vec<String>,
    pub mac_address: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerProtection {
    pub delete: bool,
    pub rebuild: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: u64,
    pub name: String,
    pub status: ServerStatus,
    pub created: DateTime<Utc>,
    pub public_net: PublicNet,
    #[serde(default)]
    pub private_net: Vec<PrivateNet>,
    pub server_type: ServerType,
    pub datacenter: Datacenter,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub iso: Option<Iso>,
    #[serde(default)]
    pub rescue_enabled: bool,
    #[serde(default)]
    pub locked: bool,
    /// e.g. `22-02`, `None` when backups are disabled
    #[serde(default)]
    pub backup_window: Option<String>,
    #[serde(default)]
    pub outgoing_traffic: Option<u64>,
    #[serde(default)]
    pub ingoing_traffic: Option<u64>,
    #[serde(default)]
    pub included_traffic: Option<u64>,
    #[serde(default)]
    pub protection: ServerProtection,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub volumes: Vec<u64>,
    #[serde(default)]
    pub load_balancers: Vec<u64>,
    #[serde(default)]
    pub primary_disk_size: u64,
    #[serde(default)]
    pub placement_group: Option<PlacementGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerResponse {
    pub server: Server,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServersResponse {
    pub servers: Vec<Server>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateServerResponse {
    pub server: Server,
    pub action: Action,
    #[serde(default)]
    pub next_actions: Vec<Action>,
    /// Only set when no SSH key was given
    #[serde(default)]
    pub root_password: Option<String>,
}

/// Action response carrying a freshly generated root password
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootPasswordResponse {
    pub action: Action,
    #[serde(default)]
    pub root_password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateImageResponse {
    pub action: Action,
    pub image: Image,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleResponse {
    pub action: Action,
    /// VNC over websocket endpoint
    pub wss_url: String,
    pub password: String,
}

// =============================================================================
// Parameters
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListServersParams {
    #[serde(flatten)]
    pub common: ListParams,
    pub status: Vec<ServerStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FirewallId {
    pub firewall: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateServerPublicNet {
    pub enable_ipv4: bool,
    pub enable_ipv6: bool,
    /// Existing primary IPv4 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateServerParams {
    pub name: String,
    /// Type ID or name
    pub server_type: String,
    /// Image ID or name
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datacenter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_after_create: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement_group: Option<u64>,
    /// Key IDs or names
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ssh_keys: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub firewalls: Vec<FirewallId>,
    /// Cloud-init user data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automount: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_net: Option<CreateServerPublicNet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateServerParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddToPlacementGroupParams {
    pub placement_group: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachIsoParams {
    /// ISO ID or name
    pub iso: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttachToNetworkParams {
    pub network: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alias_ips: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetachFromNetworkParams {
    pub network: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeAliasIpsParams {
    pub network: u64,
    /// Replaces the current alias list
    pub alias_ips: Vec<String>,
}

/// Server protection has a `rebuild` flag on top of `delete`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeServerProtectionParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rebuild: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeServerTypeParams {
    pub server_type: String,
    /// Keep the disk size when `false`, allowing a later downgrade
    pub upgrade_disk: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateImageParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `Snapshot` or `Backup`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ImageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnableRescueParams {
    /// `linux64` when unset
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ssh_keys: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebuildParams {
    /// Image ID or name
    pub image: String,
}

// =============================================================================
// Accessor
// =============================================================================

pub type ServerActions = ResourceActions<Servers>;

#[derive(Debug, Clone)]
pub struct Servers {
    http: HttpDispatcher,
    actions: ServerActions,
    images: Images,
    isos: Isos,
    placement_groups: PlacementGroups,
    primary_ips: PrimaryIps,
    server_types: ServerTypes,
}

impl ActionScope for Servers {
    const PATH: &'static str = "/servers";
}

impl Servers {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self {
            actions: ServerActions::new(http.clone()),
            images: Images::new(http.clone()),
            isos: Isos::new(http.clone()),
            placement_groups: PlacementGroups::new(http.clone()),
            primary_ips: PrimaryIps::new(http.clone()),
            server_types: ServerTypes::new(http.clone()),
            http,
        }
    }

    pub fn actions(&self) -> &ServerActions {
        &self.actions
    }

    pub fn images(&self) -> &Images {
        &self.images
    }

    pub fn isos(&self) -> &Isos {
        &self.isos
    }

    pub fn placement_groups(&self) -> &PlacementGroups {
        &self.placement_groups
    }

    pub fn primary_ips(&self) -> &PrimaryIps {
        &self.primary_ips
    }

    pub fn server_types(&self) -> &ServerTypes {
        &self.server_types
    }

    pub async fn list(
        &self,
        params: Option<&ListServersParams>,
    ) -> Result<ApiResult<ServersResponse>> {
        let path = append_query("/servers", params)?;
        self.http.get(&path).await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResult<ServerResponse>> {
        self.http.get(&format!("/servers/{}", id)).await
    }

    pub async fn create(
        &self,
        params: &CreateServerParams,
    ) -> Result<ApiResult<CreateServerResponse>> {
        self.http.post("/servers", params).await
    }

    pub async fn update(
        &self,
        id: u64,
        params: &UpdateServerParams,
    ) -> Result<ApiResult<ServerResponse>> {
        self.http.put(&format!("/servers/{}", id), params).await
    }

    /// Deleting a server is asynchronous and returns the delete action
    pub async fn delete(&self, id: u64) -> Result<ApiResult<ActionResponse>> {
        self.http.delete(&format!("/servers/{}", id)).await
    }

    /// Metric families: `cpu`, `disk`, `network`
    pub async fn get_metrics(
        &self,
        id: u64,
        params: &MetricsParams,
    ) -> Result<ApiResult<MetricsResponse>> {
        let path = append_query(&format!("/servers/{}/metrics", id), Some(params))?;
        self.http.get(&path).await
    }
}

impl ResourceActions<Servers> {
    pub async fn add_to_placement_group(
        &self,
        server_id: u64,
        params: &AddToPlacementGroupParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(server_id, "add_to_placement_group", params)
            .await
    }

    pub async fn remove_from_placement_group(
        &self,
        server_id: u64,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command_empty(server_id, "remove_from_placement_group")
            .await
    }

    pub async fn attach_iso(
        &self,
        server_id: u64,
        params: &AttachIsoParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(server_id, "attach_iso", params).await
    }

    pub async fn detach_iso(&self, server_id: u64) -> Result<ApiResult<ActionResponse>> {
        self.command_empty(server_id, "detach_iso").await
    }

    pub async fn attach_to_network(
        &self,
        server_id: u64,
        params: &AttachToNetworkParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(server_id, "attach_to_network", params).await
    }

    pub async fn detach_from_network(
        &self,
        server_id: u64,
        params: &DetachFromNetworkParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(server_id, "detach_from_network", params).await
    }

    pub async fn change_alias_ips(
        &self,
        server_id: u64,
        params: &ChangeAliasIpsParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(server_id, "change_alias_ips", params).await
    }

    pub async fn change_dns_ptr(
        &self,
        server_id: u64,
        params: &ChangeDnsPtrParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(server_id, "change_dns_ptr", params).await
    }

    pub async fn change_protection(
        &self,
        server_id: u64,
        params: &ChangeServerProtectionParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(server_id, "change_protection", params).await
    }

    /// The server must be powered off
    pub async fn change_type(
        &self,
        server_id: u64,
        params: &ChangeServerTypeParams,
    ) -> Result<ApiResult<ActionResponse>> {
        self.command(server_id, "change_type", params).await
    }

    pub async fn create_image(
        &self,
        server_id: u64,
        params: &CreateImageParams,
    ) -> Result<ApiResult<CreateImageResponse>> {
        self.command(server_id, "create_image", params).await
    }

    pub async fn enable_backup(&self, server_id: u64) -> Result<ApiResult<ActionResponse>> {
        self.command_empty(server_id, "enable_backup").await
    }

    pub async fn disable_backup(&self, server_id: u64) -> Result<ApiResult<ActionResponse>> {
        self.command_empty(server_id, "disable_backup").await
    }

    /// Boot into the rescue system on the next reboot
    pub async fn enable_rescue(
        &self,
        server_id: u64,
        params: &EnableRescueParams,
    ) -> Result<ApiResult<RootPasswordResponse>> {
        self.command(server_id, "enable_rescue", params).await
    }

    pub async fn disable_rescue(&self, server_id: u64) -> Result<ApiResult<ActionResponse>> {
        self.command_empty(server_id, "disable_rescue").await
    }

    pub async fn poweron(&self, server_id: u64) -> Result<ApiResult<ActionResponse>> {
        self.command_empty(server_id, "poweron").await
    }

    /// Hard power cut; prefer [`shutdown`](Self::shutdown)
    pub async fn poweroff(&self, server_id: u64) -> Result<ApiResult<ActionResponse>> {
        self.command_empty(server_id, "poweroff").await
    }

    /// ACPI reboot
    pub async fn reboot(&self, server_id: u64) -> Result<ApiResult<ActionResponse>> {
        self.command_empty(server_id, "reboot").await
    }

    pub async fn reset(&self, server_id: u64) -> Result<ApiResult<ActionResponse>> {
        self.command_empty(server_id, "reset").await
    }

    /// ACPI shutdown
    pub async fn shutdown(&self, server_id: u64) -> Result<ApiResult<ActionResponse>> {
        self.command_empty(server_id, "shutdown").await
    }

    /// Reinstall from `image`, wiping the disk
    pub async fn rebuild(
        &self,
        server_id: u64,
        params: &RebuildParams,
    ) -> Result<ApiResult<RootPasswordResponse>> {
        self.command(server_id, "rebuild", params).await
    }

    pub async fn request_console(&self, server_id: u64) -> Result<ApiResult<ConsoleResponse>> {
        self.command_empty(server_id, "request_console").await
    }

    pub async fn reset_password(
        &self,
        server_id: u64,
    ) -> Result<ApiResult<RootPasswordResponse>> {
        self.command_empty(server_id, "reset_password").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::build_query;
    use serde_json::json;

    #[test]
    fn test_list_servers_status_filter() {
        let params = ListServersParams {
            common: ListParams::named("web-1"),
            status: vec![ServerStatus::Running, ServerStatus::Off],
        };
        assert_eq!(
            build_query(&params).unwrap(),
            "name=web-1&status=running&status=off"
        );
    }

    #[test]
    fn test_change_protection_body_carries_rebuild() {
        let params = ChangeServerProtectionParams {
            delete: Some(true),
            rebuild: Some(true),
        };
        assert_eq!(
            serde_json::to_value(params).unwrap(),
            json!({"delete": true, "rebuild": true})
        );
    }

    #[test]
    fn test_create_params_skip_empty_collections() {
        let params = CreateServerParams {
            name: "web-1".into(),
            server_type: "cx22".into(),
            image: "ubuntu-24.04".into(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"name": "web-1", "server_type": "cx22", "image": "ubuntu-24.04"})
        );
    }

    #[test]
    fn test_unknown_server_status_is_tolerated() {
        let status: ServerStatus = serde_json::from_value(json!("unknown_future_state")).unwrap();
        assert_eq!(status, ServerStatus::Unknown);
    }
}
