use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use hcloud_api::config::{Config, ENDPOINT_ENV, TOKEN_ENV};
use hcloud_api::query::append_query;
use hcloud_api::types::ListParams;
use hcloud_api::{ApiResult, HetznerClient};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Command-line client for the Hetzner Cloud API
#[derive(Parser, Debug)]
#[command(name = "hcloud", version, about, long_about = None)]
struct Cli {
    /// API token (overrides the config file)
    #[arg(long, env = TOKEN_ENV, hide_env_values = true, global = true)]
    token: Option<String>,

    /// API root (overrides the config file)
    #[arg(long, env = ENDPOINT_ENV, global = true)]
    endpoint: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List resources of one kind
    List {
        kind: ResourceKind,
        #[command(flatten)]
        filter: ListFilter,
    },
    /// Show one resource
    Get { kind: ResourceKind, id: u64 },
    /// Delete one resource
    Delete { kind: ResourceKind, id: u64 },
    /// Show the state of an action
    Action { id: u64 },
    /// Show all prices
    Pricing,
    /// Manage the stored configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Store the API token
    SetToken { token: String },
    /// Store the API root
    SetEndpoint { url: String },
    /// Print the stored configuration
    Show,
}

#[derive(Args, Debug, Default)]
struct ListFilter {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    label_selector: Option<String>,
    /// e.g. `created:desc`
    #[arg(long)]
    sort: Option<String>,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    per_page: Option<u32>,
}

impl From<ListFilter> for ListParams {
    fn from(f: ListFilter) -> Self {
        ListParams {
            name: f.name,
            label_selector: f.label_selector,
            sort: f.sort,
            page: f.page,
            per_page: f.per_page,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ResourceKind {
    Certificates,
    Datacenters,
    Firewalls,
    FloatingIps,
    Images,
    Isos,
    LoadBalancers,
    LoadBalancerTypes,
    Locations,
    Networks,
    PlacementGroups,
    PrimaryIps,
    Servers,
    ServerTypes,
    SshKeys,
    Volumes,
}

impl ResourceKind {
    /// Collection path relative to the API root
    fn path(self) -> &'static str {
        match self {
            ResourceKind::Certificates => "/certificates",
            ResourceKind::Datacenters => "/datacenters",
            ResourceKind::Firewalls => "/firewalls",
            ResourceKind::FloatingIps => "/floating_ips",
            ResourceKind::Images => "/images",
            ResourceKind::Isos => "/isos",
            ResourceKind::LoadBalancers => "/load_balancers",
            ResourceKind::LoadBalancerTypes => "/load_balancer_types",
            ResourceKind::Locations => "/locations",
            ResourceKind::Networks => "/networks",
            ResourceKind::PlacementGroups => "/placement_groups",
            ResourceKind::PrimaryIps => "/primary_ips",
            ResourceKind::Servers => "/servers",
            ResourceKind::ServerTypes => "/server_types",
            ResourceKind::SshKeys => "/ssh_keys",
            ResourceKind::Volumes => "/volumes",
        }
    }

    /// Catalogue kinds cannot be deleted
    fn is_read_only(self) -> bool {
        matches!(
            self,
            ResourceKind::Datacenters
                | ResourceKind::Isos
                | ResourceKind::LoadBalancerTypes
                | ResourceKind::Locations
                | ResourceKind::ServerTypes
        )
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_directive(self) -> Option<&'static str> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some("error"),
            LogLevel::Warn => Some("warn"),
            LogLevel::Info => Some("info"),
            LogLevel::Debug => Some("debug"),
            LogLevel::Trace => Some("trace"),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(directive) = level.as_directive() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("hcloud started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("hcloud").join("hcloud.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".hcloud").join("hcloud.log");
    }
    PathBuf::from("hcloud.log")
}

fn print_output<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).context("Failed to encode JSON")?,
        OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to encode YAML")?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

/// Print a successful payload, or the error object on stderr.
/// Returns whether the call succeeded.
fn report<T: Serialize>(result: ApiResult<T>, format: OutputFormat) -> Result<bool> {
    match result {
        ApiResult::Success(payload) => {
            print_output(&payload, format)?;
            Ok(true)
        },
        ApiResult::Failure(error) => {
            tracing::warn!("Request failed: {}", error);
            let rendered =
                serde_json::to_string_pretty(&error).context("Failed to encode error payload")?;
            eprintln!("{}", rendered);
            Ok(false)
        },
    }
}

fn run_config(command: ConfigCommand, mut config: Config, format: OutputFormat) -> Result<bool> {
    match command {
        ConfigCommand::SetToken { token } => {
            config.token = Some(token);
            config.save()?;
            println!("Token saved");
        },
        ConfigCommand::SetEndpoint { url } => {
            url::Url::parse(&url).with_context(|| format!("Invalid endpoint URL: {}", url))?;
            config.endpoint = Some(url);
            config.save()?;
            println!("Endpoint saved");
        },
        ConfigCommand::Show => {
            let shown = serde_json::json!({
                "path": Config::config_path().map(|p| p.display().to_string()),
                "token": config.masked_token(),
                "endpoint": config.effective_endpoint(None),
            });
            print_output(&shown, format)?;
        },
    }
    Ok(true)
}

async fn run(cli: Cli) -> Result<bool> {
    let config = Config::load();
    let format = cli.output;

    if let Command::Config(command) = cli.command {
        return run_config(command, config, format);
    }

    let Some(token) = config.effective_token(cli.token.as_deref()) else {
        bail!(
            "No API token configured. Set {} or run `hcloud config set-token <token>`",
            TOKEN_ENV
        );
    };
    let endpoint = config.effective_endpoint(cli.endpoint.as_deref());

    tracing::info!("Using endpoint: {}", endpoint);

    let client = HetznerClient::with_base_url(&token, &endpoint)?;

    match cli.command {
        Command::List { kind, filter } => {
            let params = ListParams::from(filter);
            let path = append_query(kind.path(), Some(&params))?;
            let result = client.http().get::<Value>(&path).await?;
            report(result, format)
        },
        Command::Get { kind, id } => {
            let result = client
                .http()
                .get::<Value>(&format!("{}/{}", kind.path(), id))
                .await?;
            report(result, format)
        },
        Command::Delete { kind, id } => {
            if kind.is_read_only() {
                bail!("{:?} cannot be deleted", kind);
            }
            let result = client
                .http()
                .delete::<Value>(&format!("{}/{}", kind.path(), id))
                .await?;
            report(result, format)
        },
        Command::Action { id } => report(client.actions().get(id).await?, format),
        Command::Pricing => report(client.billing().get().await?, format),
        Command::Config(_) => Ok(true),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = setup_logging(cli.log_level)?;

    if !run(cli).await? {
        std::process::exit(1);
    }

    Ok(())
}
