//! Traceflow Plugin - create and inspect Antrea Traceflow requests from a dashboard
//!
//! The host dashboard launches this binary and talks to it over stdin/stdout.

mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use traceflow_plugin::config::{Config, ConfigLoader};
use traceflow_plugin::constants::PLUGIN_NAME;
use traceflow_plugin::{HostBridge, KubeTraceflowStore, TraceRequestManager, TraceflowPlugin};

/// Traceflow Plugin - create and inspect Antrea Traceflow requests
#[derive(Parser, Debug)]
#[command(name = "traceflow-plugin")]
#[command(about = "A dashboard plugin for creating and listing Antrea Traceflow requests", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Serve host requests on stdin/stdout (default)
    Serve,
    /// Print all Traceflows in the cluster
    List,
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: cli::ConfigSubcommand,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let list_only = match args.command {
        Some(Command::Config { subcommand }) => return cli::handle_config_command(subcommand),
        Some(Command::Version) => {
            cli::display_version();
            return Ok(());
        }
        Some(Command::List) => true,
        Some(Command::Serve) | None => false,
    };

    if let Some(log_path) = cli::init_logging(args.debug)? {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    let config = ConfigLoader::load().context("Failed to load configuration")?;
    ConfigLoader::validate(&config).context("Invalid configuration")?;
    tracing::debug!("Configuration loaded: {:?}", config);

    // Without a cluster client there is nothing to serve
    let manager = build_manager(&config).await?;

    if list_only {
        cli::handle_list_command(&manager).await
    } else {
        serve(manager).await
    }
}

async fn build_manager(config: &Config) -> Result<TraceRequestManager> {
    let client =
        traceflow_plugin::kube::create_client(config.kubeconfig.as_deref(), &config.cluster)
            .await
            .context("Failed to build cluster configuration")?;

    let store = KubeTraceflowStore::new(
        client,
        Duration::from_secs(config.cluster.request_timeout_secs),
        config.cluster.list_page_size,
    );

    Ok(TraceRequestManager::with_detail_base_path(
        Arc::new(store),
        config.detail_base_path.clone(),
    ))
}

async fn serve(manager: TraceRequestManager) -> Result<()> {
    let mut bridge = HostBridge::new(TraceflowPlugin::new(manager));

    tracing::info!("{} is starting", PLUGIN_NAME);
    bridge
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
        .context("Host bridge failed")
}
