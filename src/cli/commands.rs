//! CLI command handlers

use anyhow::{Context, Result};
use clap::Subcommand;

use traceflow_plugin::config::{ConfigLoader, paths};
use traceflow_plugin::constants::TRACE_TABLE_COLUMNS;
use traceflow_plugin::TraceRequestManager;

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Show the effective configuration (file + environment)
    Show,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
    /// Write a default configuration file if none exists
    Init,
}

/// Handle configuration subcommands
pub fn handle_config_command(cmd: ConfigSubcommand) -> Result<()> {
    match cmd {
        ConfigSubcommand::Show => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;
            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Path => {
            println!("{}", paths::root_config_path().display());
        }
        ConfigSubcommand::Validate => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;
            ConfigLoader::validate(&config).context("Configuration validation failed")?;
            println!("Configuration is valid");
        }
        ConfigSubcommand::Init => {
            let path = paths::root_config_path();
            if path.exists() {
                println!("Configuration already exists: {}", path.display());
            } else {
                ConfigLoader::save(&ConfigLoader::load_defaults(), &path)
                    .context("Failed to save configuration")?;
                println!("Configuration written to {}", path.display());
            }
        }
    }

    Ok(())
}

/// Print all trace requests as a plain table
pub async fn handle_list_command(manager: &TraceRequestManager) -> Result<()> {
    let rows = manager.rows().await.context("Failed to list Traceflows")?;

    if rows.is_empty() {
        println!("No Traceflows found.");
        return Ok(());
    }

    let table: Vec<[String; 6]> = rows
        .into_iter()
        .map(|row| {
            [
                row.name,
                row.source_namespace,
                row.source_pod,
                row.destination_namespace,
                row.destination_pod,
                row.detail.reference,
            ]
        })
        .collect();

    let mut widths = TRACE_TABLE_COLUMNS.map(str::len);
    for row in &table {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let header = TRACE_TABLE_COLUMNS.map(str::to_string);
    for row in std::iter::once(&header).chain(&table) {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        println!("{}", line.join("  ").trim_end());
    }

    Ok(())
}
