//! Version command handler

use traceflow_plugin::constants::PLUGIN_NAME;

/// Display version information
pub fn display_version() {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("  {}", env!("CARGO_PKG_DESCRIPTION"));
    println!("  Registers as: {}", PLUGIN_NAME);
    println!("  License: {}", env!("CARGO_PKG_LICENSE"));
}
