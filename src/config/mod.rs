//! Configuration system for traceflow-plugin
//!
//! A single YAML file with cluster connection settings, layered over built-in
//! defaults and overridden by environment variables.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{ClusterConfig, Config};
