//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DETAIL_BASE_PATH;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Kubeconfig file to use instead of the inferred configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<String>,

    /// Link target prefix for the "Detailed Information" column
    #[serde(default = "default_detail_base_path")]
    pub detail_base_path: String,

    /// Cluster connection settings
    #[serde(default)]
    pub cluster: ClusterConfig,
}

/// Cluster connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterConfig {
    /// Time allowed to establish a connection to the API server
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Deadline for a single create/get/list call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Items fetched per list page
    #[serde(default = "default_list_page_size")]
    pub list_page_size: u32,
}

// Default value functions
fn default_detail_base_path() -> String {
    DEFAULT_DETAIL_BASE_PATH.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_list_page_size() -> u32 {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            detail_base_path: default_detail_base_path(),
            cluster: ClusterConfig::default(),
        }
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            list_page_size: default_list_page_size(),
        }
    }
}
