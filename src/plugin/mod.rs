//! Dashboard plugin surface
//!
//! A [`PluginModule`] describes everything the host needs: the registered
//! action names, the navigation entry and the route table. The host bridge in
//! [`host`] drives a module over stdin/stdout without the module knowing the
//! wire shapes.

pub mod host;
mod traceflow;

pub use host::{HostBridge, HostRequest, HostResponse};
pub use traceflow::TraceflowPlugin;

use crate::error::TraceflowResult;
use crate::trace::GraphSnapshot;
use crate::view::{ContentResponse, Navigation};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Action form values posted by the host
pub type ActionPayload = Map<String, Value>;

/// What the plugin registers with the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginMetadata {
    pub name: String,
    pub description: String,
    pub action_names: Vec<String>,
    /// Module plugins own a navigation entry and routes
    pub is_module: bool,
}

/// State owned by one host session
///
/// Passed explicitly into action and render calls, so two sessions never see
/// each other's graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub last_graph: Option<GraphSnapshot>,
}

/// Host-facing contract of a plugin module
#[async_trait]
pub trait PluginModule: Send + Sync {
    fn metadata(&self) -> PluginMetadata;

    /// Navigation entry rooted at the host-assigned base path
    fn navigation(&self, base_path: &str) -> Navigation;

    /// Paths served by [`PluginModule::content`]
    fn routes(&self) -> Vec<String>;

    /// Handle a posted action form
    async fn handle_action(
        &self,
        session: &mut SessionState,
        payload: &ActionPayload,
    ) -> TraceflowResult<()>;

    /// Render the content for a route
    async fn content(&self, path: &str, session: &SessionState)
    -> TraceflowResult<ContentResponse>;
}

/// Read a string value from a payload; missing or non-string values read as empty
pub fn payload_string(payload: &ActionPayload, key: &str) -> String {
    payload
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_string_defaults_to_empty() {
        let payload = json!({ "name": "t1", "count": 3 });
        let payload = payload.as_object().unwrap();

        assert_eq!(payload_string(payload, "name"), "t1");
        assert_eq!(payload_string(payload, "count"), "");
        assert_eq!(payload_string(payload, "missing"), "");
    }
}
