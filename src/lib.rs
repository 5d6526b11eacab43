//! Traceflow Plugin Library
//!
//! Core of the traceflow dashboard plugin: trace request management over the
//! Antrea Traceflow custom resource, plus the component tree and host bridge
//! the dashboard consumes. Used by the binary and by the integration tests.

pub mod config;
pub mod constants;
pub mod error;
pub mod kube;
pub mod models;
pub mod plugin;
pub mod store;
pub mod trace;
pub mod view;

// Re-export commonly used types for convenience
pub use error::{TraceflowError, TraceflowResult};
pub use models::{NewTraceRequest, TraceRequest, TraceRow};
pub use plugin::{HostBridge, PluginModule, SessionState, TraceflowPlugin};
pub use store::{KubeTraceflowStore, MemoryTraceflowStore, TraceflowStore};
pub use trace::{GraphSnapshot, TraceRequestManager};
