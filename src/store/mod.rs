//! Cluster-state store for trace requests
//!
//! The trace manager talks to the cluster only through [`TraceflowStore`]:
//! - [`KubeTraceflowStore`] - the Antrea Traceflow API via kube-rs
//! - [`MemoryTraceflowStore`] - an in-process store for tests and offline runs

mod kube_store;
mod memory;

pub use kube_store::KubeTraceflowStore;
pub use memory::MemoryTraceflowStore;

use crate::error::TraceflowResult;
use crate::models::{NewTraceRequest, TraceRequest};
use async_trait::async_trait;

/// System of record for trace requests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TraceflowStore: Send + Sync {
    /// Create a new trace request
    ///
    /// Fails with `Conflict` if the name is already taken.
    async fn create(&self, request: &NewTraceRequest) -> TraceflowResult<TraceRequest>;

    /// Get a trace request by exact name, `Ok(None)` if absent
    async fn get(&self, name: &str) -> TraceflowResult<Option<TraceRequest>>;

    /// List every known trace request in store order
    async fn list(&self) -> TraceflowResult<Vec<TraceRequest>>;

    /// Store type name for logging
    fn store_type(&self) -> &'static str;
}
