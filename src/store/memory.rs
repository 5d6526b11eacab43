//! In-process Traceflow store
//!
//! Keeps requests in creation order. Transport failures can be injected to
//! exercise the error paths of callers.

use super::TraceflowStore;
use crate::error::{TraceflowError, TraceflowResult};
use crate::models::{NewTraceRequest, TraceRequest, TraceflowStatus};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Thread-safe in-memory store
#[derive(Clone, Default)]
pub struct MemoryTraceflowStore {
    inner: Arc<RwLock<Vec<TraceRequest>>>,
    failures: Arc<AtomicUsize>,
    creates: Arc<AtomicUsize>,
}

impl MemoryTraceflowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` store calls fail with a transport error
    pub fn fail_next(&self, count: usize) {
        self.failures.store(count, Ordering::SeqCst);
    }

    /// Number of create calls that reached the store
    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    /// Number of stored requests
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set the status of a stored request, as the cluster controller would
    pub fn set_status(&self, name: &str, status: TraceflowStatus) -> TraceflowResult<()> {
        let mut requests = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let request = requests
            .iter_mut()
            .find(|r| r.name == name)
            .ok_or_else(|| TraceflowError::NotFound(name.to_string()))?;
        request.status = Some(status);
        Ok(())
    }

    fn take_failure(&self, what: &str) -> TraceflowResult<()> {
        let injected = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return Err(TraceflowError::Transport(format!(
                "{}: connection refused",
                what
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl TraceflowStore for MemoryTraceflowStore {
    async fn create(&self, request: &NewTraceRequest) -> TraceflowResult<TraceRequest> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.take_failure("create")?;

        let mut requests = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if requests.iter().any(|r| r.name == request.name) {
            return Err(TraceflowError::Conflict(request.name.clone()));
        }

        let created = TraceRequest::from(request);
        requests.push(created.clone());
        Ok(created)
    }

    async fn get(&self, name: &str) -> TraceflowResult<Option<TraceRequest>> {
        self.take_failure("get")?;
        let requests = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(requests.iter().find(|r| r.name == name).cloned())
    }

    async fn list(&self) -> TraceflowResult<Vec<TraceRequest>> {
        self.take_failure("list")?;
        let requests = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(requests.clone())
    }

    fn store_type(&self) -> &'static str {
        "memory"
    }
}
