//! Trace request manager
//!
//! Validates submitted trace requests and maps them onto the cluster-state
//! store. Nothing here retries: the first failure goes back to the caller.

use std::sync::Arc;

use crate::constants::DEFAULT_DETAIL_BASE_PATH;
use crate::error::{TraceflowError, TraceflowResult};
use crate::models::{NewTraceRequest, TraceRequest, TraceRow};
use crate::store::TraceflowStore;

/// Owns the submit / lookup / list logic for trace requests
#[derive(Clone)]
pub struct TraceRequestManager {
    store: Arc<dyn TraceflowStore>,
    detail_base_path: String,
}

impl TraceRequestManager {
    pub fn new(store: Arc<dyn TraceflowStore>) -> Self {
        Self::with_detail_base_path(store, DEFAULT_DETAIL_BASE_PATH)
    }

    pub fn with_detail_base_path(
        store: Arc<dyn TraceflowStore>,
        detail_base_path: impl Into<String>,
    ) -> Self {
        Self {
            store,
            detail_base_path: detail_base_path.into(),
        }
    }

    /// Submit a new trace request
    ///
    /// Nothing reaches the store unless all five fields are non-empty.
    pub async fn submit(&self, request: NewTraceRequest) -> TraceflowResult<TraceRequest> {
        request.validate()?;

        match self.store.create(&request).await {
            Ok(created) => {
                tracing::info!(
                    name = %created.name,
                    source = %format!("{}/{}", created.source_namespace, created.source_pod),
                    destination = %format!("{}/{}", created.destination_namespace, created.destination_pod),
                    "Created Traceflow"
                );
                Ok(created)
            }
            Err(e) => {
                tracing::warn!("Failed to create Traceflow {}: {}", request.name, e);
                Err(e)
            }
        }
    }

    /// Fetch a single trace request by exact name
    pub async fn get_by_name(&self, name: &str) -> TraceflowResult<TraceRequest> {
        self.store
            .get(name)
            .await?
            .ok_or_else(|| TraceflowError::NotFound(name.to_string()))
    }

    /// List every known trace request, in store order
    ///
    /// Each call queries the store again, so a failed call can simply be retried.
    pub async fn list_all(&self) -> TraceflowResult<Vec<TraceRequest>> {
        self.store.list().await.inspect_err(|e| {
            tracing::warn!(
                "Failed to list Traceflows from {} store: {}",
                self.store.store_type(),
                e
            )
        })
    }

    /// List every trace request as display rows
    pub async fn rows(&self) -> TraceflowResult<Vec<TraceRow>> {
        Ok(self
            .list_all()
            .await?
            .iter()
            .map(|request| request.to_row(&self.detail_base_path))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockTraceflowStore;

    fn request(name: &str) -> NewTraceRequest {
        NewTraceRequest::new(name, "default", "pod-a", "default", "pod-b")
    }

    #[tokio::test]
    async fn test_invalid_submit_never_reaches_store() {
        let mut store = MockTraceflowStore::new();
        store.expect_create().never();

        let manager = TraceRequestManager::new(Arc::new(store));
        let err = manager
            .submit(NewTraceRequest::new("t1", "default", "", "default", "pod-b"))
            .await
            .unwrap_err();

        assert_eq!(err, TraceflowError::empty_field("sourcePod"));
    }

    #[tokio::test]
    async fn test_submit_passes_fields_through() {
        let mut store = MockTraceflowStore::new();
        store
            .expect_create()
            .withf(|req| req.name == "t1" && req.destination_pod == "pod-b")
            .times(1)
            .returning(|req| Ok(TraceRequest::from(req)));

        let manager = TraceRequestManager::new(Arc::new(store));
        let created = manager.submit(request("t1")).await.unwrap();
        assert_eq!(created.name, "t1");
    }

    #[tokio::test]
    async fn test_submit_surfaces_first_failure_without_retry() {
        let mut store = MockTraceflowStore::new();
        store
            .expect_create()
            .times(1)
            .returning(|_| Err(TraceflowError::Transport("connection refused".into())));

        let manager = TraceRequestManager::new(Arc::new(store));
        let err = manager.submit(request("t1")).await.unwrap_err();
        assert_eq!(
            err,
            TraceflowError::Transport("connection refused".to_string())
        );
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let mut store = MockTraceflowStore::new();
        store.expect_get().returning(|_| Ok(None));

        let manager = TraceRequestManager::new(Arc::new(store));
        assert_eq!(
            manager.get_by_name("nope").await,
            Err(TraceflowError::NotFound("nope".to_string()))
        );
    }

    #[tokio::test]
    async fn test_list_failure_is_returned() {
        let mut store = MockTraceflowStore::new();
        store
            .expect_list()
            .returning(|| Err(TraceflowError::Transport("timed out".into())));
        store.expect_store_type().return_const("mock");

        let manager = TraceRequestManager::new(Arc::new(store));
        assert!(matches!(
            manager.rows().await,
            Err(TraceflowError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_rows_use_detail_base_path() {
        let mut store = MockTraceflowStore::new();
        store
            .expect_list()
            .returning(|| Ok(vec![TraceRequest::from(&request("t1"))]));

        let manager = TraceRequestManager::with_detail_base_path(Arc::new(store), "/traces");
        let rows = manager.rows().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].detail.reference, "/traces/t1");
    }
}
