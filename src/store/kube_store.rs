//! Traceflow store backed by the Kubernetes API

use super::TraceflowStore;
use crate::error::{TraceflowError, TraceflowResult};
use crate::models::{NewTraceRequest, TraceRequest, Traceflow};
use async_trait::async_trait;
use kube::Api;
use kube::api::{ListParams, PostParams};
use std::future::Future;
use std::time::Duration;

/// Store that reads and writes the cluster-scoped Traceflow resource
pub struct KubeTraceflowStore {
    api: Api<Traceflow>,
    request_timeout: Duration,
    page_size: u32,
}

impl KubeTraceflowStore {
    pub fn new(client: kube::Client, request_timeout: Duration, page_size: u32) -> Self {
        Self {
            api: Api::all(client),
            request_timeout,
            page_size: page_size.max(1),
        }
    }

    /// Run one API call under the per-call deadline
    async fn with_deadline<T, F>(&self, what: &str, name: &str, call: F) -> TraceflowResult<T>
    where
        F: Future<Output = Result<T, kube::Error>>,
    {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => result.map_err(|e| map_kube_error(e, name)),
            Err(_) => Err(TraceflowError::Transport(format!(
                "{} timed out after {}s",
                what,
                self.request_timeout.as_secs()
            ))),
        }
    }
}

#[async_trait]
impl TraceflowStore for KubeTraceflowStore {
    async fn create(&self, request: &NewTraceRequest) -> TraceflowResult<TraceRequest> {
        let tf = request.to_traceflow();
        tracing::debug!("Creating Traceflow {}", request.name);

        let created = self
            .with_deadline(
                "create Traceflow",
                &request.name,
                self.api.create(&PostParams::default(), &tf),
            )
            .await?;

        Ok(created.into())
    }

    async fn get(&self, name: &str) -> TraceflowResult<Option<TraceRequest>> {
        let found = self
            .with_deadline("get Traceflow", name, self.api.get_opt(name))
            .await?;
        Ok(found.map(TraceRequest::from))
    }

    async fn list(&self) -> TraceflowResult<Vec<TraceRequest>> {
        let mut requests = Vec::new();
        let mut continue_token: Option<String> = None;

        // Page through the list so large clusters are never fetched in one response
        loop {
            let mut params = ListParams::default().limit(self.page_size);
            if let Some(token) = &continue_token {
                params = params.continue_token(token);
            }

            let page = self
                .with_deadline("list Traceflows", "", self.api.list(&params))
                .await?;

            requests.extend(page.items.into_iter().map(TraceRequest::from));

            match page.metadata.continue_ {
                Some(token) if !token.is_empty() => continue_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!("Listed {} Traceflows", requests.len());
        Ok(requests)
    }

    fn store_type(&self) -> &'static str {
        "kubernetes"
    }
}

/// Translate a kube-rs error into the trace error kinds by HTTP status
fn map_kube_error(err: kube::Error, name: &str) -> TraceflowError {
    match err {
        kube::Error::Api(response) => match response.code {
            404 => TraceflowError::NotFound(name.to_string()),
            409 => TraceflowError::Conflict(name.to_string()),
            422 => TraceflowError::Validation(response.message.clone()),
            code => TraceflowError::Transport(format!(
                "API server returned {}: {}",
                code, response.message
            )),
        },
        other => TraceflowError::Transport(other.to_string()),
    }
}
