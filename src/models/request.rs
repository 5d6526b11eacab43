//! Domain types for trace requests

use serde::{Deserialize, Serialize};

use super::traceflow::{Traceflow, TraceflowStatus};
use crate::error::{TraceflowError, TraceflowResult};

/// A trace request as submitted by a user, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTraceRequest {
    pub name: String,
    pub source_namespace: String,
    pub source_pod: String,
    pub destination_namespace: String,
    pub destination_pod: String,
}

impl NewTraceRequest {
    pub fn new(
        name: impl Into<String>,
        source_namespace: impl Into<String>,
        source_pod: impl Into<String>,
        destination_namespace: impl Into<String>,
        destination_pod: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_namespace: source_namespace.into(),
            source_pod: source_pod.into(),
            destination_namespace: destination_namespace.into(),
            destination_pod: destination_pod.into(),
        }
    }

    /// Check that every required field is present
    ///
    /// Whitespace-only values count as empty. The first empty field is reported.
    pub fn validate(&self) -> TraceflowResult<()> {
        let fields = [
            ("name", &self.name),
            ("sourceNamespace", &self.source_namespace),
            ("sourcePod", &self.source_pod),
            ("destinationNamespace", &self.destination_namespace),
            ("destinationPod", &self.destination_pod),
        ];

        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(TraceflowError::empty_field(field)),
            None => Ok(()),
        }
    }

    /// Build the custom resource to create; fields not set here stay at their defaults
    pub fn to_traceflow(&self) -> Traceflow {
        Traceflow {
            src_namespace: self.source_namespace.clone(),
            src_pod: self.source_pod.clone(),
            dst_namespace: self.destination_namespace.clone(),
            dst_pod: self.destination_pod.clone(),
            ..Traceflow::new(&self.name)
        }
    }
}

/// A trace request known to the cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceRequest {
    pub name: String,
    pub source_namespace: String,
    pub source_pod: String,
    pub destination_namespace: String,
    pub destination_pod: String,
    /// Owned by the cluster; never written by this crate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TraceflowStatus>,
}

impl TraceRequest {
    /// Current phase reported by the cluster, if any
    pub fn phase(&self) -> Option<&str> {
        self.status.as_ref().and_then(TraceflowStatus::phase)
    }

    /// Derive the display row, linking to `<base_path>/<name>`
    pub fn to_row(&self, base_path: &str) -> TraceRow {
        TraceRow {
            name: self.name.clone(),
            source_namespace: self.source_namespace.clone(),
            source_pod: self.source_pod.clone(),
            destination_namespace: self.destination_namespace.clone(),
            destination_pod: self.destination_pod.clone(),
            detail: DetailLink {
                text: self.name.clone(),
                reference: format!("{}/{}", base_path.trim_end_matches('/'), self.name),
            },
        }
    }
}

impl From<Traceflow> for TraceRequest {
    fn from(tf: Traceflow) -> Self {
        Self {
            name: tf.metadata.name.unwrap_or_default(),
            source_namespace: tf.src_namespace,
            source_pod: tf.src_pod,
            destination_namespace: tf.dst_namespace,
            destination_pod: tf.dst_pod,
            status: tf.status,
        }
    }
}

impl From<&NewTraceRequest> for TraceRequest {
    fn from(req: &NewTraceRequest) -> Self {
        Self {
            name: req.name.clone(),
            source_namespace: req.source_namespace.clone(),
            source_pod: req.source_pod.clone(),
            destination_namespace: req.destination_namespace.clone(),
            destination_pod: req.destination_pod.clone(),
            status: None,
        }
    }
}

/// Link to the full resource detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailLink {
    pub text: String,
    pub reference: String,
}

/// One line of the trace list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceRow {
    pub name: String,
    pub source_namespace: String,
    pub source_pod: String,
    pub destination_namespace: String,
    pub destination_pod: String,
    pub detail: DetailLink,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> NewTraceRequest {
        NewTraceRequest::new("t1", "default", "pod-a", "default", "pod-b")
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_each_empty_field_is_rejected() {
        let cases: [(&str, fn(&mut NewTraceRequest)); 5] = [
            ("name", |r| r.name.clear()),
            ("sourceNamespace", |r| r.source_namespace.clear()),
            ("sourcePod", |r| r.source_pod.clear()),
            ("destinationNamespace", |r| r.destination_namespace.clear()),
            ("destinationPod", |r| r.destination_pod.clear()),
        ];

        for (field, clear) in cases {
            let mut req = valid_request();
            clear(&mut req);
            assert_eq!(
                req.validate(),
                Err(TraceflowError::empty_field(field)),
                "clearing {} should fail validation",
                field
            );
        }
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let mut req = valid_request();
        req.destination_pod = "   ".to_string();
        assert_eq!(
            req.validate(),
            Err(TraceflowError::empty_field("destinationPod"))
        );
    }

    #[test]
    fn test_traceflow_round_trip_keeps_endpoints() {
        let tf = valid_request().to_traceflow();
        assert_eq!(tf.metadata.name.as_deref(), Some("t1"));
        assert!(tf.dst_service.is_empty());
        assert!(tf.packet.is_empty());
        assert!(tf.status.is_none());

        let req = TraceRequest::from(tf);
        assert_eq!(req, TraceRequest::from(&valid_request()));
    }

    #[test]
    fn test_row_link_joins_base_path() {
        let req = TraceRequest::from(&valid_request());
        let row = req.to_row("/cluster-overview/custom-resources/traceflows/");
        assert_eq!(row.detail.text, "t1");
        assert_eq!(
            row.detail.reference,
            "/cluster-overview/custom-resources/traceflows/t1"
        );
        assert_eq!(row.source_pod, "pod-a");
        assert_eq!(row.destination_pod, "pod-b");
    }
}
