//! Antrea Traceflow custom resource
//!
//! The resource is cluster-scoped and lives in `traceflows.antrea.tanzu.vmware.com`.
//! Its endpoint fields sit next to `metadata` rather than under a `spec` object,
//! so the type implements [`Resource`] by hand instead of deriving `CustomResource`.
//! Only the endpoint fields are written by this plugin; `status` belongs to the
//! Antrea controller and is carried through untouched.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::{ClusterResourceScope, Resource, TypeMeta};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;

const GROUP: &str = "antrea.tanzu.vmware.com";
const VERSION: &str = "v1";
const KIND: &str = "Traceflow";
const PLURAL: &str = "traceflows";

/// A Traceflow as stored by the API server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Traceflow {
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub src_namespace: String,
    #[serde(default)]
    pub src_pod: String,
    #[serde(default)]
    pub dst_namespace: String,
    #[serde(default)]
    pub dst_pod: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dst_service: String,
    #[serde(default, rename = "roundID", skip_serializing_if = "String::is_empty")]
    pub round_id: String,
    #[serde(default, skip_serializing_if = "Packet::is_empty")]
    pub packet: Packet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TraceflowStatus>,
}

impl Traceflow {
    /// Empty Traceflow named `name`, with apiVersion and kind filled in
    pub fn new(name: &str) -> Self {
        Self {
            types: Some(TypeMeta {
                api_version: Self::api_version(&()).into_owned(),
                kind: Self::kind(&()).into_owned(),
            }),
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl Resource for Traceflow {
    type DynamicType = ();
    type Scope = ClusterResourceScope;

    fn group(_: &()) -> Cow<'_, str> {
        GROUP.into()
    }

    fn kind(_: &()) -> Cow<'_, str> {
        KIND.into()
    }

    fn version(_: &()) -> Cow<'_, str> {
        VERSION.into()
    }

    fn api_version(_: &()) -> Cow<'_, str> {
        format!("{}/{}", GROUP, VERSION).into()
    }

    fn plural(_: &()) -> Cow<'_, str> {
        PLURAL.into()
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

/// Packet template injected by the controller; left empty on create
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Packet {
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Packet {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Observed state written by the Antrea controller
///
/// Kept opaque: every field the controller sets survives a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceflowStatus {
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl TraceflowStatus {
    /// Current phase (e.g. "Running", "Succeeded", "Failed"), if reported
    pub fn phase(&self) -> Option<&str> {
        self.fields.get("phase").and_then(|v| v.as_str())
    }
}
