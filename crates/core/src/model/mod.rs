//! Core data model shared by the classifier, port resolver, and unit assembler.
//!
//! This module contains:
//! - `InputResource`: a raw structured document plus where it was read from
//! - `ResourceKind`: the closed set of kinds that get special treatment
//! - Port types (`ServicePortSpec`, `PortMapping`, `PortTable`)
//! - `UnitDirective` and the quadlet group/key names used to build a `.kube` unit
//!
//! Typed subsets of the Kubernetes API objects we decode live in [`k8s`].

pub mod k8s;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_yaml::Value;

/// Quadlet unit group names.
pub const UNIT_GROUP: &str = "Unit";
pub const KUBE_GROUP: &str = "Kube";
pub const INSTALL_GROUP: &str = "Install";

/// Quadlet keys emitted by the assembler.
pub const KEY_NAME: &str = "Name";
pub const KEY_DESCRIPTION: &str = "Description";
pub const KEY_YAML: &str = "Yaml";
pub const KEY_WANTED_BY: &str = "WantedBy";
pub const KEY_PUBLISH_PORT: &str = "PublishPort";

/// Target pulled in by the generated unit's `[Install]` section.
pub const DEFAULT_WANTED_BY: &str = "multi-user.target";

/// A structured document as read by the loader.
///
/// The document itself is kept untyped; only the classifier looks inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct InputResource {
    /// File name the document came from, or `<stdin>`.
    pub source: String,
    /// Position of the document within its source (after `List` flattening).
    pub index: usize,
    /// Raw document content.
    pub value: Value,
}

impl InputResource {
    pub fn new(source: impl Into<String>, index: usize, value: Value) -> Self {
        Self { source: source.into(), index, value }
    }

    /// The top-level `kind` field, if present and a string.
    pub fn kind(&self) -> Option<&str> {
        self.value.get("kind").and_then(Value::as_str)
    }

    /// `metadata.name`, if present.
    pub fn name(&self) -> Option<&str> {
        self.value.get("metadata").and_then(|m| m.get("name")).and_then(Value::as_str)
    }

    /// `metadata.namespace`, if present.
    pub fn namespace(&self) -> Option<&str> {
        self.value.get("metadata").and_then(|m| m.get("namespace")).and_then(Value::as_str)
    }

    /// Human-readable identifier used in error messages and logs.
    pub fn describe(&self) -> String {
        match (self.kind(), self.name()) {
            (Some(kind), Some(name)) => {
                format!("{}/{} ({}#{})", kind, name, self.source, self.index)
            }
            (Some(kind), None) => format!("{} ({}#{})", kind, self.source, self.index),
            _ => format!("{}#{}", self.source, self.index),
        }
    }
}

/// Kinds the classifier dispatches on. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Deployment,
    Service,
    Other,
}

impl ResourceKind {
    pub fn from_kind(kind: &str) -> Self {
        match kind {
            "Deployment" => ResourceKind::Deployment,
            "Service" => ResourceKind::Service,
            _ => ResourceKind::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Deployment => "Deployment",
            ResourceKind::Service => "Service",
            ResourceKind::Other => "Other",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the single workload being converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadIdentity {
    pub name: String,
}

impl WorkloadIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// File name of the aggregated manifest (`<name>.full_manifest.yaml`).
    pub fn manifest_file_name(&self) -> String {
        format!("{}.full_manifest.yaml", self.name)
    }

    /// File name of the quadlet unit (`<name>.kube`).
    pub fn unit_file_name(&self) -> String {
        format!("{}.kube", self.name)
    }
}

/// A Service's `targetPort`, which Kubernetes allows to be a number or a port name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetPort {
    Number(i32),
    Name(String),
}

/// One port declared on a Service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePortSpec {
    /// The Service's `port`.
    pub published_port: i32,
    pub target_port: Option<TargetPort>,
    pub node_port: Option<i32>,
}

impl ServicePortSpec {
    pub fn new(published_port: i32) -> Self {
        Self { published_port, target_port: None, node_port: None }
    }

    pub fn with_target_port(mut self, target: i32) -> Self {
        self.target_port = Some(TargetPort::Number(target));
        self
    }

    pub fn with_named_target_port(mut self, name: impl Into<String>) -> Self {
        self.target_port = Some(TargetPort::Name(name.into()));
        self
    }

    pub fn with_node_port(mut self, node_port: i32) -> Self {
        self.node_port = Some(node_port);
        self
    }
}

/// Resolved host/container port pair for one Service port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortMapping {
    pub host_port: i32,
    pub container_port: i32,
}

impl PortMapping {
    /// Quadlet `PublishPort=` value: `<host>:<container>`.
    pub fn publish_value(&self) -> String {
        format!("{}:{}", self.host_port, self.container_port)
    }
}

/// containerPort -> hostPort. Iterates in ascending containerPort order.
pub type PortTable = BTreeMap<i32, i32>;

/// A single `Key=Value` line belonging to a `[Group]` of the unit file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDirective {
    pub group: String,
    pub key: String,
    pub value: String,
}

impl UnitDirective {
    pub fn new(group: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { group: group.into(), key: key.into(), value: value.into() }
    }
}
