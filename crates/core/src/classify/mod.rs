//! Resource classification.
//!
//! A single pass over the loaded resources that:
//! - keeps every non-Service document for the aggregated manifest (input order),
//! - captures the workload identity from the Deployment,
//! - collects the port specs of every Service.
//!
//! Dispatch goes through a `Classifier` registry keyed by `ResourceKind`, so a
//! new kind needs one `register` call and a handler function.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::model::k8s::{Deployment, Service};
use crate::model::{InputResource, ResourceKind, ServicePortSpec, WorkloadIdentity};

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The document is not something we can inspect as a Kubernetes object.
    #[error("Resource {resource} is not a structured document: {reason}")]
    InputCast { resource: String, reason: String },

    #[error("Failed to decode {kind} {resource}: {source}")]
    Decode {
        resource: String,
        kind: ResourceKind,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Only one Deployment is supported, found {first} and {second}")]
    MultipleDeployments { first: String, second: String },

    #[error("Deployment {resource} has no metadata.name")]
    UnnamedDeployment { resource: String },
}

/// What happens to a resource after its handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Written to the aggregated manifest.
    Keep,
    /// Used for unit generation only.
    Consume,
}

/// Accumulated result of a classification pass.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub manifest_entries: Vec<InputResource>,
    pub workload: Option<WorkloadIdentity>,
    pub service_ports: Vec<ServicePortSpec>,
    /// Named container ports of the workload, used to resolve named `targetPort`s.
    pub named_container_ports: HashMap<String, i32>,
    workload_resource: Option<String>,
}

pub type KindHandler =
    fn(&InputResource, &mut Classification) -> Result<Disposition, ClassifyError>;

/// Registry of per-kind handlers. Kinds without a handler are kept as-is.
#[derive(Default)]
pub struct Classifier {
    handlers: HashMap<ResourceKind, KindHandler>,
}

impl Classifier {
    pub fn new() -> Self {
        Self { handlers: HashMap::new() }
    }

    pub fn register(&mut self, kind: ResourceKind, handler: KindHandler) -> &mut Self {
        self.handlers.insert(kind, handler);
        self
    }

    pub fn handles(&self, kind: ResourceKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub fn classify(
        &self,
        resources: Vec<InputResource>,
    ) -> Result<Classification, ClassifyError> {
        let mut out = Classification::default();
        for resource in resources {
            let kind = checked_kind(&resource)?;
            let disposition = match self.handlers.get(&kind) {
                Some(handler) => handler(&resource, &mut out)?,
                None => Disposition::Keep,
            };
            debug!(resource = %resource.describe(), ?disposition, "classified resource");
            if disposition == Disposition::Keep {
                out.manifest_entries.push(resource);
            }
        }
        Ok(out)
    }
}

/// Classifier with the Deployment and Service handlers registered.
pub fn default_classifier() -> Classifier {
    let mut classifier = Classifier::new();
    classifier
        .register(ResourceKind::Deployment, handle_deployment)
        .register(ResourceKind::Service, handle_service);
    classifier
}

/// Classify with the default handlers.
pub fn classify(resources: Vec<InputResource>) -> Result<Classification, ClassifyError> {
    default_classifier().classify(resources)
}

fn checked_kind(resource: &InputResource) -> Result<ResourceKind, ClassifyError> {
    if !resource.value.is_mapping() {
        return Err(ClassifyError::InputCast {
            resource: resource.describe(),
            reason: "document is not a mapping".to_string(),
        });
    }
    let kind = resource.kind().ok_or_else(|| ClassifyError::InputCast {
        resource: resource.describe(),
        reason: "missing string field `kind`".to_string(),
    })?;
    Ok(ResourceKind::from_kind(kind))
}

fn decode<T: serde::de::DeserializeOwned>(
    resource: &InputResource,
    kind: ResourceKind,
) -> Result<T, ClassifyError> {
    serde_yaml::from_value(resource.value.clone()).map_err(|source| ClassifyError::Decode {
        resource: resource.describe(),
        kind,
        source,
    })
}

pub fn handle_deployment(
    resource: &InputResource,
    out: &mut Classification,
) -> Result<Disposition, ClassifyError> {
    let deployment: Deployment = decode(resource, ResourceKind::Deployment)?;

    if let Some(first) = &out.workload_resource {
        return Err(ClassifyError::MultipleDeployments {
            first: first.clone(),
            second: resource.describe(),
        });
    }

    let name = deployment.metadata.name.clone().unwrap_or_default();
    if name.is_empty() {
        return Err(ClassifyError::UnnamedDeployment { resource: resource.describe() });
    }

    out.named_container_ports = deployment.named_container_ports();
    out.workload = Some(WorkloadIdentity::new(name));
    out.workload_resource = Some(resource.describe());
    Ok(Disposition::Keep)
}

pub fn handle_service(
    resource: &InputResource,
    out: &mut Classification,
) -> Result<Disposition, ClassifyError> {
    let service: Service = decode(resource, ResourceKind::Service)?;
    let ports = service.port_specs();
    debug!(resource = %resource.describe(), ports = ports.len(), "collected service ports");
    out.service_ports.extend(ports);
    Ok(Disposition::Consume)
}
