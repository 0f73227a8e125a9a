//! Port mapping resolution for Service ports.
//!
//! Each Service port resolves to exactly one `PortMapping` whose container side
//! is the Service's published `port`. The host side is picked by priority:
//! numeric `targetPort`, then `nodePort`, then the published port itself.

use std::collections::HashMap;

use crate::model::{PortMapping, PortTable, ServicePortSpec, TargetPort};

/// Resolve a single Service port. Named target ports count as absent.
pub fn resolve_port(spec: &ServicePortSpec) -> PortMapping {
    let target = match &spec.target_port {
        Some(TargetPort::Number(n)) => Some(*n),
        _ => None,
    };
    mapping_for(spec, target)
}

/// Resolve every spec and key the results by container port. Later specs
/// overwrite earlier ones that publish the same port.
pub fn build_port_table(specs: &[ServicePortSpec]) -> PortTable {
    PortResolver::default().table(specs)
}

fn mapping_for(spec: &ServicePortSpec, target: Option<i32>) -> PortMapping {
    let host_port = target.or(spec.node_port).unwrap_or(spec.published_port);
    PortMapping { host_port, container_port: spec.published_port }
}

/// Resolver that can also look up named target ports in the workload's
/// container port declarations.
#[derive(Debug, Clone, Default)]
pub struct PortResolver {
    named: HashMap<String, i32>,
}

impl PortResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_named_ports(named: HashMap<String, i32>) -> Self {
        Self { named }
    }

    pub fn resolve(&self, spec: &ServicePortSpec) -> PortMapping {
        let target = match &spec.target_port {
            Some(TargetPort::Number(n)) => Some(*n),
            Some(TargetPort::Name(name)) => {
                let found = self.named.get(name).copied();
                if found.is_none() {
                    tracing::debug!(
                        port = spec.published_port,
                        target_port = %name,
                        "named targetPort not declared by the workload; ignoring it"
                    );
                }
                found
            }
            None => None,
        };
        mapping_for(spec, target)
    }

    pub fn table(&self, specs: &[ServicePortSpec]) -> PortTable {
        let mut table = PortTable::new();
        for spec in specs {
            let mapping = self.resolve(spec);
            if let Some(previous) = table.insert(mapping.container_port, mapping.host_port) {
                if previous != mapping.host_port {
                    tracing::debug!(
                        container_port = mapping.container_port,
                        previous,
                        host_port = mapping.host_port,
                        "container port published twice; keeping the later mapping"
                    );
                }
            }
        }
        table
    }
}
