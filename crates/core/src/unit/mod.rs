//! Quadlet `.kube` unit assembly and serialization.

use crate::model::{
    PortMapping, PortTable, UnitDirective, WorkloadIdentity, DEFAULT_WANTED_BY, INSTALL_GROUP,
    KEY_DESCRIPTION, KEY_NAME, KEY_PUBLISH_PORT, KEY_WANTED_BY, KEY_YAML, KUBE_GROUP, UNIT_GROUP,
};

/// Build the ordered directive list for a workload.
///
/// `Name`, `Description`, `Yaml` and `WantedBy` always come first, in that
/// order, followed by one `PublishPort` per container port in `ports`.
/// `manifest_path` is the value of the `Yaml=` key.
pub fn assemble_unit(
    workload: &WorkloadIdentity,
    ports: &PortTable,
    manifest_path: &str,
) -> Vec<UnitDirective> {
    let mut directives = Vec::with_capacity(4 + ports.len());
    directives.push(UnitDirective::new(UNIT_GROUP, KEY_NAME, &workload.name));
    directives.push(UnitDirective::new(UNIT_GROUP, KEY_DESCRIPTION, &workload.name));
    directives.push(UnitDirective::new(KUBE_GROUP, KEY_YAML, manifest_path));
    directives.push(UnitDirective::new(INSTALL_GROUP, KEY_WANTED_BY, DEFAULT_WANTED_BY));

    for (&container_port, &host_port) in ports {
        let mapping = PortMapping { host_port, container_port };
        directives.push(UnitDirective::new(KUBE_GROUP, KEY_PUBLISH_PORT, mapping.publish_value()));
    }
    directives
}

/// Render directives in systemd unit syntax.
///
/// Groups appear in the order they are first seen. Every directive of a group
/// is written under its single `[Group]` header in append order, so repeated
/// keys stay repeated. Groups are separated by a blank line.
pub fn serialize_unit(directives: &[UnitDirective]) -> String {
    let mut groups: Vec<(&str, Vec<&UnitDirective>)> = Vec::new();
    for directive in directives {
        match groups.iter_mut().find(|entry| entry.0 == directive.group) {
            Some((_, entries)) => entries.push(directive),
            None => groups.push((directive.group.as_str(), vec![directive])),
        }
    }

    let mut out = String::new();
    for (i, (group, entries)) in groups.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("[{group}]\n"));
        for entry in entries {
            out.push_str(&format!("{}={}\n", entry.key, entry.value));
        }
    }
    out
}
