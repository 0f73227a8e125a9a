use std::collections::HashMap;

use quadlet_core::model::{PortMapping, ServicePortSpec};
use quadlet_core::ports::{build_port_table, resolve_port, PortResolver};

#[test]
fn numeric_target_port_wins_over_node_port() {
    let spec = ServicePortSpec::new(80).with_target_port(8080).with_node_port(30080);
    assert_eq!(resolve_port(&spec), PortMapping { host_port: 8080, container_port: 80 });
}

#[test]
fn node_port_used_without_target_port() {
    let spec = ServicePortSpec::new(443).with_node_port(30443);
    assert_eq!(resolve_port(&spec), PortMapping { host_port: 30443, container_port: 443 });
}

#[test]
fn falls_back_to_published_port() {
    for port in [1, 80, 5432, 65535] {
        let mapping = resolve_port(&ServicePortSpec::new(port));
        assert_eq!(mapping.host_port, port);
        assert_eq!(mapping.container_port, port);
    }
}

#[test]
fn named_target_port_is_ignored_by_plain_resolution() {
    let spec = ServicePortSpec::new(80).with_named_target_port("http").with_node_port(30080);
    assert_eq!(resolve_port(&spec).host_port, 30080);

    let spec = ServicePortSpec::new(80).with_named_target_port("http");
    assert_eq!(resolve_port(&spec).host_port, 80);
}

#[test]
fn named_target_port_resolves_through_workload_ports() {
    let resolver =
        PortResolver::with_named_ports(HashMap::from([("http".to_string(), 8080)]));

    let spec = ServicePortSpec::new(80).with_named_target_port("http").with_node_port(30080);
    assert_eq!(resolver.resolve(&spec), PortMapping { host_port: 8080, container_port: 80 });

    let unknown = ServicePortSpec::new(81).with_named_target_port("metrics");
    assert_eq!(resolver.resolve(&unknown), PortMapping { host_port: 81, container_port: 81 });
}

#[test]
fn later_spec_overwrites_same_container_port() {
    let specs = vec![
        ServicePortSpec::new(8080).with_target_port(9000),
        ServicePortSpec::new(8080).with_node_port(31000),
    ];
    let table = build_port_table(&specs);
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(&8080), Some(&31000));
}

#[test]
fn table_iterates_by_container_port() {
    let specs = vec![
        ServicePortSpec::new(9090),
        ServicePortSpec::new(80).with_target_port(8080),
        ServicePortSpec::new(443).with_node_port(30443),
    ];
    let table = build_port_table(&specs);
    let keys: Vec<i32> = table.keys().copied().collect();
    assert_eq!(keys, vec![80, 443, 9090]);
}

#[test]
fn empty_specs_give_empty_table() {
    assert!(build_port_table(&[]).is_empty());
    assert!(PortResolver::new().table(&[]).is_empty());
}
