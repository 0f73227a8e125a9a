//! quadlet-core
//!
//! Core library for turning Kubernetes manifests into podman quadlet units.
//!
//! Given one Deployment plus its Services (and any other resources), this crate
//! produces an aggregated manifest for `podman kube play` and a `.kube` unit
//! that publishes the Services' ports on the host.
//!
//! All substantive logic lives here so it can be tested without the CLI.

pub mod classify;
pub mod config;
pub mod load;
pub mod manifest;
pub mod model;
pub mod ports;
pub mod services;
pub mod unit;

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
