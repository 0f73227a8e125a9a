use std::path::Path;

use anyhow::{anyhow, Context, Result};
use quadlet_core::config::QuadletConfig;
use quadlet_core::model::PortMapping;
use quadlet_core::services::quadlet::load_and_translate;
use serde::Serialize;

/// Options for one `kubectl quadlet` run, as collected from flags and env.
#[derive(Debug, Clone)]
pub struct QuadletOptions {
    pub filenames: Vec<String>,
    pub recursive: bool,
    pub output_dir: String,
    pub dest: String,
    pub json: bool,
}

#[derive(Serialize)]
pub struct QuadletSummary {
    pub workload: String,
    pub manifest_path: String,
    pub unit_path: String,
    pub yaml: String,
    pub publish_ports: Vec<PortMapping>,
}

pub fn validate_options(opts: &QuadletOptions) -> Result<()> {
    if opts.filenames.is_empty() {
        return Err(anyhow!("must specify at least one -f/--filename"));
    }
    if opts.output_dir.trim().is_empty() {
        return Err(anyhow!("--output-dir must not be empty"));
    }
    Ok(())
}

/// Convert the given manifests into `<name>.full_manifest.yaml` and `<name>.kube`.
pub fn quadlet_command(opts: &QuadletOptions) -> Result<()> {
    validate_options(opts)?;

    let dest = Path::new(&opts.dest);
    if !dest.is_dir() {
        return Err(anyhow!("Destination directory does not exist: {}", dest.display()));
    }
    let dest = dest
        .canonicalize()
        .with_context(|| format!("Failed to resolve destination {}", dest.display()))?;

    let config = QuadletConfig::new(opts.output_dir.clone(), &dest);
    let artifacts = load_and_translate(&opts.filenames, opts.recursive, &config)
        .context("Failed to build quadlet files")?;
    let written = artifacts
        .write_to(&config.dest_dir)
        .with_context(|| format!("Failed to write quadlet files to {}", dest.display()))?;

    let yaml = config.manifest_unit_path(&artifacts.workload.name, &artifacts.manifest_file);
    if opts.json {
        let summary = QuadletSummary {
            workload: artifacts.workload.name.clone(),
            manifest_path: written.manifest_path.display().to_string(),
            unit_path: written.unit_path.display().to_string(),
            yaml,
            publish_ports: artifacts
                .ports
                .iter()
                .map(|(&container_port, &host_port)| PortMapping { host_port, container_port })
                .collect(),
        };
        let serialized =
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Generated quadlet for {}:", artifacts.workload.name);
    println!("  Manifest: {}", written.manifest_path.display());
    println!("  Unit: {}", written.unit_path.display());
    println!("  Yaml: {}", yaml);
    if artifacts.ports.is_empty() {
        println!("  Published ports: (none)");
    } else {
        println!("  Published ports:");
        for (container_port, host_port) in &artifacts.ports {
            println!("    - {}:{}", host_port, container_port);
        }
    }
    println!();
    println!(
        "Place {} in {} and {} in {}/{}/",
        artifacts.unit_file,
        config.output_dir,
        artifacts.manifest_file,
        config.output_dir,
        artifacts.workload.name
    );

    Ok(())
}
