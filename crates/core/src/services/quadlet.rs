//! End-to-end translation: classify, resolve ports, assemble, render, write.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::classify::{classify, ClassifyError};
use crate::config::QuadletConfig;
use crate::load::{load_inputs, LoadError};
use crate::manifest::render_manifest;
use crate::model::{InputResource, PortTable, UnitDirective, WorkloadIdentity};
use crate::ports::PortResolver;
use crate::unit::{assemble_unit, serialize_unit};

#[derive(Debug, Error)]
pub enum QuadletError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error("No Deployment found in the input resources")]
    MissingDeployment,

    #[error("Failed to render manifest YAML: {0}")]
    Render(#[from] serde_yaml::Error),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything produced for one workload, rendered but not yet written.
#[derive(Debug, Clone)]
pub struct QuadletArtifacts {
    pub workload: WorkloadIdentity,
    pub ports: PortTable,
    pub directives: Vec<UnitDirective>,
    pub manifest_file: String,
    pub manifest: String,
    pub unit_file: String,
    pub unit: String,
}

/// Paths of the files written by [`QuadletArtifacts::write_to`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub manifest_path: PathBuf,
    pub unit_path: PathBuf,
}

/// Translate loaded resources into rendered artifacts. Does no IO.
pub fn translate(
    resources: Vec<InputResource>,
    config: &QuadletConfig,
) -> Result<QuadletArtifacts, QuadletError> {
    let classification = classify(resources)?;
    let workload = classification.workload.ok_or(QuadletError::MissingDeployment)?;

    let resolver = PortResolver::with_named_ports(classification.named_container_ports);
    let ports = resolver.table(&classification.service_ports);
    debug!(
        workload = %workload.name,
        service_ports = classification.service_ports.len(),
        published = ports.len(),
        "resolved port table"
    );

    let manifest_file = workload.manifest_file_name();
    let unit_file = workload.unit_file_name();
    let yaml_path = config.manifest_unit_path(&workload.name, &manifest_file);
    let directives = assemble_unit(&workload, &ports, &yaml_path);

    let manifest = render_manifest(&classification.manifest_entries)?;
    let unit = serialize_unit(&directives);

    Ok(QuadletArtifacts { workload, ports, directives, manifest_file, manifest, unit_file, unit })
}

/// Load every input (files, directories, or `-` for stdin) and translate them.
pub fn load_and_translate<S: AsRef<str>>(
    inputs: &[S],
    recursive: bool,
    config: &QuadletConfig,
) -> Result<QuadletArtifacts, QuadletError> {
    let resources = load_inputs(inputs, recursive)?;
    debug!(count = resources.len(), "loaded resources");
    translate(resources, config)
}

impl QuadletArtifacts {
    /// Write the manifest and then the unit into `dir`.
    ///
    /// If the unit cannot be written the manifest is removed again, so a failed
    /// run does not leave half of the pair behind.
    pub fn write_to(&self, dir: &Path) -> Result<WrittenFiles, QuadletError> {
        let manifest_path = dir.join(&self.manifest_file);
        let unit_path = dir.join(&self.unit_file);

        fs::write(&manifest_path, &self.manifest)
            .map_err(|source| QuadletError::Io { path: manifest_path.clone(), source })?;
        info!(path = %manifest_path.display(), "wrote manifest");

        if let Err(source) = fs::write(&unit_path, &self.unit) {
            if let Err(err) = fs::remove_file(&manifest_path) {
                warn!(path = %manifest_path.display(), error = %err, "failed to remove manifest");
            }
            return Err(QuadletError::Io { path: unit_path, source });
        }
        info!(path = %unit_path.display(), "wrote unit");

        Ok(WrittenFiles { manifest_path, unit_path })
    }
}

/// Translate and write into `config.dest_dir`.
pub fn convert(
    resources: Vec<InputResource>,
    config: &QuadletConfig,
) -> Result<WrittenFiles, QuadletError> {
    let artifacts = translate(resources, config)?;
    artifacts.write_to(&config.dest_dir)
}
