use std::path::{Path, PathBuf};

/// Default systemd location for quadlet units. `%E` is expanded by systemd to
/// the configuration directory (`/etc` for system units).
pub const DEFAULT_OUTPUT_DIR: &str = "%E/containers/systemd";

/// Settings for one translation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadletConfig {
    /// Directory the unit will be installed under. Only used to build the
    /// `Yaml=` value; nothing is written there.
    pub output_dir: String,
    /// Directory the generated files are written to.
    pub dest_dir: PathBuf,
}

impl Default for QuadletConfig {
    fn default() -> Self {
        Self { output_dir: DEFAULT_OUTPUT_DIR.to_string(), dest_dir: PathBuf::from(".") }
    }
}

impl QuadletConfig {
    pub fn new(output_dir: impl Into<String>, dest_dir: impl AsRef<Path>) -> Self {
        Self { output_dir: output_dir.into(), dest_dir: dest_dir.as_ref().to_path_buf() }
    }

    /// Install path of a workload's manifest: `<output_dir>/<name>/<file>`.
    pub fn manifest_unit_path(&self, workload_name: &str, manifest_file: &str) -> String {
        Path::new(&self.output_dir)
            .join(workload_name)
            .join(manifest_file)
            .to_string_lossy()
            .to_string()
    }
}
