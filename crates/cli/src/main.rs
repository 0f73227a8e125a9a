use anyhow::Result;
use clap::Parser;
use kubectl_quadlet::commands::{quadlet_command, QuadletOptions};
use quadlet_core::config::DEFAULT_OUTPUT_DIR;
use tracing_subscriber::EnvFilter;

/// Create quadlet files from Kubernetes manifests.
///
/// Outputs all kinds except Services into a single file (`<name>.full_manifest.yaml`)
/// and a `<name>.kube` file for quadlet. Service ports become `PublishPort=` lines.
/// Place the quadlet file in `%E/containers/systemd/` and the aggregated
/// manifest in `%E/containers/systemd/<name>/`.
#[derive(Parser, Debug)]
#[command(
    name = "kubectl-quadlet",
    version,
    about = "Create quadlet files from Kubernetes manifests"
)]
struct Cli {
    /// Filename, directory, or `-` for stdin, containing the resources to convert.
    #[arg(short = 'f', long = "filename", required = true)]
    filenames: Vec<String>,

    /// Process the directory used in -f recursively.
    #[arg(short = 'R', long, default_value_t = false)]
    recursive: bool,

    /// Directory the unit will be installed in; used for the `Yaml=` path.
    #[arg(long, env = "QUADLET_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: String,

    /// Directory to write the generated files to.
    #[arg(long, env = "QUADLET_DEST", default_value = ".")]
    dest: String,

    /// Emit a JSON summary instead of human-readable text.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Enable debug logging (otherwise RUST_LOG, defaulting to warn).
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let opts = QuadletOptions {
        filenames: cli.filenames,
        recursive: cli.recursive,
        output_dir: cli.output_dir,
        dest: cli.dest,
        json: cli.json,
    };
    quadlet_command(&opts)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
