//! Command implementations and dispatch logic.
//!
//! Every reporting command loads the same inputs, runs one resolution and
//! renders the report its own way.

use tracing::info;

use tether_config::ResolvedConfig;
use tether_core::error::TetherResult;
use tether_registry::{FsManifestSource, InstalledRegistry, KnownOrigins};
use tether_resolver::ResolutionReport;

pub mod json;
pub mod resolve;
pub mod tree;


use crate::output::OutputHandler;
use crate::Commands;

/// Shared context for all commands
pub struct CommandContext {
    pub config: ResolvedConfig,
    pub output: OutputHandler,
}

/// Registries and manifests a resolution runs over
pub struct Inputs {
    pub installed: InstalledRegistry,
    pub origins: KnownOrigins,
    pub manifests: FsManifestSource,
}

impl CommandContext {
    pub fn new(config: ResolvedConfig, output: OutputHandler) -> Self {
        Self { config, output }
    }

    /// Read both registries named by the configuration
    pub fn load_inputs(&self) -> TetherResult<Inputs> {
        let installed = InstalledRegistry::load(&self.config.installed_file)?;
        let origins = KnownOrigins::load(&self.config.origins_file)?;
        info!(
            "Loaded {} installed plugins and {} known origins",
            installed.len(),
            origins.len()
        );

        Ok(Inputs {
            installed,
            origins,
            manifests: FsManifestSource::new(self.config.manifest_path.clone()),
        })
    }
}

impl Inputs {
    pub fn resolve(&self) -> ResolutionReport {
        tether_resolver::resolve(&self.installed, &self.origins, &self.manifests)
    }
}

/// Dispatch a command to its handler
pub fn dispatch_command(command: Commands, ctx: &CommandContext) -> TetherResult<()> {
    match command {
        Commands::Resolve => {
            info!("Resolving plugin dependencies");
            resolve::execute(ctx)
        },
        Commands::Tree => {
            info!("Printing dependency tree");
            tree::execute(ctx)
        },
        Commands::Json => {
            info!("Writing JSON report");
            json::execute(ctx)
        },
        Commands::Version => show_version(ctx),
    }
}

fn show_version(ctx: &CommandContext) -> TetherResult<()> {
    ctx.output.info(&format!("tether v{}", env!("CARGO_PKG_VERSION")));
    ctx.output.info(&format!("Built: {}", env!("BUILD_DATE")));
    ctx.output.info(&format!("Target: {}", env!("TETHER_TARGET")));
    ctx.output.info(&format!("Rust: {}", env!("RUSTC_VERSION")));
    Ok(())
}
