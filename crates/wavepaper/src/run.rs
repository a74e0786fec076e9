use anyhow::Result;
use renderer::{Renderer, RendererConfig, TimePolicy};
use tracing_subscriber::EnvFilter;

use crate::cli::RunArgs;
use crate::paths::AppPaths;
use crate::store::FileStore;
use crate::theme::ModeController;

/// Installs the global subscriber; `RUST_LOG` overrides the `info` default.
pub fn initialise_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

/// Brings up storage and the mode controller, then hands the generated wave
/// program to the window loop.
pub fn run(args: RunArgs) -> Result<()> {
    let state_file = match args.state_file {
        Some(path) => path,
        None => AppPaths::discover()?.state_file(),
    };
    let store = FileStore::load_or_default(state_file);
    tracing::debug!(state_file = %store.path().display(), "resolved wavepaper paths");

    let mut controller = ModeController::new(store, args.mode);
    tracing::info!(
        mode = controller.mode().storage_value(),
        "bootstrapping wavepaper daemon"
    );

    let mut config = RendererConfig {
        vertex_source: waves::VERTEX_SOURCE.to_string(),
        fragment_source: waves::fragment_source(),
        ..RendererConfig::default()
    };
    if let Some(size) = args.size {
        config.surface_size = size;
    }
    if let Some(time) = args.still {
        tracing::info!(time, "rendering a frozen backdrop");
        config.time_policy = TimePolicy::Fixed { time };
    }

    let result = Renderer::new(config).run(&mut controller);
    tracing::debug!(
        mode = controller.mode().storage_value(),
        warning_shown = controller.page().responsive_warning.has_class("show"),
        "daemon shut down"
    );
    result
}

/// Implements `wavepaper where`.
pub fn print_paths() -> Result<()> {
    let paths = AppPaths::discover()?;
    println!("Configuration directories:");
    println!("  config:  {}", paths.config_dir().display());
    println!("  state:   {}", paths.state_file().display());
    Ok(())
}
