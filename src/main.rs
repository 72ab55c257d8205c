use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use liveplot::capability::RenderSlot;
use liveplot::config::PreviewConfig;
use liveplot::dispatch::{InputDispatcher, ReadyPolicy};
use liveplot::loader::{self, TracingSink};
use liveplot::surface::PreviewSurface;
use liveplot::tui::field::InputField;
use liveplot::tui::runner::run_tui;

#[derive(Parser)]
#[command(name = "liveplot", about = "Live formula preview rendered by a wasm module.")]
struct Cli {
    /// Path to the render module (.wasm component); overrides liveplot.yaml
    module: Option<PathBuf>,
    /// Coalescing window in milliseconds (0 = render on every keystroke)
    #[arg(long)]
    debounce_ms: Option<u64>,
    /// Replay the last pre-load edit once the module is ready
    #[arg(long)]
    replay_last: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("liveplot=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = PreviewConfig::load();
    if let Some(module) = cli.module {
        config.module = Some(module);
    }
    if let Some(ms) = cli.debounce_ms {
        config.debounce_ms = ms;
    }
    if cli.replay_last {
        config.ready_policy = ReadyPolicy::ReplayLast;
    }
    let module = config
        .module
        .clone()
        .context("no render module given (argument or liveplot.yaml)")?;

    info!("liveplot starting with module {}", module.display());

    let surface = PreviewSurface::new();
    let slot = RenderSlot::new();

    // Module acquisition starts now; the input field below is usable
    // before it resolves.
    tokio::spawn(loader::acquire(
        module,
        slot.clone(),
        surface.clone(),
        Arc::new(TracingSink),
    ));

    let (field, changes) = InputField::new();
    let dispatcher = InputDispatcher::new(field.clone(), slot, config.dispatcher());
    tokio::spawn(dispatcher.run(changes));

    run_tui(field, surface).await
}
