use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use iocraft::prelude::*;

use taiga_board::app::App;
use taiga_board::color::ColorDepth;
use taiga_board::config::loader;
use taiga_board::engine::{Engine, TaigaEngine};
use taiga_board::labels::ResolvedLabels;
use taiga_board::taiga::auth;
use taiga_board::taiga::client::TaigaClient;
use taiga_board::theme::{Background, ResolvedTheme};

#[derive(Parser)]
#[command(name = "taiga-board", version, about = "Taiga TUI Dashboard")]
struct Cli {
    /// Path to config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging to debug.log.
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Install a panic hook that writes to a file, since the fullscreen TUI
    // swallows stderr.
    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        let msg = format!("{info}\n\n{backtrace}");
        let _ = std::fs::write("panic.log", &msg);
        eprintln!("{msg}");
    }));

    let cli = Cli::parse();

    // Set up tracing.
    if cli.debug {
        let file = std::fs::File::create("debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    // Load config.
    let config = loader::load_config(cli.config.as_deref())?;
    if config.server.base_url.is_empty() {
        bail!(
            "no Taiga server configured. Add a [server] section with `base_url` \
             and `projects` to the config (see --help for lookup paths)."
        );
    }
    if config.server.projects.is_empty() {
        bail!("no projects configured. List project ids under [server] `projects`.");
    }

    // Detect terminal capabilities.
    let color_depth = ColorDepth::detect();
    let background = Background::detect();
    let theme = ResolvedTheme::resolve(&config.theme, background);
    let labels = ResolvedLabels::resolve(&config.labels);

    // Start the Taiga backend engine in a dedicated OS thread (owns its own
    // Tokio runtime). Dropping `engine_handle` at the end of `main` closes
    // the sender channel, signalling the engine to shut down.
    let token = auth::resolve_token(&config.server)?;
    let client = TaigaClient::new(&config.server.base_url)
        .with_context(|| format!("invalid server base_url {:?}", config.server.base_url))?;
    let engine_handle =
        TaigaEngine::new(client, token, config.server.projects.clone()).start();

    tracing::info!("taiga-board starting");

    // Enter fullscreen TUI (iocraft uses smol internally).
    smol::block_on(
        element! {
            App(
                config: &config,
                engine: &engine_handle,
                theme: &theme,
                labels: &labels,
                color_depth,
                background,
            )
        }
        .fullscreen(),
    )?;

    Ok(())
}
