#![forbid(unsafe_code)]

mod color;
mod constants;
mod gui;
mod monitor;
mod placement;
mod player;
mod settings;
mod types;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tracing::{info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use gui::LaunchOptions;
use settings::Settings;

/// Kiosk launcher: a 3x3 grid of buttons that loop videos fullscreen in mpv
#[derive(Debug, Parser)]
#[command(name = "video-launcher", version, about)]
struct Args {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Start windowed this run without changing the saved mode
    #[arg(long)]
    windowed: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.debug { TraceLevel::DEBUG } else { TraceLevel::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings_path = args.settings.unwrap_or_else(Settings::default_path);
    let settings = Settings::load(&settings_path)?;
    info!(
        path = %settings_path.display(),
        fullscreen = settings.fullscreen,
        mpv_path = %settings.mpv_path,
        "Settings ready"
    );

    let shutdown = Arc::new(AtomicBool::new(false));
    #[cfg(unix)]
    for signal in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&shutdown))?;
    }

    gui::run_gui(
        settings,
        settings_path,
        LaunchOptions {
            force_windowed: args.windowed,
            shutdown,
        },
    )?;

    info!("Launcher exited");
    Ok(())
}
