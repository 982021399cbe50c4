//! camctl-gui entry point
//!
//! Opens every device and builds all layouts before the window is created, so a
//! device that cannot be read aborts startup instead of showing a partial panel.

use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use iced::Size;
use tracing::info;

use camctl::backends::probe_registry;
use camctl::config::Settings;
use camctl::gui::app::ControlPanel;
use camctl::{logger, Manager};

/// Command-line arguments for camctl-gui
#[derive(Parser, Debug)]
#[command(name = "camctl-gui")]
#[command(version, about = "Webcam control panel", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "CAMCTL_CONFIG")]
    config: Option<PathBuf>,

    /// Serve the fixture devices instead of real hardware
    #[arg(long)]
    fixtures: bool,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let manager = match open_devices(Args::parse()) {
        Ok(manager) => manager,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let panel = RefCell::new(Some(ControlPanel::new(manager)));
    let result = iced::application(
        move || panel.borrow_mut().take().unwrap_or_default(),
        ControlPanel::update,
        ControlPanel::view,
    )
    .title("VideoController")
    .window_size(Size::new(640.0, 480.0))
    .centered()
    .run();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn open_devices(args: Args) -> Result<Manager> {
    let settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Settings::default(),
    }
    .with_overrides(args.fixtures, args.verbose);

    logger::init(&settings.logging);
    info!(version = env!("CARGO_PKG_VERSION"), fixtures = settings.use_fixtures, "camctl-gui starting");

    let registry = probe_registry(&settings)?;
    Manager::open(registry.as_ref()).context("building device layouts")
}
