//! camctl: headless and scripted front end.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use camctl::backends::probe_registry;
use camctl::config::Settings;
use camctl::{logger, Change, Manager};

/// Command-line arguments for camctl
#[derive(Parser, Debug)]
#[command(name = "camctl")]
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

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List devices as `path<TAB>name`
    List,
    /// Build every device's widgets and print them
    Show {
        /// Print JSON snapshots instead of text
        #[arg(long)]
        json: bool,
    },
    /// Change one control the way its widget would
    Set {
        /// Device path or name
        device: String,
        /// Control name
        control: String,
        /// on/off for toggles, an option for choice groups, a number for sliders
        value: String,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Settings::default(),
    }
    .with_overrides(args.fixtures, args.verbose);

    logger::init(&settings.logging);
    info!(version = env!("CARGO_PKG_VERSION"), fixtures = settings.use_fixtures, "camctl starting");

    let registry = probe_registry(&settings)?;

    match args.command {
        Command::List => {
            for (path, name) in registry.list()? {
                println!("{path}\t{name}");
            }
        }
        Command::Show { json } => {
            let manager = Manager::open(registry.as_ref()).context("building device layouts")?;
            let snapshots = manager.snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshots)?);
            } else {
                for snap in &snapshots {
                    print!("{snap}");
                }
            }
            manager.close();
        }
        Command::Set {
            device,
            control,
            value,
        } => {
            let mut manager = Manager::open_one(registry.as_ref(), &device)
                .with_context(|| format!("opening {device}"))?;
            let Some(binding) = manager.layout(0).and_then(|l| l.find(&control)) else {
                bail!("device `{device}` has no control `{control}`");
            };
            let id = binding.control().id();
            let kind = binding.widget().kind();
            let Some(change) = Change::parse(kind, &value) else {
                bail!("`{value}` is not a valid {kind:?} value for `{control}`");
            };

            let outcome = manager.dispatch(0, id, change);
            if let Some(view) = manager.snapshot().first().and_then(|s| s.get(&control)) {
                println!("{view}");
            }
            manager.close();
            outcome.with_context(|| format!("setting `{control}`"))?;
        }
    }
    Ok(())
}
