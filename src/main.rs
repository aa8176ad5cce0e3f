//! Clickbridge replay tool - main entry point.
//!
//! Plays a JSON script of host callbacks through the bridge and prints the
//! normalized event stream, one event per line.

use clap::Parser;
use std::path::PathBuf;

use clickbridge::replay::{run_script, Script};
use clickbridge::Config;

#[derive(Debug, Parser)]
#[command(name = "clickbridge-replay", about = "Replay host callbacks through the event bridge")]
struct Args {
    /// Script of host steps (JSON).
    #[arg(long)]
    script: PathBuf,

    /// Bridge config file; defaults are used when omitted.
    #[arg(long, env = "CLICKBRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Print events as JSON lines.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    // Initialize observability
    clickbridge::observability::init_tracing(&config.observability);

    let layout = config.layout()?;
    let script = Script::from_file(&args.script)?;
    tracing::info!(
        "replaying {} steps from {} (layout {})",
        script.steps.len(),
        args.script.display(),
        layout.version
    );

    for event in run_script(&script, layout)? {
        if args.json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            println!("{event}");
        }
    }

    Ok(())
}
