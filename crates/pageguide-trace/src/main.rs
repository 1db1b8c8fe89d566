//! Replay a recorded gesture and print the guides as JSON.

use std::path::PathBuf;

use clap::Parser;
use pageguide_trace::{TraceResult, load_config, load_scenario, run_scenario};

#[derive(Debug, Parser)]
#[command(name = "pageguide-trace", version, about)]
struct Cli {
    /// Scenario file: candidate boxes plus the mover's box per pointer move.
    scenario: PathBuf,

    /// Guide config overriding the one embedded in the scenario.
    #[arg(long, env = "PAGEGUIDE_CONFIG")]
    config: Option<PathBuf>,

    /// Print the report as a single line.
    #[arg(long)]
    compact: bool,
}

fn run(cli: &Cli) -> TraceResult<()> {
    let scenario = load_scenario(&cli.scenario)?;
    let config = cli.config.as_deref().map(load_config).transpose()?;

    let report = run_scenario(&scenario, config);
    let json = if cli.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{}", json);

    if report.live_after_end > 0 {
        log::warn!("{} guide primitives leaked past end_drag", report.live_after_end);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Replaying {}", cli.scenario.display());

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
