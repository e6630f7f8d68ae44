//! DeltaBlue benchmark runner.
//!
//! Usage: `deltablue [--config <file>] [--chain <n>] [--projection <n>] [--rounds <n>]`

use std::path::PathBuf;
use std::process;

use clap::Parser;
use deltablue_scenarios::{run, ScenarioConfig, ScenarioError};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "deltablue", version)]
#[command(about = "Run the DeltaBlue chain and projection benchmarks")]
struct Args {
    /// TOML file with scenario settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of variables in the chain scenario
    #[arg(long)]
    chain: Option<usize>,

    /// Number of src/dst pairs in the projection scenario
    #[arg(long)]
    projection: Option<usize>,

    /// Measured rounds
    #[arg(long)]
    rounds: Option<usize>,
}

fn load_config(args: &Args) -> Result<ScenarioConfig, ScenarioError> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            ScenarioConfig::from_toml_file(path)?
        }
        None => ScenarioConfig::default(),
    };
    if let Some(n) = args.chain {
        config = config.with_chain_length(n);
    }
    if let Some(n) = args.projection {
        config = config.with_projection_size(n);
    }
    if let Some(n) = args.rounds {
        config = config.with_rounds(n);
    }
    config.validate()?;
    Ok(config)
}

fn main() {
    deltablue_scenarios::init_logging();

    let args = Args::parse();

    let report = match load_config(&args).and_then(|config| run(&config)) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    println!("{}", report);
}
