use planetsim::{run_headless, Scenario, ScenarioConfig};
use planetsim::{bench_derivative, bench_step};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "planets.yaml")]
    file_name: String,

    /// Override the number of frames to run
    #[arg(long)]
    frames: Option<u64>,

    /// Run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if args.bench {
        bench_derivative();
        bench_step();
        return Ok(());
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(frames) = args.frames {
        scenario_cfg.engine.frames = frames;
    }

    let mut scenario = Scenario::build_scenario(scenario_cfg);
    if let Err(e) = run_headless(&mut scenario) {
        error!(t = scenario.system.t + e.time(), "simulation halted");
        return Err(e).context("integration failed");
    }

    Ok(())
}
