//! Headless Epidemic Runner
//!
//! Runs one parameter vector over a scenario and prints the death matrix
//! summary, plus the calibration cost when the scenario has observed deaths.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use metapop::core::config::SimulationConfig;
use metapop::core::error::Result;
use metapop::core::types::Quarter;
use metapop::epidemic::{
    get_cost, run_full_simulation, CalibrationObjective, ParameterVector, SimulationOutcome,
};
use metapop::scenario::load_scenario;

/// Metapopulation epidemic simulator
#[derive(Parser, Debug)]
#[command(name = "metapop_sim")]
#[command(about = "Simulate quarterly deaths across travel-coupled regions")]
struct Args {
    /// Scenario file (.toml or .json) with regions, travel, population
    #[arg(long)]
    scenario: PathBuf,

    /// Simulation config TOML; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Background infection probability
    #[arg(long, allow_hyphen_values = true)]
    p_inf: f64,

    /// Per-contact transmission probability
    #[arg(long, allow_hyphen_values = true)]
    p_transfer: f64,

    /// Recovery probability
    #[arg(long, allow_hyphen_values = true)]
    p_rec: f64,

    /// Random seed (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Only simulate this quarter index (1-4) in every year
    #[arg(long)]
    sim_quarter: Option<u8>,

    /// Fraction of susceptibles exposed to travelers (overrides the config)
    #[arg(long)]
    touch_fraction: Option<f64>,

    /// Average the calibration cost over this many seeds
    #[arg(long, default_value_t = 1)]
    replicates: u64,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct RunReport {
    outcome: SimulationOutcome,
    cost: Option<f64>,
    replicate_cost: Option<f64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(q) = args.sim_quarter {
        config.sim_quarter = Some(Quarter::new(q)?);
    }
    if let Some(touch) = args.touch_fraction {
        config.touch_fraction = touch;
    }
    config.validate()?;

    let loaded = load_scenario(&args.scenario)?;
    let params = ParameterVector::new(args.p_inf, args.p_transfer, args.p_rec);
    let outcome = run_full_simulation(&params, &loaded.inputs, &config)?;

    let mut cost = None;
    let mut replicate_cost = None;
    match (&loaded.observed, &outcome) {
        (Some(observed), SimulationOutcome::Completed(output)) => {
            let observed = observed.to_matrix(&loaded.ordering, output.deaths.columns())?;
            cost = Some(get_cost(&observed, &output.deaths)?);

            if args.replicates > 1 {
                let seeds: Vec<u64> = (0..args.replicates)
                    .map(|i| config.seed.wrapping_add(i))
                    .collect();
                let objective =
                    CalibrationObjective::new(loaded.inputs.clone(), observed, config.clone())?;
                replicate_cost = Some(objective.evaluate_replicates(&params, &seeds)?);
            }
        }
        (Some(_), SimulationOutcome::OutOfDomain(_)) => {
            cost = Some(config.out_of_domain_cost);
        }
        (None, _) => {
            if args.replicates > 1 {
                tracing::warn!("Scenario has no observed deaths; ignoring --replicates");
            }
        }
    }

    if args.format == "json" {
        let report = RunReport {
            outcome,
            cost,
            replicate_cost,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match &outcome {
        SimulationOutcome::Completed(output) => {
            println!("{}", output.summary());
            println!();
            println!("--- Deaths by Quarter ---");
            for (col, slot) in output.deaths.columns().iter().enumerate() {
                println!("{}: {:.0}", slot, output.deaths.column_total(col));
            }
        }
        SimulationOutcome::OutOfDomain(violation) => {
            println!("Parameters out of domain: {}", violation);
        }
    }
    if let Some(cost) = cost {
        println!("\nCalibration cost: {:.6e}", cost);
    }
    if let Some(cost) = replicate_cost {
        println!("Mean cost over {} replicates: {:.6e}", args.replicates, cost);
    }

    Ok(())
}
