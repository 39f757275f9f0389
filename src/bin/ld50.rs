use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ld50_rs::uncertainty::DEFAULT_ITERATIONS;
use ld50_rs::{Bootstrap, ConfidenceInterval, DoseResponseData, FitResult, Fitter};

/// Fit a log-logistic dose-response curve and bootstrap the ED50.
#[derive(Debug, Parser)]
#[command(name = "ld50", version)]
struct Args {
    /// CSV file with `dose`, `response` and `total` columns
    file: PathBuf,

    /// Number of bootstrap trials
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Seed for the bootstrap; drawn from OS entropy when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run bootstrap trials on a single thread
    #[arg(long)]
    sequential: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    observations: usize,
    fit: FitResult,
    ed10: Option<f64>,
    ed90: Option<f64>,
    interval: ConfidenceInterval,
    bootstrap_trials: usize,
    bootstrap_successes: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    debug!("args: {args:?}");

    let data = DoseResponseData::from_csv_path(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let fit = Fitter::new().fit(&data).context("fit failed")?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let bootstrap = Bootstrap::new()
        .with_iterations(args.iterations)
        .with_parallel(!args.sequential)
        .run(&data, &mut rng)
        .context("bootstrap failed")?;

    let report = Report {
        observations: data.len(),
        fit,
        ed10: fit.effective_dose(0.1),
        ed90: fit.effective_dose(0.9),
        interval: bootstrap.interval,
        bootstrap_trials: bootstrap.attempted,
        bootstrap_successes: bootstrap.successes(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.fit);
        println!("  ED10: {}", format_dose(report.ed10));
        println!("  ED90: {}", format_dose(report.ed90));
        println!(
            "Bootstrap ({} of {} trials usable):",
            report.bootstrap_successes, report.bootstrap_trials
        );
        println!("  95% interval: {}", report.interval);
    }
    Ok(())
}

fn format_dose(dose: Option<f64>) -> String {
    match dose {
        Some(d) => format!("{:.6}", d),
        None => "n/a".to_string(),
    }
}
