// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Claimscore CLI
//!
//! Command-line interface for scoring claim-verification predictions.

use anyhow::{Context, Result};
use claimscore_core::{EvaluationConfig, SCIFACT_OPEN_UNRANKED_BASELINE};
use claimscore_evals::{ClaimEvaluator, PRPoint};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "claimscore")]
#[command(about = "Claimscore - score ranked claim-verification predictions", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbose mode
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Gold claims (JSON Lines)
    #[arg(long)]
    claims: PathBuf,

    /// Model predictions (.csv or .jsonl)
    #[arg(long)]
    predictions: PathBuf,

    /// Output as JSON (machine-readable)
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every model and print the results table
    Evaluate {
        #[command(flatten)]
        input: InputArgs,

        /// TOML file with per-model overrides
        #[arg(long)]
        config: Option<PathBuf>,

        /// Report average precision as NaN for this model (repeatable)
        #[arg(long = "skip-ap", value_name = "MODEL")]
        skip_ap: Vec<String>,

        /// Apply the SciFact-Open baseline exemption
        #[arg(long)]
        scifact_open: bool,

        /// Report fractions instead of percentages
        #[arg(long)]
        fractions: bool,
    },

    /// Print the precision-recall curve for one model
    Curve {
        #[command(flatten)]
        input: InputArgs,

        /// Model to plot
        #[arg(long)]
        model: String,
    },
}

#[derive(Serialize)]
struct CurveReport<'a> {
    model: &'a str,
    n_relevant: usize,
    average_precision: f64,
    points: Vec<PRPoint>,
}

fn build_config(
    path: Option<&PathBuf>,
    skip_ap: &[String],
    scifact_open: bool,
    fractions: bool,
) -> Result<EvaluationConfig> {
    let mut config = match path {
        Some(path) => EvaluationConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EvaluationConfig::default(),
    };

    if scifact_open {
        config = config.skip_average_precision_for(SCIFACT_OPEN_UNRANKED_BASELINE);
    }
    for model in skip_ap {
        config = config.skip_average_precision_for(model.as_str());
    }
    if fractions {
        config = config.with_percent_scale(false);
    }
    Ok(config)
}

fn load(input: &InputArgs, config: EvaluationConfig) -> Result<ClaimEvaluator> {
    ClaimEvaluator::from_files(&input.claims, &input.predictions, config).with_context(|| {
        format!(
            "Failed to load {} and {}",
            input.claims.display(),
            input.predictions.display()
        )
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; RUST_LOG wins over --verbose
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase())),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Evaluate {
            input,
            config,
            skip_ap,
            scifact_open,
            fractions,
        } => {
            let config = build_config(config.as_ref(), &skip_ap, scifact_open, fractions)?;
            let evaluator = load(&input, config)?;
            let table = evaluator.evaluate().context("Evaluation failed")?;

            info!(models = table.len(), "scored models");
            if input.json {
                println!("{}", table.to_json()?);
            } else {
                print!("{table}");
            }
        }

        Commands::Curve { input, model } => {
            let evaluator = load(&input, EvaluationConfig::default())?;
            let curve = evaluator
                .curve(&model)
                .with_context(|| format!("Failed to build curve for {model}"))?;

            let report = CurveReport {
                model: &model,
                n_relevant: curve.n_relevant,
                average_precision: curve.average_precision(),
                points: curve.points().collect(),
            };

            if input.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Model: {}", report.model);
                println!("  Relevant gold: {}", report.n_relevant);
                println!("  Average precision: {:.4}", report.average_precision);
                println!();
                println!("{:>10}  {:>10}  {:>10}", "threshold", "precision", "recall");
                for point in &report.points {
                    let threshold = point
                        .threshold
                        .map(|t| format!("{t:.4}"))
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{:>10}  {:>10.4}  {:>10.4}",
                        threshold, point.precision, point.recall
                    );
                }
            }
        }
    }

    Ok(())
}
