// ABOUTME: Clinutri CLI - command-line front end for the clinical nutrition engine
// ABOUTME: Runs consolidated assessments, batch assessments, energy bundles, and FI scores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Assess one snapshot, pulling goals and baselines from a history file
//! clinutri-cli assess --input request.json --history history.json --pretty
//!
//! # Assess many snapshots in parallel
//! clinutri-cli batch --input requests.json
//!
//! # Compare energy formulas
//! clinutri-cli energy --input energy.json --bundle four-way
//!
//! # Feeding intolerance score with a gastric residual volume
//! clinutri-cli fi-score --distension 1 --vomiting 0 --diarrhea 2 --grv 320
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use clinutri::energy::ComparisonBundle;
use clinutri::logging::LoggingConfig;
use clinutri::EngineConfig;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "clinutri-cli",
    about = "Clinical nutrition decision engine CLI",
    long_about = "Command-line front end for energy, protein, screening, refeeding, and adequacy assessment. Reads JSON, writes JSON to stdout."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Run the consolidated assessment for one request
    Assess {
        /// Assessment request (JSON)
        #[arg(long)]
        input: PathBuf,

        /// Prior assessments (JSON array, any order)
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Run consolidated assessments for an array of requests in parallel
    Batch {
        /// Assessment requests (JSON array)
        #[arg(long)]
        input: PathBuf,
    },

    /// Estimate energy expenditure
    Energy {
        /// Energy input (JSON)
        #[arg(long)]
        input: PathBuf,

        /// Compare several formulas instead of Mifflin-St Jeor alone
        #[arg(long, value_enum)]
        bundle: Option<BundleArg>,
    },

    /// Score feeding intolerance
    FiScore {
        /// Abdominal distension or pain points (0, 1, 2, 5)
        #[arg(long, default_value = "0")]
        distension: u8,

        /// Nausea or vomiting points (0, 1, 2, 5)
        #[arg(long, default_value = "0")]
        vomiting: u8,

        /// Diarrhea points (0, 1, 2, 5)
        #[arg(long, default_value = "0")]
        diarrhea: u8,

        /// Gastric residual volume (mL)
        #[arg(long)]
        grv: Option<f64>,
    },
}

/// Comparison bundle names accepted on the command line
#[derive(Clone, Copy, ValueEnum)]
enum BundleArg {
    MifflinHarris,
    MifflinWeir,
    MifflinWeight,
    HarrisWeir,
    FourWay,
}

impl From<BundleArg> for ComparisonBundle {
    fn from(arg: BundleArg) -> Self {
        match arg {
            BundleArg::MifflinHarris => Self::MifflinHarris,
            BundleArg::MifflinWeir => Self::MifflinWeir,
            BundleArg::MifflinWeight => Self::MifflinWeight,
            BundleArg::HarrisWeir => Self::HarrisWeir,
            BundleArg::FourWay => Self::FourWay,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    let config = EngineConfig::load()?;
    info!("Engine configuration loaded");

    let output = match cli.command {
        Command::Assess { input, history } => {
            commands::assess::single(&input, history.as_deref(), &config)?
        }
        Command::Batch { input } => commands::assess::batch(&input, &config)?,
        Command::Energy { input, bundle } => {
            commands::energy::run(&input, bundle.map(ComparisonBundle::from), &config)?
        }
        Command::FiScore {
            distension,
            vomiting,
            diarrhea,
            grv,
        } => commands::fi_score::run(distension, vomiting, diarrhea, grv, &config)?,
    };

    helpers::output::print_json(&output, cli.pretty)
}
