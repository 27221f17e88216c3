//! moral-agreement CLI: agreement and cross-corpus statistics for a study file.
//!
//! Usage:
//!   moral-agreement agreement <study.yaml> [--corpus name] [--units] [--json]
//!   moral-agreement compare <study.yaml> [--top k] [--json]

use clap::{Parser, Subcommand};
use moral_agreement::report::{render_cross_corpus, render_study, RenderOptions};
use moral_agreement::{run_agreement, CrossCorpusReport, StudyConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "moral-agreement",
    version,
    about = "Agreement statistics for moral-foundation annotations"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Log per-statistic detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Human baseline and method agreement per corpus, plus equivalence codings
    Agreement {
        /// Path to the study file
        study: PathBuf,
        /// Only this corpus
        #[arg(long)]
        corpus: Option<String>,
        /// Print the per-unit label table
        #[arg(long)]
        units: bool,
    },
    /// Spearman and Jensen-Shannon comparison of the study's score vectors
    Compare {
        /// Path to the study file
        study: PathBuf,
        /// Category differences listed per pair
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

fn load_study(path: &Path) -> Result<StudyConfig, String> {
    StudyConfig::load(path).map_err(|e| format!("cannot load '{}': {}", path.display(), e))
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_agreement(study: &Path, corpus: Option<&str>, units: bool, json: bool) -> i32 {
    let config = match load_study(study) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if config.corpora.is_empty() && config.codings.is_empty() {
        eprintln!("Error: study defines no corpora or codings");
        return 1;
    }

    let report = match run_agreement(&config, corpus) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if json {
        return print_json(&report);
    }

    let options = RenderOptions {
        units,
        ..Default::default()
    };
    print!("{}", render_study(&report, options));
    0
}

fn cmd_compare(study: &Path, top: usize, json: bool) -> i32 {
    let config = match load_study(study) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if config.distributions.len() < 2 {
        eprintln!("Error: compare needs at least two score vectors under 'distributions'");
        return 1;
    }

    let report = match CrossCorpusReport::compute(&config.distributions) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if json {
        return print_json(&report);
    }

    let options = RenderOptions {
        top_differences: top,
        ..Default::default()
    };
    print!("{}", render_cross_corpus(&report, options));
    0
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let code = match cli.command {
        Commands::Agreement { study, corpus, units } => {
            cmd_agreement(&study, corpus.as_deref(), units, cli.json)
        }
        Commands::Compare { study, top } => cmd_compare(&study, top, cli.json),
    };
    std::process::exit(code);
}
