use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use futures::stream::{self, StreamExt};
use log::info;
use serde::Serialize;
use tokio::io::AsyncReadExt;

use frailty_risk::utils::{
    create_batch_progress_bar, describe_source, finish_progress_bar, log_operation_complete,
    log_operation_start, log_warning,
};
use frailty_risk::{
    ExternalPredictor, FrailtyAssessor, PatientClinicalProfile, PredictorConfig, RiskAssessment,
    RuleBasedEngine, ScoreBreakdown, ScoringAlgorithm,
};

/// Batches smaller than this are scored without a progress bar
const PROGRESS_THRESHOLD: u64 = 16;

#[derive(Parser)]
#[command(name = "frailty-risk")]
#[command(version)]
#[command(about = "Frailty risk assessment for elderly patients", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Predictor configuration file (JSON); FRAILTY_* variables apply otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score patient profiles read from JSON files
    Score {
        /// Files holding a profile object or an array of profiles, '-' for stdin
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Skip the external predictor and use the rule-based engine only
        #[arg(long)]
        rules_only: bool,

        /// Force a rule-based scorer: clinical or lifestyle
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Include the factor-by-factor rule-based breakdown
        #[arg(long)]
        explain: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Check that the external predictor's model artifacts are installed
    Check,
}

/// One scored profile in the command output
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoredProfile {
    source: String,
    index: usize,
    assessment: RiskAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<ScoreBreakdown>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Score {
            inputs,
            rules_only,
            algorithm,
            explain,
            pretty,
        } => {
            let engine = match algorithm {
                Some(name) => RuleBasedEngine::with_algorithm(name.parse::<ScoringAlgorithm>()?),
                None => RuleBasedEngine::new(),
            };
            let assessor = if rules_only {
                FrailtyAssessor::rules_only()
            } else {
                FrailtyAssessor::from_config(&config)
            };
            let assessor = assessor.with_engine(engine);

            let scored = score_inputs(&assessor, &inputs, explain).await?;
            let output = if pretty {
                serde_json::to_string_pretty(&scored)?
            } else {
                serde_json::to_string(&scored)?
            };
            println!("{output}");
        }
        Commands::Check => {
            let model_dir = config.resolved_model_dir();
            ExternalPredictor::new(config)
                .check_artifacts()
                .context("External predictor is not installed")?;
            info!("Model artifacts present in {}", model_dir.display());
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<PredictorConfig> {
    match path {
        Some(path) => PredictorConfig::from_file(path)
            .with_context(|| format!("Failed to load predictor config {}", path.display())),
        None => PredictorConfig::from_env().context("Invalid FRAILTY_* environment settings"),
    }
}

async fn read_input(input: &str) -> Result<(String, Vec<PatientClinicalProfile>)> {
    let source = if input == "-" {
        None
    } else {
        Some(Path::new(input))
    };
    log_operation_start("Reading profiles from", source);

    let content = match source {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read standard input")?;
            buf
        }
    };

    let name = describe_source(source);
    let value: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("{name} is not valid JSON"))?;
    let profiles: Vec<PatientClinicalProfile> = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value::<PatientClinicalProfile>(value).map(|p| vec![p])
    }
    .with_context(|| format!("{name} does not hold patient profiles"))?;

    if profiles.is_empty() {
        log_warning("No profiles found", source);
    }
    Ok((name, profiles))
}

async fn score_inputs(
    assessor: &FrailtyAssessor,
    inputs: &[String],
    explain: bool,
) -> Result<Vec<ScoredProfile>> {
    let start = Instant::now();

    let mut jobs = Vec::new();
    for input in inputs {
        let (source, profiles) = read_input(input).await?;
        jobs.extend(
            profiles
                .into_iter()
                .enumerate()
                .map(|(index, profile)| (source.clone(), index, profile)),
        );
    }

    let pb = create_batch_progress_bar(jobs.len() as u64, PROGRESS_THRESHOLD);
    let scored: Vec<ScoredProfile> = stream::iter(jobs)
        .map(|(source, index, profile)| {
            let pb = pb.clone();
            async move {
                let assessment = assessor.obtain_risk_assessment(&profile).await;
                let breakdown = explain.then(|| assessor.engine().breakdown(&profile));
                pb.inc(1);
                ScoredProfile {
                    source,
                    index,
                    assessment,
                    breakdown,
                }
            }
        })
        .buffered(num_cpus::get())
        .collect()
        .await;
    finish_progress_bar(&pb, Some("done"));

    let fallbacks = scored.iter().filter(|s| s.assessment.is_fallback).count();
    if scored.is_empty() {
        bail!("No profiles to score");
    }
    log_operation_complete("scored", scored.len(), fallbacks, Some(start.elapsed()));

    Ok(scored)
}
