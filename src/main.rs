use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use student_risk_engine::{
    config::EngineConfig,
    engine::RiskEngine,
    models::StudentProfile,
};

#[derive(Parser)]
#[command(name = "student-risk-engine", version, about = "Student risk assessment and intervention recommendation engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assess profiles and print verdicts with intervention recommendations
    Assess {
        /// JSON file containing an array of student profiles
        #[arg(long)]
        profiles: PathBuf,

        /// Fitted model blob to load; falls back to rule-only verdicts when absent
        #[arg(long)]
        model: Option<PathBuf>,
    },

    /// Train the classifier on rule-labeled profiles and persist it
    Train {
        /// JSON file containing an array of student profiles
        #[arg(long)]
        profiles: PathBuf,

        /// Where to write the fitted model blob (defaults to the configured path)
        #[arg(long)]
        model: Option<PathBuf>,
    },

    /// Run sentiment triage over a text submission
    Triage {
        /// The text to analyze
        #[arg(long)]
        text: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "student_risk_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = EngineConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Using default configuration");
        EngineConfig::default()
    });

    let cli = Cli::parse();
    let engine = RiskEngine::new(config.clone());

    match cli.command {
        Command::Assess { profiles, model } => {
            if let Some(path) = model {
                if let Err(e) = engine.load_model(&path) {
                    tracing::warn!(error = %e, "Continuing with rule-based verdicts");
                }
            }

            let profiles = read_profiles(&profiles)?;
            let mut assessments = Vec::with_capacity(profiles.len());
            for profile in &profiles {
                assessments.push(engine.evaluate(profile)?);
            }
            println!("{}", serde_json::to_string_pretty(&assessments)?);
        }
        Command::Train { profiles, model } => {
            let profiles = read_profiles(&profiles)?;
            let metadata = engine.train(&profiles)?;

            let path = model.unwrap_or(config.classifier.model_path);
            engine.save_model(&path)?;

            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
        Command::Triage { text } => {
            let verdict = engine.triage(&text)?;
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        }
    }

    Ok(())
}

fn read_profiles(path: &PathBuf) -> anyhow::Result<Vec<StudentProfile>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading profiles from {}", path.display()))?;
    let profiles: Vec<StudentProfile> =
        serde_json::from_str(&raw).context("profiles file must be a JSON array of profiles")?;
    Ok(profiles)
}
