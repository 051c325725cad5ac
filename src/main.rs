//! schedule-rules CLI - check a term's sections against its scheduling rules

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use schedule_rules::config::{validate, SchedulingRulesConfig};
use schedule_rules::conflicts::detect_section_time_conflicts;
use schedule_rules::evaluator::RulesEvaluator;
use schedule_rules::models::{Section, StudentSchedule};
use schedule_rules::validation::validate_sections;

#[derive(Parser)]
#[command(name = "schedule-rules")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate sections against a rules configuration
    Evaluate {
        /// JSON file with an array of sections
        #[arg(short, long)]
        sections: PathBuf,

        /// JSON rules configuration (defaults when omitted)
        #[arg(short, long, env = "SCHEDULE_RULES_CONFIG")]
        config: Option<PathBuf>,

        /// JSON file with per-student enrollments
        #[arg(long)]
        students: Option<PathBuf>,
    },

    /// Validate a rules configuration file
    ValidateConfig {
        /// JSON rules configuration
        path: PathBuf,
    },

    /// List room/faculty conflicts for one section
    Conflicts {
        /// JSON file with an array of sections
        #[arg(short, long)]
        sections: PathBuf,

        /// Section ID to check
        #[arg(long = "section")]
        section_id: String,
    },

    /// Print the default rules configuration
    Defaults {
        /// Term code to stamp on the configuration
        #[arg(long, default_value = "")]
        term: String,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Evaluate {
            sections,
            config,
            students,
        } => evaluate(&sections, config.as_deref(), students.as_deref()),
        Commands::ValidateConfig { path } => validate_config(&path),
        Commands::Conflicts {
            sections,
            section_id,
        } => conflicts(&sections, &section_id),
        Commands::Defaults { term } => {
            print_json(&SchedulingRulesConfig::default_for_term(term))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn evaluate(sections: &Path, config: Option<&Path>, students: Option<&Path>) -> Result<ExitCode> {
    let sections = load_sections(sections)?;

    let config = match config {
        Some(path) => SchedulingRulesConfig::from_json_file(path)
            .with_context(|| format!("Failed to load rules configuration {}", path.display()))?,
        None => {
            debug!("no configuration given, using defaults");
            SchedulingRulesConfig::default_for_term("")
        }
    };

    let students: Vec<StudentSchedule> = match students {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let result = RulesEvaluator::standard().evaluate_with_students_at(
        &sections,
        &config,
        &students,
        chrono::Utc::now(),
    );
    print_json(&result.report())?;
    Ok(ExitCode::SUCCESS)
}

fn validate_config(path: &Path) -> Result<ExitCode> {
    let config = SchedulingRulesConfig::from_json_file(path)
        .with_context(|| format!("Failed to load rules configuration {}", path.display()))?;

    let check = validate(&config);
    for err in &check.errors {
        warn!("{err}");
    }
    print_json(&check)?;

    Ok(if check.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn conflicts(sections: &Path, section_id: &str) -> Result<ExitCode> {
    let sections = load_sections(sections)?;
    if !sections.iter().any(|s| s.id == section_id) {
        bail!("Section '{section_id}' not found");
    }
    print_json(&detect_section_time_conflicts(section_id, &sections))?;
    Ok(ExitCode::SUCCESS)
}

fn load_sections(path: &Path) -> Result<Vec<Section>> {
    let sections: Vec<Section> = read_json(path)?;
    if let Err(errors) = validate_sections(&sections) {
        for e in &errors {
            warn!("{}", e.message);
        }
        bail!("{} invalid section record(s) in {}", errors.len(), path.display());
    }
    debug!(count = sections.len(), "loaded sections");
    Ok(sections)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
