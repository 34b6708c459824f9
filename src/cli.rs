//! CLI interface for the ATS insight tool

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ats-insight")]
#[command(about = "ATS compatibility analysis and scoring for structured resumes")]
#[command(long_about = "Score a structured resume against ATS heuristics, a job description, \
and industry keyword dictionaries; track score trends over time")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume for ATS compatibility
    Analyze {
        /// Path to the resume JSON file
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to a job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Target industry (e.g. technology, healthcare, finance)
        #[arg(short, long)]
        industry: Option<String>,

        /// Document id used for score history; defaults to the resume file stem
        #[arg(long)]
        document_id: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,

        /// Skip recording the score in the history store
        #[arg(long)]
        no_history: bool,
    },

    /// Generate text-level optimization suggestions
    Suggest {
        /// Path to the resume JSON file
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to a job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Target industry
        #[arg(short, long)]
        industry: Option<String>,

        /// Maximum suggestions to produce (1-20)
        #[arg(short, long, default_value_t = 10)]
        max: usize,
    },

    /// Show curated ATS benchmarks
    Benchmarks {
        /// Filter by industry
        #[arg(short, long)]
        industry: Option<String>,

        /// Filter by role level (entry, mid, senior)
        #[arg(short, long)]
        role_level: Option<String>,
    },

    /// Show the score history for a document
    History {
        /// Document id (usually the resume file stem)
        document_id: String,

        /// Number of recent entries to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
