//! ATS insight: resume compatibility analysis and scoring tool

mod analysis;
mod cli;
mod config;
mod error;
mod history;
mod input;
mod output;
mod resume;

use analysis::analyzer::AtsEngine;
use analysis::benchmarks;
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::Config;
use error::{AtsInsightError, Result};
use history::HistoryStore;
use log::{error, info};
use output::ReportGenerator;
use std::process;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config) {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            industry,
            document_id,
            output,
            save,
            detailed,
            no_history,
        } => {
            info!("Starting resume analysis");

            cli::validate_file_extension(&resume, &["json"])
                .map_err(|e| AtsInsightError::InvalidInput(format!("Resume file: {}", e)))?;
            if let Some(job_path) = &job {
                cli::validate_file_extension(job_path, &["txt", "md"])
                    .map_err(|e| AtsInsightError::InvalidInput(format!("Job description file: {}", e)))?;
            }

            let output_format = cli::parse_output_format(&output).map_err(AtsInsightError::InvalidInput)?;

            println!("📄 Resume: {}", resume.display());
            if let Some(job_path) = &job {
                println!("💼 Job Description: {}", job_path.display());
            }
            if let Some(industry_name) = &industry {
                println!("🏭 Target Industry: {}", industry_name);
            }
            println!();

            let resume_doc = input::read_resume(&resume)?;
            let job_text = job.as_deref().map(input::read_job_description).transpose()?;

            let engine = AtsEngine::with_config(&config)?;
            let result = engine.analyze(&resume_doc, job_text.as_deref(), industry.as_deref())?;

            let generator = ReportGenerator::new(config.output.color_output, detailed);
            let formatted = generator.format(&result, &output_format)?;

            if let Some(save_path) = save {
                std::fs::write(&save_path, &formatted)?;
                println!("💾 Report saved to {}", save_path.display());
            } else {
                println!("{}", formatted);
            }

            if !no_history {
                let doc_id = document_id.unwrap_or_else(|| {
                    resume
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().to_string())
                        .unwrap_or_else(|| "resume".to_string())
                });

                let mut store = HistoryStore::open(&config.history.store_path)?;
                store.record_score(&doc_id, result.overall_score, Utc::now())?;

                let doc_history = store.get_history(&doc_id, 10);
                println!(
                    "📈 Score recorded for '{}' ({} analyses, trend: {})",
                    doc_id, doc_history.total_analyses, doc_history.trend
                );
            }
        }

        Commands::Suggest {
            resume,
            job,
            industry,
            max,
        } => {
            cli::validate_file_extension(&resume, &["json"])
                .map_err(|e| AtsInsightError::InvalidInput(format!("Resume file: {}", e)))?;

            let resume_doc = input::read_resume(&resume)?;
            let job_text = job.as_deref().map(input::read_job_description).transpose()?;

            let engine = AtsEngine::with_config(&config)?;
            let suggestions =
                engine.generate_suggestions(&resume_doc, job_text.as_deref(), industry.as_deref(), max)?;

            if suggestions.is_empty() {
                println!("✅ No optimization suggestions - the resume already looks solid");
                return Ok(());
            }

            println!("💡 Optimization Suggestions\n");
            for (index, suggestion) in suggestions.iter().enumerate() {
                println!("{}. [{}] {}", index + 1, suggestion.section, suggestion.improvement_reason);
                println!("   Before: {}", suggestion.current_text);
                println!("   After:  {}", suggestion.suggested_text);
                if !suggestion.keywords_added.is_empty() {
                    println!("   Keywords added: {}", suggestion.keywords_added.join(", "));
                }
                println!();
            }
        }

        Commands::Benchmarks { industry, role_level } => {
            let benchmarks =
                benchmarks::get_benchmarks(industry.as_deref(), role_level.as_deref());

            if benchmarks.is_empty() {
                println!("No benchmarks match the given filters");
                return Ok(());
            }

            println!("📊 ATS Benchmarks\n");
            for benchmark in benchmarks {
                println!(
                    "• {} / {} - average score {}",
                    benchmark.industry, benchmark.role_level, benchmark.average_ats_score
                );
                println!("  Top keywords: {}", benchmark.top_keywords.join(", "));
                println!("  Recommended sections: {}", benchmark.recommended_sections.join(", "));
                println!(
                    "  Optimal length: {}-{} words\n",
                    benchmark.optimal_length_words.min, benchmark.optimal_length_words.max
                );
            }
        }

        Commands::History { document_id, limit } => {
            let store = HistoryStore::open(&config.history.store_path)?;
            let doc_history = store.get_history(&document_id, limit);

            if doc_history.entries.is_empty() {
                println!("No score history for '{}'", document_id);
                return Ok(());
            }

            println!("📈 Score History for '{}'\n", document_id);
            for entry in &doc_history.entries {
                println!("  {}  {}", entry.timestamp.format("%Y-%m-%d %H:%M"), entry.score);
            }
            println!();
            println!(
                "Trend: {} | Best: {} | Worst: {} | Average: {:.1}",
                doc_history.trend,
                doc_history.best_score,
                doc_history.worst_score,
                doc_history.average_score
            );
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("History store: {}", config.history.store_path.display());
                println!("\nScoring Weights:");
                println!("  Formatting:  {:.0}%", config.scoring.formatting * 100.0);
                println!("  Keywords:    {:.0}%", config.scoring.keyword * 100.0);
                println!("  Content:     {:.0}%", config.scoring.content * 100.0);
                println!("  Readability: {:.0}%", config.scoring.readability * 100.0);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                let default_config = Config::default();
                default_config.save()?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}
