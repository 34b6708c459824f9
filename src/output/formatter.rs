//! Analysis result formatters: console, JSON, and markdown

use crate::analysis::analyzer::AnalysisResult;
use crate::config::OutputFormat;
use crate::error::{AtsInsightError, Result};
use colored::{Color, Colorize};
use std::fmt::Write;

/// Trait for rendering an analysis result in one output format
pub trait OutputFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors and a detailed mode
pub struct ConsoleFormatter {
    pub use_colors: bool,
    pub detailed: bool,
}

/// JSON formatter for machine consumption
pub struct JsonFormatter {
    pub pretty: bool,
}

/// Markdown formatter for reports and documentation
pub struct MarkdownFormatter;

/// Coordinates the individual formatters behind a single entry point
pub struct ReportGenerator {
    console: ConsoleFormatter,
    json: JsonFormatter,
    markdown: MarkdownFormatter,
}

/// Qualitative band for a 0-100 score
fn score_level(score: u8) -> (&'static str, Color) {
    if score >= 80 {
        ("Excellent", Color::Green)
    } else if score >= 60 {
        ("Good", Color::Blue)
    } else if score >= 40 {
        ("Fair", Color::Yellow)
    } else {
        ("Needs Improvement", Color::Red)
    }
}

fn formatting_error(e: std::fmt::Error) -> AtsInsightError {
    AtsInsightError::OutputFormatting(e.to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn score_line(&self, name: &str, score: u8) -> String {
        let (label, color) = score_level(score);
        format!("  • {}: {}/100 ({})", name, score, self.paint(label, color))
    }

    fn write_report(&self, out: &mut String, result: &AnalysisResult) -> std::fmt::Result {
        let (label, color) = score_level(result.overall_score);
        writeln!(
            out,
            "📊 Overall ATS Score: {}/100 ({})",
            result.overall_score,
            self.paint(label, color)
        )?;
        writeln!(out)?;
        writeln!(out, "📈 Sub-scores:")?;
        writeln!(out, "{}", self.score_line("Formatting", result.formatting_score))?;
        writeln!(out, "{}", self.score_line("Keywords", result.keyword_score))?;
        writeln!(out, "{}", self.score_line("Content Structure", result.content_structure_score))?;
        writeln!(out, "{}", self.score_line("Readability", result.readability_score))?;

        if let Some(job_match) = result.job_match_percentage {
            writeln!(out)?;
            writeln!(out, "🎯 Job Match: {:.1}%", job_match)?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "🔤 Keywords: {} extracted ({:.1}% density)",
            result.keyword_analysis.total_keywords, result.keyword_analysis.keyword_density
        )?;

        if !result.skill_gaps.missing_skills.is_empty() {
            writeln!(
                out,
                "🧩 Skill Match: {:.1}% ({} missing)",
                result.skill_gaps.match_percentage,
                result.skill_gaps.missing_skills.len()
            )?;
        }

        if self.detailed {
            if !result.keyword_analysis.matched_keywords.is_empty() {
                writeln!(out)?;
                writeln!(out, "✅ Matched Keywords:")?;
                for keyword in result.keyword_analysis.matched_keywords.iter().take(10) {
                    writeln!(out, "  • {}", keyword)?;
                }
            }
            if !result.keyword_analysis.missing_keywords.is_empty() {
                writeln!(out)?;
                writeln!(out, "⚠️  Missing Keywords:")?;
                for keyword in &result.keyword_analysis.missing_keywords {
                    writeln!(out, "  • {}", keyword)?;
                }
            }
            if !result.skill_gaps.critical_missing.is_empty() {
                writeln!(out)?;
                writeln!(out, "🚨 Critical Skill Gaps:")?;
                for skill in &result.skill_gaps.critical_missing {
                    writeln!(out, "  • {}", skill)?;
                }
            }
            if let Some(insights) = &result.industry_insights {
                if !insights.trends.is_empty() {
                    writeln!(out)?;
                    writeln!(out, "📡 Trending in {}:", insights.industry)?;
                    for trend in &insights.trends {
                        writeln!(out, "  • {}", trend)?;
                    }
                }
            }
        }

        if !result.recommendations.is_empty() {
            writeln!(out)?;
            writeln!(out, "💡 Recommendations:")?;
            for (index, rec) in result.recommendations.iter().enumerate() {
                writeln!(out, "  {}. {} [{:?}]", index + 1, rec.title, rec.priority)?;
                writeln!(out, "     {}", rec.description)?;
                if self.detailed {
                    for item in &rec.action_items {
                        writeln!(out, "     - {}", item)?;
                    }
                }
            }
        }

        Ok(())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        let mut out = String::new();
        self.write_report(&mut out, result).map_err(formatting_error)?;
        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        let output = if self.pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    fn write_report(out: &mut String, result: &AnalysisResult) -> std::fmt::Result {
        writeln!(out, "# ATS Analysis Report")?;
        writeln!(out)?;
        writeln!(out, "Generated: {}", result.analysis_timestamp.format("%Y-%m-%d %H:%M UTC"))?;
        writeln!(out)?;
        writeln!(out, "## Scores")?;
        writeln!(out)?;
        writeln!(out, "| Facet | Score |")?;
        writeln!(out, "|-------|-------|")?;
        writeln!(out, "| **Overall** | **{}** |", result.overall_score)?;
        writeln!(out, "| Formatting | {} |", result.formatting_score)?;
        writeln!(out, "| Keywords | {} |", result.keyword_score)?;
        writeln!(out, "| Content Structure | {} |", result.content_structure_score)?;
        writeln!(out, "| Readability | {} |", result.readability_score)?;

        if let Some(job_match) = result.job_match_percentage {
            writeln!(out)?;
            writeln!(out, "Job match: {:.1}%", job_match)?;
        }

        if !result.skill_gaps.missing_skills.is_empty() {
            writeln!(out)?;
            writeln!(out, "## Skill Gaps")?;
            writeln!(out)?;
            writeln!(out, "Skill match: {:.1}%", result.skill_gaps.match_percentage)?;
            writeln!(out)?;
            for skill in &result.skill_gaps.missing_skills {
                let tier = if result.skill_gaps.critical_missing.contains(skill) {
                    "critical"
                } else if result.skill_gaps.important_missing.contains(skill) {
                    "important"
                } else {
                    "nice to have"
                };
                writeln!(out, "- {} ({})", skill, tier)?;
            }
        }

        if !result.recommendations.is_empty() {
            writeln!(out)?;
            writeln!(out, "## Recommendations")?;
            writeln!(out)?;
            for rec in &result.recommendations {
                writeln!(out, "### {} ({:?})", rec.title, rec.priority)?;
                writeln!(out)?;
                writeln!(out, "{}", rec.description)?;
                writeln!(out)?;
                for item in &rec.action_items {
                    writeln!(out, "- {}", item)?;
                }
                writeln!(out)?;
            }
        }

        Ok(())
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        let mut out = String::new();
        Self::write_report(&mut out, result).map_err(formatting_error)?;
        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console: ConsoleFormatter::new(use_colors, detailed),
            json: JsonFormatter { pretty: true },
            markdown: MarkdownFormatter,
        }
    }

    pub fn format(&self, result: &AnalysisResult, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console.format_result(result),
            OutputFormat::Json => self.json.format_result(result),
            OutputFormat::Markdown => self.markdown.format_result(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::AtsEngine;
    use crate::resume::{PersonalInfo, ResumeDocument};

    fn sample_result() -> AnalysisResult {
        let engine = AtsEngine::new().unwrap();
        let resume = ResumeDocument {
            personal_info: PersonalInfo {
                first_name: "Jane".to_string(),
                last_name: "Smith".to_string(),
                email: "jane@example.com".to_string(),
                phone: "555-000-1111".to_string(),
                ..Default::default()
            },
            professional_summary: Some("Engineer building data platforms".to_string()),
            ..Default::default()
        };
        engine
            .analyze(&resume, Some("python and sql required"), Some("technology"))
            .unwrap()
    }

    #[test]
    fn test_console_formatter_plain_output() {
        let formatter = ConsoleFormatter::new(false, true);
        let output = formatter.format_result(&sample_result()).unwrap();

        assert!(output.contains("Overall ATS Score"));
        assert!(output.contains("Formatting"));
        assert!(output.contains("Recommendations"));
    }

    #[test]
    fn test_json_formatter_round_trips() {
        let formatter = JsonFormatter { pretty: false };
        let output = formatter.format_result(&sample_result()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["overall_score"].is_u64());
        assert!(value["skill_gaps"]["match_percentage"].is_f64());
    }

    #[test]
    fn test_markdown_formatter_structure() {
        let output = MarkdownFormatter.format_result(&sample_result()).unwrap();

        assert!(output.starts_with("# ATS Analysis Report"));
        assert!(output.contains("| **Overall** |"));
        assert!(output.contains("## Recommendations"));
    }

    #[test]
    fn test_report_generator_dispatch() {
        let generator = ReportGenerator::new(false, false);
        let result = sample_result();

        assert!(generator.format(&result, &OutputFormat::Console).is_ok());
        assert!(generator.format(&result, &OutputFormat::Json).is_ok());
        assert!(generator.format(&result, &OutputFormat::Markdown).is_ok());
    }
}
