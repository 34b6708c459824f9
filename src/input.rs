//! Loading resumes and job descriptions from disk

use crate::error::{AtsInsightError, Result};
use crate::resume::ResumeDocument;
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;

/// Read a structured resume from a JSON file
pub fn read_resume(path: &Path) -> Result<ResumeDocument> {
    let content = std::fs::read_to_string(path)?;
    let resume: ResumeDocument = serde_json::from_str(&content).map_err(|e| {
        AtsInsightError::InvalidInput(format!("Malformed resume {}: {}", path.display(), e))
    })?;
    Ok(resume)
}

/// Read a job description from a plain-text or markdown file
pub fn read_job_description(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("txt") => Ok(std::fs::read_to_string(path)?),
        Some("md") => {
            let markdown = std::fs::read_to_string(path)?;
            Ok(markdown_to_text(&markdown))
        }
        _ => Err(AtsInsightError::UnsupportedFormat(format!(
            "Job description must be .txt or .md: {}",
            path.display()
        ))),
    }
}

/// Flatten markdown to plain text, dropping formatting but keeping line
/// structure between blocks
fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(content) | Event::Code(content) => text.push_str(&content),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(
                Tag::Paragraph
                | Tag::Heading(..)
                | Tag::Item
                | Tag::CodeBlock(_)
                | Tag::BlockQuote
                | Tag::TableRow,
            ) => {
                if !text.ends_with('\n') && !text.is_empty() {
                    text.push('\n');
                }
            }
            _ => {}
        }
    }

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_markdown_to_text_strips_formatting() {
        let markdown = "# Senior Engineer\n\nWe need **python** and `docker` experience.\n\n- Kubernetes\n- Terraform";
        let text = markdown_to_text(markdown);

        assert!(text.contains("Senior Engineer"));
        assert!(text.contains("python"));
        assert!(text.contains("docker"));
        assert!(text.contains("Kubernetes"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn test_read_job_description_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.pdf");
        std::fs::File::create(&path).unwrap();

        let result = read_job_description(&path);
        assert!(matches!(result, Err(AtsInsightError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_read_resume_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"personal_info": {{"first_name": "Ada", "last_name": "Lovelace"}}}}"#
        )
        .unwrap();

        let resume = read_resume(&path).unwrap();
        assert_eq!(resume.personal_info.first_name, "Ada");
    }

    #[test]
    fn test_read_resume_malformed_json_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = read_resume(&path);
        assert!(matches!(result, Err(AtsInsightError::InvalidInput(_))));
    }
}
