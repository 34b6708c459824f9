//! Template-based text optimization suggestions with before/after examples
//!
//! A secondary, less rigorous companion to the scoring engine: it proposes
//! concrete edits (rewritten summaries, stronger bullet openers, skill
//! additions, near-miss spelling fixes) ranked by estimated impact.

use crate::analysis::keywords::KeywordMatcher;
use crate::error::{AtsInsightError, Result};
use crate::resume::ResumeDocument;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strsim::jaro_winkler;

pub const MAX_SUGGESTION_LIMIT: usize = 20;

/// Resume phrasings that undercut a bullet before it starts
const WEAK_STARTERS: [&str; 5] = [
    "responsible for",
    "duties included",
    "worked on",
    "helped with",
    "assisted in",
];

const STRONG_STARTERS: [&str; 15] = [
    "Led", "Developed", "Implemented", "Achieved", "Improved",
    "Optimized", "Streamlined", "Delivered", "Managed", "Created",
    "Increased", "Reduced", "Enhanced", "Established", "Coordinated",
];

/// Similarity floor for flagging a token as a misspelled job requirement
const NEAR_MISS_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationSuggestion {
    pub section: String,
    pub current_text: String,
    pub suggested_text: String,
    pub improvement_reason: String,
    pub keywords_added: Vec<String>,
}

/// Generate up to `max_suggestions` optimization suggestions, ranked by
/// impact. `max_suggestions` must be between 1 and 20.
pub fn generate_suggestions(
    matcher: &KeywordMatcher,
    resume: &ResumeDocument,
    job_description: Option<&str>,
    target_industry: Option<&str>,
    max_suggestions: usize,
) -> Result<Vec<OptimizationSuggestion>> {
    if !(1..=MAX_SUGGESTION_LIMIT).contains(&max_suggestions) {
        return Err(AtsInsightError::InvalidInput(format!(
            "max_suggestions must be between 1 and {}",
            MAX_SUGGESTION_LIMIT
        )));
    }

    let mut suggestions = Vec::new();
    suggestions.extend(summary_suggestions(matcher, resume, job_description));
    suggestions.extend(experience_suggestions(resume));
    suggestions.extend(skills_suggestions(matcher, resume, target_industry));
    suggestions.extend(keyword_integration_suggestions(matcher, resume, job_description));
    suggestions.extend(formatting_suggestions(resume));
    suggestions.extend(near_miss_suggestions(matcher, resume, job_description));

    suggestions.sort_by_key(|suggestion| std::cmp::Reverse(suggestion_impact(suggestion)));
    suggestions.truncate(max_suggestions);
    Ok(suggestions)
}

/// Estimated impact: contact fixes and summaries first, then experience
/// and skills, boosted by keyword additions and anything fixing a gap
fn suggestion_impact(suggestion: &OptimizationSuggestion) -> i32 {
    let base = match suggestion.section.as_str() {
        "personal_info" => 90,
        "professional_summary" => 85,
        "work_experience" => 75,
        "skills" => 70,
        "education" => 60,
        _ => 50,
    };

    let mut impact = base + suggestion.keywords_added.len() as i32 * 5;
    if suggestion.improvement_reason.to_lowercase().contains("missing") {
        impact += 20;
    }
    impact
}

fn summary_suggestions(
    matcher: &KeywordMatcher,
    resume: &ResumeDocument,
    job_description: Option<&str>,
) -> Vec<OptimizationSuggestion> {
    let mut suggestions = Vec::new();

    let Some(summary) = resume.professional_summary.as_deref().filter(|s| !s.trim().is_empty())
    else {
        if let Some(suggestion) = synthesized_summary(resume) {
            suggestions.push(suggestion);
        }
        return suggestions;
    };

    let weak_opener = Regex::new(r"(?i)^(i am a|my name is|looking for|seeking)")
        .expect("invalid weak opener regex");
    if weak_opener.is_match(summary) {
        if let Some(job) = resume.work_experience.first() {
            let job_title = non_empty_or(&job.job_title, "Professional");
            let improved_start = format!(
                "Accomplished {} with {}+ years of experience",
                job_title,
                resume.work_experience.len()
            );
            let improved = weak_opener.replace(summary, improved_start.as_str()).to_string();

            suggestions.push(OptimizationSuggestion {
                section: "professional_summary".to_string(),
                current_text: summary.to_string(),
                suggested_text: improved,
                improvement_reason: "Starting with accomplishments and specific experience makes the summary more ATS-friendly and impactful".to_string(),
                keywords_added: vec!["accomplished".to_string(), "experience".to_string()],
            });
        }
    }

    if let Some(job_text) = job_description {
        let job_keywords = matcher.extract_keywords(job_text);
        let summary_keywords = matcher.extract_keywords(summary);
        let missing: Vec<String> = job_keywords
            .iter()
            .take(5)
            .filter(|keyword| !summary_keywords.contains(*keyword))
            .take(3)
            .cloned()
            .collect();

        if !missing.is_empty() {
            let enhanced = format!("{} Expertise includes {}.", summary.trim(), missing.join(", "));
            suggestions.push(OptimizationSuggestion {
                section: "professional_summary".to_string(),
                current_text: summary.to_string(),
                suggested_text: enhanced,
                improvement_reason: "Adding relevant keywords from the job description improves ATS matching".to_string(),
                keywords_added: missing,
            });
        }
    }

    suggestions
}

/// Build a summary from scratch out of the most recent role and top skills
fn synthesized_summary(resume: &ResumeDocument) -> Option<OptimizationSuggestion> {
    let most_recent = resume.work_experience.first()?;
    let job_title = non_empty_or(&most_recent.job_title, "Professional");
    let years = resume.work_experience.len().min(10);

    let mut top_skills: Vec<String> = Vec::new();
    for terms in resume.skills.values() {
        top_skills.extend(terms.iter().take(3).cloned());
    }
    top_skills.truncate(4);
    let skill_list = if top_skills.is_empty() {
        "key technologies".to_string()
    } else {
        top_skills.join(", ")
    };

    let suggested = format!(
        "Results-driven {} with {}+ years of experience specializing in {}. \
         Proven track record of delivering high-quality solutions and driving technical innovation.",
        job_title, years, skill_list
    );

    Some(OptimizationSuggestion {
        section: "professional_summary".to_string(),
        current_text: "[No professional summary]".to_string(),
        suggested_text: suggested,
        improvement_reason: "Adding a professional summary increases ATS keyword matching and gives reviewers a quick overview of your qualifications".to_string(),
        keywords_added: vec![
            "results-driven".to_string(),
            "experience".to_string(),
            "specializing".to_string(),
            "proven track record".to_string(),
        ],
    })
}

fn experience_suggestions(resume: &ResumeDocument) -> Vec<OptimizationSuggestion> {
    let mut suggestions = Vec::new();
    let metric_pattern = Regex::new(r"\d+[%$]?|\$\d+|increased|decreased|improved|reduced")
        .expect("invalid metric regex");

    for (job_index, job) in resume.work_experience.iter().enumerate() {
        for (resp_index, responsibility) in job.responsibilities.iter().enumerate() {
            let lowered = responsibility.to_lowercase();

            if let Some(weak) = WEAK_STARTERS.iter().find(|weak| lowered.starts_with(**weak)) {
                // Rotate through the verb list by position so repeated runs
                // produce identical suggestions
                let strong = STRONG_STARTERS[(job_index + resp_index) % STRONG_STARTERS.len()];
                let remainder = responsibility[weak.len()..].trim();
                suggestions.push(OptimizationSuggestion {
                    section: "work_experience".to_string(),
                    current_text: responsibility.clone(),
                    suggested_text: format!("{} {}", strong, remainder),
                    improvement_reason: "Strong action verbs at the start of bullet points make achievements more impactful and ATS-friendly".to_string(),
                    keywords_added: vec![strong.to_lowercase()],
                });
                continue;
            }

            if !metric_pattern.is_match(&lowered) {
                if lowered.contains("managed") {
                    suggestions.push(OptimizationSuggestion {
                        section: "work_experience".to_string(),
                        current_text: responsibility.clone(),
                        suggested_text: format!("{} (team of X people, budget of $X)", responsibility),
                        improvement_reason: "Quantifiable metrics make achievements more credible and ATS-friendly".to_string(),
                        keywords_added: vec!["managed".to_string(), "team".to_string(), "budget".to_string()],
                    });
                } else if lowered.contains("project") {
                    suggestions.push(OptimizationSuggestion {
                        section: "work_experience".to_string(),
                        current_text: responsibility.clone(),
                        suggested_text: format!("{} resulting in X% improvement", responsibility),
                        improvement_reason: "Quantifying project outcomes demonstrates measurable impact".to_string(),
                        keywords_added: vec!["improvement".to_string(), "results".to_string()],
                    });
                }
            }
        }
    }

    suggestions.truncate(3);
    suggestions
}

fn skills_suggestions(
    matcher: &KeywordMatcher,
    resume: &ResumeDocument,
    target_industry: Option<&str>,
) -> Vec<OptimizationSuggestion> {
    let mut suggestions = Vec::new();

    if !resume.has_skills() {
        suggestions.push(OptimizationSuggestion {
            section: "skills".to_string(),
            current_text: "[No skills section]".to_string(),
            suggested_text: "Add skills organized into categories such as Technical Skills, Tools & Platforms, and Core Competencies".to_string(),
            improvement_reason: "A missing skills section removes the easiest ATS keyword matches; organized categories also improve parsing".to_string(),
            keywords_added: Vec::new(),
        });
    }

    if let Some(industry) = target_industry {
        let current: BTreeSet<String> = resume.declared_skills().into_iter().collect();
        let missing: Vec<String> = matcher
            .industry_skills(industry)
            .into_iter()
            .take(10)
            .filter(|skill| !current.contains(skill))
            .take(5)
            .collect();

        if !missing.is_empty() {
            suggestions.push(OptimizationSuggestion {
                section: "skills".to_string(),
                current_text: "Current skills list".to_string(),
                suggested_text: format!("Add relevant {} skills: {}", industry, missing.join(", ")),
                improvement_reason: format!(
                    "Industry-relevant skills improve ATS matching for {} positions",
                    industry
                ),
                keywords_added: missing,
            });
        }
    }

    suggestions
}

fn keyword_integration_suggestions(
    matcher: &KeywordMatcher,
    resume: &ResumeDocument,
    job_description: Option<&str>,
) -> Vec<OptimizationSuggestion> {
    let mut suggestions = Vec::new();
    let Some(job_text) = job_description else {
        return suggestions;
    };
    let Some(summary) = resume.professional_summary.as_deref().filter(|s| !s.trim().is_empty())
    else {
        return suggestions;
    };

    let resume_keywords =
        matcher.extract_keywords(&crate::analysis::extractor::extract_text(resume));
    let summary_lower = summary.to_lowercase();

    let missing: Vec<String> = matcher
        .extract_keywords(job_text)
        .into_iter()
        .take(10)
        .filter(|keyword| !resume_keywords.contains(keyword))
        .take(3)
        .collect();

    for keyword in missing {
        if summary_lower.contains(&keyword) {
            continue;
        }
        suggestions.push(OptimizationSuggestion {
            section: "professional_summary".to_string(),
            current_text: summary.to_string(),
            suggested_text: format!("{} Experienced with {}.", summary.trim(), keyword),
            improvement_reason: "Naturally integrating job-relevant keywords improves ATS matching".to_string(),
            keywords_added: vec![keyword],
        });
    }

    suggestions.truncate(2);
    suggestions
}

fn formatting_suggestions(resume: &ResumeDocument) -> Vec<OptimizationSuggestion> {
    let mut suggestions = Vec::new();

    let date_pattern = Regex::new(r"^\d{4}-\d{2}").expect("invalid date regex");
    let inconsistent: Vec<&str> = resume
        .work_history_dates()
        .into_iter()
        .filter(|date| !date_pattern.is_match(date))
        .collect();

    if !inconsistent.is_empty() {
        suggestions.push(OptimizationSuggestion {
            section: "work_experience".to_string(),
            current_text: format!(
                "Inconsistent date formats: {}",
                inconsistent.iter().take(2).copied().collect::<Vec<_>>().join(", ")
            ),
            suggested_text: "Use consistent YYYY-MM format (e.g., 2023-01)".to_string(),
            improvement_reason: "Consistent date formatting improves ATS parsing accuracy".to_string(),
            keywords_added: Vec::new(),
        });
    }

    let missing_contact = resume.personal_info.missing_fields();
    if !missing_contact.is_empty() {
        suggestions.push(OptimizationSuggestion {
            section: "personal_info".to_string(),
            current_text: "Incomplete contact information".to_string(),
            suggested_text: format!("Add missing fields: {}", missing_contact.join(", ")),
            improvement_reason: "Complete contact information is essential for ATS systems and recruiters; missing fields block parsing".to_string(),
            keywords_added: Vec::new(),
        });
    }

    suggestions
}

/// Flag resume tokens that look like misspellings of job requirements
fn near_miss_suggestions(
    matcher: &KeywordMatcher,
    resume: &ResumeDocument,
    job_description: Option<&str>,
) -> Vec<OptimizationSuggestion> {
    let mut suggestions = Vec::new();
    let Some(job_text) = job_description else {
        return suggestions;
    };

    let resume_text = crate::analysis::extractor::extract_text(resume);
    let resume_skill_terms = matcher.extract_skills_from_text(&resume_text);

    let tokens: Vec<String> = resume_text
        .split_whitespace()
        .map(|token| {
            token
                .trim_matches(|c: char| !c.is_ascii_alphanumeric())
                .to_lowercase()
        })
        .filter(|token| token.len() >= 3)
        .collect();

    for term in matcher.extract_skills_from_text(job_text) {
        if resume_skill_terms.contains(&term) {
            continue;
        }
        let near_miss = tokens.iter().find(|token| {
            token.as_str() != term && jaro_winkler(token.as_str(), term.as_str()) >= NEAR_MISS_THRESHOLD
        });

        if let Some(token) = near_miss {
            suggestions.push(OptimizationSuggestion {
                section: "skills".to_string(),
                current_text: token.clone(),
                suggested_text: term.clone(),
                improvement_reason: format!(
                    "'{}' looks like a misspelling of the job requirement '{}'",
                    token, term
                ),
                keywords_added: vec![term.clone()],
            });
        }
    }

    suggestions.truncate(2);
    suggestions
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::{PersonalInfo, WorkExperience};
    use std::collections::BTreeMap;

    fn resume_with_bullets(bullets: &[&str]) -> ResumeDocument {
        ResumeDocument {
            work_experience: vec![WorkExperience {
                job_title: "Software Engineer".to_string(),
                company: "Acme".to_string(),
                start_date: "2020-01".to_string(),
                responsibilities: bullets.iter().map(|b| b.to_string()).collect(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_rejects_out_of_range_limits() {
        let matcher = KeywordMatcher::new().unwrap();
        let resume = resume_with_bullets(&["Led the team"]);

        assert!(generate_suggestions(&matcher, &resume, None, None, 0).is_err());
        assert!(generate_suggestions(&matcher, &resume, None, None, 21).is_err());
        assert!(generate_suggestions(&matcher, &resume, None, None, 20).is_ok());
    }

    #[test]
    fn test_weak_starter_rewrites_are_deterministic() {
        let matcher = KeywordMatcher::new().unwrap();
        let resume = resume_with_bullets(&["responsible for deployment automation"]);

        let first = generate_suggestions(&matcher, &resume, None, None, 10).unwrap();
        let second = generate_suggestions(&matcher, &resume, None, None, 10).unwrap();

        let rewrite = first
            .iter()
            .find(|s| s.current_text == "responsible for deployment automation")
            .unwrap();
        assert_eq!(rewrite.suggested_text, "Led deployment automation");
        assert_eq!(first.len(), second.len());
        assert_eq!(rewrite.suggested_text, second
            .iter()
            .find(|s| s.current_text == "responsible for deployment automation")
            .unwrap()
            .suggested_text);
    }

    #[test]
    fn test_missing_summary_is_synthesized() {
        let matcher = KeywordMatcher::new().unwrap();
        let mut resume = resume_with_bullets(&["Led migrations"]);
        let mut skills = BTreeMap::new();
        skills.insert("technical".to_string(), vec!["python".to_string(), "docker".to_string()]);
        resume.skills = skills;

        let suggestions = generate_suggestions(&matcher, &resume, None, None, 10).unwrap();
        let summary = suggestions
            .iter()
            .find(|s| s.current_text == "[No professional summary]")
            .unwrap();

        assert!(summary.suggested_text.contains("Software Engineer"));
        assert!(summary.suggested_text.contains("python"));
    }

    #[test]
    fn test_weak_opener_summary_is_rewritten() {
        let matcher = KeywordMatcher::new().unwrap();
        let mut resume = resume_with_bullets(&["Led migrations"]);
        resume.professional_summary =
            Some("I am a software engineer who enjoys infrastructure".to_string());

        let suggestions = generate_suggestions(&matcher, &resume, None, None, 10).unwrap();
        let rewrite = suggestions
            .iter()
            .find(|s| s.suggested_text.starts_with("Accomplished"))
            .unwrap();
        assert!(rewrite.suggested_text.contains("Software Engineer"));
    }

    #[test]
    fn test_near_miss_detection() {
        let matcher = KeywordMatcher::new().unwrap();
        let mut resume = resume_with_bullets(&["Built services with pyton and flask"]);
        resume.professional_summary = Some("Engineer".to_string());

        let suggestions = generate_suggestions(
            &matcher,
            &resume,
            Some("We require python and flask experience"),
            None,
            20,
        )
        .unwrap();

        let near_miss = suggestions.iter().find(|s| s.current_text == "pyton").unwrap();
        assert_eq!(near_miss.suggested_text, "python");
    }

    #[test]
    fn test_missing_contact_ranks_first() {
        let matcher = KeywordMatcher::new().unwrap();
        let mut resume = resume_with_bullets(&["Led migrations"]);
        resume.personal_info = PersonalInfo {
            first_name: "Jane".to_string(),
            ..Default::default()
        };

        let suggestions = generate_suggestions(&matcher, &resume, None, None, 10).unwrap();
        assert_eq!(suggestions[0].section, "personal_info");
        assert!(suggestions[0].suggested_text.contains("email"));
    }

    #[test]
    fn test_industry_skill_suggestions() {
        let matcher = KeywordMatcher::new().unwrap();
        let resume = resume_with_bullets(&["Led migrations"]);

        let suggestions =
            generate_suggestions(&matcher, &resume, None, Some("finance"), 20).unwrap();
        let industry = suggestions
            .iter()
            .find(|s| s.suggested_text.starts_with("Add relevant finance skills"))
            .unwrap();
        assert!(!industry.keywords_added.is_empty());
    }

    #[test]
    fn test_suggestion_limit_respected() {
        let matcher = KeywordMatcher::new().unwrap();
        let mut resume = resume_with_bullets(&[
            "responsible for builds",
            "worked on releases",
            "helped with deploys",
        ]);
        resume.professional_summary = Some("Looking for a new role".to_string());

        let suggestions = generate_suggestions(
            &matcher,
            &resume,
            Some("Needs kubernetes terraform ansible skills"),
            Some("technology"),
            3,
        )
        .unwrap();

        assert!(suggestions.len() <= 3);
    }
}
