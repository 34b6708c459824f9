//! Multi-factor resume scoring
//!
//! Each penalty or bonus lives in its own named rule function so the rules
//! stay independently testable and tunable. Every rule degrades gracefully:
//! sparse or partial resumes always produce a complete, lower score.

use crate::config::ScoringWeights;
use crate::resume::ResumeDocument;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Strong action verbs expected at the start of responsibility bullets
const ACTION_VERBS: [&str; 18] = [
    "achieved", "administered", "analyzed", "built", "created", "developed",
    "implemented", "improved", "increased", "led", "managed", "organized",
    "reduced", "streamlined", "supervised", "designed", "executed", "delivered",
];

pub const MIN_RESUME_WORDS: usize = 200;
pub const OPTIMAL_RESUME_WORDS: usize = 600;
pub const MAX_RESUME_WORDS: usize = 1000;

/// Formatting analysis with the concrete issues behind the deductions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattingReport {
    pub score: u8,
    pub issues: Vec<String>,
    pub fixes: Vec<String>,
}

/// Content-structure analysis with supporting detail for recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentReport {
    pub score: u8,
    pub word_count: usize,
    pub issues: Vec<String>,
    pub fixes: Vec<String>,
    pub action_verbs_used: Vec<String>,
}

/// Score resume structure for ATS parseability. Starts at 100 and deducts
/// per issue, floored at zero.
pub fn score_formatting(resume: &ResumeDocument) -> FormattingReport {
    let mut score: i32 = 100;
    let mut issues = Vec::new();
    let mut fixes = Vec::new();

    score -= missing_section_penalty(resume, &mut issues);
    score -= missing_contact_penalty(resume, &mut issues);
    score -= missing_summary_penalty(resume, &mut issues, &mut fixes);
    score -= incomplete_job_penalty(resume, &mut issues);
    score -= inconsistent_date_penalty(resume, &mut issues, &mut fixes);

    FormattingReport {
        score: score.clamp(0, 100) as u8,
        issues,
        fixes,
    }
}

/// 15 points per missing required top-level section
fn missing_section_penalty(resume: &ResumeDocument, issues: &mut Vec<String>) -> i32 {
    let sections: [(&str, bool); 4] = [
        ("Personal Info", !resume.personal_info.is_empty()),
        ("Work Experience", !resume.work_experience.is_empty()),
        ("Education", !resume.education.is_empty()),
        ("Skills", resume.has_skills()),
    ];

    let mut penalty = 0;
    for (name, present) in sections {
        if !present {
            penalty += 15;
            issues.push(format!("Missing {} section", name));
        }
    }
    penalty
}

/// 5 points per missing required contact field
fn missing_contact_penalty(resume: &ResumeDocument, issues: &mut Vec<String>) -> i32 {
    let missing = resume.personal_info.missing_fields();
    for field in &missing {
        issues.push(format!("Missing {}", field));
    }
    missing.len() as i32 * 5
}

/// 10 points when there is no professional summary
fn missing_summary_penalty(
    resume: &ResumeDocument,
    issues: &mut Vec<String>,
    fixes: &mut Vec<String>,
) -> i32 {
    if resume.has_summary() {
        return 0;
    }
    issues.push("Missing professional summary".to_string());
    fixes.push("Add a professional summary to highlight your key qualifications".to_string());
    10
}

/// 5 points per missing job title, company, or responsibilities list
fn incomplete_job_penalty(resume: &ResumeDocument, issues: &mut Vec<String>) -> i32 {
    let mut penalty = 0;
    for (index, job) in resume.work_experience.iter().enumerate() {
        if job.job_title.trim().is_empty() {
            penalty += 5;
            issues.push(format!("Work experience {}: missing job title", index + 1));
        }
        if job.company.trim().is_empty() {
            penalty += 5;
            issues.push(format!("Work experience {}: missing company name", index + 1));
        }
        if job.responsibilities.is_empty() {
            penalty += 5;
            issues.push(format!("Work experience {}: missing responsibilities", index + 1));
        }
    }
    penalty
}

/// 5 points when work-history date strings do not share one format
fn inconsistent_date_penalty(
    resume: &ResumeDocument,
    issues: &mut Vec<String>,
    fixes: &mut Vec<String>,
) -> i32 {
    let dates = resume.work_history_dates();
    if dates.is_empty() {
        return 0;
    }

    let lengths: HashSet<usize> = dates.iter().map(|date| date.len()).collect();
    if lengths.len() <= 1 {
        return 0;
    }

    issues.push("Inconsistent date formatting".to_string());
    fixes.push("Use a consistent date format (YYYY-MM) throughout the resume".to_string());
    5
}

/// Score keyword coverage and density, clamped to [0, 100]
pub fn score_keywords(
    resume_keywords: &BTreeSet<String>,
    job_keywords: &BTreeSet<String>,
    industry_keywords: &BTreeSet<String>,
    word_count: usize,
) -> u8 {
    let mut score: i32 = 0;

    score += base_keyword_points(resume_keywords.len());
    score += overlap_points(resume_keywords, job_keywords, 30.0);
    score += overlap_points(resume_keywords, industry_keywords, 20.0);
    score += density_adjustment(resume_keywords.len(), word_count);

    score.clamp(0, 100) as u8
}

/// 2 points per extracted keyword, up to 50
fn base_keyword_points(keyword_count: usize) -> i32 {
    (keyword_count as i32 * 2).min(50)
}

/// Up to `max_points`, scaled by the share of target keywords present
fn overlap_points(resume_keywords: &BTreeSet<String>, target: &BTreeSet<String>, max_points: f64) -> i32 {
    if target.is_empty() {
        return 0;
    }
    let matched = resume_keywords.intersection(target).count();
    (matched as f64 / target.len() as f64 * max_points) as i32
}

/// +10 in the optimal density band, -10 for keyword stuffing
fn density_adjustment(keyword_count: usize, word_count: usize) -> i32 {
    if word_count == 0 {
        return 0;
    }
    let density = keyword_count as f64 / word_count as f64 * 100.0;
    if (2.0..=8.0).contains(&density) {
        10
    } else if density > 15.0 {
        -10
    } else {
        0
    }
}

/// Score content depth and organization. Starts at 100, floored at zero.
pub fn score_content_structure(resume: &ResumeDocument, word_count: usize) -> ContentReport {
    let mut score: i32 = 100;
    let mut issues = Vec::new();
    let mut fixes = Vec::new();

    score -= word_count_penalty(word_count, &mut issues, &mut fixes);
    score -= experience_depth_penalty(resume, &mut issues, &mut fixes);
    score -= quantified_achievement_penalty(resume, &mut issues, &mut fixes);
    score -= skill_breadth_penalty(resume, &mut issues, &mut fixes);

    let action_verbs_used = count_action_verbs(resume);
    score -= action_verb_penalty(&action_verbs_used, &mut issues, &mut fixes);

    ContentReport {
        score: score.clamp(0, 100) as u8,
        word_count,
        issues,
        fixes,
        action_verbs_used,
    }
}

/// 20 points under the minimum length, 10 over the maximum
fn word_count_penalty(word_count: usize, issues: &mut Vec<String>, fixes: &mut Vec<String>) -> i32 {
    if word_count < MIN_RESUME_WORDS {
        issues.push("Resume too short - may lack sufficient detail".to_string());
        fixes.push(format!(
            "Expand resume content. Aim for {}-{} words",
            OPTIMAL_RESUME_WORDS, MAX_RESUME_WORDS
        ));
        20
    } else if word_count > MAX_RESUME_WORDS {
        issues.push("Resume too long - may be overwhelming for recruiters".to_string());
        fixes.push("Condense content to focus on the most relevant information".to_string());
        10
    } else {
        0
    }
}

/// 15 points when jobs average fewer than two responsibility bullets
fn experience_depth_penalty(
    resume: &ResumeDocument,
    issues: &mut Vec<String>,
    fixes: &mut Vec<String>,
) -> i32 {
    if resume.work_experience.is_empty() {
        return 0;
    }

    let total_responsibilities: usize = resume
        .work_experience
        .iter()
        .map(|job| job.responsibilities.len())
        .sum();
    let average = total_responsibilities as f64 / resume.work_experience.len() as f64;

    if average < 2.0 {
        issues.push("Work experience lacks detail".to_string());
        fixes.push("Add more specific responsibilities and achievements for each role".to_string());
        15
    } else {
        0
    }
}

/// 15 points when no responsibility carries a number, percentage, dollar
/// amount, or outcome verb
fn quantified_achievement_penalty(
    resume: &ResumeDocument,
    issues: &mut Vec<String>,
    fixes: &mut Vec<String>,
) -> i32 {
    if has_quantifiable_achievements(resume) {
        return 0;
    }
    issues.push("Missing quantifiable achievements".to_string());
    fixes.push("Include specific numbers, percentages, and metrics in your achievements".to_string());
    15
}

/// 10 points for fewer than 5 skills, 5 points for more than 30
fn skill_breadth_penalty(
    resume: &ResumeDocument,
    issues: &mut Vec<String>,
    fixes: &mut Vec<String>,
) -> i32 {
    let total_skills = resume.total_skill_count();
    if total_skills < 5 {
        issues.push("Limited skills listed".to_string());
        fixes.push("Add more relevant technical and soft skills".to_string());
        10
    } else if total_skills > 30 {
        issues.push("Too many skills listed".to_string());
        fixes.push("Focus on the most relevant skills for your target role".to_string());
        5
    } else {
        0
    }
}

/// 10 points when fewer than 3 distinct strong verbs open bullets
fn action_verb_penalty(
    action_verbs_used: &[String],
    issues: &mut Vec<String>,
    fixes: &mut Vec<String>,
) -> i32 {
    if action_verbs_used.len() >= 3 {
        return 0;
    }
    issues.push("Limited use of strong action verbs".to_string());
    fixes.push("Use more powerful action verbs to describe your accomplishments".to_string());
    10
}

/// Check whether any responsibility mentions a measurable outcome
pub fn has_quantifiable_achievements(resume: &ResumeDocument) -> bool {
    let pattern = Regex::new(r"\d+[%$]?|\$\d+|increased|reduced|improved|grew|saved")
        .expect("invalid achievement regex");

    resume
        .work_experience
        .iter()
        .flat_map(|job| job.responsibilities.iter())
        .any(|responsibility| pattern.is_match(&responsibility.to_lowercase()))
}

/// Distinct strong action verbs opening responsibility bullets, sorted
pub fn count_action_verbs(resume: &ResumeDocument) -> Vec<String> {
    let mut found: BTreeSet<String> = BTreeSet::new();

    for job in &resume.work_experience {
        for responsibility in &job.responsibilities {
            if let Some(first_word) = responsibility.split_whitespace().next() {
                let normalized = first_word
                    .to_lowercase()
                    .trim_end_matches(['.', ',', '!', '?', ':', ';'])
                    .to_string();
                if ACTION_VERBS.contains(&normalized.as_str()) {
                    found.insert(normalized);
                }
            }
        }
    }

    found.into_iter().collect()
}

/// Score readability from sentence and word lengths, clamped to [0, 100].
/// Optimal is around 15 words per sentence and 5 characters per word.
pub fn score_readability(text: &str) -> u8 {
    if text.trim().is_empty() {
        return 0;
    }

    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    let words: Vec<&str> = text.split_whitespace().collect();

    if sentences.is_empty() || words.is_empty() {
        return 0;
    }

    let avg_sentence_length = words.len() as f64 / sentences.len() as f64;
    let avg_word_length =
        words.iter().map(|word| word.chars().count()).sum::<usize>() as f64 / words.len() as f64;

    let sentence_score = 100.0 - (avg_sentence_length - 15.0).abs() * 2.0;
    let word_score = 100.0 - (avg_word_length - 5.0).abs() * 10.0;

    (((sentence_score + word_score) / 2.0) as i32).clamp(0, 100) as u8
}

/// Weighted overall score, truncated to an integer
pub fn overall_score(
    formatting: u8,
    keyword: u8,
    content: u8,
    readability: u8,
    weights: &ScoringWeights,
) -> u8 {
    let combined = formatting as f64 * weights.formatting
        + keyword as f64 * weights.keyword
        + content as f64 * weights.content
        + readability as f64 * weights.readability;

    (combined as i32).clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::{PersonalInfo, WorkExperience};
    use std::collections::BTreeMap;

    fn contact_only_resume() -> ResumeDocument {
        ResumeDocument {
            personal_info: PersonalInfo {
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                email: "john@example.com".to_string(),
                phone: "555-123-4567".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_formatting_complete_contact_missing_sections() {
        let report = score_formatting(&contact_only_resume());

        // Three missing sections plus the missing summary
        assert_eq!(report.score, 45);
        assert!(report.issues.iter().any(|i| i.contains("Work Experience")));
        assert!(report.issues.iter().any(|i| i.contains("Education")));
        assert!(report.issues.iter().any(|i| i.contains("Skills")));
        assert!(report.issues.iter().any(|i| i.contains("professional summary")));
    }

    #[test]
    fn test_formatting_empty_resume_floors_at_low_score() {
        let report = score_formatting(&ResumeDocument::default());

        // 4 sections, 4 contact fields, summary
        assert_eq!(report.score, 10);
    }

    #[test]
    fn test_formatting_incomplete_job_entries() {
        let mut resume = contact_only_resume();
        resume.work_experience = vec![WorkExperience {
            job_title: "Engineer".to_string(),
            ..Default::default()
        }];

        let report = score_formatting(&resume);
        assert!(report.issues.iter().any(|i| i.contains("missing company name")));
        assert!(report.issues.iter().any(|i| i.contains("missing responsibilities")));
    }

    #[test]
    fn test_formatting_inconsistent_dates() {
        let mut resume = contact_only_resume();
        resume.work_experience = vec![
            WorkExperience {
                job_title: "Engineer".to_string(),
                company: "Acme".to_string(),
                start_date: "2020-01".to_string(),
                end_date: Some("2021".to_string()),
                responsibilities: vec!["Developed tooling".to_string()],
                ..Default::default()
            },
        ];

        let report = score_formatting(&resume);
        assert!(report.issues.iter().any(|i| i.contains("Inconsistent date formatting")));
    }

    #[test]
    fn test_keyword_score_components() {
        let resume_keywords: BTreeSet<String> =
            ["python", "django", "docker"].iter().map(|s| s.to_string()).collect();
        let job_keywords: BTreeSet<String> =
            ["python", "django"].iter().map(|s| s.to_string()).collect();
        let industry_keywords = BTreeSet::new();

        // 6 base points + full job overlap (30) + no industry + density below band
        let score = score_keywords(&resume_keywords, &job_keywords, &industry_keywords, 300);
        assert_eq!(score, 36);
    }

    #[test]
    fn test_keyword_score_density_band() {
        let resume_keywords: BTreeSet<String> =
            (0..5).map(|i| format!("keyword{}", i)).collect();
        let empty = BTreeSet::new();

        // 5 keywords over 100 words is 5% density: 10 base-band bonus
        assert_eq!(score_keywords(&resume_keywords, &empty, &empty, 100), 20);
        // 5 keywords over 20 words is 25% density: stuffing penalty
        assert_eq!(score_keywords(&resume_keywords, &empty, &empty, 20), 0);
    }

    #[test]
    fn test_keyword_score_clamped() {
        let many: BTreeSet<String> = (0..60).map(|i| format!("kw{}", i)).collect();
        let score = score_keywords(&many, &many.clone(), &many.clone(), 1000);
        assert!(score <= 100);
    }

    #[test]
    fn test_content_structure_sparse_resume() {
        let report = score_content_structure(&contact_only_resume(), 2);

        // Short (-20), no quantified achievements (-15), few skills (-10),
        // few action verbs (-10); no experience-depth penalty without jobs
        assert_eq!(report.score, 45);
        assert_eq!(report.word_count, 2);
    }

    #[test]
    fn test_content_structure_rich_experience() {
        let mut skills = BTreeMap::new();
        skills.insert(
            "technical".to_string(),
            vec!["rust", "python", "docker", "kubernetes", "sql"]
                .into_iter()
                .map(String::from)
                .collect(),
        );

        let resume = ResumeDocument {
            work_experience: vec![WorkExperience {
                job_title: "Engineer".to_string(),
                company: "Acme".to_string(),
                responsibilities: vec![
                    "Increased throughput by 40%".to_string(),
                    "Led migration to Kubernetes".to_string(),
                    "Reduced costs by $200k annually".to_string(),
                ],
                ..Default::default()
            }],
            skills,
            ..Default::default()
        };

        let report = score_content_structure(&resume, 650);
        assert_eq!(report.score, 100);
        assert_eq!(report.action_verbs_used, vec!["increased", "led", "reduced"]);
    }

    #[test]
    fn test_quantifiable_achievements_detection() {
        let mut resume = ResumeDocument::default();
        resume.work_experience = vec![WorkExperience {
            responsibilities: vec!["Maintained internal tooling".to_string()],
            ..Default::default()
        }];
        assert!(!has_quantifiable_achievements(&resume));

        resume.work_experience[0]
            .responsibilities
            .push("Improved build times by 30%".to_string());
        assert!(has_quantifiable_achievements(&resume));
    }

    #[test]
    fn test_readability_empty_text() {
        assert_eq!(score_readability(""), 0);
        assert_eq!(score_readability("   "), 0);
    }

    #[test]
    fn test_readability_optimal_text() {
        // 15 words per sentence, 5 characters per word
        let sentence = "aaaaa ".repeat(15).trim().to_string();
        let text = format!("{}. {}.", sentence, sentence);
        assert_eq!(score_readability(&text), 100);
    }

    #[test]
    fn test_readability_in_range() {
        let text = "Built distributed data pipelines. Optimized query performance across services.";
        let score = score_readability(text);
        assert!(score <= 100);
    }

    #[test]
    fn test_overall_score_weighted_truncation() {
        let weights = ScoringWeights::default();
        // 0.25*80 + 0.35*70 + 0.25*60 + 0.15*90 = 73
        assert_eq!(overall_score(80, 70, 60, 90, &weights), 73);
        assert_eq!(overall_score(0, 0, 0, 0, &weights), 0);
        assert_eq!(overall_score(100, 100, 100, 100, &weights), 100);
    }
}
