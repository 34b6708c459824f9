//! Prioritized improvement recommendations from scoring deficits

use crate::analysis::analyzer::KeywordAnalysis;
use crate::analysis::scorer::{ContentReport, FormattingReport, MIN_RESUME_WORDS};
use serde::{Deserialize, Serialize};

/// Recommendations are capped at ten entries per analysis
pub const MAX_RECOMMENDATIONS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Formatting,
    Keywords,
    Content,
    Readability,
    JobMatch,
    Skills,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub priority: PriorityLevel,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub action_items: Vec<String>,
}

/// Evaluate the fixed recommendation rules in order. The rule order is
/// already priority-descending, so truncating to the cap keeps the most
/// important items.
pub fn generate_recommendations(
    formatting: &FormattingReport,
    keyword_analysis: &KeywordAnalysis,
    content: &ContentReport,
    readability_score: u8,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    structure_rule(formatting, &mut recommendations);
    keyword_rule(keyword_analysis, &mut recommendations);
    job_match_rule(keyword_analysis, &mut recommendations);
    content_length_rule(content, &mut recommendations);
    readability_rule(readability_score, &mut recommendations);
    action_verb_rule(content, &mut recommendations);

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

/// Formatting below 80: one high-priority item per outstanding issue, up to 3
fn structure_rule(formatting: &FormattingReport, recommendations: &mut Vec<Recommendation>) {
    if formatting.score >= 80 {
        return;
    }

    for issue in formatting.issues.iter().take(3) {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Formatting,
            priority: PriorityLevel::High,
            title: "Fix Resume Structure".to_string(),
            description: issue.clone(),
            impact: "Improves ATS parsing accuracy".to_string(),
            action_items: vec![format!("Address: {}", issue)],
        });
    }
}

/// Keyword score below 70: one high-priority optimization item
fn keyword_rule(keyword_analysis: &KeywordAnalysis, recommendations: &mut Vec<Recommendation>) {
    if keyword_analysis.score >= 70 {
        return;
    }

    recommendations.push(Recommendation {
        category: RecommendationCategory::Keywords,
        priority: PriorityLevel::High,
        title: "Improve Keyword Optimization".to_string(),
        description: "Your resume lacks relevant keywords for ATS systems".to_string(),
        impact: "Increases chances of passing initial ATS screening".to_string(),
        action_items: vec![
            "Add industry-specific keywords naturally throughout your resume".to_string(),
            "Include skill keywords in your experience descriptions".to_string(),
            "Optimize your professional summary with relevant terms".to_string(),
        ],
    });
}

/// Job match below 60%: one medium-priority item naming the top gaps
fn job_match_rule(keyword_analysis: &KeywordAnalysis, recommendations: &mut Vec<Recommendation>) {
    let match_percentage = match keyword_analysis.job_match_percentage {
        Some(value) if value < 60.0 => value,
        _ => return,
    };

    let top_missing: Vec<String> = keyword_analysis
        .missing_keywords
        .iter()
        .take(5)
        .cloned()
        .collect();

    recommendations.push(Recommendation {
        category: RecommendationCategory::JobMatch,
        priority: PriorityLevel::Medium,
        title: "Improve Job Description Alignment".to_string(),
        description: format!("Only {:.1}% match with job requirements", match_percentage),
        impact: "Better alignment with specific job requirements".to_string(),
        action_items: vec![
            format!("Add these missing keywords: {}", top_missing.join(", ")),
            "Tailor your experience descriptions to match job requirements".to_string(),
            "Include relevant skills mentioned in the job posting".to_string(),
        ],
    });
}

/// Word count under the minimum: one medium-priority expansion item
fn content_length_rule(content: &ContentReport, recommendations: &mut Vec<Recommendation>) {
    if content.word_count >= MIN_RESUME_WORDS {
        return;
    }

    recommendations.push(Recommendation {
        category: RecommendationCategory::Content,
        priority: PriorityLevel::Medium,
        title: "Expand Resume Content".to_string(),
        description: "Resume is too brief and may lack sufficient detail".to_string(),
        impact: "Provides more context for ATS keyword matching".to_string(),
        action_items: vec![
            "Add more specific responsibilities and achievements".to_string(),
            "Include quantifiable results and metrics".to_string(),
            "Expand on technical skills and tools used".to_string(),
        ],
    });
}

/// Readability below 70: one low-priority clarity item
fn readability_rule(readability_score: u8, recommendations: &mut Vec<Recommendation>) {
    if readability_score >= 70 {
        return;
    }

    recommendations.push(Recommendation {
        category: RecommendationCategory::Readability,
        priority: PriorityLevel::Low,
        title: "Improve Resume Clarity".to_string(),
        description: "Resume could be clearer and more readable".to_string(),
        impact: "Better human reviewer experience after ATS screening".to_string(),
        action_items: vec![
            "Use shorter, clearer sentences".to_string(),
            "Organize information in logical sections".to_string(),
            "Use consistent formatting throughout".to_string(),
        ],
    });
}

/// Fewer than five distinct strong verbs: one low-priority wording item
fn action_verb_rule(content: &ContentReport, recommendations: &mut Vec<Recommendation>) {
    if content.action_verbs_used.len() >= 5 {
        return;
    }

    recommendations.push(Recommendation {
        category: RecommendationCategory::Content,
        priority: PriorityLevel::Low,
        title: "Use Stronger Action Verbs".to_string(),
        description: "Limited use of powerful action verbs in experience descriptions".to_string(),
        impact: "Makes achievements more impactful and ATS-friendly".to_string(),
        action_items: vec![
            "Start bullet points with strong action verbs".to_string(),
            "Use verbs like 'achieved', 'implemented', 'developed', 'led'".to_string(),
            "Avoid passive voice and weak language".to_string(),
        ],
    });
}
