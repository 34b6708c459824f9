//! Analysis engine coordinating extraction, matching, scoring, and gaps

use crate::analysis::extractor;
use crate::analysis::keywords::KeywordMatcher;
use crate::analysis::optimizer::{self, OptimizationSuggestion};
use crate::analysis::recommendations::{self, Recommendation};
use crate::analysis::scorer;
use crate::analysis::skill_gap::{self, SkillGapResult};
use crate::config::{Config, ScoringWeights};
use crate::error::{AtsInsightError, Result};
use crate::resume::ResumeDocument;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const MAX_JOB_DESCRIPTION_CHARS: usize = 10_000;
pub const MAX_TARGET_INDUSTRY_CHARS: usize = 100;

/// Analysis engine. Construct once and share freely: after construction it
/// only reads its dictionaries, so concurrent analyses need no coordination.
pub struct AtsEngine {
    matcher: KeywordMatcher,
    weights: ScoringWeights,
}

/// One analysis invocation: a resume plus optional targeting context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub resume: ResumeDocument,
    pub job_description: Option<String>,
    pub target_industry: Option<String>,
}

/// Keyword extraction and matching detail behind the keyword sub-score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub score: u8,
    pub total_keywords: usize,
    pub industry_keywords: Vec<String>,
    pub job_keywords: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub keyword_density: f64,
    pub job_match_percentage: Option<f64>,
}

/// Industry benchmarks and trends attached to a result when a target
/// industry is supplied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryInsights {
    pub industry: String,
    pub benchmarks: Option<InsightBenchmarks>,
    pub trends: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightBenchmarks {
    pub average_ats_score: u8,
    pub recommended_length: String,
}

/// Complete analysis result. Immutable; a pure function of its inputs apart
/// from the timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: u8,
    pub formatting_score: u8,
    pub keyword_score: u8,
    pub content_structure_score: u8,
    pub readability_score: u8,
    pub keyword_analysis: KeywordAnalysis,
    pub skill_gaps: SkillGapResult,
    pub recommendations: Vec<Recommendation>,
    pub industry_insights: Option<IndustryInsights>,
    pub formatting_issues: Vec<String>,
    pub word_count: usize,
    pub job_match_percentage: Option<f64>,
    pub analysis_timestamp: DateTime<Utc>,
}

impl AnalysisRequest {
    pub fn validate(&self) -> Result<()> {
        validate_inputs(
            self.job_description.as_deref(),
            self.target_industry.as_deref(),
        )
    }
}

impl AtsEngine {
    /// Create an engine with the default scoring weights
    pub fn new() -> Result<Self> {
        Ok(Self {
            matcher: KeywordMatcher::new()?,
            weights: ScoringWeights::default(),
        })
    }

    /// Create an engine using the weights from a loaded configuration
    pub fn with_config(config: &Config) -> Result<Self> {
        Ok(Self {
            matcher: KeywordMatcher::new()?,
            weights: config.scoring.clone(),
        })
    }

    pub fn matcher(&self) -> &KeywordMatcher {
        &self.matcher
    }

    /// Run the full ATS analysis for a resume against an optional job
    /// description and target industry
    pub fn analyze(
        &self,
        resume: &ResumeDocument,
        job_description: Option<&str>,
        target_industry: Option<&str>,
    ) -> Result<AnalysisResult> {
        validate_inputs(job_description, target_industry)?;

        info!("Starting ATS analysis");

        let resume_text = extractor::extract_text(resume);
        if resume_text.trim().is_empty() {
            return Err(AtsInsightError::EmptyContent(
                "Resume contains no extractable text".to_string(),
            ));
        }

        let word_count = resume_text.split_whitespace().count();
        debug!("Extracted {} words from resume", word_count);

        let formatting = scorer::score_formatting(resume);
        let keyword_analysis =
            self.analyze_keywords(&resume_text, word_count, job_description, target_industry);
        let content = scorer::score_content_structure(resume, word_count);
        let readability_score = scorer::score_readability(&resume_text);

        let overall_score = scorer::overall_score(
            formatting.score,
            keyword_analysis.score,
            content.score,
            readability_score,
            &self.weights,
        );

        let recommendations = recommendations::generate_recommendations(
            &formatting,
            &keyword_analysis,
            &content,
            readability_score,
        );

        let skill_gaps =
            skill_gap::analyze_skill_gaps(&self.matcher, resume, job_description, target_industry);

        let industry_insights = target_industry.map(|industry| self.industry_insights(industry, resume));

        info!("ATS analysis completed with overall score {}", overall_score);

        Ok(AnalysisResult {
            overall_score,
            formatting_score: formatting.score,
            keyword_score: keyword_analysis.score,
            content_structure_score: content.score,
            readability_score,
            job_match_percentage: keyword_analysis.job_match_percentage,
            keyword_analysis,
            skill_gaps,
            recommendations,
            industry_insights,
            formatting_issues: formatting.issues,
            word_count,
            analysis_timestamp: Utc::now(),
        })
    }

    /// Convenience entry point for a pre-assembled request
    pub fn analyze_request(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        request.validate()?;
        self.analyze(
            &request.resume,
            request.job_description.as_deref(),
            request.target_industry.as_deref(),
        )
    }

    /// Generate text-level optimization suggestions with before/after edits
    pub fn generate_suggestions(
        &self,
        resume: &ResumeDocument,
        job_description: Option<&str>,
        target_industry: Option<&str>,
        max_suggestions: usize,
    ) -> Result<Vec<OptimizationSuggestion>> {
        validate_inputs(job_description, target_industry)?;
        optimizer::generate_suggestions(
            &self.matcher,
            resume,
            job_description,
            target_industry,
            max_suggestions,
        )
    }

    fn analyze_keywords(
        &self,
        resume_text: &str,
        word_count: usize,
        job_description: Option<&str>,
        target_industry: Option<&str>,
    ) -> KeywordAnalysis {
        let resume_keywords = self.matcher.extract_keywords(resume_text);

        let job_keywords: BTreeSet<String> = job_description
            .map(|job| self.matcher.extract_keywords(job))
            .unwrap_or_default();

        let industry_keyword_list = target_industry
            .map(|industry| self.matcher.industry_keywords(industry))
            .unwrap_or_default();
        let industry_keyword_set: BTreeSet<String> =
            industry_keyword_list.iter().cloned().collect();

        let matched_keywords: Vec<String> = resume_keywords
            .intersection(&job_keywords)
            .cloned()
            .collect();
        let missing_keywords: Vec<String> = job_keywords
            .difference(&resume_keywords)
            .take(10)
            .cloned()
            .collect();

        let job_match_percentage =
            job_description.map(|job| self.job_match_percentage(job, resume_text, &resume_keywords));

        let score = scorer::score_keywords(
            &resume_keywords,
            &job_keywords,
            &industry_keyword_set,
            word_count,
        );

        KeywordAnalysis {
            score,
            total_keywords: resume_keywords.len(),
            industry_keywords: industry_keyword_list,
            job_keywords: job_keywords.into_iter().collect(),
            matched_keywords,
            missing_keywords,
            keyword_density: KeywordMatcher::keyword_density(resume_keywords.len(), word_count),
            job_match_percentage,
        }
    }

    /// Share of the job description's skill terms present in the resume.
    /// A job description with no recognizable skill terms requires nothing,
    /// so it counts as a full match.
    fn job_match_percentage(
        &self,
        job_description: &str,
        resume_text: &str,
        resume_keywords: &BTreeSet<String>,
    ) -> f64 {
        let job_skill_terms = self.matcher.extract_skills_from_text(job_description);
        if job_skill_terms.is_empty() {
            return 100.0;
        }

        let resume_skill_terms = self.matcher.extract_skills_from_text(resume_text);
        let matched = job_skill_terms
            .iter()
            .filter(|term| resume_keywords.contains(*term) || resume_skill_terms.contains(*term))
            .count();

        matched as f64 / job_skill_terms.len() as f64 * 100.0
    }

    fn industry_insights(&self, industry: &str, resume: &ResumeDocument) -> IndustryInsights {
        let profile = industry_profile(industry);

        let mut insights = IndustryInsights {
            industry: industry.to_string(),
            benchmarks: None,
            trends: Vec::new(),
            recommendations: Vec::new(),
        };

        let Some((average_score, recommended_length, trending)) = profile else {
            return insights;
        };

        insights.benchmarks = Some(InsightBenchmarks {
            average_ats_score: average_score,
            recommended_length: recommended_length.to_string(),
        });
        insights.trends = trending.iter().map(|t| t.to_string()).collect();

        let current_skills: BTreeSet<String> = resume.declared_skills().into_iter().collect();
        let missing_trending: Vec<&str> = trending
            .iter()
            .filter(|skill| !current_skills.contains(&skill.to_lowercase()))
            .take(3)
            .copied()
            .collect();

        if !missing_trending.is_empty() {
            insights.recommendations.push(format!(
                "Consider adding trending {} skills: {}",
                industry,
                missing_trending.join(", ")
            ));
        }

        insights
    }
}

fn validate_inputs(job_description: Option<&str>, target_industry: Option<&str>) -> Result<()> {
    if let Some(job) = job_description {
        if job.chars().count() > MAX_JOB_DESCRIPTION_CHARS {
            return Err(AtsInsightError::InvalidInput(format!(
                "Job description too long (max {} characters)",
                MAX_JOB_DESCRIPTION_CHARS
            )));
        }
    }
    if let Some(industry) = target_industry {
        if industry.chars().count() > MAX_TARGET_INDUSTRY_CHARS {
            return Err(AtsInsightError::InvalidInput(format!(
                "Target industry too long (max {} characters)",
                MAX_TARGET_INDUSTRY_CHARS
            )));
        }
    }
    Ok(())
}

/// Average score, recommended length, and trending skills per industry
fn industry_profile(industry: &str) -> Option<(u8, &'static str, &'static [&'static str])> {
    match industry.trim().to_lowercase().as_str() {
        "technology" => Some((
            75,
            "600-800 words",
            &["AI/ML", "Cloud Computing", "DevOps", "Cybersecurity"],
        )),
        "healthcare" => Some((
            70,
            "500-700 words",
            &["Telemedicine", "Electronic Health Records", "Patient Care"],
        )),
        "finance" => Some((
            72,
            "550-750 words",
            &["Financial Modeling", "Risk Management", "Compliance"],
        )),
        _ => None,
    }
}
