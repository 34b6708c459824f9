//! Curated ATS score benchmarks by industry and role level

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Benchmark {
    pub industry: String,
    pub role_level: String,
    pub average_ats_score: u8,
    pub top_keywords: Vec<String>,
    pub recommended_sections: Vec<String>,
    pub optimal_length_words: WordRange,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WordRange {
    pub min: usize,
    pub max: usize,
}

/// Benchmarks filtered by optional industry and role level, both matched
/// case-insensitively. No filters returns the whole table.
pub fn get_benchmarks(industry: Option<&str>, role_level: Option<&str>) -> Vec<Benchmark> {
    let mut benchmarks = benchmark_table();

    if let Some(industry) = industry {
        let industry_lower = industry.trim().to_lowercase();
        benchmarks.retain(|b| b.industry.to_lowercase() == industry_lower);
    }
    if let Some(role_level) = role_level {
        let level_lower = role_level.trim().to_lowercase();
        benchmarks.retain(|b| b.role_level.to_lowercase() == level_lower);
    }

    benchmarks
}

fn benchmark_table() -> Vec<Benchmark> {
    vec![
        benchmark(
            "Technology",
            "Entry",
            72,
            &["programming", "software development", "agile", "git", "testing"],
            &["Technical Skills", "Projects", "Education", "Certifications"],
            400,
            700,
        ),
        benchmark(
            "Technology",
            "Senior",
            78,
            &["leadership", "architecture", "mentoring", "strategy", "scalability"],
            &["Leadership Experience", "Technical Skills", "Key Achievements"],
            600,
            900,
        ),
        benchmark(
            "Healthcare",
            "Entry",
            68,
            &["patient care", "clinical", "medical terminology", "healthcare"],
            &["Clinical Experience", "Certifications", "Education"],
            400,
            650,
        ),
        benchmark(
            "Finance",
            "Mid",
            75,
            &["financial analysis", "excel", "risk management", "compliance"],
            &["Financial Experience", "Certifications", "Quantifiable Results"],
            500,
            750,
        ),
    ]
}

fn benchmark(
    industry: &str,
    role_level: &str,
    average_ats_score: u8,
    top_keywords: &[&str],
    recommended_sections: &[&str],
    min_words: usize,
    max_words: usize,
) -> Benchmark {
    Benchmark {
        industry: industry.to_string(),
        role_level: role_level.to_string(),
        average_ats_score,
        top_keywords: top_keywords.iter().map(|k| k.to_string()).collect(),
        recommended_sections: recommended_sections.iter().map(|s| s.to_string()).collect(),
        optimal_length_words: WordRange {
            min: min_words,
            max: max_words,
        },
    }
}
