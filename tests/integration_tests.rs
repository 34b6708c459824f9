//! Integration tests for the ATS insight engine

use ats_insight::analysis::analyzer::AtsEngine;
use ats_insight::history::{HistoryStore, Trend};
use ats_insight::input;
use chrono::{TimeZone, Utc};
use std::path::Path;

fn load_fixture_resume() -> ats_insight::resume::ResumeDocument {
    input::read_resume(Path::new("tests/fixtures/sample_resume.json")).unwrap()
}

fn load_fixture_job() -> String {
    input::read_job_description(Path::new("tests/fixtures/sample_job.txt")).unwrap()
}

#[test]
fn test_full_analysis_of_fixture_resume() {
    let engine = AtsEngine::new().unwrap();
    let resume = load_fixture_resume();
    let job = load_fixture_job();

    let result = engine
        .analyze(&resume, Some(&job), Some("technology"))
        .unwrap();

    assert!(result.overall_score <= 100);
    assert!(result.formatting_score >= 80, "well-formed resume should score high on formatting");
    assert!(result.recommendations.len() <= 10);

    // The fixture resume covers the job's core stack
    for skill in ["python", "django", "docker", "kubernetes"] {
        assert!(
            result.skill_gaps.matching_skills.contains(skill),
            "expected {} to match",
            skill
        );
    }

    // Partition invariants
    let reunion: std::collections::BTreeSet<String> = result
        .skill_gaps
        .missing_skills
        .union(&result.skill_gaps.matching_skills)
        .cloned()
        .collect();
    assert_eq!(reunion, result.skill_gaps.required_skills);

    let job_match = result.job_match_percentage.unwrap();
    assert!(job_match > 50.0, "fixture should match most job skills, got {}", job_match);
}

#[test]
fn test_analysis_without_job_or_industry() {
    let engine = AtsEngine::new().unwrap();
    let result = engine.analyze(&load_fixture_resume(), None, None).unwrap();

    assert!(result.job_match_percentage.is_none());
    assert!(result.industry_insights.is_none());
    assert!(result.keyword_analysis.job_keywords.is_empty());
    assert_eq!(result.skill_gaps.match_percentage, 100.0);
}

#[test]
fn test_result_serializes_to_json() {
    let engine = AtsEngine::new().unwrap();
    let result = engine
        .analyze(&load_fixture_resume(), Some("python developer"), None)
        .unwrap();

    let json = serde_json::to_string(&result).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["overall_score"].is_u64());
    assert!(value["analysis_timestamp"].is_string());
}

#[test]
fn test_suggestions_for_fixture_resume() {
    let engine = AtsEngine::new().unwrap();
    let job = load_fixture_job();

    let suggestions = engine
        .generate_suggestions(&load_fixture_resume(), Some(&job), Some("technology"), 5)
        .unwrap();

    assert!(suggestions.len() <= 5);
}

#[test]
fn test_score_recording_and_trend_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("history.json");

    let mut store = HistoryStore::open(&store_path).unwrap();
    for (offset, score) in [40u8, 45, 50, 55, 60].iter().enumerate() {
        let timestamp = Utc
            .with_ymd_and_hms(2024, 3, 1 + offset as u32, 9, 0, 0)
            .unwrap();
        store.record_score("fixture-resume", *score, timestamp).unwrap();
    }

    let history = store.get_history("fixture-resume", 10);
    assert_eq!(history.entries.len(), 5);
    assert_eq!(history.trend, Trend::Improving);
    assert_eq!(history.best_score, 60);

    // Reopen from disk and confirm persistence
    let reopened = HistoryStore::open(&store_path).unwrap();
    let persisted = reopened.get_history("fixture-resume", 2);
    assert_eq!(persisted.entries.len(), 2);
    assert_eq!(persisted.entries[1].score, 60);
}

#[test]
fn test_markdown_job_description_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let job_path = dir.path().join("job.md");
    std::fs::write(
        &job_path,
        "# Platform Engineer\n\nMust have **python** and `docker` skills.\n",
    )
    .unwrap();

    let text = input::read_job_description(&job_path).unwrap();
    assert!(text.contains("python"));
    assert!(text.contains("docker"));
    assert!(!text.contains("**"));

    let engine = AtsEngine::new().unwrap();
    let result = engine
        .analyze(&load_fixture_resume(), Some(&text), None)
        .unwrap();
    assert_eq!(result.job_match_percentage, Some(100.0));
}
