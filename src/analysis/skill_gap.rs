//! Skill gap analysis against job description and industry requirements

use crate::analysis::keywords::KeywordMatcher;
use crate::resume::ResumeDocument;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Result of diffing declared resume skills against required skills.
///
/// `missing_skills` and `matching_skills` always partition
/// `required_skills`, and the three tiers partition `missing_skills`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGapResult {
    pub current_skills: BTreeSet<String>,
    pub required_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    pub matching_skills: BTreeSet<String>,
    pub critical_missing: BTreeSet<String>,
    pub important_missing: BTreeSet<String>,
    pub nice_to_have_missing: BTreeSet<String>,
    pub match_percentage: f64,
}

/// Diff the resume's declared skills against the union of job-description
/// skills and industry skills, tiering the gaps by industry priority.
pub fn analyze_skill_gaps(
    matcher: &KeywordMatcher,
    resume: &ResumeDocument,
    job_description: Option<&str>,
    target_industry: Option<&str>,
) -> SkillGapResult {
    let current_skills: BTreeSet<String> = resume.declared_skills().into_iter().collect();

    let mut required_skills: BTreeSet<String> = BTreeSet::new();
    if let Some(job) = job_description {
        required_skills.extend(matcher.extract_skills_from_text(job));
    }
    if let Some(industry) = target_industry {
        required_skills.extend(matcher.industry_skills(industry));
    }

    let missing_skills: BTreeSet<String> =
        required_skills.difference(&current_skills).cloned().collect();
    let matching_skills: BTreeSet<String> =
        required_skills.intersection(&current_skills).cloned().collect();

    let priorities = matcher.skill_priorities(target_industry.unwrap_or(""));

    let mut critical_missing = BTreeSet::new();
    let mut important_missing = BTreeSet::new();
    let mut nice_to_have_missing = BTreeSet::new();

    for skill in &missing_skills {
        if priorities.critical.contains(skill) {
            critical_missing.insert(skill.clone());
        } else if priorities.important.contains(skill) {
            important_missing.insert(skill.clone());
        } else {
            // Anything without an explicit tier is nice-to-have
            nice_to_have_missing.insert(skill.clone());
        }
    }

    let match_percentage = if required_skills.is_empty() {
        100.0
    } else {
        matching_skills.len() as f64 / required_skills.len() as f64 * 100.0
    };

    SkillGapResult {
        current_skills,
        required_skills,
        missing_skills,
        matching_skills,
        critical_missing,
        important_missing,
        nice_to_have_missing,
        match_percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn resume_with_skills(skills: &[&str]) -> ResumeDocument {
        let mut map = BTreeMap::new();
        map.insert(
            "technical".to_string(),
            skills.iter().map(|s| s.to_string()).collect(),
        );
        ResumeDocument {
            skills: map,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_and_matching_partition_required() {
        let matcher = KeywordMatcher::new().unwrap();
        let resume = resume_with_skills(&["python"]);

        let result = analyze_skill_gaps(
            &matcher,
            &resume,
            Some("Need python, sql and docker skills"),
            None,
        );

        let expected_required: BTreeSet<String> =
            ["python", "sql", "docker"].iter().map(|s| s.to_string()).collect();
        assert_eq!(result.required_skills, expected_required);

        let reunion: BTreeSet<String> = result
            .missing_skills
            .union(&result.matching_skills)
            .cloned()
            .collect();
        assert_eq!(reunion, result.required_skills);
        assert!(result.missing_skills.is_disjoint(&result.matching_skills));

        let expected_missing: BTreeSet<String> =
            ["sql", "docker"].iter().map(|s| s.to_string()).collect();
        assert_eq!(result.missing_skills, expected_missing);
        assert!((result.match_percentage - 100.0 / 3.0).abs() < 0.1);
    }

    #[test]
    fn test_empty_requirements_is_full_match() {
        let matcher = KeywordMatcher::new().unwrap();
        let resume = resume_with_skills(&["python"]);

        let result = analyze_skill_gaps(&matcher, &resume, None, None);

        assert!(result.required_skills.is_empty());
        assert!(result.missing_skills.is_empty());
        assert_eq!(result.match_percentage, 100.0);
    }

    #[test]
    fn test_priority_tiers_partition_missing() {
        let matcher = KeywordMatcher::new().unwrap();
        let resume = resume_with_skills(&["python"]);

        let result = analyze_skill_gaps(&matcher, &resume, None, Some("technology"));

        let mut tier_union: BTreeSet<String> = BTreeSet::new();
        tier_union.extend(result.critical_missing.iter().cloned());
        tier_union.extend(result.important_missing.iter().cloned());
        tier_union.extend(result.nice_to_have_missing.iter().cloned());
        assert_eq!(tier_union, result.missing_skills);

        assert!(result.critical_missing.is_disjoint(&result.important_missing));
        assert!(result.critical_missing.is_disjoint(&result.nice_to_have_missing));
        assert!(result.important_missing.is_disjoint(&result.nice_to_have_missing));

        // "software development" is tiered critical for technology
        assert!(result.critical_missing.contains("software development"));
    }

    #[test]
    fn test_required_is_union_of_job_and_industry() {
        let matcher = KeywordMatcher::new().unwrap();
        let resume = resume_with_skills(&[]);

        let job_only = analyze_skill_gaps(&matcher, &resume, Some("Requires sql"), None);
        let both = analyze_skill_gaps(&matcher, &resume, Some("Requires sql"), Some("finance"));

        assert!(both.required_skills.is_superset(&job_only.required_skills));
        assert!(both.required_skills.contains("financial modeling"));
    }
}
