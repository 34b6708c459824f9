//! Structured resume data model
//!
//! The engine never mutates a resume; it only reads it. Absent optional
//! sections deserialize to empty defaults so sparse documents still analyze.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub professional_summary: Option<String>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default)]
    pub education: Vec<Education>,
    /// Skill category name mapped to the terms listed under it.
    #[serde(default)]
    pub skills: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub languages: Vec<LanguageSkill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    /// Start date, YYYY-MM by convention
    #[serde(default)]
    pub start_date: String,
    /// End date, or None for a current position
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub is_current: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub graduation_year: String,
    #[serde(default)]
    pub gpa: Option<f32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub field_of_study: Option<String>,
    #[serde(default)]
    pub honors: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub issue_date: String,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub credential_id: Option<String>,
    #[serde(default)]
    pub credential_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageSkill {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub proficiency: String,
}

impl PersonalInfo {
    /// True when none of the core contact fields carry a value
    pub fn is_empty(&self) -> bool {
        self.first_name.trim().is_empty()
            && self.last_name.trim().is_empty()
            && self.email.trim().is_empty()
            && self.phone.trim().is_empty()
    }

    /// Names of the required contact fields that are missing
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.first_name.trim().is_empty() {
            missing.push("first name");
        }
        if self.last_name.trim().is_empty() {
            missing.push("last name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        missing
    }
}

impl ResumeDocument {
    /// Total number of terms across all skill categories
    pub fn total_skill_count(&self) -> usize {
        self.skills.values().map(|terms| terms.len()).sum()
    }

    /// All declared skill terms, lowercased, in category order
    pub fn declared_skills(&self) -> Vec<String> {
        self.skills
            .values()
            .flat_map(|terms| terms.iter())
            .filter(|term| !term.trim().is_empty())
            .map(|term| term.trim().to_lowercase())
            .collect()
    }

    pub fn has_skills(&self) -> bool {
        self.skills.values().any(|terms| !terms.is_empty())
    }

    pub fn has_summary(&self) -> bool {
        self.professional_summary
            .as_deref()
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false)
    }

    /// All start/end date strings from the work history, in listed order
    pub fn work_history_dates(&self) -> Vec<&str> {
        let mut dates = Vec::new();
        for job in &self.work_experience {
            if !job.start_date.is_empty() {
                dates.push(job.start_date.as_str());
            }
            if let Some(end) = job.end_date.as_deref() {
                if !end.is_empty() {
                    dates.push(end);
                }
            }
        }
        dates
    }
}
