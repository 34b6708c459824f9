//! Flattens a structured resume into a single analyzable text blob

use crate::resume::ResumeDocument;

/// Concatenate every non-empty text field of the resume, space-joined, in a
/// fixed section order: name, summary, work experience, education, skills,
/// projects, certifications. Absent sections are skipped silently.
pub fn extract_text(resume: &ResumeDocument) -> String {
    let mut parts: Vec<String> = Vec::new();

    let full_name = format!(
        "{} {}",
        resume.personal_info.first_name.trim(),
        resume.personal_info.last_name.trim()
    );
    push_part(&mut parts, &full_name);

    if let Some(summary) = resume.professional_summary.as_deref() {
        push_part(&mut parts, summary);
    }

    for job in &resume.work_experience {
        push_part(&mut parts, &job.job_title);
        push_part(&mut parts, &job.company);
        for responsibility in &job.responsibilities {
            push_part(&mut parts, responsibility);
        }
    }

    for education in &resume.education {
        push_part(&mut parts, &education.degree);
        push_part(&mut parts, &education.institution);
        if let Some(field) = education.field_of_study.as_deref() {
            push_part(&mut parts, field);
        }
    }

    for terms in resume.skills.values() {
        for term in terms {
            push_part(&mut parts, term);
        }
    }

    for project in &resume.projects {
        push_part(&mut parts, &project.name);
        push_part(&mut parts, &project.description);
        for technology in &project.technologies {
            push_part(&mut parts, technology);
        }
    }

    for certification in &resume.certifications {
        push_part(&mut parts, &certification.name);
        push_part(&mut parts, &certification.issuer);
    }

    parts.join(" ")
}

fn push_part(parts: &mut Vec<String>, value: &str) {
    let trimmed = value.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
}
