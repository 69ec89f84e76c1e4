//! Intake — turns a submitted resume form into a `ResumeRecord`.
//!
//! This is the collection-layer boundary: it applies the form's field rules,
//! resolves each experience description, and builds the record. The engine
//! behind it never re-validates.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::generation::description::{resolve_description, DescriptionSource};
use crate::models::resume::{
    Education, Experience, PersonalInfo, Proficiency, Profession, RecordError,
    ResumeRecord, SkillSet,
};

pub const MIN_GRADUATION_YEAR: i32 = 1950;
pub const MAX_GRADUATION_YEAR: i32 = 2030;
pub const MAX_EXPERIENCES: usize = 10;
/// Form value that switches profession to free text.
pub const OTHER_PROFESSION: &str = "Other";

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct SkillSubmission {
    pub name: String,
    pub level: Proficiency,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceSubmission {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

/// A completed resume form as posted by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumeSubmission {
    #[serde(default)]
    pub personal: PersonalInfo,
    pub profession: String,
    #[serde(default)]
    pub profession_other: Option<String>,
    #[serde(default)]
    pub skills: Vec<SkillSubmission>,
    pub education: Education,
    #[serde(default)]
    pub work_experience: Vec<ExperienceSubmission>,
}

// ────────────────────────────────────────────────────────────────────────────
// Field validation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct IntakeValidation {
    pub passed: bool,
    pub problems: Vec<String>,
}

/// Applies the form's field rules, collecting every violation.
pub fn validate_submission(submission: &ResumeSubmission) -> IntakeValidation {
    let mut problems = Vec::new();

    let year = submission.education.graduation_year;
    if !(MIN_GRADUATION_YEAR..=MAX_GRADUATION_YEAR).contains(&year) {
        problems.push(format!(
            "graduation_year {year} is outside {MIN_GRADUATION_YEAR}..={MAX_GRADUATION_YEAR}"
        ));
    }

    if submission.work_experience.len() > MAX_EXPERIENCES {
        problems.push(format!(
            "at most {MAX_EXPERIENCES} work experiences are accepted (got {})",
            submission.work_experience.len()
        ));
    }

    if submission.profession.trim() == OTHER_PROFESSION
        && submission
            .profession_other
            .as_deref()
            .map_or(true, |p| p.trim().is_empty())
    {
        problems.push("profession 'Other' requires profession_other".to_string());
    }

    for (i, skill) in submission.skills.iter().enumerate() {
        if skill.name.trim().is_empty() {
            problems.push(format!("skills[{i}] has a blank name"));
        }
    }

    IntakeValidation {
        passed: problems.is_empty(),
        problems,
    }
}

/// Resolves the profession the record should carry.
pub fn resolve_profession(submission: &ResumeSubmission) -> Profession {
    let selected = submission.profession.trim();
    if selected == OTHER_PROFESSION {
        let custom = submission.profession_other.as_deref().unwrap_or("").trim();
        return Profession::from_label(custom);
    }
    Profession::from_label(selected)
}

// ────────────────────────────────────────────────────────────────────────────
// Record construction
// ────────────────────────────────────────────────────────────────────────────

/// Builds the record from an already-validated submission.
///
/// Descriptions are resolved one experience at a time, in entry order.
pub async fn build_record(
    submission: ResumeSubmission,
    source: &dyn DescriptionSource,
    description_timeout: Duration,
) -> Result<ResumeRecord, RecordError> {
    let profession = resolve_profession(&submission);

    let skills = SkillSet::try_from_entries(
        submission
            .skills
            .into_iter()
            .map(|s| (s.name.trim().to_string(), s.level)),
    )?;

    let mut work_experience = Vec::with_capacity(submission.work_experience.len());
    for exp in submission.work_experience {
        let description = resolve_description(
            exp.description.as_deref(),
            &exp.position,
            &exp.company,
            source,
            description_timeout,
        )
        .await;
        work_experience.push(Experience {
            company: exp.company,
            position: exp.position,
            start_date: exp.start_date,
            end_date: exp.end_date,
            description,
        });
    }

    info!(
        "Built resume record: profession={}, {} skill(s), {} experience(s)",
        profession,
        skills.len(),
        work_experience.len()
    );

    Ok(ResumeRecord::new(
        submission.personal,
        profession,
        skills,
        submission.education,
        work_experience,
    ))
}
