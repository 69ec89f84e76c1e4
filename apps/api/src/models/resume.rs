//! Resume Record — the single aggregate handed to the summary generator and
//! the document renderer.
//!
//! A record is built once by the intake layer and only read afterwards. The one
//! invariant enforced here is skill-name uniqueness; everything else (year
//! ranges, non-empty names) belongs to the collection layer.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Duplicate skill entry: '{0}'")]
    DuplicateSkill(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Personal information & profession
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Canonical profession labels offered by the intake form, plus free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Profession {
    SoftwareDeveloper,
    DataScientist,
    ProductManager,
    /// User-specified profession ("Other" on the form), kept verbatim.
    Custom(String),
}

impl Profession {
    /// Maps a canonical label to its variant; anything else is kept verbatim.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Software Developer" => Profession::SoftwareDeveloper,
            "Data Scientist" => Profession::DataScientist,
            "Product Manager" => Profession::ProductManager,
            other => Profession::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Profession::SoftwareDeveloper => "Software Developer",
            Profession::DataScientist => "Data Scientist",
            Profession::ProductManager => "Product Manager",
            Profession::Custom(label) => label,
        }
    }
}

impl From<String> for Profession {
    fn from(label: String) -> Self {
        Profession::from_label(&label)
    }
}

impl From<Profession> for String {
    fn from(profession: Profession) -> Self {
        profession.as_str().to_string()
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// Ordered proficiency scale (Beginner < Intermediate < Advanced < Expert).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Proficiency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Proficiency::Beginner => "Beginner",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Advanced => "Advanced",
            Proficiency::Expert => "Expert",
        }
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: Proficiency,
}

/// Insertion-ordered skill mapping with unique names.
///
/// The first entry is the "key skill" used by the summary generator.
/// Serialized as an ordered array so the order survives JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillSet {
    entries: Vec<Skill>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_from_entries<I, S>(entries: I) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = (S, Proficiency)>,
        S: Into<String>,
    {
        let mut set = SkillSet::new();
        for (name, level) in entries {
            set.insert(name, level)?;
        }
        Ok(set)
    }

    /// Appends a skill. Rejects a name that is already present.
    pub fn insert(&mut self, name: impl Into<String>, level: Proficiency) -> Result<(), RecordError> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(RecordError::DuplicateSkill(name));
        }
        self.entries.push(Skill { name, level });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Proficiency> {
        self.entries
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.level)
    }

    /// The first skill in insertion order.
    pub fn key_skill(&self) -> Option<&Skill> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Education & experience
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "High School")]
    HighSchool,
    #[serde(rename = "Bachelor's")]
    Bachelors,
    #[serde(rename = "Master's")]
    Masters,
    #[serde(rename = "PhD")]
    Phd,
}

impl EducationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "High School",
            EducationLevel::Bachelors => "Bachelor's",
            EducationLevel::Masters => "Master's",
            EducationLevel::Phd => "PhD",
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub level: EducationLevel,
    pub institution: String,
    pub graduation_year: i32,
}

impl Education {
    /// "<Level> from <Institution>", as shown in the summary and the document.
    pub fn degree_line(&self) -> String {
        format!("{} from {}", self.level, self.institution)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Final description text. Resolved (user text, collaborator, or fallback)
    /// before the experience enters a record.
    pub description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregate
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeRecord {
    personal: PersonalInfo,
    profession: Profession,
    skills: SkillSet,
    education: Education,
    work_experience: Vec<Experience>,
}

impl ResumeRecord {
    pub fn new(
        personal: PersonalInfo,
        profession: Profession,
        skills: SkillSet,
        education: Education,
        work_experience: Vec<Experience>,
    ) -> Self {
        Self {
            personal,
            profession,
            skills,
            education,
            work_experience,
        }
    }

    pub fn personal(&self) -> &PersonalInfo {
        &self.personal
    }

    pub fn profession(&self) -> &Profession {
        &self.profession
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    pub fn education(&self) -> &Education {
        &self.education
    }

    /// Experiences in entry order (not sorted by date).
    pub fn work_experience(&self) -> &[Experience] {
        &self.work_experience
    }

    /// The last experience in entry order, regardless of its dates.
    pub fn latest_experience(&self) -> Option<&Experience> {
        self.work_experience.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn experience(company: &str, start: NaiveDate) -> Experience {
        Experience {
            company: company.to_string(),
            position: "Engineer".to_string(),
            start_date: start,
            end_date: start,
            description: String::new(),
        }
    }

    #[test]
    fn test_partial_personal_info_fills_blanks() {
        let personal: PersonalInfo = serde_json::from_value(serde_json::json!({"name": "X"})).unwrap();
        assert_eq!(personal.name, "X");
        assert_eq!(personal.email, "");
        assert_eq!(personal.phone, "");
    }

    #[test]
    fn test_skill_set_preserves_insertion_order() {
        let skills = SkillSet::try_from_entries([
            ("SQL", Proficiency::Intermediate),
            ("Python", Proficiency::Advanced),
            ("Rust", Proficiency::Beginner),
        ])
        .unwrap();

        let names: Vec<&str> = skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["SQL", "Python", "Rust"]);
        assert_eq!(skills.key_skill().unwrap().name, "SQL");
    }

    #[test]
    fn test_skill_set_rejects_duplicates() {
        let result = SkillSet::try_from_entries([
            ("Python", Proficiency::Advanced),
            ("Python", Proficiency::Expert),
        ]);
        assert_eq!(result, Err(RecordError::DuplicateSkill("Python".to_string())));
    }

    #[test]
    fn test_skill_set_insert_keeps_first_on_duplicate() {
        let mut skills = SkillSet::new();
        skills.insert("Go", Proficiency::Expert).unwrap();
        assert!(skills.insert("Go", Proficiency::Beginner).is_err());
        assert_eq!(skills.len(), 1);
        assert_eq!(skills.get("Go"), Some(Proficiency::Expert));
    }

    #[test]
    fn test_empty_skill_set_has_no_key_skill() {
        assert!(SkillSet::new().key_skill().is_none());
        assert!(SkillSet::new().is_empty());
    }

    #[test]
    fn test_proficiency_is_ordered() {
        assert!(Proficiency::Beginner < Proficiency::Intermediate);
        assert!(Proficiency::Advanced < Proficiency::Expert);
    }

    #[test]
    fn test_profession_canonical_and_custom() {
        assert_eq!(Profession::from_label("Data Scientist"), Profession::DataScientist);
        assert_eq!(
            Profession::from_label("Marine Biologist"),
            Profession::Custom("Marine Biologist".to_string())
        );
        assert_eq!(Profession::ProductManager.to_string(), "Product Manager");
    }

    #[test]
    fn test_profession_serializes_as_plain_string() {
        let json = serde_json::to_string(&Profession::SoftwareDeveloper).unwrap();
        assert_eq!(json, "\"Software Developer\"");
        let back: Profession = serde_json::from_str("\"Chef\"").unwrap();
        assert_eq!(back.as_str(), "Chef");
    }

    #[test]
    fn test_education_level_labels_round_trip_through_serde() {
        let level: EducationLevel = serde_json::from_str("\"Master's\"").unwrap();
        assert_eq!(level, EducationLevel::Masters);
        assert_eq!(level.to_string(), "Master's");
    }

    #[test]
    fn test_degree_line_format() {
        let education = Education {
            level: EducationLevel::Phd,
            institution: "ETH Zurich".to_string(),
            graduation_year: 2019,
        };
        assert_eq!(education.degree_line(), "PhD from ETH Zurich");
    }

    #[test]
    fn test_latest_experience_is_last_entry_not_most_recent_date() {
        let record = ResumeRecord::new(
            PersonalInfo::default(),
            Profession::SoftwareDeveloper,
            SkillSet::new(),
            Education {
                level: EducationLevel::Bachelors,
                institution: "State U".to_string(),
                graduation_year: 2015,
            },
            vec![
                experience("Newer Co", date(2022, 1, 1)),
                experience("Older Co", date(2012, 1, 1)),
            ],
        );
        assert_eq!(record.latest_experience().unwrap().company, "Older Co");
    }

    #[test]
    fn test_skill_set_serializes_as_ordered_array() {
        let skills = SkillSet::try_from_entries([
            ("Python", Proficiency::Advanced),
            ("SQL", Proficiency::Intermediate),
        ])
        .unwrap();
        let value = serde_json::to_value(&skills).unwrap();
        assert_eq!(value[0]["name"], "Python");
        assert_eq!(value[1]["level"], "Intermediate");
    }
}
