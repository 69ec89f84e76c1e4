//! Summary Generator — template-filled professional summary.
//!
//! One template is chosen from `SUMMARY_TEMPLATES` through a `TemplateSelector`
//! and its placeholders are filled from the record. Template choice is the only
//! non-deterministic step; `FixedTemplate` pins it for callers that need
//! reproducible prose.

use rand::Rng;
use serde::Serialize;

use crate::models::resume::ResumeRecord;

/// Fallback for `{key_skill}` / `{key_skill_level}` when no skills were entered.
pub const NO_SKILL: &str = "N/A";
/// Fallback for `{latest_company}` when no experience was entered.
pub const DEFAULT_LATEST_COMPANY: &str = "previous employers";
/// Fallback for `{latest_experience}` when no experience was entered.
pub const DEFAULT_LATEST_EXPERIENCE: &str = "worked on key projects";

/// Template pool. Every entry uses the same seven placeholders.
pub const SUMMARY_TEMPLATES: [&str; 5] = [
    "Experienced {profession} holding a {education}. Skilled in {skills_list}, \
     with {key_skill_level} expertise in {key_skill}. Most recently at {latest_company}: \
     {latest_experience}.",
    "{profession} with a {education} and a proven track record at {latest_company}, \
     where the work included: {latest_experience}. Core competencies include {skills_list}; \
     strongest skill is {key_skill} ({key_skill_level}).",
    "Results-driven {profession} combining a {education} with hands-on skills in \
     {skills_list}. Brings {key_skill_level} proficiency in {key_skill}. \
     Latest role at {latest_company} involved: {latest_experience}.",
    "Dedicated {profession} ({education}) offering {key_skill_level}-level command of \
     {key_skill} alongside {skills_list}. Recent experience at {latest_company}: \
     {latest_experience}.",
    "Versatile {profession} equipped with a {education}. Toolkit: {skills_list}. \
     Key strength: {key_skill} ({key_skill_level}). At {latest_company}: {latest_experience}.",
];

// ────────────────────────────────────────────────────────────────────────────
// Template selection strategy
// ────────────────────────────────────────────────────────────────────────────

/// Picks an index into a template pool of `pool_len` entries.
///
/// Carried in `AppState` as `Arc<dyn TemplateSelector>`.
pub trait TemplateSelector: Send + Sync {
    fn select(&self, pool_len: usize) -> usize;
}

/// Uniform random choice. Production default.
pub struct RandomTemplate;

impl TemplateSelector for RandomTemplate {
    fn select(&self, pool_len: usize) -> usize {
        if pool_len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..pool_len)
    }
}

/// Always the same template. Indices past the pool wrap around.
pub struct FixedTemplate(pub usize);

impl TemplateSelector for FixedTemplate {
    fn select(&self, pool_len: usize) -> usize {
        if pool_len == 0 {
            0
        } else {
            self.0 % pool_len
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Placeholder values
// ────────────────────────────────────────────────────────────────────────────

/// The seven placeholder values computed from a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryFields {
    pub profession: String,
    pub education: String,
    pub skills_list: String,
    pub key_skill: String,
    pub key_skill_level: String,
    pub latest_company: String,
    pub latest_experience: String,
}

impl SummaryFields {
    pub fn from_record(record: &ResumeRecord) -> Self {
        let skills_list = record
            .skills()
            .iter()
            .map(|s| format!("{} ({})", s.name, s.level))
            .collect::<Vec<_>>()
            .join(", ");

        let (key_skill, key_skill_level) = match record.skills().key_skill() {
            Some(skill) => (skill.name.clone(), skill.level.to_string()),
            None => (NO_SKILL.to_string(), NO_SKILL.to_string()),
        };

        // "Latest" is positional: the last entry, whatever its dates say.
        let (latest_company, latest_experience) = match record.latest_experience() {
            Some(exp) => (exp.company.clone(), exp.description.clone()),
            None => (
                DEFAULT_LATEST_COMPANY.to_string(),
                DEFAULT_LATEST_EXPERIENCE.to_string(),
            ),
        };

        SummaryFields {
            profession: record.profession().to_string(),
            education: record.education().degree_line(),
            skills_list,
            key_skill,
            key_skill_level,
            latest_company,
            latest_experience,
        }
    }

    fn lookup(&self, placeholder: &str) -> Option<&str> {
        let value = match placeholder {
            "profession" => &self.profession,
            "education" => &self.education,
            "skills_list" => &self.skills_list,
            "key_skill" => &self.key_skill,
            "key_skill_level" => &self.key_skill_level,
            "latest_company" => &self.latest_company,
            "latest_experience" => &self.latest_experience,
            _ => return None,
        };
        Some(value.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

/// A generated summary and the pool index of the template that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedSummary {
    pub summary: String,
    pub template_index: usize,
}

/// Produces the professional summary for `record`. Never fails.
pub fn generate_summary(record: &ResumeRecord, selector: &dyn TemplateSelector) -> String {
    generate_summary_with_template(record, selector).summary
}

pub fn generate_summary_with_template(
    record: &ResumeRecord,
    selector: &dyn TemplateSelector,
) -> GeneratedSummary {
    let template_index = selector.select(SUMMARY_TEMPLATES.len()) % SUMMARY_TEMPLATES.len();
    let fields = SummaryFields::from_record(record);

    GeneratedSummary {
        summary: fill_template(SUMMARY_TEMPLATES[template_index], &fields),
        template_index,
    }
}

/// Single-pass `{name}` substitution.
///
/// Substituted values are never rescanned, so user text containing braces is
/// copied through untouched. Unknown placeholders are left as written.
fn fill_template(template: &str, fields: &SummaryFields) -> String {
    let mut out = String::with_capacity(template.len() + 128);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match fields.lookup(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{
        Education, EducationLevel, Experience, PersonalInfo, Proficiency, Profession, SkillSet,
    };
    use chrono::NaiveDate;

    const PLACEHOLDERS: [&str; 7] = [
        "{profession}",
        "{education}",
        "{skills_list}",
        "{key_skill}",
        "{key_skill_level}",
        "{latest_company}",
        "{latest_experience}",
    ];

    fn jane_doe() -> ResumeRecord {
        ResumeRecord::new(
            PersonalInfo {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                phone: "555-0100".to_string(),
            },
            Profession::DataScientist,
            SkillSet::try_from_entries([
                ("Python", Proficiency::Advanced),
                ("SQL", Proficiency::Intermediate),
            ])
            .unwrap(),
            Education {
                level: EducationLevel::Masters,
                institution: "MIT".to_string(),
                graduation_year: 2021,
            },
            vec![Experience {
                company: "Acme Corp".to_string(),
                position: "ML Engineer".to_string(),
                start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2022, 6, 1).unwrap(),
                description: "Built pipelines".to_string(),
            }],
        )
    }

    fn empty_record(profession: Profession) -> ResumeRecord {
        ResumeRecord::new(
            PersonalInfo::default(),
            profession,
            SkillSet::new(),
            Education {
                level: EducationLevel::HighSchool,
                institution: String::new(),
                graduation_year: 2020,
            },
            vec![],
        )
    }

    #[test]
    fn test_pool_has_at_least_four_templates() {
        assert!(SUMMARY_TEMPLATES.len() >= 4);
    }

    #[test]
    fn test_every_template_uses_all_placeholders() {
        for (i, template) in SUMMARY_TEMPLATES.iter().enumerate() {
            for placeholder in PLACEHOLDERS {
                assert!(
                    template.contains(placeholder),
                    "template {i} is missing {placeholder}"
                );
            }
        }
    }

    #[test]
    fn test_jane_doe_summary_contains_expected_fragments_for_every_template() {
        let record = jane_doe();
        for i in 0..SUMMARY_TEMPLATES.len() {
            let summary = generate_summary(&record, &FixedTemplate(i));
            for fragment in ["Data Scientist", "Python (Advanced)", "MIT", "Acme Corp", "Built pipelines"] {
                assert!(summary.contains(fragment), "template {i}: {summary}");
            }
            assert!(!summary.contains('{'), "unfilled placeholder in template {i}");
        }
    }

    #[test]
    fn test_exact_output_for_pinned_template() {
        let summary = generate_summary(&jane_doe(), &FixedTemplate(0));
        assert_eq!(
            summary,
            "Experienced Data Scientist holding a Master's from MIT. Skilled in \
             Python (Advanced), SQL (Intermediate), with Advanced expertise in Python. \
             Most recently at Acme Corp: Built pipelines."
        );
    }

    #[test]
    fn test_skills_list_is_comma_joined_in_insertion_order() {
        let fields = SummaryFields::from_record(&jane_doe());
        assert_eq!(fields.skills_list, "Python (Advanced), SQL (Intermediate)");
        assert_eq!(fields.key_skill, "Python");
        assert_eq!(fields.key_skill_level, "Advanced");
    }

    #[test]
    fn test_empty_skills_fall_back_to_na() {
        let record = empty_record(Profession::ProductManager);
        let fields = SummaryFields::from_record(&record);
        assert_eq!(fields.skills_list, "");
        assert_eq!(fields.key_skill, NO_SKILL);
        assert_eq!(fields.key_skill_level, NO_SKILL);

        let summary = generate_summary(&record, &FixedTemplate(4));
        assert!(summary.contains("Key strength: N/A (N/A)"));
    }

    #[test]
    fn test_empty_experience_uses_default_literals() {
        let record = empty_record(Profession::SoftwareDeveloper);
        let fields = SummaryFields::from_record(&record);
        assert_eq!(fields.latest_company, DEFAULT_LATEST_COMPANY);
        assert_eq!(fields.latest_experience, DEFAULT_LATEST_EXPERIENCE);

        for i in 0..SUMMARY_TEMPLATES.len() {
            let summary = generate_summary(&record, &FixedTemplate(i));
            assert!(summary.contains("previous employers"));
            assert!(summary.contains("worked on key projects"));
        }
    }

    #[test]
    fn test_latest_experience_is_last_in_sequence() {
        let mut experiences = jane_doe().work_experience().to_vec();
        experiences.push(Experience {
            company: "Earlier Inc".to_string(),
            position: "Intern".to_string(),
            start_date: NaiveDate::from_ymd_opt(2015, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2015, 9, 1).unwrap(),
            description: "Fetched coffee".to_string(),
        });
        let base = jane_doe();
        let record = ResumeRecord::new(
            base.personal().clone(),
            base.profession().clone(),
            base.skills().clone(),
            base.education().clone(),
            experiences,
        );
        let fields = SummaryFields::from_record(&record);
        assert_eq!(fields.latest_company, "Earlier Inc");
        assert_eq!(fields.latest_experience, "Fetched coffee");
    }

    #[test]
    fn test_custom_profession_appears_verbatim() {
        let record = empty_record(Profession::Custom("Lighthouse Keeper".to_string()));
        for i in 0..SUMMARY_TEMPLATES.len() {
            let summary = generate_summary(&record, &FixedTemplate(i));
            assert!(!summary.is_empty());
            assert!(summary.contains("Lighthouse Keeper"));
        }
    }

    #[test]
    fn test_braces_in_user_text_are_not_expanded() {
        let record = empty_record(Profession::Custom("{key_skill} wrangler".to_string()));
        let summary = generate_summary(&record, &FixedTemplate(0));
        assert!(summary.contains("{key_skill} wrangler"));
    }

    #[test]
    fn test_fixed_selector_wraps_out_of_range_index() {
        let result = generate_summary_with_template(&jane_doe(), &FixedTemplate(7));
        assert_eq!(result.template_index, 7 % SUMMARY_TEMPLATES.len());
    }

    #[test]
    fn test_random_selector_stays_in_range() {
        let selector = RandomTemplate;
        for _ in 0..200 {
            assert!(selector.select(SUMMARY_TEMPLATES.len()) < SUMMARY_TEMPLATES.len());
        }
        assert_eq!(selector.select(0), 0);
    }

    #[test]
    fn test_fill_template_leaves_unknown_and_unclosed_braces() {
        let fields = SummaryFields::from_record(&jane_doe());
        assert_eq!(fill_template("{nope} {profession}", &fields), "{nope} Data Scientist");
        assert_eq!(fill_template("open {brace", &fields), "open {brace");
    }
}
