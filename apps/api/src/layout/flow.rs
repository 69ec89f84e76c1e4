//! Document layout — places every line of a resume onto pages.
//!
//! Sections are emitted in a fixed order (title, personal information,
//! profession, skills, education, work experience). Lines flow top-down and a
//! new page starts whenever the next line box would cross the break margin.
//! Section headers are never repeated; the footer is stamped on every page
//! once the flow is finished.
//!
//! The result is a pure value: same record + same config ⇒ same layout.

use serde::Serialize;
use tracing::debug;

use crate::layout::font_metrics::{get_metrics, FontFace, PageConfig};
use crate::models::resume::ResumeRecord;

pub const DOCUMENT_TITLE: &str = "Resume";
pub const FOOTER_TEXT: &str = "Generated using AI Resume Builder";

pub const SECTION_PERSONAL: &str = "Personal Information";
pub const SECTION_PROFESSION: &str = "Profession";
pub const SECTION_SKILLS: &str = "Skills and Proficiency";
pub const SECTION_EDUCATION: &str = "Education";
pub const SECTION_EXPERIENCE: &str = "Work Experience";

/// Section headers in render order.
pub const SECTION_ORDER: [&str; 5] = [
    SECTION_PERSONAL,
    SECTION_PROFESSION,
    SECTION_SKILLS,
    SECTION_EDUCATION,
    SECTION_EXPERIENCE,
];

const DATE_FORMAT: &str = "%Y-%m-%d";

// ────────────────────────────────────────────────────────────────────────────
// Layout model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineKind {
    Title,
    SectionHeader,
    /// Body line of the personal, profession, skills, or education sections.
    Field,
    /// "<position> at <company>"
    ExperienceHeading,
    /// "<start> to <end>"
    ExperienceDates,
    Description,
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

/// One positioned line of text. Coordinates are PDF user space (origin bottom-left).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLine {
    pub text: String,
    pub kind: LineKind,
    pub face: FontFace,
    pub size_pt: f32,
    pub x_pt: f32,
    pub baseline_pt: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentLayout {
    pub width_pt: f32,
    pub height_pt: f32,
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All lines of `kind`, in document order across pages.
    pub fn lines_of_kind(&self, kind: LineKind) -> impl Iterator<Item = &PlacedLine> + '_ {
        self.pages
            .iter()
            .flat_map(|p| p.lines.iter())
            .filter(move |l| l.kind == kind)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page flow
// ────────────────────────────────────────────────────────────────────────────

/// Cursor over a growing list of pages. `cursor_pt` is measured from the top edge.
struct PageFlow<'a> {
    config: &'a PageConfig,
    pages: Vec<PageLayout>,
    cursor_pt: f32,
}

impl<'a> PageFlow<'a> {
    fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            pages: vec![PageLayout::default()],
            cursor_pt: config.margin_top_pt,
        }
    }

    fn gap(&mut self, pt: f32) {
        self.cursor_pt += pt;
    }

    fn new_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.cursor_pt = self.config.margin_top_pt;
    }

    /// Places one unwrapped line, breaking the page first if it does not fit.
    fn place(&mut self, text: String, kind: LineKind, face: FontFace, size_pt: f32, align: Align) {
        let line_height = size_pt * self.config.leading;
        let at_page_top = self.cursor_pt <= self.config.margin_top_pt;
        if !at_page_top && self.cursor_pt + line_height > self.config.content_bottom_pt() {
            self.new_page();
        }

        let x_pt = match align {
            Align::Left => self.config.margin_left_pt,
            Align::Center => {
                let width = get_metrics(face).width_pt(&text, size_pt);
                ((self.config.width_pt - width) / 2.0).max(self.config.margin_left_pt)
            }
        };
        let baseline_pt = self.config.height_pt - (self.cursor_pt + size_pt);

        if let Some(page) = self.pages.last_mut() {
            page.lines.push(PlacedLine {
                text,
                kind,
                face,
                size_pt,
                x_pt,
                baseline_pt,
            });
        }
        self.cursor_pt += line_height;
    }

    fn section_header(&mut self, title: &str) {
        self.gap(self.config.section_gap_pt);
        self.place(
            title.to_string(),
            LineKind::SectionHeader,
            FontFace::Bold,
            self.config.header_size_pt,
            Align::Left,
        );
    }

    /// Wrapped body text. Blank text still occupies one (empty) line so the
    /// section keeps its shape regardless of data completeness.
    fn paragraph(&mut self, text: &str, kind: LineKind, face: FontFace) {
        let size = self.config.body_size_pt;
        let lines = get_metrics(face).wrap(text, size, self.config.text_width_pt());
        if lines.is_empty() {
            self.place(String::new(), kind, face, size, Align::Left);
            return;
        }
        for line in lines {
            self.place(line, kind, face, size, Align::Left);
        }
    }

    /// Stamps the footer on every page and returns the finished layout.
    fn finish(mut self) -> DocumentLayout {
        let config = self.config;
        let width = get_metrics(FontFace::Oblique).width_pt(FOOTER_TEXT, config.footer_size_pt);
        let x_pt = ((config.width_pt - width) / 2.0).max(config.margin_left_pt);

        for page in &mut self.pages {
            page.lines.push(PlacedLine {
                text: FOOTER_TEXT.to_string(),
                kind: LineKind::Footer,
                face: FontFace::Oblique,
                size_pt: config.footer_size_pt,
                x_pt,
                baseline_pt: config.footer_baseline_pt,
            });
        }

        DocumentLayout {
            width_pt: config.width_pt,
            height_pt: config.height_pt,
            pages: self.pages,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resume layout
// ────────────────────────────────────────────────────────────────────────────

/// Lays out `record` in the fixed section order.
pub fn layout_resume(record: &ResumeRecord, config: &PageConfig) -> DocumentLayout {
    let mut flow = PageFlow::new(config);

    flow.place(
        DOCUMENT_TITLE.to_string(),
        LineKind::Title,
        FontFace::Bold,
        config.title_size_pt,
        Align::Center,
    );

    let personal = record.personal();
    flow.section_header(SECTION_PERSONAL);
    flow.paragraph(&format!("Name: {}", personal.name), LineKind::Field, FontFace::Regular);
    flow.paragraph(&format!("Email: {}", personal.email), LineKind::Field, FontFace::Regular);
    flow.paragraph(&format!("Phone: {}", personal.phone), LineKind::Field, FontFace::Regular);

    flow.section_header(SECTION_PROFESSION);
    flow.paragraph(record.profession().as_str(), LineKind::Field, FontFace::Regular);

    flow.section_header(SECTION_SKILLS);
    for skill in record.skills().iter() {
        flow.paragraph(
            &format!("{}: {}", skill.name, skill.level),
            LineKind::Field,
            FontFace::Regular,
        );
    }

    let education = record.education();
    flow.section_header(SECTION_EDUCATION);
    flow.paragraph(
        &format!(
            "{} - Graduated in {}",
            education.degree_line(),
            education.graduation_year
        ),
        LineKind::Field,
        FontFace::Regular,
    );

    flow.section_header(SECTION_EXPERIENCE);
    for exp in record.work_experience() {
        flow.paragraph(
            &format!("{} at {}", exp.position, exp.company),
            LineKind::ExperienceHeading,
            FontFace::Bold,
        );
        flow.paragraph(
            &format!(
                "{} to {}",
                exp.start_date.format(DATE_FORMAT),
                exp.end_date.format(DATE_FORMAT)
            ),
            LineKind::ExperienceDates,
            FontFace::Regular,
        );
        flow.paragraph(&exp.description, LineKind::Description, FontFace::Regular);
        flow.gap(config.block_gap_pt);
    }

    let layout = flow.finish();
    debug!(
        "Laid out resume: {} page(s), {} experience block(s)",
        layout.page_count(),
        record.work_experience().len()
    );
    layout
}
