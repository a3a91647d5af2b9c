//! Completion certificate.
//!
//! A single landscape A4 page: framed background, brand header, recipient
//! name with a measured underline, program details, optional skills line,
//! a three-column signature block, an optional grade badge and a
//! verification footer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::canvas::{Color, PageCanvas, Point, Stroke, TextAlign, TextStyle};
use super::common::{format_date_range, format_long_date};
use super::metrics::FontFace;
use super::traits::{DocumentTemplate, Validator};
use super::validation::{validate_identifier, validate_required, ValidationErrors};
use super::DocumentKind;
use crate::config::BrandConfig;

const BACKGROUND: Color = Color::rgb(0xFF, 0xFD, 0xF7);
const PRIMARY: Color = Color::rgb(0x1E, 0x3A, 0x5F);
const GOLD: Color = Color::rgb(0xC9, 0xA2, 0x27);
const ACCENT: Color = Color::rgb(0xB8, 0x86, 0x0B);
const TEXT: Color = Color::rgb(0x33, 0x33, 0x33);
const MUTED: Color = Color::rgb(0x66, 0x66, 0x66);

// Frame
const OUTER_BORDER_INSET: f64 = 20.0;
const OUTER_BORDER_WIDTH: f64 = 3.0;
const INNER_BORDER_INSET: f64 = 30.0;
const INNER_BORDER_WIDTH: f64 = 1.0;
const CORNER_INSET: f64 = 25.0;
const CORNER_LENGTH: f64 = 40.0;
const CORNER_WIDTH: f64 = 4.0;

// Header
const BRAND_BAND_WIDTH: f64 = 120.0;
const BRAND_Y: f64 = 50.0;
const BRAND_SIZE: f64 = 20.0;
const TAGLINE_BAND_WIDTH: f64 = 80.0;
const TAGLINE_Y: f64 = 74.0;
const TAGLINE_SIZE: f64 = 10.0;
const TITLE_Y: f64 = 110.0;
const TITLE_SIZE: f64 = 42.0;
const SUBTITLE_OFFSET: f64 = 50.0;
const SUBTITLE_SIZE: f64 = 16.0;
const DIVIDER_Y: f64 = 190.0;
const DIVIDER_LENGTH: f64 = 300.0;
const DIVIDER_WIDTH: f64 = 2.0;

// Body
const INTRO_Y: f64 = 210.0;
const INTRO_SIZE: f64 = 14.0;
pub const NAME_Y: f64 = 240.0;
pub const NAME_SIZE: f64 = 32.0;
pub const UNDERLINE_OFFSET: f64 = 42.0;
pub const UNDERLINE_PADDING: f64 = 40.0;
const UNDERLINE_WIDTH: f64 = 1.0;
const COMPLETED_Y: f64 = 300.0;
const PROGRAM_Y: f64 = 325.0;
const PROGRAM_SIZE: f64 = 24.0;
const DURATION_Y: f64 = 365.0;
const DATES_Y: f64 = 383.0;
const DETAIL_SIZE: f64 = 12.0;
const SKILLS_LABEL_Y: f64 = 410.0;
const SKILLS_LABEL_SIZE: f64 = 11.0;
const SKILLS_Y: f64 = 427.0;
const SKILLS_SIZE: f64 = 10.0;
pub const SKILLS_LABEL: &str = "Skills Acquired";
pub const SKILLS_SEPARATOR: &str = " • ";

// Signature block
const SIGNATURE_MARGIN: f64 = 100.0;
const SIGNATURE_COLUMN_WIDTH: f64 = 200.0;
const SIGNATURE_VALUE_Y: f64 = 470.0;
const SIGNATURE_VALUE_SIZE: f64 = 12.0;
const SIGNATURE_RULE_Y: f64 = 490.0;
const SIGNATURE_RULE_LENGTH: f64 = 120.0;
const SIGNATURE_CAPTION_Y: f64 = 496.0;
const SIGNATURE_CAPTION_SIZE: f64 = 9.0;

// Grade badge, positioned from the top-right corner
pub const BADGE_RIGHT_OFFSET: f64 = 100.0;
pub const BADGE_CENTER_Y: f64 = 100.0;
pub const BADGE_RADIUS: f64 = 30.0;
const BADGE_BORDER_WIDTH: f64 = 2.0;
const BADGE_TEXT_SIZE: f64 = 20.0;

// Footer, positioned from the bottom edge
const FOOTER_BOTTOM_OFFSET: f64 = 50.0;
const FOOTER_SIZE: f64 = 8.0;

/// Data for one completion certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateData {
    pub certificate_number: String,
    pub student_name: String,
    pub program_title: String,
    /// Free text, e.g. "6 months"
    pub duration: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub completion_date: NaiveDate,
    pub trainer_name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub final_grade: Option<String>,
}

impl CertificateData {
    /// The grade to print in the badge; blank grades count as absent.
    pub fn grade(&self) -> Option<&str> {
        self.final_grade
            .as_deref()
            .map(str::trim)
            .filter(|grade| !grade.is_empty())
    }
}

impl Validator for CertificateData {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validate_identifier(
            &self.certificate_number,
            "certificateNumber",
            "Certificate number",
            &mut errors,
        );
        validate_required(&self.student_name, "studentName", "Student name", &mut errors);
        validate_required(&self.program_title, "programTitle", "Program title", &mut errors);
        validate_required(&self.trainer_name, "trainerName", "Trainer name", &mut errors);

        errors.into_result()
    }
}

/// Layout for completion certificates.
#[derive(Debug, Clone, Default)]
pub struct CertificateTemplate {
    brand: BrandConfig,
}

impl CertificateTemplate {
    pub fn new(brand: BrandConfig) -> Self {
        Self { brand }
    }

    fn draw_frame(&self, canvas: &mut PageCanvas) {
        let page = canvas.page();
        canvas.draw_rect(0.0, 0.0, page.width, page.height, Some(BACKGROUND), None);

        for (inset, color, width) in [
            (OUTER_BORDER_INSET, PRIMARY, OUTER_BORDER_WIDTH),
            (INNER_BORDER_INSET, GOLD, INNER_BORDER_WIDTH),
        ] {
            canvas.draw_rect(
                inset,
                inset,
                page.width - 2.0 * inset,
                page.height - 2.0 * inset,
                None,
                Some(Stroke::new(color, width)),
            );
        }

        let left = CORNER_INSET;
        let right = page.width - CORNER_INSET;
        let top = CORNER_INSET;
        let bottom = page.height - CORNER_INSET;
        let len = CORNER_LENGTH;

        for corner in [
            [Point::new(left, top + len), Point::new(left, top), Point::new(left + len, top)],
            [Point::new(right - len, top), Point::new(right, top), Point::new(right, top + len)],
            [Point::new(left, bottom - len), Point::new(left, bottom), Point::new(left + len, bottom)],
            [Point::new(right - len, bottom), Point::new(right, bottom), Point::new(right, bottom - len)],
        ] {
            canvas.draw_line(&corner, GOLD, CORNER_WIDTH);
        }
    }

    fn draw_header(&self, canvas: &mut PageCanvas) {
        let center = canvas.page().center_x();

        canvas.draw_text(
            &self.brand.name,
            center - BRAND_BAND_WIDTH / 2.0,
            BRAND_Y,
            TextStyle::new(FontFace::Bold, BRAND_SIZE, PRIMARY)
                .boxed(BRAND_BAND_WIDTH, TextAlign::Center),
        );
        canvas.draw_text(
            &self.brand.tagline,
            center - TAGLINE_BAND_WIDTH / 2.0,
            TAGLINE_Y,
            TextStyle::new(FontFace::Regular, TAGLINE_SIZE, GOLD)
                .boxed(TAGLINE_BAND_WIDTH, TextAlign::Center),
        );

        canvas.draw_centered_text(
            "CERTIFICATE",
            TITLE_Y,
            TextStyle::new(FontFace::Bold, TITLE_SIZE, PRIMARY),
        );
        canvas.draw_centered_text(
            "OF COMPLETION",
            TITLE_Y + SUBTITLE_OFFSET,
            TextStyle::new(FontFace::Regular, SUBTITLE_SIZE, GOLD),
        );

        canvas.draw_line(
            &[
                Point::new(center - DIVIDER_LENGTH / 2.0, DIVIDER_Y),
                Point::new(center + DIVIDER_LENGTH / 2.0, DIVIDER_Y),
            ],
            GOLD,
            DIVIDER_WIDTH,
        );
    }

    fn draw_recipient(&self, data: &CertificateData, canvas: &mut PageCanvas) {
        let center = canvas.page().center_x();

        canvas.draw_centered_text(
            "This is to certify that",
            INTRO_Y,
            TextStyle::new(FontFace::Regular, INTRO_SIZE, TEXT),
        );
        canvas.draw_centered_text(
            &data.student_name,
            NAME_Y,
            TextStyle::new(FontFace::Bold, NAME_SIZE, PRIMARY),
        );

        // The underline tracks the measured name, not the text box.
        let name_width = canvas.measure_text_width(&data.student_name, FontFace::Bold, NAME_SIZE);
        let underline = name_width + UNDERLINE_PADDING;
        let y = NAME_Y + UNDERLINE_OFFSET;
        canvas.draw_line(
            &[
                Point::new(center - underline / 2.0, y),
                Point::new(center + underline / 2.0, y),
            ],
            GOLD,
            UNDERLINE_WIDTH,
        );
    }

    fn draw_program(&self, data: &CertificateData, canvas: &mut PageCanvas) {
        canvas.draw_centered_text(
            "has successfully completed the",
            COMPLETED_Y,
            TextStyle::new(FontFace::Regular, INTRO_SIZE, TEXT),
        );
        canvas.draw_centered_text(
            &data.program_title,
            PROGRAM_Y,
            TextStyle::new(FontFace::Bold, PROGRAM_SIZE, ACCENT),
        );
        canvas.draw_centered_text(
            &format!("Program Duration: {}", data.duration),
            DURATION_Y,
            TextStyle::new(FontFace::Regular, DETAIL_SIZE, MUTED),
        );
        canvas.draw_centered_text(
            &format_date_range(data.start_date, data.end_date),
            DATES_Y,
            TextStyle::new(FontFace::Regular, DETAIL_SIZE, MUTED),
        );
    }

    fn draw_skills(&self, data: &CertificateData, canvas: &mut PageCanvas) {
        if data.skills.is_empty() {
            return;
        }

        canvas.draw_centered_text(
            SKILLS_LABEL,
            SKILLS_LABEL_Y,
            TextStyle::new(FontFace::Bold, SKILLS_LABEL_SIZE, PRIMARY),
        );
        canvas.draw_centered_text(
            &data.skills.join(SKILLS_SEPARATOR),
            SKILLS_Y,
            TextStyle::new(FontFace::Regular, SKILLS_SIZE, TEXT),
        );
    }

    fn draw_signatures(&self, data: &CertificateData, canvas: &mut PageCanvas) {
        let page = canvas.page();
        let completion = format_long_date(data.completion_date);
        let columns = [
            (SIGNATURE_MARGIN, data.trainer_name.as_str(), "Program Trainer"),
            (
                page.center_x() - SIGNATURE_COLUMN_WIDTH / 2.0,
                completion.as_str(),
                "Date of Completion",
            ),
            (
                page.width - SIGNATURE_MARGIN - SIGNATURE_COLUMN_WIDTH,
                data.certificate_number.as_str(),
                "Certificate ID",
            ),
        ];

        for (x, value, caption) in columns {
            canvas.draw_text(
                value,
                x,
                SIGNATURE_VALUE_Y,
                TextStyle::new(FontFace::Bold, SIGNATURE_VALUE_SIZE, TEXT)
                    .boxed(SIGNATURE_COLUMN_WIDTH, TextAlign::Center),
            );

            let rule_start = x + (SIGNATURE_COLUMN_WIDTH - SIGNATURE_RULE_LENGTH) / 2.0;
            canvas.draw_line(
                &[
                    Point::new(rule_start, SIGNATURE_RULE_Y),
                    Point::new(rule_start + SIGNATURE_RULE_LENGTH, SIGNATURE_RULE_Y),
                ],
                MUTED,
                1.0,
            );

            canvas.draw_text(
                caption,
                x,
                SIGNATURE_CAPTION_Y,
                TextStyle::new(FontFace::Regular, SIGNATURE_CAPTION_SIZE, MUTED)
                    .boxed(SIGNATURE_COLUMN_WIDTH, TextAlign::Center),
            );
        }
    }

    fn draw_grade_badge(&self, data: &CertificateData, canvas: &mut PageCanvas) {
        let Some(grade) = data.grade() else {
            return;
        };

        let cx = canvas.page().width - BADGE_RIGHT_OFFSET;
        canvas.draw_circle(
            cx,
            BADGE_CENTER_Y,
            BADGE_RADIUS,
            Some(GOLD),
            Some(Stroke::new(PRIMARY, BADGE_BORDER_WIDTH)),
        );
        canvas.draw_text(
            grade,
            cx - BADGE_RADIUS,
            BADGE_CENTER_Y - FontFace::Bold.ascent(BADGE_TEXT_SIZE) / 2.0,
            TextStyle::new(FontFace::Bold, BADGE_TEXT_SIZE, Color::WHITE)
                .boxed(BADGE_RADIUS * 2.0, TextAlign::Center),
        );
    }

    fn draw_footer(&self, data: &CertificateData, canvas: &mut PageCanvas) {
        let y = canvas.page().height - FOOTER_BOTTOM_OFFSET;
        canvas.draw_centered_text(
            &format!(
                "Verify this certificate at {}{}",
                self.brand.verify_url, data.certificate_number
            ),
            y,
            TextStyle::new(FontFace::Regular, FOOTER_SIZE, MUTED),
        );
    }
}

impl DocumentTemplate for CertificateTemplate {
    type Data = CertificateData;

    const KIND: DocumentKind = DocumentKind::Certificate;

    fn identifier<'d>(&self, data: &'d CertificateData) -> &'d str {
        &data.certificate_number
    }

    fn title(&self, data: &CertificateData) -> String {
        format!("Certificate {} - {}", data.certificate_number, data.student_name)
    }

    fn layout(&self, data: &CertificateData, canvas: &mut PageCanvas) {
        self.draw_frame(canvas);
        self.draw_header(canvas);
        self.draw_recipient(data, canvas);
        self.draw_program(data, canvas);
        self.draw_skills(data, canvas);
        self.draw_signatures(data, canvas);
        self.draw_grade_badge(data, canvas);
        self.draw_footer(data, canvas);
    }
}
