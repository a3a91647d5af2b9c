//! Itemized invoice.
//!
//! A single portrait A4 page: brand and title header, right-aligned
//! metadata, a bill-to block, the item table with alternating row tints,
//! a filled total band and a two-line footer.
//!
//! The total band prints the caller's `amount` as given. It is never
//! recomputed from the item rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::canvas::{Color, PageCanvas, TextAlign, TextStyle};
use super::common::{format_long_date, format_money, format_number};
use super::metrics::FontFace;
use super::traits::{DocumentTemplate, Validator};
use super::validation::{
    validate_finite, validate_identifier, validate_required, ValidationErrors,
};
use super::DocumentKind;
use crate::config::BrandConfig;

const PRIMARY: Color = Color::rgb(0x1E, 0x3A, 0x5F);
const TEXT: Color = Color::rgb(0x33, 0x33, 0x33);
const MUTED: Color = Color::rgb(0x66, 0x66, 0x66);
/// Row backgrounds, indexed by `row % 2`.
pub const ROW_TINTS: [Color; 2] = [Color::rgb(0xF8, 0xF9, 0xFA), Color::WHITE];

const MARGIN: f64 = 50.0;

// Header
const BRAND_Y: f64 = 50.0;
const BRAND_SIZE: f64 = 20.0;
const TAGLINE_Y: f64 = 75.0;
const TAGLINE_SIZE: f64 = 10.0;
const HEADER_BOX_WIDTH: f64 = 200.0;
const TITLE_Y: f64 = 50.0;
const TITLE_SIZE: f64 = 28.0;
const META_TOP: f64 = 90.0;
const META_LINE_HEIGHT: f64 = 15.0;
const META_SIZE: f64 = 10.0;

// Bill to
const BILL_TO_Y: f64 = 160.0;
const BILL_TO_LABEL_SIZE: f64 = 12.0;
const BILL_TO_NAME_Y: f64 = 178.0;
const BILL_TO_NAME_SIZE: f64 = 11.0;
const BILL_TO_EMAIL_Y: f64 = 193.0;
const BILL_TO_EMAIL_SIZE: f64 = 10.0;

// Table
pub const TABLE_TOP: f64 = 240.0;
const TABLE_WIDTH: f64 = 495.0;
pub const HEADER_HEIGHT: f64 = 25.0;
pub const ROW_HEIGHT: f64 = 25.0;
const CELL_PADDING: f64 = 5.0;
const CELL_TEXT_OFFSET: f64 = 8.0;
const CELL_SIZE: f64 = 10.0;

// Total band
const TOTAL_BAND_GAP: f64 = 10.0;
const TOTAL_BAND_X: f64 = 295.0;
const TOTAL_BAND_WIDTH: f64 = 250.0;
const TOTAL_BAND_HEIGHT: f64 = 30.0;
const TOTAL_TEXT_OFFSET: f64 = 10.0;
const TOTAL_SIZE: f64 = 12.0;
const TOTAL_AMOUNT_X: f64 = 355.0;
const TOTAL_AMOUNT_WIDTH: f64 = 185.0;
pub const TOTAL_LABEL: &str = "TOTAL:";

// Footer, positioned from the bottom edge
const THANKS_BOTTOM_OFFSET: f64 = 100.0;
const CONTACT_BOTTOM_OFFSET: f64 = 85.0;
const THANKS_SIZE: f64 = 10.0;
const CONTACT_SIZE: f64 = 9.0;

/// A fixed-width table column.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub caption: &'static str,
    pub x: f64,
    pub width: f64,
    pub align: TextAlign,
}

impl Column {
    fn text_style(&self, font: FontFace, color: Color) -> TextStyle {
        TextStyle::new(font, CELL_SIZE, color).boxed(self.width - 2.0 * CELL_PADDING, self.align)
    }

    fn text_x(&self) -> f64 {
        self.x + CELL_PADDING
    }
}

pub const COLUMNS: [Column; 4] = [
    Column {
        caption: "Description",
        x: MARGIN,
        width: 245.0,
        align: TextAlign::Left,
    },
    Column {
        caption: "Qty",
        x: 295.0,
        width: 60.0,
        align: TextAlign::Center,
    },
    Column {
        caption: "Unit Price",
        x: 355.0,
        width: 95.0,
        align: TextAlign::Right,
    },
    Column {
        caption: "Total",
        x: 450.0,
        width: 95.0,
        align: TextAlign::Right,
    },
];

/// One invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
}

/// Data for one invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceData {
    pub invoice_number: String,
    pub student_name: String,
    pub student_email: String,
    pub program_title: String,
    /// Amount due as supplied by the billing layer
    pub amount: f64,
    /// Currency code printed before every amount, e.g. "RWF"
    pub currency: String,
    pub issued_at: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    pub status: String,
}

impl Validator for InvoiceData {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validate_identifier(
            &self.invoice_number,
            "invoiceNumber",
            "Invoice number",
            &mut errors,
        );
        validate_required(&self.student_name, "studentName", "Student name", &mut errors);
        validate_required(&self.currency, "currency", "Currency", &mut errors);
        validate_finite(self.amount, "amount", &mut errors);

        for (i, item) in self.items.iter().enumerate() {
            validate_finite(item.quantity, &format!("items[{i}].quantity"), &mut errors);
            validate_finite(item.unit_price, &format!("items[{i}].unitPrice"), &mut errors);
            validate_finite(item.total, &format!("items[{i}].total"), &mut errors);
        }

        errors.into_result()
    }
}

/// Layout for invoices.
#[derive(Debug, Clone, Default)]
pub struct InvoiceTemplate {
    brand: BrandConfig,
}

impl InvoiceTemplate {
    pub fn new(brand: BrandConfig) -> Self {
        Self { brand }
    }

    /// Top edge of the total band for a table with `rows` item rows.
    pub fn total_band_y(rows: usize) -> f64 {
        TABLE_TOP + HEADER_HEIGHT + rows as f64 * ROW_HEIGHT + TOTAL_BAND_GAP
    }

    fn draw_header(&self, data: &InvoiceData, canvas: &mut PageCanvas) {
        let box_x = canvas.page().width - MARGIN - HEADER_BOX_WIDTH;

        canvas.draw_text(
            &self.brand.name,
            MARGIN,
            BRAND_Y,
            TextStyle::new(FontFace::Bold, BRAND_SIZE, PRIMARY),
        );
        canvas.draw_text(
            &self.brand.tagline,
            MARGIN,
            TAGLINE_Y,
            TextStyle::new(FontFace::Regular, TAGLINE_SIZE, MUTED),
        );
        canvas.draw_text(
            "INVOICE",
            box_x,
            TITLE_Y,
            TextStyle::new(FontFace::Bold, TITLE_SIZE, PRIMARY)
                .boxed(HEADER_BOX_WIDTH, TextAlign::Right),
        );

        let meta = [
            format!("Invoice #: {}", data.invoice_number),
            format!("Date: {}", format_long_date(data.issued_at)),
            format!("Due Date: {}", format_long_date(data.due_date)),
            format!("Status: {}", data.status.to_uppercase()),
        ];
        let style = TextStyle::new(FontFace::Regular, META_SIZE, TEXT)
            .boxed(HEADER_BOX_WIDTH, TextAlign::Right);
        for (line, text) in meta.iter().enumerate() {
            canvas.draw_text(text, box_x, META_TOP + line as f64 * META_LINE_HEIGHT, style);
        }
    }

    fn draw_bill_to(&self, data: &InvoiceData, canvas: &mut PageCanvas) {
        canvas.draw_text(
            "Bill To:",
            MARGIN,
            BILL_TO_Y,
            TextStyle::new(FontFace::Bold, BILL_TO_LABEL_SIZE, PRIMARY),
        );
        canvas.draw_text(
            &data.student_name,
            MARGIN,
            BILL_TO_NAME_Y,
            TextStyle::new(FontFace::Regular, BILL_TO_NAME_SIZE, TEXT),
        );
        canvas.draw_text(
            &data.student_email,
            MARGIN,
            BILL_TO_EMAIL_Y,
            TextStyle::new(FontFace::Regular, BILL_TO_EMAIL_SIZE, MUTED),
        );
    }

    fn draw_table(&self, data: &InvoiceData, canvas: &mut PageCanvas) {
        canvas.draw_rect(MARGIN, TABLE_TOP, TABLE_WIDTH, HEADER_HEIGHT, Some(PRIMARY), None);
        for column in &COLUMNS {
            canvas.draw_text(
                column.caption,
                column.text_x(),
                TABLE_TOP + CELL_TEXT_OFFSET,
                column.text_style(FontFace::Bold, Color::WHITE),
            );
        }

        for (row, item) in data.items.iter().enumerate() {
            let y = TABLE_TOP + HEADER_HEIGHT + row as f64 * ROW_HEIGHT;
            canvas.draw_rect(MARGIN, y, TABLE_WIDTH, ROW_HEIGHT, Some(ROW_TINTS[row % 2]), None);

            let cells = [
                item.description.clone(),
                format_number(item.quantity),
                format_money(item.unit_price, &data.currency),
                format_money(item.total, &data.currency),
            ];
            for (column, text) in COLUMNS.iter().zip(cells.iter()) {
                let mut style = column.text_style(FontFace::Regular, TEXT);
                if column.align == TextAlign::Left {
                    style = style.clipped();
                }
                canvas.draw_text(text, column.text_x(), y + CELL_TEXT_OFFSET, style);
            }
        }
    }

    fn draw_total(&self, data: &InvoiceData, canvas: &mut PageCanvas) {
        let y = Self::total_band_y(data.items.len());
        canvas.draw_rect(
            TOTAL_BAND_X,
            y,
            TOTAL_BAND_WIDTH,
            TOTAL_BAND_HEIGHT,
            Some(PRIMARY),
            None,
        );
        canvas.draw_text(
            TOTAL_LABEL,
            TOTAL_BAND_X + TOTAL_TEXT_OFFSET,
            y + TOTAL_TEXT_OFFSET,
            TextStyle::new(FontFace::Bold, TOTAL_SIZE, Color::WHITE),
        );
        canvas.draw_text(
            &format_money(data.amount, &data.currency),
            TOTAL_AMOUNT_X,
            y + TOTAL_TEXT_OFFSET,
            TextStyle::new(FontFace::Bold, TOTAL_SIZE, Color::WHITE)
                .boxed(TOTAL_AMOUNT_WIDTH, TextAlign::Right),
        );
    }

    fn draw_footer(&self, canvas: &mut PageCanvas) {
        let height = canvas.page().height;
        canvas.draw_centered_text(
            "Thank you for your business!",
            height - THANKS_BOTTOM_OFFSET,
            TextStyle::new(FontFace::Regular, THANKS_SIZE, TEXT),
        );
        canvas.draw_centered_text(
            &format!(
                "For billing questions, contact {}",
                self.brand.billing_contact
            ),
            height - CONTACT_BOTTOM_OFFSET,
            TextStyle::new(FontFace::Regular, CONTACT_SIZE, MUTED),
        );
    }
}

impl DocumentTemplate for InvoiceTemplate {
    type Data = InvoiceData;

    const KIND: DocumentKind = DocumentKind::Invoice;

    fn identifier<'d>(&self, data: &'d InvoiceData) -> &'d str {
        &data.invoice_number
    }

    fn title(&self, data: &InvoiceData) -> String {
        format!("Invoice {} - {}", data.invoice_number, data.program_title)
    }

    fn layout(&self, data: &InvoiceData, canvas: &mut PageCanvas) {
        self.draw_header(data, canvas);
        self.draw_bill_to(data, canvas);
        self.draw_table(data, canvas);
        self.draw_total(data, canvas);
        self.draw_footer(canvas);
    }
}
