//! Built-in font metrics and text measurement.
//!
//! Widths come from the Adobe core-font AFM tables for Helvetica and
//! Helvetica-Bold, indexed by WinAnsi code. Every backend measures through
//! this table so centering math is reproducible no matter how the page is
//! eventually encoded.

use super::common::encode_win_ansi;

/// Font faces available to templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    /// PostScript name of the standard font backing this face.
    pub fn base_font(&self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
        }
    }

    /// Resource name used inside page content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }

    /// Distance from the top of the line box to the baseline, in points.
    pub fn ascent(&self, size: f64) -> f64 {
        ASCENDER * size / 1000.0
    }

    fn ascii_widths(&self) -> &'static [u16; 95] {
        match self {
            Self::Regular => &HELVETICA_ASCII,
            Self::Bold => &HELVETICA_BOLD_ASCII,
        }
    }

    fn symbol_widths(&self) -> &'static [u16; 64] {
        match self {
            Self::Regular => &HELVETICA_SYMBOLS,
            Self::Bold => &HELVETICA_BOLD_SYMBOLS,
        }
    }

    fn latin1_widths(&self) -> &'static [u16; 64] {
        match self {
            Self::Regular => &HELVETICA_LATIN1,
            Self::Bold => &HELVETICA_BOLD_LATIN1,
        }
    }
}

const ASCENDER: f64 = 718.0;
const UNMAPPED_WIDTH: u16 = 0;

/// Code points 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// WinAnsi codes 0x80..=0xBF: punctuation, Latin Extended letters and
/// Latin-1 symbols. The five codes WinAnsi leaves unassigned (0x81, 0x8D,
/// 0x8F, 0x90, 0x9D) carry the 556 `.notdef` placeholder and are never
/// produced by the encoder.
#[rustfmt::skip]
const HELVETICA_SYMBOLS: [u16; 64] = [
    556, 556, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 556, 611, 556,
    556, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 556, 500, 667,
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
];

#[rustfmt::skip]
const HELVETICA_BOLD_SYMBOLS: [u16; 64] = [
    556, 556, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 556, 611, 556,
    556, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 556, 500, 667,
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
];

/// Code points 0xC0..=0xFF (accented Latin-1 letters).
#[rustfmt::skip]
const HELVETICA_LATIN1: [u16; 64] = [
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

#[rustfmt::skip]
const HELVETICA_BOLD_LATIN1: [u16; 64] = [
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

/// Deterministic glyph-width lookup for the built-in faces.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextMeasurer;

impl TextMeasurer {
    pub fn new() -> Self {
        Self
    }

    /// Width of `text` set in `face` at `size` points.
    ///
    /// Characters outside WinAnsi are measured as the `?` they are rendered
    /// as.
    ///
    /// # Panics
    /// Panics when `size` is not a finite, strictly positive number.
    pub fn width_of(&self, text: &str, face: FontFace, size: f64) -> f64 {
        assert!(
            size.is_finite() && size > 0.0,
            "font size must be finite and positive, got {size}"
        );

        let units: u32 = encode_win_ansi(text)
            .into_iter()
            .map(|code| u32::from(glyph_units(code, face)))
            .sum();

        f64::from(units) * size / 1000.0
    }
}

/// Advance width of one WinAnsi code in 1/1000 em.
pub fn glyph_units(code: u8, face: FontFace) -> u16 {
    match code {
        0x20..=0x7E => face.ascii_widths()[usize::from(code - 0x20)],
        0x80..=0xBF => face.symbol_widths()[usize::from(code - 0x80)],
        0xC0..=0xFF => face.latin1_widths()[usize::from(code - 0xC0)],
        // Control codes never leave the encoder.
        _ => UNMAPPED_WIDTH,
    }
}
