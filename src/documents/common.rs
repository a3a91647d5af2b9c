//! Common utilities for document generation.
//!
//! Date, money and text encoding helpers shared by both templates. All
//! formatting is pinned here rather than taken from the host locale.

use chrono::NaiveDate;

/// Format a date in long English form (e.g., "January 1, 2025").
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a date range as "<long start> - <long end>".
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", format_long_date(start), format_long_date(end))
}

/// Insert a comma between every group of three digits.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

/// Format a finite number with thousands grouping.
///
/// Values are rounded to two decimals; whole values print without a
/// fractional part ("1,500"), others keep two digits ("1,500.50").
/// Works on the decimal expansion of the value, so magnitudes beyond any
/// integer type still print every digit.
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    let whole = group_thousands(whole);

    if fraction == "00" {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    }
}

/// Format an amount with its currency code prefix (e.g., "RWF 1,250,000").
///
/// Invoices reject a blank currency during validation, so the prefix is
/// always present.
pub fn format_money(value: f64, currency: &str) -> String {
    format!("{} {}", currency.trim(), format_number(value))
}

/// Encode text as WinAnsi bytes for the standard PDF fonts.
///
/// Characters the encoding cannot represent become `?`; control characters
/// (tabs and line breaks included) become spaces.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_code).collect()
}

fn win_ansi_code(ch: char) -> u8 {
    match ch {
        c if c.is_control() => b' ',
        ' '..='~' => ch as u8,
        '\u{A0}'..='\u{FF}' => ch as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}
