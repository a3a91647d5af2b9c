//! Input validation for document requests.
//!
//! Every problem in a request is collected before failing so the caller sees
//! the full list at once. Validation never touches the filesystem.

use std::fmt;

/// Validation error with a field path and a human-readable message.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The field that failed validation (e.g. "items[2].unitPrice")
    pub field: String,
    pub message: String,
    /// Suggestion for how to fix the error
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create error for empty required field
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} must not be empty", label))
            .with_suggestion(format!("Provide a value for {}", label.to_lowercase()))
    }

    /// Create error for an identifier that cannot be used as a file name
    pub fn unsafe_identifier(field: &str, value: &str) -> Self {
        Self::new(
            field,
            format!("'{}' cannot be used as a document file name", value),
        )
        .with_suggestion("Use letters, digits, '-' or '_' only, e.g. CM-2025-001")
    }

    /// Create error for NaN or infinite numbers
    pub fn non_finite(field: &str, value: f64) -> Self {
        Self::new(field, format!("{} is not a finite number", value))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Whether any collected error points at `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    /// Ok if no errors were collected, otherwise the collection itself.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

/// Validate a document identifier used verbatim as the output file stem
pub fn validate_identifier(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
        return;
    }

    let is_safe = value == sanitize_filename::sanitize(value)
        && value.trim() == value
        && !value.contains(['/', '\\'])
        && value != "."
        && value != "..";

    if !is_safe {
        errors.add(ValidationError::unsafe_identifier(field, value));
    }
}

/// Validate that a number is neither NaN nor infinite
pub fn validate_finite(value: f64, field: &str, errors: &mut ValidationErrors) {
    if !value.is_finite() {
        errors.add(ValidationError::non_finite(field, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank() {
        let mut errors = ValidationErrors::new();
        validate_required("   ", "studentName", "Student name", &mut errors);
        assert_eq!(errors.len(), 1);
        assert!(errors.has_field("studentName"));
    }

    #[test]
    fn test_identifier_accepts_business_keys() {
        let mut errors = ValidationErrors::new();
        validate_identifier("CM-2025-001", "certificateNumber", "Certificate number", &mut errors);
        validate_identifier("INV_2025_0042", "invoiceNumber", "Invoice number", &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_identifier_rejects_path_tricks() {
        for bad in ["../etc/passwd", "a/b", "a\\b", "..", "a:b", " padded"] {
            let mut errors = ValidationErrors::new();
            validate_identifier(bad, "invoiceNumber", "Invoice number", &mut errors);
            assert_eq!(errors.len(), 1, "expected '{}' to be rejected", bad);
        }
    }

    #[test]
    fn test_finite() {
        let mut errors = ValidationErrors::new();
        validate_finite(1.0, "amount", &mut errors);
        validate_finite(f64::NAN, "items[0].quantity", &mut errors);
        validate_finite(f64::INFINITY, "items[1].total", &mut errors);
        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("items[0].quantity"));
    }

    #[test]
    fn test_display_lists_every_error() {
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::empty_field("studentName", "Student name"));
        errors.add(ValidationError::non_finite("amount", f64::NAN));
        let message = errors.to_string();
        assert!(message.starts_with("2 validation error(s)"));
        assert!(message.contains("1. [studentName]"));
        assert!(message.contains("2. [amount]"));
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::new("x", "bad"));
        assert!(errors.into_result().is_err());
    }
}
