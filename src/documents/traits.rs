//! Traits shared by the certificate and invoice templates.

use super::canvas::PageCanvas;
use super::validation::ValidationErrors;
use super::DocumentKind;

/// Trait for validating request objects.
pub trait Validator {
    /// Collect every problem with the data; never performs I/O.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// A single-page layout that turns one DTO into draw commands.
///
/// `layout` expects data that already passed [`Validator::validate`];
/// the generator always validates first.
pub trait DocumentTemplate {
    type Data: Validator;

    const KIND: DocumentKind;

    /// Business identifier, used as the output file stem.
    fn identifier<'d>(&self, data: &'d Self::Data) -> &'d str;

    /// Value of the PDF `/Title` entry.
    fn title(&self, data: &Self::Data) -> String;

    fn layout(&self, data: &Self::Data, canvas: &mut PageCanvas);
}
