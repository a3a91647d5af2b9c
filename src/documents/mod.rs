//! Documents module - renders completion certificates and invoices to PDF.
//!
//! - `certificate` - landscape completion certificate
//! - `invoice` - portrait itemized invoice
//! - `engine` - `DocumentGenerator`, which owns the output file lifecycle
//!
//! Templates only record draw commands on a [`canvas::PageCanvas`]; the
//! [`pdf`] backend encodes them.

pub mod canvas;
pub mod certificate;
pub mod common;
pub mod engine;
pub mod invoice;
pub mod metrics;
pub mod pdf;
pub mod traits;
pub mod validation;

pub use canvas::{PageCanvas, PageSize};
pub use certificate::{CertificateData, CertificateTemplate};
pub use engine::{DocumentGenerator, DocumentRequest, RenderedDocument};
pub use invoice::{InvoiceData, InvoiceItem, InvoiceTemplate};
pub use metrics::{FontFace, TextMeasurer};
pub use traits::{DocumentTemplate, Validator};
pub use validation::{ValidationError, ValidationErrors};

use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The two document kinds the engine can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Certificate,
    Invoice,
}

impl DocumentKind {
    /// Directory (and public path segment) holding documents of this kind.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Certificate => "certificates",
            Self::Invoice => "invoices",
        }
    }

    pub fn page_size(&self) -> PageSize {
        match self {
            Self::Certificate => PageSize::A4_LANDSCAPE,
            Self::Invoice => PageSize::A4_PORTRAIT,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Certificate => "Certificate",
            Self::Invoice => "Invoice",
        }
    }
}

/// Errors that can occur during document generation.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid document data: {0}")]
    Input(#[from] ValidationErrors),
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to open output file {path}: {source}")]
    OpenSink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write output file {path}: {source}")]
    WriteSink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to finish output file {path}: {source}")]
    FinishSink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode PDF: {0}")]
    Encode(String),
}

impl DocumentError {
    /// Malformed request data, detected before any I/O.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    /// The underlying OS error for filesystem failures.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::CreateDir { source, .. }
            | Self::OpenSink { source, .. }
            | Self::WriteSink { source, .. }
            | Self::FinishSink { source, .. } => Some(source),
            Self::Input(_) | Self::Encode(_) => None,
        }
    }
}
