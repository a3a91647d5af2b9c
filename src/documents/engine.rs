//! Document generation engine.
//!
//! Owns the output lifecycle: validate the request, make sure the output
//! directory exists, lay the page out and encode it, open the file, write,
//! then flush and sync before reporting success. A caller only sees a path once the
//! bytes are on disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::canvas::PageCanvas;
use super::certificate::{CertificateData, CertificateTemplate};
use super::invoice::{InvoiceData, InvoiceTemplate};
use super::pdf::render_page;
use super::traits::{DocumentTemplate, Validator};
use super::{DocumentError, DocumentKind};
use crate::config::DocgenConfig;

/// One generation request: the document kind together with its data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DocumentRequest {
    Certificate(CertificateData),
    Invoice(InvoiceData),
}

impl DocumentRequest {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Certificate(_) => DocumentKind::Certificate,
            Self::Invoice(_) => DocumentKind::Invoice,
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            Self::Certificate(data) => &data.certificate_number,
            Self::Invoice(data) => &data.invoice_number,
        }
    }
}

impl From<CertificateData> for DocumentRequest {
    fn from(data: CertificateData) -> Self {
        Self::Certificate(data)
    }
}

impl From<InvoiceData> for DocumentRequest {
    fn from(data: InvoiceData) -> Self {
        Self::Invoice(data)
    }
}

/// A document rendered in memory.
#[derive(Debug)]
pub struct RenderedDocument {
    pub kind: DocumentKind,
    pub filename: String,
    pub pdf: Vec<u8>,
}

/// Stateless between calls apart from its configuration; safe to share
/// across tasks.
#[derive(Debug, Clone)]
pub struct DocumentGenerator {
    config: DocgenConfig,
    certificates: CertificateTemplate,
    invoices: InvoiceTemplate,
}

impl DocumentGenerator {
    pub fn new(config: DocgenConfig) -> Self {
        let certificates = CertificateTemplate::new(config.brand.clone());
        let invoices = InvoiceTemplate::new(config.brand.clone());
        Self {
            config,
            certificates,
            invoices,
        }
    }

    pub fn config(&self) -> &DocgenConfig {
        &self.config
    }

    /// Directory holding documents of `kind`.
    pub fn output_dir(&self, kind: DocumentKind) -> PathBuf {
        self.config.uploads_dir.join(kind.dir_name())
    }

    /// Public path under which a generated file is served.
    pub fn public_path(&self, kind: DocumentKind, filename: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.public_prefix.trim_end_matches('/'),
            kind.dir_name(),
            filename
        )
    }

    /// Generate the document, write it to disk and return its public path.
    pub async fn generate(&self, request: DocumentRequest) -> Result<String, DocumentError> {
        match &request {
            DocumentRequest::Certificate(data) => self.write_document(&self.certificates, data).await,
            DocumentRequest::Invoice(data) => self.write_document(&self.invoices, data).await,
        }
    }

    pub async fn generate_certificate(&self, data: CertificateData) -> Result<String, DocumentError> {
        self.generate(DocumentRequest::Certificate(data)).await
    }

    pub async fn generate_invoice(&self, data: InvoiceData) -> Result<String, DocumentError> {
        self.generate(DocumentRequest::Invoice(data)).await
    }

    /// Validate and lay out a request without encoding it.
    pub fn layout(&self, request: &DocumentRequest) -> Result<PageCanvas, DocumentError> {
        match request {
            DocumentRequest::Certificate(data) => layout_page(&self.certificates, data),
            DocumentRequest::Invoice(data) => layout_page(&self.invoices, data),
        }
    }

    /// Render a request to PDF bytes in memory. Touches no files.
    pub fn render(&self, request: &DocumentRequest) -> Result<RenderedDocument, DocumentError> {
        match request {
            DocumentRequest::Certificate(data) => render_document(&self.certificates, data),
            DocumentRequest::Invoice(data) => render_document(&self.invoices, data),
        }
    }

    async fn write_document<T: DocumentTemplate>(
        &self,
        template: &T,
        data: &T::Data,
    ) -> Result<String, DocumentError> {
        let kind = T::KIND;
        let identifier = template.identifier(data);

        if let Err(errors) = data.validate() {
            log::warn!("Rejected {} {}: {}", kind.label(), identifier, errors);
            return Err(errors.into());
        }

        let dir = self.output_dir(kind);
        fs::create_dir_all(&dir).await.map_err(|source| {
            log::error!("Failed to create {}: {}", dir.display(), source);
            DocumentError::CreateDir {
                path: dir.clone(),
                source,
            }
        })?;

        // Encoded before the file is opened; a failed encode leaves any
        // earlier file at this path intact.
        let mut canvas = PageCanvas::new(kind.page_size());
        template.layout(data, &mut canvas);
        let bytes = render_page(&canvas, &template.title(data)).map_err(|err| {
            log::error!("Failed to encode {} {}: {}", kind.label(), identifier, err);
            err
        })?;

        let filename = file_name(identifier);
        let path = dir.join(&filename);
        log::debug!("Writing {} to {}", kind.label(), path.display());

        let mut sink = fs::File::create(&path)
            .await
            .map_err(|source| sink_error(&path, source, SinkStage::Open))?;

        sink.write_all(&bytes)
            .await
            .map_err(|source| sink_error(&path, source, SinkStage::Write))?;
        sink.flush()
            .await
            .map_err(|source| sink_error(&path, source, SinkStage::Finish))?;
        sink.sync_all()
            .await
            .map_err(|source| sink_error(&path, source, SinkStage::Finish))?;
        drop(sink);

        let public = self.public_path(kind, &filename);
        log::info!(
            "Generated {} {} ({} bytes) at {}",
            kind.label(),
            identifier,
            bytes.len(),
            public
        );
        Ok(public)
    }
}

enum SinkStage {
    Open,
    Write,
    Finish,
}

fn sink_error(path: &Path, source: std::io::Error, stage: SinkStage) -> DocumentError {
    log::error!("Output file {} failed: {}", path.display(), source);
    let path = path.to_path_buf();
    match stage {
        SinkStage::Open => DocumentError::OpenSink { path, source },
        SinkStage::Write => DocumentError::WriteSink { path, source },
        SinkStage::Finish => DocumentError::FinishSink { path, source },
    }
}

fn file_name(identifier: &str) -> String {
    format!("{}.pdf", identifier)
}

fn layout_page<T: DocumentTemplate>(
    template: &T,
    data: &T::Data,
) -> Result<PageCanvas, DocumentError> {
    data.validate()?;
    let mut canvas = PageCanvas::new(T::KIND.page_size());
    template.layout(data, &mut canvas);
    Ok(canvas)
}

fn render_document<T: DocumentTemplate>(
    template: &T,
    data: &T::Data,
) -> Result<RenderedDocument, DocumentError> {
    let canvas = layout_page(template, data)?;
    let pdf = render_page(&canvas, &template.title(data))?;
    Ok(RenderedDocument {
        kind: T::KIND,
        filename: file_name(template.identifier(data)),
        pdf,
    })
}
