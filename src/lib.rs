pub mod config;
pub mod documents;

pub use crate::config::{BrandConfig, DocgenConfig};
pub use crate::documents::{
    DocumentError, DocumentGenerator, DocumentKind, DocumentRequest, RenderedDocument,
};
