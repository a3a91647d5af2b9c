use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use academy_docgen::documents::{CertificateData, InvoiceData};
use academy_docgen::{DocgenConfig, DocumentGenerator, DocumentRequest};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Certificate,
    Invoice,
}

/// Render a certificate or invoice from a JSON data file.
#[derive(Debug, Parser)]
#[command(name = "academy-docgen", version)]
struct Cli {
    /// Document kind to generate
    #[arg(value_enum)]
    kind: Kind,

    /// JSON file holding the certificate or invoice data
    input: PathBuf,

    /// Override DOCGEN_UPLOADS_DIR
    #[arg(long)]
    uploads_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = DocgenConfig::from_env();
    if let Some(dir) = cli.uploads_dir {
        config.uploads_dir = dir;
    }

    let raw = tokio::fs::read_to_string(&cli.input)
        .await
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let request = match cli.kind {
        Kind::Certificate => DocumentRequest::Certificate(
            serde_json::from_str::<CertificateData>(&raw).context("invalid certificate data")?,
        ),
        Kind::Invoice => DocumentRequest::Invoice(
            serde_json::from_str::<InvoiceData>(&raw).context("invalid invoice data")?,
        ),
    };

    let path = DocumentGenerator::new(config)
        .generate(request)
        .await
        .context("document generation failed")?;

    println!("{}", path);
    Ok(())
}
