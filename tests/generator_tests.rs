//! End-to-end tests for `DocumentGenerator`: files on disk, returned paths,
//! error classes and concurrent calls.

use academy_docgen::documents::{CertificateData, InvoiceData, InvoiceItem};
use academy_docgen::{DocgenConfig, DocumentError, DocumentGenerator, DocumentRequest};
use chrono::NaiveDate;
use std::fs;
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn certificate(number: &str) -> CertificateData {
    CertificateData {
        certificate_number: number.to_string(),
        student_name: "Jean Paul".to_string(),
        program_title: "Software Development".to_string(),
        duration: "6 months".to_string(),
        start_date: date(2025, 1, 1),
        end_date: date(2025, 6, 30),
        completion_date: date(2025, 7, 1),
        trainer_name: "Marie Claire".to_string(),
        skills: vec!["React".to_string(), "Node.js".to_string()],
        final_grade: Some("A".to_string()),
    }
}

fn invoice(number: &str, items: Vec<InvoiceItem>, amount: f64) -> InvoiceData {
    InvoiceData {
        invoice_number: number.to_string(),
        student_name: "Aline Uwase".to_string(),
        student_email: "aline@example.com".to_string(),
        program_title: "Data Science".to_string(),
        amount,
        currency: "RWF".to_string(),
        issued_at: date(2025, 2, 1),
        due_date: date(2025, 2, 28),
        items,
        status: "unpaid".to_string(),
    }
}

fn generator_in(dir: &std::path::Path) -> DocumentGenerator {
    DocumentGenerator::new(DocgenConfig::with_uploads_dir(dir))
}

fn page_count(path: &std::path::Path) -> usize {
    lopdf::Document::load(path).unwrap().get_pages().len()
}

#[tokio::test]
async fn test_certificate_scenario() {
    let dir = tempdir().unwrap();
    let generator = generator_in(dir.path());

    let path = generator
        .generate_certificate(certificate("CM-2025-001"))
        .await
        .unwrap();
    assert_eq!(path, "/uploads/certificates/CM-2025-001.pdf");

    let file = dir.path().join("certificates").join("CM-2025-001.pdf");
    let bytes = fs::read(&file).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(page_count(&file), 1);

    let canvas = generator
        .layout(&DocumentRequest::Certificate(certificate("CM-2025-001")))
        .unwrap();
    assert_eq!(canvas.circles().count(), 1);
    let skills: Vec<_> = canvas
        .texts()
        .filter(|text| text.text == "React • Node.js")
        .collect();
    assert_eq!(skills.len(), 1);
}

#[tokio::test]
async fn test_invoice_without_items() {
    let dir = tempdir().unwrap();
    let generator = generator_in(dir.path());
    let data = invoice("INV-2025-0001", Vec::new(), 0.0);

    let path = generator.generate_invoice(data.clone()).await.unwrap();
    assert_eq!(path, "/uploads/invoices/INV-2025-0001.pdf");
    assert_eq!(page_count(&dir.path().join("invoices/INV-2025-0001.pdf")), 1);

    let canvas = generator.layout(&DocumentRequest::Invoice(data)).unwrap();
    assert!(canvas.find_text("Description").is_some());
    assert!(canvas.find_text("TOTAL:").is_some());
    assert!(canvas.find_text("RWF 0").is_some());
}

#[tokio::test]
async fn test_invoice_total_is_not_recomputed() {
    let dir = tempdir().unwrap();
    let generator = generator_in(dir.path());
    let items = vec![
        InvoiceItem {
            description: "Tuition".to_string(),
            quantity: 1.0,
            unit_price: 400000.0,
            total: 400000.0,
        },
        InvoiceItem {
            description: "Laptop rental".to_string(),
            quantity: 2.0,
            unit_price: 50000.0,
            total: 100000.0,
        },
    ];
    let request = DocumentRequest::Invoice(invoice("INV-2025-0002", items, 450000.0));

    let canvas = generator.layout(&request).unwrap();
    assert!(canvas.find_text("RWF 450,000").is_some());
    assert!(canvas.find_text("RWF 500,000").is_none());

    generator.generate(request).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_distinct_identifiers() {
    let dir = tempdir().unwrap();
    let generator = generator_in(dir.path());

    let (first, second) = tokio::join!(
        generator.generate_certificate(certificate("CM-2025-010")),
        generator.generate_certificate(certificate("CM-2025-011")),
    );
    assert_eq!(first.unwrap(), "/uploads/certificates/CM-2025-010.pdf");
    assert_eq!(second.unwrap(), "/uploads/certificates/CM-2025-011.pdf");

    let a = dir.path().join("certificates/CM-2025-010.pdf");
    let b = dir.path().join("certificates/CM-2025-011.pdf");
    assert_eq!(page_count(&a), 1);
    assert_eq!(page_count(&b), 1);
    assert_ne!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
}

#[tokio::test]
async fn test_many_concurrent_calls_share_directory_creation() {
    let dir = tempdir().unwrap();
    let generator = generator_in(dir.path());

    let calls = (0..8).map(|i| {
        let generator = &generator;
        async move {
            let number = format!("INV-BATCH-{i}");
            generator
                .generate_invoice(invoice(&number, Vec::new(), i as f64 * 1000.0))
                .await
        }
    });
    let results = futures::future::join_all(calls).await;

    for (i, result) in results.into_iter().enumerate() {
        assert_eq!(result.unwrap(), format!("/uploads/invoices/INV-BATCH-{i}.pdf"));
    }
    assert_eq!(fs::read_dir(dir.path().join("invoices")).unwrap().count(), 8);
}

#[tokio::test]
async fn test_regenerating_overwrites_previous_file() {
    let dir = tempdir().unwrap();
    let generator = generator_in(dir.path());

    let first = generator
        .generate_certificate(certificate("CM-2025-020"))
        .await
        .unwrap();
    let mut updated = certificate("CM-2025-020");
    updated.final_grade = None;
    let second = generator.generate_certificate(updated).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_dir(dir.path().join("certificates")).unwrap().count(), 1);
}

#[tokio::test]
async fn test_input_error_happens_before_any_io() {
    let dir = tempdir().unwrap();
    let generator = generator_in(dir.path());

    let mut data = certificate("");
    data.student_name = String::new();
    let err = generator.generate_certificate(data).await.unwrap_err();

    assert!(err.is_input_error());
    assert!(err.io_error().is_none());
    match err {
        DocumentError::Input(errors) => {
            assert!(errors.has_field("certificateNumber"));
            assert!(errors.has_field("studentName"));
        }
        other => panic!("expected input error, got {other:?}"),
    }
    assert!(!dir.path().join("certificates").exists());
}

#[tokio::test]
async fn test_non_finite_amount_is_input_error() {
    let dir = tempdir().unwrap();
    let generator = generator_in(dir.path());

    let err = generator
        .generate_invoice(invoice("INV-NAN", Vec::new(), f64::NAN))
        .await
        .unwrap_err();
    assert!(err.is_input_error());
    assert!(!dir.path().join("invoices").exists());
}

#[tokio::test]
async fn test_directory_failure_surfaces_io_error() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, b"occupied").unwrap();
    let generator = generator_in(&blocker);

    let err = generator
        .generate_certificate(certificate("CM-2025-030"))
        .await
        .unwrap_err();

    assert!(matches!(err, DocumentError::CreateDir { .. }));
    assert!(!err.is_input_error());
    assert!(err.io_error().is_some());
}

#[tokio::test]
async fn test_open_failure_surfaces_io_error() {
    let dir = tempdir().unwrap();
    // A directory squatting on the output file name makes the open fail.
    fs::create_dir_all(dir.path().join("invoices/INV-2025-0040.pdf")).unwrap();
    let generator = generator_in(dir.path());

    let err = generator
        .generate_invoice(invoice("INV-2025-0040", Vec::new(), 0.0))
        .await
        .unwrap_err();

    assert!(matches!(err, DocumentError::OpenSink { .. }));
    assert!(err.io_error().is_some());
}

#[cfg(unix)]
#[tokio::test]
async fn test_full_device_surfaces_write_error() {
    let full = std::path::Path::new("/dev/full");
    if !full.exists() {
        return;
    }

    let dir = tempdir().unwrap();
    let target = dir.path().join("certificates");
    fs::create_dir_all(&target).unwrap();
    std::os::unix::fs::symlink(full, target.join("CM-2025-060.pdf")).unwrap();
    let generator = generator_in(dir.path());

    let err = generator
        .generate_certificate(certificate("CM-2025-060"))
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            DocumentError::WriteSink { .. } | DocumentError::FinishSink { .. }
        ),
        "unexpected error: {err:?}"
    );
    assert!(!err.is_input_error());
    assert!(err.io_error().is_some());
}

#[tokio::test]
async fn test_custom_public_prefix() {
    let dir = tempdir().unwrap();
    let mut config = DocgenConfig::with_uploads_dir(dir.path());
    config.public_prefix = "/static/files".to_string();
    let generator = DocumentGenerator::new(config);

    let path = generator
        .generate_invoice(invoice("INV-2025-0050", Vec::new(), 0.0))
        .await
        .unwrap();
    assert_eq!(path, "/static/files/invoices/INV-2025-0050.pdf");
}

#[test]
fn test_render_in_memory_touches_no_files() {
    let dir = tempdir().unwrap();
    let generator = generator_in(dir.path());

    let rendered = generator
        .render(&DocumentRequest::Certificate(certificate("CM-2025-040")))
        .unwrap();
    assert_eq!(rendered.filename, "CM-2025-040.pdf");
    assert!(rendered.pdf.starts_with(b"%PDF"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_layout_is_deterministic_across_calls() {
    let generator = DocumentGenerator::new(DocgenConfig::default());
    let request = DocumentRequest::Certificate(certificate("CM-2025-050"));

    let first = generator.layout(&request).unwrap();
    let second = generator.layout(&request).unwrap();
    assert_eq!(first.commands(), second.commands());
}
