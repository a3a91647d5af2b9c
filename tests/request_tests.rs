use academy_docgen::documents::{CertificateData, InvoiceData};
use academy_docgen::{DocumentKind, DocumentRequest};
use chrono::NaiveDate;

#[test]
fn test_certificate_deserialization() {
    let json = r#"{
        "certificateNumber": "CM-2025-001",
        "studentName": "Jean Paul",
        "programTitle": "Software Development",
        "duration": "6 months",
        "startDate": "2025-01-01",
        "endDate": "2025-06-30",
        "completionDate": "2025-07-01",
        "trainerName": "Marie Claire",
        "skills": ["React", "Node.js"],
        "finalGrade": "A"
    }"#;

    let data: CertificateData = serde_json::from_str(json).unwrap();
    assert_eq!(data.certificate_number, "CM-2025-001");
    assert_eq!(data.start_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    assert_eq!(data.skills, vec!["React", "Node.js"]);
    assert_eq!(data.grade(), Some("A"));
}

#[test]
fn test_certificate_optional_fields_default() {
    let json = r#"{
        "certificateNumber": "CM-2025-002",
        "studentName": "Aline",
        "programTitle": "UI Design",
        "duration": "3 months",
        "startDate": "2025-01-01",
        "endDate": "2025-03-31",
        "completionDate": "2025-04-01",
        "trainerName": "Eric",
        "finalGrade": null
    }"#;

    let data: CertificateData = serde_json::from_str(json).unwrap();
    assert!(data.skills.is_empty());
    assert_eq!(data.grade(), None);
}

#[test]
fn test_invalid_date_is_rejected() {
    let json = r#"{
        "certificateNumber": "CM-2025-003",
        "studentName": "Aline",
        "programTitle": "UI Design",
        "duration": "3 months",
        "startDate": "2025-02-30",
        "endDate": "2025-03-31",
        "completionDate": "2025-04-01",
        "trainerName": "Eric"
    }"#;

    assert!(serde_json::from_str::<CertificateData>(json).is_err());
}

#[test]
fn test_invoice_deserialization() {
    let json = r#"{
        "invoiceNumber": "INV-2025-0042",
        "studentName": "Jean Paul",
        "studentEmail": "jean.paul@example.com",
        "programTitle": "Software Development",
        "amount": 1250000,
        "currency": "RWF",
        "issuedAt": "2025-03-01",
        "dueDate": "2025-03-31",
        "items": [
            { "description": "Tuition", "quantity": 1, "unitPrice": 1250000, "total": 1250000 }
        ],
        "status": "pending"
    }"#;

    let data: InvoiceData = serde_json::from_str(json).unwrap();
    assert_eq!(data.amount, 1250000.0);
    assert_eq!(data.items.len(), 1);
    assert_eq!(data.items[0].unit_price, 1250000.0);
}

#[test]
fn test_invoice_missing_field_is_rejected() {
    let json = r#"{
        "invoiceNumber": "INV-2025-0043",
        "studentName": "Jean Paul",
        "amount": 10,
        "currency": "RWF",
        "issuedAt": "2025-03-01",
        "dueDate": "2025-03-31",
        "status": "pending"
    }"#;

    assert!(serde_json::from_str::<InvoiceData>(json).is_err());
}

#[test]
fn test_tagged_request() {
    let json = r#"{
        "kind": "certificate",
        "certificateNumber": "CM-2025-004",
        "studentName": "Jean Paul",
        "programTitle": "Software Development",
        "duration": "6 months",
        "startDate": "2025-01-01",
        "endDate": "2025-06-30",
        "completionDate": "2025-07-01",
        "trainerName": "Marie Claire"
    }"#;

    let request: DocumentRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.kind(), DocumentKind::Certificate);
    assert_eq!(request.kind().dir_name(), "certificates");
    assert_eq!(request.identifier(), "CM-2025-004");
}
