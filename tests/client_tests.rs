#![cfg(feature = "client")]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use chrono::NaiveDate;
use invoice_gen::client::*;
use invoice_gen::core::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn invoice_with_item() -> Invoice {
    InvoiceBuilder::new("ACME Corp", "Client Company")
        .add_item(InvoiceItem::new("Service", 1, dec!(100)).unwrap())
        .build()
        .unwrap()
}

static COUNTER: AtomicUsize = AtomicUsize::new(0);

fn temp_path(name: &str) -> PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "invoice_gen_client_{}_{n}_{name}",
        std::process::id()
    ))
}

// ---------------------------------------------------------------------------
// Minimal one-shot HTTP server (no network beyond loopback)
// ---------------------------------------------------------------------------

/// Serve exactly one request with a canned response; the join handle
/// yields the raw request text.
fn one_shot_server(
    status: u16,
    reason: &str,
    body: &[u8],
) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response_head = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    let body = body.to_vec();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        stream.write_all(response_head.as_bytes()).unwrap();
        stream.write_all(&body).unwrap();
        stream.flush().unwrap();
        request
    });
    (format!("http://{addr}"), handle)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = stream.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&data[..pos]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= pos + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).into_owned()
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_passes_complete_invoice() {
    let client = InvoiceClient::new(None).unwrap();
    assert!(client.validate(&invoice_with_item()).is_empty());
}

#[test]
fn validate_requires_at_least_one_item() {
    let invoice = InvoiceBuilder::new("A", "B").build().unwrap();
    let errors = validate_invoice(&invoice);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("at least one item"));
}

#[test]
fn validate_rejects_due_date_before_invoice_date() {
    let invoice = InvoiceBuilder::new("A", "B")
        .add_item(InvoiceItem::new("Service", 1, dec!(100)).unwrap())
        .date(date(2024, 6, 15))
        .due_date(date(2024, 6, 1))
        .build()
        .unwrap();
    let errors = validate_invoice(&invoice);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("before invoice date"));
}

#[test]
fn validate_allows_due_date_equal_to_invoice_date() {
    let invoice = InvoiceBuilder::new("A", "B")
        .add_item(InvoiceItem::new("Service", 1, dec!(100)).unwrap())
        .date(date(2024, 6, 15))
        .due_date(date(2024, 6, 15))
        .build()
        .unwrap();
    assert!(validate_invoice(&invoice).is_empty());
}

#[test]
fn validate_rejects_overpayment() {
    let invoice = InvoiceBuilder::new("A", "B")
        .add_item(InvoiceItem::new("Service", 1, dec!(100)).unwrap())
        .amount_paid(dec!(150))
        .build()
        .unwrap();
    let errors = validate_invoice(&invoice);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("exceed total"));
}

#[test]
fn validate_accumulates_all_errors() {
    // Empty item list, inverted dates, and overpayment at once:
    // every problem is reported, not just the first.
    let invoice = InvoiceBuilder::new("A", "B")
        .date(date(2024, 6, 15))
        .due_date(date(2024, 5, 1))
        .amount_paid(dec!(10))
        .build()
        .unwrap();
    let errors = validate_invoice(&invoice);
    assert_eq!(errors.len(), 3);
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

#[test]
fn generate_success_writes_response_bytes() {
    let rendered = b"%PDF-1.4 fake rendered document";
    let (url, server) = one_shot_server(200, "OK", rendered);
    let out = temp_path("success.pdf");

    let client = InvoiceClient::with_base_url(url.as_str(), Some("test-key")).unwrap();
    let outcome = client.generate(&invoice_with_item(), InvoiceFormat::Pdf, Some(out.as_path()));

    assert!(outcome.is_saved(), "unexpected outcome: {outcome}");
    assert_eq!(std::fs::read(&out).unwrap(), rendered);
    assert!(outcome.message().contains("Invoice saved as"));

    let request = server.join().unwrap();
    assert!(request.starts_with("POST / HTTP/1.1"));
    assert!(request.to_lowercase().contains("authorization: bearer test-key"));
    assert!(request.to_lowercase().contains("content-type: application/json"));
    assert!(request.contains("\"from\":\"ACME Corp\""));

    let _ = std::fs::remove_file(&out);
}

#[test]
fn generate_ubl_posts_to_ubl_endpoint() {
    let (url, server) = one_shot_server(200, "OK", b"<Invoice/>");
    let out = temp_path("einvoice.xml");

    let client = InvoiceClient::with_base_url(url.as_str(), None).unwrap();
    let outcome = client.generate(&invoice_with_item(), InvoiceFormat::Ubl, Some(out.as_path()));

    assert!(outcome.is_saved());
    let request = server.join().unwrap();
    assert!(request.starts_with("POST /ubl HTTP/1.1"));
    assert!(!request.to_lowercase().contains("authorization:"));

    let _ = std::fs::remove_file(&out);
}

#[test]
fn generate_http_error_reports_status_and_body() {
    let (url, server) = one_shot_server(500, "Internal Server Error", b"server error");
    let out = temp_path("never_written.pdf");

    let client = InvoiceClient::with_base_url(url.as_str(), None).unwrap();
    let outcome = client.generate(&invoice_with_item(), InvoiceFormat::Pdf, Some(out.as_path()));

    match &outcome {
        GenerateOutcome::Failed(GenerateError::Http { status, body }) => {
            assert_eq!(*status, 500);
            assert_eq!(body, "server error");
        }
        other => panic!("expected HTTP failure, got {other:?}"),
    }
    let message = outcome.message();
    assert!(message.contains("500"));
    assert!(message.contains("server error"));
    // The output file must not be created on a failed render.
    assert!(!out.exists());

    server.join().unwrap();
}

#[test]
fn generate_connection_refused_is_distinct() {
    // Bind then drop to obtain a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = InvoiceClient::with_base_url(format!("http://{addr}"), None).unwrap();
    let outcome = client.generate(&invoice_with_item(), InvoiceFormat::Pdf, Some(temp_path("refused.pdf").as_path()));

    assert_eq!(
        outcome,
        GenerateOutcome::Failed(GenerateError::Connect),
        "expected connection failure, got {outcome}"
    );
    assert_eq!(outcome.message(), "Error: Unable to connect to the API");
}

#[test]
fn generate_file_save_failure_is_distinct() {
    let (url, server) = one_shot_server(200, "OK", b"%PDF-1.4");
    // A path whose parent directory does not exist.
    let out = temp_path("missing_dir").join("out.pdf");

    let client = InvoiceClient::with_base_url(url.as_str(), None).unwrap();
    let outcome = client.generate(&invoice_with_item(), InvoiceFormat::Pdf, Some(out.as_path()));

    assert!(matches!(
        outcome,
        GenerateOutcome::Failed(GenerateError::FileSave(_))
    ));
    assert!(outcome.message().starts_with("Error saving file"));

    server.join().unwrap();
}

// ---------------------------------------------------------------------------
// static enumerations
// ---------------------------------------------------------------------------

#[test]
fn supported_enumerations_need_no_network() {
    let client = InvoiceClient::new(None).unwrap();
    assert_eq!(
        client.supported_currencies(),
        ["AUD", "CAD", "EUR", "GBP", "JPY", "USD"]
    );
    assert_eq!(client.supported_languages(), ["de", "en", "es", "fr", "th"]);
}
