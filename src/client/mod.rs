//! Blocking client for the invoice rendering API.
//!
//! One render request is one blocking HTTP POST. The client holds only the
//! transport session and credential; it never retains or mutates the
//! invoices it is given. It is not meant for concurrent use from multiple
//! threads — create independent clients or serialize access.
//!
//! Generation never panics or returns `Err` across its boundary: every
//! failure mode (timeout, connection refused, non-200 status, local write
//! failure) is folded into a [`GenerateOutcome`] whose `Display` text a
//! thin UI can show directly.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use thiserror::Error;

use crate::core::{
    Invoice, InvoiceFormat, SUPPORTED_CURRENCIES, SUPPORTED_LANGUAGES, ValidationError,
    sanitize_filename,
};

/// Production endpoint of the rendering service.
pub const BASE_URL: &str = "https://invoice-generator.com";

/// Client identifier sent with every request.
const CLIENT_IDENT: &str = "invoice-gen-rust-client/0.1";

/// Fixed per-request timeout. On expiry the request surfaces as
/// [`GenerateError::Timeout`]; no partial local state is left behind.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure to construct the client itself (transport setup or a
/// credential that cannot be sent as a header).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    #[error("failed to build HTTP transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API key contains characters not valid in a header")]
    InvalidApiKey,
}

/// A single failure mode of a generation attempt.
///
/// The `Display` text mirrors what the service's users have come to
/// expect: every message starts with "Error", so the rendered string
/// doubles as a discriminator for callers that only look at text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GenerateError {
    /// The service answered with a non-200 status. The body is its error
    /// description. No file was created or overwritten.
    #[error("Error {status}: {body}")]
    Http { status: u16, body: String },

    /// The request exceeded the 30-second timeout.
    #[error("Error: Request timed out")]
    Timeout,

    /// TCP/TLS connection could not be established.
    #[error("Error: Unable to connect to the API")]
    Connect,

    /// Any other transport-level failure.
    #[error("Error: {0}")]
    Transport(String),

    /// The render succeeded but the response could not be written to disk.
    /// The response bytes are lost; the caller must retry the whole call.
    #[error("Error saving file: {0}")]
    FileSave(String),
}

/// Result of a generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The rendered document was written to this path.
    Saved(PathBuf),
    /// The attempt failed; nothing was written.
    Failed(GenerateError),
}

impl GenerateOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }

    /// The human-readable message for this outcome.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GenerateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saved(path) => write!(f, "Invoice saved as {}", path.display()),
            Self::Failed(err) => write!(f, "{err}"),
        }
    }
}

/// Validate an invoice before spending a network round trip.
///
/// All checks are accumulated independently — the caller gets every
/// problem at once, not just the first. Pure: no side effects, no network.
pub fn validate_invoice(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if invoice.items().is_empty() {
        errors.push(ValidationError::new(
            "items",
            "at least one item is required",
        ));
    }

    if let (Some(date), Some(due_date)) = (invoice.date, invoice.due_date) {
        if due_date < date {
            errors.push(ValidationError::new(
                "due_date",
                "due date cannot be before invoice date",
            ));
        }
    }

    if invoice.amount_paid > invoice.total() {
        errors.push(ValidationError::new(
            "amount_paid",
            "amount paid cannot exceed total",
        ));
    }

    errors
}

/// Client for the invoice rendering API.
pub struct InvoiceClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl InvoiceClient {
    /// Create a client against the production endpoint.
    ///
    /// When `api_key` is present it is sent as `Authorization: Bearer <key>`
    /// on every request.
    pub fn new(api_key: Option<&str>) -> Result<Self, ClientError> {
        Self::with_base_url(BASE_URL, api_key)
    }

    /// Create a client against a custom endpoint (used by tests).
    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<&str>) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(default_headers(api_key)?)
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    /// See [`validate_invoice`].
    pub fn validate(&self, invoice: &Invoice) -> Vec<ValidationError> {
        validate_invoice(invoice)
    }

    /// Render `invoice` in the given format and write the result to disk.
    ///
    /// When `output_path` is absent a filename is derived from the invoice
    /// number (`invoice[_<number>].<ext>`) and sanitized. On a 200 response
    /// the raw body is written verbatim to the path; any other status or a
    /// transport failure produces a [`GenerateOutcome::Failed`] without
    /// touching the filesystem. Nothing is retried.
    pub fn generate(
        &self,
        invoice: &Invoice,
        format: InvoiceFormat,
        output_path: Option<&Path>,
    ) -> GenerateOutcome {
        let path = match output_path {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(default_filename(invoice, format)),
        };

        let url = format!("{}{}", self.base_url, format.endpoint_suffix());
        let response = match self.http.post(&url).json(&invoice.to_wire()).send() {
            Ok(r) => r,
            Err(e) => return GenerateOutcome::Failed(classify_transport(&e)),
        };

        let status = response.status();
        let body = match response.bytes() {
            Ok(b) => b,
            Err(e) => return GenerateOutcome::Failed(classify_transport(&e)),
        };

        if status != StatusCode::OK {
            return GenerateOutcome::Failed(GenerateError::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        match std::fs::write(&path, &body) {
            Ok(()) => GenerateOutcome::Saved(path),
            Err(e) => GenerateOutcome::Failed(GenerateError::FileSave(e.to_string())),
        }
    }

    /// Currency codes the service accepts. Static, no network call.
    pub fn supported_currencies(&self) -> &'static [&'static str] {
        SUPPORTED_CURRENCIES
    }

    /// Language codes the service can localize to. Static, no network call.
    pub fn supported_languages(&self) -> &'static [&'static str] {
        SUPPORTED_LANGUAGES
    }
}

fn default_headers(api_key: Option<&str>) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_IDENT));
    if let Some(key) = api_key {
        let value = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|_| ClientError::InvalidApiKey)?;
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

/// Derive the default output filename from the invoice number.
fn default_filename(invoice: &Invoice, format: InvoiceFormat) -> String {
    let mut base = String::from("invoice");
    if let Some(number) = invoice.number.as_deref() {
        let number = number.trim();
        if !number.is_empty() {
            base.push('_');
            base.push_str(number);
        }
    }
    sanitize_filename(&format!("{base}.{}", format.extension()))
}

fn classify_transport(err: &reqwest::Error) -> GenerateError {
    if err.is_timeout() {
        GenerateError::Timeout
    } else if err.is_connect() {
        GenerateError::Connect
    } else {
        GenerateError::Transport(err.to_string())
    }
}
