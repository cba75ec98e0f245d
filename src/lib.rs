//! # invoice-gen
//!
//! Invoice data model, validation, and a thin client for the
//! [invoice-generator.com](https://invoice-generator.com) rendering API.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! On the wire, amounts are serialized as plain JSON numbers, which is what
//! the remote service expects.
//!
//! ## Quick Start
//!
//! ```rust
//! use invoice_gen::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("ACME Corp\n123 Business St", "Client Company")
//!     .number("INV-2024-001")
//!     .payment_terms("NET 30")
//!     .add_item(
//!         InvoiceItemBuilder::new("Web Design", 1, dec!(1500))
//!             .description("Custom website design")
//!             .build()
//!             .unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(invoice.subtotal(), dec!(1500));
//! assert_eq!(invoice.balance_due(), dec!(1500));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice types, builder, wire payload, filename sanitization |
//! | `client` | Blocking HTTP client for PDF/UBL generation |
//! | `templates` | Named-template JSON file store |
//! | `config` | Persisted key-value settings (API key) |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "templates")]
pub mod templates;

#[cfg(feature = "config")]
pub mod config;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
