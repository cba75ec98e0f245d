//! Core invoice types, derived amounts, and the wire payload.
//!
//! This module provides the foundational types for describing an invoice
//! and turning it into the minimal JSON payload the rendering API expects.

mod builder;
mod error;
mod filename;
mod locale;
mod types;
mod wire;

pub use builder::*;
pub use error::*;
pub use filename::sanitize_filename;
pub use locale::{
    SUPPORTED_CURRENCIES, SUPPORTED_LANGUAGES, is_supported_currency, is_supported_language,
};
pub use types::*;
pub use wire::*;
