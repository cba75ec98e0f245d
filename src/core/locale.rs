//! Currency and language codes accepted by the rendering API.
//!
//! Static enumerations — the remote service publishes these as a fixed
//! set, so no network call is needed to list them.

/// ISO 4217 currency codes the rendering API supports.
/// Sorted for binary search.
pub static SUPPORTED_CURRENCIES: &[&str] = &[
    "AUD", // Australian Dollar
    "CAD", // Canadian Dollar
    "EUR", // Euro
    "GBP", // Pound Sterling
    "JPY", // Japanese Yen
    "USD", // US Dollar
];

/// ISO 639-1 language codes the rendering API can localize to.
/// Sorted for binary search.
pub static SUPPORTED_LANGUAGES: &[&str] = &[
    "de", // German
    "en", // English
    "es", // Spanish
    "fr", // French
    "th", // Thai
];

/// Check whether `code` is a currency the API accepts.
pub fn is_supported_currency(code: &str) -> bool {
    SUPPORTED_CURRENCIES.binary_search(&code).is_ok()
}

/// Check whether `code` is a language the API can localize to.
pub fn is_supported_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES.binary_search(&code).is_ok()
}
