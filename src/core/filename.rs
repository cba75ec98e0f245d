//! Output filename sanitization.
//!
//! Shared by the API client (derived output paths) and the template store
//! (template file names).

/// Maximum length of a sanitized filename.
const MAX_LEN: usize = 50;

/// Characters rejected by common filesystems.
const INVALID_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Make `name` safe to use as a filename.
///
/// Replaces each of `< > : " / \ | ? *` with `_`, trims surrounding
/// whitespace, and caps the result at 50 characters. When truncation is
/// needed the extension is preserved (the base name is cut, the dot and
/// extension kept); if the extension alone would consume the whole budget,
/// the string is flat-truncated instead.
pub fn sanitize_filename(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| if INVALID_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let safe = safe.trim();

    if safe.chars().count() <= MAX_LEN {
        return safe.to_string();
    }

    if let Some((base, ext)) = safe.rsplit_once('.') {
        let ext_len = ext.chars().count();
        if MAX_LEN > ext_len + 1 {
            let max_base = MAX_LEN - ext_len - 1;
            let truncated: String = base.chars().take(max_base).collect();
            return format!("{truncated}.{ext}");
        }
    }
    safe.chars().take(MAX_LEN).collect()
}
