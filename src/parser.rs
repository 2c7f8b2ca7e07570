//! Input normalization for model IDs and download URLs.
//!
//! The CLI accepts either a bare model version ID (e.g. `46846`) or a full
//! URL. Bare IDs are expanded against the canonical download endpoint;
//! anything that already carries an HTTP scheme passes through unchanged.

/// Canonical download endpoint that bare model IDs are expanded against.
pub const BASE_URL: &str = "https://civitai.com/api/download/models/";

/// Normalizes a model ID or URL into a full download endpoint URL.
///
/// - all-digit input → `BASE_URL` + id
/// - input starting with `http` → returned unchanged
/// - anything else is assumed to be an ID and expanded the same way
#[must_use]
pub fn normalize_input(url_or_id: &str) -> String {
    let trimmed = url_or_id.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return format!("{BASE_URL}{trimmed}");
    }
    if trimmed.starts_with("http") {
        return trimmed.to_string();
    }
    format!("{BASE_URL}{trimmed}")
}
