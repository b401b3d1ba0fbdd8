//! Locale normalization shared by the CLI and the config loader.

/// Supported locale codes.
pub const SUPPORTED_LOCALES: &[&str] = &["en", "es"];

/// Normalize a locale string to match supported locale codes.
///
/// Examples:
/// - "en_US.UTF-8" -> "en"
/// - "es_ES" -> "es"
/// - " en " -> "en"
pub fn normalize_locale(locale: &str) -> String {
    let locale = locale.trim();

    // Strip encoding suffix (e.g., ".UTF-8")
    let base = locale.split('.').next().unwrap_or(locale);

    for &code in SUPPORTED_LOCALES {
        if base.eq_ignore_ascii_case(code) {
            return code.to_string();
        }
    }

    // Language-only match (e.g., "es_ES" -> "es")
    let lang = base.split(&['_', '-'][..]).next().unwrap_or(base);
    for &code in SUPPORTED_LOCALES {
        if lang.eq_ignore_ascii_case(code) {
            return code.to_string();
        }
    }

    lang.to_lowercase()
}

/// Check if a locale code is supported.
pub fn is_supported(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}
