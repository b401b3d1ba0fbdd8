//! Locale detection and initialization for the gitward CLI.
//!
//! Locale resolution order:
//! 1. `--locale` CLI flag (highest priority)
//! 2. `locale` field in `.gitward.toml`
//! 3. `GITWARD_LOCALE` environment variable
//! 4. `LC_ALL` / `LANG` environment variable
//! 5. System locale detection via `sys-locale`
//! 6. Fallback to "en" (English)

use colored::Colorize;
use gitward_core::i18n::{is_supported, normalize_locale};
use rust_i18n::{set_locale, t};

/// Supported locales with their display names.
pub const SUPPORTED_LOCALES: &[(&str, &str)] = &[("en", "English"), ("es", "Spanish / Espanol")];

/// Detect the best locale from the environment.
pub fn detect_locale() -> String {
    let candidates = [
        std::env::var("GITWARD_LOCALE").ok(),
        std::env::var("LC_ALL").or_else(|_| std::env::var("LANG")).ok(),
        sys_locale::get_locale(),
    ];

    candidates
        .into_iter()
        .flatten()
        .map(|locale| normalize_locale(&locale))
        .find(|normalized| is_supported(normalized))
        .unwrap_or_else(|| "en".to_string())
}

/// Pick the locale from explicit settings or the environment.
///
/// Returns the resolved code and, when an explicit value was unsupported,
/// the rejected value.
pub fn resolve(cli_locale: Option<&str>, config_locale: Option<&str>) -> (String, Option<String>) {
    match cli_locale.or(config_locale) {
        Some(explicit) => {
            let normalized = normalize_locale(explicit);
            if is_supported(&normalized) {
                (normalized, None)
            } else {
                ("en".to_string(), Some(explicit.to_string()))
            }
        }
        None => (detect_locale(), None),
    }
}

/// Initialize the locale for the application.
pub fn init(cli_locale: Option<&str>, config_locale: Option<&str>) {
    let (locale, rejected) = resolve(cli_locale, config_locale);
    set_locale(&locale);

    if let Some(rejected) = rejected {
        eprintln!(
            "{}: {}",
            t!("cli.warning").yellow().bold(),
            t!("cli.locales.unsupported", locale = rejected)
        );
    }
}

/// Print the list of supported locales.
pub fn print_supported_locales() {
    println!("{}", t!("cli.locales.header"));
    for &(code, name) in SUPPORTED_LOCALES {
        println!("  {:<8} {}", code, name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_locale_wins() {
        assert_eq!(resolve(Some("es_ES.UTF-8"), Some("en")), ("es".to_string(), None));
        assert_eq!(resolve(None, Some("ES")), ("es".to_string(), None));
    }

    #[test]
    fn test_unsupported_explicit_locale_falls_back() {
        assert_eq!(
            resolve(Some("fr_FR"), None),
            ("en".to_string(), Some("fr_FR".to_string()))
        );
    }

    #[test]
    fn test_supported_table_matches_core() {
        let codes: Vec<_> = SUPPORTED_LOCALES.iter().map(|(code, _)| *code).collect();
        assert_eq!(codes, gitward_core::i18n::SUPPORTED_LOCALES);
    }

    #[test]
    fn test_detected_locale_is_supported() {
        assert!(is_supported(&detect_locale()));
    }
}
