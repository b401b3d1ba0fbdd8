//! Diagnostic types and error reporting

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub type HookResult<T> = Result<T, HookError>;

/// A diagnostic message reported to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    /// File the diagnostic refers to (commit message file, hook path, config)
    pub file: PathBuf,
    pub rule: String,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

impl Diagnostic {
    pub fn error(file: PathBuf, rule: &str, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            message: message.into(),
            file,
            rule: rule.to_string(),
            suggestion: None,
        }
    }

    pub fn warning(file: PathBuf, rule: &str, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            message: message.into(),
            file,
            rule: rule.to_string(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Human-readable rule name from the catalog, if the rule is known
    pub fn rule_name(&self) -> Option<&'static str> {
        gitward_rules::get_rule_name(&self.rule)
    }
}

/// Installer and configuration errors
///
/// Every installer failure that concerns a single hook carries that hook's
/// name so callers can report which entry broke the run.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("Git hooks directory does not exist: {path}")]
    HooksDirMissing { path: PathBuf },

    #[error("Filesystem error for hook '{hook}' at {path}")]
    Io {
        hook: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown git hook '{name}'")]
    UnknownHook { name: String },

    #[error("Source script for hook '{hook}' not found: {path}")]
    SourceMissing { hook: String, path: PathBuf },

    #[error("Not inside a git repository: {path}")]
    NotARepository { path: PathBuf },

    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl HookError {
    /// Name of the hook involved in the failure, if any
    pub fn hook_name(&self) -> Option<&str> {
        match self {
            HookError::Io { hook, .. } | HookError::SourceMissing { hook, .. } => Some(hook),
            HookError::UnknownHook { name } => Some(name),
            _ => None,
        }
    }

    /// True for the IO class of failures (missing or unwritable hooks dir)
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            HookError::HooksDirMissing { .. } | HookError::Io { .. } | HookError::ConfigRead { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_builders() {
        let diag = Diagnostic::error(PathBuf::from("COMMIT_EDITMSG"), "CM-006", "no period")
            .with_suggestion("add a period");

        assert_eq!(diag.level, DiagnosticLevel::Error);
        assert_eq!(diag.rule, "CM-006");
        assert_eq!(diag.suggestion.as_deref(), Some("add a period"));
        assert_eq!(
            diag.rule_name(),
            Some("Summary does not end with a period")
        );
    }

    #[test]
    fn test_levels_sort_errors_first() {
        let mut levels = vec![DiagnosticLevel::Warning, DiagnosticLevel::Error];
        levels.sort();
        assert_eq!(levels, vec![DiagnosticLevel::Error, DiagnosticLevel::Warning]);
    }

    #[test]
    fn test_error_carries_hook_name() {
        let err = HookError::Io {
            hook: "pre-commit".to_string(),
            path: PathBuf::from(".git/hooks/pre-commit"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.hook_name(), Some("pre-commit"));
        assert!(err.is_io());
        assert!(err.to_string().contains("pre-commit"));

        let unknown = HookError::UnknownHook {
            name: "post-merge".to_string(),
        };
        assert_eq!(unknown.hook_name(), Some("post-merge"));
        assert!(!unknown.is_io());
    }

    #[test]
    fn test_diagnostic_serializes_to_json() {
        let diag = Diagnostic::warning(PathBuf::from(".gitward.toml"), "HK-001", "unknown");
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["level"], "Warning");
        assert_eq!(json["rule"], "HK-001");
    }
}
