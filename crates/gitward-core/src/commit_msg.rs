//! Commit message validation
//!
//! A subject is accepted when it is a standard merge commit subject, or when
//! it has the form `<PREFIX>-<ticket>: <Summary sentence.>`:
//!
//! ```
//! use gitward_core::commit_msg::{validate, ProjectPrefix};
//!
//! let prefix = ProjectPrefix::new("PFX").unwrap();
//! assert!(validate("PFX-123: This is a good commit.", &prefix).is_ok());
//! assert!(validate("Merge branch 'feature/test'", &prefix).is_ok());
//! assert!(validate("PFX-123: Hello.", &prefix).is_err());
//! ```

use crate::diagnostics::Diagnostic;
use regex::Regex;
use rust_i18n::t;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Default minimum summary length, excluding the trailing period
pub const DEFAULT_MIN_SUMMARY_LENGTH: usize = 15;

/// Line git writes above the diff in `commit --verbose`; everything below it is ignored
const SCISSORS: &str = "# ------------------------ >8 ------------------------";

/// Subjects git generates for merges
const MERGE_PREAMBLES: &[&str] = &[
    "Merge branch '",
    "Merge branches '",
    "Merge remote-tracking branch '",
    "Merge tag '",
    "Merge commit '",
    "Merge pull request #",
];

static FOREIGN_REFERENCE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn foreign_reference_pattern() -> &'static Regex {
    FOREIGN_REFERENCE_PATTERN.get_or_init(|| {
        // Something shaped like a ticket reference with any project key
        Regex::new(r"^(?P<project>[A-Za-z][A-Za-z0-9]*)-\d+").unwrap()
    })
}

/// Project token required at the start of ticket references.
///
/// ASCII letters and digits only; compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectPrefix(String);

impl ProjectPrefix {
    /// Returns `None` when `prefix` is empty or not ASCII alphanumeric.
    pub fn new(prefix: impl Into<String>) -> Option<Self> {
        let prefix = prefix.into();
        let valid = !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_alphanumeric());
        valid.then_some(Self(prefix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tunable parts of the grammar, read from `[git.commit_msg]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CommitMsgPolicy {
    /// Minimum number of characters in the summary, not counting the period
    #[schemars(description = "Minimum summary length in characters, excluding the final period")]
    pub min_summary_length: usize,

    /// Reject summaries that start with a lowercase letter
    #[schemars(description = "Require the summary to start with a capital letter")]
    pub require_capital: bool,
}

impl Default for CommitMsgPolicy {
    fn default() -> Self {
        Self {
            min_summary_length: DEFAULT_MIN_SUMMARY_LENGTH,
            require_capital: true,
        }
    }
}

/// Why a commit message was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    /// Nothing but whitespace and comments
    Empty,
    /// No `<PREFIX>-<ticket>` reference at the start of the subject
    MissingReference,
    /// A ticket reference with another project's key
    WrongPrefix { found: String },
    /// The prefix is not followed by `-<digits>`
    MissingTicket,
    /// The ticket number is not followed by `": "` and a summary
    MissingSeparator,
    MissingPeriod,
    TooShort { length: usize, minimum: usize },
    NotCapitalized,
}

impl ValidationReason {
    pub fn rule_id(&self) -> &'static str {
        match self {
            ValidationReason::Empty => "CM-001",
            ValidationReason::MissingReference => "CM-002",
            ValidationReason::WrongPrefix { .. } => "CM-003",
            ValidationReason::MissingTicket => "CM-004",
            ValidationReason::MissingSeparator => "CM-005",
            ValidationReason::MissingPeriod => "CM-006",
            ValidationReason::TooShort { .. } => "CM-007",
            ValidationReason::NotCapitalized => "CM-008",
        }
    }
}

/// A rejected commit message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub reason: ValidationReason,
    prefix: String,
    message: String,
}

impl ValidationError {
    fn new(reason: ValidationReason, prefix: &ProjectPrefix) -> Self {
        let message = match &reason {
            ValidationReason::Empty => t!("core.commit_msg.empty"),
            ValidationReason::MissingReference => {
                t!("core.commit_msg.missing_reference", prefix = prefix.as_str())
            }
            ValidationReason::WrongPrefix { found } => t!(
                "core.commit_msg.wrong_prefix",
                found = found.as_str(),
                prefix = prefix.as_str()
            ),
            ValidationReason::MissingTicket => {
                t!("core.commit_msg.missing_ticket", prefix = prefix.as_str())
            }
            ValidationReason::MissingSeparator => t!("core.commit_msg.missing_separator"),
            ValidationReason::MissingPeriod => t!("core.commit_msg.missing_period"),
            ValidationReason::TooShort { length, minimum } => t!(
                "core.commit_msg.too_short",
                length = length.to_string(),
                minimum = minimum.to_string()
            ),
            ValidationReason::NotCapitalized => t!("core.commit_msg.not_capitalized"),
        };
        Self {
            reason,
            prefix: prefix.as_str().to_string(),
            message: message.to_string(),
        }
    }

    pub fn rule_id(&self) -> &'static str {
        self.reason.rule_id()
    }

    /// Report this rejection against the message file at `path`.
    pub fn to_diagnostic(&self, path: &Path) -> Diagnostic {
        Diagnostic::error(path.to_path_buf(), self.rule_id(), self.message.clone())
            .with_suggestion(t!("core.commit_msg.suggestion", prefix = self.prefix.as_str()))
    }
}

/// Validate with the default [`CommitMsgPolicy`].
pub fn validate(message: &str, prefix: &ProjectPrefix) -> Result<(), ValidationError> {
    validate_with(message, prefix, &CommitMsgPolicy::default())
}

/// Validate the subject line of `message` against `prefix` and `policy`.
pub fn validate_with(
    message: &str,
    prefix: &ProjectPrefix,
    policy: &CommitMsgPolicy,
) -> Result<(), ValidationError> {
    check_subject(subject_line(message), prefix, policy)
        .map_err(|reason| ValidationError::new(reason, prefix))
}

/// First meaningful line of a message as git would record it.
///
/// Comment lines are dropped and the scissors line ends the message.
pub fn subject_line(message: &str) -> &str {
    message
        .lines()
        .take_while(|line| *line != SCISSORS)
        .filter(|line| !line.starts_with('#'))
        .map(str::trim_end)
        .find(|line| !line.trim_start().is_empty())
        .unwrap_or("")
}

fn is_merge_subject(subject: &str) -> bool {
    MERGE_PREAMBLES.iter().any(|p| subject.starts_with(p))
}

fn check_subject(
    subject: &str,
    prefix: &ProjectPrefix,
    policy: &CommitMsgPolicy,
) -> Result<(), ValidationReason> {
    if subject.is_empty() {
        return Err(ValidationReason::Empty);
    }
    if is_merge_subject(subject) {
        return Ok(());
    }

    let after_prefix = match subject.strip_prefix(prefix.as_str()) {
        Some(rest) if rest.starts_with('-') => &rest[1..],
        Some(rest) if rest.is_empty() || rest.starts_with([':', ' ']) => {
            return Err(ValidationReason::MissingTicket);
        }
        _ => return Err(reference_problem(subject)),
    };

    let digits = after_prefix
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(after_prefix.len());
    if digits == 0 {
        return Err(ValidationReason::MissingTicket);
    }

    let summary = after_prefix[digits..]
        .strip_prefix(": ")
        .filter(|s| s.starts_with(|c: char| !c.is_whitespace()))
        .ok_or(ValidationReason::MissingSeparator)?;

    let Some(text) = summary.strip_suffix('.') else {
        return Err(ValidationReason::MissingPeriod);
    };

    if policy.require_capital && text.starts_with(char::is_lowercase) {
        return Err(ValidationReason::NotCapitalized);
    }

    let length = text.chars().count();
    if length < policy.min_summary_length {
        return Err(ValidationReason::TooShort {
            length,
            minimum: policy.min_summary_length,
        });
    }

    Ok(())
}

/// Classify a subject that does not start with the configured prefix.
fn reference_problem(subject: &str) -> ValidationReason {
    match foreign_reference_pattern().captures(subject) {
        Some(caps) => ValidationReason::WrongPrefix {
            found: caps["project"].to_string(),
        },
        None => ValidationReason::MissingReference,
    }
}
