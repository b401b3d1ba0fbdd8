//! Pre-commit check runner
//!
//! Each configured check is an external command. Every check runs even
//! after an earlier one fails, so a single commit attempt reports all
//! problems at once.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// One external check run by the pre-commit hook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PreCommitCheck {
    /// Label printed before the check's output
    #[schemars(description = "Name printed before the check runs")]
    pub name: String,

    /// Program followed by its arguments
    #[schemars(description = "Command and arguments, e.g. [\"cargo\", \"fmt\", \"--check\"]")]
    pub command: Vec<String>,
}

impl PreCommitCheck {
    pub fn new<I, S>(name: impl Into<String>, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            command: command.into_iter().map(Into::into).collect(),
        }
    }
}

/// How a single check ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    /// Exited non-zero; `None` when killed by a signal
    Failed(Option<i32>),
    /// Could not be started at all
    SpawnFailed(String),
}

#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Passed
    }
}

/// Results of a full pre-commit run, in configuration order
#[derive(Debug, Clone, Default)]
pub struct PreCommitOutcome {
    pub results: Vec<CheckResult>,
}

impl PreCommitOutcome {
    /// True when every check passed. An empty run passes.
    pub fn passed(&self) -> bool {
        self.results.iter().all(CheckResult::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.passed())
    }
}

/// Run every check in `cwd`, writing a `==> <name>` header to `out` before each.
///
/// Child processes inherit stdout and stderr. Header write failures are
/// ignored since they do not affect the outcome.
pub fn run_checks_to<W: Write>(checks: &[PreCommitCheck], cwd: &Path, out: &mut W) -> PreCommitOutcome {
    let mut outcome = PreCommitOutcome::default();

    for check in checks {
        let _ = writeln!(out, "==> {}", check.name);
        let _ = out.flush();

        let status = run_one(check, cwd);
        match &status {
            CheckStatus::Passed => debug!(check = %check.name, "check passed"),
            CheckStatus::Failed(code) => warn!(check = %check.name, ?code, "check failed"),
            CheckStatus::SpawnFailed(reason) => {
                warn!(check = %check.name, %reason, "check could not be started")
            }
        }
        outcome.results.push(CheckResult {
            name: check.name.clone(),
            status,
        });
    }

    outcome
}

/// [`run_checks_to`] writing headers to stdout
pub fn run_checks(checks: &[PreCommitCheck], cwd: &Path) -> PreCommitOutcome {
    run_checks_to(checks, cwd, &mut std::io::stdout())
}

fn run_one(check: &PreCommitCheck, cwd: &Path) -> CheckStatus {
    let Some((program, args)) = check.command.split_first() else {
        return CheckStatus::SpawnFailed("empty command".to_string());
    };

    debug!(check = %check.name, %program, "running check");
    let result = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .status();

    match result {
        Ok(status) if status.success() => CheckStatus::Passed,
        Ok(status) => CheckStatus::Failed(status.code()),
        Err(e) => CheckStatus::SpawnFailed(format!("{}: {}", program, e)),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sh(name: &str, script: &str) -> PreCommitCheck {
        PreCommitCheck::new(name, ["sh", "-c", script])
    }

    #[test]
    fn test_all_checks_run_after_failure() {
        let temp = TempDir::new().unwrap();
        let checks = vec![
            sh("first", "exit 3"),
            sh("second", "touch ran-second"),
        ];
        let mut out = Vec::new();

        let outcome = run_checks_to(&checks, temp.path(), &mut out);

        assert!(!outcome.passed());
        assert_eq!(outcome.results[0].status, CheckStatus::Failed(Some(3)));
        assert!(outcome.results[1].passed());
        assert!(temp.path().join("ran-second").exists());

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed, "==> first\n==> second\n");
    }

    #[test]
    fn test_empty_run_passes() {
        let temp = TempDir::new().unwrap();
        let outcome = run_checks_to(&[], temp.path(), &mut Vec::new());
        assert!(outcome.passed());
        assert!(outcome.results.is_empty());
    }

    #[test]
    fn test_unstartable_check_fails() {
        let temp = TempDir::new().unwrap();
        let checks = vec![
            PreCommitCheck::new("missing", ["gitward-no-such-program-xyz"]),
            PreCommitCheck::new("empty", Vec::<String>::new()),
            sh("ok", "true"),
        ];

        let outcome = run_checks_to(&checks, temp.path(), &mut Vec::new());

        assert!(!outcome.passed());
        assert!(matches!(outcome.results[0].status, CheckStatus::SpawnFailed(_)));
        assert!(matches!(outcome.results[1].status, CheckStatus::SpawnFailed(_)));
        assert!(outcome.results[2].passed());
        let failed: Vec<_> = outcome.failures().map(|r| r.name.as_str()).collect();
        assert_eq!(failed, vec!["missing", "empty"]);
    }

    #[test]
    fn test_checks_run_in_given_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker"), "").unwrap();

        let outcome = run_checks_to(&[sh("cwd", "test -f marker")], temp.path(), &mut Vec::new());
        assert!(outcome.passed());
    }

    #[test]
    fn test_check_deserializes_from_toml() {
        let check: PreCommitCheck =
            toml::from_str("name = \"fmt\"\ncommand = [\"cargo\", \"fmt\", \"--check\"]\n").unwrap();
        assert_eq!(check, PreCommitCheck::new("fmt", ["cargo", "fmt", "--check"]));
    }
}
