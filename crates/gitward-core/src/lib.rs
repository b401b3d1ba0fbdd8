//! # gitward-core
//!
//! Git hook management for a repository:
//! - links the shipped hook scripts into `.git/hooks` according to a
//!   per-hook enable map ([`hooks::install`])
//! - validates commit message subjects against the
//!   `<PREFIX>-<ticket>: <Summary.>` grammar ([`commit_msg::validate`])
//! - runs the configured pre-commit checks ([`pre_commit::run_checks`])
//!
//! Every operation takes its inputs explicitly; [`GitwardConfig`] is only a
//! convenient place to read them from.

rust_i18n::i18n!("locales", fallback = "en");

pub mod commit_msg;
pub mod config;
pub mod diagnostics;
pub mod hooks;
pub mod i18n;
pub mod pre_commit;
pub mod repo;

pub use commit_msg::{
    CommitMsgPolicy, ProjectPrefix, ValidationError, ValidationReason, validate, validate_with,
};
pub use config::{ConfigError, ConfigWarning, GitwardConfig, GitwardConfigBuilder};
pub use diagnostics::{Diagnostic, DiagnosticLevel, HookError, HookResult};
pub use hooks::{
    Hook, HookAction, HookConfig, HookStatus, InstallReport, LinkState, inspect_link, install,
    status, uninstall,
};
pub use pre_commit::{PreCommitCheck, PreCommitOutcome, run_checks};
pub use repo::find_repo_root;
