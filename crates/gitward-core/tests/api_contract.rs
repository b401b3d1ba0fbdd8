//! API contract tests for gitward-core.
//!
//! These catch accidental breakage of the public surface the CLI and hook
//! scripts depend on.

use std::path::Path;

#[test]
fn public_types_are_importable() {
    let _ = std::any::type_name::<gitward_core::GitwardConfig>();
    let _ = std::any::type_name::<gitward_core::GitwardConfigBuilder>();
    let _ = std::any::type_name::<gitward_core::ConfigWarning>();
    let _ = std::any::type_name::<gitward_core::ConfigError>();
    let _ = std::any::type_name::<gitward_core::Diagnostic>();
    let _ = std::any::type_name::<gitward_core::DiagnosticLevel>();
    let _ = std::any::type_name::<gitward_core::HookError>();
    let _ = std::any::type_name::<gitward_core::HookResult<()>>();
    let _ = std::any::type_name::<gitward_core::Hook>();
    let _ = std::any::type_name::<gitward_core::HookConfig>();
    let _ = std::any::type_name::<gitward_core::HookAction>();
    let _ = std::any::type_name::<gitward_core::HookStatus>();
    let _ = std::any::type_name::<gitward_core::InstallReport>();
    let _ = std::any::type_name::<gitward_core::LinkState>();
    let _ = std::any::type_name::<gitward_core::ProjectPrefix>();
    let _ = std::any::type_name::<gitward_core::CommitMsgPolicy>();
    let _ = std::any::type_name::<gitward_core::ValidationReason>();
    let _ = std::any::type_name::<gitward_core::PreCommitCheck>();
    let _ = std::any::type_name::<gitward_core::PreCommitOutcome>();
}

#[test]
fn public_functions_compile_with_expected_signatures() {
    let _: fn(
        &gitward_core::HookConfig,
        &Path,
        &Path,
    ) -> gitward_core::HookResult<gitward_core::InstallReport> = gitward_core::install;
    let _: fn(&Path, &Path) -> gitward_core::HookResult<gitward_core::InstallReport> =
        gitward_core::uninstall;
    let _: fn(
        &gitward_core::HookConfig,
        &Path,
        &Path,
    ) -> gitward_core::HookResult<Vec<gitward_core::HookStatus>> = gitward_core::status;
    let _: fn(&Path, &Path) -> std::io::Result<gitward_core::LinkState> =
        gitward_core::inspect_link;
    let _: fn(
        &str,
        &gitward_core::ProjectPrefix,
    ) -> Result<(), gitward_core::ValidationError> = gitward_core::validate;
    let _: fn(&Path) -> gitward_core::HookResult<std::path::PathBuf> =
        gitward_core::find_repo_root;
    let _: fn(
        &[gitward_core::PreCommitCheck],
        &Path,
    ) -> gitward_core::PreCommitOutcome = gitward_core::run_checks;
}

#[test]
fn hook_names_are_stable() {
    let names: Vec<_> = gitward_core::Hook::ALL.iter().map(|h| h.as_str()).collect();
    assert_eq!(names, vec!["pre-commit", "commit-msg"]);
}

#[test]
fn original_commit_table() {
    use gitward_core::{ProjectPrefix, ValidationReason, validate};

    let prefix = ProjectPrefix::new("PFX").unwrap();
    let cases: &[(&str, Option<ValidationReason>)] = &[
        ("123: This is a bad commit.", Some(ValidationReason::MissingReference)),
        ("PFX: This is a bad commit.", Some(ValidationReason::MissingTicket)),
        ("PFX-123: This is a good commit.", None),
        (
            "PFX-123: This is a good commit with a much longer summary line.",
            None,
        ),
        ("Merge branch 'feature/test'", None),
    ];

    for (message, expected) in cases {
        let result = validate(message, &prefix);
        assert_eq!(
            result.err().map(|e| e.reason),
            *expected,
            "message: {message}"
        );
    }
}
