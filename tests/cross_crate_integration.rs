//! Cross-crate integration tests verifying contracts between workspace crates.
//!
//! The shipped hook scripts, the core hook list and the rule catalog must
//! agree with each other.

use gitward_core::{Hook, HookAction, HookConfig, ValidationReason};
use std::path::{Path, PathBuf};

fn workspace_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

fn shipped_scripts() -> PathBuf {
    workspace_root().join(gitward_core::config::DEFAULT_HOOK_SCRIPTS)
}

// ============================================================================
// Shipped scripts <-> core contracts
// ============================================================================

#[test]
fn every_hook_has_a_shipped_script() {
    for hook in Hook::ALL {
        let script = shipped_scripts().join(hook.as_str());
        assert!(script.is_file(), "missing script {}", script.display());
    }
}

#[test]
fn shipped_scripts_call_the_matching_subcommand() {
    for hook in Hook::ALL {
        let content = std::fs::read_to_string(shipped_scripts().join(hook.as_str())).unwrap();
        assert!(content.starts_with("#!/bin/sh"));
        assert!(
            content.contains(&format!("gitward {}", hook.as_str())),
            "{} script should invoke `gitward {}`",
            hook,
            hook
        );
    }
}

#[cfg(unix)]
#[test]
fn shipped_scripts_are_executable() {
    use std::os::unix::fs::PermissionsExt;

    for hook in Hook::ALL {
        let mode = std::fs::metadata(shipped_scripts().join(hook.as_str()))
            .unwrap()
            .permissions()
            .mode();
        assert!(mode & 0o111 != 0, "{} is not executable", hook);
    }
}

#[cfg(unix)]
#[test]
fn shipped_scripts_install_into_a_fresh_repository() {
    let temp = tempfile::tempdir().unwrap();
    let hooks_dir = temp.path().join(".git/hooks");
    std::fs::create_dir_all(&hooks_dir).unwrap();

    let report = gitward_core::install(&HookConfig::new(), &hooks_dir, &shipped_scripts()).unwrap();

    for hook in Hook::ALL {
        assert_eq!(report.action_for(hook), Some(HookAction::Created));
    }
    let uninstalled = gitward_core::uninstall(&hooks_dir, &shipped_scripts()).unwrap();
    assert_eq!(uninstalled.changed(), Hook::ALL.len());
}

// ============================================================================
// Core <-> rules catalog contracts
// ============================================================================

#[test]
fn every_validation_reason_is_in_the_catalog() {
    let reasons = [
        ValidationReason::Empty,
        ValidationReason::MissingReference,
        ValidationReason::WrongPrefix {
            found: "ABC".to_string(),
        },
        ValidationReason::MissingTicket,
        ValidationReason::MissingSeparator,
        ValidationReason::MissingPeriod,
        ValidationReason::TooShort {
            length: 3,
            minimum: 15,
        },
        ValidationReason::NotCapitalized,
    ];

    for reason in &reasons {
        assert!(
            gitward_rules::get_rule_name(reason.rule_id()).is_some(),
            "{} missing from rules.json",
            reason.rule_id()
        );
    }
    assert_eq!(
        gitward_rules::rules_in_category("commit-msg").count(),
        reasons.len()
    );
}

#[test]
fn hook_diagnostics_use_catalog_rules() {
    let mut config = HookConfig::new();
    config.set_raw("post-merge", true);

    let diags = gitward_core::hooks::config_diagnostics(&config, Path::new(".gitward.toml"));
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule_name(), gitward_rules::get_rule_name("HK-001"));
    assert!(diags[0].rule_name().is_some());
}
