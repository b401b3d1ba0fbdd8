//! Git hook installation
//!
//! Hooks are activated by symlinking `<hooks_dir>/<name>` to the script
//! shipped in the source directory, and deactivated by removing that entry.
//! [`install`] reconciles the hooks directory with a [`HookConfig`] and is
//! idempotent: a second run with the same configuration changes nothing.

mod link;

pub use link::{LinkState, inspect_link, link_target};

use crate::diagnostics::{Diagnostic, HookError, HookResult};
use rust_i18n::t;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Git hooks gitward ships a script for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Hook {
    #[serde(rename = "pre-commit")]
    PreCommit,
    #[serde(rename = "commit-msg")]
    CommitMsg,
}

impl Hook {
    /// Every supported hook, in installation order
    pub const ALL: [Hook; 2] = [Hook::PreCommit, Hook::CommitMsg];

    /// File name git looks for in the hooks directory
    pub fn as_str(self) -> &'static str {
        match self {
            Hook::PreCommit => "pre-commit",
            Hook::CommitMsg => "commit-msg",
        }
    }

    /// Comma-separated list of the known hook names
    pub fn known_names() -> String {
        Hook::ALL
            .iter()
            .map(|h| h.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hook {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hook::ALL
            .into_iter()
            .find(|hook| hook.as_str() == s)
            .ok_or_else(|| HookError::UnknownHook {
                name: s.to_string(),
            })
    }
}

/// Hook name -> enabled flag, as written under `[git.hooks]`.
///
/// Keys are kept as strings so that a typo in the config file surfaces as
/// [`HookError::UnknownHook`] instead of being silently dropped by serde.
/// Hooks without an entry are enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct HookConfig(BTreeMap<String, bool>);

impl HookConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag for a known hook.
    pub fn set(&mut self, hook: Hook, enabled: bool) -> &mut Self {
        self.0.insert(hook.as_str().to_string(), enabled);
        self
    }

    /// Set the flag for an arbitrary key, known or not.
    pub fn set_raw(&mut self, name: impl Into<String>, enabled: bool) -> &mut Self {
        self.0.insert(name.into(), enabled);
        self
    }

    /// Drop the entry for `hook`, returning it to the enabled default.
    pub fn unset(&mut self, hook: Hook) -> &mut Self {
        self.0.remove(hook.as_str());
        self
    }

    pub fn is_enabled(&self, hook: Hook) -> bool {
        self.0.get(hook.as_str()).copied().unwrap_or(true)
    }

    /// Raw flag for a key, `None` when unspecified
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    /// Keys that do not name a known hook
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|name| name.parse::<Hook>().is_err())
    }

    /// Fail with the first key that does not name a known hook.
    pub fn check_keys(&self) -> HookResult<()> {
        match self.unknown_keys().next() {
            Some(name) => Err(HookError::UnknownHook {
                name: name.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl FromIterator<(Hook, bool)> for HookConfig {
    fn from_iter<I: IntoIterator<Item = (Hook, bool)>>(iter: I) -> Self {
        let mut config = HookConfig::new();
        for (hook, enabled) in iter {
            config.set(hook, enabled);
        }
        config
    }
}

/// What an install or uninstall run did to one hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HookAction {
    /// Link created where nothing existed
    Created,
    /// Stale link or file replaced by the correct link
    Replaced,
    /// Entry already in the desired state (or not owned by gitward)
    Unchanged,
    /// Entry removed
    Removed,
    /// Disabled hook with nothing to remove
    Absent,
}

impl HookAction {
    pub fn is_change(self) -> bool {
        matches!(
            self,
            HookAction::Created | HookAction::Replaced | HookAction::Removed
        )
    }
}

impl fmt::Display for HookAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HookAction::Created => "created",
            HookAction::Replaced => "replaced",
            HookAction::Unchanged => "unchanged",
            HookAction::Removed => "removed",
            HookAction::Absent => "absent",
        };
        f.write_str(s)
    }
}

/// Per-hook outcome of an install or uninstall run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    actions: Vec<(Hook, HookAction)>,
}

impl InstallReport {
    fn push(&mut self, hook: Hook, action: HookAction) {
        self.actions.push((hook, action));
    }

    pub fn actions(&self) -> &[(Hook, HookAction)] {
        &self.actions
    }

    pub fn action_for(&self, hook: Hook) -> Option<HookAction> {
        self.actions
            .iter()
            .find(|(h, _)| *h == hook)
            .map(|(_, action)| *action)
    }

    /// Number of hooks whose filesystem entry changed
    pub fn changed(&self) -> usize {
        self.actions.iter().filter(|(_, a)| a.is_change()).count()
    }
}

/// Read-only view of one hook, used by `gitward status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookStatus {
    pub hook: Hook,
    pub enabled: bool,
    pub state: LinkState,
    /// Whether the shipped script exists in the source directory
    pub source_exists: bool,
}

impl HookStatus {
    /// Installed exactly as configured
    pub fn is_healthy(&self) -> bool {
        if self.enabled {
            self.source_exists && self.state == LinkState::Linked
        } else {
            self.state == LinkState::Missing
        }
    }
}

/// Reconcile `hooks_dir` with `config`.
///
/// Enabled hooks (the default) are symlinked to `source_dir/<name>`; disabled
/// hooks have any entry at their path removed. All configuration keys and all
/// enabled source scripts are checked before the first filesystem change.
pub fn install(
    config: &HookConfig,
    hooks_dir: &Path,
    source_dir: &Path,
) -> HookResult<InstallReport> {
    config.check_keys()?;
    ensure_hooks_dir(hooks_dir)?;

    let mut plan = Vec::with_capacity(Hook::ALL.len());
    for hook in Hook::ALL {
        let source = if config.is_enabled(hook) {
            Some(resolve_source(hook, source_dir)?)
        } else {
            None
        };
        plan.push((hook, source));
    }

    let mut report = InstallReport::default();
    for (hook, source) in plan {
        let link = hooks_dir.join(hook.as_str());
        let action = match source {
            Some(source) => enable(hook, &link, &source)?,
            None => disable(hook, &link)?,
        };
        debug!(hook = %hook, action = %action, path = %link.display(), "hook reconciled");
        report.push(hook, action);
    }

    info!(changed = report.changed(), hooks_dir = %hooks_dir.display(), "git hooks installed");
    Ok(report)
}

/// Remove every hook link that points into `source_dir`.
///
/// Hand-written hooks and links to other tools are reported as unchanged.
pub fn uninstall(hooks_dir: &Path, source_dir: &Path) -> HookResult<InstallReport> {
    ensure_hooks_dir(hooks_dir)?;
    let canonical_source =
        fs::canonicalize(source_dir).unwrap_or_else(|_| source_dir.to_path_buf());

    let mut report = InstallReport::default();
    for hook in Hook::ALL {
        let link = hooks_dir.join(hook.as_str());
        let target = link_target(&link).map_err(|e| io_error(hook, &link, e))?;

        let action = match target {
            Some(target)
                if target.starts_with(&canonical_source) || target.starts_with(source_dir) =>
            {
                link::remove_entry(&link).map_err(|e| io_error(hook, &link, e))?;
                HookAction::Removed
            }
            Some(_) => HookAction::Unchanged,
            None if fs::symlink_metadata(&link).is_ok() => {
                warn!(hook = %hook, path = %link.display(), "leaving hook not installed by gitward");
                HookAction::Unchanged
            }
            None => HookAction::Absent,
        };
        debug!(hook = %hook, action = %action, "hook uninstalled");
        report.push(hook, action);
    }

    Ok(report)
}

/// Describe the current state of every hook without changing anything.
pub fn status(
    config: &HookConfig,
    hooks_dir: &Path,
    source_dir: &Path,
) -> HookResult<Vec<HookStatus>> {
    config.check_keys()?;
    ensure_hooks_dir(hooks_dir)?;

    Hook::ALL
        .into_iter()
        .map(|hook| {
            let raw_source = source_dir.join(hook.as_str());
            let source_exists = raw_source.is_file();
            let expected = fs::canonicalize(&raw_source).unwrap_or(raw_source);
            let link = hooks_dir.join(hook.as_str());
            let state = inspect_link(&link, &expected).map_err(|e| io_error(hook, &link, e))?;
            Ok(HookStatus {
                hook,
                enabled: config.is_enabled(hook),
                state,
                source_exists,
            })
        })
        .collect()
}

/// Diagnostics for hooks that are not installed as configured.
pub fn status_diagnostics(
    statuses: &[HookStatus],
    hooks_dir: &Path,
    source_dir: &Path,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for status in statuses {
        let name = status.hook.as_str();
        if status.enabled && !status.source_exists {
            diagnostics.push(
                Diagnostic::error(
                    source_dir.join(name),
                    "HK-002",
                    t!("core.hooks.source_missing", name = name),
                )
                .with_suggestion(t!("core.hooks.source_missing_suggestion")),
            );
        }

        let mismatched = if status.enabled {
            status.source_exists && status.state != LinkState::Linked
        } else {
            status.state.is_present()
        };
        if mismatched {
            diagnostics.push(
                Diagnostic::warning(
                    hooks_dir.join(name),
                    "HK-003",
                    t!("core.hooks.stale", name = name),
                )
                .with_suggestion(t!("core.hooks.stale_suggestion")),
            );
        }
    }
    diagnostics
}

/// Diagnostics for config keys that do not name a known hook.
pub fn config_diagnostics(config: &HookConfig, config_path: &Path) -> Vec<Diagnostic> {
    config
        .unknown_keys()
        .map(|name| {
            Diagnostic::error(
                config_path.to_path_buf(),
                "HK-001",
                t!("core.hooks.unknown_hook", name = name, known = Hook::known_names()),
            )
            .with_suggestion(t!("core.hooks.unknown_hook_suggestion"))
        })
        .collect()
}

fn ensure_hooks_dir(hooks_dir: &Path) -> HookResult<()> {
    match fs::metadata(hooks_dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        _ => Err(HookError::HooksDirMissing {
            path: hooks_dir.to_path_buf(),
        }),
    }
}

fn resolve_source(hook: Hook, source_dir: &Path) -> HookResult<PathBuf> {
    let path = source_dir.join(hook.as_str());
    match fs::canonicalize(&path) {
        Ok(canonical) if canonical.is_file() => Ok(canonical),
        _ => Err(HookError::SourceMissing {
            hook: hook.as_str().to_string(),
            path,
        }),
    }
}

fn enable(hook: Hook, link: &Path, source: &Path) -> HookResult<HookAction> {
    match inspect_link(link, source).map_err(|e| io_error(hook, link, e))? {
        LinkState::Linked => Ok(HookAction::Unchanged),
        LinkState::Missing => {
            link::create_link(source, link).map_err(|e| io_error(hook, link, e))?;
            Ok(HookAction::Created)
        }
        LinkState::Stale { target } => {
            debug!(hook = %hook, previous = ?target, "replacing stale hook");
            link::remove_entry(link).map_err(|e| io_error(hook, link, e))?;
            link::create_link(source, link).map_err(|e| io_error(hook, link, e))?;
            Ok(HookAction::Replaced)
        }
    }
}

fn disable(hook: Hook, link: &Path) -> HookResult<HookAction> {
    match fs::symlink_metadata(link) {
        Ok(_) => {
            link::remove_entry(link).map_err(|e| io_error(hook, link, e))?;
            Ok(HookAction::Removed)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HookAction::Absent),
        Err(e) => Err(io_error(hook, link, e)),
    }
}

fn io_error(hook: Hook, path: &Path, source: std::io::Error) -> HookError {
    HookError::Io {
        hook: hook.as_str().to_string(),
        path: path.to_path_buf(),
        source,
    }
}
