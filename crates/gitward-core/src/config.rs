//! Project configuration (`.gitward.toml`)
//!
//! ```toml
//! [project]
//! prefix = "PFX"
//!
//! [git.hooks]
//! pre-commit = true
//! commit-msg = false
//! ```
//!
//! Every section is optional. The core functions never read this type
//! directly; callers pull the values they need out of it and pass them
//! explicitly.

use crate::commit_msg::{CommitMsgPolicy, ProjectPrefix};
use crate::diagnostics::{HookError, HookResult};
use crate::hooks::{Hook, HookConfig};
use crate::pre_commit::PreCommitCheck;
use rust_i18n::t;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod builder;
mod schema;


pub use builder::GitwardConfigBuilder;
pub use schema::{ConfigWarning, generate_schema};

/// File name looked up at the repository root
pub const CONFIG_FILE_NAME: &str = ".gitward.toml";

/// Default location of the shipped hook scripts, relative to the repository root
pub const DEFAULT_HOOK_SCRIPTS: &str = "scripts/git-hooks";

/// Maximum config file size read from disk
const MAX_CONFIG_SIZE: u64 = 256 * 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ProjectConfig {
    /// Short project token used in ticket references (e.g. "PFX")
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Project prefix required in commit subjects, e.g. \"PFX\"")]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PreCommitConfig {
    /// Checks run in order by `gitward pre-commit`
    #[schemars(description = "External commands run by the pre-commit hook")]
    pub checks: Vec<PreCommitCheck>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GitConfig {
    /// Hook name -> enabled flag. Unlisted hooks are enabled.
    #[schemars(description = "Enable or disable individual git hooks (pre-commit, commit-msg)")]
    pub hooks: HookConfig,

    /// Directory holding the hook scripts, relative to the repository root
    #[schemars(description = "Directory containing the hook scripts to link")]
    pub hook_scripts: PathBuf,

    #[schemars(description = "Commit message grammar settings")]
    pub commit_msg: CommitMsgPolicy,

    #[schemars(description = "Pre-commit check commands")]
    pub pre_commit: PreCommitConfig,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            hooks: HookConfig::default(),
            hook_scripts: PathBuf::from(DEFAULT_HOOK_SCRIPTS),
            commit_msg: CommitMsgPolicy::default(),
            pre_commit: PreCommitConfig::default(),
        }
    }
}

/// Configuration for gitward
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GitwardConfig {
    #[schemars(description = "Project identity")]
    project: ProjectConfig,

    #[schemars(description = "Git hook settings")]
    git: GitConfig,

    /// Output locale for translated messages (e.g., "en", "es").
    /// When not set, the CLI locale detection is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Output locale for translated messages (e.g., \"en\", \"es\")")]
    locale: Option<String>,
}

/// Errors that can occur when building a `GitwardConfig`.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// The project prefix is empty or contains non-alphanumeric characters.
    InvalidPrefix { prefix: String },
    /// Validation produced warnings that were promoted to errors.
    ValidationFailed(Vec<ConfigWarning>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPrefix { prefix } => {
                write!(f, "invalid project prefix '{}'", prefix)
            }
            ConfigError::ValidationFailed(warnings) => {
                write!(
                    f,
                    "configuration validation failed with {} warning(s)",
                    warnings.len()
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl GitwardConfig {
    /// Create a new [`GitwardConfigBuilder`].
    pub fn builder() -> GitwardConfigBuilder {
        GitwardConfigBuilder::new()
    }

    /// Load config from file
    pub fn load<P: AsRef<Path>>(path: P) -> HookResult<Self> {
        let path = path.as_ref();
        let content = read_config_file(path)?;
        toml::from_str(&content).map_err(|source| HookError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config or use default, returning any load warning
    ///
    /// A config path that cannot be read or parsed falls back to the
    /// default config with a warning, so typos are reported instead of
    /// silently ignored.
    pub fn load_or_default(path: Option<&Path>) -> (Self, Option<String>) {
        match path {
            Some(p) => match Self::load(p) {
                Ok(config) => (config, None),
                Err(e) => {
                    let cause = match &e {
                        HookError::ConfigParse { source, .. } => source.to_string(),
                        other => other.to_string(),
                    };
                    let warning = t!(
                        "core.config.load_warning",
                        path = p.display().to_string(),
                        error = cause
                    );
                    (Self::default(), Some(warning.to_string()))
                }
            },
            None => (Self::default(), None),
        }
    }

    /// Load `<repo_root>/.gitward.toml` if present, defaults otherwise.
    pub fn discover(repo_root: &Path) -> HookResult<Self> {
        let path = repo_root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Validated project prefix, `None` when unset or invalid
    pub fn prefix(&self) -> Option<ProjectPrefix> {
        self.project.prefix.clone().and_then(ProjectPrefix::new)
    }

    /// Raw prefix as written in the config file
    pub fn raw_prefix(&self) -> Option<&str> {
        self.project.prefix.as_deref()
    }

    pub fn hooks(&self) -> &HookConfig {
        &self.git.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut HookConfig {
        &mut self.git.hooks
    }

    /// Hook script directory, resolved against `repo_root` when relative
    pub fn hook_scripts(&self, repo_root: &Path) -> PathBuf {
        if self.git.hook_scripts.is_absolute() {
            self.git.hook_scripts.clone()
        } else {
            repo_root.join(&self.git.hook_scripts)
        }
    }

    pub fn commit_msg_policy(&self) -> &CommitMsgPolicy {
        &self.git.commit_msg
    }

    pub fn pre_commit_checks(&self) -> &[PreCommitCheck] {
        &self.git.pre_commit.checks
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn set_prefix(&mut self, prefix: Option<String>) {
        self.project.prefix = prefix;
    }

    pub fn set_locale(&mut self, locale: Option<String>) {
        self.locale = locale;
    }

    /// Look up a dotted key such as `project.prefix` or `git.hooks.pre-commit`.
    ///
    /// Hook flags resolve to their effective value, so an unlisted known hook
    /// reads as `true`.
    pub fn get(&self, key: &str) -> Option<toml::Value> {
        if let Some(name) = key.strip_prefix("git.hooks.")
            && let Ok(hook) = name.parse::<Hook>()
        {
            return Some(toml::Value::Boolean(self.git.hooks.is_enabled(hook)));
        }

        let root = toml::Value::try_from(self).ok()?;
        key.split('.')
            .try_fold(&root, |value, segment| value.get(segment))
            .cloned()
    }
}

fn read_config_file(path: &Path) -> HookResult<String> {
    let read_err = |source: std::io::Error| HookError::ConfigRead {
        path: path.to_path_buf(),
        source,
    };
    let meta = std::fs::metadata(path).map_err(read_err)?;
    if meta.len() > MAX_CONFIG_SIZE {
        return Err(read_err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("config larger than {} bytes", MAX_CONFIG_SIZE),
        )));
    }
    std::fs::read_to_string(path).map_err(read_err)
}
