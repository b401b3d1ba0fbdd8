use super::*;

/// Builder for constructing a [`GitwardConfig`] with validation.
///
/// Uses the `&mut Self` return pattern for chaining setter calls, with a
/// terminal `build()` that validates and returns
/// `Result<GitwardConfig, ConfigError>`.
///
/// # Examples
///
/// ```rust
/// use gitward_core::config::GitwardConfig;
/// use gitward_core::hooks::Hook;
///
/// let config = GitwardConfig::builder()
///     .prefix("PFX")
///     .hook(Hook::PreCommit, false)
///     .build()
///     .expect("valid config");
/// assert!(!config.hooks().is_enabled(Hook::PreCommit));
/// ```
pub struct GitwardConfigBuilder {
    prefix: Option<String>,
    hooks: HookConfig,
    hook_scripts: Option<PathBuf>,
    policy: Option<CommitMsgPolicy>,
    checks: Vec<PreCommitCheck>,
    locale: Option<String>,
}

impl GitwardConfigBuilder {
    /// Prefer [`GitwardConfig::builder()`] over calling this directly.
    pub(super) fn new() -> Self {
        Self {
            prefix: None,
            hooks: HookConfig::new(),
            hook_scripts: None,
            policy: None,
            checks: Vec::new(),
            locale: None,
        }
    }

    pub fn prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn hook(&mut self, hook: Hook, enabled: bool) -> &mut Self {
        self.hooks.set(hook, enabled);
        self
    }

    pub fn hook_scripts(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.hook_scripts = Some(dir.into());
        self
    }

    pub fn commit_msg_policy(&mut self, policy: CommitMsgPolicy) -> &mut Self {
        self.policy = Some(policy);
        self
    }

    pub fn check(&mut self, check: PreCommitCheck) -> &mut Self {
        self.checks.push(check);
        self
    }

    pub fn locale(&mut self, locale: impl Into<String>) -> &mut Self {
        self.locale = Some(locale.into());
        self
    }

    /// Build the config and run validation.
    ///
    /// Returns `Err(ConfigError)` if the prefix is malformed or
    /// [`GitwardConfig::validate`] reports any warning.
    pub fn build(&mut self) -> Result<GitwardConfig, ConfigError> {
        if let Some(prefix) = &self.prefix
            && ProjectPrefix::new(prefix.as_str()).is_none()
        {
            return Err(ConfigError::InvalidPrefix {
                prefix: prefix.clone(),
            });
        }

        let config = self.build_unchecked();
        let warnings = config.validate();
        if !warnings.is_empty() {
            return Err(ConfigError::ValidationFailed(warnings));
        }
        Ok(config)
    }

    /// Build without validation. Drains the builder.
    pub fn build_unchecked(&mut self) -> GitwardConfig {
        let defaults = GitConfig::default();
        GitwardConfig {
            project: ProjectConfig {
                prefix: self.prefix.take(),
            },
            git: GitConfig {
                hooks: std::mem::take(&mut self.hooks),
                hook_scripts: self.hook_scripts.take().unwrap_or(defaults.hook_scripts),
                commit_msg: self.policy.take().unwrap_or(defaults.commit_msg),
                pre_commit: PreCommitConfig {
                    checks: std::mem::take(&mut self.checks),
                },
            },
            locale: self.locale.take(),
        }
    }
}

impl Default for GitwardConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
