use super::*;

impl GitwardConfig {
    /// Validate the configuration and return any warnings.
    ///
    /// This performs semantic validation beyond what TOML parsing can check:
    /// - Every `[git.hooks]` key names a known hook
    /// - The project prefix is set and well-formed when commit-msg is enabled
    /// - Pre-commit checks have a command to run
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        for name in self.git.hooks.unknown_keys() {
            warnings.push(ConfigWarning {
                field: format!("git.hooks.{}", name),
                message: t!(
                    "core.hooks.unknown_hook",
                    name = name,
                    known = Hook::known_names()
                )
                .to_string(),
                suggestion: Some(t!("core.hooks.unknown_hook_suggestion").to_string()),
            });
        }

        match self.project.prefix.as_deref() {
            Some(prefix) if ProjectPrefix::new(prefix).is_none() => {
                warnings.push(ConfigWarning {
                    field: "project.prefix".to_string(),
                    message: t!("core.config.invalid_prefix", prefix = prefix).to_string(),
                    suggestion: None,
                });
            }
            None if self.git.hooks.is_enabled(Hook::CommitMsg) => {
                warnings.push(ConfigWarning {
                    field: "project.prefix".to_string(),
                    message: t!("core.config.missing_prefix").to_string(),
                    suggestion: None,
                });
            }
            _ => {}
        }

        if self.git.commit_msg.min_summary_length == 0 {
            warnings.push(ConfigWarning {
                field: "git.commit_msg.min_summary_length".to_string(),
                message: t!("core.config.zero_summary_length").to_string(),
                suggestion: None,
            });
        }

        for check in &self.git.pre_commit.checks {
            if check.command.is_empty() {
                warnings.push(ConfigWarning {
                    field: "git.pre_commit.checks".to_string(),
                    message: t!("core.config.empty_check_command", name = check.name.as_str())
                        .to_string(),
                    suggestion: None,
                });
            }
        }

        warnings
    }
}

/// Warning from configuration validation.
///
/// These warnings indicate potential issues with the configuration that
/// don't prevent gitward from running but may indicate user mistakes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// The field path that has the issue (e.g., "git.hooks.pre-push")
    pub field: String,
    /// Description of the issue
    pub message: String,
    /// Optional suggestion for how to fix the issue
    pub suggestion: Option<String>,
}

/// Generate a JSON Schema for `.gitward.toml`.
///
/// This can be used to provide editor autocompletion and validation
/// for the configuration file.
///
/// # Example
///
/// ```rust
/// use gitward_core::config::generate_schema;
///
/// let schema = generate_schema();
/// let json = serde_json::to_string_pretty(&schema).unwrap();
/// assert!(json.contains("hook_scripts"));
/// ```
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(GitwardConfig)
}
