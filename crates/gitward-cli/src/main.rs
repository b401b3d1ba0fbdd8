//! gitward CLI
//!
//! Exit codes: 0 success, 1 validation or check failure, 2 operational error.

rust_i18n::i18n!("locales", fallback = "en");

mod locale;

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use gitward_core::config::CONFIG_FILE_NAME;
use gitward_core::hooks::{config_diagnostics, status_diagnostics};
use gitward_core::{
    Diagnostic, DiagnosticLevel, GitwardConfig, HookStatus, InstallReport, LinkState,
    ProjectPrefix, find_repo_root, repo, validate_with,
};
use rust_i18n::t;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gitward")]
#[command(author, version, about = "Git hook installer and commit message checker")]
struct Cli {
    /// Config file (default: <repo>/.gitward.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output language (e.g. en, es)
    #[arg(long, global = true)]
    locale: Option<String>,

    /// List supported locales and exit
    #[arg(long)]
    list_locales: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Link the enabled hook scripts into .git/hooks
    Install(HookDirs),

    /// Remove hook links that point at the gitward scripts
    Uninstall(HookDirs),

    /// Show each hook's configured and installed state
    Status(HookDirs),

    /// Validate a commit message file (run by the commit-msg hook)
    CommitMsg {
        /// Path to the commit message file
        file: PathBuf,

        /// Project prefix, overriding [project] prefix
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Run the configured pre-commit checks
    PreCommit,

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args)]
struct HookDirs {
    /// Directory with the hook scripts (default: [git] hook_scripts)
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Git hooks directory (default: <repo>/.git/hooks)
    #[arg(long)]
    hooks_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the value at a dotted key, e.g. git.hooks.pre-commit
    Get { key: String },

    /// Print the JSON schema for .gitward.toml
    Schema,
}

/// Repository root and configuration shared by the subcommands
struct Workspace {
    root: Option<PathBuf>,
    config: GitwardConfig,
    config_path: PathBuf,
}

impl Workspace {
    fn require_root(&self) -> Result<&Path> {
        match &self.root {
            Some(root) => Ok(root),
            None => {
                let cwd = std::env::current_dir().context("Failed to read current directory")?;
                Err(gitward_core::HookError::NotARepository { path: cwd }.into())
            }
        }
    }

    /// Explicit flags win; the repository is only required to derive a missing one.
    fn hook_dirs(&self, dirs: &HookDirs) -> Result<(PathBuf, PathBuf)> {
        let hooks_dir = match &dirs.hooks_dir {
            Some(dir) => dir.clone(),
            None => repo::hooks_dir(self.require_root()?),
        };
        let source_dir = match &dirs.source_dir {
            Some(dir) => dir.clone(),
            None => self.config.hook_scripts(self.require_root()?),
        };
        Ok((hooks_dir, source_dir))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", t!("cli.error").red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env("GITWARD_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    if cli.list_locales {
        locale::init(cli.locale.as_deref(), None);
        locale::print_supported_locales();
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(ExitCode::from(2));
    };

    // `status` reports a broken config instead of aborting on it.
    let lenient = matches!(command, Commands::Status(_));
    let (workspace, load_warning) = load_workspace(cli.config.as_deref(), lenient)?;
    locale::init(cli.locale.as_deref(), workspace.config.locale());
    if let Some(warning) = load_warning {
        print_warning(&warning);
    }

    match command {
        Commands::Install(dirs) => cmd_install(&workspace, &dirs),
        Commands::Uninstall(dirs) => cmd_uninstall(&workspace, &dirs),
        Commands::Status(dirs) => cmd_status(&workspace, &dirs),
        Commands::CommitMsg { file, prefix } => cmd_commit_msg(&workspace, &file, prefix),
        Commands::PreCommit => cmd_pre_commit(&workspace),
        Commands::Config { action } => cmd_config(&workspace, action),
    }
}

fn load_workspace(
    explicit: Option<&Path>,
    lenient: bool,
) -> Result<(Workspace, Option<String>)> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let root = find_repo_root(&cwd).ok();
    debug!(root = ?root, "repository root");

    let config_path = match (explicit, &root) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(root)) => root.join(CONFIG_FILE_NAME),
        (None, None) => cwd.join(CONFIG_FILE_NAME),
    };
    let present = explicit.is_some() || config_path.is_file();

    let (config, warning) = if !present {
        (GitwardConfig::default(), None)
    } else if lenient {
        GitwardConfig::load_or_default(Some(&config_path))
    } else {
        (GitwardConfig::load(&config_path)?, None)
    };

    Ok((
        Workspace {
            root,
            config,
            config_path,
        },
        warning,
    ))
}

fn cmd_install(ws: &Workspace, dirs: &HookDirs) -> Result<ExitCode> {
    for warning in ws.config.validate() {
        print_warning(&format!("{}: {}", warning.field, warning.message));
    }

    let (hooks_dir, source_dir) = ws.hook_dirs(dirs)?;
    let report = gitward_core::install(ws.config.hooks(), &hooks_dir, &source_dir)?;
    print_report(&report);
    println!(
        "{}",
        t!(
            "cli.install.done",
            dir = hooks_dir.display().to_string(),
            changed = report.changed().to_string()
        )
        .green()
    );
    Ok(ExitCode::SUCCESS)
}

fn cmd_uninstall(ws: &Workspace, dirs: &HookDirs) -> Result<ExitCode> {
    let (hooks_dir, source_dir) = ws.hook_dirs(dirs)?;
    let report = gitward_core::uninstall(&hooks_dir, &source_dir)?;
    print_report(&report);
    println!(
        "{}",
        t!(
            "cli.uninstall.done",
            dir = hooks_dir.display().to_string(),
            changed = report.changed().to_string()
        )
    );
    Ok(ExitCode::SUCCESS)
}

fn cmd_status(ws: &Workspace, dirs: &HookDirs) -> Result<ExitCode> {
    let key_diagnostics = config_diagnostics(ws.config.hooks(), &ws.config_path);
    if !key_diagnostics.is_empty() {
        print_diagnostics(&key_diagnostics);
        return Ok(ExitCode::from(1));
    }

    let (hooks_dir, source_dir) = ws.hook_dirs(dirs)?;
    let statuses = gitward_core::status(ws.config.hooks(), &hooks_dir, &source_dir)?;

    println!(
        "{:<12} {:<8} {}",
        t!("cli.status.hook").bold(),
        t!("cli.status.enabled").bold(),
        t!("cli.status.state").bold()
    );
    for status in &statuses {
        println!("{}", status_row(status));
    }

    let diagnostics = status_diagnostics(&statuses, &hooks_dir, &source_dir);
    if diagnostics.is_empty() {
        println!("{}", t!("cli.status.healthy").green());
        return Ok(ExitCode::SUCCESS);
    }
    print_diagnostics(&diagnostics);
    let failed = diagnostics
        .iter()
        .any(|d| d.level == DiagnosticLevel::Error);
    Ok(if failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn status_row(status: &HookStatus) -> String {
    let enabled = if status.enabled {
        t!("cli.status.flag_on")
    } else {
        t!("cli.status.flag_off")
    };
    let state = match &status.state {
        LinkState::Linked => t!("cli.status.linked").green(),
        LinkState::Missing if status.enabled => t!("cli.status.missing").yellow(),
        LinkState::Missing => t!("cli.status.missing").normal(),
        LinkState::Stale { target: Some(target) } => {
            format!("{} -> {}", t!("cli.status.stale"), target.display()).yellow()
        }
        LinkState::Stale { target: None } => t!("cli.status.foreign").yellow(),
    };
    format!("{:<12} {:<8} {}", status.hook.as_str(), enabled, state)
}

fn cmd_commit_msg(ws: &Workspace, file: &Path, prefix: Option<String>) -> Result<ExitCode> {
    let prefix = resolve_prefix(ws, prefix)?;
    let bytes = std::fs::read(file).with_context(|| {
        t!("cli.commit_msg.read_failed", path = file.display().to_string()).to_string()
    })?;
    // Messages written under a non-UTF-8 i18n.commitEncoding are still judged by the grammar.
    let message = String::from_utf8_lossy(&bytes);

    match validate_with(&message, &prefix, ws.config.commit_msg_policy()) {
        Ok(()) => {
            debug!(file = %file.display(), "commit message accepted");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            print_diagnostics(&[err.to_diagnostic(file)]);
            Ok(ExitCode::from(1))
        }
    }
}

fn resolve_prefix(ws: &Workspace, flag: Option<String>) -> Result<ProjectPrefix> {
    let raw = match flag {
        Some(raw) => raw,
        None => ws
            .config
            .raw_prefix()
            .map(str::to_string)
            .ok_or_else(|| anyhow!(t!("cli.commit_msg.no_prefix").to_string()))?,
    };
    ProjectPrefix::new(raw.clone())
        .ok_or_else(|| anyhow!(t!("cli.commit_msg.invalid_prefix", prefix = raw).to_string()))
}

fn cmd_pre_commit(ws: &Workspace) -> Result<ExitCode> {
    let root = ws.require_root()?;
    let checks = ws.config.pre_commit_checks();
    if checks.is_empty() {
        println!("{}", t!("cli.pre_commit.none"));
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = gitward_core::run_checks(checks, root);
    if outcome.passed() {
        println!(
            "{}",
            t!("cli.pre_commit.passed", count = checks.len().to_string()).green()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let failed: Vec<&str> = outcome.failures().map(|r| r.name.as_str()).collect();
    eprintln!(
        "{}",
        t!(
            "cli.pre_commit.failed",
            count = failed.len().to_string(),
            names = failed.join(", ")
        )
        .red()
        .bold()
    );
    Ok(ExitCode::from(1))
}

fn cmd_config(ws: &Workspace, action: ConfigAction) -> Result<ExitCode> {
    match action {
        ConfigAction::Get { key } => {
            let value = ws
                .config
                .get(&key)
                .ok_or_else(|| anyhow!(t!("cli.config.unknown_key", key = key.as_str()).to_string()))?;
            match value {
                toml::Value::String(s) => println!("{}", s),
                other => println!("{}", other),
            }
        }
        ConfigAction::Schema => {
            let schema = gitward_core::config::generate_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_report(report: &InstallReport) {
    for (hook, action) in report.actions() {
        let label = action.to_string();
        let label = if action.is_change() {
            label.cyan()
        } else {
            label.dimmed()
        };
        println!("  {:<12} {}", hook.as_str(), label);
    }
}

fn print_warning(message: &str) {
    eprintln!("{}: {}", t!("cli.warning").yellow().bold(), message);
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        let level = match diag.level {
            DiagnosticLevel::Error => t!("cli.error").red().bold(),
            DiagnosticLevel::Warning => t!("cli.warning").yellow().bold(),
        };
        let name = diag
            .rule_name()
            .map(|name| format!(" {}", name.dimmed()))
            .unwrap_or_default();
        eprintln!("{}[{}]{}: {}", level, diag.rule, name, diag.message);
        eprintln!("  --> {}", diag.file.display());
        if let Some(suggestion) = &diag.suggestion {
            eprintln!("  {}: {}", t!("cli.help").cyan(), suggestion);
        }
    }
}
