use anyhow::Context;
use clap::Parser;
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::application::use_cases::fetch_subtree::{FetchSubtreeReport, FetchSubtreeUseCase};
use crate::common::error::GitGetError;
use crate::domain::entities::config::{ConfigOverrides, GitGetConfig};
use crate::infrastructure::filesystem::config_store::ConfigStore;
use crate::infrastructure::git::mirror::GitMirror;
use crate::presentation::ui::display::DisplayHelper;

/// gitget - Pull a subtree of a remote git repository into the current project
#[derive(Parser, Debug)]
#[command(name = "gitget")]
#[command(about = "Pull a subtree of a remote git repository into the current project")]
#[command(version, long_version = env!("GITGET_LONG_VERSION"))]
pub struct Cli {
    /// Working directory (defaults to current directory)
    #[arg(short = 'C', long)]
    pub directory: Option<PathBuf>,

    /// Remote repository to mirror
    #[arg(long, env = "GITGET_URL")]
    pub url: Option<String>,

    /// Subtree inside the mirror to copy from
    #[arg(long, env = "GITGET_SOURCE")]
    pub source: Option<String>,

    /// Directory inside the project to copy into
    #[arg(long, env = "GITGET_DESTINATION")]
    pub destination: Option<String>,

    /// Directory that must exist in the working directory
    #[arg(long, env = "GITGET_MARKER")]
    pub marker: Option<String>,

    /// Directory holding the shared mirrors
    #[arg(long, env = "GITGET_CACHE_ROOT")]
    pub cache_root: Option<PathBuf>,

    /// Configuration file (defaults to gitget.yml in the working directory)
    #[arg(long, env = "GITGET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run even if the marker directory is missing
    #[arg(long, env = "GITGET_SKIP_MARKER_CHECK")]
    pub skip_marker_check: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Options given on the command line or through the environment
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            url: self.url.clone(),
            source: self.source.clone(),
            destination: self.destination.clone(),
            marker: self.marker.clone(),
            cache_root: self.cache_root.clone(),
            // An absent flag must not reset a config file value
            skip_marker_check: self.skip_marker_check.then_some(true),
        }
    }
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn run(self) -> ExitCode {
        self.init_tracing();

        colored::control::set_override(!self.cli.no_color);
        let display = DisplayHelper::new(!self.cli.no_color);

        let status = match self.execute() {
            Ok(report) => {
                Self::report(&display, &report);
                ExitCode::SUCCESS
            }
            Err(e) => {
                display.error(&format!("{:#}", e));
                for path in Self::conflicted_paths(&e) {
                    display.warning(&format!("Conflict in {}", path));
                }
                ExitCode::FAILURE
            }
        };

        display.finish();
        status
    }

    fn init_tracing(&self) {
        let filter = if self.cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        };

        // Already installed when embedded in tests
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    fn execute(&self) -> anyhow::Result<FetchSubtreeReport> {
        let invocation_dir = env::current_dir().context("Failed to read the current directory")?;
        let working_dir = self.working_dir(&invocation_dir);
        let config = self.load_config(&invocation_dir, &working_dir)?;
        debug!("Effective configuration: {:?}", config);

        let use_case = FetchSubtreeUseCase::new(config, GitMirror::default());
        Ok(use_case.execute(&working_dir)?)
    }

    fn working_dir(&self, invocation_dir: &Path) -> PathBuf {
        match &self.cli.directory {
            Some(dir) => invocation_dir.join(dir),
            None => invocation_dir.to_path_buf(),
        }
    }

    /// defaults < config file < CLI/env
    ///
    /// `--config` is relative to where gitget was started, discovery looks in
    /// the working directory.
    fn load_config(
        &self,
        invocation_dir: &Path,
        working_dir: &Path,
    ) -> anyhow::Result<GitGetConfig> {
        let explicit = self.cli.config.as_ref().map(|path| invocation_dir.join(path));
        let from_file = ConfigStore::new().load(working_dir, explicit.as_deref())?;

        let config = GitGetConfig::default()
            .apply(from_file)
            .apply(self.cli.overrides())
            .validated()?;
        Ok(config)
    }

    /// Files to resolve by hand after a conflicting pull
    fn conflicted_paths(error: &anyhow::Error) -> &[String] {
        match error.downcast_ref::<GitGetError>() {
            Some(GitGetError::MergeConflict {
                conflicted_paths, ..
            }) => conflicted_paths,
            _ => &[],
        }
    }

    fn report(display: &DisplayHelper, report: &FetchSubtreeReport) {
        let destination = display.format_path(&report.destination);
        match report.copy {
            Some(copy) => display.success(&format!(
                "Moved into {} ({} files)",
                destination, copy.files_copied
            )),
            None => display.info(&format!(
                "Apparently, there were no significant changes to move into {}",
                destination
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_conflicted_paths_are_listed() {
        let conflict = anyhow::Error::from(GitGetError::merge_conflict(
            "/tmp/mirror",
            vec!["a.txt".to_string(), "sub/b.txt".to_string()],
        ));
        assert_eq!(
            CliApp::conflicted_paths(&conflict),
            &["a.txt".to_string(), "sub/b.txt".to_string()]
        );

        let other = anyhow::Error::from(GitGetError::git_error("fetch failed"));
        assert!(CliApp::conflicted_paths(&other).is_empty());
    }

    #[test]
    fn test_no_arguments_means_no_overrides() {
        let cli = Cli::try_parse_from(["gitget"]).unwrap();
        assert_eq!(cli.directory, None);
        assert!(!cli.verbose);
        // Environment may carry GITGET_* values, so only the flag is checked
        if !cli.skip_marker_check {
            assert_eq!(cli.overrides().skip_marker_check, None);
        }
    }

    #[test]
    fn test_arguments_become_overrides() {
        let cli = Cli::try_parse_from([
            "gitget",
            "-C",
            "project",
            "--url",
            "https://github.com/Org/Repo.git",
            "--source",
            "Packages/Tools",
            "--destination",
            "Assets/Tools",
            "--marker",
            "Packages",
            "--cache-root",
            "/tmp/mirrors",
            "--skip-marker-check",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(cli.directory, Some(PathBuf::from("project")));
        assert_eq!(
            overrides.url.as_deref(),
            Some("https://github.com/Org/Repo.git")
        );
        assert_eq!(overrides.source.as_deref(), Some("Packages/Tools"));
        assert_eq!(overrides.destination.as_deref(), Some("Assets/Tools"));
        assert_eq!(overrides.marker.as_deref(), Some("Packages"));
        assert_eq!(overrides.cache_root, Some(PathBuf::from("/tmp/mirrors")));
        assert_eq!(overrides.skip_marker_check, Some(true));
    }
}
