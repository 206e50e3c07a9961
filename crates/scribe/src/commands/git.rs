//! `scribe commit` and `scribe push` command implementations.

use std::path::{Path, PathBuf};

use clap::Args;
use scribe_config::Config;
use scribe_project::{GitError, GitRepo};
use scribe_state::{
    AppContext, MemoryPreferences, ProjectContext, RootAttributes, ToastKind, ToastQueue,
};

use super::{flush_toasts, probe_capabilities};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the commit command.
#[derive(Args)]
pub(crate) struct CommitArgs {
    /// Project directory.
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Commit message.
    #[arg(short, long)]
    message: String,

    /// Path to configuration file (default: auto-discover scribe.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Arguments for the push command.
#[derive(Args)]
pub(crate) struct PushArgs {
    /// Project directory.
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Path to configuration file (default: auto-discover scribe.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CommitArgs {
    /// Execute the commit command.
    ///
    /// # Errors
    ///
    /// Returns an error if staging or committing fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        if self.message.trim().is_empty() {
            return Err(CliError::Validation(
                "commit message cannot be empty".to_owned(),
            ));
        }
        let config = Config::load(self.config.as_deref(), None)?;
        let message = self.message;
        run_git(&config, &self.dir, output, "Commit", |repo| {
            repo.commit(&message)
        })
    }
}

impl PushArgs {
    /// Execute the push command.
    ///
    /// # Errors
    ///
    /// Returns an error if `git push` fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        run_git(&config, &self.dir, output, "Push", GitRepo::push)
    }
}

/// Open `dir` as the current project, run `op` on it and report the outcome as toasts.
fn run_git(
    config: &Config,
    dir: &Path,
    output: &Output,
    action: &str,
    op: impl FnOnce(&GitRepo) -> Result<String, GitError>,
) -> Result<(), CliError> {
    let duration = config.toast.duration();
    let system_dark = config.theme_resolved.system_default.is_dark();
    let mut app = AppContext::new(MemoryPreferences::new(), RootAttributes::new(), || {
        system_dark
    })
    .with_toasts(ToastQueue::new().with_default_duration(duration))
    .with_project(ProjectContext::new().with_capabilities(probe_capabilities(dir)));
    app.project.set_project(dir.to_string_lossy());

    if !app.project.is_git_repo() {
        app.toasts.add_with(
            format!("{} has no .git directory", app.project.project_path()),
            ToastKind::Warning,
            duration,
        );
    }

    let repo = GitRepo::open(app.project.project_path());
    let result = op(&repo);
    match &result {
        Ok(stdout) => {
            for line in stdout.lines() {
                output.info(line);
            }
            app.toasts
                .add_with(format!("{action} succeeded"), ToastKind::Success, duration);
        }
        Err(_) => {
            app.toasts
                .add_with(format!("{action} failed"), ToastKind::Error, duration);
        }
    }
    flush_toasts(output, &mut app.toasts);

    result.map(|_| ()).map_err(CliError::from)
}
