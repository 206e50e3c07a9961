//! Commit and push through the `git` executable.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Git operation errors.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// The `git` process could not be started.
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// The command exited with a non-zero status.
    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },
}

/// A working tree on disk.
#[derive(Debug, Clone)]
pub struct GitRepo {
    path: PathBuf,
}

impl GitRepo {
    /// Use `path` as the working directory for git commands.
    ///
    /// The directory is not checked; a non-repository fails on the first command.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stage every change (`git add .`) and commit it with `message`.
    ///
    /// Returns the standard output of `git commit`.
    pub fn commit(&self, message: &str) -> Result<String, GitError> {
        tracing::info!(path = %self.path.display(), "Committing changes");
        self.run(&["add", "."])?;
        let stdout = self.run(&["commit", "-m", message])?;
        tracing::info!(path = %self.path.display(), "Commit created");
        Ok(stdout)
    }

    /// Push the current branch to its upstream.
    ///
    /// Returns the standard output of `git push`.
    pub fn push(&self) -> Result<String, GitError> {
        tracing::info!(path = %self.path.display(), "Pushing");
        self.run(&["push"])
    }

    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let command = format!("git {}", args.join(" "));
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .output()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;
        check_output(command, &output)
    }
}

fn check_output(command: String, output: &Output) -> Result<String, GitError> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        tracing::warn!(%command, %stderr, "Git command failed");
        return Err(GitError::CommandFailed { command, stderr });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn git(dir: &Path, args: &[&str]) -> bool {
        Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .is_ok_and(|o| o.status.success())
    }

    /// Initialize a repository with a local identity. `None` when git is
    /// not installed.
    fn init_repo() -> Option<TempDir> {
        let temp = TempDir::new().unwrap();
        let ok = git(temp.path(), &["init", "-q"])
            && git(temp.path(), &["config", "user.email", "scribe@example.com"])
            && git(temp.path(), &["config", "user.name", "Scribe"])
            && git(temp.path(), &["config", "commit.gpgsign", "false"]);
        ok.then_some(temp)
    }

    #[test]
    fn test_commit_stages_and_commits() {
        let Some(temp) = init_repo() else {
            return;
        };
        fs::write(temp.path().join("index.md"), "# Hello").unwrap();

        let repo = GitRepo::open(temp.path());
        let stdout = repo.commit("Add index").unwrap();

        assert!(stdout.contains("Add index"), "unexpected output: {stdout}");
        assert!(git(temp.path(), &["rev-parse", "HEAD"]));
    }

    #[test]
    fn test_commit_with_nothing_to_commit_fails() {
        let Some(temp) = init_repo() else {
            return;
        };
        let repo = GitRepo::open(temp.path());

        let err = repo.commit("Empty").unwrap_err();
        match err {
            GitError::CommandFailed { command, .. } => {
                assert_eq!(command, "git commit -m Empty");
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_push_without_remote_fails() {
        let Some(temp) = init_repo() else {
            return;
        };
        fs::write(temp.path().join("a.md"), "a").unwrap();
        let repo = GitRepo::open(temp.path());
        repo.commit("Initial").unwrap();

        assert!(matches!(repo.push(), Err(GitError::CommandFailed { .. })));
    }

    #[test]
    fn test_missing_directory_is_spawn_error() {
        let temp = TempDir::new().unwrap();
        let repo = GitRepo::open(temp.path().join("missing"));

        assert!(matches!(repo.push(), Err(GitError::Spawn { .. })));
        assert_eq!(repo.path(), temp.path().join("missing"));
    }
}
