use std::{
    io,
    process::{Command, Output},
};

use tracing::{debug, warn};

use crate::error::AppError;

/// Git config key holding the identity name
pub const USER_NAME: &str = "user.name";
/// Git config key holding the identity email
pub const USER_EMAIL: &str = "user.email";

/// Captured result of one git invocation
#[derive(Debug, Clone, Default)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
}

impl GitOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// `git config <key>` exits with 1 when the key is not set
    pub fn is_unset_key(&self) -> bool {
        self.code == Some(1)
    }

    fn status(&self) -> String {
        self.code
            .map_or_else(|| "terminated by signal".to_string(), |code| format!("exit status {code}"))
    }
}

/// Runs git with the given arguments
pub trait GitRunner {
    fn run(&self, args: &[&str]) -> io::Result<GitOutput>;
}

/// Spawns the `git` binary found on `PATH`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemGit;

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> io::Result<GitOutput> {
        let git_command_output: Output = Command::new("git").args(args).output()?;
        Ok(GitOutput {
            stdout: String::from_utf8_lossy(&git_command_output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&git_command_output.stderr).into_owned(),
            code: git_command_output.status.code(),
        })
    }
}

/// Global git identity (user.name / user.email)
///
/// Every call goes to git; nothing is cached.
#[derive(Debug, Default, Clone)]
pub struct GitConfig<R> {
    runner: R,
}

impl<R: GitRunner> GitConfig<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Reads a global git config value
    ///
    /// # Arguments
    /// * `key` - Git config key (user.name or user.email)
    ///
    /// Fails with `ExternalMissing` when git is absent or the key is unset.
    /// A key set to the empty string is returned as `""`.
    pub fn get(&self, key: &str) -> Result<String, AppError> {
        debug!(key, "git config --global get");
        match self.runner.run(&["config", "--global", key]) {
            Ok(output) if output.success() => Ok(output.stdout.trim().to_string()),
            Ok(output) if output.is_unset_key() => {
                debug!(key, "git config value unset");
                Err(AppError::ExternalMissing(key.to_string()))
            }
            Ok(output) => {
                warn!(
                    key,
                    status = %output.status(),
                    stderr = output.stderr.trim(),
                    "git config read failed"
                );
                Err(AppError::ExternalMissing(key.to_string()))
            }
            Err(err) => {
                warn!(key, error = %err, "failed to run git");
                Err(AppError::ExternalMissing(key.to_string()))
            }
        }
    }

    /// Sets user.name then user.email in the global scope
    ///
    /// A failure on user.email after user.name succeeded is reported as
    /// `PartialSet`; user.name is not rolled back.
    pub fn set(&self, name: &str, email: &str) -> Result<(), AppError> {
        self.set_value(USER_NAME, name)?;
        self.set_value(USER_EMAIL, email)
            .map_err(|err| AppError::PartialSet(Box::new(err)))
    }

    /// Reads both identity fields, `None` for a field that is unavailable
    pub fn current_identity(&self) -> (Option<String>, Option<String>) {
        (self.get(USER_NAME).ok(), self.get(USER_EMAIL).ok())
    }

    fn set_value(&self, key: &str, value: &str) -> Result<(), AppError> {
        debug!(key, value, "git config --global set");
        let output: GitOutput = self
            .runner
            .run(&["config", "--global", key, value])
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => AppError::ExternalMissing(key.to_string()),
                _ => AppError::External {
                    key: key.to_string(),
                    status: "failed to start".to_string(),
                    stderr: err.to_string(),
                },
            })?;

        if !output.success() {
            return Err(AppError::External {
                key: key.to_string(),
                status: output.status(),
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}
