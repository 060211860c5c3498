//! Test utilities shared across test modules

use std::{cell::RefCell, collections::HashMap, io};

use tempfile::TempDir;

use crate::{
    git::{GitOutput, GitRunner},
    storage::ProfileStore,
};

/// In-memory stand-in for `git config --global`
///
/// Records every invocation so tests can assert on the exact arguments.
#[derive(Debug, Default)]
pub struct FakeGit {
    values: RefCell<HashMap<String, String>>,
    calls: RefCell<Vec<Vec<String>>>,
    failing_key: RefCell<Option<String>>,
    corrupt: RefCell<bool>,
    missing: bool,
}

impl FakeGit {
    pub fn with_identity(name: &str, email: &str) -> Self {
        let fake = Self::default();
        fake.put("user.name", name);
        fake.put("user.email", email);
        fake
    }

    /// Behaves as if git is not installed
    pub fn missing_binary() -> Self {
        Self {
            missing: true,
            ..Self::default()
        }
    }

    pub fn put(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    /// Makes writes to `key` exit with status 255
    pub fn fail_writes_to(&self, key: &str) {
        *self.failing_key.borrow_mut() = Some(key.to_string());
    }

    /// Makes every invocation exit with status 3, as git does for an unreadable config file
    pub fn corrupt_config(&self) {
        *self.corrupt.borrow_mut() = true;
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }
}

impl GitRunner for FakeGit {
    fn run(&self, args: &[&str]) -> io::Result<GitOutput> {
        self.calls
            .borrow_mut()
            .push(args.iter().map(|arg| arg.to_string()).collect());

        if self.missing {
            return Err(io::Error::new(io::ErrorKind::NotFound, "git not found"));
        }

        if *self.corrupt.borrow() {
            return Ok(GitOutput {
                stderr: "fatal: bad config line 1 in file .gitconfig\n".to_string(),
                code: Some(3),
                ..GitOutput::default()
            });
        }

        match args {
            ["config", "--global", key] => Ok(match self.value(key) {
                Some(value) => GitOutput {
                    stdout: format!("{value}\n"),
                    code: Some(0),
                    ..GitOutput::default()
                },
                None => GitOutput {
                    code: Some(1),
                    ..GitOutput::default()
                },
            }),
            ["config", "--global", key, value] => {
                if self.failing_key.borrow().as_deref() == Some(*key) {
                    return Ok(GitOutput {
                        stderr: "error: could not lock config file\n".to_string(),
                        code: Some(255),
                        ..GitOutput::default()
                    });
                }
                self.put(key, value);
                Ok(GitOutput {
                    code: Some(0),
                    ..GitOutput::default()
                })
            }
            _ => Ok(GitOutput {
                stderr: "usage: git config".to_string(),
                code: Some(129),
                ..GitOutput::default()
            }),
        }
    }
}

/// Creates a profile store inside a temporary home directory
pub fn setup_test_store(temp_dir: &TempDir) -> ProfileStore {
    ProfileStore::at(
        temp_dir
            .path()
            .join(".config")
            .join("git-user")
            .join("profiles.json"),
    )
}
