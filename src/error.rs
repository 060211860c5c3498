use std::path::PathBuf;

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Home directory or config directory unavailable
    #[error("environment error: {0}")]
    Env(String),
    /// Error reading or writing the profiles file
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Profiles file exists but is not a valid profile list
    #[error("profiles file {} is corrupt: {source}", path.display())]
    StoreCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Error writing to the terminal or reading the selection
    #[error("console i/o error: {0}")]
    Console(#[from] std::io::Error),
    /// Error during JSON serialization
    #[error("json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    /// Error during input validation.
    #[error("validation error: {0}")]
    Validation(String),
    /// Missing or malformed command-line flags
    #[error("{0}")]
    Usage(String),
    #[error("profile with name '{0}' already exists")]
    DuplicateName(String),
    #[error("profile with name '{0}' not found")]
    NotFound(String),
    #[error("no profiles found, add a profile using 'git-user add'")]
    EmptyCatalogue,
    #[error("invalid selection: '{0}'")]
    InvalidSelection(String),
    #[error("current git profile already exists in profiles")]
    AlreadyImported,
    /// Current identity field is unset, empty or unreadable
    #[error("no current git user {0} found")]
    NoCurrentIdentity(&'static str),
    /// Git is absent or reported the key as unset
    #[error("git config value for '{0}' is unavailable")]
    ExternalMissing(String),
    /// Git ran but failed
    #[error("git config {key} failed ({status}): {stderr}")]
    External {
        key: String,
        status: String,
        stderr: String,
    },
    /// user.name was written but user.email was not
    #[error("git identity partially updated, user.email was not set: {0}")]
    PartialSet(#[source] Box<AppError>),
}
