use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::{
    error::AppError,
    profile::Profile,
    validation::{validate_input_email, validate_input_name},
};

/// Profiles directory, relative to the user's home directory
const PROFILES_DIR: &str = ".config/git-user";
/// Profiles file inside `PROFILES_DIR`
const PROFILES_FILE: &str = "profiles.json";

#[cfg(unix)]
const DIR_MODE: u32 = 0o755;
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Ordered list of stored profiles persisted as a JSON array
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Binds the store to `~/.config/git-user/profiles.json`, creating the directory if needed
    pub fn locate() -> Result<Self, AppError> {
        let home_dir: PathBuf = dirs::home_dir()
            .ok_or_else(|| AppError::Env("failed to find the home directory".to_string()))?;
        let dir: PathBuf = home_dir.join(PROFILES_DIR);
        create_profiles_dir(&dir).map_err(|err| {
            AppError::Env(format!("failed to create {}: {err}", dir.display()))
        })?;
        Ok(Self::at(dir.join(PROFILES_FILE)))
    }

    /// Binds the store to an arbitrary document path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads profiles from the JSON file
    ///
    /// A missing or blank file is an empty list.
    pub fn load(&self) -> Result<Vec<Profile>, AppError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "profiles file absent");
            return Ok(Vec::new());
        }

        let file_contents: Vec<u8> = fs::read(&self.path).map_err(|source| AppError::Io {
            path: self.path.clone(),
            source,
        })?;

        if file_contents.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let profiles: Vec<Profile> =
            serde_json::from_slice(&file_contents).map_err(|source| AppError::StoreCorrupt {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), count = profiles.len(), "loaded profiles");
        Ok(profiles)
    }

    /// Saves profiles to the JSON file
    ///
    /// The document is written to a sibling temporary file and renamed into place,
    /// so readers see either the old or the new list.
    ///
    /// # Arguments
    /// * `profiles` - Profiles to save, in display order
    pub fn save(&self, profiles: &[Profile]) -> Result<(), AppError> {
        let json: String = serde_json::to_string_pretty(profiles)?;
        self.write_atomically(json.as_bytes())
            .map_err(|source| AppError::Io {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), count = profiles.len(), "saved profiles");
        Ok(())
    }

    /// Appends a new profile
    ///
    /// # Arguments
    /// * `name` - Git username, must not already be stored
    /// * `email` - Git email, may repeat across profiles
    pub fn add(&self, name: &str, email: &str) -> Result<(), AppError> {
        validate_input_name(name)?;
        validate_input_email(email)?;

        let mut profiles: Vec<Profile> = self.load()?;
        if profiles.iter().any(|profile| profile.name == name) {
            return Err(AppError::DuplicateName(name.to_string()));
        }

        profiles.push(Profile::new(name, email));
        self.save(&profiles)
    }

    /// Removes the profile called `name` and returns it
    pub fn delete(&self, name: &str) -> Result<Profile, AppError> {
        let mut profiles: Vec<Profile> = self.load()?;
        let index: usize = profiles
            .iter()
            .position(|profile| profile.name == name)
            .ok_or_else(|| AppError::NotFound(name.to_string()))?;

        let removed: Profile = profiles.remove(index);
        self.save(&profiles)?;
        Ok(removed)
    }

    /// Checks whether the exact (name, email) pair is stored
    pub fn contains(&self, name: &str, email: &str) -> Result<bool, AppError> {
        Ok(self
            .load()?
            .iter()
            .any(|profile| profile.matches(name, email)))
    }

    fn write_atomically(&self, contents: &[u8]) -> io::Result<()> {
        let dir: &Path = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        create_profiles_dir(dir)?;

        let mut temp_file = NamedTempFile::new_in(dir)?;
        temp_file.write_all(contents)?;
        temp_file.as_file().sync_all()?;
        set_file_mode(temp_file.as_file())?;
        temp_file.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

#[cfg(unix)]
fn create_profiles_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .recursive(true)
        .mode(DIR_MODE)
        .create(dir)
}

#[cfg(not(unix))]
fn create_profiles_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(unix)]
fn set_file_mode(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(FILE_MODE))
}

#[cfg(not(unix))]
fn set_file_mode(_file: &fs::File) -> io::Result<()> {
    Ok(())
}
