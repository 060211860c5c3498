use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::{
    cli::Commands,
    error::AppError,
    git::{GitConfig, GitRunner, USER_EMAIL, USER_NAME},
    profile::Profile,
    storage::ProfileStore,
};

const NOT_IMPORTED_NOTE: &str = "Note: The current git profile is not imported in the profiles list.";
const IMPORT_HINT: &str = "You can import it using the 'import' subcommand.";

/// Ties the profile store to the global git identity
pub struct App<R> {
    store: ProfileStore,
    git: GitConfig<R>,
}

impl<R: GitRunner> App<R> {
    pub fn new(store: ProfileStore, git: GitConfig<R>) -> Self {
        Self { store, git }
    }

    /// Runs one subcommand
    ///
    /// # Arguments
    /// * `out` - Destination of status lines
    /// * `input` - Source of the profile number for `switch`
    pub fn run(
        &self,
        command: &Commands,
        out: &mut impl Write,
        input: &mut impl BufRead,
    ) -> Result<(), AppError> {
        debug!(?command, "running subcommand");
        match command {
            Commands::Add { name, email } => self.add_profile(out, name.as_deref(), email.as_deref()),
            Commands::Delete { name } => self.delete_profile(out, name.as_deref()),
            Commands::List => self.list_profiles(out),
            Commands::Switch => self.switch_profile(out, input),
            Commands::Import => self.import_profile(out),
        }
    }

    /// Prints the active identity and whether it is stored
    pub fn print_banner(&self, out: &mut impl Write) -> Result<(), AppError> {
        match self.active_identity() {
            None => writeln!(out, "No active git profile is set in the global configuration.")?,
            Some(current) => {
                writeln!(out, "Current active git profile: {current}")?;
                let imported: bool = self
                    .store
                    .contains(&current.name, &current.email)
                    .unwrap_or_else(|err| {
                        warn!(error = %err, "could not read profiles for banner");
                        false
                    });
                if !imported {
                    writeln!(out, "{NOT_IMPORTED_NOTE}")?;
                    writeln!(out, "{IMPORT_HINT}")?;
                }
            }
        }
        writeln!(out, "Available subcommands: add, delete, list, switch, import")?;
        Ok(())
    }

    fn add_profile(
        &self,
        out: &mut impl Write,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<(), AppError> {
        let (Some(name), Some(email)) = (non_empty(name), non_empty(email)) else {
            return Err(AppError::Usage(
                "Both --name and --email flags are required".to_string(),
            ));
        };

        self.store.add(name, email)?;
        writeln!(out, "Profile added successfully.")?;
        Ok(())
    }

    fn delete_profile(&self, out: &mut impl Write, name: Option<&str>) -> Result<(), AppError> {
        let Some(name) = non_empty(name) else {
            return Err(AppError::Usage("--name flag is required".to_string()));
        };

        let removed: Profile = self.store.delete(name)?;
        writeln!(out, "Profile deleted successfully.")?;

        if self.active_identity().as_ref() == Some(&removed) {
            writeln!(out, "Note: the deleted profile is still the active git profile.")?;
        }
        Ok(())
    }

    fn list_profiles(&self, out: &mut impl Write) -> Result<(), AppError> {
        let profiles: Vec<Profile> = self.store.load()?;
        let current: Option<Profile> = self.active_identity();
        let marked: Option<usize> = current
            .as_ref()
            .and_then(|current| profiles.iter().position(|profile| profile == current));

        writeln!(out, "Stored profiles:")?;
        for (index, profile) in profiles.iter().enumerate() {
            let marker: char = if marked == Some(index) { '*' } else { ' ' };
            writeln!(out, "[{index}] {profile} {marker}")?;
        }

        if let (Some(current), None) = (current, marked) {
            writeln!(out, "Current active git profile: {current}")?;
            writeln!(out, "{NOT_IMPORTED_NOTE}")?;
            writeln!(out, "{IMPORT_HINT}")?;
        }
        Ok(())
    }

    fn switch_profile(&self, out: &mut impl Write, input: &mut impl BufRead) -> Result<(), AppError> {
        let profiles: Vec<Profile> = self.store.load()?;
        if profiles.is_empty() {
            return Err(AppError::EmptyCatalogue);
        }

        writeln!(out, "Select a profile:")?;
        for (index, profile) in profiles.iter().enumerate() {
            writeln!(out, "[{index}] {profile}")?;
        }
        write!(out, "Enter profile number: ")?;
        out.flush()?;

        let mut raw: Vec<u8> = Vec::new();
        input.read_until(b'\n', &mut raw)?;
        let line: String = String::from_utf8_lossy(&raw).into_owned();
        let selected: &Profile = parse_selection(&line, profiles.len())
            .map(|index| &profiles[index])
            .ok_or_else(|| AppError::InvalidSelection(line.trim().to_string()))?;

        self.git.set(&selected.name, &selected.email)?;
        writeln!(out, "Profile switched to: {selected}")?;
        Ok(())
    }

    fn import_profile(&self, out: &mut impl Write) -> Result<(), AppError> {
        let name: String = self.required_identity_field(USER_NAME, "name")?;
        let email: String = self.required_identity_field(USER_EMAIL, "email")?;

        if self.store.contains(&name, &email)? {
            return Err(AppError::AlreadyImported);
        }

        self.store.add(&name, &email)?;
        writeln!(out, "Current git profile imported: {name} - {email}")?;
        Ok(())
    }

    /// Current identity when both fields are set and non-empty
    ///
    /// Git failures count as "no identity".
    fn active_identity(&self) -> Option<Profile> {
        match self.git.current_identity() {
            (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => {
                Some(Profile::new(name, email))
            }
            _ => None,
        }
    }

    fn required_identity_field(&self, key: &str, field: &'static str) -> Result<String, AppError> {
        match self.git.get(key) {
            Ok(value) if !value.is_empty() => Ok(value),
            Ok(_) => Err(AppError::NoCurrentIdentity(field)),
            Err(err) => {
                debug!(key, error = %err, "current identity unavailable");
                Err(AppError::NoCurrentIdentity(field))
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Zero-based index in `0..len`, parsed from a decimal line
fn parse_selection(line: &str, len: usize) -> Option<usize> {
    line.trim()
        .parse::<i64>()
        .ok()
        .and_then(|index| usize::try_from(index).ok())
        .filter(|index| *index < len)
}
