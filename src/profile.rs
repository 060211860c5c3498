use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents a Git identity stored in the profiles file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    /// Git username (user.name)
    pub name: String,
    /// Git email address (user.email)
    pub email: String,
}

impl Profile {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// True when both fields match exactly
    pub fn matches(&self, name: &str, email: &str) -> bool {
        self.name == name && self.email == email
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.email)
    }
}
