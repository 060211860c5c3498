use clap::{Parser, Subcommand};

/// One-line usage shown when no subcommand is given
pub const USAGE: &str = "Usage: git-user [add|delete|list|switch|import]";

/// CLI arguments parser using `clap`
#[derive(Parser, Debug)]
#[command(
    name = "git-user",
    version,
    about = "Switch the global Git identity between stored profiles",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Do not print the active profile banner
    #[arg(short, long, global = true)]
    pub quiet: bool,
    /// Subcommand chosen to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Stores a new profile
    Add {
        /// Git user name
        #[arg(long)]
        name: Option<String>,
        /// Git user email
        #[arg(long)]
        email: Option<String>,
    },
    /// Deletes a stored profile
    Delete {
        /// Git user name to delete
        #[arg(long)]
        name: Option<String>,
    },
    /// Displays all stored profiles, marking the active one
    List,
    /// Interactively applies a stored profile to the global Git config
    Switch,
    /// Stores the active global Git identity as a profile
    Import,
}

impl Commands {
    /// Prefix for errors reported while running this subcommand
    pub fn error_context(&self) -> &'static str {
        match self {
            Commands::Add { .. } => "Error adding profile",
            Commands::Delete { .. } => "Error deleting profile",
            Commands::List => "Error listing profiles",
            Commands::Switch => "Error switching profile",
            Commands::Import => "Error importing current profile",
        }
    }
}
