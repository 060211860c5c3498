use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `GIT_USER_LOG=debug`
pub const LOG_ENV: &str = "GIT_USER_LOG";

/// Initializes diagnostics on stderr so stdout only carries command output
pub fn init_logging() {
    let filter: EnvFilter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .try_init();
}
