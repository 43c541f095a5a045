//! Dies emit [`tracing`] events (mostly at `TRACE` level) while they edit nested collections.
//! Applications usually install their own subscriber; [`initialize_logging`] is a minimal one for
//! tests and small tools.

use snafu::{ResultExt, Snafu};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to install the global tracing subscriber"))]
    InstallSubscriber {
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Initializes `tracing` logging with the filter read from the environment variable `env`.
///
/// We encourage the variable to be the application name plus `_LOG`, e.g. `MY_TESTS_LOG=trace`.
/// If the variable is not set (or invalid), the maximum log level is INFO.
///
/// Fails if a global subscriber has already been installed.
pub fn initialize_logging(env: &str) -> Result<(), Error> {
    let filter = EnvFilter::try_from_env(env)
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context(InstallSubscriberSnafu)
}

#[cfg(test)]
mod tests {
    use tracing::{debug, info};

    use super::*;

    // This is mostly a sanity check, run
    //      DIES_TEST_LOG=trace cargo test logging -- --nocapture
    // to see the messages.
    #[test]
    fn initialize_logging_only_once() {
        initialize_logging("DIES_TEST_LOG").expect("first initialization succeeds");

        info!("INFO level messages should be seen by default.");
        debug!("DEBUG level messages should be seen only if DIES_TEST_LOG is set.");

        assert!(matches!(
            initialize_logging("DIES_TEST_LOG"),
            Err(Error::InstallSubscriber { .. })
        ));
    }
}
