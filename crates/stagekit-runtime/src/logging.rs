//! Process-wide `tracing` subscriber setup.
//!
//! Library code only emits events; installing a subscriber is the host's
//! call. [`init`] is a convenience for binaries and demos.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "STAGEKIT_LOG";

/// Filter used when [`LOG_ENV`] is unset or unparseable.
pub const DEFAULT_DIRECTIVES: &str = "warn";

/// Build the filter from [`LOG_ENV`], falling back to [`DEFAULT_DIRECTIVES`].
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install a formatting subscriber filtered by [`LOG_ENV`].
///
/// Returns `false` if a global subscriber was already installed; calling it
/// twice is harmless.
pub fn init() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        assert!(!init());
    }
}
