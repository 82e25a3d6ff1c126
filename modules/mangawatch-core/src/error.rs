use thiserror::Error;

/// Run-fatal errors. Anything here terminates the run with a diagnostic
/// and leaves the registry file untouched (save failures excepted — by
/// then the run has already computed its result and the failure is
/// surfaced, not swallowed).
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Registry is empty: {0}")]
    RegistryEmpty(String),

    #[error("Registry row malformed: {0}")]
    RegistryMalformed(String),

    #[error("Registry I/O error: {0}")]
    Io(String),
}

/// Per-feed check failures. Isolated at the orchestrator boundary; a feed
/// that fails is skipped for the run, its row stays untouched, and the
/// remaining feeds proceed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckFailure {
    #[error("page fetch failed: {0}")]
    Fetch(String),

    #[error("locator did not resolve: {0}")]
    LocatorNotFound(String),

    #[error("locator matched no elements")]
    NoElementsMatched,

    #[error("no fragments to parse")]
    EmptyFragments,

    #[error("no numeral in fragments")]
    NoNumeral,
}
