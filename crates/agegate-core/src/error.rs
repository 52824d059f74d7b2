use thiserror::Error;

/// Errors raised while wiring the gate into a host page.
///
/// These are integration errors: nothing sensible can happen after one, so
/// they are reported to the caller instead of being recovered from.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("required anchor element not found: {0}")]
    MissingAnchor(String),

    #[error("invalid gate configuration: {0}")]
    InvalidConfig(String),

    #[error("dom operation failed: {0}")]
    Dom(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors from a persisted-choice store.
///
/// The engine logs and swallows these; a visitor whose store is broken is
/// simply asked again on the next page load.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("persistence unavailable: {0}")]
    Unavailable(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
