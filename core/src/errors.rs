use thiserror::Error;
use top50_model::Week;

/// Errors that can occur with finding the config or data directories.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Unable to find the config directory for top50.")]
    Config,
    #[error("Unable to find the data directory for top50.")]
    Data,
}

/// Ways an import document can be beyond repair.
///
/// Everything the normalizer can fix becomes a correction instead; these are
/// the cases where there is nothing left to import. All of them are
/// recoverable at the caller.
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("document is not valid JSON: {0}")]
    MalformedRootJson(#[from] serde_json::Error),
    #[error("document has no entries list")]
    MissingEntriesList,
    #[error("no valid entries left after repair")]
    NoValidEntries,
}

/// Errors from deriving charts out of stored snapshots.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("no chart snapshot for week {0}")]
    WeekNotFound(Week),
    #[error("track {0:?} has never charted")]
    TrackNotFound(String),
}
