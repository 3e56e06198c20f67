//! Error types.
//!
//! Nothing here is user-actionable. [`LifeMapError`] marks a caller that
//! broke an input contract (an id outside the static catalog, a blank log
//! entry); the state it targeted is left untouched so the interaction loop
//! can carry on.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeMapError {
    #[error("unknown node id: {0}")]
    UnknownNode(String),
    #[error("unknown sector id: {0}")]
    UnknownSector(String),
    #[error("log entry is empty")]
    EmptyLogEntry,
    #[error("no node is selected")]
    NoSelection,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to parse map config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read map config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
