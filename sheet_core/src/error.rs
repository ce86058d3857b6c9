//! Engine error taxonomy
//!
//! Unparsable text is skipped, never reported. Recoverable DR-change
//! problems come back as an unchanged `DrChangeOutcome`. The variants here
//! are the failures a caller must handle.

use crate::config::ConfigError;
use crate::persistence::PersistenceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Caller-contract violation: the entry index does not exist
    #[error("no damage accumulator entry at index {0}")]
    UnknownAccumulatorEntry(usize),
}
