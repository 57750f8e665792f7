//! Error taxonomy for the fallible boundary of the core.
//!
//! Extraction itself never fails a batch: per-file problems become `error`
//! annotations on the FileRecord. The variants here cover the operations
//! that can legitimately fail as a whole — scanning a root that does not
//! exist and serializing output.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("path does not exist or is not a directory: {0}")]
    InvalidRoot(PathBuf),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
