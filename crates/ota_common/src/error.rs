//! Error types for the OTA server.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OtaError {
    #[error("companion metadata file not found: {0}")]
    MetadataNotFound(PathBuf),

    #[error("missing `{key}` under [{section}] in companion metadata")]
    MetadataKeyMissing { section: &'static str, key: &'static str },

    #[error("filename `{0}` does not match the update naming convention")]
    BadUpdateName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
