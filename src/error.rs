use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhpsetError {
    #[error("Failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot render a PHP literal: {reason}")]
    Serialize { reason: String },
}
