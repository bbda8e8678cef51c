//! Typed errors raised by the extraction and rewrite pipeline.
//!
//! File-scoped variants carry the offending path so the CLI can attribute
//! them; pipeline-scoped variants abort the whole run.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A source file could not be parsed. Aborts the run.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A rewrite was requested before any catalog exists.
    #[error(
        "catalog {} not found. Run \"parlai extract\" first.",
        path.display()
    )]
    CatalogNotFound { path: PathBuf },

    /// The on-disk catalog does not have the nested string shape.
    #[error("invalid catalog {}: {reason}", path.display())]
    InvalidCatalog { path: PathBuf, reason: String },

    /// A mutated file could not be turned back into valid source.
    /// Only the file itself is affected; it is left untouched on disk.
    #[error("failed to print {}: {message}", path.display())]
    PrintFailure { path: PathBuf, message: String },

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error only concerns one file and the run may continue.
    pub fn is_file_scoped(&self) -> bool {
        matches!(self, Self::PrintFailure { .. })
    }
}
