//! Error types for the splitter.
//!
//! A missing section is only an error under [`MissingSectionPolicy::Fail`];
//! everything else here aborts the run.
//!
//! [`MissingSectionPolicy::Fail`]: crate::config::MissingSectionPolicy::Fail

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the splitter library.
#[derive(Debug, Error)]
pub enum SplitterError {
    /// The source document could not be read.
    #[error("Failed to read source document {}: {source}", .path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source path does not point at a readable file.
    #[error("Invalid source document: {0}")]
    InvalidSource(String),

    /// A marker was not found and the policy says to fail.
    #[error("Section '{marker}' not found (needed by {page})")]
    SectionNotFound { page: String, marker: String },

    /// A page could not be written.
    #[error("Failed to write page {}: {source}", .path.display())]
    WritePage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A manifest page path is absolute or escapes the output root.
    #[error("Invalid page path: '{0}'. Expected a relative path inside the output directory")]
    InvalidPagePath(String),

    /// Two manifest entries target the same file.
    #[error("Duplicate page in manifest: {0}")]
    DuplicatePage(String),

    /// The manifest file could not be read.
    #[error("Failed to read manifest {}: {source}", .path.display())]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest YAML could not be parsed.
    #[error("Manifest parsing failed: {0}")]
    Manifest(#[from] serde_yaml_ng::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitterError>;
