//! Configuration constants and validation functions for the splitter.

use std::path::{Component, Path, PathBuf};

use clap::ValueEnum;

use crate::error::{Result, SplitterError};

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "gitbook";

/// Manifest describing the Rescribos whitepaper layout.
pub const BUILTIN_MANIFEST: &str = include_str!("../manifests/rescribos.yaml");

/// What to do when a section marker is not present in the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MissingSectionPolicy {
    /// Render the section as empty and carry on.
    Ignore,

    /// Render the section as empty, log a warning and record it in the report.
    #[default]
    Warn,

    /// Abort the run before the affected page is written.
    Fail,
}

/// Settings for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Source markdown document.
    pub source: PathBuf,

    /// Root directory the pages are written under.
    pub output_dir: PathBuf,

    /// Custom manifest file. The built-in manifest is used when `None`.
    pub manifest: Option<PathBuf>,

    pub on_missing: MissingSectionPolicy,
}

impl GenerateConfig {
    /// Create a config with the default output directory and policy.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            manifest: None,
            on_missing: MissingSectionPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    #[must_use]
    pub fn with_manifest(mut self, manifest: impl Into<PathBuf>) -> Self {
        self.manifest = Some(manifest.into());
        self
    }

    #[must_use]
    pub fn with_policy(mut self, on_missing: MissingSectionPolicy) -> Self {
        self.on_missing = on_missing;
        self
    }
}

/// Validate that the source document exists and is a regular file.
///
/// # Returns
/// * `Ok(())` if the path points at a file
/// * `Err(SplitterError::InvalidSource)` otherwise
pub fn validate_source(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SplitterError::InvalidSource(format!(
            "{} does not exist",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(SplitterError::InvalidSource(format!(
            "{} is not a file",
            path.display()
        )));
    }
    Ok(())
}

/// Validate a manifest page path.
///
/// Page paths are joined onto the output directory, so they must be relative
/// and must not climb out of it.
///
/// # Examples
/// ```
/// use docsplit::config::validate_page_path;
///
/// assert!(validate_page_path("architecture/README.md").is_ok());
/// assert!(validate_page_path("../outside.md").is_err());
/// assert!(validate_page_path("/etc/passwd").is_err());
/// ```
pub fn validate_page_path(path: &str) -> Result<()> {
    let invalid = || SplitterError::InvalidPagePath(path.to_string());

    if path.trim().is_empty() || path.ends_with('/') {
        return Err(invalid());
    }

    for component in Path::new(path).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(invalid())
            }
        }
    }

    Ok(())
}
