//! Source document loading.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::validate_source;
use crate::error::{Result, SplitterError};
use crate::extract::{extract_section, MarkerPair};

/// Top-level numbered heading: `## 3. AI Provider System`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMBERED_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## (\d+)\. (.+?)\s*$").expect("valid regex"));

/// The full text of the source whitepaper. Never mutated after loading.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
}

/// A `## n. Title` heading found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedHeading {
    pub number: String,
    pub title: String,
}

impl NumberedHeading {
    /// The heading line as it appears in the source, usable as a marker.
    #[must_use]
    pub fn marker(&self) -> String {
        format!("## {}. {}", self.number, self.title)
    }
}

impl Document {
    /// Read a UTF-8 markdown file.
    pub fn load(path: &Path) -> Result<Self> {
        validate_source(path)?;

        let text = fs::read_to_string(path).map_err(|source| SplitterError::ReadSource {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "Loaded source document");
        Ok(Self { text })
    }

    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Extract a section from the whole document.
    #[must_use]
    pub fn section(&self, markers: &MarkerPair) -> Option<&str> {
        extract_section(&self.text, markers)
    }

    /// List the numbered top-level headings in document order.
    #[must_use]
    pub fn numbered_headings(&self) -> Vec<NumberedHeading> {
        NUMBERED_HEADING
            .captures_iter(&self.text)
            .filter_map(|caps| {
                Some(NumberedHeading {
                    number: caps.get(1)?.as_str().to_string(),
                    title: caps.get(2)?.as_str().to_string(),
                })
            })
            .collect()
    }
}
