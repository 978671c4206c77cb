//! Literal-marker section extraction.
//!
//! Markers are matched as case-sensitive substrings anywhere in the text, not
//! anchored to line starts. Headings in the source are numbered, which keeps
//! them distinct in practice.

use serde::{Deserialize, Serialize};

/// Boundary markers for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerPair {
    /// Marker the section starts with (included in the result).
    pub start: String,

    /// Marker the section stops before. `None` extends to end of text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl MarkerPair {
    #[must_use]
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }

    #[must_use]
    pub fn until(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }
}

/// Extract the section bounded by `markers`.
///
/// Returns `None` when the start marker does not occur in `text`. The end
/// marker is searched for after the start marker; when it is absent or empty
/// the section runs to the end of `text`. The result is trimmed.
///
/// # Examples
/// ```
/// use docsplit::extract::{extract_section, MarkerPair};
///
/// let doc = "## 1. A\nfoo\n## 2. B\nbar\n";
/// let markers = MarkerPair::new("## 1. A").until("## 2. B");
/// assert_eq!(extract_section(doc, &markers), Some("## 1. A\nfoo"));
/// assert_eq!(extract_section(doc, &MarkerPair::new("## 3. C")), None);
/// ```
#[must_use]
pub fn extract_section<'a>(text: &'a str, markers: &MarkerPair) -> Option<&'a str> {
    let start = text.find(markers.start.as_str())?;
    let search_from = start + markers.start.len();

    let end = markers
        .end
        .as_deref()
        .filter(|end| !end.is_empty())
        .and_then(|end| text[search_from..].find(end))
        .map_or(text.len(), |offset| search_from + offset);

    Some(text[start..end].trim())
}

/// Extract a section, or an empty string when the start marker is missing.
#[must_use]
pub fn extract<'a>(text: &'a str, start: &str, end: Option<&str>) -> &'a str {
    let markers = MarkerPair {
        start: start.to_string(),
        end: end.map(String::from),
    };
    extract_section(text, &markers).unwrap_or_default()
}
