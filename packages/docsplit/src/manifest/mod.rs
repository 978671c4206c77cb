//! Declarative page manifest.
//!
//! The manifest maps every output page to the fragments it is assembled
//! from. It is plain YAML so the mapping can be reviewed and tested as data:
//!
//! ```yaml
//! chapters:
//!   - name: Deployment
//!     scope:
//!       start: "## 9. Deployment"
//!       end: "## 10. Performance & Scalability"
//!     pages:
//!       - path: deployment/configuration.md
//!         title: Configuration
//!         body:
//!           - type: section
//!             start: "### 9.3 CLI Usage"
//!             end: "---"
//! ```

mod links;
mod types;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub use links::{find_broken_links, page_links, resolve_link, BrokenLink};
pub use types::{Chapter, Fragment, Link, LinkList, Manifest, PageSpec};

use crate::config::{validate_page_path, BUILTIN_MANIFEST};
use crate::error::{Result, SplitterError};

impl Manifest {
    /// The manifest for the Rescribos whitepaper, embedded at build time.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_MANIFEST)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Read a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path).map_err(|source| SplitterError::ReadManifest {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// All pages in generation order, with their chapter.
    pub fn pages(&self) -> impl Iterator<Item = (&Chapter, &PageSpec)> {
        self.chapters
            .iter()
            .flat_map(|chapter| chapter.pages.iter().map(move |page| (chapter, page)))
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.chapters.iter().map(|c| c.pages.len()).sum()
    }

    /// Check page paths and cross-links.
    ///
    /// Invalid or duplicate paths are errors. Links to pages that are not in
    /// the manifest are returned for the caller to report.
    pub fn validate(&self) -> Result<Vec<BrokenLink>> {
        let mut known = HashSet::new();

        for (_, page) in self.pages() {
            validate_page_path(&page.path)?;
            if !known.insert(links::normalize_path(&page.path)) {
                return Err(SplitterError::DuplicatePage(page.path.clone()));
            }
        }

        Ok(find_broken_links(self.pages().map(|(_, p)| p), &known))
    }
}
