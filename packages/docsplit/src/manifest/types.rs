//! Types for the page manifest.

use serde::{Deserialize, Serialize};

use crate::extract::MarkerPair;

/// Ordered table of every page the generator writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub chapters: Vec<Chapter>,
}

/// A group of pages sharing one output directory and source scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Human-readable chapter name, used in progress output.
    pub name: String,

    /// Part of the document the chapter's sections are searched in.
    ///
    /// When `None`, sections are searched in the whole document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<MarkerPair>,

    pub pages: Vec<PageSpec>,
}

impl Chapter {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: None,
            pages: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_scope(mut self, scope: MarkerPair) -> Self {
        self.scope = Some(scope);
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: PageSpec) -> Self {
        self.pages.push(page);
        self
    }
}

/// One output page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    /// Path relative to the output directory, e.g. `architecture/README.md`.
    pub path: String,

    /// Rendered as the page's `#` heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub body: Vec<Fragment>,
}

impl PageSpec {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: None,
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_fragment(mut self, fragment: Fragment) -> Self {
        self.body.push(fragment);
        self
    }

    /// Whether any fragment reads from the chapter scope.
    #[must_use]
    pub fn uses_source(&self) -> bool {
        self.body
            .iter()
            .any(|f| matches!(f, Fragment::Section(_) | Fragment::Scope))
    }
}

/// A piece of page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fragment {
    /// Static markdown, copied verbatim.
    Text { text: String },

    /// A `##` sub-heading.
    Heading { text: String },

    /// A section extracted from the chapter scope.
    Section(MarkerPair),

    /// The whole chapter scope.
    Scope,

    /// A bullet list of links to other pages.
    Links(LinkList),
}

impl Fragment {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    #[must_use]
    pub fn heading(text: impl Into<String>) -> Self {
        Self::Heading { text: text.into() }
    }

    #[must_use]
    pub fn section(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::Section(MarkerPair::new(start).until(end))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkList {
    /// Rendered as a `##` heading above the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,

    pub items: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,

    /// Link target, relative to the page that contains the link.
    pub target: String,

    /// Short description rendered after the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Link {
    #[must_use]
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
            note: None,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
