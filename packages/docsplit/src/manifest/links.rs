//! Cross-link checks between manifest pages.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::types::{Fragment, PageSpec};

/// Inline markdown link target: `[label](target)`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static INLINE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\(([^)\s]+)\)").expect("valid regex"));

/// A relative link that does not point at any page in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    /// Page containing the link.
    pub page: String,

    /// Link target as written.
    pub target: String,
}

/// Collect the link targets written in a page's static content.
///
/// Only `links` fragments and inline links in `text` fragments count;
/// extracted sections are document content and are not checked.
#[must_use]
pub fn page_links(page: &PageSpec) -> Vec<&str> {
    let mut targets = Vec::new();
    for fragment in &page.body {
        match fragment {
            Fragment::Links(list) => targets.extend(list.items.iter().map(|l| l.target.as_str())),
            Fragment::Text { text } => targets.extend(
                INLINE_LINK
                    .captures_iter(text)
                    .filter_map(|caps| caps.get(1))
                    .map(|m| m.as_str()),
            ),
            _ => {}
        }
    }
    targets
}

/// Whether a target points at another file in the generated tree.
///
/// External URLs, mail links and pure anchors are skipped.
fn is_local(target: &str) -> bool {
    !(target.contains("://") || target.starts_with("mailto:") || target.starts_with('#'))
}

/// Resolve `target` against the directory of `page`.
///
/// Returns `None` when the target climbs above the output root.
#[must_use]
pub fn resolve_link(page: &str, target: &str) -> Option<String> {
    let target = target.split('#').next().unwrap_or(target);

    let mut parts: Vec<&str> = page.split('/').collect();
    parts.pop();

    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }

    Some(parts.join("/"))
}

/// Normalize a page path for comparison (drops `./` segments).
pub(crate) fn normalize_path(path: &str) -> String {
    path.split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Find links that do not resolve to a page in `known`.
#[must_use]
pub fn find_broken_links<'a>(
    pages: impl IntoIterator<Item = &'a PageSpec>,
    known: &HashSet<String>,
) -> Vec<BrokenLink> {
    let mut broken = Vec::new();
    for page in pages {
        let page_path = normalize_path(&page.path);
        for target in page_links(page).into_iter().filter(|t| is_local(t)) {
            let resolved = resolve_link(&page_path, target);
            if !resolved.is_some_and(|r| known.contains(&r)) {
                broken.push(BrokenLink {
                    page: page.path.clone(),
                    target: target.to_string(),
                });
            }
        }
    }
    broken
}
