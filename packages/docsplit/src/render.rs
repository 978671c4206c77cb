//! Page rendering: turns a manifest entry into markdown.

use crate::extract::{extract_section, MarkerPair};
use crate::manifest::{Fragment, LinkList, PageSpec};

/// Where a page's sections are extracted from.
#[derive(Debug, Clone, Copy)]
pub enum SectionSource<'a> {
    /// The chapter scope (or the whole document for unscoped chapters).
    Text(&'a str),

    /// The chapter scope's start marker was not found.
    MissingScope(&'a MarkerPair),
}

/// Rendered page content plus the markers that were not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub content: String,
    pub missing: Vec<String>,
}

/// Render a page.
///
/// The title becomes a `#` heading and every non-empty fragment follows,
/// separated by a blank line. Sections whose start marker is absent render
/// as nothing and are listed in [`RenderedPage::missing`].
#[must_use]
pub fn render_page(page: &PageSpec, source: SectionSource<'_>) -> RenderedPage {
    let mut parts: Vec<String> = Vec::new();
    let mut missing: Vec<String> = Vec::new();

    if let Some(title) = &page.title {
        parts.push(format!("# {title}"));
    }

    for fragment in &page.body {
        let rendered = match fragment {
            Fragment::Text { text } => Some(text.trim_end().to_string()),
            Fragment::Heading { text } => Some(format!("## {text}")),
            Fragment::Links(list) => Some(render_links(list)),
            Fragment::Section(markers) => match source {
                SectionSource::Text(text) => {
                    let section = extract_section(text, markers);
                    if section.is_none() {
                        missing.push(markers.start.clone());
                    }
                    section.map(String::from)
                }
                SectionSource::MissingScope(scope) => {
                    note_missing(&mut missing, &scope.start);
                    None
                }
            },
            Fragment::Scope => match source {
                SectionSource::Text(text) => Some(text.trim().to_string()),
                SectionSource::MissingScope(scope) => {
                    note_missing(&mut missing, &scope.start);
                    None
                }
            },
        };

        if let Some(part) = rendered.filter(|p| !p.is_empty()) {
            parts.push(part);
        }
    }

    let mut content = parts.join("\n\n");
    content.push('\n');

    RenderedPage { content, missing }
}

fn note_missing(missing: &mut Vec<String>, marker: &str) {
    if !missing.iter().any(|m| m == marker) {
        missing.push(marker.to_string());
    }
}

fn render_links(list: &LinkList) -> String {
    let items = list
        .items
        .iter()
        .map(|link| match &link.note {
            Some(note) => format!("- [{}]({}) - {note}", link.label, link.target),
            None => format!("- [{}]({})", link.label, link.target),
        })
        .collect::<Vec<_>>()
        .join("\n");

    match &list.heading {
        Some(heading) => format!("## {heading}\n\n{items}"),
        None => items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Link;
    use pretty_assertions::assert_eq;

    const SCOPE: &str = "## 3. AI Provider System\n\n### 3.1 Hybrid Architecture Overview\nHybrid.\n\n### 3.2 Provider Implementation Details\nDetails.\n\n---";

    fn readme() -> PageSpec {
        PageSpec::new("ai-provider-system/README.md")
            .with_title("AI Provider System")
            .with_fragment(Fragment::section("### 3.1 Hybrid Architecture Overview", "### 3.2"))
            .with_fragment(Fragment::Links(LinkList {
                heading: Some("Sections".to_string()),
                items: vec![
                    Link::new("Hybrid Architecture", "hybrid-architecture.md"),
                    Link::new("Offline Capabilities", "offline-capabilities.md")
                        .with_note("Running without a network"),
                ],
            }))
    }

    #[test]
    fn test_render_page() {
        let rendered = render_page(&readme(), SectionSource::Text(SCOPE));

        assert_eq!(
            rendered.content,
            "# AI Provider System\n\n\
             ### 3.1 Hybrid Architecture Overview\nHybrid.\n\n\
             ## Sections\n\n\
             - [Hybrid Architecture](hybrid-architecture.md)\n\
             - [Offline Capabilities](offline-capabilities.md) - Running without a network\n"
        );
        assert!(rendered.missing.is_empty());
    }

    #[test]
    fn test_render_missing_section_is_skipped() {
        let page = PageSpec::new("x.md")
            .with_title("Offline")
            .with_fragment(Fragment::section("### 3.4 Offline Capabilities", "---"))
            .with_fragment(Fragment::heading("Notes"));

        let rendered = render_page(&page, SectionSource::Text(SCOPE));
        assert_eq!(rendered.content, "# Offline\n\n## Notes\n");
        assert_eq!(rendered.missing, vec!["### 3.4 Offline Capabilities"]);
    }

    #[test]
    fn test_render_missing_scope_reported_once() {
        let scope = MarkerPair::new("## 3. AI Provider System").until("## 4.");
        let page = PageSpec::new("x.md")
            .with_title("Both")
            .with_fragment(Fragment::section("### 3.1", "### 3.2"))
            .with_fragment(Fragment::section("### 3.2", "### 3.3"))
            .with_fragment(Fragment::Scope);

        let rendered = render_page(&page, SectionSource::MissingScope(&scope));
        assert_eq!(rendered.content, "# Both\n");
        assert_eq!(rendered.missing, vec!["## 3. AI Provider System"]);
    }

    #[test]
    fn test_render_scope_and_text() {
        let page = PageSpec::new("use-cases/examples.md")
            .with_title("Industry Examples")
            .with_fragment(Fragment::text("Intro paragraph.\n"))
            .with_fragment(Fragment::Scope);

        let rendered = render_page(&page, SectionSource::Text("  ## 8. Use Cases\nBody\n\n"));
        assert_eq!(
            rendered.content,
            "# Industry Examples\n\nIntro paragraph.\n\n## 8. Use Cases\nBody\n"
        );
    }

    #[test]
    fn test_render_untitled_page() {
        let page = PageSpec::new("plain.md").with_fragment(Fragment::text("Just text."));
        let rendered = render_page(&page, SectionSource::Text(""));
        assert_eq!(rendered.content, "Just text.\n");
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = render_page(&readme(), SectionSource::Text(SCOPE));
        let b = render_page(&readme(), SectionSource::Text(SCOPE));
        assert_eq!(a, b);
    }
}
