//! Main generation driver that ties all components together.

use std::path::{Path, PathBuf};

use crate::config::{GenerateConfig, MissingSectionPolicy};
use crate::document::Document;
use crate::emit::{page_destination, write_page};
use crate::error::{Result, SplitterError};
use crate::manifest::{BrokenLink, Chapter, Manifest, PageSpec};
use crate::render::{render_page, SectionSource};

/// A page written during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub chapter: String,
    pub path: PathBuf,
    pub bytes: usize,
}

/// A section marker that was not found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingSection {
    pub page: String,
    pub marker: String,
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub pages: Vec<GeneratedPage>,

    /// Missing sections. Empty under [`MissingSectionPolicy::Ignore`].
    pub missing: Vec<MissingSection>,

    pub broken_links: Vec<BrokenLink>,
}

impl GenerationReport {
    /// Number of pages written per chapter, in manifest order.
    #[must_use]
    pub fn chapter_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for page in &self.pages {
            if let Some((name, count)) = counts.last_mut() {
                if *name == page.chapter {
                    *count += 1;
                    continue;
                }
            }
            counts.push((page.chapter.as_str(), 1));
        }
        counts
    }
}

/// Load the configured manifest, falling back to the built-in one.
pub fn load_manifest(config: &GenerateConfig) -> Result<Manifest> {
    match &config.manifest {
        Some(path) => Manifest::load(path),
        None => Manifest::builtin(),
    }
}

/// Load the document and manifest named by `config` and generate every page.
///
/// `on_page` is called after each page is written, as in [`generate`].
pub fn run(
    config: &GenerateConfig,
    on_page: impl FnMut(&GeneratedPage),
) -> Result<GenerationReport> {
    let document = Document::load(&config.source)?;
    let manifest = load_manifest(config)?;
    generate(
        &document,
        &manifest,
        &config.output_dir,
        config.on_missing,
        on_page,
    )
}

/// Generate every manifest page from `document` under `output_dir`.
///
/// Pages are written in manifest order. `on_page` is called after each page
/// is written. A filesystem error stops the run; pages written before it
/// stay on disk.
pub fn generate(
    document: &Document,
    manifest: &Manifest,
    output_dir: &Path,
    policy: MissingSectionPolicy,
    mut on_page: impl FnMut(&GeneratedPage),
) -> Result<GenerationReport> {
    let broken_links = manifest.validate()?;
    for link in &broken_links {
        tracing::warn!(page = %link.page, link = %link.target, "Link does not point at a generated page");
    }

    let mut report = GenerationReport {
        broken_links,
        ..GenerationReport::default()
    };

    for chapter in &manifest.chapters {
        // Chapters made only of static pages never look at the document.
        let source = if chapter.pages.iter().any(PageSpec::uses_source) {
            chapter_source(document, chapter)
        } else {
            SectionSource::Text("")
        };
        if let SectionSource::MissingScope(scope) = source {
            tracing::debug!(chapter = %chapter.name, marker = %scope.start, "Chapter scope not found");
        }

        for page in &chapter.pages {
            let rendered = render_page(page, source);

            for marker in rendered.missing {
                match policy {
                    MissingSectionPolicy::Fail => {
                        return Err(SplitterError::SectionNotFound {
                            page: page.path.clone(),
                            marker,
                        });
                    }
                    MissingSectionPolicy::Warn => {
                        tracing::warn!(page = %page.path, marker = %marker, "Section not found");
                        report.missing.push(MissingSection {
                            page: page.path.clone(),
                            marker,
                        });
                    }
                    MissingSectionPolicy::Ignore => {
                        tracing::debug!(page = %page.path, marker = %marker, "Section not found");
                    }
                }
            }

            let destination = page_destination(output_dir, &page.path)?;
            let path = write_page(&destination, &rendered.content)?;

            let generated = GeneratedPage {
                chapter: chapter.name.clone(),
                path,
                bytes: rendered.content.len(),
            };
            on_page(&generated);
            report.pages.push(generated);
        }

        tracing::info!(chapter = %chapter.name, pages = chapter.pages.len(), "Chapter pages created");
    }

    Ok(report)
}

/// Narrow the document to a chapter's scope.
fn chapter_source<'a>(document: &'a Document, chapter: &'a Chapter) -> SectionSource<'a> {
    match &chapter.scope {
        Some(scope) => document
            .section(scope)
            .map_or(SectionSource::MissingScope(scope), SectionSource::Text),
        None => SectionSource::Text(document.text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::MarkerPair;
    use crate::manifest::Fragment;
    use std::fs;
    use tempfile::tempdir;

    const DOC: &str = "# Paper\n\n## 1. A\n\n### 1.1 First\none\n\n### 1.2 Second\ntwo\n\n---\n\n## 2. B\nbee\n";

    fn manifest() -> Manifest {
        Manifest {
            chapters: vec![
                Chapter::new("A")
                    .with_scope(MarkerPair::new("## 1. A").until("## 2. B"))
                    .with_page(
                        PageSpec::new("a/first.md")
                            .with_title("First")
                            .with_fragment(Fragment::section("### 1.1 First", "### 1.2")),
                    )
                    .with_page(
                        PageSpec::new("a/second.md")
                            .with_title("Second")
                            .with_fragment(Fragment::section("### 1.2 Second", "---")),
                    ),
                Chapter::new("B").with_page(
                    PageSpec::new("b.md")
                        .with_fragment(Fragment::Section(MarkerPair::new("## 2. B"))),
                ),
            ],
        }
    }

    #[test]
    fn test_generate_writes_all_pages() {
        let dir = tempdir().unwrap();
        let doc = Document::from_text(DOC);
        let mut seen = Vec::new();

        let report = generate(
            &doc,
            &manifest(),
            dir.path(),
            MissingSectionPolicy::Warn,
            |p| seen.push(p.path.clone()),
        )
        .unwrap();

        assert_eq!(report.pages.len(), 3);
        assert_eq!(seen.len(), 3);
        assert!(report.missing.is_empty());
        assert_eq!(report.chapter_counts(), vec![("A", 2), ("B", 1)]);

        assert_eq!(
            fs::read_to_string(dir.path().join("a/first.md")).unwrap(),
            "# First\n\n### 1.1 First\none\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("a/second.md")).unwrap(),
            "# Second\n\n### 1.2 Second\ntwo\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("b.md")).unwrap(),
            "## 2. B\nbee\n"
        );
    }

    #[test]
    fn test_generate_fail_policy_stops_before_write() {
        let dir = tempdir().unwrap();
        let doc = Document::from_text(DOC.replace("### 1.2 Second", "### 1.2 Renamed"));

        let err = generate(
            &doc,
            &manifest(),
            dir.path(),
            MissingSectionPolicy::Fail,
            |_| {},
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SplitterError::SectionNotFound { ref page, ref marker }
                if page == "a/second.md" && marker == "### 1.2 Second"
        ));
        assert!(dir.path().join("a/first.md").exists());
        assert!(!dir.path().join("a/second.md").exists());
    }

    #[test]
    fn test_generate_warn_policy_records_missing() {
        let dir = tempdir().unwrap();
        let doc = Document::from_text(DOC.replace("## 1. A", "## 1. Renamed"));

        let report = generate(
            &doc,
            &manifest(),
            dir.path(),
            MissingSectionPolicy::Warn,
            |_| {},
        )
        .unwrap();

        assert_eq!(report.pages.len(), 3);
        assert_eq!(
            report.missing,
            vec![
                MissingSection {
                    page: "a/first.md".to_string(),
                    marker: "## 1. A".to_string(),
                },
                MissingSection {
                    page: "a/second.md".to_string(),
                    marker: "## 1. A".to_string(),
                },
            ]
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("a/first.md")).unwrap(),
            "# First\n"
        );
    }

    #[test]
    fn test_generate_ignore_policy_records_nothing() {
        let dir = tempdir().unwrap();
        let doc = Document::from_text("unrelated text");

        let report = generate(
            &doc,
            &manifest(),
            dir.path(),
            MissingSectionPolicy::Ignore,
            |_| {},
        )
        .unwrap();

        assert_eq!(report.pages.len(), 3);
        assert!(report.missing.is_empty());
    }

    #[test]
    fn test_generate_twice_is_identical() {
        let dir = tempdir().unwrap();
        let doc = Document::from_text(DOC);
        let manifest = manifest();

        generate(&doc, &manifest, dir.path(), MissingSectionPolicy::Warn, |_| {}).unwrap();
        let first = fs::read(dir.path().join("a/first.md")).unwrap();
        generate(&doc, &manifest, dir.path(), MissingSectionPolicy::Warn, |_| {}).unwrap();
        let second = fs::read(dir.path().join("a/first.md")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_run_with_builtin_manifest_on_missing_source() {
        let dir = tempdir().unwrap();
        let config = GenerateConfig::new(dir.path().join("missing.md")).with_output_dir(dir.path());
        assert!(matches!(
            run(&config, |_| {}),
            Err(SplitterError::InvalidSource(_))
        ));
    }

    #[test]
    fn test_static_chapter_ignores_missing_scope() {
        let dir = tempdir().unwrap();
        let doc = Document::from_text(DOC);
        let manifest = Manifest {
            chapters: vec![Chapter::new("Static")
                .with_scope(MarkerPair::new("## 7. Absent"))
                .with_page(
                    PageSpec::new("static/README.md")
                        .with_title("Static")
                        .with_fragment(Fragment::text("Fixed prose.")),
                )],
        };

        let report = generate(
            &doc,
            &manifest,
            dir.path(),
            MissingSectionPolicy::Fail,
            |_| {},
        )
        .unwrap();

        assert!(report.missing.is_empty());
        assert_eq!(
            fs::read_to_string(dir.path().join("static/README.md")).unwrap(),
            "# Static\n\nFixed prose.\n"
        );
    }

    #[test]
    fn test_run_reports_each_page() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("paper.md");
        fs::write(&source, DOC).unwrap();
        let layout = dir.path().join("layout.yaml");
        fs::write(&layout, manifest().to_yaml().unwrap()).unwrap();

        let config = GenerateConfig::new(&source)
            .with_output_dir(dir.path().join("out"))
            .with_manifest(&layout);
        let mut seen = Vec::new();
        let report = run(&config, |page| seen.push(page.path.clone())).unwrap();

        assert_eq!(report.pages.len(), 3);
        assert_eq!(
            seen,
            report.pages.iter().map(|p| p.path.clone()).collect::<Vec<_>>()
        );
        assert!(dir.path().join("out/b.md").exists());
    }
}
