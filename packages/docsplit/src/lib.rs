//! docsplit - Split a markdown whitepaper into a GitBook-style page tree.
//!
//! A source document is sliced by literal heading markers and the slices are
//! written into pages described by a declarative manifest.
//!
//! # Example
//!
//! ```
//! use docsplit::extract::extract;
//!
//! let doc = "## 1. A\nfoo\n## 2. B\nbar\n";
//! assert_eq!(extract(doc, "## 1. A", Some("## 2. B")), "## 1. A\nfoo");
//! assert_eq!(extract(doc, "## 3. C", None), "");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Defaults, run settings and path validation
//! - [`error`]: Error types and Result alias
//! - [`document`]: Source document loading
//! - [`extract`]: Marker-based section extraction
//! - [`manifest`]: Declarative page table
//! - [`render`]: Page templating
//! - [`emit`]: Page writing
//! - [`generator`]: Generation driver
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod document;
pub mod emit;
pub mod error;
pub mod extract;
pub mod generator;
pub mod manifest;
pub mod render;

// Re-export main functions
pub use generator::{generate, run};

// Re-export commonly used items
pub use config::{GenerateConfig, MissingSectionPolicy};
pub use document::Document;
pub use error::{Result, SplitterError};
pub use extract::{extract, extract_section, MarkerPair};
pub use generator::GenerationReport;
pub use manifest::Manifest;
