//! Command-line interface for the splitter.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{GenerateConfig, MissingSectionPolicy, DEFAULT_OUTPUT_DIR};
use crate::document::Document;
use crate::error::Result;
use crate::generator;
use crate::manifest::Manifest;

/// docsplit - Split a markdown whitepaper into GitBook pages.
#[derive(Parser)]
#[command(name = "docsplit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate every page in the manifest from the source document.
    Generate {
        /// Source markdown document
        #[arg(short, long)]
        source: PathBuf,

        /// Output directory (default: gitbook/)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Page manifest in YAML (default: built-in Rescribos layout)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// What to do when a section marker is not found
        #[arg(long, value_enum, default_value_t = MissingSectionPolicy::Warn)]
        on_missing: MissingSectionPolicy,
    },

    /// List the numbered top-level headings of a document.
    Sections {
        /// Source markdown document
        #[arg(short, long)]
        source: PathBuf,
    },

    /// Print the page manifest as YAML.
    Manifest {
        /// Page manifest in YAML (default: built-in Rescribos layout)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            source,
            output,
            manifest,
            on_missing,
        } => {
            let mut config = GenerateConfig::new(source)
                .with_output_dir(output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)))
                .with_policy(on_missing);
            if let Some(manifest) = manifest {
                config = config.with_manifest(manifest);
            }
            generate_command(&config)
        }
        Commands::Sections { source } => sections_command(&source),
        Commands::Manifest { manifest } => manifest_command(manifest.as_deref()),
    }
}

/// Execute the generate command.
fn generate_command(config: &GenerateConfig) -> Result<()> {
    println!(
        "{} {} into {}",
        style("Splitting").bold(),
        style(config.source.display()).cyan(),
        style(config.output_dir.display()).green()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {pos} pages {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = generator::run(config, |page| {
        pb.set_message(page.chapter.clone());
        pb.suspend(|| println!("Created: {}", page.path.display()));
        pb.inc(1);
    });
    pb.finish_and_clear();
    let report = result?;

    println!();
    for (chapter, count) in report.chapter_counts() {
        println!("  {}: {count} pages", style(chapter).green());
    }

    if !report.missing.is_empty() {
        println!();
        println!(
            "{} {}",
            style("Missing sections:").yellow().bold(),
            report.missing.len()
        );
        for miss in &report.missing {
            println!("  {} needs '{}'", miss.page, style(&miss.marker).yellow());
        }
    }

    if !report.broken_links.is_empty() {
        println!();
        println!(
            "{} {}",
            style("Broken links:").yellow().bold(),
            report.broken_links.len()
        );
        for link in &report.broken_links {
            println!("  {} -> {}", link.page, style(&link.target).yellow());
        }
    }

    println!();
    println!(
        "{} {} pages written",
        style("Generation complete:").green().bold(),
        report.pages.len()
    );

    Ok(())
}

/// Execute the sections command.
fn sections_command(source: &Path) -> Result<()> {
    let document = Document::load(source)?;
    let headings = document.numbered_headings();

    if headings.is_empty() {
        println!("{}", style("No numbered sections found").yellow());
        return Ok(());
    }

    for heading in headings {
        println!("{:>3}. {}", style(&heading.number).cyan(), heading.title);
    }
    Ok(())
}

/// Execute the manifest command.
fn manifest_command(path: Option<&Path>) -> Result<()> {
    let manifest = match path {
        Some(path) => Manifest::load(path)?,
        None => Manifest::builtin()?,
    };

    print!("{}", manifest.to_yaml()?);
    eprintln!(
        "{} chapters, {} pages",
        manifest.chapters.len(),
        manifest.page_count()
    );
    Ok(())
}
