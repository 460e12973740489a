//! sitemotion - Entry Point

use clap::{Parser, Subcommand};
use sitemotion::dom::PageFixture;
use sitemotion::page::Page;
use sitemotion::tools::{self, AnnotateOptions};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// sitemotion - headless interaction engine for the site's pinned track,
/// sliders, and header
#[derive(Parser, Debug)]
#[command(name = "sitemotion")]
#[command(version)]
#[command(about = "Replay, preview, and maintain the site's interactive components")]
pub struct Args {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Pinned-track breakpoint in pixels (overrides config and environment)
    #[arg(long, global = true)]
    pub breakpoint: Option<f64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Replay an event script against a page fixture, printing JSON lines
    Replay {
        /// Page fixture (TOML)
        #[arg(long)]
        page: PathBuf,
        /// Event script (JSON lines); read from stdin when omitted
        script: Option<PathBuf>,
    },
    /// Interactive terminal preview of a page fixture
    Preview {
        /// Page fixture (TOML)
        #[arg(long)]
        page: PathBuf,
    },
    /// Check an HTML file for unbalanced tags (exit status 1 on issues)
    CheckHtml {
        /// HTML file
        file: PathBuf,
    },
    /// Point images at their largest variant via data-lightbox-src
    ///
    /// Directories named node_modules, dist, .git and 0 below the root are
    /// never walked. To revert the archived copy under 0/, pass it as the
    /// root: `sitemotion lightbox --root 0 --revert`.
    Lightbox {
        /// Site root
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Report changes without writing
        #[arg(long)]
        dry_run: bool,
        /// Remove data-lightbox-src attributes instead of adding them
        /// (same walk as annotating; use `--root 0` for the 0/ tree)
        #[arg(long)]
        revert: bool,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults -> config file -> env -> CLI
    let config = sitemotion::config::resolve(args.config.clone(), args.breakpoint)?;

    sitemotion::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    match args.command {
        Command::Replay { page, script } => {
            let page = bind_page(&page, &config)?;
            let script = sitemotion::source::detect_script_source(script)?.read_script()?;
            for error in &script.errors {
                eprintln!("skipped {error}");
            }
            let (_, records) = sitemotion::replay::run(page, &script.events);
            for record in records.iter().filter(|r| r.skipped.is_some()) {
                eprintln!(
                    "step {}: {}",
                    record.step,
                    record.skipped.as_deref().unwrap_or_default()
                );
            }
            sitemotion::replay::write_jsonl(&records, std::io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Preview { page } => {
            let page = bind_page(&page, &config)?;
            sitemotion::view::run_preview(page)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::CheckHtml { file } => {
            let (source, issues) = tools::html_check::check_file(&file)?;
            print!("{}", tools::render_report(&source, &issues));
            Ok(if issues.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Lightbox {
            root,
            dry_run,
            revert,
        } => {
            let report = tools::annotate_tree(&AnnotateOptions {
                root,
                dry_run,
                revert,
            })?;
            let mut out = std::io::stdout().lock();
            let verb = if revert { "reverted" } else { "updated" };
            for change in &report.changed {
                let prefix = if dry_run { "[dry-run] " } else { "" };
                writeln!(
                    out,
                    "{prefix}{verb} {} ({} tag(s))",
                    change.path.display(),
                    change.edits
                )?;
            }
            writeln!(
                out,
                "{} HTML file(s) scanned, {} changed",
                report.scanned,
                report.changed.len()
            )?;
            for error in &report.errors {
                eprintln!("{error}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn bind_page(
    path: &std::path::Path,
    config: &sitemotion::config::ResolvedConfig,
) -> Result<Page, sitemotion::model::AppError> {
    let fixture = PageFixture::load(path)?;
    Ok(Page::bind(fixture.build(), &config.page_options()))
}
