//! Site maintenance utilities.
//!
//! - [`html_check`]: tag-balance checker for hand-edited pages
//! - [`lightbox_src`]: adds (or reverts) `data-lightbox-src` pointing at the
//!   largest variant of each image

pub mod html_check;
pub mod lightbox_src;

use std::path::PathBuf;
use thiserror::Error;

pub use html_check::{check_html, render_report, HtmlIssue, IssueKind};
pub use lightbox_src::{annotate_tree, AnnotateOptions, AnnotateReport};

/// Tool failures.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("Failed to walk site tree: {0}")]
    Walk(#[from] walkdir::Error),
}
