//! # pdf-renamer
//!
//! Renames each PDF in a folder after the value of a named field found in its
//! text layer.
//!
//! ## What this crate does
//!
//! 1. **Extract text** — concatenates every page's text layer, in page order.
//! 2. **Match a field** — finds the first `Field Name: value` (or
//!    `Field Name - value`, or `Field Name value`) line, case-insensitively.
//! 3. **Rename** — sanitizes the value into a filename, dodges collisions with
//!    a numeric suffix, and moves the file.
//!
//! Each file is processed independently; a failure at any stage skips that
//! file and the batch keeps going.
//!
//! ## Quick example
//!
//! ```no_run
//! use pdf_renamer::rename_pdfs_by_field;
//! use std::path::Path;
//!
//! # fn main() -> pdf_renamer::Result<()> {
//! let summary = rename_pdfs_by_field(Path::new("./invoices"), "Invoice No", &mut |event| {
//!     println!("{event}");
//! })?;
//! println!("renamed {} of {} files", summary.renamed, summary.renamed + summary.skipped);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use thiserror::Error;

pub mod batch;
pub mod matcher;
pub mod pdf;
pub mod renamer;

pub use batch::{rename_pdfs_by_field, BatchEvent, BatchSummary};
pub use matcher::FieldMatcher;

// ── Error type ───────────────────────────────────────────────────────────────

/// Every error that this crate can produce.
#[derive(Error, Debug)]
pub enum RenamerError {
    /// The field name was empty (or whitespace-only). Rejected before the
    /// batch starts; nothing is renamed.
    #[error("field name must not be empty")]
    EmptyFieldName,

    /// The target folder does not exist or is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A filesystem I/O error occurred (e.g. while listing the folder).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying lopdf parser could not open or read a document.
    #[error("PDF parse error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// The escaped field name could not be compiled into a search pattern.
    #[error("invalid field pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The filesystem rename itself failed (permissions, cross-device, …).
    #[error("could not rename '{from}' to '{to}': {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, RenamerError>;
