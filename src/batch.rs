use crate::matcher::FieldMatcher;
use crate::{pdf, renamer, RenamerError, Result};
use log::{info, warn};
use std::fmt;
use std::path::Path;
use walkdir::WalkDir;

// ── Event stream ─────────────────────────────────────────────────────────────

/// One line of the batch's append-only log stream.
///
/// The `Display` impl is the line a front-end shows the user; the variants are
/// what a test asserts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// A file's pipeline run has started.
    Processing { filename: String },
    /// The file was renamed to its field value.
    Renamed { from: String, to: String },
    /// The field name does not occur in the file's text; file skipped.
    FieldNotFound { field: String, filename: String },
    /// The file could not be opened or parsed; file skipped.
    ExtractionFailed { filename: String, cause: String },
    /// The filesystem move failed; file skipped.
    RenameFailed { filename: String, cause: String },
    /// The batch reached its natural end.
    Finished { renamed: usize, skipped: usize },
}

impl fmt::Display for BatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processing { filename } => write!(f, "Processing: {filename}"),
            Self::Renamed { from, to } => write!(f, "Renamed '{from}' to '{to}'"),
            Self::FieldNotFound { field, filename } => {
                write!(f, "Field '{field}' not found in {filename}. Skipping.")
            }
            Self::ExtractionFailed { filename, cause } => {
                write!(f, "Failed to extract text from {filename}: {cause}. Skipping.")
            }
            Self::RenameFailed { filename, cause } => {
                write!(f, "Failed to rename {filename}: {cause}. Skipping.")
            }
            Self::Finished { renamed, skipped } => {
                write!(f, "Done: {renamed} renamed, {skipped} skipped")
            }
        }
    }
}

/// Counts returned by [`rename_pdfs_by_field`]; the same numbers end up in the
/// final [`BatchEvent::Finished`] line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub renamed: usize,
    pub skipped: usize,
}

// ── Enumeration ──────────────────────────────────────────────────────────────

/// List the direct children of `dir` whose extension is `.pdf`
/// (case-insensitive), sorted by name. One snapshot; files appearing or
/// vanishing afterwards are not observed.
pub fn find_pdf_files(dir: &Path) -> Result<Vec<String>> {
    let mut pdf_files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            RenamerError::Io(e.into_io_error().unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::Other, "directory walk failed")
            }))
        })?;
        let path = entry.path();

        let is_pdf = path.is_file()
            && path
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        if is_pdf {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                pdf_files.push(name.to_owned());
            }
        }
    }

    pdf_files.sort();
    Ok(pdf_files)
}

// ── Orchestration ────────────────────────────────────────────────────────────

/// Run the extract → match → rename pipeline over every PDF in `dir`,
/// sequentially, emitting one [`BatchEvent`] per meaningful step.
///
/// No per-file failure aborts the batch. The only errors returned are the
/// before-start ones: a bad folder, an empty field name, or a failure to list
/// the folder at all.
pub fn rename_pdfs_by_field(
    dir: &Path,
    field_name: &str,
    emit: &mut dyn FnMut(BatchEvent),
) -> Result<BatchSummary> {
    if !dir.is_dir() {
        return Err(RenamerError::NotADirectory(dir.to_path_buf()));
    }
    let matcher = FieldMatcher::new(field_name)?;

    let pdf_files = find_pdf_files(dir)?;
    info!(
        "found {} PDF file(s) in {}",
        pdf_files.len(),
        dir.display()
    );

    let mut summary = BatchSummary::default();

    for filename in pdf_files {
        emit(BatchEvent::Processing {
            filename: filename.clone(),
        });

        let text = match pdf::extract_text(&dir.join(&filename)) {
            Ok(text) => text,
            Err(e) => {
                warn!("extraction failed for {filename}: {e}");
                emit(BatchEvent::ExtractionFailed {
                    filename,
                    cause: e.to_string(),
                });
                summary.skipped += 1;
                continue;
            }
        };

        let value = match matcher.find_value(&text) {
            Some(value) => value.to_owned(),
            None => {
                emit(BatchEvent::FieldNotFound {
                    field: field_name.to_owned(),
                    filename,
                });
                summary.skipped += 1;
                continue;
            }
        };

        match renamer::rename_to_value(dir, &filename, &value) {
            Ok(new_name) => {
                emit(BatchEvent::Renamed {
                    from: filename,
                    to: new_name,
                });
                summary.renamed += 1;
            }
            Err(e) => {
                warn!("rename failed for {filename}: {e}");
                emit(BatchEvent::RenameFailed {
                    filename,
                    cause: e.to_string(),
                });
                summary.skipped += 1;
            }
        }
    }

    emit(BatchEvent::Finished {
        renamed: summary.renamed,
        skipped: summary.skipped,
    });
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn pdf_suffix_filter_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.pdf", "B.PDF", "c.Pdf", "notes.txt", "noext"] {
            File::create(dir.path().join(name)).unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.pdf")).unwrap();

        let files = find_pdf_files(dir.path()).unwrap();
        assert_eq!(files, vec!["B.PDF", "a.pdf", "c.Pdf"]);
    }

    #[test]
    fn subdirectories_are_not_descended_into() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        File::create(dir.path().join("nested").join("deep.pdf")).unwrap();
        File::create(dir.path().join("top.pdf")).unwrap();

        assert_eq!(find_pdf_files(dir.path()).unwrap(), vec!["top.pdf"]);
    }

    #[test]
    fn missing_folder_is_rejected_before_any_work() {
        let mut events = Vec::new();
        let err = rename_pdfs_by_field(Path::new("/no/such/folder"), "Ref", &mut |e| {
            events.push(e)
        })
        .unwrap_err();
        assert!(matches!(err, RenamerError::NotADirectory(_)));
        assert!(events.is_empty());
    }

    #[test]
    fn empty_field_name_is_rejected_before_any_work() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("a.pdf")).unwrap();

        let mut events = Vec::new();
        let err =
            rename_pdfs_by_field(dir.path(), "  ", &mut |e| events.push(e)).unwrap_err();
        assert!(matches!(err, RenamerError::EmptyFieldName));
        assert!(events.is_empty());
        assert!(dir.path().join("a.pdf").exists());
    }

    #[test]
    fn empty_folder_finishes_with_zero_counts() {
        let dir = tempfile::tempdir().unwrap();
        let mut events = Vec::new();
        let summary =
            rename_pdfs_by_field(dir.path(), "Ref", &mut |e| events.push(e)).unwrap();
        assert_eq!(summary, BatchSummary::default());
        assert_eq!(events, vec![BatchEvent::Finished { renamed: 0, skipped: 0 }]);
    }
}
