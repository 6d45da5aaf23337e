use crate::{RenamerError, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Characters that cannot appear in a Windows filename. Values containing any
/// of these get them replaced with `_`. Other platforms' reserved names are
/// deliberately not handled.
const ILLEGAL_FILENAME_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Turn a matched field value into a filename stem, replacing every illegal
/// character with `_`. Nothing else is altered.
pub fn sanitize_stem(value: &str) -> String {
    value
        .chars()
        .map(|c| if ILLEGAL_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Pick the first non-existing path among `stem.pdf`, `stem_1.pdf`,
/// `stem_2.pdf`, … inside `dir`.
///
/// The counter is scoped to this call. There is no lock between this probe and
/// the rename that follows, so another process creating files concurrently can
/// still collide; acceptable for single-user, single-process use.
pub fn unique_destination(dir: &Path, stem: &str) -> PathBuf {
    let mut destination = dir.join(format!("{stem}.pdf"));
    let mut counter = 1;
    while destination.exists() {
        destination = dir.join(format!("{stem}_{counter}.pdf"));
        counter += 1;
    }
    destination
}

/// Rename `source_name` (a direct child of `dir`) to the sanitized field
/// value, suffixed `.pdf`, avoiding collisions with a numeric suffix.
///
/// Uses `fs::rename`, i.e. a same-volume move — never copy+delete. Returns
/// the final filename on success.
pub fn rename_to_value(dir: &Path, source_name: &str, value: &str) -> Result<String> {
    let stem = sanitize_stem(value);
    let source = dir.join(source_name);
    let destination = unique_destination(dir, &stem);

    fs::rename(&source, &destination).map_err(|source_err| RenamerError::Rename {
        from: source.clone(),
        to: destination.clone(),
        source: source_err,
    })?;

    let new_name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("{stem}.pdf"));
    info!("renamed '{}' to '{}'", source_name, new_name);
    Ok(new_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn sanitize_replaces_every_illegal_character() {
        assert_eq!(sanitize_stem(r#"a\b/c*d?e:f"g<h>i|j"#), "a_b_c_d_e_f_g_h_i_j");
    }

    #[test]
    fn sanitize_leaves_everything_else_alone() {
        assert_eq!(sanitize_stem("Acct A-B (final) #2"), "Acct A-B (final) #2");
        assert_eq!(sanitize_stem(""), "");
    }

    #[test]
    fn destination_without_collision_is_the_plain_stem() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            unique_destination(dir.path(), "Foo"),
            dir.path().join("Foo.pdf")
        );
    }

    #[test]
    fn collisions_count_upward_until_a_free_name() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("Foo.pdf")).unwrap();
        assert_eq!(
            unique_destination(dir.path(), "Foo"),
            dir.path().join("Foo_1.pdf")
        );

        File::create(dir.path().join("Foo_1.pdf")).unwrap();
        assert_eq!(
            unique_destination(dir.path(), "Foo"),
            dir.path().join("Foo_2.pdf")
        );
    }

    #[test]
    fn rename_moves_the_file_and_reports_the_final_name() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("a.pdf")).unwrap();

        let new_name = rename_to_value(dir.path(), "a.pdf", "Acct: A/B").unwrap();
        assert_eq!(new_name, "Acct_ A_B.pdf");
        assert!(dir.path().join("Acct_ A_B.pdf").exists());
        assert!(!dir.path().join("a.pdf").exists());
    }

    #[test]
    fn rename_never_overwrites_an_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("a.pdf")).unwrap();
        std::fs::write(dir.path().join("123.pdf"), b"keep me").unwrap();

        let new_name = rename_to_value(dir.path(), "a.pdf", "123").unwrap();
        assert_eq!(new_name, "123_1.pdf");
        assert_eq!(std::fs::read(dir.path().join("123.pdf")).unwrap(), b"keep me");
    }

    #[test]
    fn empty_stem_renames_to_bare_extension() {
        // An empty field value really does produce a file named ".pdf".
        // Deliberate, see DESIGN.md.
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("a.pdf")).unwrap();

        let new_name = rename_to_value(dir.path(), "a.pdf", "").unwrap();
        assert_eq!(new_name, ".pdf");
        assert!(dir.path().join(".pdf").exists());
    }

    #[test]
    fn rename_of_a_missing_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = rename_to_value(dir.path(), "ghost.pdf", "value").unwrap_err();
        assert!(matches!(err, RenamerError::Rename { .. }));
    }
}
