//! Recursive listing of the files to sort.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files found under a source folder, plus entries that could not be read.
#[derive(Debug, Default)]
pub struct SourceListing {
    pub files: Vec<PathBuf>,
    /// Unreadable subdirectories or entries; logged and skipped.
    pub errors: Vec<String>,
}

/// Lists regular files (and symlinks to files) under `root`, sorted by path.
/// Anything under `exclude` is skipped, so an output folder nested in the
/// source is never re-sorted. Blocking; run it on the blocking pool.
pub fn list_files(root: &Path, exclude: Option<&Path>) -> SourceListing {
    let mut listing = SourceListing::default();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| exclude.map_or(true, |ex| e.path() != ex));

    for entry in walker {
        match entry {
            Ok(e) => {
                let ft = e.file_type();
                if ft.is_file() || (ft.is_symlink() && e.path().is_file()) {
                    listing.files.push(e.into_path());
                }
            }
            Err(err) => {
                tracing::warn!("skipping unreadable entry: {}", err);
                listing.errors.push(err.to_string());
            }
        }
    }
    listing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_nested_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("folder1/deeper")).unwrap();
        std::fs::write(dir.path().join("root.txt"), b"r").unwrap();
        std::fs::write(dir.path().join("folder1/test1.pdf"), b"p").unwrap();
        std::fs::write(dir.path().join("folder1/deeper/x.jpg"), b"j").unwrap();

        let listing = list_files(dir.path(), None);
        assert!(listing.errors.is_empty());
        let names: Vec<String> = listing
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"root.txt".to_string()));
        assert!(names.contains(&"test1.pdf".to_string()));
        assert!(names.contains(&"x.jpg".to_string()));
    }

    #[test]
    fn excluded_subtree_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("sorted");
        std::fs::create_dir_all(out.join("txt")).unwrap();
        std::fs::write(out.join("txt/old.txt"), b"o").unwrap();
        std::fs::write(dir.path().join("new.txt"), b"n").unwrap();

        let listing = list_files(dir.path(), Some(&out));
        assert_eq!(listing.files, vec![dir.path().join("new.txt")]);
    }

    #[test]
    fn empty_folder_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let listing = list_files(dir.path(), None);
        assert!(listing.files.is_empty());
    }
}
