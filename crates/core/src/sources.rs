//! Expansion of file and directory arguments into the list of Go files to scan

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const GO_EXTENSION: &str = "go";

/// Expand `paths` into Go source files, keeping argument order.
///
/// Files are taken as given. Directories contribute their immediate `.go` files (no
/// recursion) sorted by file name.
pub fn collect_go_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|source| Error::FileError {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_dir() {
            files.push(path.to_path_buf());
            continue;
        }

        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let message = e.to_string();
                Error::FileError {
                    path: path.to_path_buf(),
                    source: e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other(message)),
                }
            })?;
            if is_go_file(entry.path(), !entry.file_type().is_dir()) {
                files.push(entry.into_path());
            }
        }
    }
    Ok(files)
}

fn is_go_file(path: &Path, is_file: bool) -> bool {
    is_file && path.extension().and_then(|e| e.to_str()) == Some(GO_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_directory_expansion_is_sorted_and_flat() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.go"), "package p").unwrap();
        fs::write(dir.path().join("a.go"), "package p").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested.go")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.go"), "package sub").unwrap();

        let files = collect_go_files(&[dir.path()]).unwrap();
        assert_eq!(names(&files), vec!["a.go", "b.go"]);
    }

    #[test]
    fn test_argument_order_is_kept() {
        let dir = TempDir::new().unwrap();
        let z = dir.path().join("z.go");
        let sub = dir.path().join("pkg");
        fs::write(&z, "package p").unwrap();
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("a.go"), "package p").unwrap();

        let files = collect_go_files(&[z.clone(), sub]).unwrap();
        assert_eq!(names(&files), vec!["z.go", "a.go"]);
    }

    #[test]
    fn test_explicit_files_are_not_filtered() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("store.go.txt");
        fs::write(&file, "package p").unwrap();
        assert_eq!(collect_go_files(&[&file]).unwrap(), vec![file]);
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.go");
        let err = collect_go_files(&[&missing]).unwrap_err();
        assert!(matches!(err, Error::FileError { .. }));
        assert!(err.to_string().contains("missing.go"));
    }
}
