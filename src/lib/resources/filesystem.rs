//! Module for finding resource files on the filesystem.

use std::path::{Path, PathBuf};

use glob::{self, Pattern};


/// Find files named `file_name` directly inside given directory.
///
/// Letter case of the name is ignored (so that e.g. `impact.ttf` finds `Impact.TTF`).
pub fn find_in_directory<D: AsRef<Path>>(directory: D, file_name: &str) -> Vec<PathBuf> {
    filter_by_name(list_directory(directory), file_name)
}

/// List all the files directly inside given directory.
pub fn list_directory<D: AsRef<Path>>(directory: D) -> Vec<PathBuf> {
    list(directory.as_ref(), "*")
}

/// List all the files within given directory tree.
pub fn list_tree<D: AsRef<Path>>(directory: D) -> Vec<PathBuf> {
    list(directory.as_ref(), "**/*")
}

/// Keep only those paths whose file name is `file_name`, ignoring letter case.
pub fn filter_by_name<I>(paths: I, file_name: &str) -> Vec<PathBuf>
    where I: IntoIterator<Item=PathBuf>
{
    paths.into_iter().filter(|p| has_name(p, file_name)).collect()
}

fn has_name(path: &Path, file_name: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.eq_ignore_ascii_case(file_name))
        .unwrap_or(false)
}


fn list(directory: &Path, file_pattern: &str) -> Vec<PathBuf> {
    if !directory.is_dir() {
        return vec![];
    }
    let pattern = format!("{}/{}",
        Pattern::escape(&directory.display().to_string()), file_pattern);
    trace!("Globbing with {}", pattern);

    let paths = match glob::glob(&pattern) {
        Ok(it) => it,
        Err(e) => {
            error!("Failed to glob over files with {}: {}", pattern, e);
            return vec![];
        }
    };
    let mut files: Vec<_> = paths
        .filter_map(|p| p.map_err(|e| warn!("Cannot access {}", e)).ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    files
}
