//! Content staging for the documentation build.
//!
//! Two filesystem concerns live here: merging the static content tree
//! into the output directory, and discovering the header files handed to
//! the reference generator.

use std::fs;
use std::path::{Path, PathBuf};

/// Error returned by content staging.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The static content directory does not exist.
    #[error("Content directory not found: {}", .0.display())]
    ContentsNotFound(PathBuf),
    /// The header include directory does not exist.
    #[error("Include directory not found: {}", .0.display())]
    IncludeNotFound(PathBuf),
    /// I/O error while copying or walking.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A header glob pattern could not be compiled.
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// A glob match could not be read.
    #[error("Failed to read glob entry: {0}")]
    Glob(#[from] glob::GlobError),
}

/// Copy `src` into `dst` recursively with merge semantics.
///
/// Destination directories are created as needed and same-named files are
/// overwritten. Files already present under `dst` but absent from `src`
/// are left alone. Returns the number of files copied.
///
/// # Errors
///
/// Returns [`ContentError::ContentsNotFound`] when `src` is not a
/// directory, and [`ContentError::Io`] for any copy failure.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize, ContentError> {
    if !src.is_dir() {
        return Err(ContentError::ContentsNotFound(src.to_path_buf()));
    }
    let copied = copy_dir(src, dst)?;
    tracing::debug!(
        src = %src.display(),
        dst = %dst.display(),
        file_count = copied,
        "Copied content tree"
    );
    Ok(copied)
}

fn copy_dir(src: &Path, dst: &Path) -> Result<usize, ContentError> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Discover header files under `include_dir`.
///
/// Matches `**/*.<ext>` for each extension and returns the combined list
/// sorted lexicographically, so the generator command line is
/// deterministic across runs.
///
/// # Errors
///
/// Returns [`ContentError::IncludeNotFound`] when `include_dir` is not a
/// directory, and glob errors for unreadable matches.
pub fn discover_headers(
    include_dir: &Path,
    extensions: &[String],
) -> Result<Vec<PathBuf>, ContentError> {
    if !include_dir.is_dir() {
        return Err(ContentError::IncludeNotFound(include_dir.to_path_buf()));
    }
    let mut headers = Vec::new();
    for ext in extensions {
        let pattern = include_dir.join(format!("**/*.{ext}"));
        for entry in glob::glob(&pattern.to_string_lossy())? {
            headers.push(entry?);
        }
    }
    headers.sort();
    tracing::debug!(
        include_dir = %include_dir.display(),
        header_count = headers.len(),
        "Discovered headers"
    );
    Ok(headers)
}
