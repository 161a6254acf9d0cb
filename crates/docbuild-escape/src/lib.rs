//! Code-fence escaping for generated markdown.
//!
//! The reference generator emits markdown whose C++ code blocks would be
//! re-processed by the downstream site renderer. This crate wraps every
//! fenced block opened by the exact line ```` ``` cpp ```` in a pair of
//! raw-passthrough sentinel lines so the renderer leaves the block
//! contents untouched.
//!
//! Matching is deliberately literal: lines are compared by string
//! equality against the fence tokens, trailing newline included. There is
//! no trimming and no tolerance for tilde fences or indented fences. The
//! pass is not idempotent - re-running it over its own output inserts a
//! second sentinel pair, because the opening fence line still matches.

use std::fs;
use std::path::{Path, PathBuf};

/// Tokens driving the escaping pass.
///
/// All comparisons are exact, including the trailing newline, so a final
/// line without one never matches a token.
#[derive(Debug, Clone)]
pub struct EscapeRules {
    /// Opening fence line for the matching label (e.g. ```` ``` cpp ````).
    open_fence: String,
    /// Closing fence line for any fenced block.
    close_fence: String,
    /// Sentinel line emitted before a matching fence.
    raw_open: String,
    /// Sentinel line emitted after the fence closes.
    raw_close: String,
}

impl EscapeRules {
    /// Build rules for the given fence label and sentinel pair.
    ///
    /// The sentinel strings are passed without trailing newlines; the
    /// newlines are appended here.
    #[must_use]
    pub fn new(label: &str, raw_open: &str, raw_close: &str) -> Self {
        Self {
            open_fence: format!("``` {label}\n"),
            close_fence: "```\n".to_owned(),
            raw_open: format!("{raw_open}\n"),
            raw_close: format!("{raw_close}\n"),
        }
    }
}

impl Default for EscapeRules {
    /// C++ fences wrapped in Jekyll/Liquid raw tags.
    fn default() -> Self {
        Self::new("cpp", "{% raw %}", "{% endraw %}")
    }
}

/// Error returned by the escaping pass.
#[derive(Debug, thiserror::Error)]
pub enum EscapeError {
    /// Reading the target file failed (missing, unreadable, or not UTF-8).
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Path of the file being escaped.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Rewriting the target file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Path of the file being escaped.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Insert sentinel lines around matching fences.
///
/// Single linear pass over the line sequence with one boolean state flag
/// ("currently inside a matching fence"). An opening token seen while the
/// flag is set is ordinary content; a matching fence left open at
/// end-of-input never receives a closing sentinel.
#[must_use]
pub fn escape_content(content: &str, rules: &EscapeRules) -> String {
    let mut escaped = String::with_capacity(content.len());
    let mut in_fence = false;
    for line in content.split_inclusive('\n') {
        if !in_fence && line == rules.open_fence {
            escaped.push_str(&rules.raw_open);
            in_fence = true;
        }
        escaped.push_str(line);
        if in_fence && line == rules.close_fence {
            escaped.push_str(&rules.raw_close);
            in_fence = false;
        }
    }
    escaped
}

/// Escape a generated markdown file in place.
///
/// Reads the file fully, transforms it with [`escape_content`], and
/// truncate-rewrites the same path. No backup is kept; the files are
/// regenerable build artifacts.
///
/// # Errors
///
/// Returns [`EscapeError::Read`] when the file is missing, unreadable, or
/// not valid UTF-8, and [`EscapeError::Write`] when the rewrite fails.
pub fn escape_file(path: &Path, rules: &EscapeRules) -> Result<(), EscapeError> {
    let content = fs::read_to_string(path).map_err(|source| EscapeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let escaped = escape_content(&content, rules);
    fs::write(path, escaped).map_err(|source| EscapeError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Escaped code fences");
    Ok(())
}
