//! External reference-generator invocation.
//!
//! The documentation generator is an opaque collaborator driven entirely
//! through its command line. The [`DocGenerator`] trait keeps that
//! boundary narrow so the binary can be swapped or mocked in tests
//! without spawning a real subprocess:
//!
//! - [`StandardeseGenerator`] runs the real tool found on `PATH`
//! - [`MockGenerator`] records calls (behind the `mock` feature flag)

mod standardese;

#[cfg(feature = "mock")]
mod mock;

pub use standardese::StandardeseGenerator;

#[cfg(feature = "mock")]
pub use mock::{GeneratorCall, MockGenerator};

use std::path::{Path, PathBuf};

/// Error returned by generator invocation.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The generator binary could not be spawned (typically not on `PATH`).
    #[error("Failed to run generator '{binary}': {source}")]
    Spawn {
        /// Name of the binary that failed to spawn.
        binary: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The generator ran but exited unsuccessfully.
    #[error("Generator '{binary}' exited unsuccessfully (code {code})")]
    Failed {
        /// Name of the binary that failed.
        binary: String,
        /// Exit code, or -1 when terminated by a signal.
        code: i32,
    },
}

/// Narrow interface to the external documentation generator.
pub trait DocGenerator {
    /// Generate reference pages for `headers` into `output_prefix`.
    ///
    /// `config` is the generator's own configuration file;
    /// `output_prefix` is the path prefix (ending in a separator) under
    /// which the generator writes one markdown file per header.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] when the tool cannot be spawned or
    /// exits unsuccessfully. A failed generation aborts the build; the
    /// escaping pass never runs over partial output.
    fn generate(
        &self,
        config: &Path,
        headers: &[PathBuf],
        output_prefix: &str,
    ) -> Result<(), GeneratorError>;
}
