//! Subprocess-backed generator implementation.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{DocGenerator, GeneratorError};

/// Invokes the standardese binary as a blocking subprocess.
///
/// The child inherits stdio, runs with no timeout and no retry, and its
/// command line is `<binary> -c <config> --output.prefix <prefix>
/// <header...>`.
#[derive(Debug, Clone)]
pub struct StandardeseGenerator {
    binary: String,
}

impl StandardeseGenerator {
    /// Create a generator invoking the given binary name or path.
    #[must_use]
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl DocGenerator for StandardeseGenerator {
    fn generate(
        &self,
        config: &Path,
        headers: &[PathBuf],
        output_prefix: &str,
    ) -> Result<(), GeneratorError> {
        let mut command = Command::new(&self.binary);
        command
            .arg("-c")
            .arg(config)
            .arg("--output.prefix")
            .arg(output_prefix)
            .args(headers);

        tracing::info!(
            binary = %self.binary,
            config = %config.display(),
            header_count = headers.len(),
            "Running documentation generator"
        );

        let status = command.status().map_err(|source| GeneratorError::Spawn {
            binary: self.binary.clone(),
            source,
        })?;

        if !status.success() {
            return Err(GeneratorError::Failed {
                binary: self.binary.clone(),
                code: status.code().unwrap_or(-1),
            });
        }
        Ok(())
    }
}
