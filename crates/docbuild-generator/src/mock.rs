//! Mock generator implementation for testing.
//!
//! Provides [`MockGenerator`] for exercising the build pipeline without a
//! real subprocess.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::{DocGenerator, GeneratorError};

/// One recorded invocation of [`DocGenerator::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorCall {
    /// Generator configuration file passed to the call.
    pub config: PathBuf,
    /// Header paths passed to the call.
    pub headers: Vec<PathBuf>,
    /// Output prefix passed to the call.
    pub output_prefix: String,
}

/// Mock generator for testing.
///
/// Records every call and returns a configurable result. An optional
/// callback can fabricate output files the way the real tool would.
///
/// # Example
///
/// ```ignore
/// use docbuild_generator::{DocGenerator, MockGenerator};
///
/// let generator = MockGenerator::new()
///     .with_callback(|call| {
///         std::fs::write(format!("{}page.md", call.output_prefix), "# Page").unwrap();
///     });
///
/// generator.generate(Path::new("gen.ini"), &[], "out/api/").unwrap();
/// assert_eq!(generator.calls().len(), 1);
/// ```
#[derive(Default)]
pub struct MockGenerator {
    calls: Mutex<Vec<GeneratorCall>>,
    fail_code: Option<i32>,
    on_generate: Option<Box<dyn Fn(&GeneratorCall) + Send + Sync>>,
}

impl MockGenerator {
    /// Create a new mock that records calls and succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with the given exit code.
    #[must_use]
    pub fn with_failure(mut self, code: i32) -> Self {
        self.fail_code = Some(code);
        self
    }

    /// Run `callback` on every call, after recording it.
    #[must_use]
    pub fn with_callback(
        mut self,
        callback: impl Fn(&GeneratorCall) + Send + Sync + 'static,
    ) -> Self {
        self.on_generate = Some(Box::new(callback));
        self
    }

    /// Recorded calls, in invocation order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<GeneratorCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl DocGenerator for MockGenerator {
    fn generate(
        &self,
        config: &Path,
        headers: &[PathBuf],
        output_prefix: &str,
    ) -> Result<(), GeneratorError> {
        let call = GeneratorCall {
            config: config.to_path_buf(),
            headers: headers.to_vec(),
            output_prefix: output_prefix.to_owned(),
        };
        self.calls.lock().unwrap().push(call.clone());

        if let Some(callback) = &self.on_generate {
            callback(&call);
        }

        match self.fail_code {
            Some(code) => Err(GeneratorError::Failed {
                binary: "mock".to_owned(),
                code,
            }),
            None => Ok(()),
        }
    }
}
