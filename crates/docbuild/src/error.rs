//! CLI error types.

use docbuild_config::ConfigError;
use docbuild_content::ContentError;
use docbuild_escape::EscapeError;
use docbuild_generator::GeneratorError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Escape(#[from] EscapeError),

    #[error("{0}")]
    Generator(#[from] GeneratorError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
