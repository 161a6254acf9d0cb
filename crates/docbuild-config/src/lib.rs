//! Configuration management for docbuild.
//!
//! Parses `docbuild.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! Relative paths in the config file are resolved against the directory
//! containing it, so a `docbuild.toml` next to the content tree works the
//! same from any working directory.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override static content directory.
    pub contents_dir: Option<PathBuf>,
    /// Override header include directory.
    pub include_dir: Option<PathBuf>,
    /// Override generator configuration file.
    pub generator_config: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docbuild.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation paths (relative strings from TOML).
    docs: DocsConfigRaw,
    /// Generator configuration (paths are relative strings from TOML).
    generator: GeneratorConfigRaw,
    /// Fence escaping configuration.
    pub escape: EscapeConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved generator configuration (set after loading).
    #[serde(skip)]
    pub generator_resolved: GeneratorConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    contents_dir: Option<String>,
    include_dir: Option<String>,
}

/// Resolved documentation paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Static content tree merged into the output directory.
    pub contents_dir: PathBuf,
    /// Root directory searched for header files.
    pub include_dir: PathBuf,
}

/// Raw generator configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct GeneratorConfigRaw {
    binary: Option<String>,
    config_file: Option<String>,
    header_extensions: Option<Vec<String>>,
}

/// Resolved generator configuration.
#[derive(Debug)]
pub struct GeneratorConfig {
    /// Generator binary name or path (looked up on `PATH` when bare).
    pub binary: String,
    /// The generator's own configuration file.
    pub config_file: PathBuf,
    /// Header file extensions handed to discovery.
    pub header_extensions: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            binary: "standardese".to_owned(),
            config_file: PathBuf::from("standardese.ini"),
            header_extensions: default_header_extensions(),
        }
    }
}

fn default_header_extensions() -> Vec<String> {
    vec!["h".to_owned(), "hpp".to_owned()]
}

/// Fence escaping configuration.
///
/// Defaults reproduce the C++ label and Jekyll/Liquid raw tags.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EscapeConfig {
    /// Fence label whose blocks get wrapped.
    pub label: String,
    /// Sentinel line inserted before a matching fence.
    pub raw_open: String,
    /// Sentinel line inserted after the fence closes.
    pub raw_close: String,
}

impl Default for EscapeConfig {
    fn default() -> Self {
        Self {
            label: "cpp".to_owned(),
            raw_open: "{% raw %}".to_owned(),
            raw_close: "{% endraw %}".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docbuild.toml` in current directory and
    /// parents, falling back to built-in defaults when none exists.
    ///
    /// CLI settings are applied after loading and path resolution, allowing
    /// CLI arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(contents_dir) = &settings.contents_dir {
            self.docs_resolved.contents_dir.clone_from(contents_dir);
        }
        if let Some(include_dir) = &settings.include_dir {
            self.docs_resolved.include_dir.clone_from(include_dir);
        }
        if let Some(generator_config) = &settings.generator_config {
            self.generator_resolved.config_file.clone_from(generator_config);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    ///
    /// The defaults mirror the conventional layout: content next to the
    /// config, headers in a sibling `lib/include` tree.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            generator: GeneratorConfigRaw::default(),
            escape: EscapeConfig::default(),
            docs_resolved: DocsConfig {
                contents_dir: base.join("contents"),
                include_dir: base.join("../lib/include"),
            },
            generator_resolved: GeneratorConfig {
                binary: "standardese".to_owned(),
                config_file: base.join("standardese.ini"),
                header_extensions: default_header_extensions(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.generator_resolved.binary, "generator.binary")?;
        if self.generator_resolved.header_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "generator.header_extensions cannot be empty".to_owned(),
            ));
        }
        for ext in &self.generator_resolved.header_extensions {
            require_non_empty(ext, "generator.header_extensions entry")?;
        }
        require_non_empty(&self.escape.label, "escape.label")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            contents_dir: resolve(self.docs.contents_dir.as_deref(), "contents"),
            include_dir: resolve(self.docs.include_dir.as_deref(), "../lib/include"),
        };

        self.generator_resolved = GeneratorConfig {
            binary: self
                .generator
                .binary
                .clone()
                .unwrap_or_else(|| "standardese".to_owned()),
            config_file: resolve(self.generator.config_file.as_deref(), "standardese.ini"),
            header_extensions: self
                .generator
                .header_extensions
                .clone()
                .unwrap_or_else(default_header_extensions),
        };
    }
}
