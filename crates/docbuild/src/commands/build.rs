//! Build pipeline implementation.
//!
//! Runs the four build steps in order, failing fast at each one: merge
//! the static content tree, discover headers, invoke the reference
//! generator, escape the generated markdown. A generator failure aborts
//! the run before the escaping pass touches any partial output.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use docbuild_config::{CliSettings, Config};
use docbuild_content::{copy_tree, discover_headers};
use docbuild_escape::{EscapeRules, escape_file};
use docbuild_generator::{DocGenerator, StandardeseGenerator};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build pipeline.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Output directory for the built documentation.
    output_dir: PathBuf,

    /// Path to configuration file (default: auto-discover docbuild.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Static content directory (overrides config).
    #[arg(long)]
    contents_dir: Option<PathBuf>,

    /// Header include directory (overrides config).
    #[arg(long)]
    include_dir: Option<PathBuf>,

    /// Generator configuration file (overrides config).
    #[arg(long)]
    generator_config: Option<PathBuf>,

    /// Enable verbose output (show per-step timing logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any build step fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            contents_dir: self.contents_dir,
            include_dir: self.include_dir,
            generator_config: self.generator_config,
        };

        // Load config
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let generator = StandardeseGenerator::new(config.generator_resolved.binary.clone());
        let escaped = run_build(&config, &generator, &self.output_dir, &output)?;

        output.success(&format!(
            "Documentation built to {} ({escaped} pages escaped)",
            self.output_dir.display()
        ));
        Ok(())
    }
}

/// Run the build pipeline against the given generator.
///
/// Returns the number of generated pages the escaping pass rewrote.
fn run_build(
    config: &Config,
    generator: &dyn DocGenerator,
    output_dir: &Path,
    output: &Output,
) -> Result<usize, CliError> {
    output.info(&format!(
        "Contents: {}",
        config.docs_resolved.contents_dir.display()
    ));
    output.info(&format!("Output: {}", output_dir.display()));

    let copied = copy_tree(&config.docs_resolved.contents_dir, output_dir)?;
    tracing::info!(file_count = copied, "Copied static content");

    let headers = discover_headers(
        &config.docs_resolved.include_dir,
        &config.generator_resolved.header_extensions,
    )?;
    output.info(&format!("Found {} header files", headers.len()));

    let api_dir = output_dir.join("api");
    fs::create_dir_all(&api_dir)?;
    let output_prefix = format!("{}{}", api_dir.display(), std::path::MAIN_SEPARATOR);
    generator.generate(&config.generator_resolved.config_file, &headers, &output_prefix)?;

    let rules = EscapeRules::new(
        &config.escape.label,
        &config.escape.raw_open,
        &config.escape.raw_close,
    );
    let mut escaped = 0;
    for entry in fs::read_dir(&api_dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && path.extension().is_some_and(|e| e == "md") {
            escape_file(&path, &rules)?;
            escaped += 1;
        }
    }
    tracing::info!(page_count = escaped, "Escaped generated pages");

    Ok(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docbuild_generator::MockGenerator;

    /// Write a config file and fixture trees, returning the loaded config.
    fn fixture_config(root: &Path) -> Config {
        let contents = root.join("contents");
        fs::create_dir_all(contents.join("guide")).unwrap();
        fs::write(contents.join("index.md"), "# Home\n").unwrap();
        fs::write(contents.join("guide/setup.md"), "# Setup\n").unwrap();

        let include = root.join("include");
        fs::create_dir_all(include.join("async")).unwrap();
        fs::write(include.join("file.h"), "").unwrap();
        fs::write(include.join("async/mutex.hpp"), "").unwrap();

        let config_path = root.join("docbuild.toml");
        fs::write(
            &config_path,
            r#"
[docs]
contents_dir = "contents"
include_dir = "include"

[generator]
config_file = "standardese.ini"
"#,
        )
        .unwrap();

        Config::load(Some(&config_path), None).unwrap()
    }

    #[test]
    fn test_run_build_full_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let config = fixture_config(root);
        let out_dir = root.join("out");

        // Fabricate a generated page the way the real tool would.
        let generator = MockGenerator::new().with_callback(|call| {
            let page = format!("{}doc_file.md", call.output_prefix);
            fs::write(page, "# file.h\n\n``` cpp\nint x;\n```\n").unwrap();
        });

        let escaped = run_build(&config, &generator, &out_dir, &Output::new()).unwrap();

        assert_eq!(escaped, 1);

        // Content tree merged into the output directory.
        assert_eq!(
            fs::read_to_string(out_dir.join("index.md")).unwrap(),
            "# Home\n"
        );
        assert_eq!(
            fs::read_to_string(out_dir.join("guide/setup.md")).unwrap(),
            "# Setup\n"
        );

        // Generator called once with the resolved config, sorted headers,
        // and a prefix ending in a separator.
        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].config, root.join("standardese.ini"));
        assert_eq!(
            calls[0].headers,
            vec![root.join("include/async/mutex.hpp"), root.join("include/file.h")]
        );
        assert!(calls[0].output_prefix.ends_with(std::path::MAIN_SEPARATOR));
        assert!(calls[0].output_prefix.contains("api"));

        // Generated page rewritten in place with sentinel lines.
        assert_eq!(
            fs::read_to_string(out_dir.join("api/doc_file.md")).unwrap(),
            "# file.h\n\n{% raw %}\n``` cpp\nint x;\n```\n{% endraw %}\n"
        );
    }

    #[test]
    fn test_run_build_preserves_unrelated_output_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let config = fixture_config(root);
        let out_dir = root.join("out");
        fs::create_dir_all(&out_dir).unwrap();
        fs::write(out_dir.join("unrelated.txt"), "keep me").unwrap();

        run_build(&config, &MockGenerator::new(), &out_dir, &Output::new()).unwrap();

        assert_eq!(
            fs::read_to_string(out_dir.join("unrelated.txt")).unwrap(),
            "keep me"
        );
    }

    #[test]
    fn test_run_build_skips_non_markdown_output() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let config = fixture_config(root);
        let out_dir = root.join("out");

        let generator = MockGenerator::new().with_callback(|call| {
            fs::write(
                format!("{}page.md", call.output_prefix),
                "``` cpp\nint x;\n```\n",
            )
            .unwrap();
            fs::write(format!("{}styles.css", call.output_prefix), "``` cpp\n").unwrap();
        });

        let escaped = run_build(&config, &generator, &out_dir, &Output::new()).unwrap();

        assert_eq!(escaped, 1);
        assert_eq!(
            fs::read_to_string(out_dir.join("api/styles.css")).unwrap(),
            "``` cpp\n"
        );
    }

    #[test]
    fn test_run_build_generator_failure_aborts_before_escaping() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let config = fixture_config(root);

        // A page already sitting in the output api directory must stay
        // untouched when the generator fails.
        let out_dir = root.join("out");
        fs::create_dir_all(out_dir.join("api")).unwrap();
        fs::write(out_dir.join("api/stale.md"), "``` cpp\nint x;\n```\n").unwrap();

        let generator = MockGenerator::new().with_failure(1);

        let err = run_build(&config, &generator, &out_dir, &Output::new()).unwrap_err();

        assert!(matches!(err, CliError::Generator(_)));
        assert_eq!(
            fs::read_to_string(out_dir.join("api/stale.md")).unwrap(),
            "``` cpp\nint x;\n```\n"
        );
    }

    #[test]
    fn test_run_build_missing_contents_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let config = fixture_config(root);
        fs::remove_dir_all(root.join("contents")).unwrap();

        let err = run_build(
            &config,
            &MockGenerator::new(),
            &root.join("out"),
            &Output::new(),
        )
        .unwrap_err();

        assert!(matches!(err, CliError::Content(_)));
    }
}
