//! `pipedoc list` command implementation.

use std::path::PathBuf;

use clap::Args;
use pipedoc_config::{CliSettings, Config};
use pipedoc_meta::{Catalog, Transform, load_dir};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Path to configuration file (default: auto-discover pipedoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Metadata directory (overrides config).
    #[arg(short, long)]
    meta_dir: Option<PathBuf>,
}

impl ListArgs {
    /// Execute the list command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or metadata cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            meta_dir: self.meta_dir,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let catalog = load_dir(&config.paths.metadata_dir)?;

        output.highlight(&format!(
            "{} transforms in {}",
            catalog.transforms.len(),
            config.paths.metadata_dir.display()
        ));
        for line in summary_lines(&catalog) {
            output.line(&line);
        }
        Ok(())
    }
}

fn summary_lines(catalog: &Catalog) -> Vec<String> {
    catalog.transforms.values().map(summary_line).collect()
}

fn summary_line(transform: &Transform) -> String {
    let mut line = format!(
        "{}\t{} -> {}",
        transform.name,
        type_list(&transform.input_types),
        type_list(&transform.output_types)
    );
    if transform.beta {
        line.push_str("\t(beta)");
    }
    line
}

fn type_list(types: &[String]) -> String {
    if types.is_empty() {
        "-".to_owned()
    } else {
        types.join(",")
    }
}
