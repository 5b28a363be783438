//! `pipedoc generate` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use pipedoc_config::{CliSettings, Config};
use pipedoc_meta::{Catalog, Transform, load_dir};
use pipedoc_render::{PageSettings, RenderError, TransformGenerator};
use rayon::prelude::*;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Path to configuration file (default: auto-discover pipedoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Metadata directory (overrides config).
    #[arg(short, long)]
    meta_dir: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Only generate the named transform (repeatable).
    #[arg(short, long = "transform", value_name = "NAME")]
    transforms: Vec<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Error for a single page. Other pages are unaffected.
#[derive(Debug, thiserror::Error)]
pub(crate) enum PageError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of generating one page.
#[derive(Debug)]
pub(crate) struct PageOutcome {
    pub name: String,
    pub result: Result<PathBuf, PageError>,
}

impl GenerateArgs {
    /// Execute the generate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or metadata cannot be loaded, a
    /// selected transform does not exist, or any page fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            meta_dir: self.meta_dir,
            output_dir: self.output_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Metadata directory: {}",
            config.paths.metadata_dir.display()
        ));
        let catalog = load_dir(&config.paths.metadata_dir)?;
        let selected = select_transforms(&catalog, &self.transforms)?;

        std::fs::create_dir_all(&config.paths.output_dir)?;
        let outcomes = generate_pages(&config, &catalog, &selected);

        let total = outcomes.len();
        let mut failed = 0;
        for outcome in &outcomes {
            match &outcome.result {
                Ok(path) => output.info(&format!("  {} -> {}", outcome.name, path.display())),
                Err(e) => {
                    failed += 1;
                    output.warning(&format!("  {}: {e}", outcome.name));
                }
            }
        }

        if failed > 0 {
            return Err(CliError::Failed { failed, total });
        }
        output.success(&format!(
            "Generated {total} pages in {}",
            config.paths.output_dir.display()
        ));
        Ok(())
    }
}

/// Resolve the requested names, or every transform when none are given.
fn select_transforms<'a>(
    catalog: &'a Catalog,
    names: &[String],
) -> Result<Vec<&'a Transform>, CliError> {
    if names.is_empty() {
        return Ok(catalog.transforms.values().collect());
    }
    names
        .iter()
        .map(|name| {
            catalog.transforms.get(name).ok_or_else(|| {
                CliError::Validation(format!("Unknown transform `{name}`"))
            })
        })
        .collect()
}

/// Render and write pages in parallel, in the order given.
pub(crate) fn generate_pages(
    config: &Config,
    catalog: &Catalog,
    transforms: &[&Transform],
) -> Vec<PageOutcome> {
    let outcomes: Vec<PageOutcome> = transforms
        .par_iter()
        .map(|transform| PageOutcome {
            name: transform.name.clone(),
            result: write_page(config, catalog, transform),
        })
        .collect();

    for outcome in &outcomes {
        if let Err(e) = &outcome.result {
            tracing::warn!(transform = %outcome.name, error = %e, "Failed to generate page");
        }
    }
    outcomes
}

fn write_page(
    config: &Config,
    catalog: &Catalog,
    transform: &Transform,
) -> Result<PathBuf, PageError> {
    let settings = page_settings(config, catalog.origins.get(&transform.name));
    let page = TransformGenerator::new(transform, &catalog.guides)?
        .with_settings(settings)
        .generate();

    let path = config
        .paths
        .output_dir
        .join(format!("{}.md", transform.name));
    std::fs::write(&path, page).map_err(|source| PageError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(transform = %transform.name, path = %path.display(), "Wrote page");
    Ok(path)
}

fn page_settings(config: &Config, origin: Option<&PathBuf>) -> PageSettings {
    let defaults = PageSettings::default();
    let metadata_path = origin.map_or(defaults.metadata_path, |origin| {
        display_path(origin, &config.paths.project_dir)
    });
    PageSettings {
        root_path: config.links.root_path.clone(),
        repository_url: config.links.repository_url.clone(),
        metadata_path,
        config_filename: config.links.config_filename.clone(),
    }
}

/// `path` relative to `base` with `/` separators, or as-is outside `base`.
fn display_path(path: &Path, base: &Path) -> String {
    let Ok(relative) = path.strip_prefix(base) else {
        return path.display().to_string();
    };
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    /// Log sink for asserting on emitted events.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    const METADATA: &str = r#"
[transforms.sampler]
description = "Sample events."
input_types = ["log"]
output_types = ["log"]
beta = true

[transforms.sampler.options.rate]
type = "int"
required = true

[transforms.broken]
description = "Broken options."

[transforms.broken.options.key]
name = "other"
type = "string"
"#;

    fn setup(dir: &Path) -> (Config, Catalog) {
        let meta = dir.join(".meta");
        std::fs::create_dir_all(&meta).unwrap();
        std::fs::write(meta.join("transforms.toml"), METADATA).unwrap();
        std::fs::write(
            dir.join("pipedoc.toml"),
            "[output]\ndir = \"out\"\n\n[links]\nrepository_url = \"https://github.com/acme/pipes\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&dir.join("pipedoc.toml")), None).unwrap();
        std::fs::create_dir_all(&config.paths.output_dir).unwrap();
        let catalog = load_dir(&config.paths.metadata_dir).unwrap();
        (config, catalog)
    }

    #[test]
    fn test_failed_page_does_not_stop_others() {
        let dir = tempfile::tempdir().unwrap();
        let (config, catalog) = setup(dir.path());
        let transforms = select_transforms(&catalog, &[]).unwrap();

        let outcomes = generate_pages(&config, &catalog, &transforms);
        let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["broken", "sampler"]);

        assert!(matches!(
            outcomes[0].result,
            Err(PageError::Render(RenderError::MalformedOptions { .. }))
        ));
        let written = outcomes[1].result.as_ref().unwrap();
        assert_eq!(written, &dir.path().join("out/sampler.md"));
        assert!(!dir.path().join("out/broken.md").exists());

        let page = std::fs::read_to_string(written).unwrap();
        assert!(page.contains("# sampler transform"));
        assert!(page.contains("`.meta/transforms.toml`"));
        assert!(page.contains("| `rate` | required | `int` |"));
    }

    #[test]
    fn test_links_come_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let (config, catalog) = setup(dir.path());
        let transforms = select_transforms(&catalog, &["sampler".to_owned()]).unwrap();

        let outcomes = generate_pages(&config, &catalog, &transforms);
        let page = std::fs::read_to_string(outcomes[0].result.as_ref().unwrap()).unwrap();
        assert!(page.contains("https://github.com/acme/pipes/issues"));
        assert!(page.contains("[`log`](../../../about/data-model/log.md)"));
    }

    #[test]
    fn test_select_unknown_transform() {
        let dir = tempfile::tempdir().unwrap();
        let (_, catalog) = setup(dir.path());
        let err = select_transforms(&catalog, &["missing".to_owned()]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown transform `missing`");
    }

    #[test]
    fn test_display_path() {
        assert_eq!(
            display_path(Path::new("/repo/.meta/a.toml"), Path::new("/repo")),
            ".meta/a.toml"
        );
        assert_eq!(
            display_path(Path::new("/other/a.toml"), Path::new("/repo")),
            "/other/a.toml"
        );
    }

    #[test]
    fn test_failed_pages_are_logged() {
        let dir = tempfile::tempdir().unwrap();
        let (config, catalog) = setup(dir.path());
        let transforms = select_transforms(&catalog, &[]).unwrap();

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            generate_pages(&config, &catalog, &transforms);
        });

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let warnings: Vec<&str> = logs.lines().filter(|l| l.contains("WARN")).collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Failed to generate page"));
        assert!(warnings[0].contains("transform=broken"));
    }
}
