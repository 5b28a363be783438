//! TOML metadata loading.
//!
//! A metadata directory holds any number of `*.toml` files. Each file may
//! declare transforms and guides:
//!
//! ```toml
//! [transforms.add_fields]
//! description = "Add fields to log events."
//! input_types = ["log"]
//! output_types = ["log"]
//!
//! [transforms.add_fields.options.fields]
//! type = "table"
//! required = true
//!
//! [[guides]]
//! title = "Enriching events"
//! path = "guides/enriching.md"
//! components = ["add_fields"]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::guides::{GuideEntry, GuideIndex};
use crate::transform::Transform;

/// Error returned by the metadata loader.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Metadata directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid metadata in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error(
        "Transform `{name}` declared twice: {} and {}",
        first.display(),
        second.display()
    )]
    Duplicate {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Invalid transform name `{name}` in {}", path.display())]
    InvalidName { path: PathBuf, name: String },

    #[error("Invalid glob pattern: {0}")]
    Pattern(String),
}

/// Layout of a single metadata file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MetadataFile {
    transforms: BTreeMap<String, Transform>,
    guides: Vec<GuideEntry>,
}

/// Everything loaded from a metadata directory.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Transforms keyed by name.
    pub transforms: BTreeMap<String, Transform>,
    pub guides: GuideIndex,
    /// File each transform was declared in.
    pub origins: BTreeMap<String, PathBuf>,
}

impl Catalog {
    /// Parse one metadata file's content into the catalog.
    ///
    /// `path` is only used for error messages and origins.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Parse`] for malformed TOML,
    /// [`MetadataError::InvalidName`] for names that are not plain file
    /// names and [`MetadataError::Duplicate`] if a transform name is already
    /// present. Transforms are keyed by their declared name. On error the
    /// catalog is left unchanged.
    pub fn add_str(&mut self, path: &Path, content: &str) -> Result<(), MetadataError> {
        let file: MetadataFile = toml::from_str(content).map_err(|e| MetadataError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut added: BTreeMap<String, Transform> = BTreeMap::new();
        for (key, mut transform) in file.transforms {
            transform.fill_names(&key);
            let name = transform.name.clone();
            check_name(path, &name)?;
            let first = if added.contains_key(&name) {
                Some(path)
            } else {
                self.origins.get(&name).map(PathBuf::as_path)
            };
            if let Some(first) = first {
                return Err(MetadataError::Duplicate {
                    name,
                    first: first.to_path_buf(),
                    second: path.to_path_buf(),
                });
            }
            added.insert(name, transform);
        }

        for (name, transform) in added {
            self.origins.insert(name.clone(), path.to_path_buf());
            self.transforms.insert(name, transform);
        }
        for entry in &file.guides {
            self.guides.add_entry(entry);
        }
        Ok(())
    }
}

/// Transform names become page file names, so they must be a single plain
/// path component.
fn check_name(path: &Path, name: &str) -> Result<(), MetadataError> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if invalid {
        return Err(MetadataError::InvalidName {
            path: path.to_path_buf(),
            name: name.to_owned(),
        });
    }
    Ok(())
}

/// Load every `*.toml` file in `dir`, in path order.
///
/// # Errors
///
/// Returns an error if the directory is missing, a file cannot be read or
/// parsed, or a transform is declared in more than one file.
pub fn load_dir(dir: &Path) -> Result<Catalog, MetadataError> {
    if !dir.is_dir() {
        return Err(MetadataError::NotFound(dir.to_path_buf()));
    }

    let pattern = Path::new(&glob::Pattern::escape(&dir.to_string_lossy())).join("*.toml");
    let pattern = pattern.to_string_lossy();
    let mut paths: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|e| MetadataError::Pattern(e.to_string()))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(path = %e.path().display(), error = %e, "Skipping unreadable metadata entry");
                None
            }
        })
        .collect();
    paths.sort();

    let mut catalog = Catalog::default();
    for path in &paths {
        let content = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.clone(),
            source,
        })?;
        catalog.add_str(path, &content)?;
        tracing::debug!(path = %path.display(), "Loaded metadata file");
    }

    tracing::info!(
        dir = %dir.display(),
        files = paths.len(),
        transforms = catalog.transforms.len(),
        "Loaded transform metadata"
    );
    Ok(catalog)
}
