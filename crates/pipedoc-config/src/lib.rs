//! Configuration management for pipedoc.
//!
//! Parses `pipedoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String values under `[links]` support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "pipedoc.toml";

const DEFAULT_METADATA_DIR: &str = ".meta";
const DEFAULT_OUTPUT_DIR: &str = "docs/usage/configuration/transforms";

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override metadata directory.
    pub meta_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    metadata: DirConfigRaw,
    output: DirConfigRaw,
    /// Link settings for generated pages.
    pub links: LinksConfig,

    /// Resolved directories (set after loading).
    #[serde(skip)]
    pub paths: PathsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw `[metadata]` / `[output]` section (path as string).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DirConfigRaw {
    dir: Option<String>,
}

/// Resolved directories.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathsConfig {
    /// Directory holding transform metadata files.
    pub metadata_dir: PathBuf,
    /// Directory that receives generated pages.
    pub output_dir: PathBuf,
    /// Base directory for paths shown in generated pages.
    pub project_dir: PathBuf,
}

/// `[links]` section.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LinksConfig {
    /// Relative path from a generated page to the documentation root.
    pub root_path: String,
    /// Repository URL for issue and source links.
    pub repository_url: String,
    /// Configuration file name shown on example tabs.
    pub config_filename: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            root_path: "../../../".to_owned(),
            repository_url: "https://github.com/timberio/vector".to_owned(),
            config_filename: "vector.toml".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`links.repository_url`").
        field: String,
        /// Error message (e.g., "${`PIPEDOC_REPOSITORY`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `pipedoc.toml` in the current directory and
    /// parents, falling back to defaults relative to the current directory.
    ///
    /// CLI settings are applied after path resolution.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// an environment variable is unset or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_base(&std::env::current_dir().unwrap_or_default())
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(meta_dir) = &settings.meta_dir {
            self.paths.metadata_dir.clone_from(meta_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.paths.output_dir.clone_from(output_dir);
        }
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            metadata: DirConfigRaw::default(),
            output: DirConfigRaw::default(),
            links: LinksConfig::default(),
            paths: PathsConfig {
                metadata_dir: base.join(DEFAULT_METADATA_DIR),
                output_dir: base.join(DEFAULT_OUTPUT_DIR),
                project_dir: base.to_path_buf(),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.metadata.dir {
            require_non_empty(dir, "metadata.dir")?;
        }
        if let Some(dir) = &self.output.dir {
            require_non_empty(dir, "output.dir")?;
        }
        require_non_empty(&self.links.repository_url, "links.repository_url")?;
        require_http_url(&self.links.repository_url, "links.repository_url")?;
        require_non_empty(&self.links.config_filename, "links.config_filename")?;
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.links.root_path = expand::expand_env(&self.links.root_path, "links.root_path")?;
        self.links.repository_url =
            expand::expand_env(&self.links.repository_url, "links.repository_url")?;
        self.links.config_filename =
            expand::expand_env(&self.links.config_filename, "links.config_filename")?;
        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.paths = PathsConfig {
            metadata_dir: resolve(self.metadata.dir.as_deref(), DEFAULT_METADATA_DIR),
            output_dir: resolve(self.output.dir.as_deref(), DEFAULT_OUTPUT_DIR),
            project_dir: config_dir.to_path_buf(),
        };
    }
}

/// Search for the config file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/repo"));
        assert_eq!(config.paths.metadata_dir, PathBuf::from("/repo/.meta"));
        assert_eq!(
            config.paths.output_dir,
            PathBuf::from("/repo/docs/usage/configuration/transforms")
        );
        assert_eq!(config.paths.project_dir, PathBuf::from("/repo"));
        assert_eq!(config.links, LinksConfig::default());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.links.root_path, "../../../");
        assert_eq!(config.links.config_filename, "vector.toml");
    }

    #[test]
    fn test_load_resolves_paths_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[metadata]
dir = "meta"

[output]
dir = "site/transforms"

[links]
root_path = "../../"
repository_url = "https://github.com/acme/pipes"
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.paths.metadata_dir, dir.path().join("meta"));
        assert_eq!(config.paths.output_dir, dir.path().join("site/transforms"));
        assert_eq!(config.paths.project_dir, dir.path());
        assert_eq!(config.links.root_path, "../../");
        assert_eq!(config.links.repository_url, "https://github.com/acme/pipes");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_cli_settings_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[metadata]\ndir = \"meta\"\n");
        let settings = CliSettings {
            meta_dir: Some(PathBuf::from("/elsewhere/meta")),
            output_dir: Some(PathBuf::from("/elsewhere/out")),
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert_eq!(config.paths.metadata_dir, PathBuf::from("/elsewhere/meta"));
        assert_eq!(config.paths.output_dir, PathBuf::from("/elsewhere/out"));
    }

    #[test]
    fn test_missing_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load(Some(&missing), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[links\n");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_repository_url_must_be_http() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[links]\nrepository_url = \"git@github.com:a/b\"\n");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: links.repository_url must start with http:// or https://"
        );
    }

    #[test]
    fn test_empty_output_dir_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[output]\ndir = \"\"\n");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("output.dir cannot be empty"));
    }

    #[test]
    fn test_links_env_expansion() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("PIPEDOC_TEST_REPO", "https://github.com/acme/pipes");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[links]\nrepository_url = \"${PIPEDOC_TEST_REPO}\"\n",
        );
        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.links.repository_url, "https://github.com/acme/pipes");
        unsafe {
            std::env::remove_var("PIPEDOC_TEST_REPO");
        }
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(discover_config(&nested), Some(path));
    }

    #[test]
    fn test_discover_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "");
        let nested = dir.path().join("sub");
        std::fs::create_dir_all(&nested).unwrap();
        let inner = write_config(&nested, "");

        assert_eq!(discover_config(&nested), Some(inner));
    }
}
