//! CLI error types.

use pipedoc_config::ConfigError;
use pipedoc_meta::MetadataError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Metadata(#[from] MetadataError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),

    #[error("{failed} of {total} pages failed to generate")]
    Failed { failed: usize, total: usize },
}
