//! Render error types.

/// Error raised while preparing a page.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The options map cannot be normalized into a list of options.
    #[error("Malformed options for transform `{transform}`: {reason}")]
    MalformedOptions { transform: String, reason: String },

    #[error("Failed to build front matter for transform `{transform}`: {message}")]
    FrontMatter { transform: String, message: String },
}
