//! Transform metadata.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::option::ConfigOption;

/// A titled prose block rendered under "How It Works".
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Section {
    pub title: String,
    /// Markdown body, rendered as-is.
    #[serde(default)]
    pub body: String,
}

impl Section {
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// An external link listed under "Resources".
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Resource {
    pub name: String,
    pub url: String,
}

/// A named pipeline processing stage.
///
/// Immutable once loaded; generators only borrow it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// Component identifier (e.g. `add_fields`).
    pub name: String,
    /// One-line description, usually a sentence ending with a period.
    pub description: String,
    /// Accepted event types (e.g. `log`, `metric`).
    pub input_types: Vec<String>,
    /// Produced event types.
    pub output_types: Vec<String>,
    /// Diagram path or URL. Derived from the name when absent.
    pub diagram: Option<String>,
    /// Options keyed by option name.
    pub options: BTreeMap<String, ConfigOption>,
    /// Narrative sections in display order.
    pub sections: Vec<Section>,
    /// Experimental component flag.
    pub beta: bool,
    /// Troubleshooting prose.
    pub troubleshooting: Option<String>,
    pub resources: Vec<Resource>,
}

impl Transform {
    /// Create an empty transform with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse a single transform from a TOML table body.
    ///
    /// The `name` is taken from the argument unless the table sets it, and
    /// option names are filled from their keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or an option type is unknown.
    pub fn from_toml_str(name: &str, content: &str) -> Result<Self, toml::de::Error> {
        let mut transform: Self = toml::from_str(content)?;
        transform.fill_names(name);
        Ok(transform)
    }

    /// Description phrased to follow "allows you to".
    ///
    /// Lower-cases the first letter and drops a trailing period, so
    /// `"Add fields to log events."` becomes `"add fields to log events"`.
    #[must_use]
    pub fn allow_you_to_description(&self) -> String {
        let trimmed = self.description.trim().trim_end_matches('.');
        let mut chars = trimmed.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub(crate) fn fill_names(&mut self, key: &str) {
        if self.name.is_empty() {
            key.clone_into(&mut self.name);
        }
        ConfigOption::fill_names(&mut self.options);
    }
}
