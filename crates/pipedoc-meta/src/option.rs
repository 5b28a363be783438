//! Configurable options of a transform.
//!
//! Options are declared in metadata as `[transforms.<name>.options.<option>]`
//! tables. The option name is usually implied by the table key; the loader
//! copies the key into [`ConfigOption::name`] when it is not set explicitly.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// Declared data type of an option.
///
/// Parsed from the metadata type tag (`"string"`, `"int"`, `"[string]"`, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum OptionType {
    Bool,
    Int,
    Float,
    #[default]
    String,
    Table,
    /// Homogeneous array, written as `[<inner>]` in metadata.
    Array(Box<OptionType>),
}

/// Error for a type tag that names no known [`OptionType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown option type `{0}`")]
pub struct UnknownOptionType(pub String);

impl OptionType {
    /// Parse a metadata type tag.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownOptionType`] if the tag is not recognized.
    pub fn parse(tag: &str) -> Result<Self, UnknownOptionType> {
        let tag = tag.trim();
        if let Some(inner) = tag.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            let inner = Self::parse(inner).map_err(|_| UnknownOptionType(tag.to_owned()))?;
            return Ok(Self::Array(Box::new(inner)));
        }
        match tag {
            "bool" => Ok(Self::Bool),
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "string" => Ok(Self::String),
            "table" => Ok(Self::Table),
            _ => Err(UnknownOptionType(tag.to_owned())),
        }
    }
}

impl TryFrom<String> for OptionType {
    type Error = UnknownOptionType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::String => f.write_str("string"),
            Self::Table => f.write_str("table"),
            Self::Array(inner) => write!(f, "[{inner}]"),
        }
    }
}

/// A single configurable parameter of a transform.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ConfigOption {
    /// Option key as it appears in the pipeline config file.
    #[serde(default)]
    pub name: String,

    /// Declared data type.
    #[serde(rename = "type")]
    pub option_type: OptionType,

    #[serde(default)]
    pub description: String,

    /// Value used when the option is omitted.
    #[serde(default)]
    pub default: Option<toml::Value>,

    /// Representative values, first one wins in example output.
    #[serde(default)]
    pub examples: Vec<toml::Value>,

    #[serde(default)]
    pub required: bool,

    /// Category label, matched against section titles when grouping tables.
    #[serde(default)]
    pub category: Option<String>,

    /// Allowed values for enumerated string options.
    #[serde(default, rename = "enum")]
    pub enum_values: Option<Vec<String>>,

    /// Unit of measure (e.g. `"seconds"`).
    #[serde(default)]
    pub unit: Option<String>,

    /// Nested options of a `table` option.
    #[serde(default)]
    pub options: BTreeMap<String, ConfigOption>,
}

impl ConfigOption {
    /// Create an optional option with no description, default, or examples.
    #[must_use]
    pub fn new(name: impl Into<String>, option_type: OptionType) -> Self {
        Self {
            name: name.into(),
            option_type,
            ..Self::default()
        }
    }

    /// Mark the option as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<toml::Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn with_example(mut self, example: impl Into<toml::Value>) -> Self {
        self.examples.push(example.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_enum(mut self, values: &[&str]) -> Self {
        self.enum_values = Some(values.iter().map(|v| (*v).to_owned()).collect());
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Add a nested option (for `table` options).
    #[must_use]
    pub fn with_option(mut self, option: ConfigOption) -> Self {
        self.options.insert(option.name.clone(), option);
        self
    }

    /// Whether the option renders as its own TOML table.
    #[must_use]
    pub fn is_nested_table(&self) -> bool {
        self.option_type == OptionType::Table && !self.options.is_empty()
    }

    /// Nested options in name order.
    #[must_use]
    pub fn sorted_options(&self) -> Vec<&ConfigOption> {
        let mut options: Vec<&ConfigOption> = self.options.values().collect();
        options.sort_by(|a, b| a.name.cmp(&b.name));
        options
    }

    /// Copy map keys into empty `name` fields, recursively.
    pub(crate) fn fill_names(options: &mut BTreeMap<String, ConfigOption>) {
        for (key, option) in options.iter_mut() {
            if option.name.is_empty() {
                option.name.clone_from(key);
            }
            Self::fill_names(&mut option.options);
        }
    }
}
