//! Example and schema configuration snippets.

use std::fmt::Write;

use pipedoc_meta::{ConfigOption, OptionType};

use crate::util::{quote, toml_key, toml_literal};

/// What an [`OptionsExampleGenerator`] puts on the right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleMode {
    /// Concrete values: first example, else default, else a type placeholder.
    Examples,
    /// Type annotations with a trailing comment describing the option.
    Schema,
}

/// Renders options as a TOML block nested under a path prefix.
///
/// Scalar options become `key = value` lines under `[prefix]`; table options
/// with nested options become `[prefix.key]` blocks after them. Options keep
/// the order they were given in.
#[derive(Debug, Clone)]
pub struct OptionsExampleGenerator<'a> {
    options: Vec<&'a ConfigOption>,
}

impl<'a> OptionsExampleGenerator<'a> {
    #[must_use]
    pub fn new(options: Vec<&'a ConfigOption>) -> Self {
        Self { options }
    }

    /// Render the block under `path_prefix` (e.g. `transforms.my_id`).
    #[must_use]
    pub fn generate(&self, path_prefix: &str, mode: ExampleMode) -> String {
        let mut out = String::new();
        write_block(&mut out, path_prefix, &self.options, mode);
        out.truncate(out.trim_end().len());
        out
    }
}

fn write_block(out: &mut String, prefix: &str, options: &[&ConfigOption], mode: ExampleMode) {
    let _ = writeln!(out, "[{prefix}]");
    for option in options.iter().filter(|o| !o.is_nested_table()) {
        let value = match mode {
            ExampleMode::Examples => example_value(option),
            ExampleMode::Schema => schema_value(option),
        };
        let _ = writeln!(out, "  {} = {value}", toml_key(&option.name));
    }
    for option in options.iter().filter(|o| o.is_nested_table()) {
        out.push('\n');
        let nested = format!("{prefix}.{}", toml_key(&option.name));
        write_block(out, &nested, &option.sorted_options(), mode);
    }
}

fn example_value(option: &ConfigOption) -> String {
    option
        .examples
        .first()
        .or(option.default.as_ref())
        .map_or_else(|| placeholder(option, &option.option_type), toml_literal)
}

/// Type-derived stand-in when neither an example nor a default exists.
fn placeholder(option: &ConfigOption, option_type: &OptionType) -> String {
    match option_type {
        OptionType::Bool => "true".to_owned(),
        OptionType::Int => "1".to_owned(),
        OptionType::Float => "1.0".to_owned(),
        OptionType::String => match option.enum_values.as_deref() {
            Some([first, ..]) => quote(first),
            _ => quote("value"),
        },
        OptionType::Table => "{}".to_owned(),
        OptionType::Array(inner) => format!("[{}]", placeholder(option, inner)),
    }
}

fn schema_value(option: &ConfigOption) -> String {
    let status = if option.required { "required" } else { "optional" };
    let mut notes = vec![status.to_owned()];
    if let Some(default) = &option.default {
        notes.push(format!("default: {}", toml_literal(default)));
    }
    if let Some(unit) = &option.unit {
        notes.push(format!("unit: {unit}"));
    }
    format!(
        "{} # {}",
        annotation(option, &option.option_type),
        notes.join(", ")
    )
}

fn annotation(option: &ConfigOption, option_type: &OptionType) -> String {
    match option_type {
        OptionType::String => match option.enum_values.as_deref() {
            Some(values) if !values.is_empty() => quote(&format!("<{}>", values.join("|"))),
            _ => "\"<string>\"".to_owned(),
        },
        OptionType::Array(inner) => format!("[{}, ...]", annotation(option, inner)),
        other => format!("<{other}>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn keys(block: &str) -> BTreeSet<String> {
        let mut prefix = String::new();
        let mut keys = BTreeSet::new();
        for line in block.lines() {
            let line = line.trim();
            if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                prefix = header.to_owned();
            } else if let Some((key, _)) = line.split_once(" = ") {
                keys.insert(format!("{prefix}.{key}"));
            }
        }
        keys
    }

    fn options() -> Vec<ConfigOption> {
        vec![
            ConfigOption::new("drop_field", OptionType::Bool).with_default(true),
            ConfigOption::new("field", OptionType::String).required(),
            ConfigOption::new("fields", OptionType::Table)
                .required()
                .with_option(
                    ConfigOption::new("name", OptionType::String).with_example("my_value"),
                ),
            ConfigOption::new("mode", OptionType::String).with_enum(&["fast", "slow"]),
            ConfigOption::new("rate", OptionType::Int)
                .with_default(10_i64)
                .with_unit("seconds"),
            ConfigOption::new("tags", OptionType::Array(Box::new(OptionType::String)))
                .with_example(vec!["a", "b"]),
        ]
    }

    #[test]
    fn test_examples_mode() {
        let options = options();
        let generator = OptionsExampleGenerator::new(options.iter().collect());
        assert_eq!(
            generator.generate("transforms.my_id", ExampleMode::Examples),
            "[transforms.my_id]\n\
             \x20 drop_field = true\n\
             \x20 field = \"value\"\n\
             \x20 mode = \"fast\"\n\
             \x20 rate = 10\n\
             \x20 tags = [\"a\", \"b\"]\n\
             \n\
             [transforms.my_id.fields]\n\
             \x20 name = \"my_value\""
        );
    }

    #[test]
    fn test_schema_mode() {
        let options = options();
        let generator = OptionsExampleGenerator::new(options.iter().collect());
        assert_eq!(
            generator.generate("transforms.<transform-id>", ExampleMode::Schema),
            "[transforms.<transform-id>]\n\
             \x20 drop_field = <bool> # optional, default: true\n\
             \x20 field = \"<string>\" # required\n\
             \x20 mode = \"<fast|slow>\" # optional\n\
             \x20 rate = <int> # optional, default: 10, unit: seconds\n\
             \x20 tags = [\"<string>\", ...] # optional\n\
             \n\
             [transforms.<transform-id>.fields]\n\
             \x20 name = \"<string>\" # optional"
        );
    }

    #[test]
    fn test_modes_share_keys() {
        let options = options();
        let generator = OptionsExampleGenerator::new(options.iter().collect());
        let examples = generator.generate("t.x", ExampleMode::Examples);
        let schema = generator.generate("t.x", ExampleMode::Schema);
        assert_eq!(keys(&examples), keys(&schema));
        assert_eq!(keys(&examples).len(), 6);
    }

    #[test]
    fn test_placeholders_by_type() {
        let options = vec![
            ConfigOption::new("a", OptionType::Int),
            ConfigOption::new("b", OptionType::Float),
            ConfigOption::new("c", OptionType::Table),
            ConfigOption::new("d", OptionType::Array(Box::new(OptionType::Int))),
        ];
        let generator = OptionsExampleGenerator::new(options.iter().collect());
        assert_eq!(
            generator.generate("p", ExampleMode::Examples),
            "[p]\n  a = 1\n  b = 1.0\n  c = {}\n  d = [1]"
        );
    }

    #[test]
    fn test_example_preferred_over_default() {
        let option = ConfigOption::new("rate", OptionType::Int)
            .with_default(10_i64)
            .with_example(25_i64);
        let generator = OptionsExampleGenerator::new(vec![&option]);
        assert_eq!(
            generator.generate("p", ExampleMode::Examples),
            "[p]\n  rate = 25"
        );
    }

    #[test]
    fn test_caller_order_is_kept() {
        let b = ConfigOption::new("b", OptionType::Bool);
        let a = ConfigOption::new("a", OptionType::Bool);
        let generator = OptionsExampleGenerator::new(vec![&b, &a]);
        assert_eq!(
            generator.generate("p", ExampleMode::Examples),
            "[p]\n  b = true\n  a = true"
        );
    }

    #[test]
    fn test_no_options() {
        let generator = OptionsExampleGenerator::new(Vec::new());
        assert_eq!(generator.generate("p", ExampleMode::Schema), "[p]");
    }

    #[test]
    fn test_quoted_option_key() {
        let option = ConfigOption::new("a.b", OptionType::String);
        let generator = OptionsExampleGenerator::new(vec![&option]);
        assert_eq!(
            generator.generate("p", ExampleMode::Examples),
            "[p]\n  \"a.b\" = \"value\""
        );
    }

    #[test]
    fn test_enum_annotation_is_valid_toml_string() {
        let option = ConfigOption::new("quote", OptionType::String).with_enum(&["\"", "\\"]);
        let generator = OptionsExampleGenerator::new(vec![&option]);
        assert_eq!(
            generator.generate("p", ExampleMode::Schema),
            "[p]\n  quote = \"<\\\"|\\\\>\" # optional"
        );
    }
}
