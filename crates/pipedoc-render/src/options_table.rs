//! Options reference table.
//!
//! Options are grouped by category. Groups follow the order of the declared
//! sections whose titles they match; anything left over lands in a trailing
//! catch-all group so no option is ever dropped.

use std::fmt::Write;

use pipedoc_meta::{ConfigOption, Section};

use crate::util::{escape_cell, toml_literal};

const HEADER: &str = "| Key | Required | Type | Description | Default |\n\
                      |:----|:--------:|:-----|:------------|:--------|\n";

const NO_OPTIONS: &str = "This transform has no configurable options.";

/// Title of the catch-all group when other groups are present.
const OTHER_GROUP: &str = "Other";

/// Renders a Markdown table of options grouped by section.
#[derive(Debug, Clone)]
pub struct OptionsTableGenerator<'a> {
    options: Vec<&'a ConfigOption>,
    sections: &'a [Section],
}

struct Group<'a> {
    title: &'a str,
    options: Vec<&'a ConfigOption>,
}

impl<'a> OptionsTableGenerator<'a> {
    /// Create a generator. Options are sorted by name here, so the table
    /// does not depend on input order.
    #[must_use]
    pub fn new(mut options: Vec<&'a ConfigOption>, sections: &'a [Section]) -> Self {
        options.sort_by(|a, b| a.name.cmp(&b.name));
        Self { options, sections }
    }

    #[must_use]
    pub fn generate(&self) -> String {
        if self.options.is_empty() {
            return NO_OPTIONS.to_owned();
        }

        let (groups, other) = self.partition();
        let mut out = String::from(HEADER);
        for group in &groups {
            write_group_title(&mut out, group.title);
            for option in &group.options {
                write_rows(&mut out, "", option);
            }
        }
        if !other.is_empty() {
            if !groups.is_empty() {
                write_group_title(&mut out, OTHER_GROUP);
            }
            for option in &other {
                write_rows(&mut out, "", option);
            }
        }
        out.truncate(out.trim_end().len());
        out
    }

    /// Split options into non-empty section groups and the catch-all rest.
    fn partition(&self) -> (Vec<Group<'a>>, Vec<&'a ConfigOption>) {
        let mut groups: Vec<Group<'a>> = Vec::new();
        for section in self.sections {
            let title = section.title.trim();
            if !groups.iter().any(|g| same_category(g.title, title)) {
                groups.push(Group {
                    title,
                    options: Vec::new(),
                });
            }
        }

        let mut other = Vec::new();
        for &option in &self.options {
            let group = option
                .category
                .as_deref()
                .and_then(|c| groups.iter_mut().find(|g| same_category(g.title, c)));
            if let Some(group) = group {
                group.options.push(option);
            } else {
                if let Some(category) = &option.category {
                    tracing::debug!(
                        option = %option.name,
                        category = %category,
                        "Option category matches no section"
                    );
                }
                other.push(option);
            }
        }

        groups.retain(|g| !g.options.is_empty());
        (groups, other)
    }
}

fn same_category(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn write_group_title(out: &mut String, title: &str) {
    let _ = writeln!(out, "| **{}** | | | | |", escape_cell(title));
}

/// Write the option's row, then rows for its nested options as `parent.child`.
fn write_rows(out: &mut String, parent: &str, option: &ConfigOption) {
    let key = if parent.is_empty() {
        option.name.clone()
    } else {
        format!("{parent}.{}", option.name)
    };

    let required = if option.required { "required" } else { "optional" };

    let mut type_cell = format!("`{}`", option.option_type);
    if let Some(unit) = &option.unit {
        let _ = write!(type_cell, " ({})", escape_cell(unit));
    }

    let mut description = escape_cell(&option.description);
    if let Some(values) = option.enum_values.as_deref().filter(|v| !v.is_empty()) {
        let values: Vec<String> = values
            .iter()
            .map(|v| format!("`{}`", escape_cell(v)))
            .collect();
        if !description.is_empty() {
            description.push(' ');
        }
        let _ = write!(description, "One of: {}.", values.join(", "));
    }

    let default = option
        .default
        .as_ref()
        .map(|d| format!("`{}`", escape_cell(&toml_literal(d))))
        .unwrap_or_default();

    let _ = writeln!(
        out,
        "| `{}` | {required} | {type_cell} | {description} | {default} |",
        escape_cell(&key)
    );

    for nested in option.sorted_options() {
        write_rows(out, &key, nested);
    }
}
