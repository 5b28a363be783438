//! Transform page generator.

use std::collections::BTreeMap;

use pipedoc_meta::{ConfigOption, Guide, GuideIndex, Transform};
use serde::Serialize;

use crate::error::RenderError;
use crate::options_example::{ExampleMode, OptionsExampleGenerator};
use crate::options_table::OptionsTableGenerator;
use crate::partials;
use crate::sections::SectionsGenerator;
use crate::settings::PageSettings;
use crate::tabs::{CodeTab, code_tabs};
use crate::template::{PageSlots, render_page};

/// Fence language for config snippets. GitBook has no TOML highlighter.
const CONFIG_LANGUAGE: &str = "coffeescript";

#[derive(Serialize)]
struct FrontMatter<'a> {
    description: &'a str,
}

/// Renders the documentation page of one transform.
///
/// All validation happens in [`TransformGenerator::new`]; once constructed,
/// [`generate`](TransformGenerator::generate) cannot fail.
///
/// # Example
///
/// ```
/// use pipedoc_meta::{ConfigOption, GuideIndex, OptionType, Transform};
/// use pipedoc_render::TransformGenerator;
///
/// let mut transform = Transform::new("sample");
/// transform.description = "Sample events.".to_owned();
/// transform.input_types = vec!["log".to_owned()];
/// transform.output_types = vec!["log".to_owned()];
/// transform.options.insert(
///     "field".to_owned(),
///     ConfigOption::new("field", OptionType::String).required(),
/// );
///
/// let guides = GuideIndex::new();
/// let page = TransformGenerator::new(&transform, &guides)
///     .unwrap()
///     .generate();
/// assert!(page.contains("# sample transform"));
/// ```
#[derive(Debug, Clone)]
pub struct TransformGenerator<'a> {
    transform: &'a Transform,
    guides: &'a [Guide],
    settings: PageSettings,
    front_matter: String,
    options_example_generator: OptionsExampleGenerator<'a>,
    options_table_generator: OptionsTableGenerator<'a>,
    sections_generator: SectionsGenerator<'a>,
}

impl<'a> TransformGenerator<'a> {
    /// Prepare a generator for `transform`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MalformedOptions`] if an option name is empty
    /// or differs from its map key.
    pub fn new(transform: &'a Transform, guides: &'a GuideIndex) -> Result<Self, RenderError> {
        let options = sorted_options(transform)?;

        let description = transform.allow_you_to_description();
        let front_matter = serde_yaml::to_string(&FrontMatter {
            description: &description,
        })
        .map_err(|e| RenderError::FrontMatter {
            transform: transform.name.clone(),
            message: e.to_string(),
        })?;

        Ok(Self {
            transform,
            guides: guides.get(&transform.name),
            settings: PageSettings::default(),
            front_matter,
            options_example_generator: OptionsExampleGenerator::new(options.clone()),
            options_table_generator: OptionsTableGenerator::new(options, &transform.sections),
            sections_generator: SectionsGenerator::new(&transform.sections),
        })
    }

    /// Use custom link settings.
    #[must_use]
    pub fn with_settings(mut self, settings: PageSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Render the complete Markdown page.
    #[must_use]
    pub fn generate(&self) -> String {
        let transform = self.transform;
        let settings = &self.settings;
        let name = &transform.name;

        let examples = self
            .options_example_generator
            .generate(&format!("transforms.my_{name}_transform"), ExampleMode::Examples);
        let schema = self
            .options_example_generator
            .generate("transforms.<transform-id>", ExampleMode::Schema);
        let examples_title = format!("{} (examples)", settings.config_filename);
        let schema_title = format!("{} (schema)", settings.config_filename);

        let slots = PageSlots {
            front_matter: self.front_matter.clone(),
            warning: partials::warning(settings),
            name: name.clone(),
            diagram: self.diagram(),
            beta: partials::beta(transform, settings),
            input_types: partials::event_type_links(&transform.input_types, settings),
            output_types: partials::event_type_links(&transform.output_types, settings),
            summary: transform.allow_you_to_description(),
            example_tabs: code_tabs(&[
                CodeTab {
                    title: &examples_title,
                    language: CONFIG_LANGUAGE,
                    code: &examples,
                },
                CodeTab {
                    title: &schema_title,
                    language: CONFIG_LANGUAGE,
                    code: &schema,
                },
            ]),
            options_table: self.options_table_generator.generate(),
            guides: partials::guides_section(self.guides, settings),
            sections: self.sections_generator.generate(),
            troubleshooting: partials::troubleshooting(transform, settings),
            resources: partials::resources(transform, settings),
        };

        let page = render_page(&slots);
        tracing::debug!(transform = %name, bytes = page.len(), "Rendered transform page");
        page
    }

    fn diagram(&self) -> String {
        self.transform.diagram.clone().unwrap_or_else(|| {
            self.settings
                .doc_link(&format!("assets/{}-transform.svg", self.transform.name))
        })
    }
}

/// Options as a name-sorted list, checking that names match their keys.
fn sorted_options(transform: &Transform) -> Result<Vec<&ConfigOption>, RenderError> {
    check_names(transform, "", &transform.options)?;
    let mut options: Vec<&ConfigOption> = transform.options.values().collect();
    options.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(options)
}

fn check_names(
    transform: &Transform,
    parent: &str,
    options: &BTreeMap<String, ConfigOption>,
) -> Result<(), RenderError> {
    for (key, option) in options {
        let path = if parent.is_empty() {
            key.clone()
        } else {
            format!("{parent}.{key}")
        };
        let reason = if option.name.trim().is_empty() {
            Some(format!("option `{path}` has an empty name"))
        } else if option.name != *key {
            Some(format!(
                "option `{path}` is declared with name `{}`",
                option.name
            ))
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(RenderError::MalformedOptions {
                transform: transform.name.clone(),
                reason,
            });
        }
        check_names(transform, &path, &option.options)?;
    }
    Ok(())
}
