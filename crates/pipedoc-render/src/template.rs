//! Transform page template.
//!
//! The page layout is fixed; generators only fill the named slots of
//! [`PageSlots`]. Empty slots leave blank lines that are collapsed when the
//! page is assembled.

use std::fmt::Write;

use crate::util::collapse_blank_lines;

/// Pre-rendered content for every slot of a transform page.
#[derive(Debug, Clone, Default)]
pub struct PageSlots {
    /// YAML front matter body, without the `---` delimiters.
    pub front_matter: String,
    pub warning: String,
    pub name: String,
    pub diagram: String,
    /// Beta notice, empty for stable transforms.
    pub beta: String,
    /// Input event type links as an English list.
    pub input_types: String,
    pub output_types: String,
    /// Description phrased to follow "allows you to".
    pub summary: String,
    pub example_tabs: String,
    pub options_table: String,
    pub guides: String,
    pub sections: String,
    pub troubleshooting: String,
    pub resources: String,
}

/// Render a complete transform page.
#[must_use]
pub fn render_page(slots: &PageSlots) -> String {
    let mut md = String::with_capacity(4096);

    md.push_str("---\n");
    md.push_str(slots.front_matter.trim_end());
    md.push_str("\n---\n\n");

    let _ = write!(md, "{}\n\n", slots.warning);
    let _ = write!(md, "# {} transform\n\n", slots.name);
    let _ = write!(md, "![]({})\n\n", slots.diagram);
    let _ = write!(md, "{}\n\n", slots.beta);
    let _ = write!(
        md,
        "The `{}` transform accepts {} events and allows you to {}.\n\n",
        slots.name, slots.input_types, slots.summary
    );

    md.push_str("## Example\n\n");
    let _ = write!(md, "{}\n\n", slots.example_tabs);

    md.push_str("## Options\n\n");
    let _ = write!(md, "{}\n\n", slots.options_table);

    md.push_str("## Input\n\n");
    let _ = write!(
        md,
        "The `{}` transform accepts {} events.\n\n",
        slots.name, slots.input_types
    );

    md.push_str("## Output\n\n");
    let _ = write!(
        md,
        "The `{}` transform outputs {} events.\n\n",
        slots.name, slots.output_types
    );

    let _ = write!(md, "{}\n\n", slots.guides);

    md.push_str("## How It Works\n\n");
    let _ = write!(md, "{}\n\n", slots.sections);

    let _ = write!(md, "{}\n\n", slots.troubleshooting);
    let _ = write!(md, "{}\n", slots.resources);

    collapse_blank_lines(&md)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots() -> PageSlots {
        PageSlots {
            front_matter: "description: sample events\n".to_owned(),
            warning: "<!-- generated -->".to_owned(),
            name: "sampler".to_owned(),
            diagram: "sampler.svg".to_owned(),
            input_types: "`log`".to_owned(),
            output_types: "`log`".to_owned(),
            summary: "sample events".to_owned(),
            example_tabs: "TABS".to_owned(),
            options_table: "TABLE".to_owned(),
            sections: "### Rate\n\nOne in N.".to_owned(),
            ..PageSlots::default()
        }
    }

    #[test]
    fn test_render_page_layout() {
        let page = render_page(&slots());
        assert!(page.starts_with("---\ndescription: sample events\n---\n\n<!-- generated -->\n\n# sampler transform\n\n![](sampler.svg)\n\n"));
        assert!(page.contains("The `sampler` transform accepts `log` events and allows you to sample events.\n"));
        assert!(page.contains("## Example\n\nTABS\n\n## Options\n\nTABLE\n\n## Input\n\n"));
        assert!(page.ends_with("## How It Works\n\n### Rate\n\nOne in N.\n"));
    }

    #[test]
    fn test_empty_optional_slots_leave_no_gaps() {
        let page = render_page(&slots());
        assert!(!page.contains("\n\n\n"));
        assert!(!page.contains("## Guides"));
        assert!(!page.contains("## Troubleshooting"));
        assert!(!page.contains("## Resources"));
    }

    #[test]
    fn test_optional_slots_in_order() {
        let page = render_page(&PageSlots {
            beta: "BETA".to_owned(),
            guides: "## Guides\n\n* g".to_owned(),
            troubleshooting: "## Troubleshooting\n\nt".to_owned(),
            resources: "## Resources\n\n* r".to_owned(),
            ..slots()
        });
        let pos = |needle: &str| page.find(needle).unwrap();
        assert!(pos("![](sampler.svg)") < pos("BETA"));
        assert!(pos("BETA") < pos("The `sampler` transform accepts"));
        assert!(pos("## Output") < pos("## Guides"));
        assert!(pos("## Guides") < pos("## How It Works"));
        assert!(pos("## How It Works") < pos("## Troubleshooting"));
        assert!(pos("## Troubleshooting") < pos("## Resources"));
    }
}
