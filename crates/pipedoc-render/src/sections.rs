//! "How It Works" prose.

use pipedoc_meta::Section;

/// Renders sections as `###` headings followed by their bodies, in order.
#[derive(Debug, Clone)]
pub struct SectionsGenerator<'a> {
    sections: &'a [Section],
}

impl<'a> SectionsGenerator<'a> {
    #[must_use]
    pub fn new(sections: &'a [Section]) -> Self {
        Self { sections }
    }

    #[must_use]
    pub fn generate(&self) -> String {
        self.sections
            .iter()
            .map(|section| {
                let title = section.title.trim();
                let body = section.body.trim();
                if body.is_empty() {
                    format!("### {title}")
                } else {
                    format!("### {title}\n\n{body}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
