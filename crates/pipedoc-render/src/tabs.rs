//! Tabbed code blocks in the GitBook Markdown dialect.
//!
//! ```markdown
//! {% code-tabs %}
//! {% code-tabs-item title="vector.toml (examples)" %}
//! ```toml
//! ...
//! ```
//! {% endcode-tabs-item %}
//! {% endcode-tabs %}
//! ```

use std::fmt::Write;

use crate::util::longest_backtick_run;

/// One tab of a [`code_tabs`] block.
#[derive(Debug, Clone, Copy)]
pub struct CodeTab<'a> {
    pub title: &'a str,
    /// Fence info string (highlighting language).
    pub language: &'a str,
    pub code: &'a str,
}

/// Render tabs as a `code-tabs` block.
///
/// Each tab body is fenced with enough backticks to contain any backtick run
/// in the code itself.
#[must_use]
pub fn code_tabs(tabs: &[CodeTab<'_>]) -> String {
    let mut out = String::from("{% code-tabs %}\n");
    for tab in tabs {
        let fence = "`".repeat((longest_backtick_run(tab.code) + 1).max(3));
        let _ = writeln!(
            out,
            "{{% code-tabs-item title=\"{}\" %}}",
            tab.title.replace('"', "'")
        );
        let _ = writeln!(out, "{fence}{}", tab.language);
        out.push_str(tab.code.trim_end_matches('\n'));
        out.push('\n');
        let _ = writeln!(out, "{fence}");
        out.push_str("{% endcode-tabs-item %}\n");
    }
    out.push_str("{% endcode-tabs %}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_code_tabs_two_tabs() {
        let out = code_tabs(&[
            CodeTab {
                title: "a.toml (examples)",
                language: "toml",
                code: "a = 1\n",
            },
            CodeTab {
                title: "a.toml (schema)",
                language: "toml",
                code: "a = <int>",
            },
        ]);
        assert_eq!(
            out,
            "{% code-tabs %}\n\
             {% code-tabs-item title=\"a.toml (examples)\" %}\n\
             ```toml\n\
             a = 1\n\
             ```\n\
             {% endcode-tabs-item %}\n\
             {% code-tabs-item title=\"a.toml (schema)\" %}\n\
             ```toml\n\
             a = <int>\n\
             ```\n\
             {% endcode-tabs-item %}\n\
             {% endcode-tabs %}"
        );
    }

    #[test]
    fn test_code_tabs_lengthens_fence() {
        let out = code_tabs(&[CodeTab {
            title: "md",
            language: "markdown",
            code: "```\nnested\n```",
        }]);
        assert!(out.contains("````markdown\n```\nnested\n```\n````\n"));
    }

    #[test]
    fn test_code_tabs_empty() {
        assert_eq!(code_tabs(&[]), "{% code-tabs %}\n{% endcode-tabs %}");
    }
}
