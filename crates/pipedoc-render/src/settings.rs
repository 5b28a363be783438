//! Site-wide values shared by every generated page.

/// Link and naming settings for generated pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSettings {
    /// Relative path from a transform page to the documentation root.
    pub root_path: String,
    /// Repository URL used for issue and source links.
    pub repository_url: String,
    /// Metadata file named in the auto-generated warning.
    pub metadata_path: String,
    /// File name shown on the example tabs.
    pub config_filename: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            root_path: "../../../".to_owned(),
            repository_url: "https://github.com/timberio/vector".to_owned(),
            metadata_path: ".meta/transforms.toml".to_owned(),
            config_filename: "vector.toml".to_owned(),
        }
    }
}

impl PageSettings {
    /// Resolve a documentation path against [`root_path`](Self::root_path).
    #[must_use]
    pub fn doc_link(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if self.root_path.is_empty() || self.root_path.ends_with('/') {
            format!("{}{path}", self.root_path)
        } else {
            format!("{}/{path}", self.root_path)
        }
    }

    /// Repository URL without a trailing slash.
    #[must_use]
    pub fn repository(&self) -> &str {
        self.repository_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_link_with_trailing_slash_root() {
        let settings = PageSettings::default();
        assert_eq!(
            settings.doc_link("/about/data-model/log.md"),
            "../../../about/data-model/log.md"
        );
    }

    #[test]
    fn test_doc_link_without_trailing_slash_root() {
        let settings = PageSettings {
            root_path: "/docs".to_owned(),
            ..PageSettings::default()
        };
        assert_eq!(settings.doc_link("guides/a.md"), "/docs/guides/a.md");
    }

    #[test]
    fn test_doc_link_empty_root() {
        let settings = PageSettings {
            root_path: String::new(),
            ..PageSettings::default()
        };
        assert_eq!(settings.doc_link("guides/a.md"), "guides/a.md");
    }

    #[test]
    fn test_repository_trims_slash() {
        let settings = PageSettings {
            repository_url: "https://github.com/org/repo/".to_owned(),
            ..PageSettings::default()
        };
        assert_eq!(settings.repository(), "https://github.com/org/repo");
    }
}
