//! Markdown page generators for pipeline transforms.
//!
//! [`TransformGenerator`] assembles a complete page from three independent
//! generators:
//!
//! - [`OptionsExampleGenerator`]: example and schema configuration snippets
//! - [`OptionsTableGenerator`]: the options reference table
//! - [`SectionsGenerator`]: "How It Works" prose
//!
//! Shared fragments (warning banner, beta notice, link lists) live in
//! [`partials`].

mod error;
mod options_example;
mod options_table;
pub mod partials;
mod sections;
mod settings;
mod tabs;
mod template;
mod transform;
mod util;

pub use error::RenderError;
pub use options_example::{ExampleMode, OptionsExampleGenerator};
pub use options_table::OptionsTableGenerator;
pub use sections::SectionsGenerator;
pub use settings::PageSettings;
pub use tabs::{CodeTab, code_tabs};
pub use template::{PageSlots, render_page};
pub use transform::TransformGenerator;
