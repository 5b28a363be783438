//! Transform metadata for pipedoc.
//!
//! Provides the immutable data model consumed by the page generators
//! ([`Transform`], [`ConfigOption`], [`Section`], [`GuideIndex`]) and a loader
//! that reads it from a directory of TOML files ([`load_dir`]).
//!
//! # Example
//!
//! ```
//! use pipedoc_meta::{Catalog, OptionType};
//! use std::path::Path;
//!
//! let mut catalog = Catalog::default();
//! catalog
//!     .add_str(
//!         Path::new("sampler.toml"),
//!         r#"
//! [transforms.sampler]
//! description = "Sample events."
//! input_types = ["log"]
//!
//! [transforms.sampler.options.rate]
//! type = "int"
//! required = true
//! "#,
//!     )
//!     .unwrap();
//!
//! let sampler = &catalog.transforms["sampler"];
//! assert_eq!(sampler.options["rate"].option_type, OptionType::Int);
//! ```

mod guides;
mod loader;
mod option;
mod transform;

pub use guides::{Guide, GuideEntry, GuideIndex};
pub use loader::{Catalog, MetadataError, load_dir};
pub use option::{ConfigOption, OptionType, UnknownOptionType};
pub use transform::{Resource, Section, Transform};
