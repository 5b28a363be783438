//! CLI command implementations.

pub(crate) mod generate;
pub(crate) mod list;

pub(crate) use generate::GenerateArgs;
pub(crate) use list::ListArgs;
