//! Bundled learning content

pub mod catalog;

pub use catalog::{LevelProgress, WordCatalog};
