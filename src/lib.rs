pub mod article;
pub mod config;
pub mod content;
pub mod db;
pub mod domain;
pub mod error;
pub mod logging;
pub mod paths;
pub mod quiz;
pub mod speech;
pub mod study;
pub mod translate;
pub mod validation;

#[cfg(test)]
mod testing;
