pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod metadata;
pub mod strategy;
pub mod ui;

pub use error::{AutoverError, Result};
