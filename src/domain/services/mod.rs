//! Domain services containing core business logic.

mod error_classifier;
mod prompt_builder;

pub use error_classifier::*;
pub use prompt_builder::*;
