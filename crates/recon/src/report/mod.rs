//! Report assembly.

mod builder;
mod model;

pub use builder::{RunMetadata, build_report};
pub use model::*;
