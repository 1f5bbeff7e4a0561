//! CLI command implementations.

pub mod inspect;
pub mod reconcile;
pub mod serve;
