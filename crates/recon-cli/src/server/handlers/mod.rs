//! API route handlers.

mod columns;
mod health;
mod reconcile;
mod upload;

pub use columns::*;
pub use health::*;
pub use reconcile::*;
