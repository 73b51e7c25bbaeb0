//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to drive runtime
//! behavior, the built-in catalog tables, and helpers to load configuration
//! from disk.

mod defaults;
mod load;
mod schema;

pub(crate) use load::xdg_dir;
pub use schema::*;
