//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive walking, tag extraction and
//! output, plus helpers to load them from disk and the environment.

mod load;
mod schema;

pub use load::{default_config_path, default_music_dir, resolve_config_path};
pub use schema::*;

#[cfg(test)]
mod tests;
