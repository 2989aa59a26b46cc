//! Data-file loaders.
//!
//! Loadout data ships as TOML (hand-edited, config-like), enemy templates
//! as RON (structured records). Loaders parse into combat-core types and
//! report failures through `anyhow`.
mod enemies;
mod loadout;

pub use enemies::{EnemyTemplateLoader, EnemyTemplateSet};
pub use loadout::{LoadoutLoader, PlayerLoadout};

use std::path::Path;

/// Result type shared by all loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Read a content file into a string with a path-annotated error.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
}
