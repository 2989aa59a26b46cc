//! Enemy template loader.

use std::path::Path;

use combat_core::EnemyProfile;

use crate::loaders::{LoadResult, read_file};

/// Named enemy profiles loaded from a RON file.
#[derive(Clone, Debug, Default)]
pub struct EnemyTemplateSet {
    templates: Vec<EnemyProfile>,
}

impl EnemyTemplateSet {
    pub fn new(templates: Vec<EnemyProfile>) -> Self {
        Self { templates }
    }

    /// Look up a template by its name.
    pub fn get(&self, name: &str) -> Option<&EnemyProfile> {
        self.templates.iter().find(|profile| profile.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnemyProfile> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Loader for enemy templates from RON files.
///
/// The file holds a list of [`EnemyProfile`] records; duplicate names are
/// rejected so spawn tables stay unambiguous.
pub struct EnemyTemplateLoader;

impl EnemyTemplateLoader {
    /// Load enemy templates from a RON file.
    pub fn load(path: &Path) -> LoadResult<EnemyTemplateSet> {
        let content = read_file(path)?;
        let templates: Vec<EnemyProfile> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy template RON: {}", e))?;

        for (i, profile) in templates.iter().enumerate() {
            if templates[..i].iter().any(|other| other.name == profile.name) {
                anyhow::bail!("Duplicate enemy template name: {}", profile.name);
            }
        }

        Ok(EnemyTemplateSet::new(templates))
    }
}
