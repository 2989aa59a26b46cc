//! Player loadout loader.

use std::path::Path;

use serde::Deserialize;

use combat_core::{LoadoutOracle, RuneKind, WeaponType};

use crate::loaders::{LoadResult, read_file};

/// Persistent account modifiers: rune counts and weapon passive unlocks.
///
/// Implements [`LoadoutOracle`], so a loaded file plugs straight into the
/// damage calculator. Missing sections default to an empty loadout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlayerLoadout {
    runes: RuneCounts,
    passives: PassiveUnlocks,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
struct RuneCounts {
    critical: u32,
    crit_damage: u32,
    health: u32,
    speed: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
struct PassiveUnlocks {
    sword: bool,
    scythe: bool,
    bow: bool,
    runeblade: bool,
    sabres: bool,
    staff: bool,
}

impl PlayerLoadout {
    /// Grants runes of a kind (drops, rewards).
    pub fn add_runes(&mut self, kind: RuneKind, amount: u32) {
        let slot = match kind {
            RuneKind::Critical => &mut self.runes.critical,
            RuneKind::CritDamage => &mut self.runes.crit_damage,
            RuneKind::Health => &mut self.runes.health,
            RuneKind::Speed => &mut self.runes.speed,
        };
        *slot += amount;
    }

    /// Permanently unlocks a weapon's passive.
    pub fn unlock_passive(&mut self, weapon: WeaponType) {
        let slot = match weapon {
            WeaponType::Sword => &mut self.passives.sword,
            WeaponType::Scythe => &mut self.passives.scythe,
            WeaponType::Bow => &mut self.passives.bow,
            WeaponType::Runeblade => &mut self.passives.runeblade,
            WeaponType::Sabres => &mut self.passives.sabres,
            WeaponType::Staff => &mut self.passives.staff,
        };
        *slot = true;
    }
}

impl LoadoutOracle for PlayerLoadout {
    fn rune_count(&self, kind: RuneKind) -> u32 {
        match kind {
            RuneKind::Critical => self.runes.critical,
            RuneKind::CritDamage => self.runes.crit_damage,
            RuneKind::Health => self.runes.health,
            RuneKind::Speed => self.runes.speed,
        }
    }

    fn passive_unlocked(&self, weapon: WeaponType) -> bool {
        match weapon {
            WeaponType::Sword => self.passives.sword,
            WeaponType::Scythe => self.passives.scythe,
            WeaponType::Bow => self.passives.bow,
            WeaponType::Runeblade => self.passives.runeblade,
            WeaponType::Sabres => self.passives.sabres,
            WeaponType::Staff => self.passives.staff,
        }
    }
}

/// Loader for player loadout data from TOML files.
pub struct LoadoutLoader;

impl LoadoutLoader {
    /// Load a loadout from a TOML file.
    pub fn load(path: &Path) -> LoadResult<PlayerLoadout> {
        let content = read_file(path)?;
        let loadout: PlayerLoadout = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse loadout TOML: {}", e))?;

        Ok(loadout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_runes_and_passives() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[runes]
critical = 2
crit_damage = 1

[passives]
sword = true
bow = true
"#
        )
        .unwrap();

        let loadout = LoadoutLoader::load(file.path()).unwrap();

        assert_eq!(loadout.rune_count(RuneKind::Critical), 2);
        assert_eq!(loadout.rune_count(RuneKind::CritDamage), 1);
        assert_eq!(loadout.rune_count(RuneKind::Health), 0);
        assert!(loadout.passive_unlocked(WeaponType::Sword));
        assert!(loadout.passive_unlocked(WeaponType::Bow));
        assert!(!loadout.passive_unlocked(WeaponType::Scythe));
    }

    #[test]
    fn empty_file_is_an_empty_loadout() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let loadout = LoadoutLoader::load(file.path()).unwrap();
        assert_eq!(loadout, PlayerLoadout::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "runes = critical").unwrap();
        assert!(LoadoutLoader::load(file.path()).is_err());
    }

    #[test]
    fn progression_mutators_accumulate() {
        let mut loadout = PlayerLoadout::default();
        loadout.add_runes(RuneKind::Critical, 2);
        loadout.add_runes(RuneKind::Critical, 1);
        loadout.unlock_passive(WeaponType::Scythe);

        assert_eq!(loadout.rune_count(RuneKind::Critical), 3);
        assert!(loadout.passive_unlocked(WeaponType::Scythe));
    }
}
