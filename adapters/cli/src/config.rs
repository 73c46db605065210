use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use tile_blast_core::GameConfig;
use tile_blast_system_boosters::{BoosterInventory, Charge};

/// Settings assembled from the optional configuration file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) game: GameConfig,
    pub(crate) boosters: BoosterInventory,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    game: GameConfig,
    #[serde(default)]
    boosters: BoosterCharges,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct BoosterCharges {
    bomb: u32,
    teleport: u32,
}

impl Default for BoosterCharges {
    fn default() -> Self {
        Self {
            bomb: BoosterInventory::DEFAULT_BOMB_USES,
            teleport: BoosterInventory::DEFAULT_TELEPORT_USES,
        }
    }
}

/// Reads and validates the configuration file at `path`.
pub(crate) fn load(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid configuration in {}", path.display()))
}

fn parse(contents: &str) -> Result<Settings> {
    let file: ConfigFile =
        toml::from_str(contents).context("failed to parse configuration toml contents")?;
    file.game.validate()?;
    Ok(Settings {
        game: file.game,
        boosters: BoosterInventory::new(
            Charge::unlocked(file.boosters.bomb),
            Charge::unlocked(file.boosters.teleport),
        ),
    })
}
